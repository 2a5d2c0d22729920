use std::ops::Mul;

use crate::quantity::{energy::WattHours, time::Hours};

quantity!(Watts, via: f64, suffix: "W", precision: 0);
positive!(Watts);

impl Mul<Hours> for Watts {
    type Output = WattHours;

    fn mul(self, hours: Hours) -> Self::Output {
        WattHours(self.0 * hours.0)
    }
}
