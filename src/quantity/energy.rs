use std::ops::Div;

use crate::quantity::{charge::AmpHours, voltage::Volts};

quantity!(WattHours, via: f64, suffix: "Wh", precision: 0);

impl Div<Volts> for WattHours {
    type Output = AmpHours;

    fn div(self, volts: Volts) -> Self::Output {
        AmpHours(self.0 / volts.0)
    }
}
