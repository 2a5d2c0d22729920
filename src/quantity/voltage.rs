use std::ops::Mul;

quantity!(Volts, via: f64, suffix: "V", precision: 0);

/// Scale by a unitless ratio, for example the usable fraction of a battery bank.
impl Mul<f64> for Volts {
    type Output = Self;

    fn mul(self, ratio: f64) -> Self::Output {
        Self(self.0 * ratio)
    }
}
