quantity!(AmpHours, via: f64, suffix: "Ah", precision: 0);
positive!(AmpHours);

impl AmpHours {
    /// Round up to the next whole amp-hour: a battery bank is never sized below the demand.
    #[must_use]
    pub fn round_up(self) -> Self {
        Self(self.0.ceil())
    }
}
