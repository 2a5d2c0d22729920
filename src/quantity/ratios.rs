quantity!(Percentage, via: u16, suffix: "%", precision: 0);

impl Percentage {
    /// Convert the percentage into `0.0..=1.0`.
    pub fn to_ratio(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    #[test]
    fn to_ratio_ok() {
        assert_abs_diff_eq!(Percentage(95).to_ratio(), 0.95);
        assert_abs_diff_eq!(Percentage(50).to_ratio(), 0.5);
        assert_abs_diff_eq!(Percentage(0).to_ratio(), 0.0);
    }
}
