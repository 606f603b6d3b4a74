use shared::models::PerformanceBand;

/// Conversion rates (percent): 30 and up is good, 10 and up neutral.
pub const CONVERSION_GOOD: f64 = 30.0;
pub const CONVERSION_NEUTRAL: f64 = 10.0;

/// ROAS: 3x and up is good, break-even and up neutral.
pub const ROAS_GOOD: f64 = 3.0;
pub const ROAS_NEUTRAL: f64 = 1.0;

pub fn conversion_band(percent: f64) -> PerformanceBand {
    band(percent, CONVERSION_GOOD, CONVERSION_NEUTRAL)
}

pub fn roas_band(roas: f64) -> PerformanceBand {
    band(roas, ROAS_GOOD, ROAS_NEUTRAL)
}

fn band(value: f64, good: f64, neutral: f64) -> PerformanceBand {
    if value >= good {
        PerformanceBand::Good
    } else if value >= neutral {
        PerformanceBand::Neutral
    } else {
        PerformanceBand::Poor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_band_thresholds() {
        assert_eq!(conversion_band(30.0), PerformanceBand::Good);
        assert_eq!(conversion_band(29.99), PerformanceBand::Neutral);
        assert_eq!(conversion_band(10.0), PerformanceBand::Neutral);
        assert_eq!(conversion_band(9.99), PerformanceBand::Poor);
        assert_eq!(conversion_band(0.0), PerformanceBand::Poor);
    }

    #[test]
    fn test_roas_band_thresholds() {
        assert_eq!(roas_band(3.0), PerformanceBand::Good);
        assert_eq!(roas_band(1.0), PerformanceBand::Neutral);
        assert_eq!(roas_band(0.99), PerformanceBand::Poor);
    }
}
