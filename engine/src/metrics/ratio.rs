/// The one guarded division used for every ratio: a denominator that is not
/// positive gives 0, and so does any non-finite result.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        let value = numerator / denominator;
        if value.is_finite() {
            return value;
        }
    }
    0.0
}

pub fn count_ratio(numerator: u64, denominator: u64) -> f64 {
    ratio(numerator as f64, denominator as f64)
}

/// `ratio * 100`.
pub fn percentage(numerator: f64, denominator: f64) -> f64 {
    scaled(ratio(numerator, denominator), 100.0)
}

/// `ratio * 1000`, as used by CPM.
pub fn per_thousand(numerator: f64, denominator: f64) -> f64 {
    scaled(ratio(numerator, denominator), 1000.0)
}

// Scaling a huge finite ratio can still overflow.
fn scaled(value: f64, factor: f64) -> f64 {
    let scaled = value * factor;
    if scaled.is_finite() {
        scaled
    } else {
        0.0
    }
}
