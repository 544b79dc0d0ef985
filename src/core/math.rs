// Math utilities and helper functions

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Whether a float is finite and strictly positive
pub fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
