//! General time utility functions

use chrono;

/// Number of nanoseconds in a second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Convert a duration into a number of seconds, or `None` if the nanosecond
/// count overflows.
pub fn duration_to_seconds(duration: chrono::Duration) -> Option<f64> {
    duration
        .num_nanoseconds()
        .map(|ns| ns as f64 / NANOS_PER_SECOND as f64)
}

/// Convert a cycle frequency into the cycle period.
///
/// Returns `None` for non-positive or non-finite frequencies.
pub fn frequency_to_period(frequency_hz: f64) -> Option<std::time::Duration> {
    if frequency_hz.is_finite() && frequency_hz > 0.0 {
        Some(std::time::Duration::from_secs_f64(1.0 / frequency_hz))
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_duration_to_seconds() {
        assert_eq!(
            duration_to_seconds(chrono::Duration::milliseconds(1500)),
            Some(1.5)
        );
    }

    #[test]
    fn test_frequency_to_period() {
        let period = frequency_to_period(10.0).unwrap();
        assert!((period.as_secs_f64() - 0.1).abs() < 1e-9);
        assert_eq!(frequency_to_period(0.0), None);
        assert_eq!(frequency_to_period(-1.0), None);
        assert_eq!(frequency_to_period(f64::NAN), None);
    }
}
