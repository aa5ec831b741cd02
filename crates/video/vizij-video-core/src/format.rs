//! Elapsed / duration labels.

/// Format seconds as `M:SS`.
///
/// Seconds are floored and zero-padded; there is no hour component, so an
/// hour-long clip reads `60:00`. Negative or non-finite input renders `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
