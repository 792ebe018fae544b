//! Display formatting helpers

/// Render seconds as `m:ss`
///
/// Minutes and the seconds remainder are floored independently, so `75.9`
/// renders as `1:15`. Negative or non-finite input renders as `0:00`.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", mins, secs)
}
