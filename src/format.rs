/// Human-readable durations

/// Render a second count as `M:SS`, or `H:MM:SS` from one hour up
///
/// Examples:
/// - 59 → 0:59
/// - 65 → 1:05
/// - 3661 → 1:01:01
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
