/// Format elapsed milliseconds as an MM:SS clock string.
///
/// Whole seconds only (floor). Minutes keep growing past 99 rather
/// than wrapping, so long sessions stay readable.
pub fn format_clock(elapsed_ms: f32) -> String {
    let total_seconds = (elapsed_ms.max(0.0) / 1000.0).floor() as u64;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Parse an MM:SS clock string back to whole seconds.
pub fn parse_clock(clock: &str) -> Option<u64> {
    let (minutes, seconds) = clock.split_once(':')?;
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    Some(minutes * 60 + seconds)
}
