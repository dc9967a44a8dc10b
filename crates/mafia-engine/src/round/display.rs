/// Formats seconds as zero-padded `mm:ss`.
///
/// ```
/// assert_eq!(mafia_engine::format_clock(125), "02:05");
/// assert_eq!(mafia_engine::format_clock(10), "00:10");
/// ```
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Formats seconds as `m:ss`, for history rows.
#[must_use]
pub fn format_compact(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
