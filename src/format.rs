//! Elapsed time formatting.

/// Formats a number of whole seconds as `HH:MM:SS`.
///
/// Each field is zero-padded to two digits. Hours are not wrapped, so values
/// of 100 hours or more produce three or more hour digits.
pub fn format_elapsed(total_seconds: u64) -> String {
    let seconds = total_seconds % 60;
    let minutes = (total_seconds / 60) % 60;
    let hours = total_seconds / 3600;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
