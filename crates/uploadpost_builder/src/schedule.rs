//! Scheduling date normalization.

/// Append `Z` to a date-time that carries no timezone marker.
///
/// A value already ending in `Z`/`z` or a `±HH:MM` / `±HHMM` offset is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use uploadpost_builder::normalize_date;
///
/// assert_eq!(normalize_date("2024-01-01T10:00:00"), "2024-01-01T10:00:00Z");
/// assert_eq!(normalize_date("2024-01-01T10:00:00+02:00"), "2024-01-01T10:00:00+02:00");
/// ```
pub fn normalize_date(value: &str) -> String {
    let value = value.trim();
    if has_timezone(value) {
        value.to_string()
    } else {
        format!("{}Z", value)
    }
}

fn has_timezone(value: &str) -> bool {
    let bytes = value.as_bytes();
    let n = bytes.len();
    let is_sign = |c: u8| c == b'+' || c == b'-';
    let digits = |s: &[u8]| s.iter().all(u8::is_ascii_digit);

    if matches!(bytes.last(), Some(b'z' | b'Z')) {
        return true;
    }
    let compact = n >= 5 && is_sign(bytes[n - 5]) && digits(&bytes[n - 4..]);
    let colon = n >= 6
        && is_sign(bytes[n - 6])
        && digits(&bytes[n - 5..n - 3])
        && bytes[n - 3] == b':'
        && digits(&bytes[n - 2..]);
    compact || colon
}
