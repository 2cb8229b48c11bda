//! Cross-field validation rules.

use std::ops::RangeInclusive;
use uploadpost_error::{ValidationError, ValidationErrorKind};

/// Accepted number of poll options.
pub const POLL_OPTIONS_RANGE: RangeInclusive<usize> = 2..=4;

/// Maximum characters per poll option.
pub const POLL_OPTION_MAX_CHARS: usize = 25;

/// Accepted poll duration in minutes (5 minutes to 7 days).
pub const POLL_DURATION_RANGE: RangeInclusive<i64> = 5..=10080;

/// Poll duration used when none is supplied.
pub const POLL_DURATION_DEFAULT: i64 = 1440;

/// Validate a list of already-trimmed, non-empty poll options.
///
/// # Errors
///
/// Fails with [`ValidationErrorKind::PollOptionCount`] when the count is
/// outside [`POLL_OPTIONS_RANGE`], or [`ValidationErrorKind::PollOptionTooLong`]
/// naming every option longer than [`POLL_OPTION_MAX_CHARS`].
#[track_caller]
pub fn parse_poll_options(options: Vec<String>) -> Result<Vec<String>, ValidationError> {
    if !POLL_OPTIONS_RANGE.contains(&options.len()) {
        return Err(ValidationError::new(ValidationErrorKind::PollOptionCount {
            found: options.len(),
        }));
    }
    let too_long: Vec<String> = options
        .iter()
        .filter(|option| option.chars().count() > POLL_OPTION_MAX_CHARS)
        .cloned()
        .collect();
    if !too_long.is_empty() {
        return Err(ValidationError::new(ValidationErrorKind::PollOptionTooLong {
            options: too_long,
        }));
    }
    Ok(options)
}

/// Validate a poll duration in minutes.
///
/// # Errors
///
/// Fails with [`ValidationErrorKind::PollDuration`] outside [`POLL_DURATION_RANGE`].
#[track_caller]
pub fn check_poll_duration(minutes: i64) -> Result<i64, ValidationError> {
    if POLL_DURATION_RANGE.contains(&minutes) {
        Ok(minutes)
    } else {
        Err(ValidationError::new(ValidationErrorKind::PollDuration {
            provided: minutes,
        }))
    }
}

/// Validate that a numeric index field is zero or greater.
///
/// # Errors
///
/// Fails with [`ValidationErrorKind::NegativeIndex`] for negative values.
#[track_caller]
pub fn check_non_negative(field: &str, value: i64) -> Result<i64, ValidationError> {
    if value >= 0 {
        Ok(value)
    } else {
        Err(ValidationError::new(ValidationErrorKind::NegativeIndex {
            field: field.to_string(),
            value,
        }))
    }
}

/// Fail when `field` is set together with any of `others`.
///
/// `others` pairs a display label with whether that field is set; every set
/// label is named in the error.
///
/// # Errors
///
/// Fails with [`ValidationErrorKind::MutuallyExclusive`].
#[track_caller]
pub fn check_exclusive(field: &str, others: &[(&str, bool)]) -> Result<(), ValidationError> {
    let conflicting: Vec<String> = others
        .iter()
        .filter(|(_, set)| *set)
        .map(|(label, _)| label.to_string())
        .collect();
    if conflicting.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(ValidationErrorKind::MutuallyExclusive {
            field: field.to_string(),
            conflicting,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn poll_option_count_is_bounded() {
        assert!(parse_poll_options(options(&["a", "b"])).is_ok());
        let err = parse_poll_options(options(&["a", "b", "c", "d", "e"])).unwrap_err();
        assert_eq!(err.kind(), &ValidationErrorKind::PollOptionCount { found: 5 });
        let err = parse_poll_options(options(&["solo"])).unwrap_err();
        assert_eq!(err.kind(), &ValidationErrorKind::PollOptionCount { found: 1 });
    }

    #[test]
    fn long_options_are_named() {
        let long = "x".repeat(26);
        let err = parse_poll_options(vec!["ok".to_string(), long.clone()]).unwrap_err();
        assert_eq!(
            err.kind(),
            &ValidationErrorKind::PollOptionTooLong { options: vec![long] }
        );
        // Counted in characters, not bytes.
        assert!(parse_poll_options(vec!["é".repeat(25), "b".to_string()]).is_ok());
    }

    #[test]
    fn poll_duration_bounds() {
        assert_eq!(check_poll_duration(5).unwrap(), 5);
        assert_eq!(check_poll_duration(10080).unwrap(), 10080);
        assert!(check_poll_duration(4).is_err());
        assert!(check_poll_duration(10081).is_err());
    }

    #[test]
    fn negative_indexes_fail() {
        assert_eq!(check_non_negative("idx", 0).unwrap(), 0);
        let err = check_non_negative("idx", -1).unwrap_err();
        assert!(err.to_string().contains("idx must be zero or greater"));
    }

    #[test]
    fn exclusive_fields_name_every_conflict() {
        assert!(check_exclusive("Poll", &[("A", false), ("B", false)]).is_ok());
        let err = check_exclusive("Poll", &[("A", true), ("B", false), ("C", true)]).unwrap_err();
        assert_eq!(
            err.kind(),
            &ValidationErrorKind::MutuallyExclusive {
                field: "Poll".to_string(),
                conflicting: vec!["A".to_string(), "C".to_string()],
            }
        );
    }
}
