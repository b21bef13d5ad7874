use std::fmt::Display;
use std::path::Path;

use crate::utils::error::{DrawError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl Display, reason: impl Into<String>) -> DrawError {
    DrawError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Roster and output locations must be usable as file system paths.
pub fn validate_path(field: &str, path: &Path) -> Result<()> {
    let shown = path.to_string_lossy();
    if path.as_os_str().is_empty() {
        return Err(invalid(field, shown, "Path cannot be empty"));
    }
    if shown.contains('\0') {
        return Err(invalid(field, shown, "Path contains null bytes"));
    }
    Ok(())
}

/// Round sizes, round lists and timer bounds all have a lower limit.
pub fn validate_at_least(field: &str, value: usize, min: usize) -> Result<()> {
    if value < min {
        return Err(invalid(field, value, format!("Value must be at least {}", min)));
    }
    Ok(())
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

/// 報名表單欄位檢查，回傳去除空白後的值
pub fn validate_form_field(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DrawError::ValidationError {
            field: field.to_string(),
            reason: "required".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Inclusive range check. NaN is outside every range.
pub fn validate_range<T: PartialOrd + Display + Copy>(
    field: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(invalid(
            field,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("roster.path", Path::new("data/participants.csv")).is_ok());
        assert!(validate_path("roster.path", Path::new("")).is_err());
        assert!(validate_path("output.dir", Path::new("bad\0dir")).is_err());
    }

    #[test]
    fn test_validate_at_least() {
        assert!(validate_at_least("draw.rounds", 3, 1).is_ok());
        assert!(validate_at_least("draw.rounds", 1, 1).is_ok());

        let err = validate_at_least("draw.rounds", 0, 1).unwrap_err();
        assert!(err.to_string().contains("draw.rounds"));
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_validate_form_field_trims() {
        assert_eq!(validate_form_field("name", "  Carol ").unwrap(), "Carol");
        assert!(matches!(
            validate_form_field("department", "   "),
            Err(DrawError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("animation.jitter_probability", 0.2, 0.0, 1.0).is_ok());
        assert!(validate_range("animation.jitter_probability", 1.0, 0.0, 1.0).is_ok());
        assert!(validate_range("animation.jitter_probability", 1.5, 0.0, 1.0).is_err());
        assert!(validate_range("animation.initial_interval_ms", 50u64, 100, 300).is_err());
        assert!(validate_non_empty_string("web.bind", "").is_err());
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        assert!(validate_range("animation.jitter_probability", f64::NAN, 0.0, 1.0).is_err());
    }
}
