//! Identifier validation.
//!
//! Every table, column and alias name that ends up in generated SQL text goes
//! through this gate first. Names that fail are never interpolated.

use crate::error::ValidationError;

/// True iff `s` matches `^[A-Za-z_][A-Za-z0-9_]*$`.
pub fn is_safe_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// True iff `s` is one or more safe identifiers joined by `.`,
/// e.g. `orders.total`.
pub fn is_safe_column_ref(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_safe_identifier)
}

/// Check a table or alias name, reporting a failure against `field`.
pub fn check_identifier(field: &str, value: &str) -> Result<(), ValidationError> {
    if is_safe_identifier(value) {
        Ok(())
    } else {
        Err(ValidationError::unsafe_identifier(field, value))
    }
}

/// Check a possibly qualified column reference, reporting a failure against `field`.
pub fn check_column_ref(field: &str, value: &str) -> Result<(), ValidationError> {
    if is_safe_column_ref(value) {
        Ok(())
    } else {
        Err(ValidationError::unsafe_identifier(field, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_identifiers() {
        for ok in ["users", "_tmp", "thryl_users", "a1", "A_B_9", "_"] {
            assert!(is_safe_identifier(ok), "{ok} should be safe");
        }
    }

    #[test]
    fn test_unsafe_identifiers() {
        for bad in [
            "",
            "1users",
            "users; DROP TABLE x",
            "user-name",
            "users.id",
            "na me",
            "\"users\"",
            "ünïcode",
        ] {
            assert!(!is_safe_identifier(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_column_refs() {
        assert!(is_safe_column_ref("orders.total"));
        assert!(is_safe_column_ref("total"));
        assert!(!is_safe_column_ref("orders."));
        assert!(!is_safe_column_ref(".total"));
        assert!(!is_safe_column_ref(""));
        assert!(!is_safe_column_ref("orders.total)--"));
    }

    #[test]
    fn test_check_reports_field() {
        let err = check_identifier("joins[0].table", "bad table").unwrap_err();
        assert_eq!(err.field, "joins[0].table");
        assert!(check_column_ref("sorting[0].column", "created_at").is_ok());
    }
}
