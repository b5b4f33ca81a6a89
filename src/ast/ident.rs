use crate::error::ValidationError;
use crate::validator::{check_column_ref, check_identifier};
use serde::Serialize;

/// A table or alias name that passed the safe-identifier check.
///
/// Only constructible through [`Ident::parse`], so anything holding an
/// `Ident` can be interpolated into SQL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ident(String);

impl Ident {
    /// Validate `value` (trimmed), reporting failures against `field`.
    pub fn parse(field: &str, value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        check_identifier(field, value)?;
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A column reference, optionally qualified (`orders.total`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnRef(String);

impl ColumnRef {
    pub fn parse(field: &str, value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        check_column_ref(field, value)?;
        Ok(Self(value.to_string()))
    }

    /// Qualify a bare column with a table reference.
    pub fn qualified(table: &Ident, column: &Ident) -> Self {
        Self(format!("{}.{}", table, column))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last path segment: `total` for `orders.total`.
    pub fn name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ident_trims_and_validates() {
        assert_eq!(Ident::parse("t", " users ").unwrap().as_str(), "users");
        assert!(Ident::parse("t", "users; DROP TABLE x").is_err());
    }

    #[test]
    fn test_column_name_is_last_segment() {
        let col = ColumnRef::parse("c", "orders.total").unwrap();
        assert_eq!(col.name(), "total");
        assert_eq!(ColumnRef::parse("c", "id").unwrap().name(), "id");
    }
}
