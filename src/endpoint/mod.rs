//! The endpoint configuration model.
//!
//! An [`EndpointConfig`] is the snapshot the editing UI hands to the compiler.
//! It is a plain value: edits go through [`EndpointConfig::apply`], which
//! returns a new configuration and leaves the old one untouched.
//!
//! The JSON encoding uses the camelCase field names of the editor, and every
//! field has a default so half-filled configurations always decode.

pub mod edit;
pub mod fields;
pub mod filters;
pub mod joins;
pub mod params;
pub mod sorting;

pub use self::edit::Edit;
pub use self::fields::{Aggregation, FieldSpec};
pub use self::filters::{FilterOp, FilterSpec, LogicalOp, ValueType};
pub use self::joins::{JoinKind, JoinSpec};
pub use self::params::{ParamType, QueryParam};
pub use self::sorting::{SortOrder, SortSpec};

use crate::error::RestqlResult;
use serde::{Deserialize, Deserializer, Serialize};

/// HTTP method of the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    #[serde(alias = "get")]
    Get,
    #[serde(alias = "post")]
    Post,
    #[serde(alias = "put")]
    Put,
    #[serde(alias = "delete")]
    Delete,
    #[serde(alias = "patch")]
    Patch,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
            Method::Patch => write!(f, "PATCH"),
        }
    }
}

/// Pagination settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub enabled: bool,
    pub default_limit: u32,
    pub max_limit: u32,
    pub allow_custom_limit: bool,
    pub include_total: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            enabled: false,
            default_limit: 10,
            max_limit: 100,
            allow_custom_limit: false,
            include_total: false,
        }
    }
}

/// The root of the endpoint configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EndpointConfig {
    /// Display name, carried through untouched.
    pub name: Option<String>,
    pub description: Option<String>,
    pub method: Method,
    /// Route suffix, e.g. `/users`.
    pub path: String,
    pub primary_table: String,
    pub primary_table_alias: Option<String>,
    pub joins: Vec<JoinSpec>,
    /// Empty means `SELECT *`.
    pub selected_fields: Vec<FieldSpec>,
    pub filters: Vec<FilterSpec>,
    pub sorting: Vec<SortSpec>,
    pub pagination: Pagination,
    pub query_params: Vec<QueryParam>,
    pub allow_custom_sorting: bool,
    /// Exposes the `fields=` parameter on the example URL.
    pub allow_field_selection: bool,
    pub enable_distinct: bool,
    pub hard_limit: Option<u32>,
}

impl EndpointConfig {
    /// Create an empty GET endpoint reading from `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            primary_table: table.into(),
            ..Self::default()
        }
    }

    /// Decode a configuration from its JSON encoding.
    pub fn from_json(json: &str) -> RestqlResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.primary_table_alias = Some(alias.into());
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn join(mut self, join: JoinSpec) -> Self {
        self.joins.push(join);
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.selected_fields.push(field);
        self
    }

    pub fn filter(mut self, filter: FilterSpec) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sorting.push(sort);
        self
    }

    pub fn param(mut self, param: QueryParam) -> Self {
        self.query_params.push(param);
        self
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// The name `FROM` clauses and join conditions refer to the primary table by.
    pub fn primary_ref(&self) -> &str {
        non_empty(&self.primary_table_alias).unwrap_or(&self.primary_table)
    }
}

/// Treat `Some("")` and `Some("  ")` the same as `None`.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub(crate) fn default_true() -> bool {
    true
}

/// Accept strings, numbers, booleans and null where the editor stores a value
/// as text. Form controls are not consistent about it.
pub(crate) fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

pub(crate) fn loose_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_minimal() {
        let cfg = EndpointConfig::from_json(r#"{"primaryTable": "thryl_users"}"#).unwrap();
        assert_eq!(cfg.primary_table, "thryl_users");
        assert_eq!(cfg.method, Method::Get);
        assert!(cfg.selected_fields.is_empty());
        assert!(!cfg.pagination.enabled);
    }

    #[test]
    fn test_decode_full_shape() {
        let json = r#"{
            "method": "POST",
            "path": "/orders",
            "primaryTable": "thryl_users",
            "primaryTableAlias": "u",
            "joins": [{"table": "thryl_orders", "alias": "o", "joinType": "left",
                       "leftColumn": "id", "rightColumn": "user_id"}],
            "selectedFields": [{"column": "orders.total", "aggregation": "sum", "alias": "revenue"}],
            "filters": [{"column": "age", "operator": "gte", "value": 18, "valueType": "static"}],
            "sorting": [{"column": "created_at", "direction": "desc"}],
            "pagination": {"enabled": true, "defaultLimit": 25, "maxLimit": 50,
                           "allowCustomLimit": true, "includeTotal": true},
            "queryParams": [{"name": "q", "type": "string"}],
            "allowCustomSorting": true,
            "enableDistinct": false,
            "hardLimit": 500
        }"#;
        let cfg = EndpointConfig::from_json(json).unwrap();
        assert_eq!(cfg.method, Method::Post);
        assert_eq!(cfg.primary_ref(), "u");
        assert_eq!(cfg.joins[0].kind, JoinKind::Left);
        assert!(cfg.joins[0].enabled);
        assert_eq!(cfg.selected_fields[0].aggregation, Aggregation::Sum);
        assert_eq!(cfg.filters[0].value, "18");
        assert_eq!(cfg.filters[0].operator, Some(FilterOp::Gte));
        assert_eq!(cfg.sorting[0].direction, SortOrder::Desc);
        assert_eq!(cfg.pagination.default_limit, 25);
        assert_eq!(cfg.query_params[0].param_type, ParamType::String);
        assert_eq!(cfg.hard_limit, Some(500));
    }

    #[test]
    fn test_decode_rejects_unknown_operator() {
        let json = r#"{"filters": [{"column": "a", "operator": "approx"}]}"#;
        assert!(EndpointConfig::from_json(json).is_err());
    }

    #[test]
    fn test_primary_ref_ignores_blank_alias() {
        let cfg = EndpointConfig::new("users").alias("  ");
        assert_eq!(cfg.primary_ref(), "users");
    }
}
