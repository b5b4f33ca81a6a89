use serde::{Deserialize, Deserializer, Serialize};

/// Filter operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    Ilike,
    In,
    NotIn,
    IsNull,
    IsNotNull,
    Between,
    NotBetween,
}

impl FilterOp {
    pub const ALL: [FilterOp; 14] = [
        FilterOp::Eq,
        FilterOp::Neq,
        FilterOp::Gt,
        FilterOp::Gte,
        FilterOp::Lt,
        FilterOp::Lte,
        FilterOp::Like,
        FilterOp::Ilike,
        FilterOp::In,
        FilterOp::NotIn,
        FilterOp::IsNull,
        FilterOp::IsNotNull,
        FilterOp::Between,
        FilterOp::NotBetween,
    ];

    /// The SQL token for this operator. Single source of truth for every renderer.
    pub fn sql_symbol(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Neq => "!=",
            FilterOp::Gt => ">",
            FilterOp::Gte => ">=",
            FilterOp::Lt => "<",
            FilterOp::Lte => "<=",
            FilterOp::Like => "LIKE",
            FilterOp::Ilike => "ILIKE",
            FilterOp::In => "IN",
            FilterOp::NotIn => "NOT IN",
            FilterOp::IsNull => "IS NULL",
            FilterOp::IsNotNull => "IS NOT NULL",
            FilterOp::Between => "BETWEEN",
            FilterOp::NotBetween => "NOT BETWEEN",
        }
    }

    /// Configuration name, also used in example URLs (`age[gte]=18`).
    pub fn name(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Neq => "neq",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::Like => "like",
            FilterOp::Ilike => "ilike",
            FilterOp::In => "in",
            FilterOp::NotIn => "not_in",
            FilterOp::IsNull => "is_null",
            FilterOp::IsNotNull => "is_not_null",
            FilterOp::Between => "between",
            FilterOp::NotBetween => "not_between",
        }
    }

    /// Takes no value.
    pub fn is_unary(&self) -> bool {
        matches!(self, FilterOp::IsNull | FilterOp::IsNotNull)
    }

    /// Takes two values.
    pub fn is_range(&self) -> bool {
        matches!(self, FilterOp::Between | FilterOp::NotBetween)
    }

    /// Takes a comma separated list.
    pub fn is_list(&self) -> bool {
        matches!(self, FilterOp::In | FilterOp::NotIn)
    }
}

/// Where a filter's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Literal text, used verbatim.
    #[default]
    Static,
    /// Name of a declared query parameter.
    Parameter,
    /// One of `NOW()`, `TODAY()`, `CURRENT_USER()`.
    Function,
}

/// Combinator joining a filter to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOp {
    #[default]
    #[serde(alias = "AND")]
    And,
    #[serde(alias = "OR")]
    Or,
}

impl LogicalOp {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

/// One filter condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    pub column: String,
    /// `None` until the user picks one.
    #[serde(deserialize_with = "opt_operator")]
    pub operator: Option<FilterOp>,
    pub value_type: ValueType,
    #[serde(deserialize_with = "super::loose_string")]
    pub value: String,
    #[serde(deserialize_with = "super::loose_opt_string")]
    pub second_value: Option<String>,
    pub logical_operator: LogicalOp,
    #[serde(default = "super::default_true")]
    pub enabled: bool,
    /// Contiguous filters sharing a group id render in parentheses.
    pub group_id: Option<String>,
    /// Forces a new group even when the previous filter has the same id.
    pub is_group_start: bool,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            column: String::new(),
            operator: None,
            value_type: ValueType::Static,
            value: String::new(),
            second_value: None,
            logical_operator: LogicalOp::And,
            enabled: true,
            group_id: None,
            is_group_start: false,
        }
    }
}

impl FilterSpec {
    pub fn new(column: impl Into<String>, operator: FilterOp, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            operator: Some(operator),
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn parameter(column: impl Into<String>, operator: FilterOp, param: impl Into<String>) -> Self {
        Self {
            value_type: ValueType::Parameter,
            ..Self::new(column, operator, param)
        }
    }

    pub fn function(column: impl Into<String>, operator: FilterOp, function: impl Into<String>) -> Self {
        Self {
            value_type: ValueType::Function,
            ..Self::new(column, operator, function)
        }
    }

    pub fn second(mut self, value: impl Into<String>) -> Self {
        self.second_value = Some(value.into());
        self
    }

    pub fn or(mut self) -> Self {
        self.logical_operator = LogicalOp::Or;
        self
    }

    pub fn group(mut self, id: impl Into<String>) -> Self {
        self.group_id = Some(id.into());
        self
    }

    pub fn group_start(mut self) -> Self {
        self.is_group_start = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// The editor sends `""` before an operator is picked.
fn opt_operator<'de, D>(deserializer: D) -> Result<Option<FilterOp>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => FilterOp::deserialize(serde::de::value::StrDeserializer::<D::Error>::new(&s))
            .map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_operator_is_none() {
        let f: FilterSpec = serde_json::from_str(r#"{"column": "age", "operator": ""}"#).unwrap();
        assert_eq!(f.operator, None);
        let f: FilterSpec = serde_json::from_str(r#"{"column": "age", "operator": null}"#).unwrap();
        assert_eq!(f.operator, None);
    }

    #[test]
    fn test_operator_names_round_trip_through_serde() {
        for op in FilterOp::ALL {
            let json = format!("\"{}\"", op.name());
            let parsed: FilterOp = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, op);
        }
    }

    #[test]
    fn test_operator_arity() {
        let unary: Vec<_> = FilterOp::ALL.iter().filter(|o| o.is_unary()).collect();
        let range: Vec<_> = FilterOp::ALL.iter().filter(|o| o.is_range()).collect();
        assert_eq!(unary, [&FilterOp::IsNull, &FilterOp::IsNotNull]);
        assert_eq!(range, [&FilterOp::Between, &FilterOp::NotBetween]);
    }
}
