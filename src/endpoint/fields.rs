use serde::{Deserialize, Serialize};

/// Aggregation applied to a selected column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    #[default]
    None,
    Count,
    Sum,
    Avg,
    Min,
    Max,
    GroupConcat,
    CountDistinct,
}

impl Aggregation {
    pub fn is_none(&self) -> bool {
        matches!(self, Aggregation::None)
    }

    /// Lower-case name, as used in the configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Aggregation::None => "none",
            Aggregation::Count => "count",
            Aggregation::Sum => "sum",
            Aggregation::Avg => "avg",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
            Aggregation::GroupConcat => "group_concat",
            Aggregation::CountDistinct => "count_distinct",
        }
    }
}

/// One entry of the field selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldSpec {
    pub column: String,
    /// Raw SQL that replaces `column` and `aggregation` when non-empty.
    pub expression: Option<String>,
    pub alias: Option<String>,
    pub aggregation: Aggregation,
    #[serde(default = "super::default_true")]
    pub enabled: bool,
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self {
            column: String::new(),
            expression: None,
            alias: None,
            aggregation: Aggregation::None,
            enabled: true,
        }
    }
}

impl FieldSpec {
    pub fn column(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ..Self::default()
        }
    }

    pub fn expression(expression: impl Into<String>) -> Self {
        Self {
            expression: Some(expression.into()),
            ..Self::default()
        }
    }

    pub fn aggregate(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
