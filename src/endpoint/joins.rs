use serde::{Deserialize, Serialize};

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
            JoinKind::Full => "FULL",
        }
    }
}

/// A join against the primary table.
///
/// `left_column` belongs to the primary table, `right_column` to `table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JoinSpec {
    pub table: String,
    pub alias: Option<String>,
    #[serde(rename = "joinType")]
    pub kind: JoinKind,
    pub left_column: String,
    pub right_column: String,
    /// Raw SQL appended after the ON equality, e.g. `AND o.deleted_at IS NULL`.
    pub custom_condition: Option<String>,
    #[serde(default = "super::default_true")]
    pub enabled: bool,
}

impl Default for JoinSpec {
    fn default() -> Self {
        Self {
            table: String::new(),
            alias: None,
            kind: JoinKind::Inner,
            left_column: String::new(),
            right_column: String::new(),
            custom_condition: None,
            enabled: true,
        }
    }
}

impl JoinSpec {
    pub fn new(
        kind: JoinKind,
        table: impl Into<String>,
        left_column: impl Into<String>,
        right_column: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            kind,
            left_column: left_column.into(),
            right_column: right_column.into(),
            ..Self::default()
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.custom_condition = Some(condition.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Table, left column and right column are all filled in.
    pub fn is_complete(&self) -> bool {
        !self.table.trim().is_empty()
            && !self.left_column.trim().is_empty()
            && !self.right_column.trim().is_empty()
    }
}
