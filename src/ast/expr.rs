use crate::ast::{ColumnRef, Ident};
use crate::endpoint::Aggregation;
use serde::Serialize;

/// A projection expression.
///
/// `Raw` text comes straight from the user and is never validated. Every
/// renderer has to match on it explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expression {
    Raw(String),
    Structured(Structured),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Structured {
    Column(ColumnRef),
    /// `column` is `None` only for `COUNT(*)`.
    Aggregate {
        func: Aggregation,
        column: Option<ColumnRef>,
    },
}

impl Expression {
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Expression::Structured(Structured::Aggregate { .. }))
    }
}

/// One entry of the SELECT list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub expr: Expression,
    pub alias: Option<Ident>,
}

impl Projection {
    /// Key this projection appears under in a JSON row.
    pub fn output_name(&self) -> String {
        if let Some(alias) = &self.alias {
            return alias.to_string();
        }
        match &self.expr {
            Expression::Raw(text) => text.clone(),
            Expression::Structured(Structured::Column(col)) => col.name().to_string(),
            Expression::Structured(Structured::Aggregate { func, column }) => match column {
                Some(col) => col.name().to_string(),
                None => func.name().to_string(),
            },
        }
    }
}
