//! Projection expressions.

use super::ToSql;
use crate::ast::{Expression, Projection, Structured};
use crate::endpoint::Aggregation;

impl ToSql for Expression {
    fn to_sql(&self) -> String {
        match self {
            // Unchecked user SQL. Emitted as typed.
            Expression::Raw(text) => text.clone(),
            Expression::Structured(s) => s.to_sql(),
        }
    }
}

impl ToSql for Structured {
    fn to_sql(&self) -> String {
        match self {
            Structured::Column(col) => col.to_string(),
            Structured::Aggregate { func, column } => {
                let col = column.as_ref().map(|c| c.as_str()).unwrap_or("*");
                match func {
                    Aggregation::None => col.to_string(),
                    Aggregation::CountDistinct => format!("COUNT(DISTINCT {})", col),
                    other => format!("{}({})", other.name().to_uppercase(), col),
                }
            }
        }
    }
}

impl ToSql for Projection {
    fn to_sql(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} AS {}", self.expr.to_sql(), alias),
            None => self.expr.to_sql(),
        }
    }
}

/// The SELECT list; `*` when nothing is selected.
pub fn build_projection(projection: &[Projection]) -> String {
    if projection.is_empty() {
        return "*".to_string();
    }
    projection
        .iter()
        .map(ToSql::to_sql)
        .collect::<Vec<_>>()
        .join(", ")
}
