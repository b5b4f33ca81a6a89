//! SQL transpiler for the query AST.
//!
//! Renders a lowered [`Query`](crate::ast::Query) into SQL-like preview text.
//! The output is meant for display, not execution.

pub mod conditions;
pub mod fields;
pub mod joins;
pub mod modifiers;
pub mod select;

#[cfg(test)]
mod tests;

use crate::ast::Query;

/// Trait for converting AST nodes to SQL.
pub trait ToSql {
    /// Convert this node to a SQL string.
    fn to_sql(&self) -> String;
}

impl ToSql for Query {
    fn to_sql(&self) -> String {
        select::build_select(self)
    }
}
