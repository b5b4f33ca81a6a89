//! WHERE clause predicates.

use super::ToSql;
use crate::ast::{Chain, Comparison, Operand, Predicate};

impl ToSql for Comparison {
    /// `column OP operand`. Missing values leave their slot out, so a
    /// half-typed filter previews as `age >=`.
    fn to_sql(&self) -> String {
        let mut parts = vec![self.column.to_string(), self.op.sql_symbol().to_string()];
        match &self.operand {
            Operand::None => {}
            Operand::Single(v) => parts.push(v.to_string()),
            Operand::Range(low, high) => {
                parts.push(low.to_string());
                if let Some(high) = high {
                    parts.push("AND".to_string());
                    parts.push(high.to_string());
                }
            }
            Operand::List(items) if items.is_empty() => {}
            Operand::List(items) => {
                let items: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                parts.push(format!("({})", items.join(", ")));
            }
        }
        parts.retain(|p| !p.is_empty());
        parts.join(" ")
    }
}

impl ToSql for Predicate {
    fn to_sql(&self) -> String {
        match self {
            Predicate::Compare(c) => c.to_sql(),
            Predicate::Group(chain) => format!("({})", chain.to_sql()),
        }
    }
}

impl ToSql for Chain {
    fn to_sql(&self) -> String {
        let mut sql = String::new();
        for (i, link) in self.links.iter().enumerate() {
            if i > 0 {
                sql.push(' ');
                sql.push_str(link.op.sql_keyword());
                sql.push(' ');
            }
            sql.push_str(&link.predicate.to_sql());
        }
        sql
    }
}
