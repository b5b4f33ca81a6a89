//! SELECT assembly.
//!
//! Clause order is fixed: SELECT/FROM, JOIN, WHERE, GROUP BY, ORDER BY,
//! LIMIT. `SELECT ... FROM ...` shares the first line; every later clause
//! starts a new line. Empty clauses are left out.

use super::ToSql;
use super::fields::build_projection;
use super::modifiers::{build_group_by, build_order_by};
use crate::ast::Query;

pub fn build_select(query: &Query) -> String {
    let mut head = if query.distinct {
        String::from("SELECT DISTINCT ")
    } else {
        String::from("SELECT ")
    };
    head.push_str(&build_projection(&query.projection));

    if let Some(from) = &query.from {
        head.push_str(" FROM ");
        head.push_str(&from.to_sql());
    }

    let mut lines = vec![head];

    for join in &query.joins {
        lines.push(join.to_sql());
    }

    if !query.filter.is_empty() {
        lines.push(format!("WHERE {}", query.filter.to_sql()));
    }

    lines.extend(build_group_by(&query.group_by));
    lines.extend(build_order_by(&query.order_by));

    if let Some(limit) = &query.limit {
        lines.push(limit.to_sql());
    }

    lines.join("\n")
}
