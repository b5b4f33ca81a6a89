//! GROUP BY, ORDER BY and LIMIT.

use super::ToSql;
use crate::ast::{ColumnRef, Limit, OrderBy};

impl ToSql for OrderBy {
    fn to_sql(&self) -> String {
        format!("{} {}", self.column, self.order.sql_keyword())
    }
}

impl ToSql for Limit {
    fn to_sql(&self) -> String {
        if self.paged {
            format!("LIMIT {} OFFSET {{{{offset}}}}", self.count)
        } else {
            format!("LIMIT {}", self.count)
        }
    }
}

pub fn build_group_by(columns: &[ColumnRef]) -> Option<String> {
    if columns.is_empty() {
        return None;
    }
    let cols: Vec<&str> = columns.iter().map(ColumnRef::as_str).collect();
    Some(format!("GROUP BY {}", cols.join(", ")))
}

pub fn build_order_by(order_by: &[OrderBy]) -> Option<String> {
    if order_by.is_empty() {
        return None;
    }
    let parts: Vec<String> = order_by.iter().map(ToSql::to_sql).collect();
    Some(format!("ORDER BY {}", parts.join(", ")))
}
