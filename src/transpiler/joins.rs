//! FROM and JOIN clauses.

use super::ToSql;
use crate::ast::{Join, TableRef};

impl ToSql for TableRef {
    fn to_sql(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} AS {}", self.name, alias),
            None => self.name.to_string(),
        }
    }
}

impl ToSql for Join {
    fn to_sql(&self) -> String {
        let mut sql = format!(
            "{} JOIN {} ON {} = {}",
            self.kind.sql_keyword(),
            self.table.to_sql(),
            self.left,
            self.right
        );
        // Unchecked user SQL.
        if let Some(raw) = &self.raw_condition {
            sql.push(' ');
            sql.push_str(raw);
        }
        sql
    }
}
