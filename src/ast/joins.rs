use crate::ast::{ColumnRef, Ident};
use crate::endpoint::JoinKind;
use serde::Serialize;

/// A table with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRef {
    pub name: Ident,
    pub alias: Option<Ident>,
}

impl TableRef {
    /// The name columns of this table are qualified with.
    pub fn reference(&self) -> &Ident {
        self.alias.as_ref().unwrap_or(&self.name)
    }
}

/// A validated join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Join {
    pub kind: JoinKind,
    pub table: TableRef,
    /// Primary table side, already qualified.
    pub left: ColumnRef,
    /// Joined table side, already qualified.
    pub right: ColumnRef,
    /// Unvalidated SQL appended after the equality.
    pub raw_condition: Option<String>,
}
