//! WHERE clause tree.
//!
//! Filters lower into a [`Chain`]: a left-to-right sequence of predicates,
//! each joined to the previous one by its own combinator. A nested chain is a
//! filter group and renders in parentheses.

use crate::ast::ColumnRef;
use crate::endpoint::{FilterOp, LogicalOp};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Predicate {
    Compare(Comparison),
    Group(Chain),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Chain {
    pub links: Vec<Link>,
}

/// A predicate and the combinator that joins it to the previous link.
/// The combinator of the first link in a chain is not rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub op: LogicalOp,
    pub predicate: Predicate,
}

impl Chain {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn push(&mut self, op: LogicalOp, predicate: Predicate) {
        self.links.push(Link { op, predicate });
    }

    /// Leaf comparisons in declaration order, descending into groups.
    pub fn comparisons(&self) -> Vec<&Comparison> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a Comparison>) {
        for link in &self.links {
            match &link.predicate {
                Predicate::Compare(c) => out.push(c),
                Predicate::Group(chain) => chain.collect(out),
            }
        }
    }
}

/// `column OP operand`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub column: ColumnRef,
    pub op: FilterOp,
    pub operand: Operand,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Operand {
    /// IS NULL / IS NOT NULL.
    None,
    Single(Value),
    /// BETWEEN; the upper bound is missing while the user is still typing.
    Range(Value, Option<Value>),
    /// IN / NOT IN.
    List(Vec<Value>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Value {
    /// Static text, emitted verbatim.
    Literal(String),
    /// Declared query parameter, emitted as `{{name}}`.
    Param(String),
    Function(SqlFunction),
    /// Required but not filled in yet. Renders as nothing.
    Missing,
}

impl Value {
    pub fn is_param(&self) -> bool {
        matches!(self, Value::Param(_))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Literal(s) => f.write_str(s),
            Value::Param(name) => write!(f, "{{{{{}}}}}", name),
            Value::Function(func) => f.write_str(func.sql()),
            Value::Missing => Ok(()),
        }
    }
}

/// Functions a filter value may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SqlFunction {
    Now,
    Today,
    CurrentUser,
}

impl SqlFunction {
    pub const ALL: [SqlFunction; 3] = [SqlFunction::Now, SqlFunction::Today, SqlFunction::CurrentUser];

    pub fn sql(&self) -> &'static str {
        match self {
            SqlFunction::Now => "NOW()",
            SqlFunction::Today => "TODAY()",
            SqlFunction::CurrentUser => "CURRENT_USER()",
        }
    }
}

impl Comparison {
    /// True when any value of this comparison comes from a query parameter.
    pub fn uses_param(&self) -> bool {
        match &self.operand {
            Operand::None => false,
            Operand::Single(v) => v.is_param(),
            Operand::Range(lo, hi) => lo.is_param() || hi.as_ref().is_some_and(Value::is_param),
            Operand::List(items) => items.iter().any(Value::is_param),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_displays_as_placeholder() {
        assert_eq!(Value::Param("min_age".into()).to_string(), "{{min_age}}");
        assert_eq!(Value::Function(SqlFunction::CurrentUser).to_string(), "CURRENT_USER()");
    }

    #[test]
    fn test_comparisons_flatten_groups() {
        let leaf = |name: &str| {
            Predicate::Compare(Comparison {
                column: ColumnRef::parse("c", name).unwrap(),
                op: FilterOp::IsNull,
                operand: Operand::None,
            })
        };
        let mut inner = Chain::default();
        inner.push(LogicalOp::And, leaf("b"));
        inner.push(LogicalOp::Or, leaf("c"));
        let mut outer = Chain::default();
        outer.push(LogicalOp::And, leaf("a"));
        outer.push(LogicalOp::And, Predicate::Group(inner));

        let names: Vec<_> = outer.comparisons().iter().map(|c| c.column.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
