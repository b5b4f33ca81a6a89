//! The query AST.
//!
//! Produced from an [`EndpointConfig`](crate::endpoint::EndpointConfig) by the
//! lowering pass and consumed by the SQL transpiler and the example
//! generators. Identifiers in here have already passed validation.

pub mod expr;
pub mod ident;
pub mod joins;
pub mod predicate;
pub mod query;

pub use self::expr::{Expression, Projection, Structured};
pub use self::ident::{ColumnRef, Ident};
pub use self::joins::{Join, TableRef};
pub use self::predicate::{Chain, Comparison, Link, Operand, Predicate, SqlFunction, Value};
pub use self::query::{Endpoint, Limit, OrderBy, Query};
