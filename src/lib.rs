//! # restql
//!
//! Compiles a visual REST endpoint configuration into the three previews the
//! editor shows side by side:
//!
//! - a SQL-like query,
//! - an example request URL,
//! - an example JSON response.
//!
//! All three are rendered from one lowered AST, so they cannot disagree about
//! which fields, joins and filters are in effect.
//!
//! ## Quick Example
//!
//! ```
//! use restql::prelude::*;
//!
//! let config = EndpointConfig::new("thryl_users")
//!     .alias("u")
//!     .join(JoinSpec::new(JoinKind::Left, "thryl_orders", "id", "user_id").alias("o"))
//!     .filter(FilterSpec::new("u.age", FilterOp::Gte, "18"));
//!
//! let out = restql::compile(&config);
//! assert_eq!(
//!     out.query,
//!     "SELECT * FROM thryl_users AS u\n\
//!      LEFT JOIN thryl_orders AS o ON u.id = o.user_id\n\
//!      WHERE u.age >= 18"
//! );
//! assert!(out.validation_errors.is_empty());
//! ```
//!
//! ## Trust boundary
//!
//! Table, column, alias and parameter names must match
//! `^[A-Za-z_][A-Za-z0-9_]*$` (columns may be dotted). Anything else is left
//! out of the output and reported in `validation_errors`.
//!
//! Custom field expressions and custom join conditions are the exception:
//! they are copied into the query exactly as typed. Callers that execute the
//! generated text must treat those parts as untrusted.

pub mod ast;
pub mod compiler;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod example;
pub mod lower;
pub mod parser;
pub mod session;
pub mod transpiler;
pub mod validator;

pub use compiler::{compile, compile_with, CompileOptions, Compiled};
pub use validator::is_safe_identifier;

pub mod prelude {
    pub use crate::compiler::{compile, compile_with, CompileOptions, Compiled};
    pub use crate::endpoint::*;
    pub use crate::error::*;
    pub use crate::session::EditSession;
    pub use crate::transpiler::ToSql;
}
