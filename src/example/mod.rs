//! Example request and response generation.
//!
//! Both renderers read the same lowered [`Endpoint`](crate::ast::Endpoint) as
//! the SQL transpiler, so a field or filter that was dropped from the query is
//! also missing here.

pub mod response;
pub mod url;

pub use self::response::build_response;
pub use self::url::{build_url, query_pairs, DEFAULT_HOST};

use crate::ast::Endpoint;

/// The page size every example uses: the paged LIMIT if there is one,
/// otherwise the configured default.
pub(crate) fn page_size(endpoint: &Endpoint) -> u32 {
    match endpoint.query.limit {
        Some(limit) if limit.paged => limit.count,
        _ => endpoint.pagination.default_limit,
    }
}
