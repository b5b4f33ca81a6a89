use crate::ast::{Chain, ColumnRef, Join, Projection, TableRef};
use crate::endpoint::{Method, Pagination, QueryParam, SortOrder};
use serde::Serialize;

/// A lowered, validated query. Every renderer reads from this.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Query {
    pub distinct: bool,
    /// Empty means `*`.
    pub projection: Vec<Projection>,
    pub from: Option<TableRef>,
    pub joins: Vec<Join>,
    pub filter: Chain,
    pub group_by: Vec<ColumnRef>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<Limit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    pub column: ColumnRef,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Limit {
    pub count: u32,
    /// Emit the symbolic `OFFSET {{offset}}`; the page is unknown at preview time.
    pub paged: bool,
}

/// Everything the compiler knows about an endpoint after lowering: the query
/// plus the request surface the example generator needs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    pub query: Query,
    /// Enabled parameters with valid names, in declaration order.
    pub params: Vec<QueryParam>,
    pub pagination: Pagination,
    pub allow_custom_sorting: bool,
    pub allow_field_selection: bool,
}
