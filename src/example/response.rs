//! Example JSON response.

use crate::ast::Endpoint;
use crate::endpoint::Method;
use serde_json::{json, Map, Value};

/// Row count the example pretends the table holds.
pub const SAMPLE_TOTAL: u32 = 100;

const SAMPLE_AGGREGATE: u32 = 42;
const SAMPLE_STRING: &str = "sample_value";

/// Build `{status, data, meta}`; `meta` only when pagination is enabled.
pub fn build_response(endpoint: &Endpoint) -> Value {
    let status = match endpoint.method {
        Method::Post => 201,
        _ => 200,
    };

    let data = match endpoint.method {
        Method::Get => Value::Array(vec![Value::Object(sample_row(endpoint))]),
        Method::Post | Method::Put | Method::Patch => Value::Object(sample_row(endpoint)),
        Method::Delete => json!({ "deleted": true }),
    };

    let mut response = Map::new();
    response.insert("status".to_string(), json!(status));
    response.insert("data".to_string(), data);
    if endpoint.pagination.enabled {
        response.insert("meta".to_string(), Value::Object(meta(endpoint)));
    }
    Value::Object(response)
}

fn sample_row(endpoint: &Endpoint) -> Map<String, Value> {
    let mut row = Map::new();
    let query = &endpoint.query;

    if query.projection.is_empty() {
        if query.from.is_some() {
            row.insert("id".to_string(), json!(1));
            row.insert("name".to_string(), json!(SAMPLE_STRING));
            row.insert("created_at".to_string(), json!("2024-01-01T00:00:00Z"));
        }
        return row;
    }

    for p in &query.projection {
        let value = if p.expr.is_aggregate() {
            json!(SAMPLE_AGGREGATE)
        } else {
            json!(SAMPLE_STRING)
        };
        row.insert(p.output_name(), value);
    }
    row
}

fn meta(endpoint: &Endpoint) -> Map<String, Value> {
    let limit = super::page_size(endpoint);
    let include_total = endpoint.pagination.include_total;
    let mut meta = Map::new();
    if include_total {
        meta.insert("total".to_string(), json!(SAMPLE_TOTAL));
    }
    meta.insert("page".to_string(), json!(1));
    meta.insert("limit".to_string(), json!(limit));
    if include_total {
        meta.insert("pages".to_string(), json!(SAMPLE_TOTAL.div_ceil(limit.max(1))));
    }
    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::*;
    use crate::lower::lower;
    use pretty_assertions::assert_eq;

    fn response(config: &EndpointConfig) -> Value {
        build_response(&lower(config).endpoint)
    }

    #[test]
    fn test_get_with_fields() {
        let cfg = EndpointConfig::new("thryl_users")
            .field(FieldSpec::column("u.email"))
            .field(FieldSpec::column("orders.total").aggregate(Aggregation::Sum).alias("revenue"))
            .field(FieldSpec::column("").aggregate(Aggregation::Count));
        assert_eq!(
            response(&cfg),
            json!({
                "status": 200,
                "data": [{"email": "sample_value", "revenue": 42, "count": 42}]
            })
        );
    }

    #[test]
    fn test_default_keys_when_nothing_selected() {
        let row = &response(&EndpointConfig::new("users"))["data"][0];
        let keys: Vec<&String> = row.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["id", "name", "created_at"]);
    }

    #[test]
    fn test_no_table_no_keys() {
        assert_eq!(response(&EndpointConfig::default())["data"], json!([{}]));
    }

    #[test]
    fn test_post_is_created_single_object() {
        let cfg = EndpointConfig::new("users")
            .method(Method::Post)
            .field(FieldSpec::column("id"));
        assert_eq!(response(&cfg), json!({"status": 201, "data": {"id": "sample_value"}}));
    }

    #[test]
    fn test_delete() {
        let cfg = EndpointConfig::new("users").method(Method::Delete);
        assert_eq!(response(&cfg), json!({"status": 200, "data": {"deleted": true}}));
    }

    #[test]
    fn test_meta_with_and_without_total() {
        let mut cfg = EndpointConfig::new("users").paginate(Pagination {
            enabled: true,
            default_limit: 30,
            ..Pagination::default()
        });
        assert_eq!(response(&cfg)["meta"], json!({"page": 1, "limit": 30}));

        cfg.pagination.include_total = true;
        let meta = response(&cfg)["meta"].clone();
        assert_eq!(meta, json!({"total": 100, "page": 1, "limit": 30, "pages": 4}));
        let keys: Vec<&String> = meta.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["total", "page", "limit", "pages"]);
    }

    #[test]
    fn test_zero_limit_does_not_divide_by_zero() {
        let cfg = EndpointConfig::new("users").paginate(Pagination {
            enabled: true,
            default_limit: 0,
            include_total: true,
            ..Pagination::default()
        });
        assert_eq!(response(&cfg)["meta"]["pages"], json!(100));
    }
}
