//! Example request URL.

use crate::ast::{Comparison, Endpoint, Operand, Value};
use crate::endpoint::FilterOp;

/// Host used when no settings override it.
pub const DEFAULT_HOST: &str = "example.com";

/// Build `https://api.<host>/api<path>?<query>`.
///
/// The `?` is left out when there are no parameters.
pub fn build_url(endpoint: &Endpoint, host: &str) -> String {
    let mut url = format!("https://api.{}/api{}", host, normalize_path(&endpoint.path));
    let pairs = query_pairs(endpoint);
    if !pairs.is_empty() {
        let query: Vec<String> = pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, encode_value(value)))
            .collect();
        url.push('?');
        url.push_str(&query.join("&"));
    }
    url
}

/// Ordered query-string pairs, unencoded.
///
/// Keys are built from validated identifiers and need no escaping.
pub fn query_pairs(endpoint: &Endpoint) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for param in &endpoint.params {
        pairs.push((param.name.clone(), param.example_value()));
    }

    if endpoint.pagination.enabled {
        pairs.push(("page".to_string(), "1".to_string()));
    }
    // The page size the query actually uses: `defaultLimit` after the
    // `maxLimit` and `hardLimit` caps, so `limit=` matches the LIMIT clause.
    if endpoint.pagination.allow_custom_limit {
        pairs.push(("limit".to_string(), super::page_size(endpoint).to_string()));
    }
    if endpoint.allow_custom_sorting {
        pairs.push(("sort".to_string(), "id".to_string()));
        pairs.push(("order".to_string(), "asc".to_string()));
    }
    if endpoint.allow_field_selection {
        let names: Vec<String> = endpoint
            .query
            .projection
            .iter()
            .take(2)
            .map(|p| p.output_name())
            .collect();
        if !names.is_empty() {
            pairs.push(("fields".to_string(), names.join(",")));
        }
    }

    // Parameter filters are already represented by their declared params.
    if let Some(term) = endpoint
        .query
        .filter
        .comparisons()
        .into_iter()
        .find(|c| !c.uses_param())
        .map(filter_term)
    {
        pairs.push(term);
    }

    pairs
}

/// `status=active` for equality, `age[gte]=18` for everything else.
fn filter_term(cmp: &Comparison) -> (String, String) {
    let key = match cmp.op {
        FilterOp::Eq => cmp.column.to_string(),
        op => format!("{}[{}]", cmp.column, op.name()),
    };
    let value = match &cmp.operand {
        Operand::None => "true".to_string(),
        Operand::Single(v) => url_value(v),
        Operand::Range(low, high) => {
            let mut parts = vec![url_value(low)];
            parts.extend(high.iter().map(url_value));
            parts.join(",")
        }
        Operand::List(items) => items.iter().map(url_value).collect::<Vec<_>>().join(","),
    };
    (key, value)
}

/// Literals lose their SQL quotes in a URL.
fn url_value(value: &Value) -> String {
    match value {
        Value::Literal(s) => unquote(s).to_string(),
        other => other.to_string(),
    }
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .unwrap_or(s)
}

/// Percent-encode a value, keeping commas between list items readable.
fn encode_value(value: &str) -> String {
    value
        .split(',')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

fn normalize_path(path: &str) -> String {
    let path = path.trim();
    if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::*;
    use crate::lower::lower;
    use pretty_assertions::assert_eq;

    fn url(config: &EndpointConfig) -> String {
        build_url(&lower(config).endpoint, DEFAULT_HOST)
    }

    #[test]
    fn test_bare_url() {
        let cfg = EndpointConfig::new("users").path("/users");
        assert_eq!(url(&cfg), "https://api.example.com/api/users");
    }

    #[test]
    fn test_path_gets_leading_slash() {
        let cfg = EndpointConfig::new("users").path("users");
        assert_eq!(url(&cfg), "https://api.example.com/api/users");
    }

    #[test]
    fn test_full_parameter_order() {
        let cfg = EndpointConfig {
            allow_custom_sorting: true,
            allow_field_selection: true,
            pagination: Pagination {
                enabled: true,
                default_limit: 25,
                allow_custom_limit: true,
                ..Pagination::default()
            },
            ..EndpointConfig::new("users")
                .path("/users")
                .param(QueryParam::new("q", ParamType::String))
                .param(QueryParam::new("min_age", ParamType::Number))
                .param(QueryParam::new("hidden", ParamType::Boolean).disabled())
                .param(QueryParam::new("since", ParamType::Date))
                .param(QueryParam::new("role", ParamType::Enum).values(["admin", "member"]))
                .field(FieldSpec::column("id"))
                .field(FieldSpec::column("profile.name"))
                .field(FieldSpec::column("email"))
                .filter(FilterSpec::parameter("age", FilterOp::Gte, "min_age"))
                .filter(FilterSpec::new("status", FilterOp::Eq, "active"))
                .filter(FilterSpec::new("country", FilterOp::Eq, "NL"))
        };
        assert_eq!(
            url(&cfg),
            "https://api.example.com/api/users?q=example&min_age=123&since=2024-01-01&role=admin\
             &page=1&limit=25&sort=id&order=asc&fields=id,name&status=active"
        );
    }

    #[test]
    fn test_operator_filter_term() {
        let cfg = EndpointConfig::new("users").filter(FilterSpec::new("age", FilterOp::Gte, "18"));
        assert_eq!(url(&cfg), "https://api.example.com/api?age[gte]=18");
    }

    #[test]
    fn test_filter_values_are_encoded() {
        let cfg = EndpointConfig::new("users")
            .filter(FilterSpec::new("name", FilterOp::Like, "'%jo hn%'"));
        assert_eq!(url(&cfg), "https://api.example.com/api?name[like]=%25jo%20hn%25");
    }

    #[test]
    fn test_function_filter_term() {
        let cfg = EndpointConfig::new("events").filter(FilterSpec::function("starts_at", FilterOp::Gt, "now"));
        assert_eq!(url(&cfg), "https://api.example.com/api?starts_at[gt]=NOW%28%29");
    }

    #[test]
    fn test_list_and_range_terms() {
        let cfg = EndpointConfig::new("t").filter(FilterSpec::new("s", FilterOp::In, "'a', 'b'"));
        assert_eq!(url(&cfg), "https://api.example.com/api?s[in]=a,b");

        let cfg = EndpointConfig::new("t").filter(FilterSpec::new("n", FilterOp::Between, "1").second("9"));
        assert_eq!(url(&cfg), "https://api.example.com/api?n[between]=1,9");

        let cfg = EndpointConfig::new("t").filter(FilterSpec::new("d", FilterOp::IsNull, ""));
        assert_eq!(url(&cfg), "https://api.example.com/api?d[is_null]=true");
    }

    #[test]
    fn test_only_parameter_filters_means_no_filter_term() {
        let cfg = EndpointConfig::new("users")
            .param(QueryParam::new("min_age", ParamType::Number))
            .filter(FilterSpec::parameter("age", FilterOp::Gte, "min_age"));
        assert_eq!(url(&cfg), "https://api.example.com/api?min_age=123");
    }

    #[test]
    fn test_disabled_filter_is_not_the_example() {
        let cfg = EndpointConfig::new("users")
            .filter(FilterSpec::new("a", FilterOp::Eq, "1").disabled())
            .filter(FilterSpec::new("b", FilterOp::Eq, "2"));
        assert_eq!(url(&cfg), "https://api.example.com/api?b=2");
    }

    #[test]
    fn test_limit_shows_capped_page_size() {
        let cfg = EndpointConfig::new("users").paginate(Pagination {
            enabled: true,
            default_limit: 80,
            max_limit: 60,
            allow_custom_limit: true,
            ..Pagination::default()
        });
        assert_eq!(url(&cfg), "https://api.example.com/api?page=1&limit=60");
    }

    #[test]
    fn test_half_typed_filter_keeps_its_term() {
        let cfg = EndpointConfig::new("users").filter(FilterSpec::new("age", FilterOp::Gte, ""));
        assert_eq!(url(&cfg), "https://api.example.com/api?age[gte]=");
    }
}
