//! Transpiler tests, split by area.


use crate::endpoint::EndpointConfig;
use crate::lower::lower;
use crate::transpiler::ToSql;

fn sql(config: &EndpointConfig) -> String {
    lower(config).endpoint.query.to_sql()
}
