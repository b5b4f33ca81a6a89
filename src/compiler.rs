//! The compile entry point.

use crate::endpoint::EndpointConfig;
use crate::error::ValidationError;
use crate::example::{build_response, build_url, DEFAULT_HOST};
use crate::lower::lower;
use crate::transpiler::ToSql;
use serde::Serialize;
use tracing::debug;

/// Knobs that are not part of the endpoint configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Host used in example URLs: `https://api.<host>/api...`.
    pub host: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
        }
    }
}

/// Everything the editor shows for one configuration snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Compiled {
    /// SQL-like preview text. Not meant for execution.
    pub query: String,
    pub example_url: String,
    pub example_response: serde_json::Value,
    pub validation_errors: Vec<ValidationError>,
}

impl Compiled {
    pub fn is_valid(&self) -> bool {
        self.validation_errors.is_empty()
    }
}

/// Compile a configuration with default options.
pub fn compile(config: &EndpointConfig) -> Compiled {
    compile_with(config, &CompileOptions::default())
}

/// Compile a configuration.
///
/// Never fails: problems are returned in `validation_errors` next to the
/// best-effort output. Custom field expressions and custom join conditions
/// are copied into the query unchecked.
pub fn compile_with(config: &EndpointConfig, options: &CompileOptions) -> Compiled {
    let lowered = lower(config);
    let endpoint = &lowered.endpoint;

    let compiled = Compiled {
        query: endpoint.query.to_sql(),
        example_url: build_url(endpoint, &options.host),
        example_response: build_response(endpoint),
        validation_errors: lowered.errors,
    };

    debug!(
        method = %config.method,
        path = %config.path,
        errors = compiled.validation_errors.len(),
        "Compiled endpoint"
    );
    compiled
}
