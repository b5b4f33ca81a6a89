use serde::{Deserialize, Serialize};

/// Declared type of a query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    #[default]
    String,
    Number,
    Boolean,
    Date,
    Enum,
}

/// A query parameter the endpoint accepts, referenced by parameter-valued filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryParam {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    #[serde(deserialize_with = "super::loose_opt_string")]
    pub default: Option<String>,
    pub enum_values: Vec<String>,
    pub required: bool,
    pub description: Option<String>,
    #[serde(default = "super::default_true")]
    pub enabled: bool,
}

impl Default for QueryParam {
    fn default() -> Self {
        Self {
            name: String::new(),
            param_type: ParamType::String,
            default: None,
            enum_values: Vec::new(),
            required: false,
            description: None,
            enabled: true,
        }
    }
}

impl QueryParam {
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            ..Self::default()
        }
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Placeholder value shown in example URLs.
    pub fn example_value(&self) -> String {
        match self.param_type {
            ParamType::Number => "123".to_string(),
            ParamType::Boolean => "true".to_string(),
            ParamType::Date => "2024-01-01".to_string(),
            ParamType::Enum => self
                .enum_values
                .first()
                .cloned()
                .or_else(|| self.default.clone())
                .unwrap_or_else(|| "example".to_string()),
            ParamType::String => self
                .default
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "example".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_values() {
        assert_eq!(QueryParam::new("n", ParamType::Number).example_value(), "123");
        assert_eq!(QueryParam::new("b", ParamType::Boolean).example_value(), "true");
        assert_eq!(QueryParam::new("d", ParamType::Date).example_value(), "2024-01-01");
        assert_eq!(
            QueryParam::new("e", ParamType::Enum)
                .values(["active", "banned"])
                .example_value(),
            "active"
        );
        assert_eq!(QueryParam::new("s", ParamType::String).example_value(), "example");
        assert_eq!(
            QueryParam::new("s", ParamType::String)
                .default_value("bob")
                .example_value(),
            "bob"
        );
    }
}
