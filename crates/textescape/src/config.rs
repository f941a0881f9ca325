//! Declarative engine configuration.
//!
//! An [`EscapeConfig`] carries everything a [`TextEscape`] is configured with
//! besides its fragments, so the delimiter, default and bindings can live in
//! a JSON or YAML document:
//!
//! ```yaml
//! delimiter: ", "
//! default: "n/a"
//! bindings:
//!   name: World
//!   count: 3
//! ```
//!
//! Binding values may be any scalar; they are stringified before binding.
//!
//! # Example
//!
//! ```rust
//! use textescape::{EscapeConfig, TextEscape};
//!
//! let config = EscapeConfig::from_yaml("delimiter: ' '\nbindings:\n  n: 3\n")?;
//! let mut engine = TextEscape::new(["${n}", "items"]).with_config(config)?;
//!
//! assert_eq!(engine.compile()?, "3 items");
//! # Ok::<(), textescape::EscapeError>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::escape::TextEscape;

/// Delimiter, default and bindings for a [`TextEscape`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EscapeConfig {
    /// Delimiter between fragments. Left unchanged when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,

    /// Fallback for unbound names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Bindings, applied in key order.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub bindings: BTreeMap<String, Value>,
}

impl EscapeConfig {
    /// Parses a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Applies this configuration to `engine`.
    ///
    /// The delimiter is set first, then the default, then each binding in
    /// key order. Values go through the same validation as
    /// [`TextEscape::bind`] and [`TextEscape::default_value`].
    pub fn apply(self, mut engine: TextEscape) -> Result<TextEscape> {
        if let Some(delimiter) = self.delimiter {
            engine.set_delimiter(delimiter);
        }
        if let Some(default) = self.default {
            engine.set_default(default)?;
        }
        engine.bind_all_mut(
            self.bindings
                .iter()
                .map(|(key, value)| (key.as_str(), format_value(value))),
        )?;
        Ok(engine)
    }
}

/// Formats a JSON value as binding text.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        // Nested structures bind as their JSON text
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EscapeError;
    use serde_json::json;

    #[test]
    fn parses_yaml() {
        let config = EscapeConfig::from_yaml(
            "delimiter: ','\ndefault: x\nbindings:\n  a: b\n  n: 2\n  flag: true\n  none: ~\n",
        )
        .unwrap();

        assert_eq!(config.delimiter.as_deref(), Some(","));
        assert_eq!(config.default.as_deref(), Some("x"));
        assert_eq!(config.bindings["a"], json!("b"));
        assert_eq!(config.bindings["n"], json!(2));
        assert_eq!(config.bindings["flag"], json!(true));
        assert_eq!(config.bindings["none"], Value::Null);
    }

    #[test]
    fn parses_json() {
        let config = EscapeConfig::from_json(r#"{"bindings": {"a": "b"}}"#).unwrap();
        assert_eq!(config.delimiter, None);
        assert_eq!(config.bindings.len(), 1);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(EscapeConfig::from_json("{}").unwrap(), EscapeConfig::default());
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = EscapeConfig::from_json(r#"{"delim": ","}"#).unwrap_err();
        assert!(matches!(err, EscapeError::Config(_)));
    }

    #[test]
    fn formats_scalars() {
        assert_eq!(format_value(&json!("s")), "s");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!(1.5)), "1.5");
        assert_eq!(format_value(&json!(false)), "false");
        assert_eq!(format_value(&Value::Null), "");
        assert_eq!(format_value(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn apply_sets_everything() {
        let config = EscapeConfig::from_yaml("delimiter: '|'\ndefault: '?'\nbindings:\n  a: 1\n")
            .unwrap();
        let mut engine = config.apply(TextEscape::new(["${a}", "${b}"])).unwrap();

        assert_eq!(engine.get_delimiter(), "|");
        assert_eq!(engine.compile().unwrap(), "1|?");
    }

    #[test]
    fn apply_validates_values() {
        let config = EscapeConfig::from_json(r#"{"bindings": {"a": "${b}"}}"#).unwrap();
        let err = config.apply(TextEscape::new(["${a}"])).unwrap_err();
        assert_eq!(err, EscapeError::UnescapedValue("${b}".into()));
    }

    #[test]
    fn apply_validates_default() {
        let config = EscapeConfig {
            default: Some("${b}".into()),
            ..Default::default()
        };
        let err = config.apply(TextEscape::new(["${a}"])).unwrap_err();
        assert_eq!(err, EscapeError::UnescapedDefault("${b}".into()));
    }

    #[test]
    fn serializes_back_to_yaml() {
        let config = EscapeConfig {
            delimiter: Some(",".into()),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(EscapeConfig::from_yaml(&yaml).unwrap(), config);
    }
}
