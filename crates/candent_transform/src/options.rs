use serde_json::Value;
use swc_core::common::DUMMY_SP;

use crate::error::{TransformError, TransformErrorKind};

/// Configuration of the lowering pass, read once at program entry.
#[derive(Debug, Clone, Default)]
pub struct JsxOptions {
    /// Dotted path overriding the element constructor, e.g. `h` or
    /// `Preact.createElement`
    pub pragma: Option<String>,
    /// Dotted path overriding the fragment marker
    pub pragma_frag: Option<String>,
    /// When set, attribute merging calls `Object.assign` instead of
    /// referencing the `_extends` helper
    pub use_builtins: bool,
    /// Selects the legacy calling convention (components invoked directly,
    /// built-in tags routed through `React.DOM`)
    pub compat: bool,
}

impl JsxOptions {
    /// Reads options from the untyped JSON value a host passes along.
    /// `null` means "all defaults".
    pub fn from_json(raw: &Value) -> Result<JsxOptions, TransformError> {
        let map = match raw {
            Value::Null => return Ok(JsxOptions::default()),
            Value::Object(map) => map,
            _ => {
                return Err(TransformError {
                    span: DUMMY_SP,
                    kind: TransformErrorKind::OptionsNotAnObject,
                })
            }
        };

        Ok(JsxOptions {
            pragma: read_string(map.get("pragma"))?,
            pragma_frag: read_string(map.get("pragmaFrag"))?,
            use_builtins: read_bool(
                map.get("useBuiltIns"),
                TransformErrorKind::UseBuiltInsNotBoolean,
            )?,
            compat: read_bool(map.get("compat"), TransformErrorKind::CompatNotABoolean)?,
        })
    }
}

fn read_string(value: Option<&Value>) -> Result<Option<String>, TransformError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(TransformError {
            span: DUMMY_SP,
            kind: TransformErrorKind::PragmaNotAString,
        }),
    }
}

fn read_bool(value: Option<&Value>, kind: TransformErrorKind) -> Result<bool, TransformError> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(TransformError {
            span: DUMMY_SP,
            kind,
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn it_defaults_on_null() {
        let options = JsxOptions::from_json(&Value::Null).unwrap();
        assert_eq!(options.pragma, None);
        assert_eq!(options.pragma_frag, None);
        assert!(!options.use_builtins);
        assert!(!options.compat);
    }

    #[test]
    fn it_reads_all_fields() {
        let options = JsxOptions::from_json(&json!({
            "pragma": "h",
            "pragmaFrag": "Fragment",
            "useBuiltIns": true,
            "compat": false,
        }))
        .unwrap();

        assert_eq!(options.pragma.as_deref(), Some("h"));
        assert_eq!(options.pragma_frag.as_deref(), Some("Fragment"));
        assert!(options.use_builtins);
        assert!(!options.compat);
    }

    #[test]
    fn it_rejects_non_boolean_use_builtins() {
        let error = JsxOptions::from_json(&json!({ "useBuiltIns": "true" })).unwrap_err();
        assert_eq!(error.kind, TransformErrorKind::UseBuiltInsNotBoolean);

        let error = JsxOptions::from_json(&json!({ "useBuiltIns": 1 })).unwrap_err();
        assert_eq!(error.kind, TransformErrorKind::UseBuiltInsNotBoolean);
    }

    #[test]
    fn it_rejects_non_string_pragma() {
        let error = JsxOptions::from_json(&json!({ "pragma": ["React"] })).unwrap_err();
        assert_eq!(error.kind, TransformErrorKind::PragmaNotAString);
    }

    #[test]
    fn it_rejects_non_object_options() {
        let error = JsxOptions::from_json(&json!("useBuiltIns")).unwrap_err();
        assert_eq!(error.kind, TransformErrorKind::OptionsNotAnObject);
    }
}
