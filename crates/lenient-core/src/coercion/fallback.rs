//! Fallback conversions behind `TryConvert`
//!
//! `TryConvert` does not fix an outcome; it defers to a per-shape fallback
//! that rewrites the token before ordinary deserialization. The built-in
//! fallbacks reproduce the lenient conversions that existed before coercion
//! could be configured.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::{InputShape, TypeCategory};
use anyhow::{anyhow, Context};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Rewrites a token for the target category
///
/// Returning `Ok(None)` yields an absent value; `Ok(Some(token))` hands the
/// token to ordinary deserialization; an error is reported as a fallback
/// failure.
pub type Fallback =
    Arc<dyn Fn(Value, TypeCategory) -> anyhow::Result<Option<Value>> + Send + Sync>;

/// Per-shape table of fallbacks
#[derive(Clone, Default)]
pub struct Fallbacks {
    custom: [Option<Fallback>; InputShape::COUNT],
}

impl Fallbacks {
    /// Register `fallback` for `shape`, replacing any previous one
    pub fn set<F>(&mut self, shape: InputShape, fallback: F)
    where
        F: Fn(Value, TypeCategory) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
    {
        self.custom[shape.index()] = Some(Arc::new(fallback));
    }

    /// Remove the registration for `shape`, restoring the built-in fallback
    pub fn clear(&mut self, shape: InputShape) {
        self.custom[shape.index()] = None;
    }

    /// Whether a custom fallback is registered for `shape`
    pub fn is_custom(&self, shape: InputShape) -> bool {
        self.custom[shape.index()].is_some()
    }

    /// Run the fallback for `shape` on `value`
    pub fn convert(
        &self,
        shape: InputShape,
        value: Value,
        category: TypeCategory,
    ) -> anyhow::Result<Option<Value>> {
        match &self.custom[shape.index()] {
            Some(fallback) => fallback(value, category),
            None => builtin(shape, value, category),
        }
    }
}

impl fmt::Debug for Fallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let custom: Vec<InputShape> = InputShape::ALL
            .into_iter()
            .filter(|s| self.is_custom(*s))
            .collect();
        f.debug_struct("Fallbacks").field("custom", &custom).finish()
    }
}

/// Built-in conversion for `shape`
pub fn builtin(
    shape: InputShape,
    value: Value,
    category: TypeCategory,
) -> anyhow::Result<Option<Value>> {
    use TypeCategory as C;

    match (value, category) {
        // Empty and blank text means "no value"
        (Value::String(s), _) if shape == InputShape::EmptyString && s.trim().is_empty() => {
            Ok(None)
        }
        (Value::Number(n), C::Integer) if shape == InputShape::Float => {
            let f = n
                .as_f64()
                .ok_or_else(|| anyhow!("number {} is not representable", n))?;
            truncate(f).map(Some)
        }
        (Value::String(s), C::Integer | C::Float | C::Boolean) => {
            parse_text(s.trim(), category).map(Some)
        }
        (Value::Number(n), C::Textual) => Ok(Some(Value::String(n.to_string()))),
        (Value::Bool(b), C::Textual) => Ok(Some(Value::String(b.to_string()))),
        (Value::Number(n), C::Boolean) if shape == InputShape::Integer => {
            Ok(Some(Value::Bool(n.as_f64() != Some(0.0))))
        }
        (value, _) => Ok(Some(value)),
    }
}

fn truncate(f: f64) -> anyhow::Result<Value> {
    if !f.is_finite() {
        return Err(anyhow!("{} cannot be converted to an integer", f));
    }
    let t = f.trunc();
    if t >= 0.0 && t < u64::MAX as f64 {
        Ok(Value::from(t as u64))
    } else if t >= i64::MIN as f64 && t < 0.0 {
        Ok(Value::from(t as i64))
    } else {
        Err(anyhow!("{} is out of range for an integer", f))
    }
}

fn parse_text(text: &str, category: TypeCategory) -> anyhow::Result<Value> {
    match category {
        TypeCategory::Integer => {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::from(n));
            }
            let n = text
                .parse::<u64>()
                .with_context(|| format!("'{}' is not a valid integer", text))?;
            Ok(Value::from(n))
        }
        TypeCategory::Float => {
            let f = text
                .parse::<f64>()
                .with_context(|| format!("'{}' is not a valid number", text))?;
            serde_json::Number::from_f64(f)
                .map(Value::Number)
                .ok_or_else(|| anyhow!("'{}' is not a finite number", text))
        }
        TypeCategory::Boolean => match text {
            "true" | "True" | "TRUE" => Ok(Value::Bool(true)),
            "false" | "False" | "FALSE" => Ok(Value::Bool(false)),
            _ => Err(anyhow!("'{}' is not a valid boolean", text)),
        },
        _ => Ok(Value::String(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_string_becomes_null() {
        let out = builtin(InputShape::EmptyString, json!(""), TypeCategory::StructuredObject)
            .unwrap();
        assert_eq!(out, None);
    }

    #[test]
    fn test_blank_string_becomes_null() {
        let out = builtin(InputShape::EmptyString, json!("  \t"), TypeCategory::Map).unwrap();
        assert_eq!(out, None);
    }

    #[test]
    fn test_float_truncates_into_integer() {
        let out = builtin(InputShape::Float, json!(3.9), TypeCategory::Integer).unwrap();
        assert_eq!(out, Some(json!(3)));
        let out = builtin(InputShape::Float, json!(-2.5), TypeCategory::Integer).unwrap();
        assert_eq!(out, Some(json!(-2)));
    }

    #[test]
    fn test_text_parses_into_scalars() {
        assert_eq!(
            builtin(InputShape::String, json!(" 42 "), TypeCategory::Integer).unwrap(),
            Some(json!(42))
        );
        assert_eq!(
            builtin(InputShape::String, json!("1.5"), TypeCategory::Float).unwrap(),
            Some(json!(1.5))
        );
        assert_eq!(
            builtin(InputShape::String, json!("true"), TypeCategory::Boolean).unwrap(),
            Some(json!(true))
        );
    }

    #[test]
    fn test_unparseable_text_is_an_error() {
        let err = builtin(InputShape::String, json!("forty"), TypeCategory::Integer).unwrap_err();
        assert!(err.to_string().contains("not a valid integer"));
    }

    #[test]
    fn test_scalars_into_text() {
        assert_eq!(
            builtin(InputShape::Integer, json!(7), TypeCategory::Textual).unwrap(),
            Some(json!("7"))
        );
        assert_eq!(
            builtin(InputShape::Boolean, json!(false), TypeCategory::Textual).unwrap(),
            Some(json!("false"))
        );
    }

    #[test]
    fn test_integer_into_boolean() {
        assert_eq!(
            builtin(InputShape::Integer, json!(0), TypeCategory::Boolean).unwrap(),
            Some(json!(false))
        );
        assert_eq!(
            builtin(InputShape::Integer, json!(5), TypeCategory::Boolean).unwrap(),
            Some(json!(true))
        );
    }

    #[test]
    fn test_other_tokens_pass_through() {
        let out = builtin(InputShape::Array, json!([1, 2]), TypeCategory::StructuredObject)
            .unwrap();
        assert_eq!(out, Some(json!([1, 2])));
    }

    #[test]
    fn test_custom_fallback_replaces_builtin() {
        let mut fallbacks = Fallbacks::default();
        fallbacks.set(InputShape::EmptyString, |_, _| Ok(Some(json!({"a": "filled"}))));
        assert!(fallbacks.is_custom(InputShape::EmptyString));
        let out = fallbacks
            .convert(InputShape::EmptyString, json!(""), TypeCategory::StructuredObject)
            .unwrap();
        assert_eq!(out, Some(json!({"a": "filled"})));

        fallbacks.clear(InputShape::EmptyString);
        let out = fallbacks
            .convert(InputShape::EmptyString, json!(""), TypeCategory::StructuredObject)
            .unwrap();
        assert_eq!(out, None);
    }
}
