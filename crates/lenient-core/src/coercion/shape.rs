//! Input shape taxonomy
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Syntactic form of an input token, as seen by coercion
///
/// Shapes describe what the decoder produced, independent of the type being
/// built. The `Empty*` variants are split out from their non-empty
/// counterparts because empty containers and empty text are the usual
/// candidates for lenient handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InputShape {
    /// Non-empty array
    Array,
    /// Non-empty object
    Object,
    /// Integral number
    Integer,
    /// Number with a fractional part or exponent
    Float,
    /// `true` or `false`
    Boolean,
    /// Non-empty string
    String,
    /// Opaque binary payload (for formats that carry one natively)
    Binary,
    /// `[]`
    EmptyArray,
    /// `{}`
    EmptyObject,
    /// `""`
    EmptyString,
}

impl InputShape {
    /// Number of shapes
    pub const COUNT: usize = 10;

    /// Every shape, in declaration order
    pub const ALL: [InputShape; Self::COUNT] = [
        InputShape::Array,
        InputShape::Object,
        InputShape::Integer,
        InputShape::Float,
        InputShape::Boolean,
        InputShape::String,
        InputShape::Binary,
        InputShape::EmptyArray,
        InputShape::EmptyObject,
        InputShape::EmptyString,
    ];

    /// Classify a decoded JSON token
    ///
    /// Returns `None` for `null`, which is never subject to coercion.
    pub fn classify(value: &Value) -> Option<Self> {
        let shape = match value {
            Value::Null => return None,
            Value::Bool(_) => InputShape::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => InputShape::Integer,
            Value::Number(_) => InputShape::Float,
            Value::String(s) if s.is_empty() => InputShape::EmptyString,
            Value::String(_) => InputShape::String,
            Value::Array(items) if items.is_empty() => InputShape::EmptyArray,
            Value::Array(_) => InputShape::Array,
            Value::Object(fields) if fields.is_empty() => InputShape::EmptyObject,
            Value::Object(_) => InputShape::Object,
        };
        Some(shape)
    }

    /// Human readable description used in failure messages
    pub fn description(self) -> &'static str {
        match self {
            InputShape::Array => "Array value",
            InputShape::Object => "Object value",
            InputShape::Integer => "Integer value",
            InputShape::Float => "Floating-point value",
            InputShape::Boolean => "Boolean value",
            InputShape::String => "String value",
            InputShape::Binary => "Binary value",
            InputShape::EmptyArray => "empty Array",
            InputShape::EmptyObject => "empty Object",
            InputShape::EmptyString => "empty String",
        }
    }

    /// Whether this shape is one of the empty forms
    pub fn is_empty_form(self) -> bool {
        matches!(
            self,
            InputShape::EmptyArray | InputShape::EmptyObject | InputShape::EmptyString
        )
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for InputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputShape::Array => "Array",
            InputShape::Object => "Object",
            InputShape::Integer => "Integer",
            InputShape::Float => "Float",
            InputShape::Boolean => "Boolean",
            InputShape::String => "String",
            InputShape::Binary => "Binary",
            InputShape::EmptyArray => "EmptyArray",
            InputShape::EmptyObject => "EmptyObject",
            InputShape::EmptyString => "EmptyString",
        };
        f.write_str(name)
    }
}
