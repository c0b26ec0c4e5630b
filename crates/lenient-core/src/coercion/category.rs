//! Target type categories
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::InputShape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad classification of a target type by deserialization strategy
///
/// Every concrete target belongs to exactly one category. Category-level
/// coercion overrides apply to all targets in the category that have no
/// type-level override of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeCategory {
    /// Fixed-size sequences
    Array,
    /// Growable sequences and sets
    Collection,
    /// Key/value maps
    Map,
    /// Records with named fields
    StructuredObject,
    /// Dynamically typed values
    Untyped,
    /// Integral numbers
    Integer,
    /// Floating-point numbers
    Float,
    /// Booleans
    Boolean,
    /// Enumerations selected by name
    EnumLike,
    /// Text
    Textual,
    /// Byte buffers
    Binary,
    /// Dates, times, and durations
    DateTime,
    /// Scalars parsed from text that fit no other category
    OtherScalar,
}

impl TypeCategory {
    /// Number of categories
    pub const COUNT: usize = 13;

    /// Every category, in declaration order
    pub const ALL: [TypeCategory; Self::COUNT] = [
        TypeCategory::Array,
        TypeCategory::Collection,
        TypeCategory::Map,
        TypeCategory::StructuredObject,
        TypeCategory::Untyped,
        TypeCategory::Integer,
        TypeCategory::Float,
        TypeCategory::Boolean,
        TypeCategory::EnumLike,
        TypeCategory::Textual,
        TypeCategory::Binary,
        TypeCategory::DateTime,
        TypeCategory::OtherScalar,
    ];

    /// Classic scalars: numbers, booleans, and date/time values
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            TypeCategory::Integer
                | TypeCategory::Float
                | TypeCategory::Boolean
                | TypeCategory::DateTime
        )
    }

    /// Whether `shape` is a native form for this category
    ///
    /// Native shapes are deserialized directly; anything else is a shape
    /// mismatch and goes through coercion resolution.
    pub fn accepts(self, shape: InputShape) -> bool {
        use InputShape as S;
        use TypeCategory as C;

        match (self, shape) {
            (C::Untyped, _) => true,
            (C::Array | C::Collection, S::Array | S::EmptyArray) => true,
            (C::Map | C::StructuredObject, S::Object | S::EmptyObject) => true,
            (C::Integer, S::Integer) => true,
            (C::Float, S::Integer | S::Float) => true,
            (C::Boolean, S::Boolean) => true,
            (C::Textual, S::String | S::EmptyString) => true,
            (C::EnumLike | C::DateTime | C::OtherScalar, S::String) => true,
            (C::Binary, S::Binary | S::String) => true,
            _ => false,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeCategory::Array => "Array",
            TypeCategory::Collection => "Collection",
            TypeCategory::Map => "Map",
            TypeCategory::StructuredObject => "StructuredObject",
            TypeCategory::Untyped => "Untyped",
            TypeCategory::Integer => "Integer",
            TypeCategory::Float => "Float",
            TypeCategory::Boolean => "Boolean",
            TypeCategory::EnumLike => "EnumLike",
            TypeCategory::Textual => "Textual",
            TypeCategory::Binary => "Binary",
            TypeCategory::DateTime => "DateTime",
            TypeCategory::OtherScalar => "OtherScalar",
        };
        f.write_str(name)
    }
}
