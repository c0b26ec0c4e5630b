//! Legacy deserialization feature flags
//!
//! These flags predate per-type coercion configuration. They only influence
//! the built-in defaults, i.e. what resolution returns when no configured
//! rule matches.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// On/off switches consulted by built-in coercion defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeserializationFeature {
    /// Treat `""` as null for structured targets (off by default)
    AcceptEmptyStringAsNullObject,
    /// Treat `[]` as null for non-sequence targets (off by default)
    AcceptEmptyArrayAsNullObject,
    /// Allow floats to be converted into integer targets (on by default)
    AcceptFloatAsInt,
    /// Reject integers for enum-like targets (off by default)
    FailOnNumbersForEnums,
    /// Allow scalar targets to be coerced from other shapes (on by default)
    AllowCoercionOfScalars,
}

impl DeserializationFeature {
    /// Every feature, in declaration order
    pub const ALL: [DeserializationFeature; 5] = [
        DeserializationFeature::AcceptEmptyStringAsNullObject,
        DeserializationFeature::AcceptEmptyArrayAsNullObject,
        DeserializationFeature::AcceptFloatAsInt,
        DeserializationFeature::FailOnNumbersForEnums,
        DeserializationFeature::AllowCoercionOfScalars,
    ];

    /// Whether the feature is on when nothing was configured
    pub fn enabled_by_default(self) -> bool {
        matches!(
            self,
            DeserializationFeature::AcceptFloatAsInt
                | DeserializationFeature::AllowCoercionOfScalars
        )
    }

    /// The flag backing this feature
    pub fn flag(self) -> Features {
        match self {
            DeserializationFeature::AcceptEmptyStringAsNullObject => {
                Features::ACCEPT_EMPTY_STRING_AS_NULL_OBJECT
            }
            DeserializationFeature::AcceptEmptyArrayAsNullObject => {
                Features::ACCEPT_EMPTY_ARRAY_AS_NULL_OBJECT
            }
            DeserializationFeature::AcceptFloatAsInt => Features::ACCEPT_FLOAT_AS_INT,
            DeserializationFeature::FailOnNumbersForEnums => {
                Features::FAIL_ON_NUMBERS_FOR_ENUMS
            }
            DeserializationFeature::AllowCoercionOfScalars => {
                Features::ALLOW_COERCION_OF_SCALARS
            }
        }
    }
}

impl fmt::Display for DeserializationFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

bitflags! {
    /// A set of enabled [`DeserializationFeature`]s
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Features: u32 {
        const ACCEPT_EMPTY_STRING_AS_NULL_OBJECT = 0b0000_0001;
        const ACCEPT_EMPTY_ARRAY_AS_NULL_OBJECT = 0b0000_0010;
        const ACCEPT_FLOAT_AS_INT = 0b0000_0100;
        const FAIL_ON_NUMBERS_FOR_ENUMS = 0b0000_1000;
        const ALLOW_COERCION_OF_SCALARS = 0b0001_0000;
    }
}

impl Features {
    /// No feature enabled
    pub fn none() -> Self {
        Self::empty()
    }

    /// Return a copy with `feature` enabled
    pub fn with(self, feature: DeserializationFeature) -> Self {
        self | feature.flag()
    }

    /// Return a copy with `feature` disabled
    pub fn without(self, feature: DeserializationFeature) -> Self {
        self - feature.flag()
    }

    /// Enable `feature` in place
    pub fn enable(&mut self, feature: DeserializationFeature) {
        self.insert(feature.flag());
    }

    /// Disable `feature` in place
    pub fn disable(&mut self, feature: DeserializationFeature) {
        self.remove(feature.flag());
    }

    /// Whether `feature` is enabled
    pub fn is_enabled(self, feature: DeserializationFeature) -> bool {
        self.contains(feature.flag())
    }

    /// The enabled features, in declaration order
    pub fn enabled(self) -> impl Iterator<Item = DeserializationFeature> {
        DeserializationFeature::ALL
            .into_iter()
            .filter(move |f| self.is_enabled(*f))
    }
}

impl Default for Features {
    fn default() -> Self {
        DeserializationFeature::ALL
            .into_iter()
            .filter(|f| f.enabled_by_default())
            .fold(Features::none(), Features::with)
    }
}
