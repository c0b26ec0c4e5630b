//! Declarative coercion rules
//!
//! Rules documents let deployments adjust coercion without code changes.
//! They cover global defaults, category overrides, and feature flags;
//! concrete-type overrides need a Rust type and stay programmatic.
//!
//! ```json
//! {
//!   "enable": ["AcceptEmptyArrayAsNullObject"],
//!   "defaults": { "actions": { "EmptyString": "AsNull" } },
//!   "categories": {
//!     "StructuredObject": {
//!       "actions": { "EmptyString": "Fail" },
//!       "accept_blank_as_empty": false
//!     }
//!   }
//! }
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::coercion::{CoercionAction, CoercionConfigBuilder, InputShape, Scope, TypeCategory};
use crate::error::{Error, Result};
use crate::features::{DeserializationFeature, Features};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Settings for one scope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScopeRules {
    /// Action per input shape
    #[serde(default)]
    pub actions: BTreeMap<InputShape, CoercionAction>,
    /// Whether whitespace-only text counts as empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_blank_as_empty: Option<bool>,
}

/// A declarative coercion configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoercionRules {
    /// Features to switch on
    #[serde(default)]
    pub enable: Vec<DeserializationFeature>,
    /// Features to switch off; wins over `enable`
    #[serde(default)]
    pub disable: Vec<DeserializationFeature>,
    /// Global defaults
    #[serde(default)]
    pub defaults: ScopeRules,
    /// Category overrides
    #[serde(default)]
    pub categories: BTreeMap<TypeCategory, ScopeRules>,
}

impl CoercionRules {
    /// Parse rules from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Configuration {
            message: format!("invalid coercion rules: {}", e),
            source: Some(e.into()),
        })
    }

    /// Load rules from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::Configuration {
            message: format!("cannot read coercion rules from {}: {}", path.display(), e),
            source: Some(e.into()),
        })?;
        Self::from_json(&text)
    }

    /// Register these rules on `builder` and `features`
    ///
    /// Later registrations replace earlier ones for the same (scope, shape),
    /// so rules applied after programmatic settings win.
    pub fn apply_to(&self, builder: &mut CoercionConfigBuilder, features: &mut Features) {
        for feature in &self.enable {
            features.enable(*feature);
        }
        for feature in &self.disable {
            features.disable(*feature);
        }

        apply_scope(builder, Scope::Global, &self.defaults);
        for (category, rules) in &self.categories {
            apply_scope(builder, Scope::Category(*category), rules);
        }
    }
}

fn apply_scope(builder: &mut CoercionConfigBuilder, scope: Scope, rules: &ScopeRules) {
    let actions = builder.scope_mut(scope);
    for (shape, action) in &rules.actions {
        actions.set_coercion(*shape, *action);
    }
    if rules.accept_blank_as_empty.is_some() {
        actions.set_accept_blank_as_empty(rules.accept_blank_as_empty);
    }
}
