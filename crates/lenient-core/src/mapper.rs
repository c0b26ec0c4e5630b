//! Mapper and reader: JSON deserialization driven by coercion settings
//!
//! The mapper decodes input with `serde_json`, classifies the root token,
//! and only consults coercion when the token's shape is not native for the
//! target's category. Native tokens go straight to `serde`.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::coercion::{
    apply, CoercionAction, CoercionConfig, CoercionConfigBuilder, CoercionTarget, Coerced,
    InputShape, Scope, ShapeActions, TargetType, TypeCategory,
};
use crate::error::{Error, Result};
use crate::features::{DeserializationFeature, Features};
use crate::location::Location;
use crate::rules::CoercionRules;
use serde_json::Value;
use std::sync::Arc;

/// Builder for [`Mapper`]
///
/// ```
/// use lenient_core::{CoercionAction, InputShape, Mapper};
///
/// let mapper = Mapper::builder()
///     .with_coercion_config_defaults(|h| {
///         h.set_coercion(InputShape::EmptyString, CoercionAction::AsNull);
///     })
///     .build();
///
/// let value: Option<Vec<String>> = mapper.read_value("\"\"").unwrap();
/// assert_eq!(value, None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapperBuilder {
    coercions: CoercionConfigBuilder,
    features: Features,
}

impl MapperBuilder {
    /// Create a builder with default features and no overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure global coercion defaults
    pub fn with_coercion_config_defaults(mut self, f: impl FnOnce(&mut ShapeActions)) -> Self {
        f(self.coercions.scope_mut(Scope::Global));
        self
    }

    /// Configure coercion for every target in `category`
    pub fn with_coercion_config(
        mut self,
        category: TypeCategory,
        f: impl FnOnce(&mut ShapeActions),
    ) -> Self {
        f(self.coercions.scope_mut(Scope::Category(category)));
        self
    }

    /// Configure coercion for the concrete type `T`
    pub fn with_coercion_config_for<T: CoercionTarget>(
        mut self,
        f: impl FnOnce(&mut ShapeActions),
    ) -> Self {
        f(self.coercions.scope_mut(Scope::Type(TargetType::of::<T>())));
        self
    }

    /// Register one action at `scope`
    pub fn with_coercion(
        mut self,
        scope: Scope,
        shape: InputShape,
        action: CoercionAction,
    ) -> Self {
        self.coercions.set_coercion(scope, shape, action);
        self
    }

    /// Register a `TryConvert` fallback for `shape`
    pub fn with_fallback<F>(mut self, shape: InputShape, fallback: F) -> Self
    where
        F: Fn(Value, TypeCategory) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
    {
        self.coercions.set_fallback(shape, fallback);
        self
    }

    /// Apply declarative rules on top of the current settings
    pub fn with_rules(mut self, rules: &CoercionRules) -> Self {
        rules.apply_to(&mut self.coercions, &mut self.features);
        self
    }

    /// Enable a feature
    pub fn enable(mut self, feature: DeserializationFeature) -> Self {
        self.features.enable(feature);
        self
    }

    /// Disable a feature
    pub fn disable(mut self, feature: DeserializationFeature) -> Self {
        self.features.disable(feature);
        self
    }

    /// Build the mapper; the coercion settings are frozen from here on
    pub fn build(self) -> Mapper {
        Mapper {
            config: Arc::new(self.coercions.build()),
            features: self.features,
        }
    }
}

/// Deserializes JSON using a frozen coercion configuration
///
/// Cloning is cheap and clones share the same configuration, so a mapper
/// can be handed to any number of threads.
#[derive(Debug, Clone)]
pub struct Mapper {
    config: Arc<CoercionConfig>,
    features: Features,
}

impl Default for Mapper {
    fn default() -> Self {
        MapperBuilder::new().build()
    }
}

impl Mapper {
    /// Mapper with default features and no coercion overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new builder
    pub fn builder() -> MapperBuilder {
        MapperBuilder::new()
    }

    /// The frozen coercion configuration
    pub fn coercion_config(&self) -> &CoercionConfig {
        &self.config
    }

    /// Mapper-level features
    pub fn features(&self) -> Features {
        self.features
    }

    /// Whether `feature` is enabled at mapper level
    pub fn is_enabled(&self, feature: DeserializationFeature) -> bool {
        self.features.is_enabled(feature)
    }

    /// Reader sharing this mapper's configuration and features
    pub fn reader(&self) -> Reader {
        Reader {
            config: Arc::clone(&self.config),
            features: self.features,
        }
    }

    /// Deserialize `input` into `T`; `None` means a null result
    pub fn read_value<T: CoercionTarget>(&self, input: &str) -> Result<Option<T>> {
        read_value(&self.config, self.features, input)
    }

    /// Deserialize an already decoded token found at `location`
    pub fn from_value<T: CoercionTarget>(
        &self,
        value: Value,
        location: Location,
    ) -> Result<Option<T>> {
        coerce_value(&self.config, self.features, value, location)
    }
}

/// A mapper view with its own feature set
///
/// Readers share the mapper's coercion configuration; only the features
/// differ, which lets callers toggle legacy behavior per call site.
#[derive(Debug, Clone)]
pub struct Reader {
    config: Arc<CoercionConfig>,
    features: Features,
}

impl Reader {
    /// Copy of this reader with `feature` enabled
    pub fn with(mut self, feature: DeserializationFeature) -> Self {
        self.features.enable(feature);
        self
    }

    /// Copy of this reader with `feature` disabled
    pub fn without(mut self, feature: DeserializationFeature) -> Self {
        self.features.disable(feature);
        self
    }

    /// Features used by this reader
    pub fn features(&self) -> Features {
        self.features
    }

    /// Whether `feature` is enabled for this reader
    pub fn is_enabled(&self, feature: DeserializationFeature) -> bool {
        self.features.is_enabled(feature)
    }

    /// Deserialize `input` into `T`; `None` means a null result
    pub fn read_value<T: CoercionTarget>(&self, input: &str) -> Result<Option<T>> {
        read_value(&self.config, self.features, input)
    }

    /// Deserialize an already decoded token found at `location`
    pub fn from_value<T: CoercionTarget>(
        &self,
        value: Value,
        location: Location,
    ) -> Result<Option<T>> {
        coerce_value(&self.config, self.features, value, location)
    }
}

fn read_value<T: CoercionTarget>(
    config: &CoercionConfig,
    features: Features,
    input: &str,
) -> Result<Option<T>> {
    let value: Value = serde_json::from_str(input).map_err(|e| Error::json(input, e))?;
    coerce_value(config, features, value, Location::of_root(input))
}

fn coerce_value<T: CoercionTarget>(
    config: &CoercionConfig,
    features: Features,
    value: Value,
    location: Location,
) -> Result<Option<T>> {
    let target = TargetType::of::<T>();
    let category = target.category();

    let Some(mut shape) = InputShape::classify(&value) else {
        return Ok(None);
    };

    let resolver = config.resolver(features);
    let action = if is_blank(&value) && !category.accepts(InputShape::EmptyString) {
        shape = InputShape::EmptyString;
        resolver.resolve_blank(&target, CoercionAction::Fail)
    } else if category.accepts(shape) {
        return convert(value, &target, location).map(Some);
    } else {
        resolver.resolve(&target, shape)
    };

    log::debug!(
        "coercing {} into {} at {} with {}",
        shape,
        target,
        location,
        action
    );

    match apply::<T>(action, shape, location)? {
        Coerced::Null => Ok(None),
        Coerced::Value(value) => Ok(Some(value)),
        Coerced::Convert => {
            let converted = config
                .fallback(shape, value, category)
                .map_err(|source| Error::Fallback {
                    type_name: target.name(),
                    shape,
                    location,
                    source,
                })?;
            match converted {
                Some(value) => convert(value, &target, location).map(Some),
                None => Ok(None),
            }
        }
    }
}

fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(s) if !s.is_empty() && s.trim().is_empty())
}

fn convert<T: CoercionTarget>(value: Value, target: &TargetType, location: Location) -> Result<T> {
    serde_json::from_value(value).map_err(|source| Error::Conversion {
        type_name: target.name(),
        message: source.to_string(),
        location,
        source,
    })
}
