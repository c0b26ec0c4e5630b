//! Coercion configuration store
//!
//! A [`CoercionConfigBuilder`] collects overrides at three scopes (global,
//! per category, per concrete type) and produces an immutable
//! [`CoercionConfig`] snapshot. Snapshots are never mutated after `build`,
//! so they can be shared across threads without locking.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::fallback::Fallbacks;
use super::{CoercionAction, InputShape, TargetType, TypeCategory};
use serde_json::Value;
use std::collections::HashMap;

/// Where an override applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Every target
    Global,
    /// Every target in a category
    Category(TypeCategory),
    /// One concrete target type
    Type(TargetType),
}

/// Actions registered for one scope, keyed by input shape
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeActions {
    actions: [Option<CoercionAction>; InputShape::COUNT],
    accept_blank_as_empty: Option<bool>,
}

impl ShapeActions {
    /// Register `action` for `shape`, replacing any previous entry
    pub fn set_coercion(&mut self, shape: InputShape, action: CoercionAction) -> &mut Self {
        self.actions[shape.index()] = Some(action);
        self
    }

    /// Control whether whitespace-only text is handled like `""`
    ///
    /// `None` leaves the decision to broader scopes.
    pub fn set_accept_blank_as_empty(&mut self, accept: Option<bool>) -> &mut Self {
        self.accept_blank_as_empty = accept;
        self
    }

    /// Action registered for `shape`, if any
    pub fn find_action(&self, shape: InputShape) -> Option<CoercionAction> {
        self.actions[shape.index()]
    }

    /// Explicit blank-text setting, if any
    pub fn accept_blank_as_empty(&self) -> Option<bool> {
        self.accept_blank_as_empty
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.actions.iter().all(Option::is_none) && self.accept_blank_as_empty.is_none()
    }

    /// Registered (shape, action) pairs in shape order
    pub fn iter(&self) -> impl Iterator<Item = (InputShape, CoercionAction)> + '_ {
        InputShape::ALL
            .into_iter()
            .filter_map(move |shape| self.find_action(shape).map(|action| (shape, action)))
    }
}

/// Immutable snapshot of coercion settings
///
/// Built once by [`CoercionConfigBuilder::build`] and then only read.
#[derive(Debug, Clone, Default)]
pub struct CoercionConfig {
    pub(super) defaults: ShapeActions,
    pub(super) by_category: [Option<ShapeActions>; TypeCategory::COUNT],
    pub(super) by_type: HashMap<TargetType, ShapeActions>,
    pub(super) fallbacks: Fallbacks,
}

impl CoercionConfig {
    /// Start a new builder
    pub fn builder() -> CoercionConfigBuilder {
        CoercionConfigBuilder::new()
    }

    /// Global defaults
    pub fn defaults(&self) -> &ShapeActions {
        &self.defaults
    }

    /// Overrides for `category`, if any were registered
    pub fn for_category(&self, category: TypeCategory) -> Option<&ShapeActions> {
        self.by_category[category.index()].as_ref()
    }

    /// Overrides for `target`, if any were registered
    pub fn for_type(&self, target: &TargetType) -> Option<&ShapeActions> {
        self.by_type.get(target)
    }

    /// Fallbacks used by `TryConvert`
    pub fn fallbacks(&self) -> &Fallbacks {
        &self.fallbacks
    }

    /// Run the `TryConvert` fallback for `shape`
    pub fn fallback(
        &self,
        shape: InputShape,
        value: Value,
        category: TypeCategory,
    ) -> anyhow::Result<Option<Value>> {
        self.fallbacks.convert(shape, value, category)
    }
}

/// Mutable builder for [`CoercionConfig`]
///
/// Registering the same (scope, shape) pair twice keeps the last action.
/// No combination is rejected; whether an action makes sense for a target
/// only surfaces when it is applied.
#[derive(Debug, Clone, Default)]
pub struct CoercionConfigBuilder {
    config: CoercionConfig,
}

impl CoercionConfigBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` for `shape` at `scope`
    pub fn set_coercion(
        &mut self,
        scope: Scope,
        shape: InputShape,
        action: CoercionAction,
    ) -> &mut Self {
        self.scope_mut(scope).set_coercion(shape, action);
        self
    }

    /// Set the blank-text handling for `scope`
    pub fn set_accept_blank_as_empty(&mut self, scope: Scope, accept: Option<bool>) -> &mut Self {
        self.scope_mut(scope).set_accept_blank_as_empty(accept);
        self
    }

    /// Register a `TryConvert` fallback for `shape`
    pub fn set_fallback<F>(&mut self, shape: InputShape, fallback: F) -> &mut Self
    where
        F: Fn(Value, TypeCategory) -> anyhow::Result<Option<Value>> + Send + Sync + 'static,
    {
        self.config.fallbacks.set(shape, fallback);
        self
    }

    /// Mutable access to the actions for `scope`, created on first use
    pub fn scope_mut(&mut self, scope: Scope) -> &mut ShapeActions {
        match scope {
            Scope::Global => &mut self.config.defaults,
            Scope::Category(category) => {
                self.config.by_category[category.index()].get_or_insert_with(ShapeActions::default)
            }
            Scope::Type(target) => self.config.by_type.entry(target).or_default(),
        }
    }

    /// Produce an immutable snapshot of the current settings
    ///
    /// The builder stays usable; later changes do not affect snapshots
    /// already built.
    pub fn build(&self) -> CoercionConfig {
        self.config.clone()
    }
}
