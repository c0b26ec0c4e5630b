//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random
//! coercion settings and scopes.

#![cfg(test)]

use crate::coercion::{CoercionAction, InputShape, TypeCategory};
use crate::features::{DeserializationFeature, Features};
use proptest::prelude::*;
use proptest::sample::select;

/// Strategy for generating input shapes
pub fn shape_strategy() -> impl Strategy<Value = InputShape> {
    select(InputShape::ALL.to_vec())
}

/// Strategy for generating type categories
pub fn category_strategy() -> impl Strategy<Value = TypeCategory> {
    select(TypeCategory::ALL.to_vec())
}

/// Strategy for generating coercion actions
pub fn action_strategy() -> impl Strategy<Value = CoercionAction> {
    prop_oneof![
        Just(CoercionAction::Fail),
        Just(CoercionAction::AsNull),
        Just(CoercionAction::AsEmpty),
        Just(CoercionAction::TryConvert),
    ]
}

/// Strategy for generating feature sets
pub fn features_strategy() -> impl Strategy<Value = Features> {
    proptest::collection::vec(any::<bool>(), DeserializationFeature::ALL.len()).prop_map(|bits| {
        DeserializationFeature::ALL
            .into_iter()
            .zip(bits)
            .fold(Features::none(), |features, (feature, on)| {
                if on {
                    features.with(feature)
                } else {
                    features
                }
            })
    })
}

/// Which tier a generated registration targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Category,
    Type,
}

/// Strategy for a sequence of `set_coercion` calls
///
/// Type-level registrations always target the probe type used by the
/// property tests; category-level ones target a random category.
pub fn registrations_strategy(
) -> impl Strategy<Value = Vec<(ScopeKind, TypeCategory, InputShape, CoercionAction)>> {
    proptest::collection::vec(
        (
            prop_oneof![
                Just(ScopeKind::Global),
                Just(ScopeKind::Category),
                Just(ScopeKind::Type),
            ],
            category_strategy(),
            shape_strategy(),
            action_strategy(),
        ),
        0..12,
    )
}
