//! Coercion resolution
//!
//! Resolution walks the configured tiers from most to least specific and
//! stops at the first hit:
//!
//! 1. the concrete target type,
//! 2. the target's category,
//! 3. the global defaults,
//! 4. the built-in default for the shape, shaped by the legacy
//!    [`DeserializationFeature`] flags.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::{CoercionAction, CoercionConfig, InputShape, TargetType, TypeCategory};
use crate::features::{DeserializationFeature, Features};
use std::fmt;

/// Tier that produced a resolved action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Override for the concrete type
    Type,
    /// Override for the type's category
    Category,
    /// Global default
    Global,
    /// Built-in default
    BuiltIn,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Type => write!(f, "type override"),
            Tier::Category => write!(f, "category override"),
            Tier::Global => write!(f, "global default"),
            Tier::BuiltIn => write!(f, "built-in default"),
        }
    }
}

/// A resolved action together with the tier it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Action to apply
    pub action: CoercionAction,
    /// Tier that answered
    pub tier: Tier,
}

/// Read-only view pairing a config snapshot with a feature set
///
/// Resolvers are cheap to create and never fail.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    config: &'a CoercionConfig,
    features: Features,
}

impl CoercionConfig {
    /// Resolver over this snapshot using `features` for built-in defaults
    pub fn resolver(&self, features: Features) -> Resolver<'_> {
        Resolver {
            config: self,
            features,
        }
    }
}

impl<'a> Resolver<'a> {
    /// Features consulted by built-in defaults
    pub fn features(&self) -> Features {
        self.features
    }

    /// Action for `shape` into `target`
    pub fn resolve(&self, target: &TargetType, shape: InputShape) -> CoercionAction {
        self.resolution(target, shape).action
    }

    /// Action for `shape` into `target`, with the tier that produced it
    pub fn resolution(&self, target: &TargetType, shape: InputShape) -> Resolution {
        let resolution = match self.configured(target, shape) {
            Some(resolution) => resolution,
            None => Resolution {
                action: builtin_default(self.features, target.category(), shape),
                tier: Tier::BuiltIn,
            },
        };
        log::trace!(
            "{} from {} resolved to {} by {}",
            target,
            shape,
            resolution.action,
            resolution.tier
        );
        resolution
    }

    /// First configured action for `shape`, skipping built-in defaults
    pub fn configured(&self, target: &TargetType, shape: InputShape) -> Option<Resolution> {
        let by_type = self
            .config
            .for_type(target)
            .and_then(|actions| actions.find_action(shape))
            .map(|action| Resolution {
                action,
                tier: Tier::Type,
            });
        if by_type.is_some() {
            return by_type;
        }

        let by_category = self
            .config
            .for_category(target.category())
            .and_then(|actions| actions.find_action(shape))
            .map(|action| Resolution {
                action,
                tier: Tier::Category,
            });
        if by_category.is_some() {
            return by_category;
        }

        self.config
            .defaults()
            .find_action(shape)
            .map(|action| Resolution {
                action,
                tier: Tier::Global,
            })
    }

    /// Action for whitespace-only text into `target`
    ///
    /// The blank-text flag and the `EmptyString` action are each taken from
    /// the most specific tier that sets them. An explicit `false` flag
    /// returns `if_not_allowed`; otherwise a configured `EmptyString` action
    /// applies, then the legacy null-object behavior, then `if_not_allowed`.
    pub fn resolve_blank(
        &self,
        target: &TargetType,
        if_not_allowed: CoercionAction,
    ) -> CoercionAction {
        let scopes = [
            self.config.for_type(target),
            self.config.for_category(target.category()),
            Some(self.config.defaults()),
        ];

        let accept_blank = scopes
            .iter()
            .flatten()
            .find_map(|actions| actions.accept_blank_as_empty());
        let action = scopes
            .iter()
            .flatten()
            .find_map(|actions| actions.find_action(InputShape::EmptyString));

        let resolved = if accept_blank == Some(false) {
            if_not_allowed
        } else if let Some(action) = action {
            action
        } else if target.category().is_scalar()
            || self
                .features
                .is_enabled(DeserializationFeature::AcceptEmptyStringAsNullObject)
        {
            CoercionAction::AsNull
        } else {
            if_not_allowed
        };
        log::trace!("{} from blank String resolved to {}", target, resolved);
        resolved
    }
}

/// Built-in action for `shape` into a target of `category`
///
/// Used when no tier has an entry for the shape.
pub fn builtin_default(
    features: Features,
    category: TypeCategory,
    shape: InputShape,
) -> CoercionAction {
    use DeserializationFeature as F;

    match shape {
        InputShape::EmptyArray => {
            return if features.is_enabled(F::AcceptEmptyArrayAsNullObject) {
                CoercionAction::AsNull
            } else {
                CoercionAction::Fail
            };
        }
        InputShape::Float if category == TypeCategory::Integer => {
            return if features.is_enabled(F::AcceptFloatAsInt) {
                CoercionAction::TryConvert
            } else {
                CoercionAction::Fail
            };
        }
        InputShape::Integer
            if category == TypeCategory::EnumLike
                && features.is_enabled(F::FailOnNumbersForEnums) =>
        {
            return CoercionAction::Fail;
        }
        _ => {}
    }

    let scalar = category.is_scalar();
    if scalar && !features.is_enabled(F::AllowCoercionOfScalars) {
        return CoercionAction::Fail;
    }

    if shape == InputShape::EmptyString {
        if scalar || features.is_enabled(F::AcceptEmptyStringAsNullObject) {
            return CoercionAction::AsNull;
        }
        if category == TypeCategory::OtherScalar {
            return CoercionAction::TryConvert;
        }
        return CoercionAction::Fail;
    }

    CoercionAction::TryConvert
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coercion::{CoercionConfigBuilder, CoercionTarget, Scope};

    #[derive(Debug, serde::Deserialize)]
    struct Bean {
        #[allow(dead_code)]
        a: Option<String>,
    }

    impl CoercionTarget for Bean {
        const CATEGORY: TypeCategory = TypeCategory::StructuredObject;
    }

    #[derive(Debug, serde::Deserialize)]
    struct OtherBean {}

    impl CoercionTarget for OtherBean {
        const CATEGORY: TypeCategory = TypeCategory::StructuredObject;
    }

    fn bean() -> TargetType {
        TargetType::of::<Bean>()
    }

    #[test]
    fn test_unconfigured_empty_string_into_object_fails() {
        let config = CoercionConfig::default();
        let resolution = config
            .resolver(Features::default())
            .resolution(&bean(), InputShape::EmptyString);
        assert_eq!(resolution.action, CoercionAction::Fail);
        assert_eq!(resolution.tier, Tier::BuiltIn);
    }

    #[test]
    fn test_global_default_applies() {
        let mut builder = CoercionConfigBuilder::new();
        builder.set_coercion(Scope::Global, InputShape::EmptyString, CoercionAction::AsNull);
        let config = builder.build();
        let resolution = config
            .resolver(Features::default())
            .resolution(&bean(), InputShape::EmptyString);
        assert_eq!(resolution.action, CoercionAction::AsNull);
        assert_eq!(resolution.tier, Tier::Global);
    }

    #[test]
    fn test_category_beats_global() {
        let mut builder = CoercionConfigBuilder::new();
        builder
            .set_coercion(Scope::Global, InputShape::EmptyString, CoercionAction::AsNull)
            .set_coercion(
                Scope::Category(TypeCategory::StructuredObject),
                InputShape::EmptyString,
                CoercionAction::Fail,
            );
        let config = builder.build();
        let resolver = config.resolver(Features::default());

        assert_eq!(
            resolver.resolution(&bean(), InputShape::EmptyString),
            Resolution {
                action: CoercionAction::Fail,
                tier: Tier::Category,
            }
        );
        // Targets outside the category still see the global default
        assert_eq!(
            resolver.resolve(&TargetType::of::<Vec<String>>(), InputShape::EmptyString),
            CoercionAction::AsNull
        );
    }

    #[test]
    fn test_type_beats_category_and_global() {
        let mut builder = CoercionConfigBuilder::new();
        builder
            .set_coercion(Scope::Global, InputShape::EmptyString, CoercionAction::AsNull)
            .set_coercion(
                Scope::Category(TypeCategory::StructuredObject),
                InputShape::EmptyString,
                CoercionAction::AsEmpty,
            )
            .set_coercion(Scope::Type(bean()), InputShape::EmptyString, CoercionAction::Fail);
        let config = builder.build();
        let resolver = config.resolver(Features::default());

        assert_eq!(
            resolver.resolution(&bean(), InputShape::EmptyString),
            Resolution {
                action: CoercionAction::Fail,
                tier: Tier::Type,
            }
        );
        assert_eq!(
            resolver.resolve(&TargetType::of::<OtherBean>(), InputShape::EmptyString),
            CoercionAction::AsEmpty
        );
    }

    #[test]
    fn test_tiers_are_per_shape() {
        // A type override for one shape does not shadow other shapes
        let mut builder = CoercionConfigBuilder::new();
        builder
            .set_coercion(Scope::Type(bean()), InputShape::EmptyArray, CoercionAction::AsEmpty)
            .set_coercion(Scope::Global, InputShape::EmptyString, CoercionAction::AsNull);
        let config = builder.build();
        let resolver = config.resolver(Features::default());

        assert_eq!(
            resolver.resolution(&bean(), InputShape::EmptyString).tier,
            Tier::Global
        );
        assert_eq!(
            resolver.resolution(&bean(), InputShape::EmptyArray).tier,
            Tier::Type
        );
    }

    #[test]
    fn test_legacy_empty_string_feature() {
        let config = CoercionConfig::default();
        let features =
            Features::default().with(DeserializationFeature::AcceptEmptyStringAsNullObject);
        assert_eq!(
            config.resolver(features).resolve(&bean(), InputShape::EmptyString),
            CoercionAction::AsNull
        );
    }

    #[test]
    fn test_builtin_defaults_table() {
        let features = Features::default();
        use CoercionAction::*;
        use InputShape as S;
        use TypeCategory as C;

        assert_eq!(builtin_default(features, C::StructuredObject, S::EmptyArray), Fail);
        assert_eq!(
            builtin_default(
                features.with(DeserializationFeature::AcceptEmptyArrayAsNullObject),
                C::StructuredObject,
                S::EmptyArray
            ),
            AsNull
        );
        assert_eq!(builtin_default(features, C::Integer, S::Float), TryConvert);
        assert_eq!(
            builtin_default(
                features.without(DeserializationFeature::AcceptFloatAsInt),
                C::Integer,
                S::Float
            ),
            Fail
        );
        assert_eq!(builtin_default(features, C::EnumLike, S::Integer), TryConvert);
        assert_eq!(
            builtin_default(
                features.with(DeserializationFeature::FailOnNumbersForEnums),
                C::EnumLike,
                S::Integer
            ),
            Fail
        );
        assert_eq!(builtin_default(features, C::Integer, S::EmptyString), AsNull);
        assert_eq!(
            builtin_default(
                features.without(DeserializationFeature::AllowCoercionOfScalars),
                C::Integer,
                S::EmptyString
            ),
            Fail
        );
        assert_eq!(builtin_default(features, C::OtherScalar, S::EmptyString), TryConvert);
        assert_eq!(builtin_default(features, C::Map, S::EmptyString), Fail);
        assert_eq!(builtin_default(features, C::Textual, S::Integer), TryConvert);
    }

    #[test]
    fn test_blank_follows_empty_string_action() {
        let mut builder = CoercionConfigBuilder::new();
        builder.set_coercion(
            Scope::Category(TypeCategory::StructuredObject),
            InputShape::EmptyString,
            CoercionAction::AsEmpty,
        );
        let config = builder.build();
        assert_eq!(
            config
                .resolver(Features::default())
                .resolve_blank(&bean(), CoercionAction::Fail),
            CoercionAction::AsEmpty
        );
    }

    #[test]
    fn test_blank_explicitly_disallowed() {
        let mut builder = CoercionConfigBuilder::new();
        builder
            .set_coercion(Scope::Global, InputShape::EmptyString, CoercionAction::AsNull)
            .set_accept_blank_as_empty(Scope::Type(bean()), Some(false));
        let config = builder.build();
        assert_eq!(
            config
                .resolver(Features::default())
                .resolve_blank(&bean(), CoercionAction::Fail),
            CoercionAction::Fail
        );
    }

    #[test]
    fn test_blank_builtin_behavior() {
        let config = CoercionConfig::default();
        let resolver = config.resolver(Features::default());
        assert_eq!(
            resolver.resolve_blank(&bean(), CoercionAction::Fail),
            CoercionAction::Fail
        );
        assert_eq!(
            resolver.resolve_blank(&TargetType::of::<i32>(), CoercionAction::Fail),
            CoercionAction::AsNull
        );
    }
}
