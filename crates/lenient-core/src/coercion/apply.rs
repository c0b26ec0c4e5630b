//! Applying a resolved coercion action
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::{CoercionAction, CoercionTarget, InputShape, TargetType};
use crate::error::{CoercionError, CoercionFailure};
use crate::location::Location;

/// Result of applying a non-failing action
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced<T> {
    /// Absent value
    Null,
    /// Fully built value
    Value(T),
    /// Continue with the shape's fallback conversion
    Convert,
}

impl<T> Coerced<T> {
    /// Whether the caller has to run the fallback conversion
    pub fn needs_conversion(&self) -> bool {
        matches!(self, Coerced::Convert)
    }
}

/// Materialize `action` for a `shape` token at `location` into `T`
///
/// `Fail` and an unsatisfiable `AsEmpty` produce a [`CoercionError`];
/// every other action succeeds.
pub fn apply<T: CoercionTarget>(
    action: CoercionAction,
    shape: InputShape,
    location: Location,
) -> Result<Coerced<T>, CoercionError> {
    match action {
        CoercionAction::AsNull => Ok(Coerced::Null),
        CoercionAction::TryConvert => Ok(Coerced::Convert),
        CoercionAction::AsEmpty => match T::empty_value() {
            Some(value) => Ok(Coerced::Value(value)),
            None => {
                let target = TargetType::of::<T>();
                log::warn!(
                    "AsEmpty resolved for {} from {}, but the type has no empty instance",
                    target,
                    shape
                );
                Err(CoercionError::new(
                    &target,
                    shape,
                    location,
                    CoercionFailure::NoEmptyStrategy,
                ))
            }
        },
        CoercionAction::Fail => Err(CoercionError::new(
            &TargetType::of::<T>(),
            shape,
            location,
            CoercionFailure::Disabled,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coercion::TypeCategory;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Bean {
        a: Option<String>,
    }

    impl CoercionTarget for Bean {
        const CATEGORY: TypeCategory = TypeCategory::StructuredObject;

        fn empty_value() -> Option<Self> {
            Some(Bean::default())
        }
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Handle {
        #[allow(dead_code)]
        id: u64,
    }

    impl CoercionTarget for Handle {
        const CATEGORY: TypeCategory = TypeCategory::StructuredObject;
    }

    #[test]
    fn test_as_null() {
        let out = apply::<Bean>(
            CoercionAction::AsNull,
            InputShape::EmptyString,
            Location::default(),
        );
        assert_eq!(out, Ok(Coerced::Null));
    }

    #[test]
    fn test_as_empty_builds_default_instance() {
        let out = apply::<Bean>(
            CoercionAction::AsEmpty,
            InputShape::EmptyString,
            Location::default(),
        );
        assert_eq!(out, Ok(Coerced::Value(Bean { a: None })));
    }

    #[test]
    fn test_as_empty_without_strategy_fails() {
        let location = Location::new(3, 1, 4);
        let err = apply::<Handle>(CoercionAction::AsEmpty, InputShape::EmptyString, location)
            .unwrap_err();
        assert_eq!(err.kind, CoercionFailure::NoEmptyStrategy);
        assert_eq!(err.location, location);
        assert!(err.to_string().contains("no empty-instance strategy"));
    }

    #[test]
    fn test_try_convert_defers() {
        let out = apply::<Bean>(
            CoercionAction::TryConvert,
            InputShape::EmptyString,
            Location::default(),
        )
        .unwrap();
        assert!(out.needs_conversion());
    }

    #[test]
    fn test_fail_carries_type_shape_and_location() {
        let location = Location::new(0, 1, 1);
        let err =
            apply::<Bean>(CoercionAction::Fail, InputShape::EmptyString, location).unwrap_err();
        assert_eq!(err.kind, CoercionFailure::Disabled);
        assert_eq!(err.shape, InputShape::EmptyString);
        assert_eq!(err.location, location);
        assert!(err.type_name.ends_with("Bean"));

        let message = err.to_string();
        assert!(message.starts_with("Cannot deserialize value of type "));
        assert!(message.contains(" from empty String "));
    }
}
