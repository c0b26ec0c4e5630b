//! Concrete target types and their categories
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::TypeCategory;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A type that can be the target of a coerced deserialization
///
/// `CATEGORY` places the type in its category for category-level overrides.
/// `empty_value` is the type's empty-instance strategy, used by
/// [`CoercionAction::AsEmpty`](super::CoercionAction::AsEmpty); types without
/// a sensible empty instance keep the default `None`, which makes `AsEmpty`
/// fail for them.
///
/// ```
/// use lenient_core::{CoercionTarget, TypeCategory};
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// struct Bean {
///     a: Option<String>,
/// }
///
/// impl CoercionTarget for Bean {
///     const CATEGORY: TypeCategory = TypeCategory::StructuredObject;
///
///     fn empty_value() -> Option<Self> {
///         Some(Bean::default())
///     }
/// }
/// ```
pub trait CoercionTarget: DeserializeOwned + 'static {
    /// Category of the type
    const CATEGORY: TypeCategory;

    /// Empty instance of the type, if it has one
    fn empty_value() -> Option<Self> {
        None
    }
}

/// Runtime identity of a concrete target type
///
/// Two `TargetType`s are equal when they describe the same Rust type; the
/// name and category ride along for diagnostics and resolution.
#[derive(Clone, Copy)]
pub struct TargetType {
    id: TypeId,
    name: &'static str,
    category: TypeCategory,
}

impl TargetType {
    /// Identity of `T`
    pub fn of<T: CoercionTarget>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            category: T::CATEGORY,
        }
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Category the type belongs to
    pub fn category(&self) -> TypeCategory {
        self.category
    }
}

impl PartialEq for TargetType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TargetType {}

impl Hash for TargetType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetType")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish()
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

macro_rules! numeric_targets {
    ($category:expr, $zero:expr => $($ty:ty),+) => {
        $(
            impl CoercionTarget for $ty {
                const CATEGORY: TypeCategory = $category;

                fn empty_value() -> Option<Self> {
                    Some($zero)
                }
            }
        )+
    };
}

numeric_targets!(
    TypeCategory::Integer, 0 =>
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);
numeric_targets!(TypeCategory::Float, 0.0 => f32, f64);

impl CoercionTarget for bool {
    const CATEGORY: TypeCategory = TypeCategory::Boolean;

    fn empty_value() -> Option<Self> {
        Some(false)
    }
}

impl CoercionTarget for String {
    const CATEGORY: TypeCategory = TypeCategory::Textual;

    fn empty_value() -> Option<Self> {
        Some(String::new())
    }
}

impl<T: DeserializeOwned + 'static> CoercionTarget for Vec<T> {
    const CATEGORY: TypeCategory = TypeCategory::Collection;

    fn empty_value() -> Option<Self> {
        Some(Vec::new())
    }
}

impl<K, V> CoercionTarget for HashMap<K, V>
where
    K: DeserializeOwned + Eq + Hash + 'static,
    V: DeserializeOwned + 'static,
{
    const CATEGORY: TypeCategory = TypeCategory::Map;

    fn empty_value() -> Option<Self> {
        Some(HashMap::new())
    }
}

impl<K, V> CoercionTarget for BTreeMap<K, V>
where
    K: DeserializeOwned + Ord + 'static,
    V: DeserializeOwned + 'static,
{
    const CATEGORY: TypeCategory = TypeCategory::Map;

    fn empty_value() -> Option<Self> {
        Some(BTreeMap::new())
    }
}

// No empty instance: an empty `Value` would be indistinguishable from a
// real `null` or `{}` in the input.
impl CoercionTarget for Value {
    const CATEGORY: TypeCategory = TypeCategory::Untyped;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_target_identity() {
        assert_eq!(TargetType::of::<String>(), TargetType::of::<String>());
        assert_ne!(TargetType::of::<String>(), TargetType::of::<Vec<String>>());
        assert_ne!(TargetType::of::<i32>(), TargetType::of::<i64>());
    }

    #[test]
    fn test_target_hash_by_identity() {
        let mut set = HashSet::new();
        set.insert(TargetType::of::<u8>());
        set.insert(TargetType::of::<u8>());
        set.insert(TargetType::of::<bool>());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_builtin_categories() {
        assert_eq!(TargetType::of::<u16>().category(), TypeCategory::Integer);
        assert_eq!(TargetType::of::<f32>().category(), TypeCategory::Float);
        assert_eq!(TargetType::of::<bool>().category(), TypeCategory::Boolean);
        assert_eq!(TargetType::of::<String>().category(), TypeCategory::Textual);
        assert_eq!(TargetType::of::<Vec<u8>>().category(), TypeCategory::Collection);
        assert_eq!(
            TargetType::of::<HashMap<String, i32>>().category(),
            TypeCategory::Map
        );
        assert_eq!(TargetType::of::<Value>().category(), TypeCategory::Untyped);
    }

    #[test]
    fn test_builtin_empty_values() {
        assert_eq!(i32::empty_value(), Some(0));
        assert_eq!(f64::empty_value(), Some(0.0));
        assert_eq!(String::empty_value(), Some(String::new()));
        assert_eq!(Vec::<String>::empty_value(), Some(vec![]));
        assert_eq!(Value::empty_value(), None);
    }

    #[test]
    fn test_target_name() {
        assert!(TargetType::of::<String>().name().ends_with("String"));
        assert_eq!(TargetType::of::<u8>().to_string(), "u8");
    }
}
