//! Coercion policy engine
//!
//! Decides what happens when an input token's shape does not match the
//! target type, e.g. an empty string where an object was expected:
//!
//! - [`InputShape`] and [`TypeCategory`] classify the token and the target.
//! - [`CoercionConfigBuilder`] registers [`CoercionAction`]s globally, per
//!   category, or per concrete type and builds an immutable
//!   [`CoercionConfig`].
//! - [`Resolver`] picks one action, most specific tier first.
//! - [`apply`] turns the action into a value or a classified failure.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod action;
pub mod apply;
pub mod category;
pub mod config;
pub mod fallback;
pub mod resolver;
pub mod shape;
pub mod target;


pub use action::CoercionAction;
pub use apply::{apply, Coerced};
pub use category::TypeCategory;
pub use config::{CoercionConfig, CoercionConfigBuilder, Scope, ShapeActions};
pub use fallback::{Fallback, Fallbacks};
pub use resolver::{builtin_default, Resolution, Resolver, Tier};
pub use shape::InputShape;
pub use target::{CoercionTarget, TargetType};
