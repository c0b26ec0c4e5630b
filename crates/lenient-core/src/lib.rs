//! Lenient Core - Coercion policy engine for deserialization
//!
//! This crate decides what deserialization does when an input token's shape
//! does not fit the target type, such as an empty string where an object
//! was expected. Callers configure an action per input shape at three
//! levels of specificity; the most specific one wins.
//!
//! # Main Components
//!
//! - **Coercion**: shape/category taxonomies, the configuration store, the
//!   resolver, and the outcome applier
//! - **Features**: legacy flags shaping the built-in defaults
//! - **Mapper**: JSON deserialization that consults coercion on mismatches
//! - **Rules**: declarative JSON configuration
//! - **Error Handling**: error types using `thiserror` and `anyhow`
//!
//! # Example
//!
//! ```
//! use lenient_core::{CoercionAction, CoercionTarget, InputShape, Mapper, TypeCategory};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct Bean {
//!     a: Option<String>,
//! }
//!
//! impl CoercionTarget for Bean {
//!     const CATEGORY: TypeCategory = TypeCategory::StructuredObject;
//!
//!     fn empty_value() -> Option<Self> {
//!         Some(Bean::default())
//!     }
//! }
//!
//! // Empty strings are rejected for structured targets by default
//! assert!(Mapper::new().read_value::<Bean>("\"\"").is_err());
//!
//! let mapper = Mapper::builder()
//!     .with_coercion_config(TypeCategory::StructuredObject, |cfg| {
//!         cfg.set_coercion(InputShape::EmptyString, CoercionAction::AsEmpty);
//!     })
//!     .build();
//! let bean = mapper.read_value::<Bean>("\"\"").unwrap();
//! assert!(bean.is_some());
//! ```

pub mod coercion;
pub mod error;
pub mod features;
pub mod location;
pub mod mapper;
pub mod rules;

mod proptest_strategies;

// Re-export main types for convenience
pub use coercion::{
    apply, CoercionAction, CoercionConfig, CoercionConfigBuilder, CoercionTarget, Coerced,
    InputShape, Resolution, Resolver, Scope, ShapeActions, TargetType, Tier, TypeCategory,
};
pub use error::{CoercionError, CoercionFailure, Error, Result};
pub use features::{DeserializationFeature, Features};
pub use location::Location;
pub use mapper::{Mapper, MapperBuilder, Reader};
pub use rules::{CoercionRules, ScopeRules};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
