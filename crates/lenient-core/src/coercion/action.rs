//! Coercion actions
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome chosen for a (target, shape) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoercionAction {
    /// Reject the token with a coercion failure
    Fail,
    /// Produce an absent value
    AsNull,
    /// Produce the target's empty instance
    AsEmpty,
    /// Hand the token to the shape's fallback conversion
    TryConvert,
}

impl fmt::Display for CoercionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionAction::Fail => write!(f, "Fail"),
            CoercionAction::AsNull => write!(f, "AsNull"),
            CoercionAction::AsEmpty => write!(f, "AsEmpty"),
            CoercionAction::TryConvert => write!(f, "TryConvert"),
        }
    }
}
