//! Behavior instance lifetimes.
//!
//! A scope decides how often a registration's factory runs:
//! - [`Scope::Singleton`]: once, on first resolve
//! - [`Scope::Transient`]: on every resolve
use std::fmt;

use serde::{Deserialize, Serialize};

/// Defines how long a resolved behavior instance lives.
///
/// # Examples
/// ```
/// use tadbir_container::scope::Scope;
///
/// assert!(Scope::Singleton.is_cached());
/// assert!(!Scope::Transient.is_cached());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// One instance shared by every resolve.
    ///
    /// Built lazily on first resolve and kept until the registry is
    /// dropped. Stateless behaviors belong here.
    #[default]
    Singleton,

    /// A fresh instance on every resolve.
    ///
    /// Use it for behaviors that carry per-settlement state.
    Transient,
}

impl Scope {
    /// Returns `true` if resolved instances are reused.
    #[inline]
    pub fn is_cached(&self) -> bool {
        matches!(self, Scope::Singleton)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Singleton => write!(f, "Singleton"),
            Scope::Transient => write!(f, "Transient"),
        }
    }
}
