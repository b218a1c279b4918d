//! Behavior identification keys.
//!
//! [`BehaviorKey`] identifies a settlement behavior within the registry.
//! Keys compare case-insensitively but remember the spelling they were
//! registered with, so error messages show the original name.

use std::borrow::{Borrow, Cow};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::behavior::BehaviorKind;

/// Case-insensitive name of a registered behavior.
///
/// # Examples
/// ```
/// use tadbir_container::key::BehaviorKey;
///
/// let key = BehaviorKey::new("CreditCardSettlement");
/// assert_eq!(key.name(), "CreditCardSettlement");
/// assert!(key.matches("creditcardsettlement"));
/// assert_eq!(key, BehaviorKey::new("CREDITCARDSETTLEMENT"));
/// ```
#[derive(Clone)]
pub struct BehaviorKey {
    name: Cow<'static, str>,
    folded: String,
}

impl BehaviorKey {
    /// Creates a key from a display name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        let folded = fold(&name);
        Self { name, folded }
    }

    /// Creates the key a behavior type registers under by default.
    #[inline]
    pub fn of<B: BehaviorKind + ?Sized>() -> Self {
        Self::new(B::KIND)
    }

    /// Returns the name as it was registered.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the case-folded form used for comparison.
    #[inline]
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Returns `true` if `name` refers to this key, ignoring case.
    pub fn matches(&self, name: &str) -> bool {
        self.folded == fold(name)
    }
}

/// Case folding shared by keys and lookups.
pub(crate) fn fold(name: &str) -> String {
    name.to_lowercase()
}

impl PartialEq for BehaviorKey {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for BehaviorKey {}

// Must agree with `Borrow<str>`: hash only the folded form.
impl Hash for BehaviorKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl Borrow<str> for BehaviorKey {
    fn borrow(&self) -> &str {
        &self.folded
    }
}

impl From<&'static str> for BehaviorKey {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl From<String> for BehaviorKey {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Debug for BehaviorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BehaviorKey({:?})", self.name)
    }
}

impl fmt::Display for BehaviorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
