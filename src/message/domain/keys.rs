//! Closed sets of accepted top-level parameter keys.

use std::collections::BTreeSet;
use thiserror::Error;

/// Errors raised while registering a message type's keys.
///
/// These are programmer errors, surfaced once when a schema is first built.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The same key was declared more than once.
    #[error("key '{0}' is registered more than once")]
    DuplicateKey(&'static str),

    /// An empty key was declared.
    #[error("registered keys must not be empty")]
    EmptyKey,
}

/// The closed set of keys a message type accepts.
///
/// Built once when the message type is registered and read-only afterwards.
///
/// # Examples
///
/// ```
/// use plinth::message::domain::AllowedKeySet;
///
/// let keys = AllowedKeySet::register(["names", "guids"]).expect("distinct keys");
/// assert!(keys.is_allowed("names"));
/// assert!(!keys.is_allowed("foo"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedKeySet {
    declared: Vec<&'static str>,
    lookup: BTreeSet<&'static str>,
}

impl AllowedKeySet {
    /// Registers a key set.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when a key is empty or declared twice.
    pub fn register(
        keys: impl IntoIterator<Item = &'static str>,
    ) -> Result<Self, RegistryError> {
        let mut declared = Vec::new();
        let mut lookup = BTreeSet::new();
        for key in keys {
            if key.is_empty() {
                return Err(RegistryError::EmptyKey);
            }
            if !lookup.insert(key) {
                return Err(RegistryError::DuplicateKey(key));
            }
            declared.push(key);
        }
        Ok(Self { declared, lookup })
    }

    /// Returns `true` when the key is part of the set.
    #[must_use]
    pub fn is_allowed(&self, key: &str) -> bool {
        self.lookup.contains(key)
    }

    /// Iterates keys in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.declared.iter().copied()
    }

    /// Number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declared.len()
    }

    /// Returns `true` when no keys are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }
}
