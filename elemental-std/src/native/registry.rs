//! In-memory element registry.

use elemental_core::{ElementError, ElementRegistry};
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// A name → constructor registry held in memory.
///
/// A registry built with [`MemoryRegistry::unavailable`] models a host
/// without a component registry: it reports itself unavailable and never
/// stores anything.
pub struct MemoryRegistry<C> {
    entries: RwLock<HashMap<String, C>>,
    available: bool,
}

impl<C> Default for MemoryRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> MemoryRegistry<C> {
    /// Create an empty, available registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            available: true,
        }
    }

    /// Create a registry standing in for a host without one.
    pub fn unavailable() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            available: false,
        }
    }

    /// Number of defined names.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether no name is defined.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, C>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, C>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C> ElementRegistry<C> for MemoryRegistry<C>
where
    C: Clone + Send + Sync,
{
    fn is_available(&self) -> bool {
        self.available
    }

    fn is_defined(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    fn define(&self, name: &str, constructor: C) -> Result<(), ElementError> {
        if !self.available {
            return Ok(());
        }
        let mut entries = self.write();
        if entries.contains_key(name) {
            return Err(ElementError::AlreadyDefined(name.to_string()));
        }
        entries.insert(name.to_string(), constructor);
        Ok(())
    }

    fn get(&self, name: &str) -> Option<C> {
        self.read().get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let registry = MemoryRegistry::new();
        assert!(!registry.is_defined("my-element"));
        registry.define("my-element", 7u32).unwrap();
        assert!(registry.is_defined("my-element"));
        assert_eq!(registry.get("my-element"), Some(7));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_define_twice_fails() {
        let registry = MemoryRegistry::new();
        registry.define("my-element", 1u32).unwrap();
        assert_eq!(
            registry.define("my-element", 2u32),
            Err(ElementError::AlreadyDefined("my-element".to_string()))
        );
        assert_eq!(registry.get("my-element"), Some(1));
    }

    #[test]
    fn test_unavailable_registry_stores_nothing() {
        let registry = MemoryRegistry::unavailable();
        assert!(!registry.is_available());
        registry.define("my-element", 1u32).unwrap();
        assert!(registry.is_empty());
    }
}
