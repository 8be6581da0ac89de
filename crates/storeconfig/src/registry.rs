// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor registry.
//!
//! Keys are runtime type names, optionally extended with a parent-context
//! qualifier (`type.[Qualifier]`). The process-wide registry is built once on
//! first use; later registration takes the write lock and is meant for rare,
//! startup-like moments only.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::descriptor::{qualified_key, StoreDescription};
use crate::model;
use crate::subject::Subject;

static GLOBAL: OnceLock<Arc<StoreRegistry>> = OnceLock::new();

/// Map of store descriptions keyed by (type, optional qualifier).
#[derive(Debug, Default)]
pub struct StoreRegistry {
    descriptors: RwLock<HashMap<String, Arc<StoreDescription>>>,
}

impl StoreRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in descriptions for the component model.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        for desc in model::default_descriptions() {
            registry.register(desc);
        }
        registry
    }

    /// Shared process-wide registry with the built-in descriptions.
    pub fn global() -> Arc<StoreRegistry> {
        GLOBAL
            .get_or_init(|| Arc::new(Self::with_defaults()))
            .clone()
    }

    /// Insert or replace the description under its key.
    ///
    /// Returns the description it replaced, if any.
    pub fn register(&self, desc: StoreDescription) -> Option<Arc<StoreDescription>> {
        let key = desc.key();
        debug!(key = %key, tag = %desc.tag, "register store description");
        self.descriptors.write().insert(key, Arc::new(desc))
    }

    /// Remove the description registered under `key`.
    pub fn unregister(&self, key: &str) -> Option<Arc<StoreDescription>> {
        self.descriptors.write().remove(key)
    }

    /// Exact-key lookup. Missing keys are a normal outcome.
    pub fn find_description(&self, key: &str) -> Option<Arc<StoreDescription>> {
        self.descriptors.read().get(key).cloned()
    }

    /// `type.[qualifier]` first, then `type`.
    pub fn find_qualified(
        &self,
        type_name: &str,
        qualifier: Option<&str>,
    ) -> Option<Arc<StoreDescription>> {
        if let Some(q) = qualifier {
            if let Some(desc) = self.find_description(&qualified_key(type_name, q)) {
                return Some(desc);
            }
        }
        self.find_description(type_name)
    }

    /// Resolve the description for `subject`: qualified type key, plain type
    /// key, then the subject's family.
    pub fn lookup(
        &self,
        subject: &dyn Subject,
        qualifier: Option<&str>,
    ) -> Option<Arc<StoreDescription>> {
        let found = self
            .find_qualified(subject.type_name(), qualifier)
            .or_else(|| {
                subject
                    .family()
                    .and_then(|family| self.find_qualified(family, qualifier))
            });
        trace!(
            type_name = subject.type_name(),
            qualifier = ?qualifier,
            found = found.is_some(),
            "lookup store description"
        );
        found
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.descriptors.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Registered descriptions, sorted by key.
    pub fn descriptions(&self) -> Vec<Arc<StoreDescription>> {
        let guard = self.descriptors.read();
        let mut all: Vec<(String, Arc<StoreDescription>)> = guard
            .iter()
            .map(|(k, v)| (k.clone(), Arc::clone(v)))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        all.into_iter().map(|(_, v)| v).collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Context, Plugin, PluginKind, CONTEXT_TYPE};
    use crate::subject::Property;

    struct Bare(&'static str);

    impl Subject for Bare {
        fn type_name(&self) -> &str {
            self.0
        }
        fn properties(&self) -> Vec<Property> {
            Vec::new()
        }
    }

    #[test]
    fn test_missing_key_is_absent() {
        let registry = StoreRegistry::new();
        assert!(registry.find_description("com.example.Nothing").is_none());
        assert!(registry.lookup(&Bare("com.example.Nothing"), None).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_replaces() {
        let registry = StoreRegistry::new();
        assert!(registry.register(StoreDescription::new("a.B", "B")).is_none());
        let old = registry.register(StoreDescription::new("a.B", "Bee")).unwrap();
        assert_eq!(old.tag, "B");
        assert_eq!(registry.find_description("a.B").unwrap().tag, "Bee");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_qualified_key_takes_precedence() {
        let registry = StoreRegistry::new();
        registry.register(StoreDescription::new("a.B", "B"));
        registry.register(StoreDescription::new("a.B", "ScopedB").qualifier("Parent"));

        let subject = Bare("a.B");
        assert_eq!(registry.lookup(&subject, Some("Parent")).unwrap().tag, "ScopedB");
        assert_eq!(registry.lookup(&subject, Some("Other")).unwrap().tag, "B");
        assert_eq!(registry.lookup(&subject, None).unwrap().tag, "B");
    }

    #[test]
    fn test_family_fallback() {
        let registry = StoreRegistry::with_defaults();
        let listener = Plugin::new(PluginKind::Listener, "com.example.AuditListener");
        let desc = registry.lookup(&listener, None).unwrap();
        assert_eq!(desc.tag, "Listener");
        assert!(!desc.standard);
    }

    #[test]
    fn test_defaults_include_wrapper_lifecycle() {
        let registry = StoreRegistry::with_defaults();
        let key = qualified_key(CONTEXT_TYPE, "WrapperLifecycle");
        assert!(registry.find_description(&key).is_some());
        assert_eq!(
            registry.lookup(&Context::new("/app", "app"), None).unwrap().tag,
            "Context"
        );
    }

    #[test]
    fn test_keys_are_sorted() {
        let registry = StoreRegistry::new();
        registry.register(StoreDescription::new("z.Z", "Z"));
        registry.register(StoreDescription::new("a.A", "A"));
        assert_eq!(registry.keys(), vec!["a.A".to_string(), "z.Z".to_string()]);
        assert_eq!(registry.descriptions()[0].tag, "A");
        assert!(registry.unregister("a.A").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_global_is_shared() {
        let a = StoreRegistry::global();
        let b = StoreRegistry::global();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!a.is_empty());
    }
}
