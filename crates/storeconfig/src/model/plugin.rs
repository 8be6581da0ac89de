// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{LISTENER_FAMILY, VALVE_FAMILY};
use crate::subject::{Property, Subject};

/// Kind of a class-named pluggable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
    Listener,
    Valve,
}

impl PluginKind {
    pub fn family(self) -> &'static str {
        match self {
            PluginKind::Listener => LISTENER_FAMILY,
            PluginKind::Valve => VALVE_FAMILY,
        }
    }
}

/// A lifecycle listener or valve: an implementation class plus free-form
/// bean properties, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    pub kind: PluginKind,
    pub class_name: String,
    pub attributes: Vec<(String, String)>,
}

impl Plugin {
    pub fn new(kind: PluginKind, class_name: impl Into<String>) -> Self {
        Self {
            kind,
            class_name: class_name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn listener(class_name: impl Into<String>) -> Self {
        Self::new(PluginKind::Listener, class_name)
    }

    pub fn valve(class_name: impl Into<String>) -> Self {
        Self::new(PluginKind::Valve, class_name)
    }

    /// Builder-style property setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a property, replacing an existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl Subject for Plugin {
    fn type_name(&self) -> &str {
        &self.class_name
    }

    fn family(&self) -> Option<&str> {
        Some(self.kind.family())
    }

    fn properties(&self) -> Vec<Property> {
        self.attributes
            .iter()
            .map(|(n, v)| Property::new(n.clone(), v.as_str()))
            .collect()
    }
}
