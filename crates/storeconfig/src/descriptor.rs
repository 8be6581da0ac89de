// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Store descriptions: how one runtime type is rendered.

use serde::{Deserialize, Serialize};

use crate::strategy::StrategyKind;

/// A child collection rendered by the owning descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildSpec {
    /// Collection name as exposed by [`Subject::children`](crate::Subject::children).
    pub property: String,

    /// Parent-context qualifier tried before the child's plain type key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
}

impl ChildSpec {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            qualifier: None,
        }
    }

    pub fn qualified(property: impl Into<String>, qualifier: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            qualifier: Some(qualifier.into()),
        }
    }
}

/// A string array rendered as repeated simple tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArraySpec {
    /// Array name as exposed by [`Subject::string_array`](crate::Subject::string_array).
    pub property: String,

    /// Tag written once per element.
    pub tag: String,

    /// Dispatch through the `type.[tag]` descriptor instead of printing directly.
    #[serde(default)]
    pub qualified: bool,
}

impl ArraySpec {
    pub fn new(property: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            tag: tag.into(),
            qualified: false,
        }
    }

    /// Array dispatched through `type.[tag]`; the array is looked up under
    /// the tag name.
    pub fn qualified(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            property: tag.clone(),
            tag,
            qualified: true,
        }
    }
}

/// Rendering rule for one runtime type, optionally scoped by a qualifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDescription {
    /// Runtime type name (or family name) this description is registered for.
    pub id: String,

    /// Parent-context qualifier; the registry key becomes `id.[qualifier]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,

    /// Element name.
    pub tag: String,

    /// Strategy that renders subjects described here.
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Standard implementations omit `className`.
    #[serde(default = "default_true")]
    pub standard: bool,

    /// Render scalar properties at all.
    #[serde(default = "default_true")]
    pub attributes: bool,

    /// When non-empty, only these properties are rendered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// Properties never rendered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transient_attributes: Vec<String>,

    /// Child runtime types skipped silently.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transient_children: Vec<String>,

    /// Child collections in output order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildSpec>,

    /// String arrays in output order, written after attributes and before
    /// child collections.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arrays: Vec<ArraySpec>,
}

fn default_true() -> bool {
    true
}

impl StoreDescription {
    /// Standard-strategy description for `id` rendered as `tag`.
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            qualifier: None,
            tag: tag.into(),
            strategy: StrategyKind::Standard,
            standard: true,
            attributes: true,
            include: Vec::new(),
            transient_attributes: Vec::new(),
            transient_children: Vec::new(),
            children: Vec::new(),
            arrays: Vec::new(),
        }
    }

    /// Registry key: `id` or `id.[qualifier]`.
    pub fn key(&self) -> String {
        match &self.qualifier {
            Some(q) => qualified_key(&self.id, q),
            None => self.id.clone(),
        }
    }

    pub fn qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    pub fn strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Mark as a non-standard implementation (`className` is rendered).
    pub fn non_standard(mut self) -> Self {
        self.standard = false;
        self
    }

    pub fn without_attributes(mut self) -> Self {
        self.attributes = false;
        self
    }

    pub fn include(mut self, name: impl Into<String>) -> Self {
        self.include.push(name.into());
        self
    }

    pub fn transient_attribute(mut self, name: impl Into<String>) -> Self {
        self.transient_attributes.push(name.into());
        self
    }

    pub fn transient_child(mut self, type_name: impl Into<String>) -> Self {
        self.transient_children.push(type_name.into());
        self
    }

    pub fn child(mut self, spec: ChildSpec) -> Self {
        self.children.push(spec);
        self
    }

    pub fn array(mut self, spec: ArraySpec) -> Self {
        self.arrays.push(spec);
        self
    }

    /// Whether `name` passes the inclusion and exclusion rules.
    pub fn is_attribute_rendered(&self, name: &str) -> bool {
        if !self.attributes {
            return false;
        }
        if !self.include.is_empty() && !self.include.iter().any(|n| n == name) {
            return false;
        }
        !self.transient_attributes.iter().any(|n| n == name)
    }

    pub fn is_transient_child(&self, type_name: &str) -> bool {
        self.transient_children.iter().any(|t| t == type_name)
    }
}

/// Compose a parent-context key, e.g. `...StandardContext.[WrapperLifecycle]`.
pub fn qualified_key(type_name: &str, qualifier: &str) -> String {
    format!("{}.[{}]", type_name, qualifier)
}
