// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! EJB reference record.
//!
//! Plain data consumed by naming resources; the store engine carries it but
//! never renders it specially.

use serde::{Deserialize, Serialize};

/// Factory used when a reference names none.
pub const DEFAULT_FACTORY: &str = "org.apache.naming.factory.EjbFactory";

/// EJB type address type.
pub const TYPE: &str = "type";
/// Remote interface class name address type.
pub const REMOTE: &str = "remote";
/// Link address type.
pub const LINK: &str = "link";

/// One typed address of a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefAddr {
    pub addr_type: String,
    pub content: String,
}

/// Reference to an EJB: home interface class plus typed addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EjbRef {
    /// Home interface class name.
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory_location: Option<String>,
    #[serde(default)]
    pub addrs: Vec<RefAddr>,
}

impl EjbRef {
    pub fn new(
        ejb_type: Option<&str>,
        home: impl Into<String>,
        remote: Option<&str>,
        link: Option<&str>,
    ) -> Self {
        Self::with_factory(ejb_type, home, remote, link, None, None)
    }

    /// Reference with an explicit factory class and location.
    pub fn with_factory(
        ejb_type: Option<&str>,
        home: impl Into<String>,
        remote: Option<&str>,
        link: Option<&str>,
        factory: Option<&str>,
        factory_location: Option<&str>,
    ) -> Self {
        let addrs = [(TYPE, ejb_type), (REMOTE, remote), (LINK, link)]
            .into_iter()
            .filter_map(|(addr_type, value)| {
                value.map(|content| RefAddr {
                    addr_type: addr_type.to_string(),
                    content: content.to_string(),
                })
            })
            .collect();
        Self {
            class_name: home.into(),
            factory: factory.map(str::to_string),
            factory_location: factory_location.map(str::to_string),
            addrs,
        }
    }

    /// Configured factory, or [`DEFAULT_FACTORY`].
    pub fn factory_class_name(&self) -> &str {
        self.factory.as_deref().unwrap_or(DEFAULT_FACTORY)
    }

    pub fn get(&self, addr_type: &str) -> Option<&str> {
        self.addrs
            .iter()
            .find(|a| a.addr_type == addr_type)
            .map(|a| a.content.as_str())
    }
}
