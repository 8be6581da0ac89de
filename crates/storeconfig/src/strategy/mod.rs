// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Store strategies.
//!
//! A strategy renders one subject (and, through the registry, its children).
//! Strategies are stateless: everything flows through [`StoreContext`], the
//! indent level, the subject and its resolved description. The set of
//! strategies is closed and selected by [`StrategyKind`], so descriptions
//! loaded from configuration files can name them.

mod base;
mod connector;
mod standard;
mod string_array;

pub use base::{
    collect_attributes, has_nested_content, property_attributes, store_arrays, store_child,
    store_children, store_element,
};
pub use connector::ConnectorStrategy;
pub use standard::StandardStrategy;
pub use string_array::StringArrayStrategy;

use serde::{Deserialize, Serialize};

use crate::appender::StoreAppender;
use crate::descriptor::StoreDescription;
use crate::diagnostics::Diagnostic;
use crate::error::StoreError;
use crate::registry::StoreRegistry;
use crate::subject::Subject;

/// Renders a subject described by a [`StoreDescription`].
pub trait StoreStrategy: Send + Sync {
    /// Write `subject` at nesting level `indent`.
    ///
    /// Only destination failures are returned; lookup problems below
    /// `subject` are recorded on `cx` and rendering continues.
    fn store(
        &self,
        cx: &mut StoreContext<'_>,
        indent: usize,
        subject: &dyn Subject,
        desc: &StoreDescription,
    ) -> Result<(), StoreError>;
}

/// Identifier of a built-in strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Descriptor-driven attributes, arrays and children.
    #[default]
    Standard,
    /// `port`/`protocol` first, executor-shadowed pool settings dropped.
    Connector,
    /// A string array owned by the parent subject, keyed `type.[Tag]`.
    StringArray,
}

impl StrategyKind {
    pub fn strategy(self) -> &'static dyn StoreStrategy {
        match self {
            StrategyKind::Standard => &StandardStrategy,
            StrategyKind::Connector => &ConnectorStrategy,
            StrategyKind::StringArray => &StringArrayStrategy,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Standard => "standard",
            StrategyKind::Connector => "connector",
            StrategyKind::StringArray => "string-array",
        }
    }
}

/// Per-invocation state shared by every strategy of one render.
pub struct StoreContext<'a> {
    registry: &'a StoreRegistry,
    appender: StoreAppender<'a>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> StoreContext<'a> {
    pub fn new(registry: &'a StoreRegistry, appender: StoreAppender<'a>) -> Self {
        Self {
            registry,
            appender,
            diagnostics: Vec::new(),
        }
    }

    pub fn registry(&self) -> &'a StoreRegistry {
        self.registry
    }

    pub fn appender(&mut self) -> &mut StoreAppender<'a> {
        &mut self.appender
    }

    /// Log and record a recoverable problem.
    pub fn warn(&mut self, diagnostic: Diagnostic) {
        diagnostic.log();
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn bytes_written(&self) -> u64 {
        self.appender.bytes_written()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
