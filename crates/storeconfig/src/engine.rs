// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Store engine driver.
//!
//! [`StoreConfig`] resolves the root description, runs its strategy over the
//! whole tree and reports the outcome. One invocation is strictly sequential
//! and depth-first; independent invocations may run concurrently against the
//! same registry.
//!
//! A failed invocation may have written part of the document to the
//! destination. Nothing is rolled back; [`StoreConfig::store_to_file`] keeps
//! such output in the staging file instead of the live configuration.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::appender::StoreAppender;
use crate::config::StoreOptions;
use crate::descriptor::StoreDescription;
use crate::diagnostics::Diagnostic;
use crate::error::StoreError;
use crate::file::StoreFileMover;
use crate::registry::StoreRegistry;
use crate::strategy::StoreContext;
use crate::subject::Subject;

/// Lifecycle of one store invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Idle,
    Rendering,
    Completed,
    Failed,
}

/// Outcome of a successful invocation.
#[derive(Debug, Clone)]
pub struct StoreReport {
    pub state: RenderState,
    /// Recoverable problems, in the order they occurred.
    pub diagnostics: Vec<Diagnostic>,
    pub bytes_written: u64,
    /// Backup of the replaced file, for file targets.
    pub backup: Option<PathBuf>,
}

impl StoreReport {
    pub fn warning_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Writes component trees as configuration documents.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    registry: Arc<StoreRegistry>,
    options: StoreOptions,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl StoreConfig {
    pub fn new(registry: Arc<StoreRegistry>, options: StoreOptions) -> Self {
        Self { registry, options }
    }

    /// Global registry, default options.
    pub fn with_defaults() -> Self {
        Self::new(StoreRegistry::global(), StoreOptions::default())
    }

    pub fn registry(&self) -> &Arc<StoreRegistry> {
        &self.registry
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Render `root` and everything below it to `out`.
    ///
    /// Fails with [`StoreError::DescriptorNotFound`] before writing anything
    /// when the root type is unknown, and with [`StoreError::Write`] when the
    /// destination fails; [`StoreError::state`] tells which state the
    /// invocation ended in. Missing descriptions below the root only show up
    /// in the report.
    pub fn store_configuration(
        &self,
        root: &dyn Subject,
        out: &mut dyn Write,
    ) -> Result<StoreReport, StoreError> {
        let desc = self.resolve_root(root)?;
        let mut state = RenderState::Idle;

        let appender = StoreAppender::with_indent_width(out, self.options.indent_width);
        let mut cx = StoreContext::new(&self.registry, appender);
        transition(&mut state, RenderState::Rendering);

        let rendered = self.render(&mut cx, root, &desc);
        let flushed = cx.appender().flush().map_err(StoreError::from);

        match rendered.and(flushed) {
            Ok(()) => {
                transition(&mut state, RenderState::Completed);
                let bytes_written = cx.bytes_written();
                let diagnostics = cx.into_diagnostics();
                info!(
                    root = %desc.tag,
                    bytes = bytes_written,
                    warnings = diagnostics.len(),
                    "configuration stored"
                );
                Ok(StoreReport {
                    state,
                    diagnostics,
                    bytes_written,
                    backup: None,
                })
            }
            Err(err) => {
                transition(&mut state, err.state());
                error!(
                    root = %desc.tag,
                    bytes = cx.bytes_written(),
                    error = %err,
                    "store failed, destination holds partial output"
                );
                Err(err)
            }
        }
    }

    /// Render into a string.
    pub fn store_to_string(&self, root: &dyn Subject) -> Result<(String, StoreReport), StoreError> {
        let mut buf = Vec::new();
        let report = self.store_configuration(root, &mut buf)?;
        let text = String::from_utf8(buf)
            .map_err(|e| StoreError::Write(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
        Ok((text, report))
    }

    /// Render to `path` through a staging file, keeping a backup of the
    /// previous file when [`StoreOptions::backup`] is set.
    pub fn store_to_file(&self, root: &dyn Subject, path: &Path) -> Result<StoreReport, StoreError> {
        self.resolve_root(root)?;

        let mover = StoreFileMover::new(path);
        let mut writer = mover.writer()?;
        let mut report = self.store_configuration(root, &mut writer)?;
        writer
            .into_inner()
            .map_err(|e| StoreError::Write(e.into_error()))?
            .sync_all()?;

        report.backup = mover.move_into_place(self.options.backup)?;
        info!(path = %path.display(), "configuration file replaced");
        Ok(report)
    }

    fn resolve_root(&self, root: &dyn Subject) -> Result<Arc<StoreDescription>, StoreError> {
        self.registry.lookup(root, None).ok_or_else(|| {
            error!(type_name = root.type_name(), "no store description for root");
            StoreError::DescriptorNotFound {
                type_name: root.type_name().to_string(),
            }
        })
    }

    fn render(
        &self,
        cx: &mut StoreContext<'_>,
        root: &dyn Subject,
        desc: &StoreDescription,
    ) -> Result<(), StoreError> {
        if self.options.xml_declaration {
            cx.appender().print_xml_declaration(&self.options.encoding)?;
        }
        desc.strategy.strategy().store(cx, 0, root, desc)
    }
}

fn transition(state: &mut RenderState, next: RenderState) {
    debug!(from = ?*state, to = ?next, "store state");
    *state = next;
}
