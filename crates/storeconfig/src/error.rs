// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Store engine errors.
//!
//! Only conditions that abort a whole render live here. Per-child problems
//! (missing descriptor, unexpected subject shape) are reported as
//! [`Diagnostic`](crate::diagnostics::Diagnostic)s and never escalate.

use std::io;
use thiserror::Error;

use crate::engine::RenderState;

/// Errors that abort a store invocation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The root subject has no registered store description.
    #[error("No store description registered for root type {type_name}")]
    DescriptorNotFound { type_name: String },

    /// The destination stream failed. Output written before the failure stays
    /// on the destination.
    #[error("Failed to write configuration: {0}")]
    Write(#[from] io::Error),
}

impl StoreError {
    /// State the invocation ended in.
    ///
    /// An unknown root is rejected while still `Idle`, so the destination was
    /// never touched. A destination failure ends in `Failed` and may leave
    /// partial output behind.
    pub fn state(&self) -> RenderState {
        match self {
            StoreError::DescriptorNotFound { .. } => RenderState::Idle,
            StoreError::Write(_) => RenderState::Failed,
        }
    }

    /// True for failures caused by the destination rather than the tree.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, StoreError::Write(_))
    }
}
