// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recoverable store warnings.
//!
//! A diagnostic is a message key plus substitution arguments. Rendering the
//! final text is a localization concern; [`Diagnostic`]'s `Display` only
//! provides an English fallback for logs and the CLI.

use std::fmt;
use tracing::warn;

/// Message template identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// No descriptor for `{type}` while storing `{property}`.
    NoDescriptor,
    /// `{type}` does not expose `{property}` expected by its descriptor.
    InvalidSubjectShape,
}

impl MessageKey {
    pub fn id(self) -> &'static str {
        match self {
            MessageKey::NoDescriptor => "storeFactory.noDescriptor",
            MessageKey::InvalidSubjectShape => "storeFactory.invalidProperty",
        }
    }

    fn template(self) -> &'static str {
        match self {
            MessageKey::NoDescriptor => "No store description for type [{0}] while storing [{1}]",
            MessageKey::InvalidSubjectShape => "Type [{0}] does not expose property [{1}]",
        }
    }
}

/// One recorded warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub key: MessageKey,
    pub args: Vec<String>,
}

impl Diagnostic {
    pub fn new(key: MessageKey, args: Vec<String>) -> Self {
        Self { key, args }
    }

    /// Missing descriptor for `type_name` under `property`.
    pub fn no_descriptor(type_name: &str, property: &str) -> Self {
        Self::new(
            MessageKey::NoDescriptor,
            vec![type_name.to_string(), property.to_string()],
        )
    }

    /// `type_name` lacks the declared `property`.
    pub fn invalid_shape(type_name: &str, property: &str) -> Self {
        Self::new(
            MessageKey::InvalidSubjectShape,
            vec![type_name.to_string(), property.to_string()],
        )
    }

    pub fn arg(&self, idx: usize) -> Option<&str> {
        self.args.get(idx).map(String::as_str)
    }

    /// Emit through the logging sink.
    pub fn log(&self) {
        warn!(key = self.key.id(), args = ?self.args, "{}", self);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = self.key.template().to_string();
        for (idx, arg) in self.args.iter().enumerate() {
            text = text.replace(&format!("{{{}}}", idx), arg);
        }
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids() {
        assert_eq!(MessageKey::NoDescriptor.id(), "storeFactory.noDescriptor");
        assert_eq!(
            MessageKey::InvalidSubjectShape.id(),
            "storeFactory.invalidProperty"
        );
    }

    #[test]
    fn test_display_substitutes_arguments() {
        let diag = Diagnostic::no_descriptor("com.example.Custom", "WrapperLifecycle");
        assert_eq!(
            diag.to_string(),
            "No store description for type [com.example.Custom] while storing [WrapperLifecycle]"
        );
        assert_eq!(diag.arg(0), Some("com.example.Custom"));
        assert_eq!(diag.arg(1), Some("WrapperLifecycle"));
        assert_eq!(diag.arg(2), None);
    }
}
