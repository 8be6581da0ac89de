// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! String arrays that need a parent-scoped description, such as a context's
//! wrapper lifecycle and wrapper listener class names.
//!
//! The strategy is handed the *owning* subject. It re-checks that
//! `type.[Tag]` is registered for that subject's type and prints the array
//! named by the tag; any other subject gets a `noDescriptor` warning.

use tracing::trace;

use super::{StoreContext, StoreStrategy};
use crate::descriptor::{qualified_key, StoreDescription};
use crate::diagnostics::Diagnostic;
use crate::error::StoreError;
use crate::subject::Subject;

#[derive(Debug, Clone, Copy, Default)]
pub struct StringArrayStrategy;

impl StoreStrategy for StringArrayStrategy {
    fn store(
        &self,
        cx: &mut StoreContext<'_>,
        indent: usize,
        subject: &dyn Subject,
        desc: &StoreDescription,
    ) -> Result<(), StoreError> {
        let tag = desc.tag.as_str();
        let key = qualified_key(subject.type_name(), tag);
        let registered = cx.registry().find_description(&key).is_some();

        match subject.string_array(tag) {
            Some(values) if registered => {
                trace!(key = %key, count = values.len(), "store string array");
                cx.appender().print_tag_array(tag, indent, values)?;
            }
            _ => cx.warn(Diagnostic::no_descriptor(subject.type_name(), tag)),
        }
        Ok(())
    }
}
