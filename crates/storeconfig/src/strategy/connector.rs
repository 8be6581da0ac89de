// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Connector rendering.
//!
//! Connectors always carry `port` and `protocol`, even at their defaults, so
//! the loader never has to guess the protocol handler. When a connector runs
//! on a shared executor its own thread-pool settings are ignored by the
//! server and are not written.

use tracing::trace;

use super::base::CLASS_NAME;
use super::{property_attributes, store_element, StoreContext, StoreStrategy};
use crate::appender::Attribute;
use crate::descriptor::StoreDescription;
use crate::error::StoreError;
use crate::subject::{Subject, Value};

/// Attributes written first, unconditionally.
const LEADING: [&str; 2] = ["port", "protocol"];

/// Pool settings shadowed by `executor`.
const EXECUTOR_SHADOWED: [&str; 3] = ["maxThreads", "minSpareThreads", "maxIdleTime"];

#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectorStrategy;

impl StoreStrategy for ConnectorStrategy {
    fn store(
        &self,
        cx: &mut StoreContext<'_>,
        indent: usize,
        subject: &dyn Subject,
        desc: &StoreDescription,
    ) -> Result<(), StoreError> {
        let properties = subject.properties();
        let mut attributes = Vec::new();

        if !desc.standard {
            attributes.push(Attribute::new(CLASS_NAME, subject.type_name()));
        }
        for name in LEADING {
            if let Some(p) = properties.iter().find(|p| p.name == name) {
                attributes.push(Attribute::new(name, p.value.to_string()));
            }
        }

        let on_executor = properties.iter().any(|p| {
            p.name == "executor" && matches!(&p.value, Value::Str(s) if !s.is_empty())
        });
        let mut skip: Vec<&str> = LEADING.to_vec();
        if on_executor {
            trace!("connector uses a shared executor, pool settings skipped");
            skip.extend(EXECUTOR_SHADOWED);
        }

        attributes.extend(property_attributes(cx, subject, desc, &skip));
        store_element(cx, indent, subject, desc, &attributes)
    }
}
