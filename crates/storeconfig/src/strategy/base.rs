// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Behavior shared by all strategies: attribute filtering, array printing and
//! recursive child dispatch.

use tracing::trace;

use super::StoreContext;
use crate::appender::Attribute;
use crate::descriptor::{qualified_key, ChildSpec, StoreDescription};
use crate::diagnostics::Diagnostic;
use crate::error::StoreError;
use crate::registry::StoreRegistry;
use crate::subject::Subject;

/// Attribute name carrying the implementation type of non-standard components.
pub(crate) const CLASS_NAME: &str = "className";

/// `className` (for non-standard descriptions) followed by the filtered
/// scalar properties.
pub fn collect_attributes(
    cx: &mut StoreContext<'_>,
    subject: &dyn Subject,
    desc: &StoreDescription,
) -> Vec<Attribute> {
    let mut attributes = Vec::new();
    if !desc.standard {
        attributes.push(Attribute::new(CLASS_NAME, subject.type_name()));
    }
    attributes.extend(property_attributes(cx, subject, desc, &[]));
    attributes
}

/// Scalar properties in declared order, minus `skip`, properties rejected by
/// the description's policy and properties still at their default.
///
/// Names the description explicitly includes but the subject does not expose
/// are reported and left out.
pub fn property_attributes(
    cx: &mut StoreContext<'_>,
    subject: &dyn Subject,
    desc: &StoreDescription,
    skip: &[&str],
) -> Vec<Attribute> {
    let properties = subject.properties();

    for name in &desc.include {
        if !properties.iter().any(|p| &p.name == name) {
            cx.warn(Diagnostic::invalid_shape(subject.type_name(), name));
        }
    }

    properties
        .into_iter()
        .filter(|p| p.name != CLASS_NAME)
        .filter(|p| !skip.contains(&p.name.as_str()))
        .filter(|p| desc.is_attribute_rendered(&p.name))
        .filter(|p| !p.is_default())
        .map(|p| Attribute::new(p.name, p.value.to_string()))
        .collect()
}

/// Whether anything would be written between the open and close tags.
///
/// Qualified arrays count only when their `type.[Tag]` description is
/// registered, children only when a description resolves for them.
pub fn has_nested_content(
    registry: &StoreRegistry,
    subject: &dyn Subject,
    desc: &StoreDescription,
) -> bool {
    let arrays = desc.arrays.iter().any(|spec| {
        let filled = subject
            .string_array(&spec.property)
            .is_some_and(|values| !values.is_empty());
        filled
            && (!spec.qualified
                || registry
                    .find_description(&qualified_key(subject.type_name(), &spec.tag))
                    .is_some())
    });
    if arrays {
        return true;
    }
    desc.children.iter().any(|spec| {
        subject.children(&spec.property).is_some_and(|children| {
            children.iter().any(|child| {
                !desc.is_transient_child(child.type_name())
                    && registry.lookup(*child, spec.qualifier.as_deref()).is_some()
            })
        })
    })
}

/// Write the element: self-closing when nothing nests, otherwise open tag,
/// string arrays, child collections and close tag.
pub fn store_element(
    cx: &mut StoreContext<'_>,
    indent: usize,
    subject: &dyn Subject,
    desc: &StoreDescription,
    attributes: &[Attribute],
) -> Result<(), StoreError> {
    let tag = desc.tag.as_str();
    if !has_nested_content(cx.registry(), subject, desc) {
        report_unrendered(cx, subject, desc);
        cx.appender().print_tag(tag, indent, attributes)?;
        return Ok(());
    }

    cx.appender().print_open_tag(tag, indent, attributes)?;
    store_arrays(cx, indent + 1, subject, desc)?;
    store_children(cx, indent + 1, subject, desc)?;
    cx.appender().print_close_tag(tag, indent)?;
    Ok(())
}

/// Warnings for the self-closing path, matching what the array and child
/// passes would have reported.
fn report_unrendered(cx: &mut StoreContext<'_>, subject: &dyn Subject, desc: &StoreDescription) {
    let registry = cx.registry();
    for spec in &desc.arrays {
        let present = subject.string_array(&spec.property).is_some();
        if spec.qualified {
            let key = qualified_key(subject.type_name(), &spec.tag);
            if !present || registry.find_description(&key).is_none() {
                cx.warn(Diagnostic::no_descriptor(subject.type_name(), &spec.tag));
            }
        } else if !present {
            cx.warn(Diagnostic::invalid_shape(subject.type_name(), &spec.property));
        }
    }
    for spec in &desc.children {
        let Some(children) = subject.children(&spec.property) else {
            cx.warn(Diagnostic::invalid_shape(subject.type_name(), &spec.property));
            continue;
        };
        for child in children {
            if desc.is_transient_child(child.type_name()) {
                continue;
            }
            if registry.lookup(child, spec.qualifier.as_deref()).is_none() {
                cx.warn(Diagnostic::no_descriptor(child.type_name(), &spec.property));
            }
        }
    }
}

/// String arrays at nesting level `indent`.
///
/// Qualified specs go through the `type.[Tag]` description; everything else
/// is printed directly.
pub fn store_arrays(
    cx: &mut StoreContext<'_>,
    indent: usize,
    subject: &dyn Subject,
    desc: &StoreDescription,
) -> Result<(), StoreError> {
    for spec in &desc.arrays {
        if spec.qualified {
            let key = qualified_key(subject.type_name(), &spec.tag);
            match cx.registry().find_description(&key) {
                Some(array_desc) => {
                    array_desc
                        .strategy
                        .strategy()
                        .store(cx, indent, subject, &array_desc)?;
                }
                None => cx.warn(Diagnostic::no_descriptor(subject.type_name(), &spec.tag)),
            }
            continue;
        }

        match subject.string_array(&spec.property) {
            Some(values) => cx.appender().print_tag_array(&spec.tag, indent, values)?,
            None => cx.warn(Diagnostic::invalid_shape(subject.type_name(), &spec.property)),
        }
    }
    Ok(())
}

/// Child collections at nesting level `indent`, in declared order.
pub fn store_children(
    cx: &mut StoreContext<'_>,
    indent: usize,
    subject: &dyn Subject,
    desc: &StoreDescription,
) -> Result<(), StoreError> {
    for spec in &desc.children {
        let Some(children) = subject.children(&spec.property) else {
            cx.warn(Diagnostic::invalid_shape(subject.type_name(), &spec.property));
            continue;
        };
        for child in children {
            if desc.is_transient_child(child.type_name()) {
                trace!(type_name = child.type_name(), "skip transient child");
                continue;
            }
            store_child(cx, indent, child, spec)?;
        }
    }
    Ok(())
}

/// Resolve and run the strategy for one child. A missing description is
/// reported and the child skipped.
pub fn store_child(
    cx: &mut StoreContext<'_>,
    indent: usize,
    child: &dyn Subject,
    spec: &ChildSpec,
) -> Result<(), StoreError> {
    let registry = cx.registry();
    match registry.lookup(child, spec.qualifier.as_deref()) {
        Some(desc) => desc.strategy.strategy().store(cx, indent, child, &desc),
        None => {
            cx.warn(Diagnostic::no_descriptor(child.type_name(), &spec.property));
            Ok(())
        }
    }
}
