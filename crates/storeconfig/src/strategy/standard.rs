// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use tracing::trace;

use super::{collect_attributes, store_element, StoreContext, StoreStrategy};
use crate::descriptor::StoreDescription;
use crate::error::StoreError;
use crate::subject::Subject;

/// Renders purely from the description: attributes, arrays, children.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardStrategy;

impl StoreStrategy for StandardStrategy {
    fn store(
        &self,
        cx: &mut StoreContext<'_>,
        indent: usize,
        subject: &dyn Subject,
        desc: &StoreDescription,
    ) -> Result<(), StoreError> {
        trace!(tag = %desc.tag, type_name = subject.type_name(), indent, "store element");
        let attributes = collect_attributes(cx, subject, desc);
        store_element(cx, indent, subject, desc, &attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appender::StoreAppender;
    use crate::descriptor::{ArraySpec, ChildSpec};
    use crate::diagnostics::MessageKey;
    use crate::registry::StoreRegistry;
    use crate::subject::Property;

    struct Node {
        type_name: &'static str,
        props: Vec<Property>,
        items: Vec<Node>,
        names: Vec<String>,
    }

    impl Node {
        fn leaf(type_name: &'static str) -> Self {
            Node {
                type_name,
                props: Vec::new(),
                items: Vec::new(),
                names: Vec::new(),
            }
        }
    }

    impl Subject for Node {
        fn type_name(&self) -> &str {
            self.type_name
        }
        fn properties(&self) -> Vec<Property> {
            self.props.clone()
        }
        fn children(&self, property: &str) -> Option<Vec<&dyn Subject>> {
            (property == "items").then(|| self.items.iter().map(|n| n as &dyn Subject).collect())
        }
        fn string_array(&self, property: &str) -> Option<&[String]> {
            (property == "names").then_some(self.names.as_slice())
        }
    }

    fn render(registry: &StoreRegistry, subject: &Node) -> (String, Vec<crate::Diagnostic>) {
        let desc = registry.lookup(subject, None).unwrap();
        let mut buf = Vec::new();
        let diagnostics = {
            let mut cx = StoreContext::new(registry, StoreAppender::new(&mut buf));
            StandardStrategy.store(&mut cx, 0, subject, &desc).unwrap();
            cx.into_diagnostics()
        };
        (String::from_utf8(buf).unwrap(), diagnostics)
    }

    fn registry() -> StoreRegistry {
        let registry = StoreRegistry::new();
        registry.register(
            StoreDescription::new("t.Parent", "Parent")
                .array(ArraySpec::new("names", "Name"))
                .child(ChildSpec::new("items")),
        );
        registry.register(StoreDescription::new("t.Child", "Child"));
        registry
    }

    #[test]
    fn test_tag_matches_description() {
        let (out, diags) = render(&registry(), &Node::leaf("t.Child"));
        assert_eq!(out, "<Child/>\n");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_default_valued_property_is_omitted() {
        let mut node = Node::leaf("t.Child");
        node.props = vec![
            Property::with_default("size", 10, 10),
            Property::with_default("mode", "fast", "slow"),
            Property::new("name", "c1"),
        ];
        let (out, _) = render(&registry(), &node);
        assert_eq!(out, "<Child mode=\"fast\" name=\"c1\"/>\n");
    }

    #[test]
    fn test_arrays_then_children_nested() {
        let mut parent = Node::leaf("t.Parent");
        parent.names = vec!["a".into(), "b".into()];
        parent.items = vec![Node::leaf("t.Child"), Node::leaf("t.Child")];
        let (out, _) = render(&registry(), &parent);
        assert_eq!(
            out,
            "<Parent>\n  <Name>a</Name>\n  <Name>b</Name>\n  <Child/>\n  <Child/>\n</Parent>\n"
        );
    }

    #[test]
    fn test_unknown_child_is_skipped_and_siblings_render() {
        let mut parent = Node::leaf("t.Parent");
        parent.items = vec![
            Node::leaf("t.Child"),
            Node::leaf("t.Mystery"),
            Node::leaf("t.Child"),
        ];
        let (out, diags) = render(&registry(), &parent);
        assert_eq!(out, "<Parent>\n  <Child/>\n  <Child/>\n</Parent>\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].key, MessageKey::NoDescriptor);
        assert_eq!(diags[0].args, vec!["t.Mystery".to_string(), "items".to_string()]);
    }

    #[test]
    fn test_only_unknown_children_self_close() {
        let mut parent = Node::leaf("t.Parent");
        parent.items = vec![Node::leaf("t.Mystery")];
        let (out, diags) = render(&registry(), &parent);
        assert_eq!(out, "<Parent/>\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].key, MessageKey::NoDescriptor);
        assert_eq!(diags[0].args, vec!["t.Mystery".to_string(), "items".to_string()]);
    }

    #[test]
    fn test_transient_child_is_skipped_silently() {
        let registry = registry();
        registry.register(
            StoreDescription::new("t.Parent", "Parent")
                .child(ChildSpec::new("items"))
                .transient_child("t.Internal"),
        );
        let mut parent = Node::leaf("t.Parent");
        parent.items = vec![Node::leaf("t.Internal")];
        let (out, diags) = render(&registry, &parent);
        assert_eq!(out, "<Parent/>\n");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_missing_declared_collection_is_reported() {
        let registry = StoreRegistry::new();
        registry.register(
            StoreDescription::new("t.Child", "Child")
                .child(ChildSpec::new("widgets"))
                .include("label"),
        );
        let (out, diags) = render(&registry, &Node::leaf("t.Child"));
        assert_eq!(out, "<Child/>\n");
        let keys: Vec<_> = diags.iter().map(|d| (d.key, d.args[1].clone())).collect();
        assert!(keys.contains(&(MessageKey::InvalidSubjectShape, "label".to_string())));
        assert!(keys.contains(&(MessageKey::InvalidSubjectShape, "widgets".to_string())));
    }

    #[test]
    fn test_non_standard_renders_class_name_first() {
        let registry = StoreRegistry::new();
        registry.register(StoreDescription::new("t.Child", "Child").non_standard());
        let mut node = Node::leaf("t.Child");
        node.props = vec![Property::new("name", "x")];
        let (out, _) = render(&registry, &node);
        assert_eq!(out, "<Child className=\"t.Child\" name=\"x\"/>\n");
    }
}
