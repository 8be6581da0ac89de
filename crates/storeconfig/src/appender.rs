// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Low-level markup writer.
//!
//! [`StoreAppender`] owns no tree knowledge: strategies hand it tag names,
//! attributes and text, it handles indentation and escaping. Every call writes
//! straight through to the destination.

use std::io::{self, Write};

/// Default number of spaces per nesting level.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// A rendered attribute (name plus already formatted value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Writes tags, attributes and text to a destination stream.
pub struct StoreAppender<'a> {
    out: &'a mut dyn Write,
    indent_width: usize,
    bytes_written: u64,
}

impl<'a> StoreAppender<'a> {
    /// Create an appender with the default indent width.
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self::with_indent_width(out, DEFAULT_INDENT_WIDTH)
    }

    /// Create an appender with `width` spaces per nesting level.
    pub fn with_indent_width(out: &'a mut dyn Write, width: usize) -> Self {
        Self {
            out,
            indent_width: width,
            bytes_written: 0,
        }
    }

    /// Total bytes handed to the destination so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// `<?xml version="1.0" encoding="..."?>` followed by a newline.
    pub fn print_xml_declaration(&mut self, encoding: &str) -> io::Result<()> {
        let line = format!(
            "<?xml version=\"1.0\" encoding=\"{}\"?>\n",
            escape_attribute(encoding)
        );
        self.write_str(&line)
    }

    /// Indentation for nesting level `indent`.
    pub fn print_indent(&mut self, indent: usize) -> io::Result<()> {
        let pad = " ".repeat(indent * self.indent_width);
        self.write_str(&pad)
    }

    /// `<tag attrs...>` for an element that will hold nested content.
    pub fn print_open_tag(
        &mut self,
        tag: &str,
        indent: usize,
        attributes: &[Attribute],
    ) -> io::Result<()> {
        self.print_start(tag, indent, attributes)?;
        self.write_str(">\n")
    }

    /// `</tag>` matching a previous [`print_open_tag`](Self::print_open_tag).
    pub fn print_close_tag(&mut self, tag: &str, indent: usize) -> io::Result<()> {
        self.print_indent(indent)?;
        self.write_str(&format!("</{}>\n", tag))
    }

    /// Self-closing `<tag attrs.../>`.
    pub fn print_tag(&mut self, tag: &str, indent: usize, attributes: &[Attribute]) -> io::Result<()> {
        self.print_start(tag, indent, attributes)?;
        self.write_str("/>\n")
    }

    /// `<tag>text</tag>` with escaped text and no attributes.
    pub fn print_tag_content(&mut self, tag: &str, indent: usize, text: &str) -> io::Result<()> {
        self.print_indent(indent)?;
        self.write_str(&format!("<{tag}>{}</{tag}>\n", escape_xml(text)))
    }

    /// One `<tag>value</tag>` per element. Empty input writes nothing.
    pub fn print_tag_array<S: AsRef<str>>(
        &mut self,
        tag: &str,
        indent: usize,
        values: &[S],
    ) -> io::Result<()> {
        for value in values {
            self.print_tag_content(tag, indent, value.as_ref())?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn print_start(&mut self, tag: &str, indent: usize, attributes: &[Attribute]) -> io::Result<()> {
        self.print_indent(indent)?;
        let mut line = String::with_capacity(tag.len() + 1 + attributes.len() * 16);
        line.push('<');
        line.push_str(tag);
        for attr in attributes {
            line.push(' ');
            line.push_str(&attr.name);
            line.push_str("=\"");
            line.push_str(&escape_attribute(&attr.value));
            line.push('"');
        }
        self.write_str(&line)
    }

    fn write_str(&mut self, s: &str) -> io::Result<()> {
        if s.is_empty() {
            return Ok(());
        }
        self.out.write_all(s.as_bytes())?;
        self.bytes_written += s.len() as u64;
        Ok(())
    }
}

/// Escape text content.
///
/// | Character | Escaped |
/// |-----------|---------|
/// | `&` | `&amp;` |
/// | `<` | `&lt;` |
/// | `>` | `&gt;` |
/// | `"` | `&quot;` |
/// | `'` | `&apos;` |
/// | `\r` | `&#13;` |
///
/// A raw carriage return would be folded into the following newline when the
/// document is read back.
pub fn escape_xml(value: &str) -> String {
    escape(value, false)
}

/// Escape an attribute value: everything [`escape_xml`] escapes plus tab and
/// newline (`&#9;`, `&#10;`), which attribute-value normalization would
/// otherwise turn into spaces.
pub fn escape_attribute(value: &str) -> String {
    escape(value, true)
}

fn escape(value: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' if attribute => escaped.push_str("&#9;"),
            '\n' if attribute => escaped.push_str("&#10;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut StoreAppender<'_>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        {
            let mut appender = StoreAppender::new(&mut buf);
            f(&mut appender).unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_xml_escaping() {
        assert_eq!(
            escape_xml("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &apos;Jerry&apos;&lt;/a&gt;"
        );
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_whitespace_escaping() {
        assert_eq!(escape_attribute("%h\t%r\r\nx"), "%h&#9;%r&#13;&#10;x");
        assert_eq!(escape_xml("a\r\nb\tc"), "a&#13;\nb\tc");
    }

    #[test]
    fn test_print_tag_self_closing() {
        let out = render(|a| {
            a.print_tag(
                "Connector",
                2,
                &[Attribute::new("port", "8080"), Attribute::new("protocol", "HTTP/1.1")],
            )
        });
        assert_eq!(out, "    <Connector port=\"8080\" protocol=\"HTTP/1.1\"/>\n");
    }

    #[test]
    fn test_open_close_pair() {
        let out = render(|a| {
            a.print_open_tag("Service", 1, &[Attribute::new("name", "Catalina")])?;
            a.print_close_tag("Service", 1)
        });
        assert_eq!(out, "  <Service name=\"Catalina\">\n  </Service>\n");
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let out = render(|a| a.print_tag("Valve", 0, &[Attribute::new("pattern", "%h \"%r\" & <x>")]));
        assert_eq!(out, "<Valve pattern=\"%h &quot;%r&quot; &amp; &lt;x&gt;\"/>\n");
    }

    #[test]
    fn test_tag_array_repeats_simple_tags() {
        let out = render(|a| a.print_tag_array("WatchedResource", 1, &["WEB-INF/web.xml", "a&b"]));
        assert_eq!(
            out,
            "  <WatchedResource>WEB-INF/web.xml</WatchedResource>\n  <WatchedResource>a&amp;b</WatchedResource>\n"
        );
    }

    #[test]
    fn test_empty_tag_array_writes_nothing() {
        let mut buf = Vec::new();
        let mut appender = StoreAppender::new(&mut buf);
        let empty: [&str; 0] = [];
        appender.print_tag_array("WrapperLifecycle", 3, &empty).unwrap();
        assert_eq!(appender.bytes_written(), 0);
        drop(appender);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_indent_width_is_constant_per_level() {
        let mut buf = Vec::new();
        {
            let mut appender = StoreAppender::with_indent_width(&mut buf, 4);
            appender.print_tag("A", 0, &[]).unwrap();
            appender.print_tag("B", 1, &[]).unwrap();
            appender.print_tag("C", 2, &[]).unwrap();
        }
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "<A/>\n    <B/>\n        <C/>\n");
    }

    #[test]
    fn test_xml_declaration() {
        let out = render(|a| a.print_xml_declaration("UTF-8"));
        assert_eq!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }
}
