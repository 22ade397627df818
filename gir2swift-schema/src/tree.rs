//! Owned XML element tree.
//!
//! The loader never touches the tokenizer directly; it walks the tree built
//! here. Each element keeps its tag, attributes, child elements and the
//! concatenated (trimmed) character data found directly inside it.

use crate::error::ParseError;
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use std::collections::BTreeMap;
use std::path::Path;

/// One element of a parsed XML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Qualified tag name, including any namespace prefix (`glib:signal`).
    pub tag: String,
    /// Attributes by qualified name (`c:type`).
    pub attributes: BTreeMap<String, String>,
    /// Child elements in document order.
    pub children: Vec<XmlNode>,
    /// Trimmed character data directly inside this element.
    pub text: String,
}

impl XmlNode {
    /// Creates an element with no attributes, children or text.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the character data.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Returns a non-empty attribute value, or the first of `keys` that is set.
    #[must_use]
    pub fn first_attr(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|key| self.attr(key))
            .find(|value| !value.is_empty())
    }

    /// Returns a required, non-empty attribute value.
    ///
    /// # Errors
    /// Returns `ParseError::MissingAttribute` if the attribute is absent or empty.
    pub fn required_attr(&self, key: &str) -> Result<&str, ParseError> {
        self.attr(key)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ParseError::missing_attr(&self.tag, key))
    }

    /// Returns the first child element with the given tag.
    #[must_use]
    pub fn child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Iterates over child elements with the given tag.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.tag == tag)
    }
}

/// Parses an XML document into its root element.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed or has no single root element.
pub fn parse_document(xml: &str) -> Result<XmlNode, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => stack.push(start_node(e)?),
            Ok(Event::Empty(ref e)) => {
                let node = start_node(e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::End(_)) => {
                let mut node = stack
                    .pop()
                    .ok_or_else(|| ParseError::invalid_structure("unbalanced end tag"))?;
                let trimmed = node.text.trim();
                if trimmed.len() != node.text.len() {
                    node.text = trimmed.to_string();
                }
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Text(ref t)) => {
                if let Some(top) = stack.last_mut() {
                    let raw = std::str::from_utf8(t.as_ref())?;
                    top.text.push_str(&unescape(raw)?);
                }
            }
            Ok(Event::CData(ref c)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(std::str::from_utf8(c.as_ref())?);
                }
            }
            Ok(Event::GeneralRef(ref r)) => {
                if let Some(top) = stack.last_mut() {
                    let name = std::str::from_utf8(r.as_ref())?;
                    top.text.push_str(&unescape(&format!("&{name};"))?);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::invalid_structure(format!(
            "unclosed element '{}'",
            open.tag
        )));
    }

    root.ok_or_else(|| ParseError::invalid_structure("no root element found"))
}

/// Reads and parses an XML document from disk.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_file(path: &Path) -> Result<XmlNode, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_document(&xml)
}

/// Builds an element from a start or empty tag.
fn start_node(e: &BytesStart<'_>) -> Result<XmlNode, ParseError> {
    let name_bytes = e.name().as_ref().to_vec();
    let mut node = XmlNode::new(std::str::from_utf8(&name_bytes)?);

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        node.attributes
            .insert(key.to_string(), unescape(value)?.into_owned());
    }

    Ok(node)
}

/// Attaches a completed element to its parent, or makes it the root.
fn attach(
    stack: &mut [XmlNode],
    root: &mut Option<XmlNode>,
    node: XmlNode,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(ParseError::invalid_structure(format!(
            "unexpected second root element '{}'",
            node.tag
        )));
    }
    *root = Some(node);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_document() {
        let xml = r#"<?xml version="1.0"?>
<repository version="1.2">
  <namespace name="Gtk">
    <alias name="Allocation" c:type="GtkAllocation">
      <doc xml:space="preserve">A rectangle.</doc>
      <type name="Gdk.Rectangle" c:type="GdkRectangle"/>
    </alias>
  </namespace>
</repository>"#;

        let root = parse_document(xml).expect("Failed to parse");
        assert_eq!(root.tag, "repository");
        assert_eq!(root.attr("version"), Some("1.2"));

        let ns = root.child("namespace").expect("namespace");
        let alias = ns.child("alias").expect("alias");
        assert_eq!(alias.attr("c:type"), Some("GtkAllocation"));
        assert_eq!(alias.child("doc").map(|d| d.text.as_str()), Some("A rectangle."));
        assert_eq!(alias.children.len(), 2);
        assert!(alias.text.is_empty());
    }

    #[test]
    fn test_entities_are_resolved() {
        let xml = r#"<doc title="a &amp; b">x &lt; y &#65;</doc>"#;
        let root = parse_document(xml).expect("Failed to parse");
        assert_eq!(root.attr("title"), Some("a & b"));
        assert_eq!(root.text, "x < y A");
    }

    #[test]
    fn test_multiline_text_keeps_inner_breaks() {
        let xml = "<doc>\n  first line\nsecond line\n</doc>";
        let root = parse_document(xml).expect("Failed to parse");
        assert_eq!(root.text, "first line\nsecond line");
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let err = parse_document("<?xml version=\"1.0\"?>").unwrap_err();
        assert!(matches!(err, ParseError::InvalidStructure { .. }));
    }

    #[test]
    fn test_required_attr() {
        let node = XmlNode::new("record").with_attr("name", "");
        assert!(matches!(
            node.required_attr("name"),
            Err(ParseError::MissingAttribute { .. })
        ));

        let node = XmlNode::new("record").with_attr("name", "Widget");
        assert_eq!(node.required_attr("name").expect("name"), "Widget");
    }

    #[test]
    fn test_first_attr_skips_empty_values() {
        let node = XmlNode::new("function")
            .with_attr("c:identifier", "")
            .with_attr("c:type", "gtk_init");
        assert_eq!(node.first_attr(&["c:identifier", "c:type"]), Some("gtk_init"));
        assert_eq!(node.first_attr(&["missing"]), None);
    }
}
