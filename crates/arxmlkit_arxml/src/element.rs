//! Arena-backed XML element tree built from `quick-xml` events.
//!
//! The tree is built without recursion and stored in a flat `Vec`, so neither
//! parsing nor dropping a document depends on its nesting depth. Names are kept
//! in local form only.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::util::strip_namespace_prefix;

#[derive(Debug, Clone, Default)]
struct XmlNode {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<usize>,
}

/// Parsed document; node `0` is the root element.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    l_nodes: Vec<XmlNode>,
}

/// Borrowed view of one element.
#[derive(Debug, Clone, Copy)]
pub struct XmlElement<'a> {
    doc: &'a XmlDocument,
    idx: usize,
}

impl XmlDocument {
    /// Root element.
    pub fn root(&self) -> XmlElement<'_> {
        XmlElement { doc: self, idx: 0 }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.l_nodes.len()
    }
}

impl<'a> XmlElement<'a> {
    fn node(&self) -> &'a XmlNode {
        &self.doc.l_nodes[self.idx]
    }

    /// Local tag name.
    pub fn tag(&self) -> &'a str {
        &self.node().tag
    }

    /// Attribute value by local name.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.node()
            .attributes
            .iter()
            .find(|(c_key, _)| c_key == name)
            .map(|(_, c_value)| c_value.as_str())
    }

    /// Text before the first child element, untrimmed; empty when absent.
    pub fn text(&self) -> &'a str {
        &self.node().text
    }

    /// Child elements in document order.
    pub fn children(self) -> impl DoubleEndedIterator<Item = XmlElement<'a>> + 'a {
        let doc = self.doc;
        self.node()
            .children
            .iter()
            .map(move |idx| XmlElement { doc, idx: *idx })
    }

    /// First child with local name `tag`.
    pub fn find_child(&self, tag: &str) -> Option<XmlElement<'a>> {
        self.children().find(|child| child.tag() == tag)
    }

    /// All children with local name `tag`, in document order.
    pub fn find_children<'t>(
        self,
        tag: &'t str,
    ) -> impl DoubleEndedIterator<Item = XmlElement<'a>> + 't
    where
        'a: 't,
    {
        self.children().filter(move |child| child.tag() == tag)
    }
}

/// Parse a complete, well-formed XML document held in memory.
pub fn parse_xml_document(v_bytes: &[u8]) -> Result<XmlDocument, String> {
    let mut reader = Reader::from_reader(v_bytes);
    reader.trim_text(false);
    reader.check_end_names(true);

    let mut buf = Vec::new();
    let mut l_nodes: Vec<XmlNode> = Vec::new();
    let mut l_stack_open: Vec<usize> = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|err| format!("XML error at byte {}: {err}", reader.buffer_position()))?;

        match event {
            Event::Start(e) => {
                let n_idx = push_node(&mut l_nodes, &l_stack_open, &e)?;
                l_stack_open.push(n_idx);
            }
            Event::Empty(e) => {
                push_node(&mut l_nodes, &l_stack_open, &e)?;
            }
            Event::End(_) => {
                if l_stack_open.pop().is_none() {
                    return Err(format!(
                        "XML error at byte {}: closing tag without a matching opening tag",
                        reader.buffer_position()
                    ));
                }
            }
            Event::Text(e) => {
                let c_text = e
                    .unescape()
                    .map_err(|err| format!("XML text error: {err}"))?;
                append_text(&mut l_nodes, &l_stack_open, c_text)?;
            }
            Event::CData(e) => {
                let c_text = String::from_utf8(e.into_inner().into_owned())
                    .map_err(|err| format!("CDATA is not valid UTF-8: {err}"))?;
                append_text(&mut l_nodes, &l_stack_open, Cow::Owned(c_text))?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(n_idx) = l_stack_open.last() {
        return Err(format!(
            "Unexpected end of document: <{}> is not closed",
            l_nodes[*n_idx].tag
        ));
    }
    if l_nodes.is_empty() {
        return Err("Document has no root element".to_string());
    }

    Ok(XmlDocument { l_nodes })
}

fn push_node(
    l_nodes: &mut Vec<XmlNode>,
    l_stack_open: &[usize],
    e: &BytesStart<'_>,
) -> Result<usize, String> {
    let n_idx = l_nodes.len();
    match l_stack_open.last() {
        Some(n_idx_parent) => l_nodes[*n_idx_parent].children.push(n_idx),
        None if n_idx > 0 => {
            return Err("Document has more than one root element".to_string());
        }
        None => {}
    }

    let qname = e.name();
    let c_name = decode_utf8(qname.as_ref())?;
    let mut l_attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| format!("XML attribute error: {err}"))?;
        let v_key = attr.key.as_ref();
        if v_key == b"xmlns" || v_key.starts_with(b"xmlns:") {
            continue;
        }
        let c_key = decode_utf8(v_key)?;
        let c_value = attr
            .unescape_value()
            .map_err(|err| format!("XML attribute error: {err}"))?;
        l_attributes.push((
            strip_namespace_prefix(&c_key).to_string(),
            c_value.into_owned(),
        ));
    }

    l_nodes.push(XmlNode {
        tag: strip_namespace_prefix(&c_name).to_string(),
        attributes: l_attributes,
        text: String::new(),
        children: Vec::new(),
    });
    Ok(n_idx)
}

fn append_text(
    l_nodes: &mut [XmlNode],
    l_stack_open: &[usize],
    c_text: Cow<'_, str>,
) -> Result<(), String> {
    let Some(n_idx) = l_stack_open.last() else {
        if c_text.trim().is_empty() {
            return Ok(());
        }
        return Err("Text content outside the root element".to_string());
    };

    let node = &mut l_nodes[*n_idx];
    // Only leading text counts; tails after child elements are dropped.
    if node.children.is_empty() {
        node.text.push_str(&c_text);
    }
    Ok(())
}

fn decode_utf8(v_bytes: &[u8]) -> Result<&str, String> {
    std::str::from_utf8(v_bytes).map_err(|err| format!("Name is not valid UTF-8: {err}"))
}
