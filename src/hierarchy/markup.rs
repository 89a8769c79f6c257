//! Streaming parse of a uiautomator dump into a node tree.
//!
//! The tree keeps every element of the document, but each [`Node`]'s
//! `children` holds only nested `<node>` elements, which is the child
//! relation of the dump schema. Whether an element had zero, one or many
//! such children, they always end up in one ordered `Vec`.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

use super::element::NodeAttributes;

/// Tag name of the dump schema's child relation.
pub const NODE_TAG: &str = "node";

/// Deepest element nesting accepted. Real dumps stay far below this; the
/// tree is walked and dropped recursively, so depth must stay bounded.
pub const MAX_DEPTH: usize = 512;

/// The markup could not be turned into a tree at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed document at byte {position}: {reason}")]
pub struct MalformedDocument {
    /// Byte offset into the input where parsing stopped.
    pub position: u64,
    pub reason: String,
}

impl MalformedDocument {
    fn new(position: u64, reason: impl Into<String>) -> Self {
        Self {
            position,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub tag: String,
    /// `None` when the element carried no attributes at all.
    pub attributes: Option<NodeAttributes>,
    pub children: Vec<Node>,
}

impl Node {
    fn open(start: &BytesStart<'_>, position: u64) -> Result<Self, MalformedDocument> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut pairs = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| MalformedDocument::new(position, e.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| MalformedDocument::new(position, e.to_string()))?
                .into_owned();
            pairs.push((key, value));
        }

        let attributes = if pairs.is_empty() {
            None
        } else {
            Some(NodeAttributes::from_pairs(pairs))
        };

        Ok(Self {
            tag,
            attributes,
            children: Vec::new(),
        })
    }

    fn adopt(&mut self, child: Node) {
        if child.tag == NODE_TAG {
            self.children.push(child);
        }
    }
}

/// Parse a dump into its root element.
///
/// Fails on empty input, input without a root element, more than one root
/// element, mismatched or unclosed tags, malformed attributes, and nesting
/// deeper than [`MAX_DEPTH`].
pub fn parse(xml: &str) -> Result<Node, MalformedDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|e| MalformedDocument::new(position, e.to_string()))?;

        match event {
            Event::Start(ref e) => {
                if stack.is_empty() && root.is_some() {
                    return Err(MalformedDocument::new(position, "multiple root elements"));
                }
                if stack.len() >= MAX_DEPTH {
                    return Err(MalformedDocument::new(
                        position,
                        format!("elements nested deeper than {} levels", MAX_DEPTH),
                    ));
                }
                stack.push(Node::open(e, position)?);
            }
            Event::Empty(ref e) => {
                let node = Node::open(e, position)?;
                close(&mut stack, &mut root, node, position)?;
            }
            Event::End(_) => {
                let Some(node) = stack.pop() else {
                    return Err(MalformedDocument::new(position, "unexpected closing tag"));
                };
                close(&mut stack, &mut root, node, position)?;
            }
            Event::Text(ref t) if stack.is_empty() => {
                let text = String::from_utf8_lossy(t);
                if !text.trim().is_empty() {
                    return Err(MalformedDocument::new(
                        position,
                        "text outside of the root element",
                    ));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let position = reader.buffer_position() as u64;
    if let Some(open) = stack.last() {
        return Err(MalformedDocument::new(
            position,
            format!("unclosed element <{}>", open.tag),
        ));
    }

    root.ok_or_else(|| MalformedDocument::new(position, "no root element"))
}

fn close(
    stack: &mut [Node],
    root: &mut Option<Node>,
    node: Node,
    position: u64,
) -> Result<(), MalformedDocument> {
    match stack.last_mut() {
        Some(parent) => parent.adopt(node),
        None if root.is_some() => {
            return Err(MalformedDocument::new(position, "multiple root elements"));
        }
        None => *root = Some(node),
    }
    Ok(())
}
