//! Tree-based document serializer.
//!
//! Rendering happens in two steps. The caller's build function fills an
//! in-memory [`Element`] tree through an [`Emitter`]; only when it returns `Ok`
//! is the tree handed back as a [`Document`], which writes XML on demand. A
//! failing build never yields a document.

use core::fmt;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use feedforge_core::{FeedError, FeedResult, Scalar, UnitPair};

use crate::tag::{validate_tag, validate_text};

/// How a [`Document`] is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Pretty-print with this many spaces per level. `None` writes compactly.
    pub indent: Option<usize>,
    /// Prefix the output with `<?xml version="1.0" encoding="UTF-8"?>`.
    pub xml_declaration: bool,
}

/// One node of a rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf { tag: String, text: String },
    Element(Element),
}

impl Node {
    pub fn tag(&self) -> &str {
        match self {
            Node::Leaf { tag, .. } => tag,
            Node::Element(element) => element.tag(),
        }
    }
}

/// A non-leaf node and its children, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    children: Vec<Node>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// First child element named `tag`.
    pub fn element(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find_map(|node| match node {
            Node::Element(element) if element.tag == tag => Some(element),
            _ => None,
        })
    }

    /// Text of every leaf named `tag`, in order.
    pub fn leaf_texts(&self, tag: &str) -> Vec<&str> {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Leaf { tag: t, text } if t == tag => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Text of the first leaf named `tag`.
    pub fn leaf_text(&self, tag: &str) -> Option<&str> {
        self.leaf_texts(tag).into_iter().next()
    }
}

/// Emission context scoped to one element.
///
/// Children are appended in call order. [`Emitter::emit_scoped`] hands the
/// nested build function an emitter for the new child; the parent becomes
/// current again when that function returns, whether it succeeded or not.
pub struct Emitter<'a> {
    node: &'a mut Element,
}

impl Emitter<'_> {
    /// Append a leaf. Money, distance and weight values are written as unit
    /// nodes (see [`Emitter::emit_unit`]).
    pub fn emit(&mut self, tag: &str, value: impl Into<Scalar>) -> FeedResult<()> {
        match value.into() {
            Scalar::Money(money) => self.emit_unit(tag, &money),
            Scalar::Distance(distance) => self.emit_unit(tag, &distance),
            Scalar::Weight(weight) => self.emit_unit(tag, &weight),
            scalar => {
                validate_tag(tag)?;
                let text = scalar.to_text();
                validate_text(tag, &text)?;
                trace!(tag, "emit leaf");
                self.node.children.push(Node::Leaf {
                    tag: tag.to_string(),
                    text,
                });
                Ok(())
            }
        }
    }

    /// Append a leaf when `value` is present; `None` emits nothing.
    pub fn emit_opt<T: Into<Scalar>>(&mut self, tag: &str, value: Option<T>) -> FeedResult<()> {
        match value {
            Some(value) => self.emit(tag, value),
            None => Ok(()),
        }
    }

    /// Append one leaf per item, all under the same tag.
    pub fn emit_each<I>(&mut self, tag: &str, items: I) -> FeedResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Scalar>,
    {
        items.into_iter().try_for_each(|item| self.emit(tag, item))
    }

    /// Append `<tag><Value>amount</Value><Unit>unit</Unit></tag>`
    /// (`Currency` instead of `Unit` for money).
    pub fn emit_unit<U: UnitPair>(&mut self, tag: &str, value: &U) -> FeedResult<()> {
        self.emit_scoped(tag, |e| {
            e.emit("Value", value.amount_text())?;
            e.emit(value.unit_tag(), value.unit_text())
        })
    }

    /// Append a child element and populate it through `build`.
    ///
    /// The child is attached only if `build` succeeds.
    pub fn emit_scoped<F>(&mut self, tag: &str, build: F) -> FeedResult<()>
    where
        F: FnOnce(&mut Emitter<'_>) -> FeedResult<()>,
    {
        validate_tag(tag)?;
        trace!(tag, "enter scoped node");
        let mut child = Element::new(tag);
        build(&mut Emitter { node: &mut child })?;
        self.node.children.push(Node::Element(child));
        Ok(())
    }
}

/// Entry point: builds a [`Document`] from a root name and a build function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSerializer {
    options: RenderOptions,
}

impl DocumentSerializer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Run `build` against an emitter for a fresh `root` element.
    ///
    /// All or nothing: any error from `build` (or an invalid root tag) is
    /// returned and no document exists.
    #[instrument(level = "debug", skip(self, build))]
    pub fn render<F>(&self, root: &str, build: F) -> FeedResult<Document>
    where
        F: FnOnce(&mut Emitter<'_>) -> FeedResult<()>,
    {
        validate_tag(root)?;
        let mut element = Element::new(root);
        build(&mut Emitter { node: &mut element })?;
        Ok(Document {
            root: element,
            options: self.options,
        })
    }
}

/// A fully built document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
    options: RenderOptions,
}

impl Document {
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Same tree, written with different options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Same tree, with or without the XML declaration.
    pub fn with_declaration(mut self, xml_declaration: bool) -> Self {
        self.options.xml_declaration = xml_declaration;
        self
    }

    /// Write the document as XML text.
    pub fn to_xml_string(&self) -> FeedResult<String> {
        write_document(&self.root, self.options)
    }

    /// Write the document indented by `indent` spaces per level, whatever the
    /// configured options say.
    pub fn to_pretty_xml(&self, indent: usize) -> FeedResult<String> {
        let options = RenderOptions {
            indent: Some(indent),
            ..self.options
        };
        write_document(&self.root, options)
    }
}

fn write_document(root: &Element, options: RenderOptions) -> FeedResult<String> {
    let mut writer = match options.indent {
        Some(width) => Writer::new_with_indent(Vec::new(), b' ', width),
        None => Writer::new(Vec::new()),
    };
    if options.xml_declaration {
        write_event(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
    }
    write_element(&mut writer, root)?;
    String::from_utf8(writer.into_inner())
        .map_err(|e| FeedError::serialization(format!("document is not UTF-8: {e}")))
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = self.to_xml_string().map_err(|_| fmt::Error)?;
        f.write_str(&xml)
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> FeedResult<()> {
    write_event(writer, Event::Start(BytesStart::new(element.tag.as_str())))?;
    for child in &element.children {
        match child {
            Node::Leaf { tag, text } => {
                write_event(writer, Event::Start(BytesStart::new(tag.as_str())))?;
                write_event(writer, Event::Text(BytesText::new(text)))?;
                write_event(writer, Event::End(BytesEnd::new(tag.as_str())))?;
            }
            Node::Element(nested) => write_element(writer, nested)?,
        }
    }
    write_event(writer, Event::End(BytesEnd::new(element.tag.as_str())))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> FeedResult<()> {
    writer
        .write_event(event)
        .map_err(|e| FeedError::serialization(format!("xml writer failed: {e}")))
}
