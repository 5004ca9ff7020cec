//! HTML fragment tree for the compiler backends.
//!
//! Markdown engines emit void elements XML-style (`<br />`, `<img />`), and
//! raw inline HTML may write them HTML-style (`<br>`, `<img src="x">`); both
//! forms read as a childless element. Renderers that emit something else
//! surface their diagnostic through [`CompileError::Html`], unwrapped.

use matterdown_core::toolchain::CompileError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// One node of the rendered fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with its attributes in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Custom elements stand in for framework components: kebab-case tags
    /// and tags starting with an uppercase letter.
    pub fn is_custom(&self) -> bool {
        self.tag.contains('-')
            || self
                .tag
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_uppercase())
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Parse a root-wrapped fragment into its single root element.
pub fn parse_fragment(html: &str) -> Result<Element, CompileError> {
    let mut reader = Reader::from_str(html);
    reader.config_mut().check_end_names = false;

    let mut stack: Vec<Element> = Vec::new();
    let mut roots: Vec<Node> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(start)) => {
                let element = element_from(&start)?;
                // raw inline HTML may write void elements without the
                // self-closing slash
                if is_void(&element.tag) {
                    attach(Node::Element(element), &mut stack, &mut roots);
                } else {
                    stack.push(element);
                }
            }
            Ok(Event::Empty(start)) => {
                let element = element_from(&start)?;
                attach(Node::Element(element), &mut stack, &mut roots);
            }
            Ok(Event::End(_)) => {
                if let Some(element) = stack.pop() {
                    attach(Node::Element(element), &mut stack, &mut roots);
                }
            }
            Ok(Event::Text(text)) => {
                let text = text
                    .unescape()
                    .map_err(|e| CompileError::Html(e.to_string()))?;
                attach(Node::Text(text.into_owned()), &mut stack, &mut roots);
            }
            Ok(Event::CData(cdata)) => {
                let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                attach(Node::Text(text), &mut stack, &mut roots);
            }
            Ok(_) => {}
            Err(e) => return Err(CompileError::Html(e.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(CompileError::Html("unclosed element in fragment".to_string()));
    }

    let mut elements = roots.into_iter().filter_map(|node| match node {
        Node::Element(element) => Some(element),
        Node::Text(_) => None,
    });
    match (elements.next(), elements.next()) {
        (Some(root), None) => Ok(root),
        _ => Err(CompileError::Html(
            "expected a single root element".to_string(),
        )),
    }
}

fn element_from(start: &BytesStart<'_>) -> Result<Element, CompileError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| CompileError::Html(e.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| CompileError::Html(e.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        tag,
        attributes,
        children: Vec::new(),
    })
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

fn attach(node: Node, stack: &mut Vec<Element>, roots: &mut Vec<Node>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// Whitespace-only text between block elements carries no meaning outside
/// `<pre>`.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Encode a string as a JavaScript string literal.
pub fn js_string(s: &str) -> String {
    serde_json::to_string(s).expect("strings always serialize")
}

/// Convert a kebab-case tag to the PascalCase prop name callers use to
/// inject a live component.
pub fn to_pascal_case(s: &str) -> String {
    s.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
