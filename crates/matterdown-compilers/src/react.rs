//! Built-in React transpiler.
//!
//! Turns the root-wrapped HTML into a `React.createElement` function
//! component. Custom element tags compile to `props.PascalName || 'tag'` so
//! callers can inject live child components in place of placeholder tags;
//! everything else is plain elements and string children, so code-block
//! contents stay literal.

use matterdown_core::toolchain::{CompileError, ReactCompiler};
use tracing::debug;

use crate::html::{is_blank, js_string, parse_fragment, to_pascal_case, Element, Node};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsxTranspiler;

impl JsxTranspiler {
    pub fn new() -> Self {
        Self
    }
}

impl ReactCompiler for JsxTranspiler {
    fn compile(&self, template: &str) -> Result<String, CompileError> {
        let root = parse_fragment(template)?;
        debug!(tag = %root.tag, "transpiling react component");

        Ok(format!(
            "function (props) {{ return {}; }}",
            gen_element(&root, false)
        ))
    }
}

fn gen_element(element: &Element, parent_in_pre: bool) -> String {
    let in_pre = parent_in_pre || element.tag == "pre";

    let element_type = if element.is_custom() {
        format!(
            "props.{} || '{}'",
            to_pascal_case(&element.tag),
            element.tag
        )
    } else {
        format!("'{}'", element.tag)
    };

    let mut args = vec![element_type, props_object(element)];
    for child in &element.children {
        match child {
            Node::Text(text) if !in_pre && is_blank(text) => {}
            Node::Text(text) => args.push(js_string(text)),
            Node::Element(child) => args.push(gen_element(child, in_pre)),
        }
    }

    format!("React.createElement({})", args.join(", "))
}

/// HTML attributes as React props; `class` and `for` take their DOM prop
/// names.
fn props_object(element: &Element) -> String {
    if element.attributes.is_empty() {
        return "null".to_string();
    }
    let entries: Vec<String> = element
        .attributes
        .iter()
        .map(|(key, value)| {
            let key = match key.as_str() {
                "class" => "className",
                "for" => "htmlFor",
                other => other,
            };
            format!("{}: {}", js_string(key), js_string(value))
        })
        .collect();
    format!("{{{}}}", entries.join(", "))
}
