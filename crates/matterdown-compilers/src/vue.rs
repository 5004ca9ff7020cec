//! Built-in Vue template compiler.
//!
//! Compiles the root-wrapped HTML into the runtime helper calls a Vue 2
//! component expects: a `render` function built from `_c`/`_v` calls, with
//! fully static top-level subtrees hoisted into `staticRenderFns` and
//! referenced through `_vm._m(i)`. Text nodes become string literals, so
//! template-expression-like text inside code blocks is never evaluated.

use matterdown_core::options::AssetUrlPolicy;
use matterdown_core::toolchain::{CompileError, VueArtifact, VueCompiler};
use tracing::debug;

use crate::html::{is_blank, js_string, parse_fragment, Element, Node};

#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCompiler;

impl TemplateCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl VueCompiler for TemplateCompiler {
    fn compile_render_functions(&self, template: &str) -> Result<VueArtifact, CompileError> {
        compile(template, &AssetUrlPolicy::Disabled)
    }

    fn compile_component(
        &self,
        template: &str,
        assets: &AssetUrlPolicy,
    ) -> Result<VueArtifact, CompileError> {
        compile(template, assets)
    }
}

fn compile(template: &str, assets: &AssetUrlPolicy) -> Result<VueArtifact, CompileError> {
    let root = parse_fragment(template)?;
    debug!(tag = %root.tag, "compiling vue template");

    let mut statics = Vec::new();
    let mut children = Vec::new();
    for child in &root.children {
        match child {
            Node::Text(text) if is_blank(text) => {}
            Node::Text(text) => children.push(format!("_vm._v({})", js_string(text))),
            Node::Element(element) if is_static(element, assets) => {
                statics.push(wrap_fn(&gen_element(element, assets, false)));
                children.push(format!("_vm._m({})", statics.len() - 1));
            }
            Node::Element(element) => children.push(gen_element(element, assets, false)),
        }
    }

    let render = wrap_fn(&element_expr(&root.tag, data_object(&root, assets), &children));

    Ok(VueArtifact {
        render,
        static_render_fns: statics,
    })
}

fn wrap_fn(expr: &str) -> String {
    format!(
        "function () {{ var _vm=this;var _h=_vm.$createElement;var _c=_vm._self._c||_h;return {expr} }}"
    )
}

fn gen_element(element: &Element, assets: &AssetUrlPolicy, parent_in_pre: bool) -> String {
    let in_pre = parent_in_pre || element.tag == "pre";

    let children: Vec<String> = element
        .children
        .iter()
        .filter_map(|child| match child {
            Node::Text(text) if !in_pre && is_blank(text) => None,
            Node::Text(text) => Some(format!("_vm._v({})", js_string(text))),
            Node::Element(child) => Some(gen_element(child, assets, in_pre)),
        })
        .collect();

    element_expr(&element.tag, data_object(element, assets), &children)
}

fn element_expr(tag: &str, data: Option<String>, children: &[String]) -> String {
    let mut expr = format!("_c('{tag}'");
    if let Some(data) = data {
        expr.push(',');
        expr.push_str(&data);
    }
    if !children.is_empty() {
        expr.push_str(",[");
        expr.push_str(&children.join(","));
        expr.push(']');
    }
    expr.push(')');
    expr
}

/// The VNode data object: `class` becomes `staticClass`, everything else
/// lands under `attrs`, with recognized asset URLs rewritten to `require`
/// expressions.
fn data_object(element: &Element, assets: &AssetUrlPolicy) -> Option<String> {
    let asset_attrs = assets.attributes_for(&element.tag);

    let mut static_class = None;
    let mut attrs = Vec::new();
    for (key, value) in &element.attributes {
        if key == "class" {
            static_class = Some(value.as_str());
            continue;
        }
        let rewritten = asset_attrs
            .filter(|list| list.iter().any(|attr| attr == key))
            .and_then(|_| asset_require(value));
        attrs.push(format!(
            "{}:{}",
            js_string(key),
            rewritten.unwrap_or_else(|| js_string(value))
        ));
    }

    let mut parts = Vec::new();
    if let Some(class) = static_class {
        parts.push(format!("staticClass:{}", js_string(class)));
    }
    if !attrs.is_empty() {
        parts.push(format!("attrs:{{{}}}", attrs.join(",")));
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!("{{{}}}", parts.join(",")))
    }
}

/// Local asset references become host-build `require` calls. Absolute URLs,
/// fragments and anything carrying a scheme stay as authored.
fn asset_require(value: &str) -> Option<String> {
    if value.is_empty() || value.starts_with('/') || value.starts_with('#') || value.contains(':') {
        return None;
    }
    let path = if value.starts_with("./") || value.starts_with("../") {
        value.to_string()
    } else {
        format!("./{value}")
    };
    Some(format!("require({})", js_string(&path)))
}

/// A subtree is static when nothing in it resolves at runtime: no component
/// tags, no rewritten asset URLs.
fn is_static(element: &Element, assets: &AssetUrlPolicy) -> bool {
    if element.is_custom() {
        return false;
    }
    if let Some(attrs) = assets.attributes_for(&element.tag) {
        let rewritten = element
            .attributes
            .iter()
            .any(|(key, value)| attrs.iter().any(|attr| attr == key) && asset_require(value).is_some());
        if rewritten {
            return false;
        }
    }
    element.children.iter().all(|child| match child {
        Node::Text(_) => true,
        Node::Element(child) => is_static(child, assets),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compile_default(template: &str) -> VueArtifact {
        TemplateCompiler::new()
            .compile_render_functions(template)
            .unwrap()
    }

    #[test]
    fn hoists_static_children_into_static_render_fns() {
        let artifact =
            compile_default("<div class=\"frontmatter-markdown\"><h1>Title</h1></div>");

        assert!(artifact
            .render
            .contains("_c('div',{staticClass:\"frontmatter-markdown\"},[_vm._m(0)])"));
        assert_eq!(artifact.static_render_fns.len(), 1);
        assert!(artifact.static_render_fns[0].contains("_c('h1',[_vm._v(\"Title\")])"));
    }

    #[test]
    fn custom_elements_stay_in_the_render_function() {
        let artifact = compile_default(
            "<div class=\"x\"><p>hi</p><child-component></child-component></div>",
        );

        assert!(artifact.render.contains("_c('child-component')"));
        // the static sibling is still hoisted
        assert!(artifact.render.contains("_vm._m(0)"));
        assert_eq!(artifact.static_render_fns.len(), 1);
    }

    #[test]
    fn code_block_text_is_a_literal() {
        let artifact = compile_default(
            "<div class=\"x\"><pre><code class=\"language-html\">{{ I shouldn't be evaluated }}\n</code></pre></div>",
        );

        let all = format!("{}{}", artifact.render, artifact.static_render_fns.join(""));
        assert!(all.contains("_vm._v(\"{{ I shouldn't be evaluated }}\\n\")"));
    }

    #[test]
    fn component_mode_rewrites_asset_urls() {
        let artifact = TemplateCompiler::new()
            .compile_component(
                "<div class=\"x\"><p><img src=\"./avatar.png\" alt=\"me\" /></p></div>",
                &AssetUrlPolicy::builtin(),
            )
            .unwrap();

        assert!(artifact
            .render
            .contains("attrs:{\"src\":require(\"./avatar.png\"),\"alt\":\"me\"}"));
        // a rewritten subtree cannot be hoisted
        assert!(artifact.static_render_fns.is_empty());
    }

    #[test]
    fn bare_relative_urls_gain_a_leading_dot_segment() {
        let artifact = TemplateCompiler::new()
            .compile_component(
                "<div class=\"x\"><img src=\"avatar.png\" /></div>",
                &AssetUrlPolicy::builtin(),
            )
            .unwrap();

        assert!(artifact.render.contains("require(\"./avatar.png\")"));
    }

    #[test]
    fn disabled_policy_leaves_urls_as_authored() {
        let artifact = TemplateCompiler::new()
            .compile_component(
                "<div class=\"x\"><img src=\"./avatar.png\" /></div>",
                &AssetUrlPolicy::Disabled,
            )
            .unwrap();

        let all = format!("{}{}", artifact.render, artifact.static_render_fns.join(""));
        assert!(all.contains("\"src\":\"./avatar.png\""));
        assert!(!all.contains("require("));
    }

    #[test]
    fn absolute_and_scheme_urls_are_never_rewritten() {
        let artifact = TemplateCompiler::new()
            .compile_component(
                "<div class=\"x\"><img src=\"https://example.com/a.png\" /><img src=\"/a.png\" /></div>",
                &AssetUrlPolicy::builtin(),
            )
            .unwrap();

        let all = format!("{}{}", artifact.render, artifact.static_render_fns.join(""));
        assert!(!all.contains("require("));
    }

    #[test]
    fn render_functions_mode_never_rewrites_assets() {
        let artifact =
            compile_default("<div class=\"x\"><img src=\"./avatar.png\" /></div>");

        let all = format!("{}{}", artifact.render, artifact.static_render_fns.join(""));
        assert!(all.contains("\"src\":\"./avatar.png\""));
    }

    #[test]
    fn whitespace_between_blocks_is_dropped_but_kept_in_pre() {
        let artifact = compile_default(
            "<div class=\"x\"><p>a</p>\n<pre>  keep\n</pre></div>",
        );

        let all = format!("{}{}", artifact.render, artifact.static_render_fns.join(""));
        assert!(!all.contains("_vm._v(\"\\n\")"));
        assert!(all.contains("_vm._v(\"  keep\\n\")"));
    }
}
