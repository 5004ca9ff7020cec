//! Serialization of the computed result into importable module source.
//!
//! Data fields are JSON; render functions and the React component are
//! spliced in as live code so the emitted module exposes real callables,
//! not serialized descriptions of them.

use std::path::PathBuf;

use serde_json::Value;

use crate::toolchain::VueArtifact;

/// The final artifact of a load, before serialization. Constructed fresh on
/// every invocation; every field except `attributes` follows the mode set.
#[derive(Debug, Clone)]
pub struct OutputModule {
    pub attributes: Value,
    pub html: Option<String>,
    pub body: Option<String>,
    pub meta: Option<Meta>,
    pub vue: Option<VueField>,
    pub react: Option<String>,
}

/// File metadata exposed under the `meta` field.
#[derive(Debug, Clone)]
pub struct Meta {
    pub resource_path: PathBuf,
}

/// Shape of the `vue` field, one per sub-mode.
#[derive(Debug, Clone)]
pub enum VueField {
    /// `{ render, staticRenderFns }`
    RenderFunctions(VueArtifact),

    /// `{ component: { render, staticRenderFns } }`, meant for `extends`.
    Component(VueArtifact),
}

/// Emit the module as CommonJS source.
pub fn emit(module: &OutputModule) -> String {
    let mut fields = Vec::new();

    fields.push(format!("attributes: {}", json(&module.attributes)));
    if let Some(html) = &module.html {
        fields.push(format!("html: {}", js_string(html)));
    }
    if let Some(body) = &module.body {
        fields.push(format!("body: {}", js_string(body)));
    }
    if let Some(meta) = &module.meta {
        fields.push(format!(
            "meta: {{\n    resourcePath: {}\n  }}",
            js_string(&meta.resource_path.display().to_string())
        ));
    }
    if let Some(vue) = &module.vue {
        fields.push(emit_vue(vue));
    }
    if let Some(react) = &module.react {
        fields.push(format!("react: {react}"));
    }

    let prelude = if module.react.is_some() {
        "const React = require('react');\n\n"
    } else {
        ""
    };

    format!("{prelude}module.exports = {{\n  {}\n}};\n", fields.join(",\n  "))
}

fn emit_vue(vue: &VueField) -> String {
    match vue {
        VueField::RenderFunctions(artifact) => {
            format!("vue: {}", render_functions_object(artifact, "  "))
        }
        VueField::Component(artifact) => format!(
            "vue: {{\n    component: {}\n  }}",
            render_functions_object(artifact, "    ")
        ),
    }
}

fn render_functions_object(artifact: &VueArtifact, indent: &str) -> String {
    format!(
        "{{\n{indent}  render: {},\n{indent}  staticRenderFns: [{}]\n{indent}}}",
        artifact.render,
        artifact.static_render_fns.join(", ")
    )
}

fn json(value: &Value) -> String {
    serde_json::to_string(value).expect("JSON values always serialize")
}

fn js_string(s: &str) -> String {
    serde_json::to_string(s).expect("strings always serialize")
}
