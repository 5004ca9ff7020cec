//! Output mode flags and their resolution into output fields.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// A flag selecting one optional output field.
///
/// String forms are kebab-case: `html`, `body`, `meta`, `vue-component`,
/// `vue-render-functions`, `react`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    Html,
    Body,
    Meta,
    VueComponent,
    VueRenderFunctions,
    React,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Html => "html",
            Mode::Body => "body",
            Mode::Meta => "meta",
            Mode::VueComponent => "vue-component",
            Mode::VueRenderFunctions => "vue-render-functions",
            Mode::React => "react",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(Mode::Html),
            "body" => Ok(Mode::Body),
            "meta" => Ok(Mode::Meta),
            "vue-component" => Ok(Mode::VueComponent),
            "vue-render-functions" => Ok(Mode::VueRenderFunctions),
            "react" => Ok(Mode::React),
            other => Err(ModeError::Unknown(other.to_string())),
        }
    }
}

/// Errors from resolving the requested mode list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModeError {
    #[error("unknown mode: {0}")]
    Unknown(String),

    #[error("vue-component and vue-render-functions modes are mutually exclusive")]
    ConflictingVueModes,
}

/// Which output fields a load must produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outputs {
    pub html: bool,
    pub body: bool,
    pub meta: bool,
    pub vue_render_functions: bool,
    pub vue_component: bool,
    pub react: bool,
}

impl Outputs {
    /// Resolve a mode list. An empty list defaults to HTML only; every other
    /// field is produced only when its flag is explicitly present.
    pub fn resolve(modes: &[Mode]) -> Result<Self, ModeError> {
        let mut outputs = Outputs::default();
        if modes.is_empty() {
            outputs.html = true;
            return Ok(outputs);
        }

        for mode in modes {
            match mode {
                Mode::Html => outputs.html = true,
                Mode::Body => outputs.body = true,
                Mode::Meta => outputs.meta = true,
                Mode::VueComponent => outputs.vue_component = true,
                Mode::VueRenderFunctions => outputs.vue_render_functions = true,
                Mode::React => outputs.react = true,
            }
        }

        if outputs.vue_component && outputs.vue_render_functions {
            return Err(ModeError::ConflictingVueModes);
        }
        Ok(outputs)
    }

    pub fn needs_vue(&self) -> bool {
        self.vue_render_functions || self.vue_component
    }

    /// Framework artifacts compile from the rendered HTML, so the markdown
    /// render runs for them even when `html` itself is not exposed.
    pub fn needs_render(&self) -> bool {
        self.html || self.react || self.needs_vue()
    }
}
