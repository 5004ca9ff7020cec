//! The load pipeline: split, render, compile, assemble.

use std::path::PathBuf;

use tracing::debug;

use crate::assemble::{self, Meta, OutputModule, VueField};
use crate::frontmatter::{split_document, FrontmatterError};
use crate::markdown::{Engine, EngineConfig, MarkdownRenderer};
use crate::mode::{ModeError, Outputs};
use crate::options::{LoaderOptions, OptionsError};
use crate::toolchain::{CompileError, ToolchainError, Toolchains};

/// Per-file information supplied by the host build tool.
#[derive(Debug, Clone)]
pub struct Context {
    /// Path of the file being loaded, exposed under `meta.resourcePath`.
    pub resource_path: PathBuf,

    /// Whether the host may cache the result. Informational only.
    pub cachable: bool,
}

impl Context {
    pub fn new(resource_path: impl Into<PathBuf>) -> Self {
        Self {
            resource_path: resource_path.into(),
            cachable: true,
        }
    }
}

/// Everything that can abort a load. Upstream diagnostics pass through
/// transparently; no failure produces a partial module.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),

    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Mode(#[from] ModeError),

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("frontmatter attributes are not representable as JSON: {0}")]
    Attributes(#[from] serde_json::Error),
}

/// A configured loader. Each [`Loader::load`] call is a pure function of
/// (source text, context); the options and toolchains are fixed at
/// construction and validated up front.
pub struct Loader {
    options: LoaderOptions,
    outputs: Outputs,
    toolchains: Toolchains,
}

impl Loader {
    /// Validate options and resolve the mode set. Conflicting markdown
    /// options and conflicting Vue modes fail here, before any document is
    /// seen.
    pub fn new(options: LoaderOptions) -> Result<Self, LoadError> {
        if options.markdown.is_some() && options.engine.is_some() {
            return Err(OptionsError::ConflictingMarkdown.into());
        }
        let outputs = Outputs::resolve(&options.mode)?;

        Ok(Self {
            options,
            outputs,
            toolchains: Toolchains::empty(),
        })
    }

    /// Install compiler toolchains. Only consulted when a Vue or React mode
    /// is requested.
    pub fn with_toolchains(mut self, toolchains: Toolchains) -> Self {
        self.toolchains = toolchains;
        self
    }

    /// The output fields this loader produces.
    pub fn outputs(&self) -> Outputs {
        self.outputs
    }

    /// Transform one source document into importable module source.
    pub fn load(&self, source: &str, context: &Context) -> Result<String, LoadError> {
        let document = split_document(source)?;
        debug!(
            path = %context.resource_path.display(),
            outputs = ?self.outputs,
            "loading frontmatter markdown"
        );

        // Vue and React compile from the rendered HTML even when the html
        // field itself is not exposed.
        let html = self
            .outputs
            .needs_render()
            .then(|| self.render(&document.body));

        let vue = if self.outputs.needs_vue() {
            let compiler = self.toolchains.vue()?;
            let template = wrap_root(html.as_deref().unwrap_or(""), &self.options.vue.root);
            if self.outputs.vue_render_functions {
                let artifact = compiler.compile_render_functions(&template)?;
                Some(VueField::RenderFunctions(artifact))
            } else {
                let artifact =
                    compiler.compile_component(&template, &self.options.vue.transform_asset_urls)?;
                Some(VueField::Component(artifact))
            }
        } else {
            None
        };

        let react = if self.outputs.react {
            let compiler = self.toolchains.react()?;
            let template = wrap_root(html.as_deref().unwrap_or(""), &self.options.react.root);
            Some(compiler.compile(&template)?)
        } else {
            None
        };

        let module = OutputModule {
            attributes: serde_json::to_value(&document.attributes)?,
            html: if self.outputs.html { html } else { None },
            body: self.outputs.body.then(|| document.body.clone()),
            meta: self.outputs.meta.then(|| Meta {
                resource_path: context.resource_path.clone(),
            }),
            vue,
            react,
        };

        Ok(assemble::emit(&module))
    }

    fn render(&self, body: &str) -> String {
        if let Some(render) = &self.options.markdown {
            return render(body);
        }
        match &self.options.engine {
            Some(EngineConfig::Instance(renderer)) => renderer.render(body),
            Some(EngineConfig::Options(options)) => Engine::new(*options).render(body),
            None => Engine::default().render(body),
        }
    }
}

/// Enclose rendered HTML in the single root element both framework
/// compilers require.
fn wrap_root(html: &str, root_class: &str) -> String {
    format!("<div class=\"{root_class}\">{html}</div>")
}
