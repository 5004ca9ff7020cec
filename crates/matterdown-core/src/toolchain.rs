//! Optional compiler toolchains, resolved lazily at load time.
//!
//! The framework compilers are separately-installed collaborators: the
//! loader only asks for one when a mode actually needs it, so an absent
//! toolchain is harmless until a Vue or React mode is requested. Absence
//! surfaces as a descriptive [`ToolchainError`]; every other compiler
//! failure propagates untouched as a [`CompileError`].

use std::fmt;
use std::sync::Arc;

use crate::options::AssetUrlPolicy;

/// Vue render artifact as JavaScript source: a render function expression
/// and the hoisted static render function expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VueArtifact {
    pub render: String,
    pub static_render_fns: Vec<String>,
}

/// Compiles a root-wrapped HTML template into Vue render functions.
pub trait VueCompiler: Send + Sync {
    /// Compile for vue-render-functions mode. Asset URLs stay as authored.
    fn compile_render_functions(&self, template: &str) -> Result<VueArtifact, CompileError>;

    /// Compile for vue-component mode, rewriting asset URLs per policy.
    fn compile_component(
        &self,
        template: &str,
        assets: &AssetUrlPolicy,
    ) -> Result<VueArtifact, CompileError>;
}

/// Compiles a root-wrapped HTML template into a React function component
/// expression.
pub trait ReactCompiler: Send + Sync {
    fn compile(&self, template: &str) -> Result<String, CompileError>;
}

/// A compiler failure. The message carries the underlying diagnostic
/// verbatim; nothing is retried or recovered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("failed to parse rendered HTML: {0}")]
    Html(String),
}

/// The toolchains available to a loader.
///
/// Empty by default; hosts register compilers once and reuse the registry
/// process-wide (first registration wins, nothing is ever torn down).
#[derive(Clone, Default)]
pub struct Toolchains {
    vue: Option<Arc<dyn VueCompiler>>,
    react: Option<Arc<dyn ReactCompiler>>,
}

impl Toolchains {
    /// A registry with no compilers installed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_vue(mut self, compiler: Arc<dyn VueCompiler>) -> Self {
        self.vue = Some(compiler);
        self
    }

    pub fn with_react(mut self, compiler: Arc<dyn ReactCompiler>) -> Self {
        self.react = Some(compiler);
        self
    }

    /// The Vue template compiler, if installed.
    pub fn vue(&self) -> Result<&dyn VueCompiler, ToolchainError> {
        self.vue.as_deref().ok_or(ToolchainError::VueMissing)
    }

    /// The React transpiler, if installed.
    pub fn react(&self) -> Result<&dyn ReactCompiler, ToolchainError> {
        self.react.as_deref().ok_or(ToolchainError::ReactMissing)
    }
}

impl fmt::Debug for Toolchains {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolchains")
            .field("vue", &self.vue.is_some())
            .field("react", &self.react.is_some())
            .finish()
    }
}

/// A requested mode needs a toolchain that is not installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ToolchainError {
    #[error(
        "failed to import the Vue template compiler: enable the `vue` feature of \
         matterdown-compilers, or register one with Toolchains::with_vue"
    )]
    VueMissing,

    #[error(
        "failed to import the JSX transpiler: enable the `react` feature of \
         matterdown-compilers, or register one with Toolchains::with_react"
    )]
    ReactMissing,
}
