//! Frontmatter markdown loader pipeline.
//!
//! Splits a source file into YAML frontmatter and markdown body, renders the
//! body to HTML, and assembles an importable CommonJS module exposing the
//! requested output fields: `attributes`, `html`, `body`, `meta`, and
//! optionally Vue render artifacts or a React function component built by
//! separately-installed compiler toolchains.

pub mod assemble;
pub mod frontmatter;
pub mod loader;
pub mod markdown;
pub mod mode;
pub mod options;
pub mod toolchain;

pub use frontmatter::{split_document, FrontmatterError, ParsedDocument};
pub use loader::{Context, LoadError, Loader};
pub use markdown::{EngineConfig, MarkdownOptions, MarkdownRenderer, RenderFn};
pub use mode::{Mode, ModeError, Outputs};
pub use options::{
    AssetUrlPolicy, LoaderOptions, OptionsError, ReactOptions, VueOptions, DEFAULT_ROOT_CLASS,
};
pub use toolchain::{
    CompileError, ReactCompiler, ToolchainError, Toolchains, VueArtifact, VueCompiler,
};
