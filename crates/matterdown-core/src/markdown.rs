//! Markdown rendering behind a swappable engine.

use std::fmt;
use std::sync::Arc;

use pulldown_cmark::{html, Options, Parser};
use serde::Deserialize;

/// Capability interface for a markdown engine.
///
/// Anything that can turn a markdown body into HTML can stand in for the
/// built-in engine, wrapped in an `Arc` and handed to the loader through
/// [`EngineConfig::Instance`].
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, body: &str) -> String;
}

/// A fully custom render function, bypassing the built-in engine entirely.
pub type RenderFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Extension switches for the built-in engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MarkdownOptions {
    #[serde(default = "default_true")]
    pub tables: bool,

    #[serde(default = "default_true")]
    pub footnotes: bool,

    #[serde(default = "default_true")]
    pub strikethrough: bool,

    #[serde(default = "default_true")]
    pub tasklists: bool,

    /// Typographic replacements for quotes, dashes and ellipses.
    #[serde(default = "default_true")]
    pub smart_punctuation: bool,
}

fn default_true() -> bool {
    true
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            tasklists: true,
            smart_punctuation: true,
        }
    }
}

impl MarkdownOptions {
    fn to_engine_options(self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.tables);
        options.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_TASKLISTS, self.tasklists);
        options.set(Options::ENABLE_SMART_PUNCTUATION, self.smart_punctuation);
        options
    }
}

/// The built-in pulldown-cmark engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    options: MarkdownOptions,
}

impl Engine {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }
}

impl MarkdownRenderer for Engine {
    fn render(&self, body: &str) -> String {
        let parser = Parser::new_ext(body, self.options.to_engine_options());
        let mut output = String::new();
        html::push_html(&mut output, parser);
        output
    }
}

/// How the loader sets up its markdown engine when no custom render
/// function is supplied.
#[derive(Clone)]
pub enum EngineConfig {
    /// Build the built-in engine with these options.
    Options(MarkdownOptions),

    /// Use a pre-built renderer directly.
    Instance(Arc<dyn MarkdownRenderer>),
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineConfig::Options(options) => f.debug_tuple("Options").field(options).finish(),
            EngineConfig::Instance(_) => f.write_str("Instance(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_headings_and_paragraphs() {
        let engine = Engine::default();

        let html = engine.render("# Title\n\nHello world\n");

        assert_eq!(html, "<h1>Title</h1>\n<p>Hello world</p>\n");
    }

    #[test]
    fn renders_fenced_code_with_language_class() {
        let engine = Engine::default();

        let html = engine.render("```js\nconst ok = true;\n```\n");

        assert_eq!(
            html,
            "<pre><code class=\"language-js\">const ok = true;\n</code></pre>\n"
        );
    }

    #[test]
    fn options_toggle_extensions() {
        let markdown = "~~gone~~";
        let with = Engine::new(MarkdownOptions::default());
        let without = Engine::new(MarkdownOptions {
            strikethrough: false,
            ..MarkdownOptions::default()
        });

        assert_eq!(with.render(markdown), "<p><del>gone</del></p>\n");
        assert_eq!(without.render(markdown), "<p>~~gone~~</p>\n");
    }

    #[test]
    fn custom_renderer_instance_is_used_verbatim() {
        struct Upper;
        impl MarkdownRenderer for Upper {
            fn render(&self, body: &str) -> String {
                body.to_uppercase()
            }
        }

        let renderer: Arc<dyn MarkdownRenderer> = Arc::new(Upper);

        assert_eq!(renderer.render("abc"), "ABC");
    }
}
