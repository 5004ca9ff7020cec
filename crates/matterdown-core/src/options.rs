//! Loader options.

use std::collections::BTreeMap;
use std::fmt;

use crate::markdown::{EngineConfig, RenderFn};
use crate::mode::Mode;

/// Class carried by the wrapper element around the rendered markdown.
pub const DEFAULT_ROOT_CLASS: &str = "frontmatter-markdown";

/// Options supplied by the caller per loader, never mutated by the pipeline.
#[derive(Clone, Default)]
pub struct LoaderOptions {
    /// Requested output modes. Empty means HTML only.
    pub mode: Vec<Mode>,

    /// Fully custom markdown render function. Mutually exclusive with
    /// `engine`.
    pub markdown: Option<RenderFn>,

    /// Built-in engine configuration or a pre-built renderer instance.
    pub engine: Option<EngineConfig>,

    pub vue: VueOptions,
    pub react: ReactOptions,
}

impl fmt::Debug for LoaderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderOptions")
            .field("mode", &self.mode)
            .field("markdown", &self.markdown.as_ref().map(|_| ".."))
            .field("engine", &self.engine)
            .field("vue", &self.vue)
            .field("react", &self.react)
            .finish()
    }
}

/// Errors raised while validating options, before any rendering happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error(
        "the markdown and engine options are mutually exclusive; \
         supply a custom render function or an engine configuration, not both"
    )]
    ConflictingMarkdown,
}

/// Vue artifact settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VueOptions {
    /// Class of the single root element the template is wrapped in.
    pub root: String,

    /// Asset URL rewriting for vue-component mode.
    pub transform_asset_urls: AssetUrlPolicy,
}

impl Default for VueOptions {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT_CLASS.to_string(),
            transform_asset_urls: AssetUrlPolicy::default(),
        }
    }
}

/// React artifact settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactOptions {
    /// Class of the single root element of the generated component.
    pub root: String,
}

impl Default for ReactOptions {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT_CLASS.to_string(),
        }
    }
}

/// Which HTML attributes are rewritten to host-build asset references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetUrlPolicy {
    /// Leave every URL exactly as authored.
    Disabled,

    /// Rewrite these attributes, per tag.
    Tags(BTreeMap<String, Vec<String>>),
}

impl AssetUrlPolicy {
    /// The built-in attribute map.
    pub fn builtin() -> Self {
        AssetUrlPolicy::Tags(builtin_tags())
    }

    /// The built-in map with per-tag overrides applied. `None` removes a tag
    /// from the map; `Some` replaces its attribute list.
    pub fn with_overrides(overrides: BTreeMap<String, Option<Vec<String>>>) -> Self {
        let mut tags = builtin_tags();
        for (tag, attributes) in overrides {
            match attributes {
                Some(attributes) => {
                    tags.insert(tag, attributes);
                }
                None => {
                    tags.remove(&tag);
                }
            }
        }
        AssetUrlPolicy::Tags(tags)
    }

    /// Attributes to rewrite for `tag`, if any.
    pub fn attributes_for(&self, tag: &str) -> Option<&[String]> {
        match self {
            AssetUrlPolicy::Disabled => None,
            AssetUrlPolicy::Tags(tags) => tags.get(tag).map(Vec::as_slice),
        }
    }
}

impl Default for AssetUrlPolicy {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_tags() -> BTreeMap<String, Vec<String>> {
    let mut tags = BTreeMap::new();
    tags.insert("img".to_string(), vec!["src".to_string()]);
    tags.insert(
        "video".to_string(),
        vec!["src".to_string(), "poster".to_string()],
    );
    tags.insert("source".to_string(), vec!["src".to_string()]);
    tags.insert("image".to_string(), vec!["xlink:href".to_string()]);
    tags
}
