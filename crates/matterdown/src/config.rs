//! Configuration file structure (matterdown.toml).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use matterdown_core::{
    AssetUrlPolicy, EngineConfig, LoaderOptions, MarkdownOptions, Mode, ReactOptions, VueOptions,
};

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    /// Output modes; overridden by the command line when given there.
    #[serde(default)]
    mode: Vec<Mode>,

    /// Built-in markdown engine options.
    markdown: Option<MarkdownOptions>,

    #[serde(default)]
    vue: VueConfig,

    #[serde(default)]
    react: ReactConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
struct VueConfig {
    root: Option<String>,
    transform_asset_urls: Option<AssetUrlConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct ReactConfig {
    root: Option<String>,
}

/// `transform-asset-urls` accepts `false` (disable entirely) or a per-tag
/// table where `false` removes a tag from the built-in map and a string or
/// list replaces its attributes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AssetUrlConfig {
    Enabled(bool),
    Tags(BTreeMap<String, TagAttributes>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagAttributes {
    Enabled(bool),
    One(String),
    Many(Vec<String>),
}

impl AssetUrlConfig {
    fn into_policy(self) -> AssetUrlPolicy {
        match self {
            AssetUrlConfig::Enabled(false) => AssetUrlPolicy::Disabled,
            AssetUrlConfig::Enabled(true) => AssetUrlPolicy::builtin(),
            AssetUrlConfig::Tags(tags) => {
                let mut overrides = BTreeMap::new();
                for (tag, attributes) in tags {
                    match attributes {
                        TagAttributes::Enabled(true) => {}
                        TagAttributes::Enabled(false) => {
                            overrides.insert(tag, None);
                        }
                        TagAttributes::One(attribute) => {
                            overrides.insert(tag, Some(vec![attribute]));
                        }
                        TagAttributes::Many(attributes) => {
                            overrides.insert(tag, Some(attributes));
                        }
                    }
                }
                AssetUrlPolicy::with_overrides(overrides)
            }
        }
    }
}

impl ConfigFile {
    /// Load configuration if the file exists; a malformed file is an error,
    /// a missing one is the default configuration.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Turn the file configuration into loader options, with the command
    /// line mode list taking precedence when non-empty.
    pub fn into_options(self, mode_override: Vec<Mode>) -> LoaderOptions {
        let mode = if mode_override.is_empty() {
            self.mode
        } else {
            mode_override
        };

        let mut vue = VueOptions::default();
        if let Some(root) = self.vue.root {
            vue.root = root;
        }
        if let Some(assets) = self.vue.transform_asset_urls {
            vue.transform_asset_urls = assets.into_policy();
        }

        let mut react = ReactOptions::default();
        if let Some(root) = self.react.root {
            react.root = root;
        }

        LoaderOptions {
            mode,
            markdown: None,
            engine: self.markdown.map(EngineConfig::Options),
            vue,
            react,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modes_and_roots() {
        let config: ConfigFile = toml::from_str(
            r#"
mode = ["html", "vue-render-functions"]

[vue]
root = "article"

[react]
root = "article"
"#,
        )
        .unwrap();

        let options = config.into_options(Vec::new());

        assert_eq!(options.mode, vec![Mode::Html, Mode::VueRenderFunctions]);
        assert_eq!(options.vue.root, "article");
        assert_eq!(options.react.root, "article");
    }

    #[test]
    fn command_line_modes_override_the_file() {
        let config: ConfigFile = toml::from_str("mode = [\"body\"]").unwrap();

        let options = config.into_options(vec![Mode::Meta]);

        assert_eq!(options.mode, vec![Mode::Meta]);
    }

    #[test]
    fn false_disables_asset_transform() {
        let config: ConfigFile = toml::from_str(
            r#"
[vue]
transform-asset-urls = false
"#,
        )
        .unwrap();

        let options = config.into_options(Vec::new());

        assert_eq!(options.vue.transform_asset_urls, AssetUrlPolicy::Disabled);
    }

    #[test]
    fn per_tag_overrides_remove_and_replace() {
        let config: ConfigFile = toml::from_str(
            r#"
[vue.transform-asset-urls]
img = false
audio = "src"
video = ["src"]
"#,
        )
        .unwrap();

        let options = config.into_options(Vec::new());
        let policy = options.vue.transform_asset_urls;

        assert_eq!(policy.attributes_for("img"), None);
        assert_eq!(
            policy.attributes_for("audio"),
            Some(&["src".to_string()][..])
        );
        assert_eq!(
            policy.attributes_for("video"),
            Some(&["src".to_string()][..])
        );
        // untouched defaults survive
        assert!(policy.attributes_for("source").is_some());
    }

    #[test]
    fn markdown_table_builds_engine_options() {
        let config: ConfigFile = toml::from_str(
            r#"
[markdown]
smart-punctuation = false
"#,
        )
        .unwrap();

        let options = config.into_options(Vec::new());

        match options.engine {
            Some(EngineConfig::Options(engine)) => {
                assert!(!engine.smart_punctuation);
                assert!(engine.tables);
            }
            other => panic!("expected engine options, got {other:?}"),
        }
    }

    #[test]
    fn loads_a_config_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matterdown.toml");
        fs::write(&path, "mode = [\"html\", \"react\"]\n").unwrap();

        let config = ConfigFile::load(&path).unwrap();

        assert_eq!(
            config.into_options(Vec::new()).mode,
            vec![Mode::Html, Mode::React]
        );
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matterdown.toml");
        fs::write(&path, "mode = [unclosed").unwrap();

        assert!(ConfigFile::load(&path).is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = ConfigFile::load(Path::new("does-not-exist.toml")).unwrap();

        let options = config.into_options(Vec::new());

        assert!(options.mode.is_empty());
        assert!(options.engine.is_none());
        assert_eq!(options.vue.root, "frontmatter-markdown");
    }
}
