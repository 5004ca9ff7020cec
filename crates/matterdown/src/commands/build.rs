//! Directory build command.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context as _, Result};
use walkdir::WalkDir;

use matterdown_core::{Context, Loader, LoaderOptions};

/// Compile every `.md` file under `input`, mirroring the tree under
/// `output` as `<name>.md.js` modules.
pub fn run(input: PathBuf, output: PathBuf, options: LoaderOptions) -> Result<()> {
    if !input.is_dir() {
        anyhow::bail!("input directory not found: {}", input.display());
    }

    let loader = Loader::new(options)?.with_toolchains(crate::toolchains().clone());

    let started = Instant::now();
    let mut compiled = 0usize;
    for entry in WalkDir::new(&input)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }

        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let module = loader.load(&source, &Context::new(path))?;

        let relative = path.strip_prefix(&input).unwrap_or(path);
        let destination = output.join(relative).with_extension("md.js");
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&destination, module)
            .with_context(|| format!("failed to write {}", destination.display()))?;

        tracing::debug!("{} -> {}", path.display(), destination.display());
        compiled += 1;
    }

    tracing::info!(
        "Compiled {} files in {}ms",
        compiled,
        started.elapsed().as_millis()
    );
    tracing::info!("Output: {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_a_tree_of_markdown_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("docs");
        let output = dir.path().join("dist");
        fs::create_dir_all(input.join("nested")).unwrap();
        fs::write(input.join("index.md"), "---\ntitle: Home\n---\n\n# Home\n").unwrap();
        fs::write(input.join("nested/page.md"), "# Page\n").unwrap();
        fs::write(input.join("notes.txt"), "skipped").unwrap();

        run(input, output.clone(), LoaderOptions::default()).unwrap();

        let index = fs::read_to_string(output.join("index.md.js")).unwrap();
        assert!(index.contains("attributes: {\"title\":\"Home\"}"));
        assert!(index.contains("html: \"<h1>Home</h1>\\n\""));

        assert!(output.join("nested/page.md.js").exists());
        assert!(!output.join("notes.txt").exists());
    }

    #[test]
    fn missing_input_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = run(
            dir.path().join("absent"),
            dir.path().join("dist"),
            LoaderOptions::default(),
        );

        assert!(result.is_err());
    }
}
