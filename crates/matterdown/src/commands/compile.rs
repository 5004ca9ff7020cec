//! Single-file compile command.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use matterdown_core::{Context, Loader, LoaderOptions};

/// Compile one markdown file to module source, written to `output` or
/// printed to stdout.
pub fn run(input: PathBuf, output: Option<PathBuf>, options: LoaderOptions) -> Result<()> {
    let source = fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let loader = Loader::new(options)?.with_toolchains(crate::toolchains().clone());
    let module = loader.load(&source, &Context::new(&input))?;

    match output {
        Some(path) => {
            fs::write(&path, module)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{module}"),
    }

    Ok(())
}
