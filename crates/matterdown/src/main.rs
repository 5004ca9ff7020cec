//! Matterdown CLI - compiles frontmatter markdown into importable modules.

use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use matterdown_core::{Mode, Toolchains};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "matterdown")]
#[command(about = "Compile frontmatter markdown files into importable JS modules")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to matterdown.toml config file
    #[arg(short, long, default_value = "matterdown.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile one markdown file to module source
    Compile {
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output modes, comma separated (overrides the config file)
        #[arg(short, long, value_delimiter = ',')]
        mode: Vec<Mode>,
    },

    /// Compile every markdown file under a directory
    Build {
        /// Directory to scan for .md files
        #[arg(default_value = "docs")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,

        /// Output modes, comma separated (overrides the config file)
        #[arg(short, long, value_delimiter = ',')]
        mode: Vec<Mode>,
    },
}

/// Built-in toolchains, imported once per process.
fn toolchains() -> &'static Toolchains {
    static TOOLCHAINS: OnceLock<Toolchains> = OnceLock::new();
    TOOLCHAINS.get_or_init(matterdown_compilers::toolchains)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let file_config = config::ConfigFile::load(&cli.config)?;

    match cli.command {
        Commands::Compile {
            input,
            output,
            mode,
        } => {
            commands::compile::run(input, output, file_config.into_options(mode))?;
        }
        Commands::Build {
            input,
            output,
            mode,
        } => {
            commands::build::run(input, output, file_config.into_options(mode))?;
        }
    }

    Ok(())
}
