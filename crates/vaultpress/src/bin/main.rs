//! Vaultpress CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vaultpress::prelude::*;
use vaultpress_core::to_json_string;

/// Vaultpress - resolve Obsidian syntax into publishable HTML
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the vault directory
    #[arg(long, global = true, env = "VAULT_PATH")]
    vault: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// YAML file of `note title: blog slug` cross-post mappings
    #[arg(short, long, global = true)]
    slugs: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true, action = clap::ArgAction::SetTrue)]
    json_logs: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a markdown file to HTML
    Render {
        /// Markdown file to render
        file: PathBuf,

        /// Print frontmatter, HTML and statistics as JSON
        #[arg(long, action = clap::ArgAction::SetTrue)]
        json: bool,
    },
    /// Print the vault indices as JSON
    Index {
        #[arg(long, value_enum, default_value_t = IndexKind::All)]
        kind: IndexKind,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum IndexKind {
    Notes,
    Media,
    All,
}

fn init_logging(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(args: &Args) -> Result<PublishConfig> {
    let mut config = match &args.config {
        Some(path) => PublishConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PublishConfig::default(),
    };

    // clap already folds VAULT_PATH into --vault
    if let Some(vault) = &args.vault {
        config.vault_path = vault.clone();
    }
    if let Some(slugs) = &args.slugs {
        config.slug_map_path = Some(slugs.clone());
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.json_logs);

    log::info!("Vaultpress v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;
    let publisher = Publisher::from_config(config).context("Failed to index vault")?;

    match &args.command {
        Command::Render { file, json } => {
            let doc = publisher
                .render_file(file)
                .with_context(|| format!("Failed to render {}", file.display()))?;
            if *json {
                println!("{}", to_json_string(&doc, "rendered document")?);
            } else {
                print!("{}", doc.html);
            }
        }
        Command::Index { kind } => {
            let index = publisher.index();
            let output = match kind {
                IndexKind::Notes => to_json_string(&index.notes, "note index")?,
                IndexKind::Media => to_json_string(&index.media, "media index")?,
                IndexKind::All => to_json_string(index, "vault index")?,
            };
            println!("{}", output);
        }
    }

    Ok(())
}
