use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mdsplit_splitter::{MarkdownSplitter, SplitterConfig, DEFAULT_MODEL, DEFAULT_SEPARATOR};
use serde_json::json;

#[derive(Parser)]
#[command(name = "mdsplit")]
#[command(about = "Split a Markdown file into GPT-token-bounded sections", long_about = None)]
#[command(version)]
struct Cli {
    /// Markdown file to split
    file: PathBuf,

    /// Tokenizer model; also determines the default section limit
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Explicit token limit per section (overrides the model default)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Separator line printed between sections
    #[arg(short, long, default_value = DEFAULT_SEPARATOR)]
    separator: String,

    /// Emit sections as JSON records with token sizes
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    if cli.json {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = SplitterConfig {
        model: cli.model,
        limit: cli.limit,
        separator: cli.separator,
    };
    let mut splitter = MarkdownSplitter::new(config)?;
    log::debug!("splitting {} with {splitter:?}", cli.file.display());

    let output = splitter
        .split_file(&cli.file)
        .with_context(|| format!("failed to split {}", cli.file.display()))?;
    log::debug!("{}", output.stats());

    if cli.json {
        let records: Vec<_> = output
            .sections
            .iter()
            .map(|section| json!({ "text": section.text, "tokens": section.tokens }))
            .collect();
        let metadata = output
            .metadata
            .as_ref()
            .map(|mapping| serde_yaml::from_value::<serde_json::Value>(
                serde_yaml::Value::Mapping(mapping.clone()),
            ))
            .transpose()
            .context("front matter is not representable as JSON")?;
        let body = json!({ "metadata": metadata, "sections": records });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", output.join(splitter.config().separator.as_str()));
    }

    Ok(())
}
