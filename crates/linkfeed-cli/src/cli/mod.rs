//! CLI for the linkfeed upload client.

mod commands;
mod terminal;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use linkfeed_core::config;
use std::path::PathBuf;

use commands::{run_check, run_completions, run_config, run_man, run_submit, SubmitOptions};

/// Top-level CLI for the linkfeed upload client.
#[derive(Debug, Parser)]
#[command(name = "linkfeed")]
#[command(about = "Submit PDF and blog links to a bot ingestion service", long_about = None)]
pub struct Cli {
    /// Read settings from this file instead of ~/.config/linkfeed/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// The two link fields, given inline or from files.
#[derive(Debug, Clone, Default, Args)]
pub struct LinkArgs {
    /// PDF links, comma- or newline-separated. May be repeated.
    #[arg(long = "pdf", value_name = "URLS")]
    pub pdf: Vec<String>,

    /// Blog links, comma- or newline-separated. May be repeated.
    #[arg(long = "blog", value_name = "URLS")]
    pub blog: Vec<String>,

    /// Read additional PDF links from a file.
    #[arg(long, value_name = "PATH")]
    pub pdf_file: Option<PathBuf>,

    /// Read additional blog links from a file.
    #[arg(long, value_name = "PATH")]
    pub blog_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Validate link fields without submitting anything.
    Check {
        #[command(flatten)]
        links: LinkArgs,
    },

    /// Validate the form and upload it to the ingestion endpoint.
    Submit {
        /// Bot that should ingest the links (defaults to `default_bot` from config).
        #[arg(long)]
        bot: Option<String>,

        #[command(flatten)]
        links: LinkArgs,

        /// Extra form field sent with the upload. May be repeated.
        #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        fields: Vec<(String, String)>,

        /// Upload endpoint, overriding the configured one.
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,
    },

    /// Show the config file location and effective settings.
    Config,

    /// Print shell completions to stdout.
    Completions {
        shell: clap_complete::Shell,
    },

    /// Print the man page to stdout.
    Man,
}

/// Parses `KEY=VALUE`; the key must be non-empty.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty field name in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Check { links } => run_check(&links)?,
            CliCommand::Submit {
                bot,
                links,
                fields,
                endpoint,
            } => {
                let opts = SubmitOptions {
                    bot,
                    links,
                    fields,
                    endpoint,
                };
                run_submit(&cfg, opts).await?;
            }
            CliCommand::Config => run_config(&cfg, cli.config.as_deref())?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
