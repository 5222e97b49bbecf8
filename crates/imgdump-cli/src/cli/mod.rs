//! CLI for imgdump.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use imgdump_core::config::{self, FetchConfig};
use imgdump_core::modes::RunOptions;
use std::path::PathBuf;

use commands::{finish_run, open_session, run_completions, run_dump, run_gapfill, run_incremental};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "imgdump")]
#[command(about = "Bulk download and verify numbered image files from the Census file API", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Settings that override `config.toml` for one run.
#[derive(Debug, Default, Args)]
pub struct Overrides {
    /// Base URL of the file server.
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Game segment of the file path (e.g. ps2).
    #[arg(long, global = true)]
    pub game: Option<String>,

    /// Download attempts per ID when verifying.
    #[arg(long, global = true, value_name = "N")]
    pub attempts: Option<u32>,
}

impl Overrides {
    fn apply(&self, cfg: &mut FetchConfig) {
        if let Some(endpoint) = &self.endpoint {
            cfg.endpoint = endpoint.clone();
        }
        if let Some(game) = &self.game {
            cfg.game = game.clone();
        }
        if let Some(attempts) = self.attempts {
            cfg.verify_attempts = attempts;
        }
    }
}

/// Output directory and concurrency, shared by the download modes.
#[derive(Debug, Args)]
pub struct Target {
    /// Maximum number of concurrent downloads.
    #[arg(long = "batch-size", visible_alias = "batch_size", short = 'b', value_name = "B")]
    pub batch_size: Option<usize>,

    /// Target directory containing the downloaded files (default from config: ./api-files).
    pub path: Option<PathBuf>,
}

impl Target {
    fn dir(&self, cfg: &FetchConfig) -> PathBuf {
        self.path.clone().unwrap_or_else(|| cfg.output_dir.clone())
    }

    fn options(&self, cfg: &FetchConfig) -> RunOptions {
        RunOptions {
            batch_size: self.batch_size.unwrap_or(cfg.batch_size),
            verify_attempts: cfg.verify_attempts,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download and verify every ID in (offset, max_image_id].
    Dump {
        /// Upper bound of the image ID range (inclusive).
        #[arg(allow_negative_numbers = true)]
        max_image_id: i64,

        /// Starting offset; IDs up to and including it are skipped.
        #[arg(long, short = 'o', default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,

        #[command(flatten)]
        target: Target,
    },

    /// Re-request IDs missing below the highest ID already downloaded.
    Gapfill {
        /// Minimum image ID to download.
        #[arg(long, short = 'o', default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,

        #[command(flatten)]
        target: Target,
    },

    /// Probe for IDs published since the last run.
    Incremental {
        /// Maximum number of new IDs to probe in this run (default from config: 1000).
        #[arg(long, short = 'c', allow_negative_numbers = true)]
        count: Option<i64>,

        #[command(flatten)]
        target: Target,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let mut cfg = config::load_or_init()?;
        cli.overrides.apply(&mut cfg);
        tracing::debug!("loaded config: {:?}", cfg);

        let session = open_session(&cfg)?;
        let result = match cli.command {
            CliCommand::Dump {
                max_image_id,
                offset,
                target,
            } => {
                run_dump(
                    &session,
                    &target.dir(&cfg),
                    max_image_id,
                    offset,
                    target.options(&cfg),
                )
                .await
            }
            CliCommand::Gapfill { offset, target } => {
                run_gapfill(&session, &target.dir(&cfg), offset, target.options(&cfg)).await
            }
            CliCommand::Incremental { count, target } => {
                let count = count.unwrap_or(cfg.incremental_count);
                run_incremental(&session, &target.dir(&cfg), count, target.options(&cfg)).await
            }
            CliCommand::Completions { .. } => return Ok(()),
        };

        finish_run(result, cfg.shutdown_grace()).await
    }
}

#[cfg(test)]
mod tests;
