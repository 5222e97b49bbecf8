//! CLI command handlers. Each command is in its own file.

mod completions;
mod dump;
mod gapfill;
mod incremental;

pub use completions::run_completions;
pub use dump::run_dump;
pub use gapfill::run_gapfill;
pub use incremental::run_incremental;

use anyhow::{Context, Result};
use imgdump_core::config::FetchConfig;
use imgdump_core::error::FetchError;
use imgdump_core::fetch::{Endpoint, Session};
use imgdump_core::summary::RunSummary;
use std::sync::Arc;
use std::time::Duration;

/// Build the HTTP session shared by every task of the run.
pub fn open_session(cfg: &FetchConfig) -> Result<Arc<Session>> {
    let endpoint = Endpoint::parse(&cfg.endpoint, cfg.game.clone())
        .with_context(|| format!("invalid endpoint {:?}", cfg.endpoint))?;
    Ok(Arc::new(Session::new(
        endpoint,
        cfg.connect_timeout(),
        cfg.request_timeout(),
    )))
}

/// Report the outcome of a run.
///
/// Transport errors are printed and swallowed; the process then waits
/// `grace` so pooled connections close before exit. Argument errors are
/// returned at once since no request was made.
pub async fn finish_run(result: Result<RunSummary, FetchError>, grace: Duration) -> Result<()> {
    let outcome = match result {
        Ok(summary) => {
            println!("{}", summary);
            Ok(())
        }
        Err(err @ (FetchError::Validation(_) | FetchError::NamingConvention { .. })) => {
            return Err(err.into());
        }
        Err(err) if err.is_transport() => {
            tracing::error!(error = %err, "run aborted");
            println!("Exited with error: {}", err);
            Ok(())
        }
        Err(err) => Err(err.into()),
    };
    tokio::time::sleep(grace).await;
    outcome
}
