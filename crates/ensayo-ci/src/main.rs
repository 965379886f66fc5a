//! Entry point for the PR status comment helper.
//!
//! ```bash
//! GITHUB_TOKEN=... GITHUB_REPOSITORY=owner/repo PR_NUMBER=42 \
//!   JOB_STATUS=success ensayo-ci
//! ```

use clap::Parser;
use ensayo_ci::CiArgs;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();

    ensayo_ci::run(CiArgs::parse()).await;

    // Comment delivery is advisory; the suite job's own status is what gates CI
    ExitCode::SUCCESS
}
