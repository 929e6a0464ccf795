//! Screenshot folder watching commands
use anyhow::Result;
use std::path::Path;
use snapanswer_core::CycleOutcome;

use super::helpers::report_failure;
use super::{build_supervisor, load_config, TimeoutArgs};

pub async fn run_command(env_file: Option<&Path>, timeouts: TimeoutArgs) -> Result<()> {
    let config = load_config(env_file, timeouts)?;
    config.ensure_watch_dir()?;

    let mut supervisor = build_supervisor(config);
    match supervisor.run_with_signals().await {
        Ok(summary) => {
            println!("Stopped. Answered {} screenshot(s).", summary.cycles);
            Ok(())
        }
        Err(e) => Err(report_failure(e)),
    }
}

pub async fn once_command(env_file: Option<&Path>, timeouts: TimeoutArgs) -> Result<()> {
    let config = load_config(env_file, timeouts)?;
    config.ensure_watch_dir()?;
    let watch_dir = config.watch_dir.clone();

    let mut supervisor = build_supervisor(config);
    match supervisor.poll_once().await {
        Ok(None) => {
            println!("No screenshots in {}", watch_dir.display());
            Ok(())
        }
        Ok(Some(CycleOutcome::Delivered { source, .. } | CycleOutcome::NoText { source })) => {
            log::info!("Processed {}", source.display());
            Ok(())
        }
        Err(e) => Err(report_failure(e)),
    }
}
