//! One-off question commands
use anyhow::Result;
use snapanswer_core::{build_prompt, CycleOutcome};
use std::path::Path;

use super::helpers::report_failure;
use super::{build_supervisor, load_config, TimeoutArgs};

pub async fn ask_command(
    image: &Path,
    env_file: Option<&Path>,
    timeouts: TimeoutArgs,
) -> Result<()> {
    if !image.is_file() {
        anyhow::bail!("{} is not a file", image.display());
    }

    let supervisor = build_supervisor(load_config(env_file, timeouts)?);
    match supervisor.process_image(image).await {
        Ok(CycleOutcome::Delivered { answer, .. }) => {
            log::debug!("Answer: {answer}");
            Ok(())
        }
        Ok(CycleOutcome::NoText { .. }) => Ok(()),
        Err(e) => Err(report_failure(e)),
    }
}

pub fn prompt_command(text: &str) {
    println!("{}", build_prompt(text));
}
