//! Environment diagnostics
use anyhow::Result;
use std::path::Path;
use snapanswer_core::{config::API_KEY_ENV, list_entries};

use super::helpers::entries_label;
use super::{build_supervisor, load_config, TimeoutArgs};

pub async fn check_command(env_file: Option<&Path>) -> Result<()> {
    let config = load_config(env_file, TimeoutArgs::default())?;
    let watch_dir = config.watch_dir.clone();
    let supervisor = build_supervisor(config);
    let mut problems = 0;

    println!("snapanswer check");
    println!("================");

    if watch_dir.is_dir() {
        match list_entries(&watch_dir) {
            Ok(entries) => println!(
                "Watch folder:  {} ({})",
                watch_dir.display(),
                entries_label(entries.len())
            ),
            Err(e) => {
                problems += 1;
                println!("Watch folder:  {} (unreadable: {e})", watch_dir.display());
            }
        }
    } else {
        println!(
            "Watch folder:  {} (missing, created on first run)",
            watch_dir.display()
        );
    }

    if supervisor.dispatcher().is_available().await {
        println!("Credential:    {API_KEY_ENV} is set");
    } else {
        problems += 1;
        println!("Credential:    {API_KEY_ENV} is NOT set");
    }

    if supervisor.extractor().is_available().await {
        println!("OCR engine:    tesseract found");
    } else {
        problems += 1;
        println!("OCR engine:    tesseract NOT found on PATH");
    }

    println!("Model:         {}", supervisor.dispatcher().model_name());

    if problems > 0 {
        anyhow::bail!("{problems} check(s) failed");
    }
    println!("\nAll checks passed.");
    Ok(())
}
