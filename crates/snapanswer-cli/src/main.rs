mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::TimeoutArgs;

#[derive(Parser)]
#[command(name = "snapanswer")]
#[command(about = "Answer on-screen questions from screenshots", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Load variables from this file instead of searching for `.env`
    #[arg(long, global = true, value_name = "PATH")]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Watch the screenshot folder until Ctrl-C (default)
    Run(TimeoutArgs),
    /// Poll the screenshot folder once, then exit
    Once(TimeoutArgs),
    /// Answer the question in one image without touching the screenshot folder
    Ask {
        /// Image to read
        image: PathBuf,
        #[command(flatten)]
        timeouts: TimeoutArgs,
    },
    /// Print the prompt that would be sent for a question
    Prompt {
        /// Question text
        text: String,
    },
    /// Check the screenshot folder, credential and OCR engine
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();

    let env_file = cli.env_file.as_deref();
    match cli.command.unwrap_or(Commands::Run(TimeoutArgs::default())) {
        Commands::Run(timeouts) => commands::watch::run_command(env_file, timeouts).await,
        Commands::Once(timeouts) => commands::watch::once_command(env_file, timeouts).await,
        Commands::Ask { image, timeouts } => {
            commands::ask::ask_command(&image, env_file, timeouts).await
        }
        Commands::Prompt { text } => {
            commands::ask::prompt_command(&text);
            Ok(())
        }
        Commands::Check => commands::check::check_command(env_file).await,
    }
}
