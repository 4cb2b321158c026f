//! chatgpt-to-sharegpt - flatten a ChatGPT export into a structured JSON file
//!
//! Reads the `conversations.json` file from a ChatGPT export archive,
//! keeps the conversations that strictly alternate between the user and
//! the assistant, and writes a single pretty-printed JSON array with one
//! human/gpt turn list per conversation.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use convoprep_core::commands::cmd_sharegpt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "chatgpt-to-sharegpt",
    author,
    version,
    about = "Convert a ChatGPT conversations.json export into a structured JSON file",
    long_about = "Convert a ChatGPT conversations.json export into structured JSON training \
                  data. Each surviving conversation becomes one array element holding its \
                  turns as from/value pairs, indented four spaces with sorted keys."
)]
struct Cli {
    /// Path to the input json file from the ChatGPT export archive
    #[arg(value_name = "INPUT_JSON")]
    input: PathBuf,

    /// Path to the output file
    #[arg(value_name = "OUTPUT_FILE")]
    output: PathBuf,
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn main() -> Result<()> {
    init_tracing().ok();
    let cli = Cli::parse();

    cmd_sharegpt(&cli.input, &cli.output)
}
