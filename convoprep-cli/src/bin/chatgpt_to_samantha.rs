//! chatgpt-to-samantha - flatten a ChatGPT export into transcript JSONL
//!
//! Reads the `conversations.json` file from a ChatGPT export archive,
//! keeps the conversations that strictly alternate between the user and
//! the assistant, and writes one JSONL record per conversation with the
//! turns joined into a single named-speaker transcript.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use convoprep_core::commands::cmd_samantha;
use convoprep_core::samantha::SpeakerNames;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "chatgpt-to-samantha",
    author,
    version,
    about = "Convert a ChatGPT conversations.json export into transcript JSONL",
    long_about = "Convert a ChatGPT conversations.json export into JSONL training data. \
                  Each surviving conversation becomes one record whose turns are joined \
                  into a single transcript with configurable speaker names."
)]
struct Cli {
    /// Name of the human to use in the exported chat
    #[arg(long = "human-name", value_name = "NAME", default_value = "Theodore")]
    human_name: String,

    /// Name of the bot to use in the exported chat
    #[arg(long = "bot-name", value_name = "NAME", default_value = "Samantha")]
    bot_name: String,

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

    let names = SpeakerNames {
        human: cli.human_name,
        bot: cli.bot_name,
    };
    cmd_samantha(&cli.input, &cli.output, names)
}
