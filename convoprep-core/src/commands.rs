use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, instrument};

use crate::export::load_export;
use crate::extract::extract_conversations;
use crate::samantha::{SamanthaWriter, SpeakerNames};
use crate::sharegpt::{records_from_turns, write_records};

fn conversion_spinner() -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {pos} conversations | {msg}")
            .context("failed to create progress style")?
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("converting...");
    Ok(pb)
}

/// Convert a `conversations.json` export into transcript JSONL.
#[instrument(skip_all)]
pub fn cmd_samantha(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    names: SpeakerNames,
) -> Result<()> {
    let input_path = input.as_ref();
    let output_path = output.as_ref();

    info!("Loading input file: {:?}", input_path);
    info!("Output will be written to: {:?}", output_path);

    let records = load_export(input_path)?;
    info!("Found {} conversations", records.len());

    let conversations = extract_conversations(&records);

    let pb = conversion_spinner()?;
    let mut writer = SamanthaWriter::create(output_path, names)
        .with_context(|| format!("failed to create {:?}", output_path))?;
    for turns in &conversations {
        writer.write_conversation(turns)?;
        pb.inc(1);
    }

    pb.finish_with_message(format!(
        "Done. {} conversations written",
        conversations.len()
    ));
    info!(
        "Done! Wrote {} conversations in {:?}",
        conversations.len(),
        output_path
    );

    Ok(())
}

/// Convert a `conversations.json` export into one structured JSON file.
#[instrument(skip_all)]
pub fn cmd_sharegpt(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
    let input_path = input.as_ref();
    let output_path = output.as_ref();

    info!("Loading input file: {:?}", input_path);
    info!("Output will be written to: {:?}", output_path);

    let records = load_export(input_path)?;
    info!("Found {} conversations", records.len());

    let conversations = extract_conversations(&records);

    let pb = conversion_spinner()?;
    let output_records = records_from_turns(&conversations);
    pb.set_position(output_records.len() as u64);

    write_records(&output_records, output_path)
        .with_context(|| format!("failed to write {:?}", output_path))?;

    pb.finish_with_message(format!(
        "Done. {} conversations written",
        output_records.len()
    ));
    info!(
        "Done! Wrote {} conversations in {:?}",
        output_records.len(),
        output_path
    );

    Ok(())
}
