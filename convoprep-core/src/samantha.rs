use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use tracing::error;

use crate::export::Role;
use crate::extract::Turn;

/// Display names used when flattening turns into a transcript.
#[derive(Debug, Clone)]
pub struct SpeakerNames {
    pub human: String,
    pub bot: String,
}

impl Default for SpeakerNames {
    fn default() -> Self {
        Self {
            human: "Theodore".to_owned(),
            bot: "Samantha".to_owned(),
        }
    }
}

/// One line of transcript output. `elapsed` is the zero-based position of
/// the conversation within the run.
#[derive(Debug, Serialize)]
pub struct TranscriptRecord {
    pub elapsed: u64,
    pub conversation: String,
}

/// Flatten one conversation into `Name: text` paragraphs separated by
/// blank lines.
///
/// A turn with any role other than user or assistant has no speaker to
/// attribute it to; it is dropped from the transcript with an error log
/// and the rest of the conversation is kept.
pub fn render_transcript(turns: &[Turn], names: &SpeakerNames) -> String {
    let mut paragraphs = Vec::with_capacity(turns.len());
    for turn in turns {
        let speaker = match turn.role {
            Role::User => names.human.as_str(),
            Role::Assistant => names.bot.as_str(),
            ref other => {
                error!(role = %other, "unexpected role in transcript, dropping turn");
                continue;
            }
        };
        paragraphs.push(format!("{}: {}", speaker, turn.text));
    }
    paragraphs.join("\n\n")
}

/// Streams conversations out as transcript JSONL, one record per line.
pub struct SamanthaWriter<W: Write> {
    writer: BufWriter<W>,
    names: SpeakerNames,
    elapsed: u64,
}

impl SamanthaWriter<File> {
    pub fn create(path: impl AsRef<Path>, names: SpeakerNames) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(file, names))
    }
}

impl<W: Write> SamanthaWriter<W> {
    pub fn new(inner: W, names: SpeakerNames) -> Self {
        Self {
            writer: BufWriter::new(inner),
            names,
            elapsed: 0,
        }
    }

    /// Append one conversation and advance the `elapsed` counter.
    pub fn write_conversation(&mut self, turns: &[Turn]) -> Result<()> {
        let record = TranscriptRecord {
            elapsed: self.elapsed,
            conversation: render_transcript(turns, &self.names),
        };
        let line = serde_json::to_string(&record)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.elapsed += 1;
        Ok(())
    }
}
