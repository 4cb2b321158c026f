use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;
use tracing::error;

use crate::export::Role;
use crate::extract::Turn;

/// Training-side speaker label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Human,
    Gpt,
}

/// A single turn in the structured output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareGptTurn {
    #[serde(rename = "from")]
    pub sender: Sender,
    pub value: String,
}

/// One conversation in the structured output. Ids are assigned in
/// emission order with a fixed `_0` branch suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareGptRecord {
    pub id: String,
    pub conversation: Vec<ShareGptTurn>,
}

fn sender_for(turn: &Turn) -> Option<Sender> {
    match turn.role {
        Role::User => Some(Sender::Human),
        Role::Assistant => Some(Sender::Gpt),
        ref other => {
            error!(role = %other, "unexpected role in structured output, dropping turn");
            None
        }
    }
}

/// Convert validated conversations into output records.
pub fn records_from_turns(conversations: &[Vec<Turn>]) -> Vec<ShareGptRecord> {
    conversations
        .iter()
        .enumerate()
        .map(|(index, turns)| ShareGptRecord {
            id: format!("{}_0", index),
            conversation: turns
                .iter()
                .filter_map(|turn| {
                    sender_for(turn).map(|sender| ShareGptTurn {
                        sender,
                        value: turn.text.clone(),
                    })
                })
                .collect(),
        })
        .collect()
}

/// Write the whole record set as one JSON array, pretty-printed with
/// 4-space indentation and alphabetically ordered keys, no trailing
/// newline.
///
/// Records go through `serde_json::to_value` first; the `Value` object
/// map is what orders the keys.
pub fn write_records(records: &[ShareGptRecord], path: impl AsRef<Path>) -> Result<()> {
    let value = serde_json::to_value(records)?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut writer, formatter);
        value.serialize(&mut serializer)?;
    }
    writer.flush()?;

    Ok(())
}
