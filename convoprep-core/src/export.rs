use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

/// One conversation tree from a ChatGPT `conversations.json` archive.
///
/// The export stores each conversation as a flat id->node mapping plus a
/// pointer to the newest leaf. Everything we do starts from these two
/// fields; the rest of the record (title, timestamps, plugin metadata) is
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportRecord {
    #[serde(default)]
    pub current_node: Option<String>,
    #[serde(default)]
    pub mapping: HashMap<String, Node>,
}

/// A single entry in the conversation tree.
#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub author: Option<Author>,
}

/// Message payload. `parts` stays untyped because real exports mix plain
/// strings with multimodal objects in the same array; only a leading
/// string part is usable downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub parts: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub role: Option<Role>,
}

/// Author role as spelled in the export.
///
/// Unrecognized spellings are kept verbatim so diagnostics can name them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
    Other(String),
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            "system" => Role::System,
            "tool" => Role::Tool,
            _ => Role::Other(value),
        }
    }
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Tool => "tool",
            Role::Other(other) => other,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read and parse a whole export in one shot.
///
/// The archive ships `conversations.json` as a single line, so there is
/// nothing to gain from streaming it.
pub fn load_export(path: impl AsRef<Path>) -> Result<Vec<ExportRecord>> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("failed to read {:?}", path))?;
    let records: Vec<ExportRecord> = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse JSON from {:?}", path))?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn parses_minimal_record() {
        let record: ExportRecord = serde_json::from_value(json!({
            "current_node": "leaf",
            "mapping": {
                "leaf": {
                    "message": {
                        "content": {"content_type": "text", "parts": ["hello"]},
                        "author": {"role": "assistant"}
                    },
                    "parent": "root"
                },
                "root": {"message": null, "parent": null}
            }
        }))
        .unwrap();

        assert_eq!(record.current_node.as_deref(), Some("leaf"));
        assert_eq!(record.mapping.len(), 2);

        let leaf = &record.mapping["leaf"];
        let message = leaf.message.as_ref().unwrap();
        assert_eq!(
            message.author.as_ref().unwrap().role,
            Some(Role::Assistant)
        );
        assert_eq!(
            message.content.as_ref().unwrap().content_type.as_deref(),
            Some("text")
        );
    }

    #[test]
    fn missing_mapping_defaults_to_empty() {
        let record: ExportRecord =
            serde_json::from_value(json!({"current_node": "x"})).unwrap();
        assert!(record.mapping.is_empty());

        let record: ExportRecord = serde_json::from_value(json!({})).unwrap();
        assert!(record.current_node.is_none());
    }

    #[test]
    fn unknown_record_fields_are_ignored() {
        let record: ExportRecord = serde_json::from_value(json!({
            "title": "lunch plans",
            "create_time": 1681400000.25,
            "current_node": "n1",
            "mapping": {},
            "moderation_results": []
        }))
        .unwrap();
        assert_eq!(record.current_node.as_deref(), Some("n1"));
    }

    #[test]
    fn role_keeps_unknown_spellings() {
        let role = Role::from("user".to_string());
        assert_eq!(role, Role::User);
        assert_eq!(role.as_str(), "user");

        let role = Role::from("browser_tool".to_string());
        assert_eq!(role, Role::Other("browser_tool".to_string()));
        assert_eq!(role.as_str(), "browser_tool");
        assert_eq!(role.to_string(), "browser_tool");
    }

    #[test]
    fn multimodal_parts_survive_parsing() {
        let content: Content = serde_json::from_value(json!({
            "content_type": "multimodal_text",
            "parts": [{"asset_pointer": "file-service://abc", "width": 512}, "caption"]
        }))
        .unwrap();
        assert_eq!(content.parts.len(), 2);
        assert!(content.parts[0].is_object());
        assert_eq!(content.parts[1].as_str(), Some("caption"));
    }

    #[test]
    fn load_export_reads_whole_file() {
        let mut file = NamedTempFile::new().unwrap();
        let payload = json!([
            {"current_node": "a", "mapping": {"a": {"message": null, "parent": null}}},
            {"current_node": null, "mapping": {}}
        ]);
        file.write_all(payload.to_string().as_bytes()).unwrap();
        file.flush().unwrap();

        let records = load_export(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].current_node.as_deref(), Some("a"));
    }

    #[test]
    fn load_export_rejects_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[{\"current_node\": ").unwrap();
        file.flush().unwrap();

        let err = load_export(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse JSON"));
    }
}
