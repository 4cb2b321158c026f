use thiserror::Error;
use tracing::{debug, info, warn};

use crate::export::{ExportRecord, Node, Role};

/// A single exchange recovered from the export tree, in the order the
/// participants produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// Why a conversation was dropped by [`validate_turns`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// A turn broke the strict user/assistant back-and-forth.
    #[error("unexpected {found} turn at index {index}, expected {expected}")]
    BrokenAlternation {
        index: usize,
        found: Role,
        expected: Role,
    },

    /// Fewer than one full exchange survived extraction.
    #[error("too few turns ({count})")]
    TooFewTurns { count: usize },

    /// The final user turn never got an assistant reply.
    #[error("no assistant response for the final user turn")]
    UnansweredUser,
}

/// Filter one mapping node down to a usable turn.
///
/// Only plain text turns count: the first part must be a non-empty string,
/// the content type must be `text`, and system messages are dropped. Root
/// and tombstone nodes carry neither content nor author and are rejected
/// up front; a message missing only one of the two is still skipped, just
/// by whichever later lookup comes up empty.
fn usable_turn(node: &Node) -> Option<Turn> {
    let message = node.message.as_ref()?;

    if message.content.is_none() && message.author.is_none() {
        return None;
    }

    let content = message.content.as_ref()?;
    let text = content
        .parts
        .first()?
        .as_str()
        .filter(|text| !text.is_empty())?;
    if content.content_type.as_deref() != Some("text") {
        return None;
    }
    let role = message.author.as_ref()?.role.clone()?;
    if role == Role::System {
        return None;
    }

    Some(Turn {
        role,
        text: text.to_owned(),
    })
}

/// Walk one conversation tree from its newest leaf back to the root and
/// return the usable turns in chronological order.
///
/// The walk follows `parent` pointers starting at `current_node`, so only
/// the active branch of the tree is seen; abandoned edits hanging off
/// other children never appear. A dangling pointer ends the walk with
/// whatever was collected. A well-formed chain visits each node at most
/// once, so a walk longer than the mapping proves a cycle and is cut off.
pub fn conversation_turns(record: &ExportRecord) -> Vec<Turn> {
    let mut turns = Vec::new();
    let mut remaining = record.mapping.len();
    let mut cursor = record.current_node.clone();

    while let Some(node_id) = cursor {
        let Some(node) = record.mapping.get(&node_id) else {
            debug!(node_id = %node_id, "node missing from mapping, stopping walk");
            break;
        };
        if remaining == 0 {
            warn!(node_id = %node_id, "parent chain revisits nodes, truncating walk");
            break;
        }
        remaining -= 1;

        match usable_turn(node) {
            Some(turn) => turns.push(turn),
            None => debug!(node_id = %node_id, "skipping node without a usable text turn"),
        }
        cursor = node.parent.clone();
    }

    turns.reverse();
    turns
}

/// Check the alternation contract: turns start with the user, strictly
/// alternate, number at least two, and end with the assistant.
///
/// Anything else, including tool or unrecognized roles anywhere in the
/// sequence, rejects the whole conversation.
pub fn validate_turns(turns: &[Turn]) -> Result<(), RejectReason> {
    let mut expected = Role::User;
    for (index, turn) in turns.iter().enumerate() {
        if turn.role != expected {
            return Err(RejectReason::BrokenAlternation {
                index,
                found: turn.role.clone(),
                expected,
            });
        }
        expected = match expected {
            Role::User => Role::Assistant,
            _ => Role::User,
        };
    }
    if turns.len() < 2 {
        return Err(RejectReason::TooFewTurns { count: turns.len() });
    }
    if expected == Role::Assistant {
        return Err(RejectReason::UnansweredUser);
    }
    Ok(())
}

/// Extract every conversation that survives validation, preserving the
/// order the records appear in the export.
pub fn extract_conversations(records: &[ExportRecord]) -> Vec<Vec<Turn>> {
    let mut conversations = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let turns = conversation_turns(record);
        match validate_turns(&turns) {
            Ok(()) => conversations.push(turns),
            Err(reason) => info!(index, %reason, "discarding conversation"),
        }
    }
    conversations
}
