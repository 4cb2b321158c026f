pub mod commands;
pub mod export;
pub mod extract;
pub mod samantha;
pub mod sharegpt;

pub use commands::{cmd_samantha, cmd_sharegpt};
pub use export::{load_export, Author, Content, ExportRecord, Message, Node, Role};
pub use extract::{
    conversation_turns, extract_conversations, validate_turns, RejectReason, Turn,
};
pub use samantha::{render_transcript, SamanthaWriter, SpeakerNames, TranscriptRecord};
pub use sharegpt::{records_from_turns, write_records, Sender, ShareGptRecord, ShareGptTurn};
