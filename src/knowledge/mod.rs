//! Knowledge module — structured knowledge base and its text format
//!
//! Serializes the four-category knowledge base to a hand-editable text
//! format and parses it back. Also includes a single-file store.

pub mod format;
pub mod parser;
pub mod serializer;
pub mod store;
pub mod types;

pub use parser::{parse, parse_with_report, ParseReport, SkipReason, SkippedLine};
pub use serializer::serialize;
pub use store::KnowledgeFile;
pub use types::{
    Category, Item, KnowledgeBase, KnowledgeSummary, Note, SubItem, Variable, VariableType,
};
