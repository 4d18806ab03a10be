//! kbtext - Plain-text import/export for agent knowledge bases
//!
//! An agent knowledge base is a four-category catalog: triggers, actions,
//! constraints and variables. kbtext renders it to a hand-editable text
//! format and parses that text back.
//!
//! ## Format
//!
//! ```text
//! ### BASE DE CONHECIMENTO ###
//!
//! ## GATILHOS
//!   - Customer asks for refund
//!     - Within 30 days
//!       - Note: Check the receipt
//!
//! ## AÇÕES
//!   (nenhum)
//!
//! ## RESTRIÇÕES
//!   (nenhum)
//!
//! ## VARIÁVEIS
//!   - Login (Tipo: String, Segura)
//! ```
//!
//! Parsing is tolerant: lines that do not fit the current section are
//! skipped, and the parse only fails when nothing at all was recognized.
//!
//! ## Modules
//!
//! - [`knowledge`]: Data model, serializer, parser and file store
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod knowledge;

pub use config::KbConfig;
pub use error::{Error, FormatError, Result};
pub use knowledge::{parse, serialize, KnowledgeBase};
