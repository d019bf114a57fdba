//! Athena chat interface
//!
//! Browser front end for the Athena business-intelligence assistant.
//! The page posts questions to a remote HTTP API and renders answers,
//! data previews and clarifying questions into a chat transcript.
//!
//! Architecture mirrors the footer widget: pure, natively-testable
//! model and wire types here, with the DOM and fetch plumbing behind
//! the `wasm` feature.
//!
//! - [`config`]: API endpoint settings and storage keys
//! - [`state`]: conversation model and send gating
//! - [`api`]: JSON request/response types for the backend
//! - [`format`]: cell formatting and currency highlighting
//! - [`storage`]: transcript snapshots for reload recovery

pub mod api;
pub mod config;
pub mod format;
pub mod state;
pub mod storage;

pub use api::{ChatRequest, ChatResponse, Clarification, DataPreview, SessionInfo, SessionList};
pub use config::ApiConfig;
pub use state::{
    generate_session_id, ChatState, ConnectionStatus, InterfaceState, Message, MessageRole,
};
pub use storage::ConversationSnapshot;

#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;
