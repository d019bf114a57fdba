//! Conversation persistence
//!
//! The transcript is mirrored into browser storage after every change
//! so a reload can restore it. The snapshot is versionless JSON; a
//! corrupt or stale blob is treated as absent rather than an error.

use serde::{Deserialize, Serialize};

use crate::state::Message;

/// What gets written to storage under `CONVERSATION_KEY`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationSnapshot {
    pub session_id: String,
    pub messages: Vec<Message>,
    /// Millisecond timestamp of the last change
    pub last_activity: u64,
}

impl ConversationSnapshot {
    pub fn new(session_id: String, messages: Vec<Message>, last_activity: u64) -> Self {
        Self {
            session_id,
            messages,
            last_activity,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Lossy restore: anything that fails to parse yields `None`.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}
