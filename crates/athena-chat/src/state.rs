//! Conversation state
//!
//! Pure model for the chat interface:
//! - `ChatState`: the transcript, session identity and send gating
//! - `InterfaceState`: which of the two page layouts is visible
//! - `ConnectionStatus`: the indicator dot next to the config button
//!
//! The DOM layer consults this model and renders it; nothing in here
//! touches the browser.

use serde::{Deserialize, Serialize};

use crate::api::{Clarification, DataPreview};
use crate::config::ApiConfig;

/// Who produced a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// CSS class suffix for the message bubble.
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// One rendered transcript entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Per-conversation ordinal, stamped by [`ChatState::add_message`]
    #[serde(default)]
    pub id: u64,
    pub role: MessageRole,
    pub content: String,
    /// Display name shown above the bubble
    pub sender: String,
    /// Preformatted local-time string
    pub timestamp: String,
    #[serde(default)]
    pub latency_ms: Option<u32>,
    #[serde(default)]
    pub is_error: bool,
    #[serde(default)]
    pub data_preview: Option<DataPreview>,
    #[serde(default)]
    pub sql: Option<String>,
    #[serde(default)]
    pub clarify: Option<Clarification>,
}

impl Message {
    pub fn user(content: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            id: 0,
            role: MessageRole::User,
            content: content.into(),
            sender: sender.into(),
            timestamp: String::new(),
            latency_ms: None,
            is_error: false,
            data_preview: None,
            sql: None,
            clarify: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: 0,
            role: MessageRole::Assistant,
            content: content.into(),
            sender: "Athena".to_string(),
            timestamp: String::new(),
            latency_ms: None,
            is_error: false,
            data_preview: None,
            sql: None,
            clarify: None,
        }
    }

    /// An apology bubble for a failed request.
    pub fn error(content: impl Into<String>) -> Self {
        let mut msg = Self::assistant(content);
        msg.is_error = true;
        msg
    }
}

/// Which page layout is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InterfaceState {
    /// Centered greeting with the large input box
    #[default]
    Welcome,
    /// Scrolling transcript with the docked input bar
    Chat,
}

/// Reachability of the backend, as last observed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    Disconnected,
    Error,
}

impl ConnectionStatus {
    /// CSS class for the indicator dot (applied alongside
    /// `connection-dot`).
    pub fn css_class(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Error => "error",
        }
    }

    pub fn tooltip(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "Connecting...",
            ConnectionStatus::Connected => "Connected to Athena Intelligence",
            ConnectionStatus::Disconnected => "Disconnected",
            ConnectionStatus::Error => "Connection Error",
        }
    }
}

/// The whole conversation model.
#[derive(Clone, Debug)]
pub struct ChatState {
    pub session_id: String,
    pub messages: Vec<Message>,
    pub interface_state: InterfaceState,
    pub connection_status: ConnectionStatus,
    /// A request is in flight; sends are blocked until it resolves
    pub is_loading: bool,
    /// Display name for the user's own bubbles
    pub user_name: String,
    pub api_config: ApiConfig,
    next_message_id: u64,
}

impl ChatState {
    pub fn new(session_id: String, api_config: ApiConfig) -> Self {
        Self {
            session_id,
            messages: Vec::new(),
            interface_state: InterfaceState::Welcome,
            connection_status: ConnectionStatus::Connecting,
            is_loading: false,
            user_name: "Seeker".to_string(),
            api_config,
            next_message_id: 1,
        }
    }

    /// Append a message, stamping its id and timestamp. The first one
    /// flips the layout to the transcript view.
    pub fn add_message(&mut self, mut message: Message, timestamp: String) -> &Message {
        message.id = self.next_message_id;
        self.next_message_id += 1;
        message.timestamp = timestamp;
        self.messages.push(message);
        self.interface_state = InterfaceState::Chat;
        &self.messages[self.messages.len() - 1]
    }

    /// Drop the transcript and adopt a fresh session id.
    pub fn start_new_session(&mut self, session_id: String) {
        self.session_id = session_id;
        self.messages.clear();
        self.interface_state = InterfaceState::Welcome;
        self.is_loading = false;
        self.next_message_id = 1;
    }

    /// Whether a send is allowed right now.
    pub fn can_send(&self, text: &str) -> bool {
        let trimmed = text.trim();
        !self.is_loading
            && !trimmed.is_empty()
            && trimmed.chars().count() <= self.api_config.max_message_length
    }
}

/// Build a session id from a millisecond timestamp and a random value
/// in `[0, 1)`: `athena_<ms>_<9 base36 chars>`.
pub fn generate_session_id(now_ms: f64, entropy: f64) -> String {
    let clamped = entropy.clamp(0.0, 1.0 - f64::EPSILON);
    // 36^9 is about 1.0e14, well inside u64
    let scaled = (clamped * 36f64.powi(9)) as u64;
    let mut suffix = ['0'; 9];
    let mut rest = scaled;
    for slot in suffix.iter_mut().rev() {
        let digit = (rest % 36) as u32;
        *slot = char::from_digit(digit, 36).unwrap_or('0');
        rest /= 36;
    }
    let suffix: String = suffix.iter().collect();
    format!("athena_{}_{}", now_ms.max(0.0) as u64, suffix)
}
