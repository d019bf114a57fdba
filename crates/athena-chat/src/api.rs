//! Wire types for the chat API
//!
//! The backend is a black box reached over HTTP; these types mirror its
//! documented JSON contract. Everything optional in the responses stays
//! `Option` so a sparse payload deserializes without error.
//!
//! Endpoints:
//! - `POST /chat`: send a message, receive an answer plus metadata
//! - `GET /sessions`: list stored conversations
//! - `GET /sessions/latest`: most recent conversation with messages
//! - `GET /sessions/{id}/messages`: one conversation's messages
//! - `GET /healthz`: connection test

use serde::{Deserialize, Serialize};

use crate::state::{Message, MessageRole};

/// Request body for `POST /chat`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
    pub title: Option<String>,
}

/// Response body for `POST /chat`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The answer text (Markdown, rendered by the page's library)
    #[serde(default)]
    pub answer: String,
    /// Tabular result preview, when the answer was backed by a query
    #[serde(default)]
    pub data_preview: Option<DataPreview>,
    /// The SQL the backend ran, when applicable
    #[serde(default)]
    pub sql: Option<String>,
    /// Server-side latency for the answer
    #[serde(default)]
    pub latency_ms: Option<u32>,
    /// A clarifying question with selectable options
    #[serde(default)]
    pub clarify: Option<Clarification>,
}

/// Tabular preview attached to an answer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPreview {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub elapsed_ms: Option<u64>,
}

/// A clarifying question the assistant wants answered before
/// proceeding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clarification {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// One stored conversation, as listed by the sessions endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Response body for `GET /sessions`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionList {
    #[serde(default)]
    pub sessions: Vec<SessionInfo>,
}

/// Response body for `GET /sessions/latest`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LatestSession {
    #[serde(default)]
    pub session: Option<SessionInfo>,
    #[serde(default)]
    pub messages: Vec<HistoryMessage>,
}

/// Response body for `GET /sessions/{id}/messages`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionMessages {
    #[serde(default)]
    pub messages: Vec<HistoryMessage>,
}

/// One stored message as the history endpoints report it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl HistoryMessage {
    /// Convert a stored message into a renderable one.
    ///
    /// Roles other than `user`/`assistant` (tool traces, system notes)
    /// are not part of the rendered transcript and map to `None`.
    pub fn into_message(self, user_name: &str) -> Option<Message> {
        let (role, sender) = match self.role.as_str() {
            "user" => (MessageRole::User, user_name.to_string()),
            "assistant" => (MessageRole::Assistant, "Athena".to_string()),
            _ => return None,
        };
        Some(Message {
            id: 0,
            role,
            content: self.content,
            sender,
            timestamp: self.created_at.unwrap_or_default(),
            latency_ms: None,
            is_error: false,
            data_preview: None,
            sql: None,
            clarify: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serialization() {
        let req = ChatRequest {
            session_id: "athena_1_abc".to_string(),
            message: "revenue by region".to_string(),
            title: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""session_id":"athena_1_abc""#));
        assert!(json.contains(r#""title":null"#));
    }

    #[test]
    fn test_chat_response_sparse_payload() {
        let resp: ChatResponse = serde_json::from_str(r#"{"answer": "42"}"#).unwrap();
        assert_eq!(resp.answer, "42");
        assert!(resp.data_preview.is_none());
        assert!(resp.clarify.is_none());
        assert!(resp.latency_ms.is_none());
    }

    #[test]
    fn test_chat_response_full_payload() {
        let json = r#"{
            "answer": "Here you go",
            "sql": "SELECT region, SUM(amount) FROM sales GROUP BY region",
            "latency_ms": 412,
            "data_preview": {
                "columns": ["region", "total"],
                "rows": [{"region": "APAC", "total": 1250000}],
                "elapsed_ms": 38
            },
            "clarify": {"question": "Which year?", "options": ["2024", "2025"]}
        }"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        let preview = resp.data_preview.unwrap();
        assert_eq!(preview.columns, vec!["region", "total"]);
        assert_eq!(preview.rows.len(), 1);
        assert_eq!(preview.elapsed_ms, Some(38));
        assert_eq!(resp.clarify.unwrap().options.len(), 2);
        assert_eq!(resp.latency_ms, Some(412));
    }

    #[test]
    fn test_history_message_role_mapping() {
        let user = HistoryMessage {
            role: "user".to_string(),
            content: "hello".to_string(),
            created_at: Some("2026-01-01T10:00:00Z".to_string()),
        };
        let msg = user.into_message("Seeker").unwrap();
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.sender, "Seeker");
        assert_eq!(msg.timestamp, "2026-01-01T10:00:00Z");

        let assistant = HistoryMessage {
            role: "assistant".to_string(),
            content: "hi".to_string(),
            created_at: None,
        };
        assert_eq!(
            assistant.into_message("Seeker").unwrap().sender,
            "Athena"
        );

        let tool = HistoryMessage {
            role: "tool".to_string(),
            content: "trace".to_string(),
            created_at: None,
        };
        assert!(tool.into_message("Seeker").is_none());
    }

    #[test]
    fn test_latest_session_without_history() {
        let latest: LatestSession = serde_json::from_str("{}").unwrap();
        assert!(latest.session.is_none());
        assert!(latest.messages.is_empty());
    }
}
