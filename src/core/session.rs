// src/core/session.rs — Per-user conversation state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::{FetchParameters, RemotePayload};

pub const GREETING: &str = "Hello! I'm a data assistant. Ask me anything about your data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    #[serde(rename = "AI")]
    Ai,
    Human,
}

impl Speaker {
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Ai => "AI",
            Speaker::Human => "Human",
        }
    }
}

/// One message in the transcript. Fields are private so a turn cannot change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    speaker: Speaker,
    content: String,
    created_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(Speaker::Ai, content)
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self::new(Speaker::Human, content)
    }

    fn new(speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            speaker,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Append-only transcript; insertion order is display order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatTurn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }
}

impl<'a> IntoIterator for &'a ChatHistory {
    type Item = &'a ChatTurn;
    type IntoIter = std::slice::Iter<'a, ChatTurn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Banner shown once on the next render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    NoData,
    DataFetched,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    history: ChatHistory,
    data: Option<RemotePayload>,
    notice: Option<Notice>,
    /// Values last entered in the settings fields.
    pub settings: FetchParameters,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Fresh session: no data and a single greeting from the assistant.
    pub fn new(settings: FetchParameters) -> Self {
        let mut history = ChatHistory::default();
        history.push(ChatTurn::ai(GREETING));
        Self {
            id: Uuid::new_v4().to_string(),
            history,
            data: None,
            notice: None,
            settings,
            created_at: Utc::now(),
        }
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn push_turn(&mut self, turn: ChatTurn) {
        self.history.push(turn);
    }

    pub fn data(&self) -> Option<&RemotePayload> {
        self.data.as_ref()
    }

    /// Replace (never merge) the stored payload.
    pub fn set_data(&mut self, payload: RemotePayload) {
        self.data = Some(payload);
    }

    pub fn phase(&self) -> SessionPhase {
        if self.data.is_some() {
            SessionPhase::DataFetched
        } else {
            SessionPhase::NoData
        }
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> Session {
        Session::new(FetchParameters::new("2", "141"))
    }

    #[test]
    fn test_new_session_seeded_with_greeting() {
        let s = session();
        assert_eq!(s.history().len(), 1);
        let first = s.history().last().unwrap();
        assert_eq!(first.speaker(), Speaker::Ai);
        assert_eq!(first.content(), GREETING);
        assert_eq!(s.phase(), SessionPhase::NoData);
        assert!(s.data().is_none());
    }

    #[test]
    fn test_set_data_overwrites() {
        let mut s = session();
        s.set_data(RemotePayload::new(json!({"a": "1"})));
        s.set_data(RemotePayload::new(json!({"b": "2"})));
        assert_eq!(s.data().unwrap().as_value(), &json!({"b": "2"}));
        assert_eq!(s.phase(), SessionPhase::DataFetched);
    }

    #[test]
    fn test_notice_is_one_shot() {
        let mut s = session();
        s.set_notice(Notice::success("ok"));
        assert_eq!(s.take_notice().unwrap().kind, NoticeKind::Success);
        assert!(s.take_notice().is_none());
    }

    #[test]
    fn test_history_serializes_in_order() {
        let mut s = session();
        s.push_turn(ChatTurn::human("Hi"));
        let v = serde_json::to_value(s.history()).unwrap();
        assert_eq!(v[0]["speaker"], "AI");
        assert_eq!(v[1]["speaker"], "Human");
        assert_eq!(v[1]["content"], "Hi");
    }

    #[test]
    fn test_session_ids_unique() {
        assert_ne!(session().id, session().id);
    }
}
