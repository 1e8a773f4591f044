// src/web/types.rs

use serde::{Deserialize, Serialize};

use crate::core::session::{ChatTurn, Session, SessionPhase};
use crate::service::FetchParameters;

/// Sidebar form.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchForm {
    #[serde(default)]
    pub sbs: String,
    #[serde(default)]
    pub logged_user_id: String,
}

impl FetchForm {
    pub fn into_params(self) -> FetchParameters {
        FetchParameters::new(self.sbs, self.logged_user_id)
    }
}

/// Chat input box.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: String,
}

/// JSON view of a session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: String,
    pub phase: SessionPhase,
    pub has_data: bool,
    pub settings: FetchParameters,
    pub history: Vec<ChatTurn>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            phase: session.phase(),
            has_data: session.data().is_some(),
            settings: session.settings.clone(),
            history: session.history().iter().cloned().collect(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
