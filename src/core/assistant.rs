// src/core/assistant.rs — Session controller: fetch and chat transitions

use std::sync::Arc;

use super::generator::ResponseGenerator;
use super::session::{ChatTurn, Notice, Session};
use crate::service::{self, DataService, FetchParameters};

pub const NO_DATA_REPLY: &str = "No data available. Please fetch data from the service first.";
pub const FETCH_SUCCESS: &str = "Data fetched successfully!";
pub const FETCH_FAILURE: &str = "Failed to fetch data. Check the logs for details.";
pub const GENERATION_FAILURE: &str = "Failed to generate a response. Check the logs for details.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing recorded.
    Ignored,
    /// No data yet; answered with the fixed reply.
    NoData,
    Answered,
    /// Human turn recorded, model call failed.
    GenerationFailed,
}

/// Routes user actions to the data service and the generator.
#[derive(Clone)]
pub struct Assistant {
    service: Arc<dyn DataService>,
    generator: Arc<dyn ResponseGenerator>,
}

impl Assistant {
    pub fn new(service: Arc<dyn DataService>, generator: Arc<dyn ResponseGenerator>) -> Self {
        Self { service, generator }
    }

    /// On success the payload replaces any earlier one. On failure `data` and the
    /// transcript are left as they were and an error banner is queued.
    pub async fn fetch(&self, session: &mut Session, params: FetchParameters) -> FetchOutcome {
        session.settings = params.clone();
        match service::fetch_or_log(self.service.as_ref(), &params).await {
            Some(payload) => {
                tracing::info!(
                    session = %session.id,
                    sbs = %params.sbs,
                    user = %params.logged_user_id,
                    "data fetched"
                );
                session.set_data(payload);
                session.set_notice(Notice::success(FETCH_SUCCESS));
                FetchOutcome::Fetched
            }
            None => {
                session.set_notice(Notice::error(FETCH_FAILURE));
                FetchOutcome::Failed
            }
        }
    }

    /// Record a user message and the assistant's reply.
    pub async fn submit(&self, session: &mut Session, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }

        session.push_turn(ChatTurn::human(text));

        let Some(data) = session.data().cloned() else {
            session.push_turn(ChatTurn::ai(NO_DATA_REPLY));
            return SubmitOutcome::NoData;
        };

        match self.generator.generate(text, &data).await {
            Ok(answer) => {
                session.push_turn(ChatTurn::ai(answer));
                SubmitOutcome::Answered
            }
            Err(e) => {
                tracing::error!(session = %session.id, "Error generating response: {e}");
                session.set_notice(Notice::error(GENERATION_FAILURE));
                SubmitOutcome::GenerationFailed
            }
        }
    }
}
