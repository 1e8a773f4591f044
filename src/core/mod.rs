// src/core/mod.rs — Conversation core: session state, formatting, generation

pub mod assistant;
pub mod format;
pub mod generator;
pub mod prompt;
pub mod session;

pub use assistant::{Assistant, FetchOutcome, SubmitOutcome};
pub use generator::{AnalystChain, ResponseGenerator};
pub use session::{ChatTurn, Session, SessionPhase, Speaker};
