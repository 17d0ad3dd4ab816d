use crate::models::*;
use crate::qa_service::QaService;
use crate::state::{SharedState, Transition};
use std::sync::Arc;

pub const CHAT_BUSY_MESSAGE: &str = "Still waiting for the previous answer. Please wait.";

pub struct ChatCoordinator {
    state: SharedState,
    qa: Arc<QaService>,
}

impl ChatCoordinator {
    pub fn new(state: SharedState, qa: Arc<QaService>) -> Self {
        Self { state, qa }
    }

    pub async fn ask(&self, question: &str) -> AskOutcome {
        if question.trim().is_empty() {
            return AskOutcome::Ignored;
        }

        {
            let mut state = self.state.write().await;

            if !state.has_files() {
                return AskOutcome::Ignored;
            }

            if state.is_loading() {
                state.apply(Transition::MessageAppended {
                    kind: MessageKind::Error,
                    content: CHAT_BUSY_MESSAGE.to_string(),
                });
                return AskOutcome::AlreadyWaiting;
            }

            state.apply(Transition::MessageAppended {
                kind: MessageKind::User,
                content: question.to_string(),
            });
            state.apply(Transition::LoadingChanged(true));
        }

        let result = self.qa.ask(question).await;

        let mut state = self.state.write().await;
        let outcome = match result {
            Ok(answer) => {
                state.apply(Transition::MessageAppended {
                    kind: MessageKind::Ai,
                    content: answer.into_text(),
                });
                AskOutcome::Answered
            }
            Err(e) => {
                log::error!("Error getting AI response: {}", e);
                state.apply(Transition::MessageAppended {
                    kind: MessageKind::Error,
                    content: format!("Failed to get AI response: {}. Please try again.", e),
                });
                AskOutcome::Failed
            }
        };
        state.apply(Transition::LoadingChanged(false));

        outcome
    }
}
