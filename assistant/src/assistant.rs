use crate::chat_coordinator::ChatCoordinator;
use crate::config::Config;
use crate::ingestion_service::IngestionService;
use crate::models::*;
use crate::qa_service::QaService;
use crate::state::{SessionState, SharedState, Transition};
use crate::upload_coordinator::UploadCoordinator;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Owns the session state and routes every change through the coordinators
/// or the remove/clear transitions. Cheap to clone; clones share one session.
#[derive(Clone)]
pub struct Assistant {
    state: SharedState,
    uploads: Arc<UploadCoordinator>,
    chat: Arc<ChatCoordinator>,
}

impl Assistant {
    pub fn new(config: &Config) -> Self {
        let client = Client::new();
        let state: SharedState = Arc::new(RwLock::new(SessionState::new()));

        let ingestion = Arc::new(IngestionService::new(
            client.clone(),
            config.ingest_url.clone(),
            config.ingest_timeout,
        ));
        let qa = Arc::new(QaService::new(client, config.qa_url.clone(), config.qa_timeout));

        log::info!("Ingestion endpoint: {}", config.ingest_url);
        log::info!("Question-answering endpoint: {}", config.qa_url);

        Self {
            uploads: Arc::new(UploadCoordinator::new(state.clone(), ingestion, config.upload_delay)),
            chat: Arc::new(ChatCoordinator::new(state.clone(), qa)),
            state,
        }
    }

    pub async fn upload_batch(&self, files: Vec<AttachedFile>) -> BatchOutcome {
        self.uploads.upload_batch(files).await
    }

    pub async fn ask(&self, question: &str) -> AskOutcome {
        self.chat.ask(question).await
    }

    pub async fn remove_file(&self, name: &str) {
        self.state
            .write()
            .await
            .apply(Transition::FileRemoved(name.to_string()));
    }

    /// Removes the file at a 0-based position in the attached list.
    /// Returns the removed file's name.
    pub async fn remove_file_at(&self, index: usize) -> Option<String> {
        let mut state = self.state.write().await;
        let file = state.files().get(index)?;
        let (id, name) = (file.id, file.name.clone());
        state.apply(Transition::FileDetached(id));
        Some(name)
    }

    pub async fn clear(&self) {
        self.state.write().await.apply(Transition::Cleared);
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn messages_since(&self, seen: usize) -> Vec<ChatMessage> {
        let state = self.state.read().await;
        state.messages().iter().skip(seen).cloned().collect()
    }
}
