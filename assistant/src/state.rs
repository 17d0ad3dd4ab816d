use crate::models::*;
use chrono::{Local, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

pub type SharedState = Arc<RwLock<SessionState>>;

/// Every way the session state can change.
#[derive(Debug, Clone)]
pub enum Transition {
    FilesAttached(Vec<AttachedFile>),
    UploadStarted(Uuid),
    UploadFinished { id: Uuid, success: bool },
    MessageAppended { kind: MessageKind, content: String },
    FileRemoved(String),
    FileDetached(Uuid),
    UploadingChanged(bool),
    LoadingChanged(bool),
    Cleared,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    files: Vec<AttachedFile>,
    statuses: HashMap<Uuid, UploadStatus>,
    messages: Vec<ChatMessage>,
    uploading: bool,
    loading: bool,
    last_message_id: i64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::FilesAttached(files) => self.files.extend(files),
            Transition::UploadStarted(id) => self.set_status(id, UploadStatus::uploading()),
            Transition::UploadFinished { id, success } => {
                self.set_status(id, UploadStatus::finished(success))
            }
            Transition::MessageAppended { kind, content } => self.append_message(kind, content),
            Transition::FileRemoved(name) => {
                let statuses = &mut self.statuses;
                self.files.retain(|file| {
                    if file.name == name {
                        statuses.remove(&file.id);
                        false
                    } else {
                        true
                    }
                });
            }
            Transition::FileDetached(id) => {
                self.files.retain(|file| file.id != id);
                self.statuses.remove(&id);
            }
            Transition::UploadingChanged(uploading) => self.uploading = uploading,
            Transition::LoadingChanged(loading) => self.loading = loading,
            Transition::Cleared => {
                self.files.clear();
                self.statuses.clear();
                self.messages.clear();
            }
        }
    }

    pub fn files(&self) -> &[AttachedFile] {
        &self.files
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn status(&self, id: &Uuid) -> Option<&UploadStatus> {
        self.statuses.get(id)
    }

    pub fn status_count(&self) -> usize {
        self.statuses.len()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // A file removed mid-batch must not come back as an orphan status.
    fn set_status(&mut self, id: Uuid, status: UploadStatus) {
        if self.files.iter().any(|file| file.id == id) {
            self.statuses.insert(id, status);
        }
    }

    fn append_message(&mut self, kind: MessageKind, content: String) {
        let id = Utc::now().timestamp_millis().max(self.last_message_id + 1);
        self.last_message_id = id;

        self.messages.push(ChatMessage {
            id,
            kind,
            content,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        });
    }
}
