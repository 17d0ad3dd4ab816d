use crate::error::IngestError;
use crate::ingestion_service::IngestionService;
use crate::models::*;
use crate::state::{SharedState, Transition};
use std::sync::Arc;
use std::time::Duration;

pub const NO_PDF_MESSAGE: &str = "No PDF files found. Please select PDF files only.";
pub const UPLOAD_BUSY_MESSAGE: &str = "An upload is already in progress. Please wait for it to finish.";

pub struct UploadCoordinator {
    state: SharedState,
    ingestion: Arc<IngestionService>,
    upload_delay: Duration,
}

impl UploadCoordinator {
    pub fn new(state: SharedState, ingestion: Arc<IngestionService>, upload_delay: Duration) -> Self {
        Self {
            state,
            ingestion,
            upload_delay,
        }
    }

    /// Uploads the PDF files of one batch strictly one after another, pausing
    /// between consecutive files. Per-file failures are reported as messages
    /// and never stop the batch.
    pub async fn upload_batch(&self, files: Vec<AttachedFile>) -> BatchOutcome {
        let pdf_files: Vec<AttachedFile> = files.into_iter().filter(AttachedFile::is_pdf).collect();
        let total = pdf_files.len();

        {
            let mut state = self.state.write().await;

            if pdf_files.is_empty() {
                state.apply(error_message(NO_PDF_MESSAGE.to_string()));
                return BatchOutcome::NoPdfFiles;
            }

            if state.is_uploading() {
                log::warn!("Rejected batch of {} file(s): upload already running", total);
                state.apply(error_message(UPLOAD_BUSY_MESSAGE.to_string()));
                return BatchOutcome::AlreadyUploading;
            }

            state.apply(Transition::UploadingChanged(true));
            state.apply(Transition::FilesAttached(pdf_files.clone()));
            state.apply(system_message(format!("Starting upload of {} PDF file(s)...", total)));
        }

        log::info!("Starting batch of {} PDF file(s)", total);
        let mut succeeded = 0;

        for (index, file) in pdf_files.iter().enumerate() {
            self.state.write().await.apply(Transition::UploadStarted(file.id));

            let result = self.ingestion.ingest(file).await;
            let success = result.is_ok();
            if success {
                succeeded += 1;
            }

            let message = match result {
                Ok(()) => system_message(format!(
                    "File \"{}\" uploaded to vector database successfully!",
                    file.name
                )),
                Err(IngestError::Status { status, message: None }) => error_message(format!(
                    "Failed to upload \"{}\". Status: {}",
                    file.name, status
                )),
                Err(e) => {
                    log::error!("Error uploading {}: {}", file.name, e);
                    error_message(format!("Error uploading \"{}\": {}", file.name, e))
                }
            };

            {
                let mut state = self.state.write().await;
                state.apply(Transition::UploadFinished { id: file.id, success });
                state.apply(message);
            }

            if index + 1 < total {
                log::debug!("Waiting {:?} before next upload", self.upload_delay);
                tokio::time::sleep(self.upload_delay).await;
            }
        }

        let mut state = self.state.write().await;
        state.apply(system_message(format!(
            "Upload complete! {} out of {} files uploaded successfully. \
             You can now ask questions about the uploaded documents.",
            succeeded, total
        )));
        state.apply(Transition::UploadingChanged(false));

        log::info!("Batch finished: {}/{} uploaded", succeeded, total);
        BatchOutcome::Completed(BatchSummary { succeeded, total })
    }
}

fn system_message(content: String) -> Transition {
    Transition::MessageAppended {
        kind: MessageKind::System,
        content,
    }
}

fn error_message(content: String) -> Transition {
    Transition::MessageAppended {
        kind: MessageKind::Error,
        content,
    }
}
