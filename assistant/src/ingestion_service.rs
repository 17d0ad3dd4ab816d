use crate::error::{extract_error_message, IngestError};
use crate::file_encoder::encode_file;
use crate::models::*;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub struct IngestionService {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl IngestionService {
    pub fn new(client: Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Sends one file to the ingestion webhook. Only a 200 counts as success,
    /// the response body is not otherwise inspected.
    pub async fn ingest(&self, file: &AttachedFile) -> Result<(), IngestError> {
        let inputfile = encode_file(file).await?;

        let request = IngestRequest {
            inputfile,
            file_name: file.name.clone(),
            document_title: file.document_title(),
        };

        log::info!(
            "Uploading {} ({} base64 chars) to ingestion endpoint",
            file.name,
            request.inputfile.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Ingestion of {} failed with status {}", file.name, status);
            return Err(IngestError::Status {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        log::info!("Ingested {}", file.name);
        Ok(())
    }
}
