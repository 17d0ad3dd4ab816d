use crate::error::EncodeError;
use crate::models::{AttachedFile, FileSource};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Base64 text of the file contents, without any `data:` URL prefix.
pub async fn encode_file(file: &AttachedFile) -> Result<String, EncodeError> {
    match &file.source {
        FileSource::Bytes(content) => Ok(encode_bytes(content)),
        FileSource::Path(path) => {
            let content = tokio::fs::read(path).await.map_err(|source| EncodeError {
                path: path.clone(),
                source,
            })?;
            log::debug!("Read {} bytes from {}", content.len(), path.display());
            Ok(encode_bytes(&content))
        }
    }
}

pub fn encode_bytes(content: &[u8]) -> String {
    STANDARD.encode(content)
}
