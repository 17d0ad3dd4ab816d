use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use uuid::Uuid;

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const OCTET_STREAM_MIME_TYPE: &str = "application/octet-stream";

/// Where the bytes of an attached file come from.
#[derive(Debug, Clone)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct AttachedFile {
    pub id: Uuid,
    pub name: String,
    pub mime_type: String,
    pub source: FileSource,
}

impl AttachedFile {
    /// Declares the media type from the extension, the way a browser file
    /// picker does. The file itself is only read when it gets encoded.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);

        let mime_type = if is_pdf { PDF_MIME_TYPE } else { OCTET_STREAM_MIME_TYPE };

        Self {
            id: Uuid::new_v4(),
            name,
            mime_type: mime_type.to_string(),
            source: FileSource::Path(path.to_path_buf()),
        }
    }

    pub fn from_bytes(name: impl Into<String>, content: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mime_type: mime_type.into(),
            source: FileSource::Bytes(content),
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME_TYPE
    }

    /// File name with a trailing `.pdf` (any case) removed.
    pub fn document_title(&self) -> String {
        static PDF_SUFFIX: OnceLock<Regex> = OnceLock::new();
        let re = PDF_SUFFIX.get_or_init(|| Regex::new(r"(?i)\.pdf$").expect("valid regex"));
        re.replace(&self.name, "").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadState {
    Uploading,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadStatus {
    pub state: UploadState,
    pub progress: u8,
}

impl UploadStatus {
    pub fn uploading() -> Self {
        Self {
            state: UploadState::Uploading,
            progress: 0,
        }
    }

    pub fn finished(success: bool) -> Self {
        Self {
            state: if success { UploadState::Success } else { UploadState::Error },
            progress: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Ai,
    System,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct IngestRequest {
    pub inputfile: String,
    pub file_name: String,
    pub document_title: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionRequest<'a> {
    pub input: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    Completed(BatchSummary),
    NoPdfFiles,
    AlreadyUploading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskOutcome {
    Answered,
    Failed,
    Ignored,
    AlreadyWaiting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_extension_declares_pdf_type() {
        let file = AttachedFile::from_path("/tmp/docs/Report.PDF");
        assert_eq!(file.name, "Report.PDF");
        assert!(file.is_pdf());

        let other = AttachedFile::from_path("/tmp/docs/notes.txt");
        assert_eq!(other.mime_type, OCTET_STREAM_MIME_TYPE);
        assert!(!other.is_pdf());
    }

    #[test]
    fn document_title_strips_only_trailing_suffix() {
        let title = |name: &str| AttachedFile::from_bytes(name, vec![], PDF_MIME_TYPE).document_title();

        assert_eq!(title("annual.pdf"), "annual");
        assert_eq!(title("scan.PDF"), "scan");
        assert_eq!(title("a.pdf.backup.pdf"), "a.pdf.backup");
        assert_eq!(title("no-extension"), "no-extension");
    }

    #[test]
    fn finished_status_is_always_complete() {
        assert_eq!(UploadStatus::uploading().progress, 0);
        assert_eq!(UploadStatus::finished(true).state, UploadState::Success);
        assert_eq!(UploadStatus::finished(false).state, UploadState::Error);
        assert_eq!(UploadStatus::finished(false).progress, 100);
    }

    #[test]
    fn message_kind_serializes_lowercase() {
        let json = serde_json::to_string(&MessageKind::Ai).unwrap();
        assert_eq!(json, "\"ai\"");
    }
}
