pub mod assistant;
pub mod chat_coordinator;
pub mod config;
pub mod error;
pub mod file_encoder;
pub mod ingestion_service;
pub mod models;
pub mod qa_service;
pub mod state;
pub mod upload_coordinator;

pub use assistant::Assistant;
pub use config::Config;
pub use error::{EncodeError, IngestError, QaError};
pub use models::*;
pub use qa_service::AnswerBody;
pub use state::{SessionState, Transition};
