use anyhow::Result;
use clap::Parser;
use pdf_assistant::Config;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "pdf-chat", version, about = "Upload PDFs and ask questions about their content")]
pub struct Args {
    /// PDF files to upload right away
    pub files: Vec<PathBuf>,

    /// Ingestion webhook URL (overrides PDF_CHAT_INGEST_URL)
    #[arg(long)]
    pub ingest_url: Option<String>,

    /// Question-answering webhook URL (overrides PDF_CHAT_QA_URL)
    #[arg(long)]
    pub qa_url: Option<String>,

    /// Pause between uploads in milliseconds (overrides PDF_CHAT_UPLOAD_DELAY_MS)
    #[arg(long)]
    pub upload_delay_ms: Option<u64>,
}

impl Args {
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::from_env()?;

        if let Some(url) = &self.ingest_url {
            config.ingest_url = url.clone();
        }
        if let Some(url) = &self.qa_url {
            config.qa_url = url.clone();
        }
        if let Some(ms) = self.upload_delay_ms {
            config.upload_delay = Duration::from_millis(ms);
        }

        Ok(config)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Add(Vec<PathBuf>),
    Files,
    Remove(String),
    Clear,
    Help,
    Quit,
    Ask(String),
    Unknown(String),
    Empty,
}

pub fn parse_line(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }

    if !trimmed.starts_with('/') {
        return Command::Ask(line.to_string());
    }

    let (name, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (trimmed, ""),
    };

    match name {
        "/add" | "/drop" => Command::Add(rest.split_whitespace().map(PathBuf::from).collect()),
        "/files" | "/ls" => Command::Files,
        "/remove" | "/rm" => Command::Remove(rest.to_string()),
        "/clear" => Command::Clear,
        "/help" | "/?" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

pub const HELP: &str = "\
Commands:
  /add <path>...        upload PDF files (non-PDF files are skipped)
  /files                list attached files and their upload status
  /remove <name|index>  remove a file from the list
  /clear                clear files, statuses and messages
  /help                 show this help
  /quit                 leave
Anything else is sent as a question about the uploaded documents.";
