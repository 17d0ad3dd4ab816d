use crate::cli::{parse_line, Command, HELP};
use crate::render;
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pdf_assistant::{AskOutcome, Assistant, AttachedFile};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

pub struct Repl {
    assistant: Assistant,
    // Number of chat messages already printed.
    shown: usize,
}

impl Repl {
    pub fn new(assistant: Assistant) -> Self {
        Self { assistant, shown: 0 }
    }

    pub async fn run(mut self, initial_files: Vec<PathBuf>) -> Result<()> {
        println!("{}", "📄 PDF Chat Assistant".bold());
        println!("Upload PDFs and ask questions about their content. Type /help for commands.\n");

        if initial_files.is_empty() {
            println!("{}", render::drop_zone());
        } else {
            self.add_files(initial_files).await?;
        }

        let mut editor = DefaultEditor::new()?;

        loop {
            let line = tokio::task::block_in_place(|| editor.readline("> "));
            let line = match line {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            };

            if !line.trim().is_empty() {
                if let Err(e) = editor.add_history_entry(line.as_str()) {
                    log::debug!("Could not record history entry: {}", e);
                }
            }

            match parse_line(&line) {
                Command::Empty => {}
                Command::Add(paths) if paths.is_empty() => println!("Usage: /add <path>..."),
                Command::Add(paths) => self.add_files(paths).await?,
                Command::Files => self.show_files().await,
                Command::Remove(target) => self.remove(&target).await,
                Command::Clear => {
                    self.assistant.clear().await;
                    self.shown = 0;
                    println!("Cleared files and conversation.");
                    println!("{}", render::drop_zone());
                }
                Command::Help => println!("{}", HELP),
                Command::Quit => break,
                Command::Unknown(name) => println!("Unknown command {}. Type /help.", name),
                Command::Ask(question) => self.ask(question).await?,
            }
        }

        log::info!("Session ended");
        Ok(())
    }

    async fn add_files(&mut self, paths: Vec<PathBuf>) -> Result<()> {
        let files: Vec<AttachedFile> = paths.iter().map(AttachedFile::from_path).collect();
        let assistant = self.assistant.clone();

        self.while_busy("Uploading PDFs to vector database...", async move {
            assistant.upload_batch(files).await
        })
        .await?;

        self.show_files().await;
        Ok(())
    }

    async fn ask(&mut self, question: String) -> Result<()> {
        if !self.assistant.snapshot().await.has_files() {
            println!("Add at least one PDF with /add before asking questions.");
            return Ok(());
        }

        let assistant = self.assistant.clone();
        let outcome = self
            .while_busy("AI is typing...", async move { assistant.ask(&question).await })
            .await?;

        if outcome == AskOutcome::Ignored {
            log::debug!("Question ignored");
        }
        Ok(())
    }

    async fn remove(&mut self, target: &str) {
        if target.is_empty() {
            println!("Usage: /remove <name|index>");
            return;
        }

        let removed = match target.parse::<usize>() {
            Ok(position) if position > 0 => self.assistant.remove_file_at(position - 1).await,
            _ => {
                let exists = self
                    .assistant
                    .snapshot()
                    .await
                    .files()
                    .iter()
                    .any(|f| f.name == target);
                if exists {
                    self.assistant.remove_file(target).await;
                    Some(target.to_string())
                } else {
                    None
                }
            }
        };

        match removed {
            Some(name) => {
                println!("Removed {}", name);
                self.show_files().await;
            }
            None => println!("No attached file matches {}", target),
        }
    }

    async fn show_files(&self) {
        let state = self.assistant.snapshot().await;
        if state.has_files() {
            for line in render::file_lines(&state) {
                println!("{}", line);
            }
        } else {
            println!("{}", render::drop_zone());
        }
    }

    /// Runs `operation` in the background with a spinner, printing chat
    /// messages as the operation appends them.
    async fn while_busy<F, T>(&mut self, label: &'static str, operation: F) -> Result<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        spinner.set_message(label);
        spinner.enable_steady_tick(Duration::from_millis(120));

        let mut task = tokio::spawn(operation);
        let mut ticker = tokio::time::interval(Duration::from_millis(200));

        let result = loop {
            tokio::select! {
                joined = &mut task => break joined,
                _ = ticker.tick() => self.print_new_messages(Some(&spinner)).await,
            }
        };

        spinner.finish_and_clear();
        self.print_new_messages(None).await;

        result.context("background operation panicked")
    }

    async fn print_new_messages(&mut self, spinner: Option<&ProgressBar>) {
        let messages = self.assistant.messages_since(self.shown).await;
        self.shown += messages.len();

        for message in messages {
            let line = render::message_line(&message);
            match spinner {
                Some(spinner) => spinner.println(line),
                None => println!("{}", line),
            }
        }
    }
}
