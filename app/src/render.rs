use colored::Colorize;
use pdf_assistant::{ChatMessage, MessageKind, SessionState, UploadState, UploadStatus};

pub fn badge_text(state: UploadState) -> &'static str {
    match state {
        UploadState::Uploading => "⏳ Uploading...",
        UploadState::Success => "✅ Success",
        UploadState::Error => "❌ Error",
    }
}

fn badge(status: &UploadStatus) -> String {
    let text = badge_text(status.state);
    match status.state {
        UploadState::Uploading => text.yellow().to_string(),
        UploadState::Success => text.green().to_string(),
        UploadState::Error => text.red().to_string(),
    }
}

pub fn label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::User => "You",
        MessageKind::Ai => "AI",
        MessageKind::System => "System",
        MessageKind::Error => "Error",
    }
}

pub fn message_line(message: &ChatMessage) -> String {
    let label = label(message.kind);
    let label = match message.kind {
        MessageKind::User => label.cyan().bold(),
        MessageKind::Ai => label.green().bold(),
        MessageKind::System => label.blue(),
        MessageKind::Error => label.red().bold(),
    };

    format!(
        "{} {}: {}",
        format!("[{}]", message.timestamp).dimmed(),
        label,
        message.content
    )
}

pub fn file_lines(state: &SessionState) -> Vec<String> {
    let files = state.files();
    let mut lines = vec![format!("📄 {} file(s) uploaded", files.len()).bold().to_string()];

    for (index, file) in files.iter().enumerate() {
        let line = match state.status(&file.id) {
            Some(status) => format!("  {}. {}  {}", index + 1, file.name, badge(status)),
            None => format!("  {}. {}", index + 1, file.name),
        };
        lines.push(line);
    }

    lines
}

pub fn drop_zone() -> String {
    format!(
        "{}\n{}",
        "📁 Add PDF files with /add <path>..., or pass them on the command line",
        "Supports multiple .pdf files".dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_assistant::{AttachedFile, Transition, PDF_MIME_TYPE};

    #[test]
    fn badges_are_distinct() {
        let badges = [
            badge_text(UploadState::Uploading),
            badge_text(UploadState::Success),
            badge_text(UploadState::Error),
        ];
        assert_eq!(badges, ["⏳ Uploading...", "✅ Success", "❌ Error"]);
    }

    #[test]
    fn file_list_shows_badge_only_once_started() {
        colored::control::set_override(false);

        let mut state = SessionState::new();
        let started = AttachedFile::from_bytes("a.pdf", vec![], PDF_MIME_TYPE);
        let waiting = AttachedFile::from_bytes("b.pdf", vec![], PDF_MIME_TYPE);
        let id = started.id;
        state.apply(Transition::FilesAttached(vec![started, waiting]));
        state.apply(Transition::UploadFinished { id, success: false });

        let lines = file_lines(&state);
        assert_eq!(lines[0], "📄 2 file(s) uploaded");
        assert_eq!(lines[1], "  1. a.pdf  ❌ Error");
        assert_eq!(lines[2], "  2. b.pdf");
    }

    #[test]
    fn message_line_carries_label_and_time() {
        colored::control::set_override(false);

        let message = ChatMessage {
            id: 1,
            kind: MessageKind::Ai,
            content: "Paris".to_string(),
            timestamp: "10:15:00".to_string(),
        };
        assert_eq!(message_line(&message), "[10:15:00] AI: Paris");
    }
}
