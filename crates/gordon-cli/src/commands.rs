use std::path::PathBuf;

/// Result of processing a slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Quit the application.
    Quit,
    /// Attach an image file to the next message.
    AttachImage(PathBuf),
    /// Drop the attached image.
    ClearImage,
    /// Print the transcript.
    ShowHistory,
    /// Show status (models, message count, attachment).
    ShowStatus,
    /// Not a command - treat as regular input.
    NotACommand,
}

pub fn handle_command(input: &str) -> CommandResult {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,
        "/image" | "/img" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /image <path-to-image>".into())
            } else {
                CommandResult::AttachImage(PathBuf::from(arg))
            }
        }
        "/clear-image" => CommandResult::ClearImage,
        "/history" => CommandResult::ShowHistory,
        "/status" => CommandResult::ShowStatus,
        "/version" => CommandResult::Message(format!("Gordon CLI v{}", env!("CARGO_PKG_VERSION"))),
        _ => {
            if input.starts_with('/') {
                CommandResult::Message(format!("Unknown command: {cmd}. Type /help for commands."))
            } else {
                CommandResult::NotACommand
            }
        }
    }
}

fn show_help() -> CommandResult {
    let help_text = "\
Commands:
  /image <path>        Attach an image to the next message
  /clear-image         Remove the attached image
  /history             Show the conversation so far
  /status              Show models and session state
  /version             Show version information
  /help, /h            Show this help message
  /exit, /quit, /q     Quit

Anything else is sent as a message. With an image attached, the text is
sent as the question about the image.";

    CommandResult::Message(help_text.into())
}
