use anyhow::{Context, Result};
use gordon_cli::{handle_command, render_message, CommandResult};
use gordon_core::{GeminiClient, SessionController, Settings, StateChange};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

fn build_session(settings: &Settings) -> Result<SessionController> {
    let client = GeminiClient::from_settings(settings).context("Failed to configure client")?;
    tracing::debug!(
        "Session ready (text model {}, image model {})",
        client.text_model(),
        client.image_model()
    );
    let mut session = SessionController::new(Arc::new(client));
    session.state_mut().subscribe(|_, change| {
        if let StateChange::BusyChanged(true) = change {
            eprintln!("(thinking...)");
        }
    });
    Ok(session)
}

// ── Single prompt ───────────────────────────────────────────────────────

pub async fn run_single_prompt(
    settings: &Settings,
    prompt: Option<&str>,
    image: Option<&Path>,
) -> Result<()> {
    let mut session = build_session(settings)?;

    if let Some(text) = prompt {
        session.state_mut().set_text(text);
    }
    if let Some(path) = image {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        session.state_mut().set_image(bytes);
    }

    match session.send_and_wait().await? {
        Some(reply) => println!("{}", reply.text().unwrap_or_default()),
        None => eprintln!("Nothing to send."),
    }
    Ok(())
}

// ── Interactive REPL ────────────────────────────────────────────────────

pub async fn run_repl(settings: &Settings) -> Result<()> {
    let mut session = build_session(settings)?;

    println!("Gordon - type a message, /image <path> to attach a photo, /help for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match handle_command(input) {
            CommandResult::Quit => break,
            CommandResult::Message(msg) => println!("{msg}"),
            CommandResult::AttachImage(path) => match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    println!("Attached {} ({} bytes)", path.display(), bytes.len());
                    session.state_mut().set_image(bytes);
                }
                Err(e) => eprintln!("Could not read {}: {e}", path.display()),
            },
            CommandResult::ClearImage => {
                session.state_mut().clear_image();
                println!("Image removed.");
            }
            CommandResult::ShowHistory => {
                if session.conversation().is_empty() {
                    println!("No messages yet.");
                }
                for message in session.conversation() {
                    println!("{}", render_message(message));
                }
            }
            CommandResult::ShowStatus => {
                let pending = session.pending_input();
                println!("Text model:  {}", settings.text_model);
                println!("Image model: {}", settings.image_model);
                println!("Messages:    {}", session.conversation().len());
                println!(
                    "Attachment:  {}",
                    pending
                        .image()
                        .map(|b| format!("{} bytes", b.len()))
                        .unwrap_or_else(|| "none".into())
                );
            }
            CommandResult::NotACommand => {
                session.state_mut().set_text(input);
                match session.send_and_wait().await {
                    Ok(Some(reply)) => println!("{}", render_message(&reply)),
                    Ok(None) => {}
                    Err(e) => eprintln!("{e}"),
                }
            }
        }
    }

    Ok(())
}
