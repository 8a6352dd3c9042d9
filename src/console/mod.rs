//! Line-oriented terminal front-end.
//!
//! Reads one command per line, applies it to a [`Session`] and prints the screen selected
//! by the view-mode controller.

mod command;
mod render;

pub use command::{parse_command, Command, HELP};
pub use render::*;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::notify::{Notifier, Severity};
use crate::session::Session;
use crate::views::detail_sections;

/// Notifier printing to stdout, mirrored into the trace log.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success => {
                tracing::info!(%severity, "{}", message);
                println!("[ok] {}", message);
            }
            Severity::Error => {
                tracing::error!(%severity, "{}", message);
                println!("[error] {}", message);
            }
        }
    }
}

/// Render whatever screen the controller currently selects.
pub fn render_screen(session: &Session) -> String {
    use crate::controller::ViewMode;

    match session.mode() {
        ViewMode::List => render_list(session.store(), session.list()),
        ViewMode::Create | ViewMode::Edit(_) => match session.form() {
            Some(form) => render_form(form),
            None => String::new(),
        },
        ViewMode::View(record) => render_detail(&detail_sections(record)),
    }
}

/// Drive a session from `input` until it ends or the user quits.
pub async fn run<R, W>(session: &mut Session, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    if session.mount().await.is_err() {
        tracing::warn!("Initial load failed; use `refresh` to retry");
    }
    write_block(&mut output, &render_screen(session)).await?;

    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                write_block(&mut output, &message).await?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Delete(id) => {
                let pending = session.request_delete(id);
                output
                    .write_all(format!("Delete record {}? [y/N] ", id).as_bytes())
                    .await?;
                output.flush().await?;
                let answer = lines.next_line().await?.unwrap_or_default();
                if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
                    if let Err(e) = session.confirm_delete(pending).await {
                        tracing::debug!("Delete of {} failed: {}", id, e);
                    }
                } else {
                    write_block(&mut output, "Delete cancelled").await?;
                }
            }
            other => {
                if let Some(message) = command::apply(session, other).await {
                    write_block(&mut output, &message).await?;
                }
            }
        }
        write_block(&mut output, &render_screen(session)).await?;
    }

    Ok(())
}

async fn write_block<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> std::io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    output.write_all(text.as_bytes()).await?;
    if !text.ends_with('\n') {
        output.write_all(b"\n").await?;
    }
    output.flush().await
}
