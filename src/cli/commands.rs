//! Subcommand implementations

use crate::chat::{responder, ChatSession, WidgetSettings};
use crate::cli::output::Output;
use crate::routing::{Navigator, PageShell, Resolution, RouteTable};
use crate::types::{AppError, Result};
use crate::utils::toml_config::{ChatStrategy, SiteConfig};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;
use tracing::debug;

/// `routes`: list the table in registration order
pub fn list_routes(table: &RouteTable, output: &Output) {
    output.header("Routes");
    output.table_header(&["Path", "Page", "Chrome"]);
    for entry in table.entries() {
        output.table_row(&[
            &entry.path,
            entry.page.title(),
            if entry.chrome { "header+footer" } else { "none" },
        ]);
    }
    output.table_row(&["*", "redirect to /404", "none"]);
}

/// `resolve`: print how each path resolves
pub fn resolve_paths(table: &RouteTable, paths: &[String], output: &Output) -> Vec<Resolution> {
    paths
        .iter()
        .map(|path| {
            let resolution = table.resolve(path);
            print_resolution(path, &resolution, output);
            resolution
        })
        .collect()
}

fn print_resolution(path: &str, resolution: &Resolution, output: &Output) {
    let frame = PageShell::frame(resolution);
    if resolution.is_redirect() {
        output.warning(&format!(
            "{} -> {} ({}), redirected",
            path,
            resolution.location,
            resolution.page.title()
        ));
    } else {
        output.success(&format!("{} -> {}", path, resolution.page.title()));
    }
    output.kv("header", &frame.header.to_string());
    output.kv("footer", &frame.footer.to_string());
    output.kv("chat widget", &resolution.page.has_chat_widget().to_string());
}

/// `config`: show and optionally validate configuration
pub fn show_config(config: &SiteConfig, validate: bool, output: &Output) -> Result<()> {
    output.header("Configuration");
    output.kv("log level", &config.logging.level);
    output.kv("chat strategy", &config.chat.strategy.to_string());
    match config.chat.strategy {
        ChatStrategy::Simulated => {
            output.kv("delay", &format!("{} ms", config.chat.simulated.delay_ms));
            output.kv("replies", &config.chat.simulated.replies.len().to_string());
        }
        ChatStrategy::Remote => {
            output.kv("endpoint", &config.chat.remote.endpoint);
            output.kv("model", &config.chat.remote.model);
            output.kv("api key env", &config.chat.remote.api_key_env);
        }
    }

    if validate {
        config.validate()?;
        output.success("Configuration is valid");
    }
    Ok(())
}

/// Summary of a finished chat run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSummary {
    pub messages_sent: usize,
    pub replies_received: usize,
    pub final_location: String,
}

/// `chat`: REPL hosting a chat session on the current page
///
/// Input stays live while a reply is pending. Navigating to another page
/// unmounts the session; a page with a widget gets a fresh one. At end of
/// input the pending reply, if any, is awaited before returning.
pub async fn run_chat<R>(
    config: &SiteConfig,
    start: &str,
    input: R,
    output: &Output,
) -> Result<ChatSummary>
where
    R: AsyncBufRead + Unpin,
{
    let responder = responder::from_config(config)?;
    let settings = WidgetSettings::from(&config.chat);
    let mut navigator = Navigator::new(RouteTable::site(), start);
    let mut summary = ChatSummary {
        messages_sent: 0,
        replies_received: 0,
        final_location: navigator.current().location.clone(),
    };

    let mut session = mount_for_page(navigator.current(), &settings, &responder, output);
    let mut changes = session.as_ref().map(ChatSession::subscribe);
    let mut printed = flush(session.as_ref(), 0, &mut summary, output);

    let mut lines = input.lines();
    loop {
        output.prompt();

        let line = tokio::select! {
            line = lines.next_line() => line.map_err(|e| AppError::Internal(e.to_string()))?,
            _ = widget_changed(changes.as_mut()) => {
                output.newline();
                printed = flush(session.as_ref(), printed, &mut summary, output);
                continue;
            }
        };

        let Some(raw) = line else {
            break;
        };
        let line = raw.trim();

        if line == "quit" || line == "exit" {
            break;
        }

        let navigation = if let Some(path) = line.strip_prefix("/go ") {
            Some(navigator.navigate(path.trim()))
        } else if line == "/back" {
            let back = navigator.back();
            if back.is_none() {
                output.hint("Already at the first page");
            }
            back
        } else if line == "/where" {
            let current = navigator.current();
            output.info(&format!("{} ({})", current.page.title(), current.location));
            continue;
        } else {
            None
        };

        if let Some(navigation) = navigation {
            if navigation.page_changed() {
                // Unmount before the next page mounts its own widget.
                drop(session.take());
                output.info(&format!("Now on {}", navigation.to.page.title()));
                session = mount_for_page(&navigation.to, &settings, &responder, output);
                changes = session.as_ref().map(ChatSession::subscribe);
                printed = flush(session.as_ref(), 0, &mut summary, output);
            }
            continue;
        }
        if line == "/go" || line == "/back" {
            continue;
        }

        let Some(ref s) = session else {
            if !line.is_empty() {
                output.hint("This page has no chat widget. Try `/go /`");
            }
            continue;
        };

        match s.submit_text(raw.as_str()) {
            Ok(()) => {
                summary.messages_sent += 1;
                printed = flush(session.as_ref(), printed, &mut summary, output);
                output.composing();
            }
            Err(rejected) => debug!(%rejected, "Submission ignored"),
        }
    }

    if let Some(ref s) = session {
        s.settled().await;
        flush(session.as_ref(), printed, &mut summary, output);
    }

    summary.final_location = navigator.current().location.clone();
    Ok(summary)
}

/// Resolves when the watched widget changes; never for a page without one
async fn widget_changed(changes: Option<&mut watch::Receiver<u64>>) {
    match changes {
        Some(rx) => {
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
        None => std::future::pending::<()>().await,
    }
}

fn mount_for_page(
    resolution: &Resolution,
    settings: &WidgetSettings,
    responder: &Arc<dyn responder::Responder>,
    output: &Output,
) -> Option<ChatSession> {
    if !resolution.page.has_chat_widget() {
        return None;
    }
    let session = ChatSession::mount_open(settings.clone(), Arc::clone(responder));
    output.info(&format!(
        "QuantumAI assistant online ({} replies)",
        session.responder_name()
    ));
    Some(session)
}

/// Print messages past `printed`; returns the new printed count
fn flush(
    session: Option<&ChatSession>,
    printed: usize,
    summary: &mut ChatSummary,
    output: &Output,
) -> usize {
    let Some(session) = session else {
        return 0;
    };
    let messages = session.messages();
    for message in messages.iter().skip(printed) {
        // The greeting is seeded, not a reply.
        if !message.is_user() && message.id.0 > 0 {
            summary.replies_received += 1;
        }
        output.message(message);
    }
    messages.len().max(printed)
}
