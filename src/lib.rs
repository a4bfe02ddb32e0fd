//! Techlore: a catalogue of programming technologies with filterable search
//! and a scripted chat assistant answering from the same data.
//! Main library: tracing setup, catalogue load, terminal chat loop.

pub mod cancellation;
pub mod catalogue;
pub mod config;
pub mod conversation;
pub mod error;
pub mod matcher;
pub mod rich_text;
pub mod scheduler;
pub mod search;
pub mod terminal;
pub mod tradeoffs;
pub mod transcript;
pub mod widget;

use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use catalogue::Catalogue;
use config::ChatConfig;
use terminal::{Command, Page, TerminalTranscript};
use widget::ChatWidget;

/// Load the catalogue and run the chat on stdin/stdout.
pub async fn run() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("techlore=debug")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("techlore starting");

    let config = match ChatConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut transcript = TerminalTranscript::new();
    let catalogue = match Catalogue::load(&config.catalogue).await {
        Ok(catalogue) => Arc::new(catalogue),
        Err(e) => {
            ChatWidget::report_load_failure(&mut transcript, &e);
            return ExitCode::FAILURE;
        }
    };

    let mut page = Page::new(Arc::clone(&catalogue), config.suggestion_limit);
    let (mut widget, mut due_rx) = ChatWidget::boot(catalogue, transcript, &config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    let command = Command::parse(&line);
                    if let Some(output) = page.handle(&command) {
                        for row in output {
                            println!("{row}");
                        }
                    } else if !handle_command(&mut widget, command) {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "stdin read failed");
                    break;
                }
            },
            Some(due) = due_rx.recv() => widget.on_menu_due(due),
        }
    }

    widget.close();
    info!(session = %widget.id(), "techlore exiting");
    ExitCode::SUCCESS
}

/// Returns false when the user asked to quit.
fn handle_command(widget: &mut ChatWidget<TerminalTranscript>, command: Command) -> bool {
    match command {
        Command::Choose(choice) => widget.choose(choice),
        Command::Suggest(prefix) => {
            widget.type_text(&prefix);
        }
        Command::Enter => widget.press_enter(),
        Command::Submit(text) => widget.submit(&text),
        Command::Open => widget.open(),
        Command::Close => widget.close(),
        Command::Quit => return false,
        Command::Search(_)
        | Command::Nav(_)
        | Command::Filter(_)
        | Command::Execution(_)
        | Command::Level(_) => {}
    }
    true
}
