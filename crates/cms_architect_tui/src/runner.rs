//! TUI runner - main loop and background provider calls.
//!
//! Drawing and input stay on the calling thread. Each turn runs as a task on
//! the supplied tokio runtime and reports back over a channel that is drained
//! once per loop iteration.

use crate::{App, Command, Event, EventHandler, copy_to_clipboard};
use cms_architect_error::{TuiError, TuiErrorKind, TuiResult};
use cms_architect_gateway::{ResponseGateway, Session, TurnOutcome};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use tracing::{debug, info, warn};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Run the TUI until the user quits.
///
/// # Arguments
///
/// * `gateway` - Gateway used for every turn
/// * `session` - Session to display and extend
/// * `tick_rate_ms` - Event poll interval
/// * `runtime` - Runtime that executes provider calls
pub fn run_tui(
    gateway: ResponseGateway,
    session: Session,
    tick_rate_ms: u64,
    runtime: Handle,
) -> TuiResult<()> {
    let mut terminal = setup_terminal()?;
    info!("TUI started");

    let mut app = App::new(session);
    let result = run_loop(&mut terminal, &mut app, &gateway, tick_rate_ms, &runtime);

    // Restore the terminal even when the loop failed.
    restore_terminal(&mut terminal)?;
    info!("TUI stopped");
    result
}

fn setup_terminal() -> TuiResult<CrosstermTerminal> {
    enable_raw_mode().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to enable raw mode: {}",
            e
        )))
    })?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to setup terminal: {}",
            e
        )))
    })?;

    Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to create terminal: {}",
            e
        )))
    })
}

fn restore_terminal(terminal: &mut CrosstermTerminal) -> TuiResult<()> {
    disable_raw_mode().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to disable raw mode: {}",
            e
        )))
    })?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to cleanup terminal: {}",
            e
        )))
    })?;
    terminal.show_cursor().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to show cursor: {}",
            e
        )))
    })
}

fn run_loop(
    terminal: &mut CrosstermTerminal,
    app: &mut App,
    gateway: &ResponseGateway,
    tick_rate_ms: u64,
    runtime: &Handle,
) -> TuiResult<()> {
    let events = EventHandler::new(tick_rate_ms);
    let (tx, mut rx) = unbounded_channel::<TurnOutcome>();

    while !app.should_quit {
        while let Ok(outcome) = rx.try_recv() {
            app.finish(outcome);
        }

        terminal
            .draw(|f| crate::ui::draw(f, app))
            .map_err(|e| TuiError::new(TuiErrorKind::Rendering(format!("Failed to draw: {}", e))))?;

        if let Some(Event::Key(key)) = events.next()?
            && let Some(command) = app.on_key(key)
        {
            handle_command(terminal, app, gateway, runtime, &tx, command);
        }
    }

    Ok(())
}

/// Perform a side effect requested by a key press.
fn handle_command(
    terminal: &mut CrosstermTerminal,
    app: &mut App,
    gateway: &ResponseGateway,
    runtime: &Handle,
    tx: &UnboundedSender<TurnOutcome>,
    command: Command,
) {
    match command {
        Command::Spawn(turn, cancel) => {
            debug!(intent = %turn.intent, "Spawning turn");
            let gateway = gateway.clone();
            let tx = tx.clone();
            runtime.spawn(async move {
                let outcome = turn.execute(&gateway, &cancel).await;
                if tx.send(outcome).is_err() {
                    debug!("TUI closed before the turn completed");
                }
            });
        }
        Command::Copy { label, text } => {
            app.status_message = match copy_to_clipboard(terminal.backend_mut(), &text) {
                Ok(()) => format!("Copied {} to clipboard", label),
                Err(e) => {
                    warn!(error = %e, "Clipboard copy failed");
                    format!("Copy failed: {}", e.kind)
                }
            };
        }
    }
}
