//! Application state and key handling.

use cms_architect_core::SourceFile;
use cms_architect_gateway::{Session, Turn, TurnOutcome};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::IntoEnumIterator;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Lines moved by PageUp / PageDown.
const PAGE: u16 = 10;

/// The four view tabs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum Tab {
    /// Conversation with the architect
    #[default]
    #[display("Chat")]
    Chat,
    /// Generated SQL schema
    #[display("Schema")]
    Schema,
    /// Generated source files
    #[display("Code")]
    Code,
    /// Diagram and summary
    #[display("Preview")]
    Preview,
}

impl Tab {
    /// Position of the tab in the tab bar.
    pub fn index(self) -> usize {
        Self::iter().position(|tab| tab == self).unwrap_or_default()
    }

    /// Tab at `index`, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Next tab, wrapping around.
    pub fn next(self) -> Self {
        Self::from_index((self.index() + 1) % Self::iter().len()).unwrap_or_default()
    }

    /// Previous tab, wrapping around.
    pub fn previous(self) -> Self {
        let count = Self::iter().len();
        Self::from_index((self.index() + count - 1) % count).unwrap_or_default()
    }
}

/// Side effect requested by a key press, performed by the runner.
#[derive(Debug)]
pub enum Command {
    /// Execute a turn in the background
    Spawn(Turn, CancellationToken),
    /// Copy text to the system clipboard
    Copy {
        /// What is being copied, for the status line
        label: String,
        /// Text to copy
        text: String,
    },
}

/// Main application state.
pub struct App {
    /// Active tab
    pub tab: Tab,
    /// Conversation and artifacts
    pub session: Session,
    /// Chat input line
    pub input: String,
    /// Selected source file on the code tab
    pub selected_file: usize,
    /// Scroll offset of the active pane: lines back from the bottom on the
    /// chat tab, lines down from the top everywhere else
    pub scroll: u16,
    /// Status message to display
    pub status_message: String,
    /// Whether to quit the application
    pub should_quit: bool,
    cancel: Option<CancellationToken>,
}

impl App {
    /// Create a new App around a session.
    pub fn new(session: Session) -> Self {
        Self {
            tab: Tab::Chat,
            session,
            input: String::new(),
            selected_file: 0,
            scroll: 0,
            status_message: String::from("Describe your system and press Enter"),
            should_quit: false,
            cancel: None,
        }
    }

    /// Whether a provider call is in flight.
    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    /// Switch to `tab`, resetting the scroll offset.
    pub fn select_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.scroll = 0;
        }
    }

    /// The source file selected on the code tab.
    pub fn selected_source_file(&self) -> Option<&SourceFile> {
        self.session.artifacts().source_files.get(self.selected_file)
    }

    /// Move file selection up.
    pub fn select_previous_file(&mut self) {
        if self.selected_file > 0 {
            self.selected_file -= 1;
            self.scroll = 0;
        }
    }

    /// Move file selection down.
    pub fn select_next_file(&mut self) {
        let count = self.session.artifacts().source_files.len();
        if self.selected_file < count.saturating_sub(1) {
            self.selected_file += 1;
            self.scroll = 0;
        }
    }

    /// Start a turn from the input line.
    ///
    /// The input is kept when the session rejects it.
    pub fn submit(&mut self) -> Option<Command> {
        let turn = self.session.begin_turn(&self.input)?;
        self.input.clear();
        self.scroll = 0;

        let cancel = CancellationToken::new();
        self.cancel = Some(cancel.clone());
        self.status_message = String::from("Thinking... (Esc to cancel)");
        Some(Command::Spawn(turn, cancel))
    }

    /// Apply the outcome of the in-flight turn.
    pub fn finish(&mut self, outcome: TurnOutcome) {
        let generated = matches!(outcome, TurnOutcome::Generated(Ok(_)));
        self.status_message = match &outcome {
            TurnOutcome::Generated(Ok(artifacts)) => {
                format!("Generated {} source files", artifacts.source_files.len())
            }
            TurnOutcome::Generated(Err(e)) => format!("Generation failed: {}", e.kind()),
            TurnOutcome::Replied(_) => String::from("Ready"),
        };

        self.session.complete(outcome);
        self.cancel = None;
        if generated {
            self.selected_file = 0;
        }
    }

    /// Cancel the in-flight turn, if any.
    pub fn cancel_in_flight(&mut self) {
        if let Some(cancel) = &self.cancel {
            cancel.cancel();
            self.status_message = String::from("Cancelling...");
        }
    }

    /// Text the copy key would put on the clipboard from the active tab.
    pub fn copy_target(&self) -> Option<(String, String)> {
        match self.tab {
            Tab::Schema => {
                let schema = &self.session.artifacts().schema;
                (!schema.trim().is_empty()).then(|| ("schema.sql".to_string(), schema.clone()))
            }
            Tab::Code => self
                .selected_source_file()
                .map(|file| (file.name().clone(), file.content().clone())),
            Tab::Chat | Tab::Preview => None,
        }
    }

    /// Lines in the active content pane, or `None` on the chat tab.
    pub fn content_lines(&self) -> Option<usize> {
        let artifacts = self.session.artifacts();
        match self.tab {
            Tab::Chat => None,
            Tab::Schema => Some(artifacts.schema.lines().count()),
            Tab::Code => Some(
                self.selected_source_file()
                    .map_or(0, |file| file.content().lines().count()),
            ),
            // Two headers, a blank separator, then one line per node and link.
            Tab::Preview => {
                Some(artifacts.diagram.nodes.len() + artifacts.diagram.links.len() + 3)
            }
        }
    }

    /// Scroll towards the start of the active pane.
    pub fn page_up(&mut self) {
        match self.content_lines() {
            None => self.scroll = self.scroll.saturating_add(PAGE),
            Some(_) => self.scroll = self.scroll.saturating_sub(PAGE),
        }
    }

    /// Scroll towards the end of the active pane, stopping at its last line.
    pub fn page_down(&mut self) {
        match self.content_lines() {
            None => self.scroll = self.scroll.saturating_sub(PAGE),
            Some(lines) => {
                let last = u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX);
                self.scroll = self.scroll.saturating_add(PAGE).min(last);
            }
        }
    }

    /// Quit the application, cancelling any in-flight call.
    pub fn quit(&mut self) {
        self.cancel_in_flight();
        self.should_quit = true;
    }

    /// Handle a key press.
    pub fn on_key(&mut self, key: KeyEvent) -> Option<Command> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => self.quit(),
            KeyCode::Char('y') if ctrl => {
                return match self.copy_target() {
                    Some((label, text)) => Some(Command::Copy { label, text }),
                    None => {
                        self.status_message = String::from("Nothing to copy on this tab");
                        None
                    }
                };
            }
            KeyCode::Tab => self.select_tab(self.tab.next()),
            KeyCode::BackTab => self.select_tab(self.tab.previous()),
            KeyCode::F(n @ 1..=4) => {
                if let Some(tab) = Tab::from_index(usize::from(n - 1)) {
                    self.select_tab(tab);
                }
            }
            KeyCode::Esc => self.cancel_in_flight(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            _ if self.tab == Tab::Chat => return self.on_chat_key(key, ctrl),
            KeyCode::Char('q') => self.quit(),
            KeyCode::Up | KeyCode::Char('k') if self.tab == Tab::Code => {
                self.select_previous_file()
            }
            KeyCode::Down | KeyCode::Char('j') if self.tab == Tab::Code => self.select_next_file(),
            _ => {}
        }
        None
    }

    fn on_chat_key(&mut self, key: KeyEvent, ctrl: bool) -> Option<Command> {
        if self.is_busy() {
            debug!("Input disabled while a turn is in flight");
            return None;
        }
        match key.code {
            KeyCode::Enter => return self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !ctrl => self.input.push(c),
            _ => {}
        }
        None
    }
}
