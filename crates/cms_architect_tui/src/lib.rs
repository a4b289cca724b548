//! Terminal User Interface for CMS Architect.
//!
//! Four tabs over one session: chat with the architect, the generated SQL
//! schema, the generated source files, and a preview of the entity diagram.
//! Built with ratatui for rendering and crossterm for terminal control.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod clipboard;
mod events;
mod runner;
mod ui;

pub use app::{App, Command, Tab};
pub use clipboard::{copy_to_clipboard, osc52_sequence};
pub use events::{Event, EventHandler};
pub use runner::run_tui;
pub use ui::draw;
