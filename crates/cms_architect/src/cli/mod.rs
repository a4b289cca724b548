//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the
//! `cms-architect` binary.

mod commands;
mod oneshot;
mod tui_handler;

pub use commands::{Cli, Commands};
pub use oneshot::{run_chat, run_generate};
pub use tui_handler::launch_tui;
