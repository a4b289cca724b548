//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CMS Architect - generate Spring Boot + MySQL course management systems with Gemini
#[derive(Parser, Debug)]
#[command(name = "cms-architect")]
#[command(about = "Generate Spring Boot + MySQL course management system architectures", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute (defaults to the terminal UI)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Additional configuration file (highest file precedence)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// The requested command, defaulting to the terminal UI.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Tui)
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Launch the interactive terminal UI
    Tui,

    /// Generate an architecture and print the artifacts as JSON
    Generate {
        /// Free-text description of the system to build
        requirements: String,

        /// Print compact JSON instead of pretty-printed JSON
        #[arg(long)]
        compact: bool,
    },

    /// Ask the architect a single question
    Chat {
        /// The question to ask
        message: String,
    },
}
