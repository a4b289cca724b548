//! Command-line parsing tests.

use clap::Parser;
use cms_architect::cli::{Cli, Commands};
use std::path::PathBuf;

#[test]
fn no_subcommand_launches_tui() -> anyhow::Result<()> {
    let cli = Cli::try_parse_from(["cms-architect"])?;

    assert_eq!(cli.command(), Commands::Tui);
    assert!(!cli.verbose);
    assert!(cli.config.is_none());
    Ok(())
}

#[test]
fn generate_takes_requirements() -> anyhow::Result<()> {
    let cli = Cli::try_parse_from([
        "cms-architect",
        "generate",
        "A bootcamp with mentors and cohorts",
        "--compact",
    ])?;

    assert_eq!(
        cli.command(),
        Commands::Generate {
            requirements: "A bootcamp with mentors and cohorts".to_string(),
            compact: true,
        }
    );
    Ok(())
}

#[test]
fn global_flags_follow_subcommand() -> anyhow::Result<()> {
    let cli = Cli::try_parse_from([
        "cms-architect",
        "chat",
        "What does user_roles do?",
        "--verbose",
        "--config",
        "team.toml",
    ])?;

    assert!(cli.verbose);
    assert_eq!(cli.config, Some(PathBuf::from("team.toml")));
    assert!(matches!(cli.command(), Commands::Chat { message } if message == "What does user_roles do?"));
    Ok(())
}

#[test]
fn generate_requires_requirements() {
    assert!(Cli::try_parse_from(["cms-architect", "generate"]).is_err());
}
