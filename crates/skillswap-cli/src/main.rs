//! # SkillSwap CLI
//!
//! Runs the match finder against the hosted backend (REST or direct Postgres)
//! or against an offline JSON fixture. Results go to stdout as JSON; logs go
//! to stderr.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use skillswap_matching::MatchMode;

#[derive(Parser, Debug)]
#[command(name = "skillswap", version, about = "Find people to swap skills with")]
struct Cli {
    /// Config file (defaults to ./config.{toml,json,yaml} if present)
    #[arg(long, global = true, value_name = "FILE", env = "SKILLSWAP_CONFIG")]
    config: Option<PathBuf>,

    /// Read from a JSON fixture instead of the configured backend
    #[arg(long, global = true, value_name = "FILE")]
    fixture: Option<PathBuf>,

    /// Access token issued by the backend's auth service
    #[arg(long, global = true, env = "SKILLSWAP_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List compatibility matches for a user
    Matches {
        /// The user's profile ID
        user_id: String,

        #[arg(long, value_enum, default_value_t = Mode::Broad)]
        mode: Mode,

        /// Override the configured result cap
        #[arg(long)]
        limit: Option<usize>,

        /// Report backend failures instead of printing an empty list
        #[arg(long)]
        fail_loud: bool,

        /// One tab-separated line per match instead of JSON
        #[arg(long)]
        plain: bool,
    },

    /// Score a teacher/learner proficiency pair
    Score { teacher: String, learner: String },

    /// Check whether a swap may move between two statuses
    CheckTransition { from: String, to: String },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Counterparties complementing you in either direction
    Broad,
    /// Only counterparties who both teach you and learn from you
    Strict,
}

impl From<Mode> for MatchMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Broad => MatchMode::Broad,
            Mode::Strict => MatchMode::Strict,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (structured logging) on stderr; stdout carries results
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skillswap=info".into()),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let output = match cli.command {
        Command::Matches {
            ref user_id,
            mode,
            limit,
            fail_loud,
            plain,
        } => {
            let config = skillswap_common::config::load(cli.config.as_deref())?;
            let args = commands::MatchArgs {
                user_id,
                mode: mode.into(),
                limit,
                fail_loud,
                plain,
            };
            commands::matches(&config, cli.fixture.as_deref(), cli.token.clone(), args).await?
        }
        Command::Score {
            ref teacher,
            ref learner,
        } => commands::score(teacher, learner)?,
        Command::CheckTransition { ref from, ref to } => commands::check_transition(from, to)?,
    };

    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn matches_defaults_to_broad_mode() {
        let cli = Cli::try_parse_from(["skillswap", "matches", "some-id"]).unwrap();
        match cli.command {
            Command::Matches { mode, limit, fail_loud, plain, .. } => {
                assert_eq!(mode, Mode::Broad);
                assert_eq!(limit, None);
                assert!(!fail_loud);
                assert!(!plain);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "skillswap", "matches", "id", "--mode", "strict", "--fixture", "world.json",
        ])
        .unwrap();
        assert_eq!(cli.fixture, Some(PathBuf::from("world.json")));
        assert!(matches!(cli.command, Command::Matches { mode: Mode::Strict, .. }));
    }
}
