// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # woco command line.
//!
//! Drives the client core from a terminal: run the start-up session check,
//! store or clear a session, and preview the display formatting of post
//! fields.
//!
//! Logs go to stderr and are filtered by `RUST_LOG` (default `warn`), so
//! command output on stdout stays clean.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use woco::{
    config::{self, AppConfig},
    db::SqliteStore,
    model::Timestamp,
    session::{self, SessionValidator, SystemClock, splash::Splash},
    util::format::{format_date, format_number, truncate_words},
};

#[derive(Parser)]
#[command(name = "woco")]
#[command(about = "Travel blog client core", long_about = None)]
#[command(version)]
struct Cli {
    /// Device store to use instead of the configured one.
    #[arg(long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the start-up session check and print the target screen.
    Splash,

    /// Store a session for a bearer token.
    Login {
        #[arg(long)]
        token: String,
    },

    /// Forget the stored session.
    Logout,

    /// Format a document timestamp as a short date.
    Date {
        seconds: i64,
        #[arg(default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..1_000_000_000))]
        nanoseconds: u32,
    },

    /// Abbreviate a like or comment count.
    Count {
        #[arg(allow_negative_numbers = true)]
        n: i64,
    },

    /// Shorten text to a number of words.
    Excerpt {
        #[arg(long)]
        words: Option<usize>,
        text: String,
    },

    /// Save the effective configuration and print it.
    Config,
}

/// The entry point of the application.
fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = config::load_config();
    if let Some(database) = cli.database {
        config.database_file = database;
    }

    run(cli.command, &config)
}

fn run(command: Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Splash => {
            let store = open_store(config)?;
            let mut splash = Splash::new(config.splash_dwell());
            splash.start(SessionValidator::new(store, SystemClock));
            println!("{}", splash.wait().route());
        }
        Command::Login { token } => {
            let store = open_store(config)?;
            let record =
                session::begin_session(&store, &SystemClock, &token, config.session_lifetime())
                    .context("Failed to store session")?;
            let expires = Timestamp::from_epoch_millis(record.expires_at_epoch_millis);
            println!("session valid until {}", format_date(Some(&expires)));
        }
        Command::Logout => {
            let store = open_store(config)?;
            session::end_session(&store).context("Failed to clear session")?;
            println!("session cleared");
        }
        Command::Date {
            seconds,
            nanoseconds,
        } => {
            let ts = Timestamp::new(seconds, nanoseconds);
            println!("{}", format_date(Some(&ts)));
        }
        Command::Count { n } => println!("{}", format_number(n)),
        Command::Excerpt { words, text } => {
            let words = words.unwrap_or(config.excerpt_words);
            println!("{}", truncate_words(&text, words));
        }
        Command::Config => {
            config::save_config(config).context("Failed to save configuration")?;
            println!("{config:#?}");
        }
    }

    Ok(())
}

fn open_store(config: &AppConfig) -> Result<SqliteStore> {
    SqliteStore::open(&config.database_file).context("Failed to open device store")
}
