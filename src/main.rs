//! Terminal front end for the bookshelf controller.
//!
//! Reads intents from stdin, one per line, and prints a fresh frame whenever the
//! controller reports that the view changed.
//!
//! # Commands
//!
//! - any text: set the search query (debounced)
//! - `:p <n>`: go to page `n` (clamped)
//! - `:next` / `:prev`: next / previous page
//! - `:f <id>`: toggle favorite
//! - `:favs`: list favorites
//! - `:q`: quit
//!
//! # Configuration
//!
//! Arguments are `key=value` pairs (see [`bookshelf::Config`]). A
//! `config=<path>` argument loads a TOML file first; other pairs override it.

use bookshelf::infrastructure::expand_tilde;
use bookshelf::ui::{render, RenderOptions};
use bookshelf::{BookshelfError, Config, Event, Result, SearchController};
use std::collections::BTreeMap;
use std::io::{IsTerminal, Write};
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Instrument;

/// One parsed stdin line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Query(String),
    Page(i64),
    NextPage,
    PrevPage,
    ToggleFavorite(String),
    ListFavorites,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix(':') else {
        return Command::Query(line.trim_end_matches(['\r', '\n']).to_string());
    };

    let (name, arg) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(n, a)| (n, a.trim()));

    match (name, arg) {
        ("q" | "quit", _) => Command::Quit,
        ("next", _) => Command::NextPage,
        ("prev", _) => Command::PrevPage,
        ("favs", _) => Command::ListFavorites,
        ("p", n) => n.parse().map_or_else(|_| Command::Unknown(trimmed.to_string()), Command::Page),
        ("f", id) if !id.is_empty() => Command::ToggleFavorite(id.to_string()),
        _ => Command::Unknown(trimmed.to_string()),
    }
}

fn load_config() -> Result<Config> {
    let mut overrides = BTreeMap::new();
    for arg in std::env::args().skip(1) {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| BookshelfError::Config(format!("expected key=value, got {arg:?}")))?;
        overrides.insert(key.trim().to_string(), value.to_string());
    }

    let base = match overrides.get("config") {
        Some(path) => Config::from_file(expand_tilde(path))?,
        None => Config::default(),
    };

    let config = base.merge_map(&overrides);
    config.validate()?;
    Ok(config)
}

fn draw(controller: &SearchController, options: RenderOptions) -> Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", "-".repeat(60))?;
    render(&controller.view_model(), options, &mut out)
}

/// What woke the main loop.
enum Wake {
    Line(std::io::Result<Option<String>>),
    Controller(Event),
}

async fn run() -> Result<()> {
    let config = load_config()?;
    bookshelf::observability::init_tracing(&config);

    session(&config)
        .instrument(tracing::info_span!("bookshelf_session"))
        .await
}

async fn session(config: &Config) -> Result<()> {
    let options = RenderOptions {
        ansi: std::io::stdout().is_terminal(),
    };

    let mut controller = bookshelf::open(config).await?;
    draw(&controller, options)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let wake = tokio::select! {
            line = lines.next_line() => Wake::Line(line),
            event = controller.next_event() => Wake::Controller(event),
        };

        let outcome = match wake {
            Wake::Controller(event) => controller.apply(event),
            Wake::Line(line) => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    break;
                };

                match parse_command(&line) {
                    Command::Quit => break,
                    Command::Query(text) => controller.set_query(text),
                    Command::Page(n) => controller.set_page(n),
                    Command::NextPage => controller.set_page(i64::from(controller.current_page()) + 1),
                    Command::PrevPage => controller.set_page(i64::from(controller.current_page()) - 1),
                    Command::ToggleFavorite(id) => {
                        let now = controller.toggle_favorite(&id);
                        tracing::info!(id = %id, favorite = now, "favorite toggled");
                        Ok(true)
                    }
                    Command::ListFavorites => {
                        let mut out = std::io::stdout().lock();
                        writeln!(out, "favorites: {}", controller.favorites_ordered().join(", "))?;
                        Ok(false)
                    }
                    Command::Unknown(text) => {
                        eprintln!("unknown command: {text}");
                        Ok(false)
                    }
                }
            }
        };

        match outcome {
            Ok(false) => {}
            Ok(true) => draw(&controller, options)?,
            Err(e) => {
                tracing::debug!(error = %e, "intent failed");
                draw(&controller, options)?;
            }
        }
    }

    tracing::info!("bookshelf session ended");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("bookshelf: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_query() {
        assert_eq!(parse_command("dogs and cats\n"), Command::Query("dogs and cats".into()));
        assert_eq!(parse_command(""), Command::Query(String::new()));
    }

    #[test]
    fn colon_commands() {
        assert_eq!(parse_command(":q"), Command::Quit);
        assert_eq!(parse_command(":p 7"), Command::Page(7));
        assert_eq!(parse_command(":p -2"), Command::Page(-2));
        assert_eq!(parse_command(":next"), Command::NextPage);
        assert_eq!(parse_command(":prev"), Command::PrevPage);
        assert_eq!(parse_command(":f  zyTCAlFPjgYC "), Command::ToggleFavorite("zyTCAlFPjgYC".into()));
        assert_eq!(parse_command(":favs"), Command::ListFavorites);
    }

    #[test]
    fn malformed_commands_are_unknown() {
        assert_eq!(parse_command(":p seven"), Command::Unknown(":p seven".into()));
        assert_eq!(parse_command(":f"), Command::Unknown(":f".into()));
        assert_eq!(parse_command(":zap"), Command::Unknown(":zap".into()));
    }
}
