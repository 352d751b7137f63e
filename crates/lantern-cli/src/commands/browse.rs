//! `lantern browse`: line-driven interactive session.
//!
//! The session owns the [`ViewState`]. Commands start with `:`; any other
//! line is a search query, routed through a [`SearchDebouncer`] so a burst
//! of lines only re-renders once.

use std::time::Duration;

use anyhow::{Context, Result};
use lantern_catalog::{SearchDebouncer, SortKey, ViewState};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

use super::list::render_view;
use crate::formatter::OutputFormat;
use crate::market::Market;
use crate::theme::Theme;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseInput {
    /// `:cat KEY`
    Category(String),
    /// `:all`
    AllCategories,
    /// `:sort KEY`
    Sort(String),
    /// `:help`
    Help,
    /// `:quit` or `:q`
    Quit,
    /// An unrecognized `:` command.
    Unknown(String),
    /// Anything else.
    Search(String),
}

impl BrowseInput {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix(':') else {
            return Self::Search(line.to_owned());
        };

        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(name, arg)| (name, arg.trim()));

        match (name, arg) {
            ("cat" | "category", key) if !key.is_empty() => Self::Category(key.to_owned()),
            ("all", _) => Self::AllCategories,
            ("sort", key) if !key.is_empty() => Self::Sort(key.to_owned()),
            ("help" | "h", _) => Self::Help,
            ("quit" | "q" | "exit", _) => Self::Quit,
            _ => Self::Unknown(trimmed.to_owned()),
        }
    }
}

/// Run the session on stdin.
pub(crate) async fn browse(
    market: &Market,
    initial: ViewState,
    window: Duration,
    output: OutputFormat,
) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    run_session(market, initial, window, output, stdin).await?;
    Ok(())
}

/// Drive a session from `input` until `:quit` or end of input. Returns the
/// final view state.
async fn run_session<R>(
    market: &Market,
    initial: ViewState,
    window: Duration,
    output: OutputFormat,
    input: R,
) -> Result<ViewState>
where
    R: AsyncBufRead + Unpin,
{
    let mut state = initial;
    let (debouncer, mut settled) = SearchDebouncer::spawn(window);
    let mut lines = input.lines();
    // Latest query handed to the debouncer and not yet applied.
    let mut awaiting: Option<String> = None;

    if output == OutputFormat::Pretty {
        print_help();
    }
    render_view(market, &state, output)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    // Let a query still inside its window land before exiting.
                    while awaiting.is_some() {
                        let Some(query) = settled.recv().await else {
                            break;
                        };
                        if awaiting.as_deref() == Some(query.as_str()) {
                            awaiting = None;
                        }
                        state.set_search(&query);
                        render_view(market, &state, output)?;
                    }
                    break;
                };

                match BrowseInput::parse(&line) {
                    BrowseInput::Quit => break,
                    BrowseInput::Help => print_help(),
                    BrowseInput::Category(key) => {
                        state.set_category(Some(key));
                        render_view(market, &state, output)?;
                    },
                    BrowseInput::AllCategories => {
                        state.set_category(None);
                        render_view(market, &state, output)?;
                    },
                    BrowseInput::Sort(key) => match key.parse::<SortKey>() {
                        Ok(sort_by) => {
                            state.set_sort(sort_by);
                            render_view(market, &state, output)?;
                        },
                        Err(e) => eprintln!("{}", Theme::warning(&e.to_string())),
                    },
                    BrowseInput::Unknown(command) => {
                        eprintln!(
                            "{}",
                            Theme::warning(&format!("unknown command '{command}', try :help"))
                        );
                    },
                    BrowseInput::Search(query) => {
                        if debouncer.submit(query.clone()) {
                            awaiting = Some(query);
                        }
                    },
                }
            }

            Some(query) = settled.recv() => {
                debug!(query = %query, "applying search");
                if awaiting.as_deref() == Some(query.as_str()) {
                    awaiting = None;
                }
                state.set_search(&query);
                render_view(market, &state, output)?;
            }
        }
    }

    Ok(state)
}

fn print_help() {
    println!("{}", Theme::header("Lantern plugin market"));
    println!("{}", Theme::dimmed("  type to search, or use a command:"));
    println!("{}", Theme::dimmed("  :cat KEY   show one category"));
    println!("{}", Theme::dimmed("  :all       show every category"));
    println!("{}", Theme::dimmed("  :sort KEY  change ordering (name)"));
    println!("{}", Theme::dimmed("  :quit      leave"));
}
