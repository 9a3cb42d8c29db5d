//! Interactive terminal loop. Each input line is one user action.

use std::path::{Path, PathBuf};

use common::VacancyRecord;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::warn;

use crate::client::VacancyClient;
use crate::error::FetchError;
use crate::view::{LoadOutcome, LoadTicket, VacancyListView};

pub const HELP: &str = "\
Commands:
  company <text>    set the company filter (empty clears it)
  position <text>   set the position filter (empty clears it)
  search | s        search with the current filters
  next | n          next page
  prev | p          previous page
  page <number>     jump to a page
  mode | m          toggle light/dark
  show              print the current list
  help | ?          this text
  quit | q          exit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Company(String),
    Position(String),
    Search,
    Next,
    Previous,
    Page(String),
    ToggleMode,
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "company" | "c" => Command::Company(rest.to_string()),
            "position" | "pos" => Command::Position(rest.to_string()),
            "search" | "s" => Command::Search,
            "next" | "n" => Command::Next,
            "prev" | "previous" | "p" => Command::Previous,
            "page" => Command::Page(rest.to_string()),
            "mode" | "m" => Command::ToggleMode,
            "" | "show" | "ls" => Command::Show,
            "help" | "?" | "h" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Load(LoadTicket),
    Redraw,
    Print(String),
    Nothing,
    Quit,
}

/// Applies `command` to the view.
pub fn apply(view: &mut VacancyListView, command: Command) -> Step {
    match command {
        Command::Company(text) => {
            view.document_mut().company_input = text;
            Step::Nothing
        }
        Command::Position(text) => {
            view.document_mut().position_input = text;
            Step::Nothing
        }
        Command::Search => Step::Load(view.search()),
        Command::Next => Step::Load(view.next_page()),
        // At page 1 nothing happens
        Command::Previous => view.previous_page().map_or(Step::Nothing, Step::Load),
        Command::Page(text) => match view.set_page_input(&text) {
            Some(ticket) => Step::Load(ticket),
            None => Step::Print(format!(
                "⚠️  Invalid page number, staying on page {}",
                view.page().current_page()
            )),
        },
        Command::ToggleMode => {
            view.toggle_mode();
            Step::Redraw
        }
        Command::Show => Step::Redraw,
        Command::Help => Step::Print(HELP.to_string()),
        Command::Quit => Step::Quit,
        Command::Unknown(line) => Step::Print(format!("❓ Unknown command {line:?}, type `help`")),
    }
}

type InFlight = JoinSet<(LoadTicket, Result<Vec<VacancyRecord>, FetchError>)>;

fn spawn_load(in_flight: &mut InFlight, client: &VacancyClient, ticket: LoadTicket) {
    let client = client.clone();
    in_flight.spawn(async move {
        let result = client.fetch(ticket.url()).await;
        (ticket, result)
    });
}

async fn write_snapshot(view: &VacancyListView, html_out: Option<&Path>) {
    let Some(path) = html_out else { return };
    if let Err(e) = tokio::fs::write(path, view.document().to_html()).await {
        warn!("failed to write HTML snapshot to {}: {}", path.display(), e);
    }
}

/// Reads commands from stdin until `quit` or end of input.
///
/// Loads run in the background so input stays responsive; a response that
/// arrives after a newer request was issued is dropped by the view.
pub async fn run(mut view: VacancyListView, html_out: Option<PathBuf>) -> anyhow::Result<()> {
    let html_out = html_out.as_deref();
    let mut in_flight = InFlight::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("🔍 Job Vacancy Viewer (type `help` for commands)\n");
    let ticket = view.start();
    spawn_load(&mut in_flight, view.client(), ticket);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match apply(&mut view, Command::parse(&line)) {
                    Step::Load(ticket) => {
                        println!("📡 Fetching page {}...", view.page().current_page());
                        spawn_load(&mut in_flight, view.client(), ticket);
                    }
                    Step::Redraw => {
                        print!("{}", view.document().to_text());
                        write_snapshot(&view, html_out).await;
                    }
                    Step::Print(text) => println!("{text}"),
                    Step::Nothing => {}
                    Step::Quit => break,
                }
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                let (ticket, result) = match joined {
                    Ok(done) => done,
                    Err(e) => {
                        warn!("load task ended abnormally: {}", e);
                        continue;
                    }
                };
                if let LoadOutcome::Rendered(count) = view.complete_load(ticket, result) {
                    println!("\n📋 {count} vacancies");
                    print!("{}", view.document().to_text());
                    write_snapshot(&view, html_out).await;
                }
            }
        }
    }

    println!("👋 Bye");
    Ok(())
}
