use {
  anyhow::Context,
  app::App,
  arguments::Arguments,
  autocomplete_response::AutocompleteResponse,
  book::Book,
  clap::Parser,
  client::Client,
  client_error::ClientError,
  command::Command,
  command_dispatch::CommandDispatch,
  crossterm::{
    event as crossterm_event,
    event::{
      DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent,
      KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
      MouseEventKind,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  debouncer::Debouncer,
  effect::Effect,
  event::Event,
  help_view::HelpView,
  pending_autocomplete::PendingAutocomplete,
  pending_search::PendingSearch,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
    },
  },
  recommend_response::RecommendResponse,
  result_list::ResultList,
  search_session::SearchSession,
  serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Unexpected},
  },
  serde_json::Value,
  session_state::SessionState,
  session_view::SessionView,
  state::State,
  std::{
    backtrace::BacktraceStatus,
    io::{self, IsTerminal, Stdout},
    process,
    time::{Duration, Instant},
  },
  suggestion::{Suggestion, SuggestionOrigin},
  suggestion_controller::SuggestionController,
  suggestion_list::SuggestionList,
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  tracing::{debug, info, warn},
  utils::{
    deserialize_optional_string, deserialize_optional_year,
    deserialize_string_or_default, truncate,
  },
};

mod app;
mod arguments;
mod autocomplete_response;
mod book;
mod client;
mod client_error;
mod command;
mod command_dispatch;
mod debouncer;
mod effect;
mod event;
mod help_view;
mod logging;
mod pending_autocomplete;
mod pending_search;
mod recommend_response;
mod result_list;
mod search_session;
mod session_state;
mod session_view;
mod state;
mod suggestion;
mod suggestion_controller;
mod suggestion_list;
mod utils;

const AUTOCOMPLETE_DEBOUNCE: Duration = Duration::from_millis(300);

const AUTOCOMPLETE_TIMEOUT: Duration = Duration::from_secs(3);

const BASE_INDENT: &str = " ";

const DEFAULT_API_URL: &str = "http://localhost:8000";

const FETCH_FAILED_MESSAGE: &str =
  "Failed to fetch recommendations. Confirm the backend is reachable.";

const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(200);

const INPUT_STATUS: &str = "type to search • enter submit • ↑/↓ navigate • esc close/quit • F1 help";

const MAX_DIRECT_MATCHES: usize = 3;

const MIN_AUTOCOMPLETE_CHARS: usize = 2;

const RECOMMENDATION_COUNT: usize = 10;

const RECOMMEND_TIMEOUT: Duration = Duration::from_secs(10);

const UNEXPECTED_FORMAT_MESSAGE: &str =
  "Unexpected response format from backend.";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(
    terminal.backend_mut(),
    DisableMouseCapture,
    LeaveAlternateScreen
  )?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let arguments = Arguments::parse();

  logging::initialize(arguments.log_file.as_deref())?;

  let client = Client::new(&arguments.api_url)
    .with_context(|| format!("invalid backend url `{}`", arguments.api_url))?;

  info!(base_url = client.base_url(), "starting bookrec");

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client);

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
