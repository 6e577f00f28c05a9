use super::*;

pub(crate) struct State {
  dropdown_area: Option<Rect>,
  help: HelpView,
  input_area: Rect,
  list_height: usize,
  message: String,
  pending_effects: Vec<Effect>,
  searched_query: String,
  session: SearchSession,
  suggestions: SuggestionController,
}

impl State {
  const CARD_HEIGHT: usize = 5;

  pub(crate) fn dispatch_command(
    &mut self,
    command: Command,
    now: Instant,
  ) -> CommandDispatch {
    debug_assert!(
      self.pending_effects.is_empty(),
      "command dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match command {
      Command::Backspace => {
        let mut query = self.suggestions.query().to_string();

        if query.pop().is_some() {
          self.suggestions.set_query(query, now);
        }
      }
      Command::ClearQuery => {
        if !self.suggestions.query().is_empty() {
          self.suggestions.set_query(String::new(), now);
        }
      }
      Command::Dismiss => self.suggestions.dismiss(),
      Command::Focus => self.suggestions.focus(),
      Command::HideHelp => self.help.hide(&mut self.message),
      Command::Insert(ch) => {
        let mut query = self.suggestions.query().to_string();
        query.push(ch);
        self.suggestions.set_query(query, now);
      }
      Command::None => {}
      Command::PageDown => self.move_selection(self.page_jump()),
      Command::PageUp => self.move_selection(-self.page_jump()),
      Command::PickSuggestion(index) => {
        if let Some(query) = self.suggestions.pick_index(index) {
          self.submit(&query);
        }
      }
      Command::Quit => should_exit = true,
      Command::SelectFirst => {
        if let Some(results) = self.session.results_mut() {
          results.select_first();
        }
      }
      Command::SelectLast => {
        if let Some(results) = self.session.results_mut() {
          results.select_last();
        }
      }
      Command::SelectNext => {
        if self.suggestions.is_open() {
          self.suggestions.select_next();
        } else {
          self.move_selection(1);
        }
      }
      Command::SelectPrevious => {
        if self.suggestions.is_open() {
          self.suggestions.select_previous();
        } else {
          self.move_selection(-1);
        }
      }
      Command::ShowHelp => self.help.show(&mut self.message),
      Command::Submit => {
        let query = self
          .suggestions
          .pick_highlighted()
          .or_else(|| self.suggestions.submit_query());

        if let Some(query) = query {
          self.submit(&query);
        }
      }
    }

    CommandDispatch {
      effects: std::mem::take(&mut self.pending_effects),
      should_exit,
    }
  }

  pub(crate) fn handle_event(&mut self, event: Event) {
    match event {
      Event::Recommendations { request_id, result } => {
        if !self.session.handle_recommendations(request_id, result) {
          return;
        }

        if self.help.is_visible() {
          return;
        }

        let truncated = truncate(&self.searched_query, 40);

        self.message = match self.session.view() {
          SessionView::Results(results) => match results.len() {
            1 => format!("Found 1 result for \"{truncated}\""),
            count => format!("Found {count} results for \"{truncated}\""),
          },
          SessionView::Empty => format!("No results for \"{truncated}\""),
          SessionView::Error(_) => {
            format!("Could not search for \"{truncated}\"")
          }
          SessionView::Idle | SessionView::Loading => INPUT_STATUS.into(),
        };
      }
      Event::Suggestions { request_id, result } => {
        self.suggestions.handle_autocomplete(request_id, result);
      }
    }
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn key_command(&self, key: KeyEvent) -> Command {
    if self.help.is_visible() {
      return HelpView::handle_key(key);
    }

    let modifiers = key.modifiers;

    match key.code {
      KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
        Command::Quit
      }
      KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
        Command::ClearQuery
      }
      KeyCode::Char(ch)
        if !modifiers.intersects(
          KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER,
        ) =>
      {
        Command::Insert(ch)
      }
      KeyCode::Backspace => Command::Backspace,
      KeyCode::Enter => Command::Submit,
      KeyCode::Esc if self.suggestions.is_open() => Command::Dismiss,
      KeyCode::Esc => Command::Quit,
      KeyCode::F(1) => Command::ShowHelp,
      KeyCode::Down => Command::SelectNext,
      KeyCode::Up => Command::SelectPrevious,
      KeyCode::PageDown => Command::PageDown,
      KeyCode::PageUp => Command::PageUp,
      KeyCode::Home => Command::SelectFirst,
      KeyCode::End => Command::SelectLast,
      _ => Command::None,
    }
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  /// Translates a mouse press into a command. Presses inside the dropdown
  /// pick the row under the pointer, presses on the input focus it, and
  /// presses anywhere else close an open dropdown.
  pub(crate) fn mouse_command(&self, mouse: MouseEvent) -> Command {
    if self.help.is_visible()
      || mouse.kind != MouseEventKind::Down(MouseButton::Left)
    {
      return Command::None;
    }

    let position = Position::new(mouse.column, mouse.row);

    if let Some(area) = self.dropdown_area.filter(|area| area.contains(position))
    {
      let first_row = area.y.saturating_add(1);

      if position.y < first_row {
        return Command::None;
      }

      let row = usize::from(position.y - first_row);

      return if row < self.suggestions.suggestions().len() {
        Command::PickSuggestion(row)
      } else {
        Command::None
      };
    }

    if self.input_area.contains(position) {
      return Command::Focus;
    }

    if self.suggestions.is_open() {
      Command::Dismiss
    } else {
      Command::None
    }
  }

  fn move_selection(&mut self, delta: isize) {
    if let Some(results) = self.session.results_mut() {
      results.move_cursor(delta);
    }
  }

  pub(crate) fn new() -> Self {
    Self {
      dropdown_area: None,
      help: HelpView::new(),
      input_area: Rect::default(),
      list_height: 0,
      message: INPUT_STATUS.into(),
      pending_effects: Vec::new(),
      searched_query: String::new(),
      session: SearchSession::new(),
      suggestions: SuggestionController::default(),
    }
  }

  fn page_jump(&self) -> isize {
    isize::try_from((self.list_height / Self::CARD_HEIGHT).max(1))
      .unwrap_or(isize::MAX)
  }

  /// How long the UI loop may block waiting for input before the debounce
  /// timer needs attention.
  pub(crate) fn poll_timeout(&self, now: Instant) -> Duration {
    self
      .suggestions
      .time_until_fire(now)
      .map_or(IDLE_POLL_INTERVAL, |remaining| {
        remaining.min(IDLE_POLL_INTERVAL)
      })
  }

  pub(crate) fn session(&self) -> &SearchSession {
    &self.session
  }

  pub(crate) fn session_mut(&mut self) -> &mut SearchSession {
    &mut self.session
  }

  pub(crate) fn set_dropdown_area(&mut self, area: Option<Rect>) {
    self.dropdown_area = area;
  }

  pub(crate) fn set_input_area(&mut self, area: Rect) {
    self.input_area = area;
  }

  pub(crate) fn set_list_height(&mut self, height: usize) {
    self.list_height = height;
  }

  fn submit(&mut self, query: &str) {
    let Some(effect) = self.session.submit(query) else {
      return;
    };

    self.searched_query = query.to_string();

    if !self.help.is_visible() {
      self.message = format!("Searching for \"{}\"...", truncate(query, 40));
    }

    self.pending_effects.push(effect);
  }

  pub(crate) fn suggestions(&self) -> &SuggestionController {
    &self.suggestions
  }

  pub(crate) fn tick(&mut self, now: Instant) -> Option<Effect> {
    self.suggestions.tick(now)
  }
}
