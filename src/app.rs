use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
}

impl App {
  const PLACEHOLDER: &str =
    "Search for books, topics, authors, or descriptions...";

  const STRENGTH_BAR_WIDTH: usize = 20;

  fn book_list_item(book: &Book, rank: usize) -> ListItem<'static> {
    let mut lines = vec![
      Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(
          book.title.clone(),
          Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        ),
      ]),
      Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled("Authors: ", Style::default().fg(Color::Gray)),
        Span::styled(
          book.authors_label().to_string(),
          Style::default().fg(Color::Gray),
        ),
      ]),
    ];

    if let Some(details) = book.details() {
      lines.push(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(details, Style::default().fg(Color::DarkGray)),
      ]));
    }

    lines.push(Line::from(vec![
      Span::raw(BASE_INDENT),
      Span::styled(
        format!("Match rank {:<4}", Book::rank_label(rank)),
        Style::default().fg(Color::DarkGray),
      ),
      Span::styled(
        Self::strength_bar(book.match_strength(rank), Self::STRENGTH_BAR_WIDTH),
        Style::default().fg(Color::Cyan),
      ),
    ]));

    lines.push(Line::from(Span::raw(BASE_INDENT)));

    ListItem::new(lines)
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(frame.area());

    let title = Paragraph::new(Line::from(vec![
      Span::styled(
        "bookrec",
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      ),
      Span::styled(
        "  discover your next great read",
        Style::default().fg(Color::DarkGray),
      ),
    ]));

    frame.render_widget(title, layout[0]);

    self.draw_search_input(frame, layout[1]);

    self.state.set_list_height(usize::from(layout[2].height));

    self.draw_results(frame, layout[2]);

    self.draw_dropdown(frame, layout[1], layout[2]);

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[3]);

    self
      .state
      .help()
      .draw(frame, self.state.suggestions().is_open());
  }

  fn draw_dropdown(&mut self, frame: &mut Frame, input: Rect, below: Rect) {
    let suggestions = self.state.suggestions();

    if !suggestions.is_open() || suggestions.suggestions().is_empty() {
      self.state.set_dropdown_area(None);
      return;
    }

    let rows = u16::try_from(suggestions.suggestions().len())
      .unwrap_or(u16::MAX)
      .saturating_add(2);

    let area = Rect::new(input.x, below.y, input.width, rows.min(below.height));

    let items = suggestions
      .suggestions()
      .iter()
      .map(|suggestion| {
        let marker = match suggestion.origin {
          SuggestionOrigin::DirectMatch => "› ",
          SuggestionOrigin::PredictedCompletion => "✎ ",
        };

        let mut spans = vec![
          Span::styled(marker, Style::default().fg(Color::DarkGray)),
          Span::styled(
            suggestion.display_text.clone(),
            Style::default().fg(Color::White),
          ),
        ];

        if let Some(completion) = &suggestion.completion {
          spans.push(Span::styled(
            completion.clone(),
            Style::default()
              .fg(Color::DarkGray)
              .add_modifier(Modifier::ITALIC),
          ));
        }

        ListItem::new(Line::from(spans))
      })
      .collect::<Vec<_>>();

    let mut list_state =
      ListState::default().with_selected(suggestions.highlighted());

    let list = List::new(items)
      .block(Block::default().borders(Borders::ALL))
      .highlight_style(
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      );

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut list_state);

    self.state.set_dropdown_area(Some(area));
  }

  fn draw_results(&mut self, frame: &mut Frame, area: Rect) {
    let (header, items) = match self.state.session().view() {
      SessionView::Idle => {
        if !self.state.session().has_searched() {
          let hint = Paragraph::new(Line::from(vec![
            Span::raw(BASE_INDENT),
            Span::styled(
              "Describe a book you'd like to read and press enter.",
              Style::default().fg(Color::DarkGray),
            ),
          ]));

          frame.render_widget(hint, area);
        }

        return;
      }
      SessionView::Loading => {
        let loading = Paragraph::new(Line::from(vec![
          Span::raw(BASE_INDENT),
          Span::styled(
            "Analyzing semantic spaces...",
            Style::default().fg(Color::Cyan),
          ),
        ]));

        frame.render_widget(loading, area);
        return;
      }
      SessionView::Error(message) => {
        let error = Paragraph::new(vec![
          Line::from(Span::styled(
            "Error occurred",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
          )),
          Line::from(Span::raw(message.to_string())),
        ])
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });

        frame.render_widget(error, area);
        return;
      }
      SessionView::Empty => {
        let empty = Paragraph::new(vec![
          Line::from(vec![
            Span::raw(BASE_INDENT),
            Span::styled(
              "No matching books found",
              Style::default().fg(Color::White),
            ),
          ]),
          Line::from(vec![
            Span::raw(BASE_INDENT),
            Span::styled(
              "Try adjusting your terminology or try a broader topic.",
              Style::default().fg(Color::DarkGray),
            ),
          ]),
        ]);

        frame.render_widget(empty, area);
        return;
      }
      SessionView::Results(results) => {
        let header = Line::from(vec![
          Span::raw(BASE_INDENT),
          Span::styled(
            "Top recommendations",
            Style::default()
              .fg(Color::White)
              .add_modifier(Modifier::BOLD),
          ),
          Span::styled(
            format!("  {} matches", results.len()),
            Style::default().fg(Color::DarkGray),
          ),
        ]);

        let items = results
          .books()
          .iter()
          .enumerate()
          .map(|(rank, book)| Self::book_list_item(book, rank))
          .collect::<Vec<_>>();

        (header, items)
      }
    };

    let [header_area, list_area] =
      Layout::vertical([Constraint::Length(2), Constraint::Min(0)])
        .areas(area);

    frame.render_widget(Paragraph::new(header), header_area);

    let Some(results) = self.state.session_mut().results_mut() else {
      return;
    };

    let mut list_state = ListState::default()
      .with_selected(results.cursor())
      .with_offset(results.scroll());

    let list = List::new(items)
      .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
      .highlight_symbol("");

    frame.render_stateful_widget(list, list_area, &mut list_state);

    results.set_scroll(list_state.offset());
  }

  fn draw_search_input(&mut self, frame: &mut Frame, area: Rect) {
    let suggestions = self.state.suggestions();

    let title = if suggestions.is_fetching() {
      " Search · fetching suggestions… "
    } else if self.state.session().is_loading() {
      " Search · searching… "
    } else {
      " Search "
    };

    let query = suggestions.query();

    let line = if query.is_empty() {
      Line::from(Span::styled(
        Self::PLACEHOLDER,
        Style::default().fg(Color::DarkGray),
      ))
    } else {
      Line::from(Span::styled(
        query.to_string(),
        Style::default().fg(Color::White),
      ))
    };

    let cursor_x = u16::try_from(query.chars().count())
      .unwrap_or(u16::MAX)
      .saturating_add(area.x)
      .saturating_add(1)
      .min(area.right().saturating_sub(2));

    let input = Paragraph::new(line).block(
      Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(input, area);

    frame.set_cursor_position(Position::new(cursor_x, area.y.saturating_add(1)));

    self.state.set_input_area(area);
  }

  fn execute_effect(&mut self, effect: Effect) {
    match effect {
      Effect::FetchRecommendations { query, request_id } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        let handle = self.handle.clone();

        handle.spawn(async move {
          let _ = sender.send(Event::Recommendations {
            request_id,
            result: client.recommend(&query, RECOMMENDATION_COUNT).await,
          });
        });
      }
      Effect::FetchSuggestions { query, request_id } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        let handle = self.handle.clone();

        handle.spawn(async move {
          let _ = sender.send(Event::Suggestions {
            request_id,
            result: client.autocomplete(&query).await,
          });
        });
      }
    }
  }

  pub(crate) fn new(client: Client) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state: State::new(),
    }
  }

  fn process_pending_events(&mut self) {
    while let Ok(event) = self.event_rx.try_recv() {
      self.state.handle_event(event);
    }

    if let Some(effect) = self.state.tick(Instant::now()) {
      self.execute_effect(effect);
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      let timeout = self.state.poll_timeout(Instant::now());

      if !crossterm_event::poll(timeout)? {
        continue;
      }

      let command = match crossterm_event::read()? {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
          self.state.key_command(key)
        }
        CrosstermEvent::Mouse(mouse) => self.state.mouse_command(mouse),
        _ => continue,
      };

      let dispatch = self.state.dispatch_command(command, Instant::now());

      for effect in dispatch.effects {
        self.execute_effect(effect);
      }

      if dispatch.should_exit {
        break;
      }
    }

    Ok(())
  }

  fn strength_bar(strength: f64, width: usize) -> String {
    #[allow(
      clippy::cast_possible_truncation,
      clippy::cast_precision_loss,
      clippy::cast_sign_loss
    )]
    let filled = (strength.clamp(0.0, 1.0) * width as f64).round() as usize;

    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
  }
}
