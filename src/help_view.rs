use super::*;

type KeyTable = &'static [(&'static str, &'static str)];

pub(crate) struct HelpView {
  saved_status: Option<String>,
  visible: bool,
}

impl HelpView {
  const KEY_COLUMN: usize = 12;

  const RESULTS: &str = "Results";

  const SECTIONS: &[(&str, KeyTable)] = &[
    (
      "Search",
      &[
        ("type", "edit the query"),
        ("backspace", "delete the last character"),
        ("ctrl+u", "clear the query"),
        ("enter", "search, or pick the highlighted suggestion"),
        ("esc", "close suggestions, or quit when they are closed"),
        ("F1", "toggle this help"),
        ("ctrl+c", "quit"),
      ],
    ),
    (
      Self::SUGGESTIONS,
      &[
        ("↓ / ↑", "highlight a suggestion"),
        ("click", "pick a suggestion"),
        ("click out", "close the dropdown"),
      ],
    ),
    (
      Self::RESULTS,
      &[
        ("↓ / ↑", "move between books"),
        ("pg↓ / pg↑", "page through books"),
        ("home / end", "jump to the first or last book"),
      ],
    ),
  ];

  const STATUS: &str = "Press F1 or esc to close help";

  const SUGGESTIONS: &str = "Suggestions";

  pub(crate) fn draw(&self, frame: &mut Frame, dropdown_open: bool) {
    if !self.visible {
      return;
    }

    let lines = Self::lines(dropdown_open);

    let width = lines.iter().map(Line::width).max().unwrap_or(0);

    let area = Self::overlay_area(frame.area(), width, lines.len());

    frame.render_widget(Clear, area);

    frame.render_widget(
      Paragraph::new(lines).block(
        Block::default()
          .title(" Keys ")
          .borders(Borders::ALL)
          .border_style(Style::default().fg(Color::Cyan)),
      ),
      area,
    );
  }

  pub(crate) fn handle_key(key: KeyEvent) -> Command {
    match key.code {
      KeyCode::F(1) | KeyCode::Esc => Command::HideHelp,
      KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        Command::Quit
      }
      _ => Command::None,
    }
  }

  pub(crate) fn hide(&mut self, status: &mut String) {
    if !self.visible {
      return;
    }

    *status = self
      .saved_status
      .take()
      .unwrap_or_else(|| INPUT_STATUS.into());

    self.visible = false;
  }

  pub(crate) fn is_visible(&self) -> bool {
    self.visible
  }

  fn lines(dropdown_open: bool) -> Vec<Line<'static>> {
    let active = if dropdown_open {
      Self::SUGGESTIONS
    } else {
      Self::RESULTS
    };

    let mut lines = Vec::new();

    for (index, (title, bindings)) in Self::SECTIONS.iter().enumerate() {
      if index > 0 {
        lines.push(Line::default());
      }

      let heading = if *title == active {
        Line::from(vec![
          Span::styled(
            *title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
          ),
          Span::styled("  (arrows)", Style::default().fg(Color::DarkGray)),
        ])
      } else {
        Line::from(Span::styled(
          *title,
          Style::default().add_modifier(Modifier::BOLD),
        ))
      };

      lines.push(heading);

      lines.extend(bindings.iter().map(|(keys, action)| {
        Line::from(vec![
          Span::styled(
            format!("  {keys:<width$}", width = Self::KEY_COLUMN),
            Style::default().fg(Color::White),
          ),
          Span::styled(*action, Style::default().fg(Color::Gray)),
        ])
      }));
    }

    lines
  }

  pub(crate) fn new() -> Self {
    Self {
      saved_status: None,
      visible: false,
    }
  }

  fn overlay_area(
    frame: Rect,
    content_width: usize,
    content_height: usize,
  ) -> Rect {
    let width = u16::try_from(content_width.saturating_add(4))
      .unwrap_or(u16::MAX)
      .min(frame.width);

    let height = u16::try_from(content_height.saturating_add(2))
      .unwrap_or(u16::MAX)
      .min(frame.height);

    Rect::new(
      frame.x + (frame.width - width) / 2,
      frame.y + (frame.height - height) / 2,
      width,
      height,
    )
  }

  pub(crate) fn show(&mut self, status: &mut String) {
    if self.visible {
      return;
    }

    self.saved_status = Some(std::mem::replace(status, Self::STATUS.into()));

    self.visible = true;
  }
}
