use super::*;

/// The cursor is always a valid index once the list is non-empty.
#[derive(Debug, PartialEq)]
pub(crate) struct ResultList {
  books: Vec<Book>,
  cursor: usize,
  scroll: usize,
}

impl ResultList {
  pub(crate) fn books(&self) -> &[Book] {
    &self.books
  }

  pub(crate) fn cursor(&self) -> Option<usize> {
    (!self.books.is_empty()).then_some(self.cursor)
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.books.is_empty()
  }

  fn last_index(&self) -> usize {
    self.books.len().saturating_sub(1)
  }

  pub(crate) fn len(&self) -> usize {
    self.books.len()
  }

  pub(crate) fn move_cursor(&mut self, delta: isize) {
    self.cursor = self
      .cursor
      .saturating_add_signed(delta)
      .min(self.last_index());
  }

  pub(crate) fn new(books: Vec<Book>) -> Self {
    Self {
      books,
      cursor: 0,
      scroll: 0,
    }
  }

  pub(crate) fn scroll(&self) -> usize {
    self.scroll.min(self.cursor)
  }

  pub(crate) fn select_first(&mut self) {
    self.cursor = 0;
  }

  pub(crate) fn select_last(&mut self) {
    self.cursor = self.last_index();
  }

  pub(crate) fn set_scroll(&mut self, scroll: usize) {
    self.scroll = scroll.min(self.last_index());
  }
}
