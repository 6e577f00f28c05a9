use super::*;

/// A single cancellable deadline. Scheduling again replaces the previous
/// deadline instead of queueing a second one, and time is always supplied by
/// the caller so tests can drive it with synthetic instants.
#[derive(Debug)]
pub(crate) struct Debouncer {
  deadline: Option<Instant>,
  delay: Duration,
}

impl Debouncer {
  pub(crate) fn cancel(&mut self) {
    self.deadline = None;
  }

  /// Returns true once when the armed deadline has been reached.
  pub(crate) fn fire(&mut self, now: Instant) -> bool {
    match self.deadline {
      Some(deadline) if now >= deadline => {
        self.deadline = None;
        true
      }
      _ => false,
    }
  }

  pub(crate) fn is_pending(&self) -> bool {
    self.deadline.is_some()
  }

  pub(crate) fn new(delay: Duration) -> Self {
    Self {
      deadline: None,
      delay,
    }
  }

  pub(crate) fn schedule(&mut self, now: Instant) {
    self.deadline = Some(now + self.delay);
  }

  pub(crate) fn time_until_fire(&self, now: Instant) -> Option<Duration> {
    self
      .deadline
      .map(|deadline| deadline.saturating_duration_since(now))
  }
}
