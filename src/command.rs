#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
  Backspace,
  ClearQuery,
  Dismiss,
  Focus,
  HideHelp,
  Insert(char),
  None,
  PageDown,
  PageUp,
  PickSuggestion(usize),
  Quit,
  SelectFirst,
  SelectLast,
  SelectNext,
  SelectPrevious,
  ShowHelp,
  Submit,
}
