pub(crate) struct PendingAutocomplete {
  pub(crate) query: String,
  pub(crate) request_id: u64,
}
