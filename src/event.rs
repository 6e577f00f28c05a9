use super::*;

pub(crate) enum Event {
  Recommendations {
    request_id: u64,
    result: Result<RecommendResponse, ClientError>,
  },
  Suggestions {
    request_id: u64,
    result: Result<AutocompleteResponse, ClientError>,
  },
}
