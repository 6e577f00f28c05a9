use {super::*, std::path::PathBuf};

#[derive(Debug, Parser)]
#[command(
  name = "bookrec",
  version,
  about = "Search book recommendations from the terminal"
)]
pub(crate) struct Arguments {
  /// Base URL of the recommendation backend
  #[arg(long, env = "BOOKREC_API_URL", default_value = DEFAULT_API_URL)]
  pub(crate) api_url: String,
  /// Append logs to this file (filtered with RUST_LOG, default `info`)
  #[arg(long, env = "BOOKREC_LOG_FILE")]
  pub(crate) log_file: Option<PathBuf>,
}
