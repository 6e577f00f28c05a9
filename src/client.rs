use {super::*, serde::de::DeserializeOwned};

#[derive(Deserialize)]
struct ErrorBody {
  detail: String,
}

#[derive(Serialize)]
struct RecommendRequest<'a> {
  k: usize,
  query: &'a str,
}

#[derive(Clone)]
pub(crate) struct Client {
  autocomplete_timeout: Duration,
  base_url: String,
  client: reqwest::Client,
  recommend_timeout: Duration,
}

impl Client {
  pub(crate) async fn autocomplete(
    &self,
    query: &str,
  ) -> Result<AutocompleteResponse, ClientError> {
    let response = self
      .client
      .get(self.endpoint("autocomplete"))
      .timeout(self.autocomplete_timeout)
      .query(&[("query", query)])
      .send()
      .await?;

    Self::decode(response).await
  }

  pub(crate) fn base_url(&self) -> &str {
    &self.base_url
  }

  async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
  ) -> Result<T, ClientError> {
    let status = response.status();

    let body = response.bytes().await?;

    if !status.is_success() {
      let detail = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .map(|error| error.detail);

      return Err(ClientError::Status { detail, status });
    }

    Ok(serde_json::from_slice(&body)?)
  }

  fn endpoint(&self, path: &str) -> String {
    format!("{}/{path}", self.base_url)
  }

  pub(crate) fn new(base_url: &str) -> Result<Self> {
    Self::with_http_client(base_url, reqwest::Client::builder().build()?)
  }

  pub(crate) async fn recommend(
    &self,
    query: &str,
    k: usize,
  ) -> Result<RecommendResponse, ClientError> {
    let response = self
      .client
      .post(self.endpoint("recommend"))
      .timeout(self.recommend_timeout)
      .json(&RecommendRequest { k, query })
      .send()
      .await?;

    Self::decode(response).await
  }

  fn with_http_client(base_url: &str, client: reqwest::Client) -> Result<Self> {
    let base_url = base_url.trim().trim_end_matches('/');

    let parsed = reqwest::Url::parse(base_url)?;

    anyhow::ensure!(
      matches!(parsed.scheme(), "http" | "https"),
      "unsupported scheme `{}`",
      parsed.scheme()
    );

    Ok(Self {
      autocomplete_timeout: AUTOCOMPLETE_TIMEOUT,
      base_url: base_url.to_string(),
      client,
      recommend_timeout: RECOMMEND_TIMEOUT,
    })
  }
}
