//! lemon.markets REST client implementation.

use std::collections::HashSet;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use url::Url;

use crate::account::Account;
use crate::error::{ApiError, LemonError};
use crate::rest::endpoints::LEMON_BASE_URL;
use crate::rest::page::{Page, PageParams};

/// The lemon.markets REST request helper.
///
/// Every request is authorized with the credentials of the [`Account`] passed in,
/// so one client can serve several accounts. Transient failures are retried with
/// exponential backoff and every request is traced.
///
/// # Example
///
/// ```rust,no_run
/// use lemon_markets_client::{Account, RestClient};
/// use lemon_markets_client::rest::endpoints;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = RestClient::new();
///     let account = Account::with_token("my_access_token");
///
///     let state: serde_json::Value = client.request(&account, endpoints::STATE).await?;
///     println!("State: {}", state);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    page_size: Option<u32>,
}

impl RestClient {
    /// Create a new client against the paper trading API with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> RestClientBuilder {
        RestClientBuilder::new()
    }

    /// The normalized base URL, always ending with `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one authorized GET against `endpoint` and decode the JSON body.
    pub async fn request<T>(&self, account: &Account, endpoint: &str) -> Result<T, LemonError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint);
        self.get(account, &url).await
    }

    /// GET a paged collection and return the rows of all pages in server order.
    ///
    /// Follows `next` links until the server reports the last page.
    pub async fn request_paged<T>(
        &self,
        account: &Account,
        endpoint: &str,
    ) -> Result<Vec<T>, LemonError>
    where
        T: DeserializeOwned,
    {
        let mut url = self.first_page_url(endpoint)?;
        let mut visited = HashSet::new();
        let mut rows = Vec::new();

        loop {
            if !visited.insert(url.clone()) {
                return Err(LemonError::InvalidResponse(format!(
                    "Pagination loop detected at {}",
                    url
                )));
            }

            let page: Page<T> = self.get(account, url.as_str()).await?;
            tracing::debug!(url = %url, rows = page.results.len(), "fetched page");
            rows.extend(page.results);

            match page.next {
                // Links may be absolute or relative to the current page.
                Some(next) => url = url.join(&next)?,
                None => break,
            }
        }

        Ok(rows)
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    fn first_page_url(&self, endpoint: &str) -> Result<Url, LemonError> {
        let query_string = serde_urlencoded::to_string(PageParams {
            limit: self.page_size,
        })
        .map_err(|e| LemonError::InvalidResponse(e.to_string()))?;
        let url = if query_string.is_empty() {
            self.endpoint_url(endpoint)
        } else {
            format!("{}?{}", self.endpoint_url(endpoint), query_string)
        };
        Ok(Url::parse(&url)?)
    }

    async fn get<T>(&self, account: &Account, url: &str) -> Result<T, LemonError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http_client
            .get(url)
            .header(AUTHORIZATION, account.credentials().bearer())
            .send()
            .await?;
        self.parse_response(response).await
    }

    /// Parse a response from the lemon.markets API.
    async fn parse_response<T>(&self, response: reqwest::Response) -> Result<T, LemonError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "lemon.markets request failed");
            return Err(LemonError::Api(ApiError::from_body(status.as_u16(), &body)));
        }

        serde_json::from_str(&body).map_err(|e| {
            LemonError::InvalidResponse(format!("Failed to parse response: {}. Body: {}", e, body))
        })
    }
}

impl Default for RestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .finish()
    }
}

/// Builder for [`RestClient`].
pub struct RestClientBuilder {
    base_url: String,
    user_agent: Option<String>,
    max_retries: u32,
    page_size: Option<u32>,
}

impl RestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: LEMON_BASE_URL.to_string(),
            user_agent: None,
            max_retries: 3,
            page_size: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the maximum number of retries for transient failures.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Ask the server for pages of `size` rows. The server default applies otherwise.
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Build the client.
    pub fn build(self) -> RestClient {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("lemon-markets-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("lemon-markets-client"));
        headers.insert(USER_AGENT, header_value);

        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(self.max_retries);

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        let mut base_url = self.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        RestClient {
            http_client: client,
            base_url,
            page_size: self.page_size,
        }
    }
}

impl Default for RestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
