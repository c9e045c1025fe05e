use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{PortfolioConfig, DEFAULT_REPO_LIMIT};
use crate::error::FetchError;
use crate::models::{GitHubRepo, GitHubUser};

/// Where the loaders get their data from.
///
/// [`GitHubClient`] is the real implementation; tests substitute their own.
#[async_trait]
pub trait GitHubSource: Send + Sync {
    async fn fetch_user(&self) -> Result<GitHubUser, FetchError>;

    /// Most recently updated repositories, first page only.
    async fn fetch_repositories(&self) -> Result<Vec<GitHubRepo>, FetchError>;

    /// Cards to show at most, whatever the server returns.
    fn repo_limit(&self) -> usize {
        usize::from(DEFAULT_REPO_LIMIT)
    }
}

/// Anonymous client for the public GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    config: PortfolioConfig,
}

/// Creates a preconfigured HTTP client with the headers GitHub expects.
pub fn build_http_client() -> Result<Client, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("github-portfolio"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

    Ok(Client::builder().default_headers(headers).build()?)
}

impl GitHubClient {
    pub fn new(config: PortfolioConfig) -> Result<Self, FetchError> {
        Ok(Self::with_http(build_http_client()?, config))
    }

    /// Reuses an existing HTTP client, e.g. one shared with avatar downloads.
    pub fn with_http(http: Client, config: PortfolioConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    /// `{api_base}/users/{username}`
    pub fn user_url(&self) -> Result<Url, FetchError> {
        self.endpoint(&["users", &self.config.username])
    }

    /// `{api_base}/users/{username}/repos?sort=updated&per_page={limit}`
    pub fn repositories_url(&self) -> Result<Url, FetchError> {
        let mut url = self.endpoint(&["users", &self.config.username, "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("per_page", &self.config.repo_limit.to_string());
        Ok(url)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.config.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.config.api_base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        tracing::debug!(%url, "GET");
        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl GitHubSource for GitHubClient {
    async fn fetch_user(&self) -> Result<GitHubUser, FetchError> {
        self.get_json(self.user_url()?).await
    }

    async fn fetch_repositories(&self) -> Result<Vec<GitHubRepo>, FetchError> {
        self.get_json(self.repositories_url()?).await
    }

    fn repo_limit(&self) -> usize {
        usize::from(self.config.repo_limit)
    }
}
