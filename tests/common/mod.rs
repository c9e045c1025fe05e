#![allow(dead_code)]

use std::sync::Arc;

use github_portfolio::{GitHubClient, GitHubSource, PortfolioConfig};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USER: &str = "octocat";

pub fn source_for(server: &MockServer) -> Arc<dyn GitHubSource> {
    let config = PortfolioConfig::new(USER)
        .unwrap()
        .with_api_base(&server.uri())
        .unwrap();
    Arc::new(GitHubClient::new(config).unwrap())
}

/// Source whose `PORTFOLIO_REPO_LIMIT` is `limit`.
pub fn source_with_limit(server: &MockServer, limit: &str) -> Arc<dyn GitHubSource> {
    let base = server.uri();
    let config = PortfolioConfig::from_lookup(|key| match key {
        "PORTFOLIO_GITHUB_USER" => Some(USER.to_string()),
        "PORTFOLIO_API_BASE" => Some(base.clone()),
        "PORTFOLIO_REPO_LIMIT" => Some(limit.to_string()),
        _ => None,
    })
    .unwrap();
    Arc::new(GitHubClient::new(config).unwrap())
}

/// `count` complete repository records named `repo-1..=repo-{count}`.
pub fn repo_records(count: usize) -> Value {
    let repos: Vec<_> = (1..=count)
        .map(|i| {
            json!({
                "name": format!("repo-{i}"),
                "html_url": format!("https://github.com/{USER}/repo-{i}"),
                "description": "demo",
                "language": "Rust",
                "stargazers_count": i,
                "forks_count": 0,
                "watchers_count": i
            })
        })
        .collect();
    json!(repos)
}

pub async fn mount_user(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{USER}")))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_repos(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{USER}/repos")))
        .and(query_param("sort", "updated"))
        .and(query_param("per_page", "6"))
        .respond_with(response)
        .mount(server)
        .await;
}
