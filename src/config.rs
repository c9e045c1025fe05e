//! Portfolio configuration.
//!
//! Everything the loaders need to know about *whose* portfolio this is lives
//! in [`PortfolioConfig`], which is handed to the client at construction.

use std::env;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_USERNAME: &str = "stianlars1";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// Also the upper bound: the page never shows more than this many cards.
pub const DEFAULT_REPO_LIMIT: u8 = 6;

const DEFAULT_SKILLS: &[&str] = &[
    "Rust", "TypeScript", "JavaScript", "React", "Node.js", "Python", "Docker", "Git",
];

/// A labelled outbound link shown in the social/contact row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    pub username: String,
    pub api_base: Url,
    pub repo_limit: u8,
    pub skills: Vec<String>,
    pub links: Vec<SocialLink>,
}

impl PortfolioConfig {
    /// Configuration for `username` against the public API, with default
    /// skills and a link to the GitHub profile.
    pub fn new(username: &str) -> Result<Self, ConfigError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }

        Ok(Self {
            username: username.to_string(),
            api_base: parse_api_base(DEFAULT_API_BASE)?,
            repo_limit: DEFAULT_REPO_LIMIT,
            skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            links: vec![github_link(username)],
        })
    }

    /// Points the client at another API root, e.g. a mock server.
    pub fn with_api_base(mut self, api_base: &str) -> Result<Self, ConfigError> {
        self.api_base = parse_api_base(api_base)?;
        Ok(self)
    }

    /// Reads `PORTFOLIO_*` variables from the process environment.
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let username = var("PORTFOLIO_GITHUB_USER").unwrap_or_else(|| DEFAULT_USERNAME.into());
        let mut config = Self::new(&username)?;

        if let Some(base) = var("PORTFOLIO_API_BASE") {
            config = config.with_api_base(base.trim())?;
        }

        if let Some(limit) = var("PORTFOLIO_REPO_LIMIT") {
            config.repo_limit = match limit.trim().parse::<u8>() {
                Ok(n) if (1..=DEFAULT_REPO_LIMIT).contains(&n) => n,
                _ => return Err(ConfigError::RepoLimit(limit)),
            };
        }

        if let Some(skills) = var("PORTFOLIO_SKILLS") {
            config.skills = split_list(&skills).map(str::to_string).collect();
        }

        if let Some(links) = var("PORTFOLIO_LINKS") {
            config.links = split_list(&links)
                .map(parse_link)
                .collect::<Result<_, _>>()?;
        }

        Ok(config)
    }
}

fn parse_api_base(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidApiBase {
        value: value.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

fn github_link(username: &str) -> SocialLink {
    SocialLink {
        label: "GitHub".into(),
        url: format!("https://github.com/{username}"),
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_link(entry: &str) -> Result<SocialLink, ConfigError> {
    match entry.split_once('=') {
        Some((label, url)) if !label.trim().is_empty() && !url.trim().is_empty() => {
            Ok(SocialLink {
                label: label.trim().to_string(),
                url: url.trim().to_string(),
            })
        }
        _ => Err(ConfigError::InvalidLink(entry.to_string())),
    }
}
