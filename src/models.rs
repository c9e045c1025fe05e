use serde::Deserialize;

/// The subset of `/users/{username}` the portfolio reads.
///
/// Every field is optional: a missing or `null` value falls back instead of
/// failing the whole decode.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct GitHubUser {
    #[serde(default)]
    pub public_repos: Option<u64>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub following: Option<u64>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// One item from `/users/{username}/repos`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct GitHubRepo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    #[serde(default)]
    pub forks_count: Option<u64>,
    #[serde(default)]
    pub watchers_count: Option<u64>,
}

/// Profile figures as displayed on the page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Profile {
    pub public_repo_count: u64,
    pub follower_count: u64,
    pub following_count: u64,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<GitHubUser> for Profile {
    fn from(user: GitHubUser) -> Self {
        Self {
            public_repo_count: user.public_repos.unwrap_or(0),
            follower_count: user.followers.unwrap_or(0),
            following_count: user.following.unwrap_or(0),
            bio: non_empty(user.bio),
            avatar_url: non_empty(user.avatar_url),
        }
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
