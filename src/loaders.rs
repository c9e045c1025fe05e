//! Profile and repository loaders.
//!
//! A loader fetches one resource and projects it onto its view. Failures stop
//! here: they are logged and replaced by a fallback projection.

use std::sync::Arc;

use crate::card::RepositoryCard;
use crate::client::GitHubSource;
use crate::models::Profile;
use crate::view::{BioSlot, ProfileView, RepositoryListing, RepositoryView, StatSlot, LOADING_TEXT};

pub struct ProfileLoader {
    source: Arc<dyn GitHubSource>,
}

impl ProfileLoader {
    pub fn new(source: Arc<dyn GitHubSource>) -> Self {
        Self { source }
    }

    /// Returns the profile that was displayed, or `None` if the fallback was
    /// applied.
    pub async fn load<V: ProfileView + Send>(&self, view: &mut V) -> Option<Profile> {
        for slot in StatSlot::ALL {
            view.set_stat(slot, LOADING_TEXT);
        }

        match self.source.fetch_user().await {
            Ok(user) => {
                let profile = Profile::from(user);
                show_profile(view, &profile);
                tracing::info!(
                    repos = profile.public_repo_count,
                    followers = profile.follower_count,
                    following = profile.following_count,
                    "profile loaded"
                );
                Some(profile)
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load profile");
                for slot in StatSlot::ALL {
                    view.set_stat(slot, "0");
                }
                None
            }
        }
    }
}

fn show_profile<V: ProfileView>(view: &mut V, profile: &Profile) {
    view.set_stat(StatSlot::PublicRepos, &profile.public_repo_count.to_string());
    view.set_stat(StatSlot::Followers, &profile.follower_count.to_string());
    view.set_stat(StatSlot::Following, &profile.following_count.to_string());

    if let Some(bio) = &profile.bio {
        view.set_bio(BioSlot::Headline, bio);
        view.set_bio(BioSlot::About, bio);
    }
    if let Some(url) = &profile.avatar_url {
        view.set_avatar(url);
    }
}

pub struct RepositoryLoader {
    source: Arc<dyn GitHubSource>,
}

impl RepositoryLoader {
    pub fn new(source: Arc<dyn GitHubSource>) -> Self {
        Self { source }
    }

    /// Renders the container and returns what ended up in it.
    pub async fn load<V: RepositoryView + Send>(&self, view: &mut V) -> RepositoryListing {
        view.render_repositories(RepositoryListing::Loading);

        let listing = match self.source.fetch_repositories().await {
            Ok(repos) if repos.is_empty() => {
                tracing::info!("no public repositories");
                RepositoryListing::Empty
            }
            Ok(repos) => {
                let limit = self.source.repo_limit();
                if repos.len() > limit {
                    tracing::warn!(
                        count = repos.len(),
                        limit,
                        "server returned extra repositories"
                    );
                }
                let cards: Vec<_> = repos
                    .iter()
                    .take(limit)
                    .map(RepositoryCard::from_repo)
                    .collect();
                tracing::info!(count = cards.len(), "repositories loaded");
                RepositoryListing::Cards(cards)
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load repositories");
                RepositoryListing::Failed
            }
        };

        view.render_repositories(listing.clone());
        listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::models::{GitHubRepo, GitHubUser};
    use crate::view::MemoryPage;
    use async_trait::async_trait;

    struct Fixed {
        user: Option<GitHubUser>,
        repos: Option<Vec<GitHubRepo>>,
    }

    fn decode_failure() -> FetchError {
        FetchError::Decode(serde_json::from_str::<u8>("x").unwrap_err())
    }

    #[async_trait]
    impl GitHubSource for Fixed {
        async fn fetch_user(&self) -> Result<GitHubUser, FetchError> {
            self.user.clone().ok_or_else(decode_failure)
        }

        async fn fetch_repositories(&self) -> Result<Vec<GitHubRepo>, FetchError> {
            self.repos.clone().ok_or_else(decode_failure)
        }
    }

    fn source(user: Option<GitHubUser>, repos: Option<Vec<GitHubRepo>>) -> Arc<dyn GitHubSource> {
        Arc::new(Fixed { user, repos })
    }

    #[tokio::test]
    async fn profile_without_bio_keeps_existing_text() {
        let user = GitHubUser {
            public_repos: Some(12),
            followers: Some(5),
            following: Some(3),
            ..Default::default()
        };
        let mut page = MemoryPage::with_bio("Static bio");
        page.avatar_url = "placeholder.png".into();

        let profile = ProfileLoader::new(source(Some(user), None)).load(&mut page).await;

        assert!(profile.is_some());
        assert_eq!(page.public_repos, "12");
        assert_eq!(page.followers, "5");
        assert_eq!(page.following, "3");
        assert_eq!(page.headline_bio, "Static bio");
        assert_eq!(page.about_bio, "Static bio");
        assert_eq!(page.avatar_url, "placeholder.png");
    }

    #[tokio::test]
    async fn profile_bio_fills_both_slots() {
        let user = GitHubUser {
            bio: Some("Rustacean".into()),
            avatar_url: Some("https://avatars/1".into()),
            ..Default::default()
        };
        let mut page = MemoryPage::with_bio("Static bio");

        ProfileLoader::new(source(Some(user), None)).load(&mut page).await;

        assert_eq!(page.headline_bio, "Rustacean");
        assert_eq!(page.about_bio, "Rustacean");
        assert_eq!(page.avatar_url, "https://avatars/1");
        assert_eq!(page.public_repos, "0");
    }

    #[tokio::test]
    async fn profile_failure_writes_zeros() {
        let mut page = MemoryPage::with_bio("Static bio");

        let profile = ProfileLoader::new(source(None, None)).load(&mut page).await;

        assert!(profile.is_none());
        for slot in StatSlot::ALL {
            assert_eq!(page.stat(slot), "0");
        }
        assert_eq!(page.headline_bio, "Static bio");
    }

    #[tokio::test]
    async fn repositories_show_loading_first() {
        let mut page = MemoryPage::default();

        RepositoryLoader::new(source(None, Some(vec![]))).load(&mut page).await;

        assert_eq!(
            page.repository_history,
            vec![RepositoryListing::Loading, RepositoryListing::Empty]
        );
    }

    #[tokio::test]
    async fn repositories_keep_response_order() {
        let repos = ["b", "a", "c"]
            .iter()
            .map(|name| GitHubRepo {
                name: Some(name.to_string()),
                ..Default::default()
            })
            .collect();
        let mut page = MemoryPage::default();

        RepositoryLoader::new(source(None, Some(repos))).load(&mut page).await;

        let names: Vec<_> = page.cards().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[tokio::test]
    async fn repositories_are_cut_to_the_limit() {
        let repos = (0..9)
            .map(|i| GitHubRepo {
                name: Some(format!("repo-{i}")),
                ..Default::default()
            })
            .collect();
        let mut page = MemoryPage::default();

        RepositoryLoader::new(source(None, Some(repos))).load(&mut page).await;

        let names: Vec<_> = page.cards().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["repo-0", "repo-1", "repo-2", "repo-3", "repo-4", "repo-5"]);
    }

    #[tokio::test]
    async fn repository_failure_shows_error_message() {
        let mut page = MemoryPage::default();

        let listing = RepositoryLoader::new(source(None, None)).load(&mut page).await;

        assert_eq!(listing, RepositoryListing::Failed);
        assert_eq!(page.repositories_markup(), "<p>Error loading repositories.</p>");
    }
}
