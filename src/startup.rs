//! Page-ready sequence: profile, then repositories.

use std::sync::Arc;

use crate::client::GitHubSource;
use crate::loaders::{ProfileLoader, RepositoryLoader};
use crate::models::Profile;
use crate::view::{ProfileView, RepositoryListing, RepositoryView};

/// What both loaders left on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    pub profile: Option<Profile>,
    pub repositories: RepositoryListing,
}

pub struct Startup {
    profile: ProfileLoader,
    repositories: RepositoryLoader,
}

impl Startup {
    pub fn new(source: Arc<dyn GitHubSource>) -> Self {
        Self {
            profile: ProfileLoader::new(source.clone()),
            repositories: RepositoryLoader::new(source),
        }
    }

    /// The repository request is only issued once the profile request has
    /// settled. Neither step can fail.
    pub async fn run<V>(&self, view: &mut V) -> StartupReport
    where
        V: ProfileView + RepositoryView + Send,
    {
        let profile = self.profile.load(view).await;
        let repositories = self.repositories.load(view).await;
        tracing::debug!(profile = profile.is_some(), "startup fetches settled");
        StartupReport {
            profile,
            repositories,
        }
    }
}
