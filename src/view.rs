//! Display slots the loaders write into.
//!
//! The loaders only see these traits, so the same pipeline drives the window
//! and the in-memory [`MemoryPage`] used for headless runs and tests.

use crate::card::RepositoryCard;

pub const LOADING_TEXT: &str = "…";
pub const NO_REPOSITORIES: &str = "No public repositories found.";
pub const REPOSITORIES_FAILED: &str = "Error loading repositories.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatSlot {
    PublicRepos,
    Followers,
    Following,
}

impl StatSlot {
    pub const ALL: [StatSlot; 3] = [StatSlot::PublicRepos, StatSlot::Followers, StatSlot::Following];
}

/// The two places the bio is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BioSlot {
    Headline,
    About,
}

pub trait ProfileView {
    fn set_stat(&mut self, slot: StatSlot, text: &str);
    fn set_bio(&mut self, slot: BioSlot, text: &str);
    fn set_avatar(&mut self, url: &str);
}

/// Contents of the repository container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryListing {
    Loading,
    Cards(Vec<RepositoryCard>),
    Empty,
    Failed,
}

impl RepositoryListing {
    /// The one-line message shown instead of cards, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            RepositoryListing::Empty => Some(NO_REPOSITORIES),
            RepositoryListing::Failed => Some(REPOSITORIES_FAILED),
            RepositoryListing::Loading | RepositoryListing::Cards(_) => None,
        }
    }

    pub fn to_markup(&self) -> String {
        match self {
            RepositoryListing::Loading => r#"<div class="loading"></div>"#.to_string(),
            RepositoryListing::Cards(cards) => cards.iter().map(RepositoryCard::to_markup).collect(),
            RepositoryListing::Empty | RepositoryListing::Failed => {
                format!("<p>{}</p>", self.message().unwrap_or_default())
            }
        }
    }
}

pub trait RepositoryView {
    /// Replaces the whole container.
    fn render_repositories(&mut self, listing: RepositoryListing);
}

/// Page held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    pub public_repos: String,
    pub followers: String,
    pub following: String,
    pub headline_bio: String,
    pub about_bio: String,
    pub avatar_url: String,
    pub repositories: Option<RepositoryListing>,
    /// Every listing rendered so far, oldest first.
    pub repository_history: Vec<RepositoryListing>,
    /// Every stat write so far, oldest first.
    pub stat_history: Vec<(StatSlot, String)>,
}

impl MemoryPage {
    pub fn with_bio(text: &str) -> Self {
        Self {
            headline_bio: text.to_string(),
            about_bio: text.to_string(),
            ..Default::default()
        }
    }

    pub fn stat(&self, slot: StatSlot) -> &str {
        match slot {
            StatSlot::PublicRepos => &self.public_repos,
            StatSlot::Followers => &self.followers,
            StatSlot::Following => &self.following,
        }
    }

    /// The container as the page would show it.
    pub fn repositories_markup(&self) -> String {
        self.repositories
            .as_ref()
            .map(RepositoryListing::to_markup)
            .unwrap_or_default()
    }

    pub fn cards(&self) -> &[RepositoryCard] {
        match &self.repositories {
            Some(RepositoryListing::Cards(cards)) => cards,
            _ => &[],
        }
    }
}

impl ProfileView for MemoryPage {
    fn set_stat(&mut self, slot: StatSlot, text: &str) {
        let target = match slot {
            StatSlot::PublicRepos => &mut self.public_repos,
            StatSlot::Followers => &mut self.followers,
            StatSlot::Following => &mut self.following,
        };
        *target = text.to_string();
        self.stat_history.push((slot, text.to_string()));
    }

    fn set_bio(&mut self, slot: BioSlot, text: &str) {
        match slot {
            BioSlot::Headline => self.headline_bio = text.to_string(),
            BioSlot::About => self.about_bio = text.to_string(),
        }
    }

    fn set_avatar(&mut self, url: &str) {
        self.avatar_url = url.to_string();
    }
}

impl RepositoryView for MemoryPage {
    fn render_repositories(&mut self, listing: RepositoryListing) {
        self.repository_history.push(listing.clone());
        self.repositories = Some(listing);
    }
}
