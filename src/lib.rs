//! Portfolio page driven by the public GitHub API.
//!
//! The loaders fetch a user's profile and latest repositories and project
//! them onto whatever implements [`view::ProfileView`] and
//! [`view::RepositoryView`]. The effects and the particle animator are plain
//! state machines stepped by the host.

pub mod card;
pub mod client;
pub mod config;
pub mod effects;
pub mod error;
pub mod loaders;
pub mod models;
pub mod particles;
pub mod startup;
pub mod view;

pub use client::{GitHubClient, GitHubSource};
pub use config::PortfolioConfig;
pub use error::{ConfigError, FetchError};
pub use startup::{Startup, StartupReport};
