//! Repository cards and their markup projection.

use std::fmt::Write as _;

use crate::models::{non_empty, GitHubRepo};

pub const NO_DESCRIPTION: &str = "No description available.";
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Display form of one repository, with every default already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryCard {
    pub name: String,
    pub html_url: String,
    pub description: String,
    pub language: String,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
}

impl RepositoryCard {
    pub fn from_repo(repo: &GitHubRepo) -> Self {
        Self {
            name: repo.name.clone().unwrap_or_default(),
            html_url: repo.html_url.clone().unwrap_or_default(),
            description: non_empty(repo.description.clone())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            language: non_empty(repo.language.clone())
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
            stars: repo.stargazers_count.unwrap_or(0),
            forks: repo.forks_count.unwrap_or(0),
            watchers: repo.watchers_count.unwrap_or(0),
        }
    }

    /// HTML fragment for the projects container.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<div class="project-card">"#);
        let _ = write!(
            out,
            r#"<h3 class="project-title"><a href="{}" target="_blank" class="project-link">{}</a></h3>"#,
            escape_html(&self.html_url),
            escape_html(&self.name),
        );
        let _ = write!(
            out,
            r#"<p class="project-description">{}</p>"#,
            escape_html(&self.description)
        );
        let _ = write!(
            out,
            r#"<div class="project-language">{}</div>"#,
            escape_html(&self.language)
        );
        let _ = write!(
            out,
            concat!(
                r#"<div class="project-stats">"#,
                r#"<span><i class="fas fa-star"></i> {}</span>"#,
                r#"<span><i class="fas fa-code-branch"></i> {}</span>"#,
                r#"<span><i class="fas fa-eye"></i> {}</span>"#,
                "</div>"
            ),
            self.stars, self.forks, self.watchers
        );
        out.push_str("</div>");
        out
    }
}

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
