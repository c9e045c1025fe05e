mod common;

use github_portfolio::card::{NO_DESCRIPTION, UNKNOWN_LANGUAGE};
use github_portfolio::loaders::RepositoryLoader;
use github_portfolio::view::{MemoryPage, RepositoryListing, NO_REPOSITORIES};
use serde_json::json;
use wiremock::{MockServer, ResponseTemplate};

use common::{mount_repos, repo_records, source_for, source_with_limit, USER};
use wiremock::matchers::{method, path, query_param};
use wiremock::Mock;

#[tokio::test]
async fn empty_list_shows_message_and_no_cards() {
    let server = MockServer::start().await;
    mount_repos(&server, ResponseTemplate::new(200).set_body_json(json!([]))).await;
    let mut page = MemoryPage::default();

    let listing = RepositoryLoader::new(source_for(&server)).load(&mut page).await;

    assert_eq!(listing, RepositoryListing::Empty);
    assert_eq!(listing.message(), Some(NO_REPOSITORIES));
    assert!(page.cards().is_empty());
    assert_eq!(page.repositories_markup(), "<p>No public repositories found.</p>");
}

#[tokio::test]
async fn cards_follow_response_order() {
    let server = MockServer::start().await;
    mount_repos(&server, ResponseTemplate::new(200).set_body_json(repo_records(6))).await;
    let mut page = MemoryPage::default();

    RepositoryLoader::new(source_for(&server)).load(&mut page).await;

    let cards = page.cards();
    assert_eq!(cards.len(), 6);
    for (i, card) in cards.iter().enumerate() {
        assert_eq!(card.name, format!("repo-{}", i + 1));
        assert_eq!(card.html_url, format!("https://github.com/octocat/repo-{}", i + 1));
    }
    let markup = page.repositories_markup();
    assert_eq!(markup.matches(r#"<div class="project-card">"#).count(), 6);
    assert!(markup.find("repo-1").unwrap() < markup.find("repo-6").unwrap());
}

#[tokio::test]
async fn sparse_record_renders_defaults() {
    let server = MockServer::start().await;
    mount_repos(
        &server,
        ResponseTemplate::new(200).set_body_json(json!([
            { "name": "foo", "html_url": "http://x", "stargazers_count": 7 }
        ])),
    )
    .await;
    let mut page = MemoryPage::default();

    RepositoryLoader::new(source_for(&server)).load(&mut page).await;

    let card = &page.cards()[0];
    assert_eq!(card.name, "foo");
    assert_eq!(card.html_url, "http://x");
    assert_eq!(card.description, NO_DESCRIPTION);
    assert_eq!(card.language, UNKNOWN_LANGUAGE);
    assert_eq!((card.stars, card.forks, card.watchers), (7, 0, 0));

    let markup = page.repositories_markup();
    assert!(markup.contains(r#"<a href="http://x" target="_blank" class="project-link">foo</a>"#));
    assert!(markup.contains("No description available."));
    assert!(markup.contains(r#"<div class="project-language">Unknown</div>"#));
    assert_eq!(markup.matches("</i> 0</span>").count(), 2);
    assert!(markup.contains("</i> 7</span>"));
}

#[tokio::test]
async fn oversized_response_renders_six_cards() {
    let server = MockServer::start().await;
    mount_repos(&server, ResponseTemplate::new(200).set_body_json(repo_records(10))).await;
    let mut page = MemoryPage::default();

    let listing = RepositoryLoader::new(source_for(&server)).load(&mut page).await;

    let RepositoryListing::Cards(cards) = listing else {
        panic!("expected cards, got {listing:?}");
    };
    assert_eq!(cards.len(), 6);
    assert_eq!(cards[5].name, "repo-6");
    let markup = page.repositories_markup();
    assert_eq!(markup.matches(r#"<div class="project-card">"#).count(), 6);
    assert!(!markup.contains("repo-7"));
}

#[tokio::test]
async fn configured_limit_is_requested_and_enforced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/users/{USER}/repos")))
        .and(query_param("per_page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_records(10)))
        .expect(1)
        .mount(&server)
        .await;
    let mut page = MemoryPage::default();

    RepositoryLoader::new(source_with_limit(&server, "3")).load(&mut page).await;

    let names: Vec<_> = page.cards().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["repo-1", "repo-2", "repo-3"]);
}

#[tokio::test]
async fn server_error_shows_error_message() {
    let server = MockServer::start().await;
    mount_repos(&server, ResponseTemplate::new(500)).await;
    let mut page = MemoryPage::default();

    let listing = RepositoryLoader::new(source_for(&server)).load(&mut page).await;

    assert_eq!(listing, RepositoryListing::Failed);
    assert_eq!(page.repositories_markup(), "<p>Error loading repositories.</p>");
    assert_eq!(page.repository_history.first(), Some(&RepositoryListing::Loading));
}

#[tokio::test]
async fn non_array_body_is_a_failure() {
    let server = MockServer::start().await;
    mount_repos(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "message": "Not Found" })),
    )
    .await;
    let mut page = MemoryPage::default();

    let listing = RepositoryLoader::new(source_for(&server)).load(&mut page).await;

    assert_eq!(listing, RepositoryListing::Failed);
}
