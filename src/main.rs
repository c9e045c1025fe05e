#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
mod window;

slint::include_modules!();

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use github_portfolio::client::build_http_client;
use github_portfolio::{GitHubClient, GitHubSource, PortfolioConfig, Startup};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::window::{FrameHost, SlintPage};

const FRAME_PERIOD: Duration = Duration::from_millis(16);

fn main() -> anyhow::Result<()> {
    // Load .env variables
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PortfolioConfig::from_env().context("invalid portfolio configuration")?;
    tracing::info!(user = %config.username, api = %config.api_base, "starting portfolio");

    // Shared HTTP client for API calls and avatar downloads
    let http = build_http_client().context("failed to build HTTP client")?;
    let source: Arc<dyn GitHubSource> = Arc::new(GitHubClient::with_http(http.clone(), config.clone()));

    // Background tokio runtime for async HTTP
    let rt = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;

    let app = AppWindow::new().context("failed to create window")?;
    window::populate_static(&app, &config);

    let host = Rc::new(RefCell::new(FrameHost::default()));

    // =============================================
    //  CALLBACKS
    // =============================================
    {
        let host = host.clone();
        let app_weak = app.as_weak();
        app.on_startup_settled(move || {
            if let Some(app) = app_weak.upgrade() {
                host.borrow_mut().initialize(&app);
            }
        });
    }
    {
        let host = host.clone();
        let app_weak = app.as_weak();
        app.on_anchor_clicked(move |href| {
            if let Some(app) = app_weak.upgrade() {
                host.borrow_mut().anchor_clicked(&app, &href);
            }
        });
    }
    {
        let host = host.clone();
        let app_weak = app.as_weak();
        app.on_skill_hovered(move |index, hovered| {
            if let Some(app) = app_weak.upgrade() {
                host.borrow_mut().skill_hovered(&app, index as usize, hovered);
            }
        });
    }
    {
        let host = host.clone();
        let app_weak = app.as_weak();
        app.on_link_clicked(move |index, x, y| {
            if let Some(app) = app_weak.upgrade() {
                host.borrow_mut().link_clicked(&app, index as usize, x, y);
            }
        });
    }
    app.on_repo_clicked(|url| window::open_url(&url));

    // =============================================
    //  STARTUP: profile, then repositories, then effects
    // =============================================
    {
        let mut page = SlintPage::new(app.as_weak(), rt.handle().clone(), http);
        let app_weak = app.as_weak();
        rt.spawn(async move {
            let report = Startup::new(source).run(&mut page).await;
            tracing::info!(
                profile = report.profile.is_some(),
                repositories = ?report.repositories.message(),
                "startup fetches finished"
            );
            if let Err(err) = app_weak.upgrade_in_event_loop(|app| app.invoke_startup_settled()) {
                tracing::warn!(error = %err, "window closed before effects started");
            }
        });
    }

    let frames = slint::Timer::default();
    {
        let host = host.clone();
        let app_weak = app.as_weak();
        frames.start(slint::TimerMode::Repeated, FRAME_PERIOD, move || {
            if let Some(app) = app_weak.upgrade() {
                host.borrow_mut().tick(&app, Instant::now());
            }
        });
    }

    // Run the Slint event loop
    app.run()?;

    frames.stop();
    host.borrow().stop();
    Ok(())
}
