//! Glue between the portfolio library and the Slint window.

use std::time::Instant;

use slint::{ComponentHandle, Image, Model, ModelRc, Rgba8Pixel, SharedPixelBuffer, SharedString, VecModel, Weak};
use url::Url;

use github_portfolio::card::RepositoryCard;
use github_portfolio::config::PortfolioConfig;
use github_portfolio::effects::{Effects, EffectsSetup, ScrollGeometry, SectionStyle, SmoothScroll, Span};
use github_portfolio::particles::{Bounds, FrameOutcome, PixelSurface};
use github_portfolio::view::{BioSlot, ProfileView, RepositoryListing, RepositoryView, StatSlot};

use crate::{AppWindow, LinkData, RepoCardData, RippleData, SectionData, SkillTagData};

pub const SECTION_IDS: [&str; 5] = ["home", "about", "skills", "projects", "contact"];

const AVATAR_SIZE: u32 = 320;

/// Loader-facing side of the window. Writes are queued onto the UI thread,
/// so this can be driven from a tokio task.
pub struct SlintPage {
    window: Weak<AppWindow>,
    runtime: tokio::runtime::Handle,
    http: reqwest::Client,
}

impl SlintPage {
    pub fn new(window: Weak<AppWindow>, runtime: tokio::runtime::Handle, http: reqwest::Client) -> Self {
        Self {
            window,
            runtime,
            http,
        }
    }

    fn update(&self, f: impl FnOnce(AppWindow) + Send + 'static) {
        if let Err(err) = self.window.upgrade_in_event_loop(f) {
            tracing::warn!(error = %err, "window is gone, dropping update");
        }
    }
}

impl ProfileView for SlintPage {
    fn set_stat(&mut self, slot: StatSlot, text: &str) {
        let text = SharedString::from(text);
        self.update(move |app| match slot {
            StatSlot::PublicRepos => app.set_public_repos(text),
            StatSlot::Followers => app.set_followers(text),
            StatSlot::Following => app.set_following(text),
        });
    }

    fn set_bio(&mut self, slot: BioSlot, text: &str) {
        let text = SharedString::from(text);
        self.update(move |app| match slot {
            BioSlot::Headline => app.set_user_bio(text),
            BioSlot::About => app.set_about_text(text),
        });
    }

    fn set_avatar(&mut self, url: &str) {
        let url = url.to_string();
        let http = self.http.clone();
        let window = self.window.clone();

        self.runtime.spawn(async move {
            let Some((pixels, w, h)) = download_avatar_pixels(&http, &url, AVATAR_SIZE).await else {
                tracing::warn!(%url, "could not load avatar image");
                return;
            };
            let _ = window.upgrade_in_event_loop(move |app| {
                let buffer = SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(&pixels, w, h);
                app.set_avatar(Image::from_rgba8(buffer));
            });
        });
    }
}

impl RepositoryView for SlintPage {
    fn render_repositories(&mut self, listing: RepositoryListing) {
        let loading = listing == RepositoryListing::Loading;
        let message = SharedString::from(listing.message().unwrap_or_default());
        let cards: Vec<RepoCardData> = match &listing {
            RepositoryListing::Cards(cards) => cards.iter().map(card_data).collect(),
            _ => Vec::new(),
        };

        self.update(move |app| {
            app.set_repos_loading(loading);
            app.set_repos_message(message);
            app.set_repo_list(ModelRc::new(VecModel::from(cards)));
        });
    }
}

fn card_data(card: &RepositoryCard) -> RepoCardData {
    RepoCardData {
        name: card.name.as_str().into(),
        url: card.html_url.as_str().into(),
        description: card.description.as_str().into(),
        language: card.language.as_str().into(),
        stars: card.stars.to_string().into(),
        forks: card.forks.to_string().into(),
        watchers: card.watchers.to_string().into(),
    }
}

/// Downloads avatar image bytes and decodes them into raw RGBA pixels.
async fn download_avatar_pixels(client: &reqwest::Client, url: &str, size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let bytes = client.get(sized_avatar_url(url, size)?).send().await.ok()?.bytes().await.ok()?;
    let decoded = image::load_from_memory(&bytes).ok()?;

    // GitHub sometimes ignores `s` for cached avatars.
    let rgba = decoded.thumbnail_exact(size, size).to_rgba8();
    let (w, h) = rgba.dimensions();

    Some((rgba.into_raw(), w, h))
}

/// `url` with GitHub's `s` size parameter appended.
fn sized_avatar_url(url: &str, size: u32) -> Option<Url> {
    let mut sized = Url::parse(url).ok()?;
    sized.query_pairs_mut().append_pair("s", &size.to_string());
    Some(sized)
}

/// Fills in the parts of the page that come from configuration.
pub fn populate_static(app: &AppWindow, config: &PortfolioConfig) {
    app.set_display_name(config.username.as_str().into());

    let tags: Vec<SkillTagData> = config
        .skills
        .iter()
        .map(|label| SkillTagData {
            label: label.as_str().into(),
            lift: 0.0,
            scale: 1.0,
        })
        .collect();
    app.set_skill_tags(ModelRc::new(VecModel::from(tags)));

    let links: Vec<LinkData> = config
        .links
        .iter()
        .map(|link| LinkData {
            label: link.label.as_str().into(),
            url: link.url.as_str().into(),
        })
        .collect();
    app.set_social_links(ModelRc::new(VecModel::from(links)));
}

pub fn open_url(url: &str) {
    if let Err(err) = open::that(url) {
        tracing::warn!(%url, error = %err, "failed to open link");
    }
}

/// UI-thread state: the effects once started, plus the particle buffer.
pub struct FrameHost {
    effects: Option<Effects>,
    surface: PixelSurface,
    styles: Vec<SectionStyle>,
    ripples_shown: bool,
    scroll_written: Option<f32>,
}

impl Default for FrameHost {
    fn default() -> Self {
        Self {
            effects: None,
            surface: PixelSurface::new(0, 0),
            styles: Vec::new(),
            ripples_shown: false,
            scroll_written: None,
        }
    }
}

impl FrameHost {
    /// Runs once both fetches have settled.
    pub fn initialize(&mut self, app: &AppWindow) {
        if self.effects.is_some() {
            return;
        }

        let viewport = viewport_bounds(app);
        let bio = app.get_user_bio();
        let setup = EffectsSetup {
            section_ids: &SECTION_IDS,
            bio_text: bio.as_str(),
            viewport,
            skill_tag_count: app.get_skill_tags().row_count(),
        };
        let effects = Effects::initialize(setup, &mut rand::thread_rng(), Instant::now());

        app.set_user_bio(SharedString::new());
        self.surface.resize(viewport.width as u32, viewport.height as u32);
        self.styles = effects.reveal.styles();
        app.set_sections(section_model(&self.styles));
        self.effects = Some(effects);
        tracing::info!("page effects running");
    }

    pub fn anchor_clicked(&mut self, app: &AppWindow, href: &str) {
        let geometry = ScrollGeometry {
            position: -app.get_scroll_offset() as f64,
            max: (app.get_content_height() - app.get_viewport_height()) as f64,
            section_tops: app.get_section_tops().iter().map(f64::from).collect(),
        };

        let Some(effects) = self.effects.as_mut() else {
            // Plain jump until smooth scrolling is set up.
            if !href.starts_with('#') {
                open_url(href);
                return;
            }
            match SmoothScroll::new(SECTION_IDS).target_offset(href, &geometry) {
                Some(offset) => app.set_scroll_offset(-offset as f32),
                None => tracing::debug!(href, "anchor has no matching section"),
            }
            return;
        };

        let click = effects.scroll.on_anchor_click(href, &geometry, Instant::now());
        if !click.prevent_default {
            open_url(href);
        }
    }

    pub fn skill_hovered(&mut self, app: &AppWindow, index: usize, hovered: bool) {
        let Some(effects) = self.effects.as_mut() else {
            return;
        };

        let transform = if hovered {
            effects.hover.pointer_enter(index)
        } else {
            effects.hover.pointer_leave(index)
        };
        let Some(transform) = transform else {
            return;
        };

        let tags = app.get_skill_tags();
        if let Some(mut tag) = tags.row_data(index) {
            tag.lift = transform.lift as f32;
            tag.scale = transform.scale as f32;
            tags.set_row_data(index, tag);
        }
    }

    pub fn link_clicked(&mut self, app: &AppWindow, index: usize, x: f32, y: f32) {
        if let Some(effects) = self.effects.as_mut() {
            effects.ripples.spawn(index, x as f64, y as f64, Instant::now());
        }
        if let Some(link) = app.get_social_links().row_data(index) {
            open_url(&link.url);
        }
    }

    /// One UI frame.
    pub fn tick(&mut self, app: &AppWindow, now: Instant) {
        let Some(effects) = self.effects.as_mut() else {
            return;
        };

        // A hand scroll during the animation wins.
        if let Some(written) = self.scroll_written {
            if effects.scroll.is_scrolling() && app.get_scroll_offset() != written {
                effects.scroll.cancel();
            }
        }
        self.scroll_written = effects.scroll.position(now).map(|position| {
            let offset = -position as f32;
            app.set_scroll_offset(offset);
            offset
        });

        if effects.reveal.is_connected() {
            let viewport = Span::new(-app.get_scroll_offset() as f64, app.get_viewport_height() as f64);
            let sections: Vec<Span> = app
                .get_section_tops()
                .iter()
                .zip(app.get_section_heights().iter())
                .map(|(top, height)| Span::new(top as f64, height as f64))
                .collect();
            effects.reveal.observe(viewport, &sections);
            let styles = effects.reveal.styles();
            if styles != self.styles {
                app.set_sections(section_model(&styles));
                self.styles = styles;
            }
            if effects.reveal.all_visible() {
                effects.reveal.disconnect();
            }
        }

        if let Some(text) = effects.typing.tick(now) {
            app.set_user_bio(text.into());
        }

        if self.ripples_shown || !effects.ripples.is_empty() {
            let frames: Vec<RippleData> = effects
                .ripples
                .frames(now)
                .into_iter()
                .map(|r| RippleData {
                    link: r.link as i32,
                    x: r.x as f32,
                    y: r.y as f32,
                    diameter: r.diameter as f32,
                    opacity: r.opacity as f32,
                })
                .collect();
            self.ripples_shown = !frames.is_empty();
            app.set_ripples(ModelRc::new(VecModel::from(frames)));
        }

        let bounds = viewport_bounds(app);
        let (w, h) = (bounds.width as u32, bounds.height as u32);
        if (w, h) != (self.surface.width(), self.surface.height()) {
            self.surface.resize(w, h);
            effects.particles.resize(bounds);
        }
        if effects.particles.frame(&mut self.surface) == FrameOutcome::Drawn && w > 0 && h > 0 {
            let buffer = SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(self.surface.as_bytes(), w, h);
            app.set_particles(Image::from_rgba8(buffer));
        }
    }

    /// Halts the particle loop; used on window teardown.
    pub fn stop(&self) {
        if let Some(effects) = &self.effects {
            effects.particles.stop_handle().stop();
        }
    }
}

fn section_model(styles: &[SectionStyle]) -> ModelRc<SectionData> {
    let data: Vec<SectionData> = styles
        .iter()
        .map(|s| SectionData {
            opacity: s.opacity as f32,
            offset: s.offset_y as f32,
        })
        .collect();
    ModelRc::new(VecModel::from(data))
}

fn viewport_bounds(app: &AppWindow) -> Bounds {
    let window = app.window();
    let size = window.size().to_logical(window.scale_factor());
    Bounds::new(size.width.max(0.0) as f64, size.height.max(0.0) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_size_is_added_to_the_query() {
        let url = sized_avatar_url("https://avatars.githubusercontent.com/u/1", 320).unwrap();
        assert_eq!(url.as_str(), "https://avatars.githubusercontent.com/u/1?s=320");

        let url = sized_avatar_url("https://avatars.githubusercontent.com/u/1?v=4", 320).unwrap();
        assert_eq!(url.as_str(), "https://avatars.githubusercontent.com/u/1?v=4&s=320");
    }

    #[test]
    fn unparsable_avatar_url_is_skipped() {
        assert!(sized_avatar_url("not a url", 320).is_none());
    }
}
