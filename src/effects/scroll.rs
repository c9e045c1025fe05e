use std::time::{Duration, Instant};

pub const SCROLL_DURATION: Duration = Duration::from_millis(450);

/// Scroll state the host reports when an anchor is activated. Offsets grow
/// downwards from the top of the document.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollGeometry {
    pub position: f64,
    /// Largest reachable offset.
    pub max: f64,
    pub section_tops: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorClick {
    /// The host must not run its own navigation for this click.
    pub prevent_default: bool,
    /// Section the page is now scrolling to.
    pub target: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScrollAnimation {
    from: f64,
    to: f64,
    started: Instant,
}

impl ScrollAnimation {
    fn position_at(&self, now: Instant) -> (f64, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= SCROLL_DURATION {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f64() / SCROLL_DURATION.as_secs_f64();
        (self.from + (self.to - self.from) * ease_in_out(t), false)
    }
}

fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Same-page anchor navigation with eased scrolling.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    section_ids: Vec<String>,
    active: Option<ScrollAnimation>,
}

impl SmoothScroll {
    pub fn new<I, S>(section_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            section_ids: section_ids.into_iter().map(Into::into).collect(),
            active: None,
        }
    }

    /// Section index for `#id`, if the page has it.
    pub fn resolve(&self, href: &str) -> Option<usize> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        self.section_ids.iter().position(|s| s == id)
    }

    /// Clamped offset of the section `href` points at.
    pub fn target_offset(&self, href: &str, geometry: &ScrollGeometry) -> Option<f64> {
        let top = *geometry.section_tops.get(self.resolve(href)?)?;
        Some(top.clamp(0.0, geometry.max.max(0.0)))
    }

    /// Handles a click on a link. Only `#...` links are intercepted; a
    /// missing target cancels the jump without scrolling.
    pub fn on_anchor_click(
        &mut self,
        href: &str,
        geometry: &ScrollGeometry,
        now: Instant,
    ) -> AnchorClick {
        if !href.starts_with('#') {
            return AnchorClick {
                prevent_default: false,
                target: None,
            };
        }

        let target = self.resolve(href);
        match self.target_offset(href, geometry) {
            Some(to) => {
                self.active = Some(ScrollAnimation {
                    from: geometry.position,
                    to,
                    started: now,
                });
            }
            None => tracing::warn!(href, "anchor has no matching section"),
        }

        AnchorClick {
            prevent_default: true,
            target,
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.active.is_some()
    }

    /// Offset to apply this frame, or `None` when idle.
    pub fn position(&mut self, now: Instant) -> Option<f64> {
        let animation = self.active?;
        let (position, done) = animation.position_at(now);
        if done {
            self.active = None;
        }
        Some(position)
    }

    /// Drops any running animation, e.g. when the user scrolls by hand.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}
