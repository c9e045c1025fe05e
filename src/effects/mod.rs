//! Cosmetic page effects.
//!
//! Each effect is plain state advanced by host events and frame ticks; the
//! host turns the results into presentation.

pub mod hover;
pub mod reveal;
pub mod ripple;
pub mod scroll;
pub mod typing;

use std::time::Instant;

use rand::Rng;

use crate::particles::{Bounds, ParticleAnimator};

pub use hover::{HoverEffects, TagTransform};
pub use reveal::{ObserverOptions, SectionReveal, SectionStyle, Span};
pub use ripple::{RippleField, RippleFrame};
pub use scroll::{AnchorClick, ScrollGeometry, SmoothScroll};
pub use typing::Typewriter;

/// What the host knows about the page when the effects start.
#[derive(Debug, Clone)]
pub struct EffectsSetup<'a> {
    pub section_ids: &'a [&'a str],
    /// Current text of the headline bio slot.
    pub bio_text: &'a str,
    pub viewport: Bounds,
    pub skill_tag_count: usize,
}

pub struct Effects {
    pub scroll: SmoothScroll,
    pub reveal: SectionReveal,
    pub typing: Typewriter,
    pub particles: ParticleAnimator,
    pub hover: HoverEffects,
    pub ripples: RippleField,
}

impl Effects {
    /// Starts every effect once, in page order: smooth scroll, section
    /// reveal, typing, particles, hover/ripple. The host must clear the bio
    /// slot afterwards since the typewriter now owns its text.
    pub fn initialize<R: Rng + ?Sized>(setup: EffectsSetup<'_>, rng: &mut R, now: Instant) -> Self {
        let scroll = SmoothScroll::new(setup.section_ids.iter().copied());
        tracing::debug!(sections = setup.section_ids.len(), "smooth scroll ready");

        let reveal = SectionReveal::new(setup.section_ids.len(), ObserverOptions::default());
        tracing::debug!("section reveal observing");

        let typing = Typewriter::capture(setup.bio_text, now);
        tracing::debug!(chars = setup.bio_text.chars().count(), "typing effect captured bio");

        let mut particles = ParticleAnimator::new();
        particles.start(rng, setup.viewport);

        let hover = HoverEffects::new(setup.skill_tag_count);
        let ripples = RippleField::new();
        tracing::debug!(tags = setup.skill_tag_count, "interactive effects ready");

        Self {
            scroll,
            reveal,
            typing,
            particles,
            hover,
            ripples,
        }
    }
}
