use std::time::Duration;

pub const HIDDEN_OFFSET: f64 = 20.0;
pub const REVEAL_TRANSITION: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the section that must be inside the root.
    pub threshold: f64,
    /// Added to the root's bottom edge; negative values shrink it.
    pub root_margin_bottom: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin_bottom: -50.0,
        }
    }
}

/// Vertical extent in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f64,
    pub height: f64,
}

impl Span {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Presentation derived from a section's visibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionStyle {
    pub opacity: f64,
    pub offset_y: f64,
}

impl SectionStyle {
    pub const HIDDEN: SectionStyle = SectionStyle {
        opacity: 0.0,
        offset_y: HIDDEN_OFFSET,
    };
    pub const SHOWN: SectionStyle = SectionStyle {
        opacity: 1.0,
        offset_y: 0.0,
    };
}

/// One-way fade-in of page sections as they scroll into view.
#[derive(Debug, Clone)]
pub struct SectionReveal {
    visible: Vec<bool>,
    options: ObserverOptions,
    connected: bool,
}

impl SectionReveal {
    pub fn new(section_count: usize, options: ObserverOptions) -> Self {
        Self {
            visible: vec![false; section_count],
            options,
            connected: true,
        }
    }

    /// Checks every hidden section against the viewport and returns the ones
    /// that became visible. Does nothing once disconnected.
    pub fn observe(&mut self, viewport: Span, sections: &[Span]) -> Vec<usize> {
        if !self.connected {
            return Vec::new();
        }

        let root = Span::new(
            viewport.top,
            (viewport.height + self.options.root_margin_bottom).max(0.0),
        );
        let mut revealed = Vec::new();
        for (i, (visible, section)) in self.visible.iter_mut().zip(sections).enumerate() {
            if !*visible && intersects(root, *section, self.options.threshold) {
                *visible = true;
                revealed.push(i);
            }
        }
        if !revealed.is_empty() {
            tracing::debug!(?revealed, "sections revealed");
        }
        revealed
    }

    /// Stops observing; revealed sections stay revealed.
    pub fn disconnect(&mut self) {
        if self.connected {
            tracing::debug!("section reveal disconnected");
        }
        self.connected = false;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Nothing is left to reveal.
    pub fn all_visible(&self) -> bool {
        self.visible.iter().all(|v| *v)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    pub fn style(&self, index: usize) -> SectionStyle {
        if self.is_visible(index) {
            SectionStyle::SHOWN
        } else {
            SectionStyle::HIDDEN
        }
    }

    pub fn styles(&self) -> Vec<SectionStyle> {
        (0..self.visible.len()).map(|i| self.style(i)).collect()
    }
}

fn intersects(root: Span, target: Span, threshold: f64) -> bool {
    let overlap = root.bottom().min(target.bottom()) - root.top.max(target.top);
    if target.height <= 0.0 {
        return target.top >= root.top && target.top <= root.bottom();
    }
    overlap > 0.0 && overlap / target.height >= threshold
}
