use std::time::{Duration, Instant};

pub const RIPPLE_DURATION: Duration = Duration::from_millis(600);
pub const RIPPLE_DIAMETER: f64 = 100.0;
pub const RIPPLE_MAX_SCALE: f64 = 4.0;
pub const RIPPLE_OPACITY: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Ripple {
    link: usize,
    x: f64,
    y: f64,
    spawned: Instant,
}

/// A ripple as it should be drawn right now, centred on `(x, y)` relative to
/// its link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleFrame {
    pub link: usize,
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
    pub opacity: f64,
}

/// Click ripples on the social and contact links.
#[derive(Debug, Clone, Default)]
pub struct RippleField {
    ripples: Vec<Ripple>,
}

impl RippleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, link: usize, x: f64, y: f64, now: Instant) {
        self.ripples.push(Ripple {
            link,
            x,
            y,
            spawned: now,
        });
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    /// Drops finished ripples and projects the rest. Scale grows linearly
    /// from 0 to 4 while opacity fades from 0.6 to 0.
    pub fn frames(&mut self, now: Instant) -> Vec<RippleFrame> {
        self.ripples
            .retain(|r| now.saturating_duration_since(r.spawned) < RIPPLE_DURATION);

        self.ripples
            .iter()
            .map(|r| {
                let progress = now.saturating_duration_since(r.spawned).as_secs_f64()
                    / RIPPLE_DURATION.as_secs_f64();
                RippleFrame {
                    link: r.link,
                    x: r.x,
                    y: r.y,
                    diameter: RIPPLE_DIAMETER * RIPPLE_MAX_SCALE * progress,
                    opacity: RIPPLE_OPACITY * (1.0 - progress),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ripple_expands_and_fades() {
        let start = Instant::now();
        let mut field = RippleField::new();
        field.spawn(2, 10.0, 20.0, start);

        let first = field.frames(start);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].diameter, 0.0);
        assert!((first[0].opacity - 0.6).abs() < 1e-9);

        let half = field.frames(start + RIPPLE_DURATION / 2)[0];
        assert_eq!((half.link, half.x, half.y), (2, 10.0, 20.0));
        assert!((half.diameter - 200.0).abs() < 1e-6);
        assert!((half.opacity - 0.3).abs() < 1e-6);
    }

    #[test]
    fn ripple_is_removed_after_duration() {
        let start = Instant::now();
        let mut field = RippleField::new();
        field.spawn(0, 0.0, 0.0, start);
        field.spawn(1, 0.0, 0.0, start + Duration::from_millis(300));

        let frames = field.frames(start + RIPPLE_DURATION);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].link, 1);
        assert!(field.frames(start + Duration::from_millis(900)).is_empty());
        assert!(field.is_empty());
    }
}
