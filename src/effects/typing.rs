use std::time::{Duration, Instant};

pub const TYPING_DELAY: Duration = Duration::from_millis(1000);
pub const TYPING_INTERVAL: Duration = Duration::from_millis(100);

/// Re-types a captured text one character at a time.
///
/// The first character appears [`TYPING_DELAY`] after capture, each further
/// one [`TYPING_INTERVAL`] later.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    started: Instant,
    shown: usize,
}

impl Typewriter {
    /// Takes the slot's current text. The caller clears the slot.
    pub fn capture(text: &str, now: Instant) -> Self {
        Self {
            chars: text.chars().collect(),
            started: now,
            shown: 0,
        }
    }

    pub fn original(&self) -> String {
        self.chars.iter().collect()
    }

    /// Characters visible `elapsed` after capture.
    pub fn visible_len(&self, elapsed: Duration) -> usize {
        match elapsed.checked_sub(TYPING_DELAY) {
            None => 0,
            Some(typing) => {
                let steps = typing.as_millis() / TYPING_INTERVAL.as_millis() + 1;
                self.chars.len().min(steps as usize)
            }
        }
    }

    pub fn text_at(&self, elapsed: Duration) -> String {
        self.chars[..self.visible_len(elapsed)].iter().collect()
    }

    /// New slot text if it changed since the last tick.
    pub fn tick(&mut self, now: Instant) -> Option<String> {
        let len = self.visible_len(now.saturating_duration_since(self.started));
        if len == self.shown {
            return None;
        }
        self.shown = len;
        Some(self.chars[..len].iter().collect())
    }

    pub fn is_finished(&self) -> bool {
        self.shown == self.chars.len()
    }
}
