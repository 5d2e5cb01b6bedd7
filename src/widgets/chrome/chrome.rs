//! Chrome state and actions.

use std::time::{Duration, Instant};

use crate::core::event_bus::BoxedEvent;

/// How long a notice stays up before it fades.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Tail of the TTL spent fading out.
pub const NOTICE_FADE: Duration = Duration::from_millis(300);

/// A transient message, shown bottom-center until its TTL runs out.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub shown_at: Instant,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= NOTICE_TTL
    }

    /// Opacity for the fade-out tail, 1.0 for most of the lifetime.
    pub fn opacity(&self, now: Instant) -> f32 {
        let age = now.duration_since(self.shown_at);
        if age >= NOTICE_TTL {
            return 0.0;
        }
        let remaining = NOTICE_TTL - age;
        if remaining >= NOTICE_FADE {
            1.0
        } else {
            remaining.as_secs_f32() / NOTICE_FADE.as_secs_f32()
        }
    }
}

/// Chrome result - all actions via events
#[derive(Default)]
pub struct ChromeActions {
    pub hovered: bool,
    pub events: Vec<BoxedEvent>,
}

impl ChromeActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push event to be dispatched
    pub fn send<E: crate::core::event_bus::Event>(&mut self, event: E) {
        self.events.push(Box::new(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_full_opacity_while_fresh() {
        let notice = Notice::new("saved");
        let now = notice.shown_at + Duration::from_secs(1);
        assert!(!notice.is_expired(now));
        assert_eq!(notice.opacity(now), 1.0);
    }

    #[test]
    fn test_notice_fades_at_end_of_life() {
        let notice = Notice::new("saved");
        let now = notice.shown_at + NOTICE_TTL - NOTICE_FADE / 2;
        let opacity = notice.opacity(now);
        assert!(opacity > 0.0 && opacity < 1.0);
    }

    #[test]
    fn test_notice_expires() {
        let notice = Notice::new("saved");
        let now = notice.shown_at + NOTICE_TTL;
        assert!(notice.is_expired(now));
        assert_eq!(notice.opacity(now), 0.0);
    }
}
