//! Photo viewer session state.
//!
//! At most one viewer session exists at a time. Sessions move through
//! Opening -> Open -> Closing; the session object survives the closing fade
//! and is removed TRANSITION after close() so the overlay can animate out.
//! Sessions carry a generation counter: a close schedules removal for its
//! own generation only, so opening a new viewer during the fade-out is never
//! killed by the previous session's removal.

use std::time::{Duration, Instant};

use log::debug;
use uuid::Uuid;

/// Open/close fade duration
pub const TRANSITION: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Opening,
    Open,
    Closing,
}

/// One presentation of a card in the viewer overlay.
#[derive(Debug, Clone)]
pub struct ModalSession {
    pub generation: u64,
    pub card_id: Uuid,
    pub index: usize,
    pub len: usize,
    pub is_gallery: bool,
    pub phase: ModalPhase,
    phase_started: Instant,
}

/// Owner of the single viewer session and its removal schedule.
#[derive(Debug, Default)]
pub struct ModalHost {
    session: Option<ModalSession>,
    next_generation: u64,
    pending_removal: Option<(u64, Instant)>,
}

impl ModalHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&ModalSession> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Page scrolling is frozen while a session is opening or open. The lock
    /// releases the moment close() runs, not when the fade finishes.
    pub fn scroll_locked(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.phase != ModalPhase::Closing)
    }

    /// Start a session for `card_id`, seeded at `index`. Ignored while a
    /// session is opening or open; a closing session is superseded and its
    /// scheduled removal left to die against the new generation.
    pub fn open(&mut self, card_id: Uuid, len: usize, index: usize, is_gallery: bool, now: Instant) -> bool {
        if self.scroll_locked() {
            debug!("Viewer already open, ignoring open for card {card_id}");
            return false;
        }
        self.next_generation += 1;
        self.session = Some(ModalSession {
            generation: self.next_generation,
            card_id,
            index: if len == 0 { 0 } else { index.min(len - 1) },
            len,
            is_gallery,
            phase: ModalPhase::Opening,
            phase_started: now,
        });
        true
    }

    /// Begin the closing fade. Idempotent: further closes during the fade do
    /// nothing. Removal is scheduled a full TRANSITION out; closing mid-open
    /// back-dates the fade so the overlay shrinks from its current state
    /// instead of popping to fully visible first.
    pub fn close(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.phase == ModalPhase::Closing {
            return;
        }
        let p = match session.phase {
            ModalPhase::Opening => phase_progress(session.phase_started, now),
            _ => 1.0,
        };
        session.phase = ModalPhase::Closing;
        session.phase_started = now - TRANSITION.mul_f32(1.0 - p);
        self.pending_removal = Some((session.generation, now + TRANSITION));
    }

    /// Drop the session immediately, fade and all. For document replacement.
    pub fn clear(&mut self) {
        self.session = None;
        self.pending_removal = None;
    }

    /// Advance phase transitions and fire due removals. Returns true when
    /// the session was promoted or removed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(session) = self.session.as_mut() {
            if session.phase == ModalPhase::Opening && now >= session.phase_started + TRANSITION {
                session.phase = ModalPhase::Open;
                session.phase_started = now;
                changed = true;
            }
        }

        if let Some((generation, due)) = self.pending_removal {
            if now >= due {
                self.pending_removal = None;
                match self.session.as_ref() {
                    Some(s) if s.generation == generation => {
                        self.session = None;
                        changed = true;
                    }
                    // Superseded: a newer session owns the slot
                    _ => {}
                }
            }
        }

        changed
    }

    /// Advance the viewer one image. No effect on single-image or closing
    /// sessions.
    pub fn next(&mut self) {
        self.show_relative(1);
    }

    /// Step the viewer back one image.
    pub fn previous(&mut self) {
        self.show_relative(-1);
    }

    fn show_relative(&mut self, delta: i64) {
        if let Some(s) = self.session.as_ref() {
            self.show(s.index as i64 + delta);
        }
    }

    /// Jump to image `index`, wrapping modulo the session length.
    pub fn show(&mut self, index: i64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.phase == ModalPhase::Closing || session.len == 0 {
            return;
        }
        session.index = (index.rem_euclid(session.len as i64)) as usize;
    }

    /// Fade state in 0..=1 for the overlay: rises while opening, falls while
    /// closing. Linear; callers apply their own easing.
    pub fn transition_progress(&self, now: Instant) -> f32 {
        match self.session.as_ref() {
            None => 0.0,
            Some(s) => match s.phase {
                ModalPhase::Opening => phase_progress(s.phase_started, now),
                ModalPhase::Open => 1.0,
                ModalPhase::Closing => 1.0 - phase_progress(s.phase_started, now),
            },
        }
    }

    /// Time until the next phase flip or removal, if one is scheduled.
    pub fn until_deadline(&self, now: Instant) -> Option<Duration> {
        let phase_due = self.session.as_ref().and_then(|s| match s.phase {
            ModalPhase::Opening => Some(s.phase_started + TRANSITION),
            _ => None,
        });
        let removal_due = self.pending_removal.map(|(_, due)| due);
        [phase_due, removal_due]
            .into_iter()
            .flatten()
            .min()
            .map(|d| d.saturating_duration_since(now))
    }
}

fn phase_progress(started: Instant, now: Instant) -> f32 {
    (now.saturating_duration_since(started).as_secs_f32() / TRANSITION.as_secs_f32()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    #[test]
    fn test_open_starts_opening_session() {
        let t0 = Instant::now();
        let mut host = ModalHost::new();
        let card = Uuid::new_v4();

        assert!(host.open(card, 3, 1, true, t0));
        let s = host.session().unwrap();
        assert_eq!(s.card_id, card);
        assert_eq!(s.index, 1);
        assert_eq!(s.phase, ModalPhase::Opening);
        assert!(host.scroll_locked());
    }

    #[test]
    fn test_open_while_open_is_ignored() {
        let t0 = Instant::now();
        let mut host = ModalHost::new();
        let first = Uuid::new_v4();

        assert!(host.open(first, 3, 2, true, t0));
        assert!(!host.open(Uuid::new_v4(), 5, 0, true, at(t0, 100)));
        assert_eq!(host.session().unwrap().card_id, first);
        assert_eq!(host.session().unwrap().index, 2);
    }

    #[test]
    fn test_opening_promotes_to_open() {
        let t0 = Instant::now();
        let mut host = ModalHost::new();
        host.open(Uuid::new_v4(), 1, 0, false, t0);

        assert!(!host.tick(at(t0, 399)));
        assert_eq!(host.session().unwrap().phase, ModalPhase::Opening);

        assert!(host.tick(at(t0, 400)));
        assert_eq!(host.session().unwrap().phase, ModalPhase::Open);
        assert_eq!(host.transition_progress(at(t0, 500)), 1.0);
    }

    #[test]
    fn test_close_releases_lock_before_removal() {
        let t0 = Instant::now();
        let mut host = ModalHost::new();
        host.open(Uuid::new_v4(), 2, 0, true, t0);
        host.tick(at(t0, 400));

        host.close(at(t0, 1000));
        assert!(host.is_open());
        assert!(!host.scroll_locked());
        assert_eq!(host.session().unwrap().phase, ModalPhase::Closing);

        // Session survives the fade, then goes away
        assert!(!host.tick(at(t0, 1399)));
        assert!(host.is_open());
        assert!(host.tick(at(t0, 1400)));
        assert!(!host.is_open());
    }

    #[test]
    fn test_close_is_idempotent() {
        let t0 = Instant::now();
        let mut host = ModalHost::new();
        host.open(Uuid::new_v4(), 2, 0, true, t0);
        host.tick(at(t0, 400));

        host.close(at(t0, 1000));
        host.close(at(t0, 1200));

        // Second close must not extend the removal schedule
        assert!(host.tick(at(t0, 1400)));
        assert!(!host.is_open());
    }

    #[test]
    fn test_open_during_closing_supersedes() {
        let t0 = Instant::now();
        let mut host = ModalHost::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        host.open(first, 2, 0, true, t0);
        host.tick(at(t0, 400));
        host.close(at(t0, 1000));

        assert!(host.open(second, 4, 1, true, at(t0, 1100)));
        assert_eq!(host.session().unwrap().card_id, second);
        assert_eq!(host.session().unwrap().phase, ModalPhase::Opening);
        assert!(host.scroll_locked());

        // First session's removal fires at t=1400 but targets the old
        // generation; the new session must survive it.
        host.tick(at(t0, 1400));
        assert!(host.is_open());
        assert_eq!(host.session().unwrap().card_id, second);
    }

    #[test]
    fn test_close_mid_open_backdates_fade() {
        let t0 = Instant::now();
        let mut host = ModalHost::new();
        host.open(Uuid::new_v4(), 1, 0, false, t0);

        // Half-way through the fade-in, close. Fade-out continues from 0.5.
        host.close(at(t0, 200));
        let p = host.transition_progress(at(t0, 200));
        assert!((p - 0.5).abs() < 0.01, "progress {p}");

        // Removal still takes a full transition from close time
        assert!(!host.tick(at(t0, 599)));
        assert!(host.tick(at(t0, 600)));
        assert!(!host.is_open());
    }

    #[test]
    fn test_navigation_wraps() {
        let t0 = Instant::now();
        let mut host = ModalHost::new();
        host.open(Uuid::new_v4(), 3, 0, true, t0);

        host.previous();
        assert_eq!(host.session().unwrap().index, 2);
        host.next();
        assert_eq!(host.session().unwrap().index, 0);
        host.show(-4);
        assert_eq!(host.session().unwrap().index, 2);
        host.show(7);
        assert_eq!(host.session().unwrap().index, 1);
    }

    #[test]
    fn test_navigation_ignored_while_closing() {
        let t0 = Instant::now();
        let mut host = ModalHost::new();
        host.open(Uuid::new_v4(), 3, 1, true, t0);
        host.tick(at(t0, 400));
        host.close(at(t0, 1000));

        host.next();
        host.show(0);
        assert_eq!(host.session().unwrap().index, 1);
    }

    #[test]
    fn test_open_clamps_seed_index() {
        let t0 = Instant::now();
        let mut host = ModalHost::new();
        host.open(Uuid::new_v4(), 2, 9, true, t0);
        assert_eq!(host.session().unwrap().index, 1);
    }

    #[test]
    fn test_until_deadline() {
        let t0 = Instant::now();
        let mut host = ModalHost::new();
        assert_eq!(host.until_deadline(t0), None);

        host.open(Uuid::new_v4(), 1, 0, false, t0);
        assert_eq!(host.until_deadline(at(t0, 100)), Some(Duration::from_millis(300)));

        host.tick(at(t0, 400));
        assert_eq!(host.until_deadline(at(t0, 500)), None);

        host.close(at(t0, 1000));
        assert_eq!(host.until_deadline(at(t0, 1100)), Some(Duration::from_millis(300)));
    }
}
