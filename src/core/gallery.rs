//! Registry of per-card slideshow rotators.
//!
//! Rebuilt from the journal whenever a document loads. Cards are keyed by
//! their runtime id, so navigation events from the article grid and the
//! photo viewer route to the right rotator without positional coupling.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use log::debug;
use uuid::Uuid;

use crate::content::{Journal, Media};
use crate::core::rotator::Rotator;

/// Slideshow state for every gallery card in the loaded journal.
#[derive(Debug, Default)]
pub struct GalleryRegistry {
    rotators: HashMap<Uuid, Rotator>,
    hovered: HashSet<Uuid>,
    period: Duration,
}

impl GalleryRegistry {
    pub fn new(period: Duration) -> Self {
        Self {
            rotators: HashMap::new(),
            hovered: HashSet::new(),
            period,
        }
    }

    /// Drop all rotators and rebuild from the journal. Every gallery card
    /// gets a rotator armed at `now`; single-image cards get none.
    pub fn rebuild(&mut self, journal: &Journal, now: Instant) {
        self.rotators.clear();
        self.hovered.clear();
        for section in &journal.sections {
            for card in &section.cards {
                if let Media::Gallery { images, .. } = &card.media {
                    let mut rotator = Rotator::new(images.len(), self.period);
                    rotator.start(now);
                    self.rotators.insert(card.id, rotator);
                }
            }
        }
        debug!("Gallery registry rebuilt: {} rotators", self.rotators.len());
    }

    pub fn clear(&mut self) {
        self.rotators.clear();
        self.hovered.clear();
    }

    pub fn rotator_count(&self) -> usize {
        self.rotators.len()
    }

    /// Current slide for a card; 0 for cards without a rotator.
    pub fn current(&self, id: Uuid) -> usize {
        self.rotators.get(&id).map(|r| r.current()).unwrap_or(0)
    }

    pub fn is_running(&self, id: Uuid) -> bool {
        self.rotators.get(&id).is_some_and(|r| r.is_running())
    }

    pub fn is_hovered(&self, id: Uuid) -> bool {
        self.hovered.contains(&id)
    }

    /// Arrow click: advance and push the next auto-advance a full period out.
    pub fn next(&mut self, id: Uuid, now: Instant) {
        if let Some(rotator) = self.rotators.get_mut(&id) {
            rotator.next();
            rotator.reset(now);
        }
    }

    /// Arrow click: step back and push the next auto-advance a full period out.
    pub fn previous(&mut self, id: Uuid, now: Instant) {
        if let Some(rotator) = self.rotators.get_mut(&id) {
            rotator.previous();
            rotator.reset(now);
        }
    }

    /// Dot click: jump to a slide and push the next auto-advance out.
    pub fn show(&mut self, id: Uuid, index: i64, now: Instant) {
        if let Some(rotator) = self.rotators.get_mut(&id) {
            rotator.show(index);
            rotator.reset(now);
        }
    }

    /// Hover pauses rotation; leaving resumes it with a fresh period.
    /// Only transitions act: hover state is re-reported every frame by the
    /// immediate-mode UI, and a repeated "still hovered" must not keep
    /// rescheduling the deadline.
    pub fn set_hovered(&mut self, id: Uuid, hovered: bool, now: Instant) {
        let changed = if hovered {
            self.hovered.insert(id)
        } else {
            self.hovered.remove(&id)
        };
        if !changed {
            return;
        }
        if let Some(rotator) = self.rotators.get_mut(&id) {
            if hovered {
                rotator.pause();
            } else {
                rotator.resume(now);
            }
        }
    }

    /// Advance every past-deadline rotator. Returns true when any slide
    /// changed, so the app knows a repaint is worth requesting.
    pub fn tick_all(&mut self, now: Instant) -> bool {
        let mut advanced = false;
        for rotator in self.rotators.values_mut() {
            advanced |= rotator.tick(now);
        }
        advanced
    }

    /// Soonest auto-advance deadline across all running rotators.
    pub fn until_next_deadline(&self, now: Instant) -> Option<Duration> {
        self.rotators
            .values()
            .filter_map(|r| r.until_deadline(now))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Card, ImageRef, Journal, Section};

    fn journal_with_cards(cards: Vec<Card>) -> Journal {
        Journal {
            sections: vec![Section {
                id: "days".into(),
                title: "Days".into(),
                intro: String::new(),
                cards,
            }],
            ..Journal::default()
        }
    }

    fn gallery_card(n: usize) -> Card {
        Card::gallery(
            "Card",
            "Desc",
            (0..n).map(|i| ImageRef::new(format!("img_{i}.jpg"))).collect(),
        )
    }

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    #[test]
    fn test_rebuild_creates_rotators_for_galleries_only() {
        let t0 = Instant::now();
        let journal = journal_with_cards(vec![
            gallery_card(3),
            Card::single("Solo", "One image", ImageRef::new("solo.jpg")),
            gallery_card(2),
        ]);

        let mut reg = GalleryRegistry::new(Duration::from_millis(3000));
        reg.rebuild(&journal, t0);
        assert_eq!(reg.rotator_count(), 2);

        let gallery_id = journal.sections[0].cards[0].id;
        let single_id = journal.sections[0].cards[1].id;
        assert!(reg.is_running(gallery_id));
        assert!(!reg.is_running(single_id));
    }

    #[test]
    fn test_empty_gallery_not_running() {
        let t0 = Instant::now();
        let journal = journal_with_cards(vec![gallery_card(0)]);
        let mut reg = GalleryRegistry::new(Duration::from_millis(3000));
        reg.rebuild(&journal, t0);

        let id = journal.sections[0].cards[0].id;
        assert_eq!(reg.rotator_count(), 1);
        assert!(!reg.is_running(id));
        assert!(!reg.tick_all(at(t0, 60_000)));
    }

    #[test]
    fn test_navigation_routes_by_id() {
        let t0 = Instant::now();
        let journal = journal_with_cards(vec![gallery_card(3), gallery_card(4)]);
        let mut reg = GalleryRegistry::new(Duration::from_millis(3000));
        reg.rebuild(&journal, t0);

        let a = journal.sections[0].cards[0].id;
        let b = journal.sections[0].cards[1].id;

        reg.next(a, t0);
        reg.previous(b, t0);
        reg.show(b, 2, t0);
        assert_eq!(reg.current(a), 1);
        assert_eq!(reg.current(b), 2);

        // Unknown id is ignored
        reg.next(Uuid::new_v4(), t0);
    }

    #[test]
    fn test_manual_nav_defers_auto_advance() {
        let t0 = Instant::now();
        let journal = journal_with_cards(vec![gallery_card(3)]);
        let mut reg = GalleryRegistry::new(Duration::from_millis(3000));
        reg.rebuild(&journal, t0);
        let id = journal.sections[0].cards[0].id;

        reg.next(id, at(t0, 2000));
        assert!(!reg.tick_all(at(t0, 3000)));
        assert!(reg.tick_all(at(t0, 5000)));
        assert_eq!(reg.current(id), 2);
    }

    #[test]
    fn test_hover_pauses_and_leave_resumes() {
        let t0 = Instant::now();
        let journal = journal_with_cards(vec![gallery_card(3)]);
        let mut reg = GalleryRegistry::new(Duration::from_millis(3000));
        reg.rebuild(&journal, t0);
        let id = journal.sections[0].cards[0].id;

        reg.set_hovered(id, true, at(t0, 1000));
        assert!(reg.is_hovered(id));
        assert!(!reg.is_running(id));
        assert!(!reg.tick_all(at(t0, 60_000)));

        reg.set_hovered(id, false, at(t0, 60_000));
        assert!(!reg.is_hovered(id));
        assert!(!reg.tick_all(at(t0, 62_000)));
        assert!(reg.tick_all(at(t0, 63_000)));
    }

    #[test]
    fn test_manual_nav_mid_hover_restarts_rotation() {
        let t0 = Instant::now();
        let journal = journal_with_cards(vec![gallery_card(3)]);
        let mut reg = GalleryRegistry::new(Duration::from_millis(3000));
        reg.rebuild(&journal, t0);
        let id = journal.sections[0].cards[0].id;

        reg.set_hovered(id, true, t0);
        assert!(!reg.is_running(id));

        // Arrow click while hovered: cancel-then-restart arms the clock
        reg.next(id, at(t0, 100));
        assert_eq!(reg.current(id), 1);
        assert!(reg.is_running(id));

        // A repeated "hovered" report is not a transition and must not
        // re-pause the clock the click just restarted
        reg.set_hovered(id, true, at(t0, 200));
        assert!(reg.is_running(id));

        // Leaving reschedules; a stray second "left" is ignored
        reg.set_hovered(id, false, at(t0, 300));
        reg.set_hovered(id, false, at(t0, 400));
        assert!(!reg.tick_all(at(t0, 3200)));
        assert!(reg.tick_all(at(t0, 3300)));
    }

    #[test]
    fn test_until_next_deadline_takes_min() {
        let t0 = Instant::now();
        let journal = journal_with_cards(vec![gallery_card(2), gallery_card(2)]);
        let mut reg = GalleryRegistry::new(Duration::from_millis(3000));
        reg.rebuild(&journal, t0);
        let a = journal.sections[0].cards[0].id;

        reg.next(a, at(t0, 1000));
        // a fires at 4000, b still at 3000
        assert_eq!(reg.until_next_deadline(at(t0, 2000)), Some(Duration::from_millis(1000)));
    }
}
