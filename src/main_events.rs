//! Application event handling - extracted from main.rs for clarity.
//!
//! Widgets never mutate app state directly; they send events which land
//! here. Handlers that need to touch the journal or open a file dialog
//! return those as deferred actions in [`EventResult`] so the caller can
//! run them after the event loop, outside the borrow of the bus.

use log::debug;
use std::path::PathBuf;
use std::time::Instant;

use crate::content::Journal;
use crate::core::event_bus::{BoxedEvent, downcast_event};
use crate::core::gallery_events::*;
use crate::core::modal_events::*;
use crate::core::{GalleryRegistry, ModalHost, PageScroll};

// === Navigation Events ===

/// Glide the page to a section anchor (navbar link, hero call-to-action)
#[derive(Clone, Debug)]
pub struct ScrollToSectionEvent(pub String);

/// Glide the page back to the very top (brand click, back-to-top button)
#[derive(Clone, Debug)]
pub struct ScrollToTopEvent;

/// Glide the page to the bottom (End key)
#[derive(Clone, Debug)]
pub struct ScrollToBottomEvent;

// === Journal Events ===

/// Replace the loaded journal with the file at this path
#[derive(Clone, Debug)]
pub struct LoadJournalEvent(pub PathBuf);

/// Ask the app to show the open-file dialog
#[derive(Clone, Debug)]
pub struct ShowOpenDialogEvent;

// === UI State Events ===

/// Show or hide the keyboard help overlay
#[derive(Clone, Debug)]
pub struct ToggleHelpEvent;

/// Enter or leave fullscreen
#[derive(Clone, Debug)]
pub struct ToggleFullscreenEvent;

/// Nudge the UI font scale by a delta
#[derive(Clone, Debug)]
pub struct AdjustFontScaleEvent(pub f32);

/// Restore the default font scale
#[derive(Clone, Debug)]
pub struct ResetFontScaleEvent;

/// Bounds for the persisted font scale.
pub const FONT_SCALE_RANGE: std::ops::RangeInclusive<f32> = 0.7..=1.6;

/// Result of handling an app event - may contain deferred actions
#[derive(Default)]
pub struct EventResult {
    pub load_journal: Option<PathBuf>,
    pub show_open_dialog: bool,
}

/// Handle a single app event (called from main event loop).
/// Returns Some(result) if event was handled, None otherwise.
#[allow(clippy::too_many_arguments)]
pub fn handle_app_event(
    event: &BoxedEvent,
    journal: &Journal,
    registry: &mut GalleryRegistry,
    modal: &mut ModalHost,
    scroll: &mut PageScroll,
    font_scale: &mut f32,
    show_help: &mut bool,
    is_fullscreen: &mut bool,
    fullscreen_dirty: &mut bool,
    now: Instant,
) -> Option<EventResult> {
    let mut result = EventResult::default();

    // === Navigation ===
    if let Some(e) = downcast_event::<ScrollToSectionEvent>(event) {
        debug!("ScrollToSection: {}", e.0);
        scroll.scroll_to_section(&e.0);
        return Some(result);
    }
    if downcast_event::<ScrollToTopEvent>(event).is_some() {
        scroll.scroll_to_top();
        return Some(result);
    }
    if downcast_event::<ScrollToBottomEvent>(event).is_some() {
        let bottom = scroll.max_offset();
        scroll.request_scroll_to(bottom);
        return Some(result);
    }

    // === Slideshows ===
    if let Some(e) = downcast_event::<GalleryNextEvent>(event) {
        registry.next(e.0, now);
        return Some(result);
    }
    if let Some(e) = downcast_event::<GalleryPrevEvent>(event) {
        registry.previous(e.0, now);
        return Some(result);
    }
    if let Some(e) = downcast_event::<GalleryShowEvent>(event) {
        registry.show(e.0, e.1, now);
        return Some(result);
    }
    if let Some(e) = downcast_event::<GalleryHoverEvent>(event) {
        registry.set_hovered(e.0, e.1, now);
        return Some(result);
    }

    // === Photo Viewer ===
    if let Some(e) = downcast_event::<ModalOpenEvent>(event) {
        if let Some(card) = journal.card(e.0) {
            // Galleries open on the slide the rotator is showing
            let seed = if card.is_gallery() {
                registry.current(card.id)
            } else {
                0
            };
            if modal.open(card.id, card.image_count(), seed, card.is_gallery(), now) {
                debug!("Viewer opened for '{}' at image {}", card.title, seed);
            }
        }
        return Some(result);
    }
    if downcast_event::<ModalCloseEvent>(event).is_some() {
        modal.close(now);
        return Some(result);
    }
    if downcast_event::<ModalNextEvent>(event).is_some() {
        modal.next();
        return Some(result);
    }
    if downcast_event::<ModalPrevEvent>(event).is_some() {
        modal.previous();
        return Some(result);
    }
    if let Some(e) = downcast_event::<ModalShowEvent>(event) {
        modal.show(e.0);
        return Some(result);
    }

    // === UI State ===
    if downcast_event::<ToggleHelpEvent>(event).is_some() {
        *show_help = !*show_help;
        return Some(result);
    }
    if downcast_event::<ToggleFullscreenEvent>(event).is_some() {
        *is_fullscreen = !*is_fullscreen;
        *fullscreen_dirty = true;
        return Some(result);
    }
    if let Some(e) = downcast_event::<AdjustFontScaleEvent>(event) {
        *font_scale =
            (*font_scale + e.0).clamp(*FONT_SCALE_RANGE.start(), *FONT_SCALE_RANGE.end());
        debug!("Font scale: {:.2}", font_scale);
        return Some(result);
    }
    if downcast_event::<ResetFontScaleEvent>(event).is_some() {
        *font_scale = 1.0;
        return Some(result);
    }

    // === Journal Management ===
    if let Some(e) = downcast_event::<LoadJournalEvent>(event) {
        result.load_journal = Some(e.0.clone());
        return Some(result);
    }
    if downcast_event::<ShowOpenDialogEvent>(event).is_some() {
        result.show_open_dialog = true;
        return Some(result);
    }

    // Event not handled
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rotator::DEFAULT_PERIOD;

    fn fresh_state() -> (Journal, GalleryRegistry, ModalHost, PageScroll) {
        let journal = Journal::sample();
        let mut registry = GalleryRegistry::new(DEFAULT_PERIOD);
        registry.rebuild(&journal, Instant::now());
        (journal, registry, ModalHost::new(), PageScroll::new())
    }

    fn dispatch(
        event: BoxedEvent,
        journal: &Journal,
        registry: &mut GalleryRegistry,
        modal: &mut ModalHost,
        scroll: &mut PageScroll,
    ) -> Option<EventResult> {
        let mut font_scale = 1.0;
        let mut show_help = false;
        let mut is_fullscreen = false;
        let mut fullscreen_dirty = false;
        handle_app_event(
            &event,
            journal,
            registry,
            modal,
            scroll,
            &mut font_scale,
            &mut show_help,
            &mut is_fullscreen,
            &mut fullscreen_dirty,
            Instant::now(),
        )
    }

    #[test]
    fn test_open_event_seeds_viewer_from_slideshow() {
        let (journal, mut registry, mut modal, mut scroll) = fresh_state();
        let card = journal
            .sections
            .iter()
            .flat_map(|s| s.cards.iter())
            .find(|c| c.is_gallery())
            .cloned()
            .unwrap();
        registry.show(card.id, 2, Instant::now());

        let handled = dispatch(
            Box::new(ModalOpenEvent(card.id)),
            &journal,
            &mut registry,
            &mut modal,
            &mut scroll,
        );
        assert!(handled.is_some());
        let session = modal.session().unwrap();
        assert_eq!(session.index, 2);
        assert!(session.is_gallery);
    }

    #[test]
    fn test_load_event_is_deferred() {
        let (journal, mut registry, mut modal, mut scroll) = fresh_state();
        let result = dispatch(
            Box::new(LoadJournalEvent(PathBuf::from("trip.json"))),
            &journal,
            &mut registry,
            &mut modal,
            &mut scroll,
        )
        .unwrap();
        assert_eq!(result.load_journal, Some(PathBuf::from("trip.json")));
    }

    #[test]
    fn test_unknown_event_is_not_handled() {
        #[derive(Clone, Debug)]
        struct StrayEvent;

        let (journal, mut registry, mut modal, mut scroll) = fresh_state();
        let handled = dispatch(
            Box::new(StrayEvent),
            &journal,
            &mut registry,
            &mut modal,
            &mut scroll,
        );
        assert!(handled.is_none());
    }

    #[test]
    fn test_scroll_events_move_the_page() {
        let (journal, mut registry, mut modal, mut scroll) = fresh_state();
        scroll.set_metrics(0.0, 800.0, 4000.0);

        dispatch(
            Box::new(ScrollToBottomEvent),
            &journal,
            &mut registry,
            &mut modal,
            &mut scroll,
        );
        assert!(scroll.is_gliding());
    }
}
