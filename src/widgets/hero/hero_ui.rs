use std::time::Instant;

use eframe::egui;
use egui::{Align2, Color32, FontId, Rect, Sense, vec2};

use crate::content::Journal;
use crate::core::reveal::{self, RevealTracker};
use crate::main_events::ScrollToSectionEvent;
use crate::theme;
use crate::widgets::hero::hero::{HERO_MIN_HEIGHT, HeroActions};
use crate::widgets::paint;

/// Render the opening banner at the top of the scroll content. The banner
/// block itself scrolls normally; its gradient and text are painted shifted
/// by `parallax_shift`, so they glide away faster than the page.
pub fn render(
    ui: &mut egui::Ui,
    journal: &Journal,
    tracker: &mut RevealTracker,
    parallax_shift: f32,
    now: Instant,
) -> HeroActions {
    let mut actions = HeroActions::new();

    let height = (ui.ctx().screen_rect().height() * 0.88).max(HERO_MIN_HEIGHT);
    let (rect, resp) = ui.allocate_exact_size(vec2(ui.available_width(), height), Sense::hover());
    actions.hovered = resp.hovered();
    if !ui.is_rect_visible(rect) {
        return actions;
    }

    tracker.observe("hero", rect, ui.clip_rect(), now);
    let ease = theme::ease_out(tracker.hero_progress("hero", now));
    let rise = reveal::HERO_RISE * (1.0 - ease);

    let painter = ui.painter().with_clip_rect(rect);
    let shifted = rect.translate(vec2(0.0, parallax_shift));
    paint::vertical_gradient(&painter, shifted, theme::HERO_TOP, theme::HERO_BOTTOM);

    let center = shifted.center() + vec2(0.0, rise);
    let title = if journal.title.is_empty() {
        "Travelogue"
    } else {
        journal.title.as_str()
    };
    painter.text(
        center - vec2(0.0, 48.0),
        Align2::CENTER_CENTER,
        title,
        FontId::proportional(52.0),
        Color32::WHITE.gamma_multiply(ease),
    );
    if !journal.subtitle.is_empty() {
        painter.text(
            center + vec2(0.0, 8.0),
            Align2::CENTER_CENTER,
            &journal.subtitle,
            FontId::proportional(20.0),
            Color32::WHITE.gamma_multiply(0.9 * ease),
        );
    }

    // Call to action, pointing at the first section
    if let Some(first) = journal.sections.first() {
        let label_galley = painter.layout_no_wrap(
            "Start Reading".to_owned(),
            FontId::proportional(16.0),
            Color32::PLACEHOLDER,
        );
        let pill = Rect::from_center_size(
            center + vec2(0.0, 84.0),
            label_galley.size() + vec2(48.0, 24.0),
        );
        let hit = pill.intersect(rect);
        let pill_resp = if hit.is_positive() {
            Some(ui.interact(hit, ui.id().with("hero_cta"), Sense::click()))
        } else {
            None
        };
        let hover_t = pill_resp.as_ref().map_or(0.0, |r| {
            ui.ctx()
                .animate_bool_with_time(r.id.with("hover"), r.hovered(), 0.2)
        });

        painter.rect_filled(
            pill,
            pill.height() * 0.5,
            Color32::WHITE.gamma_multiply(0.2 * hover_t * ease),
        );
        painter.rect_stroke(
            pill,
            pill.height() * 0.5,
            egui::Stroke::new(2.0, Color32::WHITE.gamma_multiply(ease)),
            egui::StrokeKind::Inside,
        );
        painter.galley(
            pill.center() - label_galley.size() * 0.5,
            label_galley,
            Color32::WHITE.gamma_multiply(ease),
        );

        if let Some(r) = pill_resp {
            if r.clicked() {
                actions.send(ScrollToSectionEvent(first.id.clone()));
            }
            r.on_hover_cursor(egui::CursorIcon::PointingHand);
        }
    }

    actions
}
