use std::time::Instant;

use eframe::egui;
use egui::{Color32, FontId, Rect, Sense, Stroke, pos2, vec2};

use crate::core::PageScroll;
use crate::main_events::ScrollToTopEvent;
use crate::theme;
use crate::widgets::chrome::chrome::{ChromeActions, Notice};
use crate::widgets::navbar::NAVBAR_HEIGHT;
use crate::widgets::paint;

const PROGRESS_HEIGHT: f32 = 3.0;
const BUTTON_RADIUS: f32 = 28.0;
const BUTTON_MARGIN: f32 = 32.0;

/// Render the scroll-following overlays. Painted above the page but below
/// the photo viewer.
pub fn render(
    ctx: &egui::Context,
    scroll: &PageScroll,
    notice: Option<&Notice>,
    now: Instant,
) -> ChromeActions {
    let mut actions = ChromeActions::new();
    let screen = ctx.screen_rect();

    egui::Area::new(egui::Id::new("chrome"))
        .order(egui::Order::Middle)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            render_progress(ui, screen, scroll);
            render_back_to_top(ui, &mut actions, screen, scroll);
            if let Some(notice) = notice {
                render_notice(ui, screen, notice, now);
            }
        });

    actions
}

/// Thin gradient strip under the navbar tracking how far down the page is.
fn render_progress(ui: &egui::Ui, screen: Rect, scroll: &PageScroll) {
    let width = screen.width() * scroll.progress();
    if width <= 0.0 {
        return;
    }
    let bar = Rect::from_min_size(
        pos2(screen.left(), screen.top() + NAVBAR_HEIGHT),
        vec2(width, PROGRESS_HEIGHT),
    );
    paint::horizontal_gradient(ui.painter(), bar, theme::ACCENT, theme::ACCENT_ALT);
}

fn render_back_to_top(
    ui: &mut egui::Ui,
    actions: &mut ChromeActions,
    screen: Rect,
    scroll: &PageScroll,
) {
    let visible = scroll.show_back_to_top();
    let t = ui
        .ctx()
        .animate_bool_with_time(ui.id().with("to_top_fade"), visible, 0.3);
    if t <= 0.0 {
        return;
    }

    let center = pos2(
        screen.right() - BUTTON_MARGIN - BUTTON_RADIUS,
        screen.bottom() - BUTTON_MARGIN - BUTTON_RADIUS,
    );
    let hit = Rect::from_center_size(center, vec2(BUTTON_RADIUS * 2.0, BUTTON_RADIUS * 2.0));

    let mut hovered = false;
    if visible {
        let resp = ui.interact(hit, ui.id().with("to_top"), Sense::click());
        hovered = resp.hovered();
        if resp.clicked() {
            actions.send(ScrollToTopEvent);
        }
        resp.on_hover_cursor(egui::CursorIcon::PointingHand);
    }
    actions.hovered |= hovered;

    let hover_t = ui
        .ctx()
        .animate_bool_with_time(ui.id().with("to_top_hover"), hovered, 0.15);
    let fill = theme::ACCENT.lerp_to_gamma(theme::ACCENT_ALT, hover_t);
    let lift = 3.0 * hover_t;
    let center = center - vec2(0.0, lift);

    ui.painter().circle_filled(
        center + vec2(0.0, 4.0),
        BUTTON_RADIUS,
        Color32::from_black_alpha((40.0 * t) as u8),
    );
    ui.painter()
        .circle_filled(center, BUTTON_RADIUS, fill.gamma_multiply(t));

    // Upward chevron
    let stroke = Stroke::new(2.5, Color32::WHITE.gamma_multiply(t));
    let apex = center + vec2(0.0, -4.0);
    ui.painter()
        .line_segment([apex + vec2(-8.0, 8.0), apex], stroke);
    ui.painter()
        .line_segment([apex, apex + vec2(8.0, 8.0)], stroke);
}

/// Bottom-center toast for load errors and the like.
fn render_notice(ui: &egui::Ui, screen: Rect, notice: &Notice, now: Instant) {
    let opacity = notice.opacity(now);
    if opacity <= 0.0 {
        return;
    }

    let galley = ui.painter().layout(
        notice.message.clone(),
        FontId::proportional(14.0),
        Color32::PLACEHOLDER,
        screen.width() * 0.7,
    );
    let size = galley.size() + vec2(32.0, 20.0);
    let rect = Rect::from_center_size(
        pos2(screen.center().x, screen.bottom() - 48.0 - size.y * 0.5),
        size,
    );

    ui.painter().rect_filled(
        rect,
        8.0,
        theme::INK.gamma_multiply(0.92 * opacity),
    );
    ui.painter().galley(
        rect.center() - galley.size() * 0.5,
        galley,
        Color32::WHITE.gamma_multiply(opacity),
    );
}
