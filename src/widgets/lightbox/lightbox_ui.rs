use std::time::Instant;

use eframe::egui;
use egui::{Align2, Color32, CornerRadius, FontId, Rect, Sense, pos2, vec2};

use crate::content::{ImageStore, Journal};
use crate::core::modal_events::*;
use crate::core::{ModalHost, ModalSession};
use crate::theme;
use crate::widgets::lightbox::lightbox::LightboxActions;
use crate::widgets::paint;

const CONTENT_MAX_WIDTH: f32 = 700.0;
const MEDIA_HEIGHT: f32 = 420.0;
const FALLBACK_MEDIA_HEIGHT: f32 = 300.0;
const FOOTER_HEIGHT: f32 = 72.0;
const ACCENT_BAR: f32 = 4.0;

/// Render the viewer overlay above everything else. No-op without a live
/// session; during the closing fade the session is still present and the
/// overlay rides the transition back out.
pub fn render(
    ctx: &egui::Context,
    journal: &Journal,
    host: &ModalHost,
    store: &mut ImageStore,
    now: Instant,
) -> LightboxActions {
    let mut actions = LightboxActions::new();
    let Some(session) = host.session() else {
        return actions;
    };
    let Some(card) = journal.card(session.card_id) else {
        return actions;
    };

    let t = theme::ease_out_quart(host.transition_progress(now));
    let screen = ctx.screen_rect();

    egui::Area::new(egui::Id::new("lightbox"))
        .order(egui::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            ui.allocate_rect(screen, Sense::hover());
            let painter = ui.painter().clone();
            let a = |c: Color32| c.gamma_multiply(t);

            // Backdrop; its click closes unless something above takes it
            painter.rect_filled(screen, 0.0, theme::SCRIM.gamma_multiply(t));
            let backdrop_resp =
                ui.interact(screen, ui.id().with("backdrop"), Sense::click());
            if backdrop_resp.clicked() {
                actions.send(ModalCloseEvent);
            }

            // Scaled, rising card
            let scale = 0.95 + 0.05 * t;
            let width = (CONTENT_MAX_WIDTH.min(screen.width() * 0.9)) * scale;

            let image = card
                .image_at(session.index)
                .filter(|image| !image.is_empty());
            let texture = image.and_then(|image| store.texture(&image.path));
            let has_art = image.is_some_and(|i| !store.is_failed(&i.path));
            let mut media_h = if has_art { MEDIA_HEIGHT } else { FALLBACK_MEDIA_HEIGHT };

            let desc_galley = painter.layout(
                card.description.clone(),
                FontId::proportional(16.0),
                Color32::PLACEHOLDER,
                width - 72.0,
            );
            let info_h = 24.0 + 34.0 + 8.0 + desc_galley.size().y + 24.0;
            let mut total_h = ACCENT_BAR + media_h + info_h + FOOTER_HEIGHT;
            let max_h = screen.height() * 0.92;
            if total_h > max_h {
                media_h = (media_h - (total_h - max_h)).max(200.0);
                total_h = ACCENT_BAR + media_h + info_h + FOOTER_HEIGHT;
            }

            let rise = 20.0 * (1.0 - t);
            let content = Rect::from_center_size(
                screen.center() + vec2(0.0, rise),
                vec2(width, total_h),
            );

            painter.rect_filled(
                content.translate(vec2(0.0, 12.0)).expand(6.0),
                8.0,
                Color32::from_black_alpha((70.0 * t) as u8),
            );
            painter.rect_filled(content, 4.0, a(theme::CARD));

            // Swallow clicks on the card so only true backdrop clicks close
            let content_resp = ui.interact(content, ui.id().with("content"), Sense::click());
            actions.hovered = content_resp.hovered();

            // Accent bar across the top
            paint::horizontal_gradient(
                &painter,
                Rect::from_min_size(content.min, vec2(content.width(), ACCENT_BAR)),
                a(theme::ACCENT),
                a(theme::ACCENT_ALT),
            );

            let media_rect = Rect::from_min_size(
                pos2(content.left(), content.top() + ACCENT_BAR),
                vec2(content.width(), media_h),
            );
            render_media(ui, &mut actions, &painter, media_rect, session, texture.as_ref(), t);

            // Caption block
            let text_left = content.left() + 36.0;
            let title_pos = pos2(text_left, media_rect.bottom() + 24.0);
            painter.text(
                title_pos,
                Align2::LEFT_TOP,
                &card.title,
                FontId::proportional(24.0),
                a(theme::INK),
            );
            painter.galley(
                pos2(text_left, title_pos.y + 42.0),
                desc_galley,
                a(theme::INK_SOFT),
            );

            render_footer(ui, &mut actions, &painter, content, journal, session, t);
            render_close_icon(ui, &mut actions, &painter, content, t);
        });

    actions
}

fn render_media(
    ui: &mut egui::Ui,
    actions: &mut LightboxActions,
    painter: &egui::Painter,
    media_rect: Rect,
    session: &ModalSession,
    texture: Option<&egui::TextureHandle>,
    t: f32,
) {
    let a = |c: Color32| c.gamma_multiply(t);
    let clipped = painter.with_clip_rect(media_rect);
    clipped.rect_filled(media_rect, 0.0, a(theme::WASH));

    match texture {
        Some(tex) => {
            let tex_size = vec2(tex.size()[0] as f32, tex.size()[1] as f32);
            if session.is_gallery {
                clipped.image(
                    tex.id(),
                    media_rect,
                    paint::cover_uv(tex_size, media_rect.size()),
                    a(Color32::WHITE),
                );
            } else {
                let fitted = paint::contain_rect(tex_size, media_rect);
                clipped.image(
                    tex.id(),
                    fitted,
                    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                    a(Color32::WHITE),
                );
            }
        }
        None => paint::placeholder_art(&clipped, media_rect, 48.0, t),
    }

    if !session.is_gallery || session.len <= 1 {
        return;
    }

    // Gallery arrows
    for (side, x) in [
        (-1i64, media_rect.left() + 44.0),
        (1i64, media_rect.right() - 44.0),
    ] {
        let center = pos2(x, media_rect.center().y);
        let hit = Rect::from_center_size(center, vec2(48.0, 48.0));
        let resp = ui.interact(hit, ui.id().with(("viewer_arrow", side)), Sense::click());
        let hover_t = ui
            .ctx()
            .animate_bool_with_time(resp.id.with("hover"), resp.hovered(), 0.15);
        let bg = theme::OVERLAY_CONTROL.gamma_multiply(1.0 + 0.6 * hover_t);
        painter.circle_filled(center, 24.0, bg.gamma_multiply(t));
        painter.text(
            center,
            Align2::CENTER_CENTER,
            if side < 0 { "‹" } else { "›" },
            FontId::proportional(26.0),
            a(Color32::WHITE),
        );
        if resp.clicked() {
            if side < 0 {
                actions.send(ModalPrevEvent);
            } else {
                actions.send(ModalNextEvent);
            }
        }
        resp.on_hover_cursor(egui::CursorIcon::PointingHand);
    }

    // Dots
    let spacing = 18.0;
    let start_x = media_rect.center().x - (session.len as f32 - 1.0) * spacing * 0.5;
    for i in 0..session.len {
        let center = pos2(start_x + i as f32 * spacing, media_rect.bottom() - 20.0);
        let hit = Rect::from_center_size(center, vec2(16.0, 16.0));
        let resp = ui.interact(hit, ui.id().with(("viewer_dot", i)), Sense::click());
        let (radius, color) = if i == session.index {
            (4.8, a(Color32::WHITE))
        } else {
            (4.0, a(Color32::WHITE.gamma_multiply(0.4)))
        };
        painter.circle_filled(center, radius, color);
        if resp.clicked() {
            actions.send(ModalShowEvent(i as i64));
        }
        resp.on_hover_cursor(egui::CursorIcon::PointingHand);
    }
}

fn render_footer(
    ui: &mut egui::Ui,
    actions: &mut LightboxActions,
    painter: &egui::Painter,
    content: Rect,
    journal: &Journal,
    session: &ModalSession,
    t: f32,
) {
    let a = |c: Color32| c.gamma_multiply(t);
    let footer = Rect::from_min_size(
        pos2(content.left(), content.bottom() - FOOTER_HEIGHT),
        vec2(content.width(), FOOTER_HEIGHT),
    );
    painter.rect_filled(
        footer,
        CornerRadius { nw: 0, ne: 0, sw: 4, se: 4 },
        a(theme::WASH),
    );
    painter.line_segment(
        [footer.left_top(), footer.right_top()],
        egui::Stroke::new(1.0, a(theme::HAIRLINE)),
    );

    // Left: media type and place
    let label = if session.is_gallery {
        "🖼 Gallery Image"
    } else {
        "📸 Single Image"
    };
    let left = footer.left() + 36.0;
    painter.text(
        pos2(left, footer.center().y - 10.0),
        Align2::LEFT_CENTER,
        label,
        FontId::proportional(13.0),
        a(theme::INK_LABEL),
    );
    if !journal.location.is_empty() {
        painter.text(
            pos2(left, footer.center().y + 12.0),
            Align2::LEFT_CENTER,
            format!("📍 {}", journal.location),
            FontId::proportional(12.0),
            a(theme::INK_FAINT),
        );
    }

    // Right: close button
    let close_galley = painter.layout_no_wrap(
        "× Close".to_owned(),
        FontId::proportional(14.0),
        Color32::PLACEHOLDER,
    );
    let close_rect = Rect::from_min_size(
        pos2(
            footer.right() - 36.0 - close_galley.size().x - 32.0,
            footer.center().y - (close_galley.size().y + 16.0) * 0.5,
        ),
        close_galley.size() + vec2(32.0, 16.0),
    );
    let close_resp = ui.interact(close_rect, ui.id().with("viewer_close_btn"), Sense::click());
    let hover_t = ui
        .ctx()
        .animate_bool_with_time(close_resp.id.with("hover"), close_resp.hovered(), 0.15);
    painter.rect_filled(
        close_rect,
        4.0,
        a(theme::BUTTON_WASH.lerp_to_gamma(theme::CHIP, hover_t)),
    );
    painter.galley(
        close_rect.center() - close_galley.size() * 0.5,
        close_galley,
        a(theme::INK),
    );
    if close_resp.clicked() {
        actions.send(ModalCloseEvent);
    }
    close_resp.on_hover_cursor(egui::CursorIcon::PointingHand);

    // Middle: position counter, galleries only
    if session.is_gallery && session.len > 0 {
        let counter = format!("{} / {}", session.index + 1, session.len);
        let chip_galley =
            painter.layout_no_wrap(counter, FontId::proportional(13.0), Color32::PLACEHOLDER);
        let chip_rect = Rect::from_min_size(
            pos2(
                close_rect.left() - 16.0 - chip_galley.size().x - 24.0,
                footer.center().y - (chip_galley.size().y + 12.0) * 0.5,
            ),
            chip_galley.size() + vec2(24.0, 12.0),
        );
        painter.rect_filled(chip_rect, 12.0, a(theme::CHIP));
        painter.galley(
            chip_rect.center() - chip_galley.size() * 0.5,
            chip_galley,
            a(theme::INK_LABEL),
        );
    }
}

fn render_close_icon(
    ui: &mut egui::Ui,
    actions: &mut LightboxActions,
    painter: &egui::Painter,
    content: Rect,
    t: f32,
) {
    let center = pos2(content.right() - 32.0, content.top() + 32.0);
    let hit = Rect::from_center_size(center, vec2(32.0, 32.0));
    let resp = ui.interact(hit, ui.id().with("viewer_close_icon"), Sense::click());
    let hover_t = ui
        .ctx()
        .animate_bool_with_time(resp.id.with("hover"), resp.hovered(), 0.15);
    let bg = theme::OVERLAY_CONTROL.gamma_multiply(1.0 + 0.6 * hover_t);
    painter.circle_filled(center, 16.0, bg.gamma_multiply(t));
    painter.text(
        center,
        Align2::CENTER_CENTER,
        "×",
        FontId::proportional(22.0),
        Color32::WHITE.gamma_multiply(t),
    );
    if resp.clicked() {
        actions.send(ModalCloseEvent);
    }
    resp.on_hover_cursor(egui::CursorIcon::PointingHand);
}
