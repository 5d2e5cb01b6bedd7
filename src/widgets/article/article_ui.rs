use std::time::Instant;

use eframe::egui;
use egui::{Align2, Color32, CornerRadius, FontId, Rect, Sense, pos2, vec2};

use crate::content::{Card, ImageStore, Journal, Media};
use crate::core::gallery_events::*;
use crate::core::modal_events::ModalOpenEvent;
use crate::core::reveal::{self, RevealTracker};
use crate::core::scroll::SectionSpan;
use crate::core::GalleryRegistry;
use crate::theme;
use crate::widgets::article::article::ArticleActions;
use crate::widgets::paint;

const CONTENT_MAX: f32 = 1200.0;
const CARD_MIN_WIDTH: f32 = 340.0;
const GRID_GAP: f32 = 24.0;
const MEDIA_HEIGHT: f32 = 220.0;
const INFO_HEIGHT: f32 = 120.0;
const CARD_HEIGHT: f32 = MEDIA_HEIGHT + INFO_HEIGHT;
const SECTION_GAP: f32 = 96.0;

/// Render every section of the journal into the scroll content. `origin_y`
/// is the screen y of the content's top, used to express section positions
/// in scroll coordinates.
pub fn render(
    ui: &mut egui::Ui,
    journal: &Journal,
    registry: &GalleryRegistry,
    tracker: &mut RevealTracker,
    store: &mut ImageStore,
    origin_y: f32,
    now: Instant,
) -> ArticleActions {
    let mut actions = ArticleActions::new();

    let avail = ui.available_width();
    let content_w = (avail - 48.0).clamp(CARD_MIN_WIDTH * 0.5, CONTENT_MAX);
    let content_left = (avail - content_w) * 0.5;

    for section in &journal.sections {
        ui.add_space(SECTION_GAP);

        // Measure the header and grid before allocating, so the section's
        // height stays constant while its entrance animation plays.
        let intro_galley = ui.painter().layout(
            section.intro.clone(),
            FontId::proportional(17.0),
            Color32::PLACEHOLDER,
            content_w.min(680.0),
        );
        let intro_h = if section.intro.is_empty() {
            0.0
        } else {
            intro_galley.size().y + 16.0
        };
        let header_h = 44.0 + intro_h + 40.0;

        let cols = (((content_w + GRID_GAP) / (CARD_MIN_WIDTH + GRID_GAP)).floor() as usize).max(1);
        let cols = cols.min(section.cards.len().max(1));
        let col_w = (content_w - GRID_GAP * (cols - 1) as f32) / cols as f32;
        let rows = section.cards.len().div_ceil(cols);
        let grid_h = rows as f32 * CARD_HEIGHT + rows.saturating_sub(1) as f32 * GRID_GAP;

        let (section_rect, _) =
            ui.allocate_exact_size(vec2(avail, header_h + grid_h), Sense::hover());

        actions.spans.push(SectionSpan {
            id: section.id.clone(),
            top: section_rect.top() - origin_y,
            height: section_rect.height() + SECTION_GAP,
        });
        tracker.observe(&section.id, section_rect, ui.clip_rect(), now);

        if !ui.is_rect_visible(section_rect) {
            continue;
        }

        let sect_ease = theme::ease_out(tracker.section_progress(&section.id, now));
        let sect_dy = reveal::SECTION_RISE * (1.0 - sect_ease);

        // Header: centered title over an accent tick, then the intro
        let painter = ui.painter().clone();
        let center_x = section_rect.left() + avail * 0.5;
        let title_pos = pos2(center_x, section_rect.top() + sect_dy + 8.0);
        painter.text(
            title_pos,
            Align2::CENTER_TOP,
            &section.title,
            FontId::proportional(30.0),
            theme::INK.gamma_multiply(sect_ease),
        );
        painter.rect_filled(
            Rect::from_center_size(pos2(center_x, title_pos.y + 44.0), vec2(48.0, 3.0)),
            1.5,
            theme::ACCENT.gamma_multiply(sect_ease),
        );
        if !section.intro.is_empty() {
            let intro_pos = pos2(
                center_x - intro_galley.size().x * 0.5,
                section_rect.top() + sect_dy + 56.0,
            );
            painter.galley(intro_pos, intro_galley, theme::INK_SOFT.gamma_multiply(sect_ease));
        }

        // Card grid
        let grid_top = section_rect.top() + header_h;
        for (i, card) in section.cards.iter().enumerate() {
            let row = i / cols;
            let col = i % cols;
            let card_ease = theme::ease_out(tracker.card_progress(&section.id, i, now));
            let dy = sect_dy + reveal::CARD_RISE * (1.0 - card_ease);
            let card_rect = Rect::from_min_size(
                pos2(
                    section_rect.left() + content_left + col as f32 * (col_w + GRID_GAP),
                    grid_top + row as f32 * (CARD_HEIGHT + GRID_GAP) + dy,
                ),
                vec2(col_w, CARD_HEIGHT),
            );
            render_card(
                ui,
                &mut actions,
                card,
                registry,
                store,
                card_rect,
                sect_ease * card_ease,
            );
        }
    }

    render_footer(ui, journal);
    actions
}

fn render_card(
    ui: &mut egui::Ui,
    actions: &mut ArticleActions,
    card: &Card,
    registry: &GalleryRegistry,
    store: &mut ImageStore,
    card_rect: Rect,
    alpha: f32,
) {
    let resp = ui.interact(card_rect, ui.id().with(card.id), Sense::click());
    let card_hovered = ui.rect_contains_pointer(card_rect);
    let hover_t = ui
        .ctx()
        .animate_bool_with_time(resp.id.with("hover"), card_hovered, 0.3);
    let rect = card_rect.translate(vec2(0.0, -8.0 * hover_t));
    let media_rect = Rect::from_min_size(rect.min, vec2(rect.width(), MEDIA_HEIGHT));

    // Slideshow controls sit above the card's own click target
    let current = registry.current(card.id);
    let mut controls_clicked = false;
    let (show_arrows, show_dots) = match &card.media {
        Media::Gallery { images, arrows, dots } if images.len() > 1 => (*arrows, *dots),
        _ => (false, false),
    };

    let mut arrow_hits = Vec::new();
    if show_arrows {
        for (side, dx) in [(-1i64, 28.0), (1i64, media_rect.width() - 28.0)] {
            let center = pos2(media_rect.left() + dx, media_rect.center().y);
            let hit = Rect::from_center_size(center, vec2(32.0, 32.0));
            let id = ui.id().with((card.id, "arrow", side));
            let arrow_resp = ui.interact(hit, id, Sense::click());
            if arrow_resp.clicked() {
                controls_clicked = true;
                if side < 0 {
                    actions.send(GalleryPrevEvent(card.id));
                } else {
                    actions.send(GalleryNextEvent(card.id));
                }
            }
            arrow_resp.on_hover_cursor(egui::CursorIcon::PointingHand);
            arrow_hits.push((center, side));
        }
    }

    let mut dot_hits = Vec::new();
    if show_dots {
        let len = card.image_count();
        let spacing = 14.0;
        let start_x = media_rect.center().x - (len as f32 - 1.0) * spacing * 0.5;
        for i in 0..len {
            let center = pos2(start_x + i as f32 * spacing, media_rect.bottom() - 14.0);
            let hit = Rect::from_center_size(center, vec2(14.0, 14.0));
            let id = ui.id().with((card.id, "dot", i));
            let dot_resp = ui.interact(hit, id, Sense::click());
            if dot_resp.clicked() {
                controls_clicked = true;
                actions.send(GalleryShowEvent(card.id, i as i64));
            }
            dot_resp.on_hover_cursor(egui::CursorIcon::PointingHand);
            dot_hits.push((center, i));
        }
    }

    // Hover over the media area pauses that card's rotation; report only
    // transitions so the registry isn't spammed every frame
    if card.is_gallery() {
        let media_hovered = ui.rect_contains_pointer(media_rect);
        if media_hovered != registry.is_hovered(card.id) {
            actions.send(GalleryHoverEvent(card.id, media_hovered));
        }
    }

    if !ui.is_rect_visible(card_rect) {
        return;
    }
    let painter = ui.painter().clone();
    let a = |c: Color32| c.gamma_multiply(alpha);

    // Shadow deepens with hover lift
    painter.rect_filled(
        rect.translate(vec2(0.0, 6.0)).expand(2.0 + 3.0 * hover_t),
        12.0,
        Color32::from_black_alpha(((16.0 + 14.0 * hover_t) * alpha) as u8),
    );
    painter.rect_filled(rect, 12.0, a(theme::CARD));

    // Media: cover-cropped image, zooming slightly on hover
    let zoom = 1.0 + 0.05 * hover_t;
    let zoomed = Rect::from_center_size(media_rect.center(), media_rect.size() * zoom);
    let media_painter = painter.with_clip_rect(media_rect);
    let top_round = CornerRadius { nw: 12, ne: 12, sw: 0, se: 0 };
    media_painter.rect_filled(media_rect, top_round, a(theme::PLACEHOLDER_TOP));

    let texture = card
        .image_at(current)
        .filter(|image| !image.is_empty())
        .and_then(|image| store.texture(&image.path));
    match texture {
        Some(tex) => {
            let tex_size = vec2(tex.size()[0] as f32, tex.size()[1] as f32);
            media_painter.image(
                tex.id(),
                zoomed,
                paint::cover_uv(tex_size, zoomed.size()),
                a(Color32::WHITE),
            );
        }
        None => paint::placeholder_art(&media_painter, zoomed, 48.0, alpha),
    }

    // Slideshow chrome over the image
    for (center, side) in arrow_hits {
        media_painter.circle_filled(center, 16.0, a(theme::OVERLAY_CONTROL));
        let glyph = if side < 0 { "‹" } else { "›" };
        media_painter.text(
            center,
            Align2::CENTER_CENTER,
            glyph,
            FontId::proportional(18.0),
            a(Color32::WHITE),
        );
    }
    for (center, i) in dot_hits {
        let color = if i == current {
            a(Color32::WHITE)
        } else {
            a(Color32::WHITE.gamma_multiply(0.4))
        };
        let radius = if i == current { 4.8 } else { 4.0 };
        media_painter.circle_filled(center, radius, color);
    }

    // Info block
    let text_left = rect.left() + 20.0;
    let title_pos = pos2(text_left, rect.top() + MEDIA_HEIGHT + 18.0);
    painter.text(
        title_pos,
        Align2::LEFT_TOP,
        &card.title,
        FontId::proportional(18.0),
        a(theme::INK),
    );
    let desc_galley = painter.layout(
        card.description.clone(),
        FontId::proportional(14.0),
        Color32::PLACEHOLDER,
        rect.width() - 40.0,
    );
    let desc_clip = Rect::from_min_max(
        pos2(rect.left(), title_pos.y + 28.0),
        pos2(rect.right(), rect.bottom() - 14.0),
    );
    painter.with_clip_rect(desc_clip).galley(
        pos2(text_left, title_pos.y + 30.0),
        desc_galley,
        a(theme::INK_SOFT),
    );

    if resp.clicked() && !controls_clicked {
        actions.send(ModalOpenEvent(card.id));
    }
    resp.on_hover_cursor(egui::CursorIcon::PointingHand);
    if card_hovered {
        actions.hovered = true;
    }
}

fn render_footer(ui: &mut egui::Ui, journal: &Journal) {
    ui.add_space(SECTION_GAP);
    let avail = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(vec2(avail, 120.0), Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }
    let painter = ui.painter();
    painter.line_segment(
        [
            pos2(rect.left() + avail * 0.2, rect.top()),
            pos2(rect.right() - avail * 0.2, rect.top()),
        ],
        egui::Stroke::new(1.0, theme::HAIRLINE),
    );
    let title = if journal.title.is_empty() {
        "Travelogue"
    } else {
        journal.title.as_str()
    };
    painter.text(
        pos2(rect.center().x, rect.top() + 36.0),
        Align2::CENTER_CENTER,
        title,
        FontId::proportional(15.0),
        theme::INK_SOFT,
    );
    if !journal.location.is_empty() {
        painter.text(
            pos2(rect.center().x, rect.top() + 62.0),
            Align2::CENTER_CENTER,
            format!("📍 {}", journal.location),
            FontId::proportional(12.0),
            theme::INK_FAINT,
        );
    }
}
