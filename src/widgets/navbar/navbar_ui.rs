use eframe::egui;
use egui::{Color32, FontId, Rect, Sense, pos2, vec2};

use crate::content::Journal;
use crate::main_events::{ScrollToSectionEvent, ScrollToTopEvent, ShowOpenDialogEvent};
use crate::theme;
use crate::widgets::navbar::navbar::{COLLAPSE_BELOW, NAVBAR_HEIGHT, NavbarActions};
use crate::widgets::paint;

const SIDE_PADDING: f32 = 36.0;
const LINK_GAP: f32 = 28.0;
const MENU_ROW_HEIGHT: f32 = 48.0;

enum LinkTarget {
    Section(String),
    OpenDialog,
}

struct Link {
    label: String,
    target: LinkTarget,
    active: bool,
}

/// Render the fixed bar over the page. Elevation (deeper scroll) fades the
/// background toward opaque and strengthens the drop shadow.
pub fn render(
    ctx: &egui::Context,
    journal: &Journal,
    active_section: Option<&str>,
    elevated: bool,
    menu_open: &mut bool,
) -> NavbarActions {
    let mut actions = NavbarActions::new();
    let screen = ctx.screen_rect();
    let narrow = screen.width() < COLLAPSE_BELOW;
    if !narrow {
        *menu_open = false;
    }

    let mut links: Vec<Link> = journal
        .sections
        .iter()
        .map(|s| Link {
            label: s.title.clone(),
            target: LinkTarget::Section(s.id.clone()),
            active: active_section == Some(s.id.as_str()),
        })
        .collect();
    links.push(Link {
        label: "Open…".into(),
        target: LinkTarget::OpenDialog,
        active: false,
    });

    egui::Area::new(egui::Id::new("navbar"))
        .order(egui::Order::Middle)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let (bar_rect, bar_resp) = ui.allocate_exact_size(
                vec2(screen.width(), NAVBAR_HEIGHT),
                Sense::hover(),
            );
            actions.hovered = bar_resp.hovered();

            let t = ui
                .ctx()
                .animate_bool_with_time(ui.id().with("elevated"), elevated, 0.3);
            let painter = ui.painter().clone();

            // Translucent white, hardening as the page scrolls under it
            let bg_alpha = egui::lerp(242.0..=250.0, t) as u8;
            painter.rect_filled(
                bar_rect,
                0.0,
                Color32::from_rgba_unmultiplied(255, 255, 255, bg_alpha),
            );
            let shadow_alpha = egui::lerp(12.0..=26.0, t) as u8;
            paint::vertical_gradient(
                &painter,
                Rect::from_min_size(bar_rect.left_bottom(), vec2(bar_rect.width(), 8.0)),
                Color32::from_black_alpha(shadow_alpha),
                Color32::TRANSPARENT,
            );

            // Brand, doubling as a scroll-to-top control
            let title = if journal.title.is_empty() {
                "Travelogue"
            } else {
                journal.title.as_str()
            };
            let brand_galley = painter.layout_no_wrap(
                format!("✈ {title}"),
                FontId::proportional(20.0),
                Color32::PLACEHOLDER,
            );
            let brand_pos = pos2(
                bar_rect.left() + SIDE_PADDING,
                bar_rect.center().y - brand_galley.size().y * 0.5,
            );
            let brand_rect = Rect::from_min_size(brand_pos, brand_galley.size());
            let brand_resp = ui.interact(brand_rect, ui.id().with("brand"), Sense::click());
            let brand_t = ui
                .ctx()
                .animate_bool_with_time(brand_resp.id.with("hover"), brand_resp.hovered(), 0.15);
            painter.galley(
                brand_pos,
                brand_galley,
                theme::INK.lerp_to_gamma(theme::ACCENT, brand_t),
            );
            if brand_resp.clicked() {
                actions.send(ScrollToTopEvent);
            }
            brand_resp.on_hover_cursor(egui::CursorIcon::PointingHand);

            if narrow {
                render_menu_button(ui, bar_rect, menu_open);
                if *menu_open {
                    render_menu_rows(ui, &mut actions, screen.width(), &links, menu_open);
                }
            } else {
                render_inline_links(ui, &mut actions, bar_rect, &links);
            }
        });

    actions
}

fn render_inline_links(
    ui: &mut egui::Ui,
    actions: &mut NavbarActions,
    bar_rect: Rect,
    links: &[Link],
) {
    let painter = ui.painter().clone();
    let font = FontId::proportional(15.0);
    let mut x = bar_rect.right() - SIDE_PADDING;

    for (i, link) in links.iter().enumerate().rev() {
        let galley =
            painter.layout_no_wrap(link.label.clone(), font.clone(), Color32::PLACEHOLDER);
        x -= galley.size().x;
        let pos = pos2(x, bar_rect.center().y - galley.size().y * 0.5);
        let rect = Rect::from_min_size(pos, galley.size());

        let resp = ui.interact(rect, ui.id().with(("nav_link", i)), Sense::click());
        let hover_t = ui
            .ctx()
            .animate_bool_with_time(resp.id.with("hover"), resp.hovered(), 0.15);
        let color = if link.active {
            theme::ACCENT
        } else {
            theme::INK.lerp_to_gamma(theme::ACCENT, hover_t)
        };
        painter.galley(pos, galley, color);
        if link.active {
            painter.rect_filled(
                Rect::from_min_size(pos2(rect.left(), rect.bottom() + 4.0), vec2(rect.width(), 2.0)),
                1.0,
                theme::ACCENT,
            );
        }
        if resp.clicked() {
            send_link(actions, link);
        }
        resp.on_hover_cursor(egui::CursorIcon::PointingHand);

        x -= LINK_GAP;
    }
}

fn render_menu_button(ui: &mut egui::Ui, bar_rect: Rect, menu_open: &mut bool) {
    let size = 40.0;
    let rect = Rect::from_center_size(
        pos2(bar_rect.right() - SIDE_PADDING - size * 0.5 + 8.0, bar_rect.center().y),
        vec2(size, size),
    );
    let resp = ui.interact(rect, ui.id().with("menu_button"), Sense::click());
    let painter = ui.painter();

    let hover_t = ui
        .ctx()
        .animate_bool_with_time(resp.id.with("hover"), resp.hovered(), 0.15);
    if hover_t > 0.0 {
        painter.rect_filled(rect, 8.0, theme::BUTTON_WASH.gamma_multiply(hover_t));
    }

    // Three bars, the reliable cross-platform menu glyph
    let line_w = 20.0;
    for i in 0..3 {
        let y = rect.center().y + (i as f32 - 1.0) * 6.0;
        painter.line_segment(
            [
                pos2(rect.center().x - line_w * 0.5, y),
                pos2(rect.center().x + line_w * 0.5, y),
            ],
            egui::Stroke::new(2.0, theme::INK),
        );
    }

    if resp.clicked() {
        *menu_open = !*menu_open;
    }
    resp.on_hover_cursor(egui::CursorIcon::PointingHand);
}

fn render_menu_rows(
    ui: &mut egui::Ui,
    actions: &mut NavbarActions,
    width: f32,
    links: &[Link],
    menu_open: &mut bool,
) {
    let total = links.len() as f32 * MENU_ROW_HEIGHT + 8.0;
    let (panel_rect, _) = ui.allocate_exact_size(vec2(width, total), Sense::hover());
    let painter = ui.painter().clone();

    painter.rect_filled(
        panel_rect,
        0.0,
        Color32::from_rgba_unmultiplied(255, 255, 255, 250),
    );
    painter.line_segment(
        [panel_rect.left_top(), panel_rect.right_top()],
        egui::Stroke::new(1.0, theme::HAIRLINE),
    );

    let font = FontId::proportional(16.0);
    for (i, link) in links.iter().enumerate() {
        let row = Rect::from_min_size(
            pos2(panel_rect.left(), panel_rect.top() + 4.0 + i as f32 * MENU_ROW_HEIGHT),
            vec2(width, MENU_ROW_HEIGHT),
        );
        let resp = ui.interact(row, ui.id().with(("menu_row", i)), Sense::click());
        if resp.hovered() {
            painter.rect_filled(row, 0.0, theme::BUTTON_WASH);
        }
        let color = if link.active { theme::ACCENT } else { theme::INK };
        painter.text(
            pos2(row.left() + SIDE_PADDING, row.center().y),
            egui::Align2::LEFT_CENTER,
            &link.label,
            font.clone(),
            color,
        );
        if resp.clicked() {
            send_link(actions, link);
            *menu_open = false;
        }
        resp.on_hover_cursor(egui::CursorIcon::PointingHand);
    }
}

fn send_link(actions: &mut NavbarActions, link: &Link) {
    match &link.target {
        LinkTarget::Section(id) => actions.send(ScrollToSectionEvent(id.clone())),
        LinkTarget::OpenDialog => actions.send(ShowOpenDialogEvent),
    }
}
