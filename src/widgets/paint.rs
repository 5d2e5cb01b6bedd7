//! Shared painting helpers for the page widgets.

use egui::{Color32, Mesh, Painter, Pos2, Rect, Vec2, pos2, vec2};

use crate::theme;

/// Fill `rect` with a top-to-bottom gradient.
pub fn vertical_gradient(painter: &Painter, rect: Rect, top: Color32, bottom: Color32) {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), top);
    mesh.colored_vertex(rect.right_top(), top);
    mesh.colored_vertex(rect.left_bottom(), bottom);
    mesh.colored_vertex(rect.right_bottom(), bottom);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(2, 1, 3);
    painter.add(mesh);
}

/// Fill `rect` with a left-to-right gradient.
pub fn horizontal_gradient(painter: &Painter, rect: Rect, left: Color32, right: Color32) {
    let mut mesh = Mesh::default();
    mesh.colored_vertex(rect.left_top(), left);
    mesh.colored_vertex(rect.right_top(), right);
    mesh.colored_vertex(rect.left_bottom(), left);
    mesh.colored_vertex(rect.right_bottom(), right);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(2, 1, 3);
    painter.add(mesh);
}

/// UV sub-rectangle that crops an image to fill a frame, keeping aspect
/// ratio and trimming the overflow evenly on both sides.
pub fn cover_uv(image_size: Vec2, frame_size: Vec2) -> Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 || frame_size.x <= 0.0 || frame_size.y <= 0.0 {
        return Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    }
    let scale = (frame_size.x / image_size.x).max(frame_size.y / image_size.y);
    let visible = frame_size / scale;
    let margin = (image_size - visible) * 0.5;
    Rect::from_min_max(
        pos2(margin.x / image_size.x, margin.y / image_size.y),
        pos2(
            (margin.x + visible.x) / image_size.x,
            (margin.y + visible.y) / image_size.y,
        ),
    )
}

/// Largest rect of the image's aspect ratio that fits inside `frame`,
/// centered. Letterboxes instead of cropping.
pub fn contain_rect(image_size: Vec2, frame: Rect) -> Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return frame;
    }
    let scale = (frame.width() / image_size.x).min(frame.height() / image_size.y);
    let size = image_size * scale;
    Rect::from_center_size(frame.center(), size)
}

/// Soft gradient block with a dimmed camera glyph, standing in for images
/// that are missing or still decoding. `alpha` fades the whole block.
pub fn placeholder_art(painter: &Painter, rect: Rect, glyph_size: f32, alpha: f32) {
    vertical_gradient(
        painter,
        rect,
        theme::PLACEHOLDER_TOP.gamma_multiply(alpha),
        theme::PLACEHOLDER_BOTTOM.gamma_multiply(alpha),
    );
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "📷",
        egui::FontId::proportional(glyph_size),
        theme::INK.gamma_multiply(0.4 * alpha),
    );
}

/// Centered single-line text, returning the rect it occupied.
pub fn centered_text(
    painter: &Painter,
    center: Pos2,
    text: &str,
    font: egui::FontId,
    color: Color32,
) -> Rect {
    let galley = painter.layout_no_wrap(text.to_owned(), font, color);
    let pos = center - galley.size() * 0.5;
    let rect = Rect::from_min_size(pos, galley.size());
    painter.galley(rect.min, galley, color);
    rect
}
