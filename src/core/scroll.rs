//! Page scroll position and the effects derived from it.
//!
//! The scroll area reports its metrics here once per frame; navbar styling,
//! the reading-progress bar, hero parallax and the back-to-top button are
//! all pure functions of the stored offset. Anchor navigation runs as an
//! exponential glide toward a target offset, cancelled by any wheel input.

/// Scroll depth past which the navbar switches to its elevated style
pub const NAVBAR_SOLID_AT: f32 = 100.0;

/// Scroll depth past which the back-to-top button appears
pub const BACK_TO_TOP_AT: f32 = 500.0;

/// Gap left above an anchored section so the navbar never covers its title
pub const ANCHOR_HEADROOM: f32 = 100.0;

/// Hero content shifts against scroll by this factor
pub const PARALLAX_FACTOR: f32 = -0.5;

/// Exponential glide rate for anchor scrolling, per second
const GLIDE_RATE: f32 = 10.0;

/// Glide is finished when within this distance of the target
const GLIDE_SNAP: f32 = 0.5;

/// Vertical extent of one rendered section, in content coordinates.
#[derive(Debug, Clone)]
pub struct SectionSpan {
    pub id: String,
    pub top: f32,
    pub height: f32,
}

/// Scroll state for the journal page.
#[derive(Debug, Default)]
pub struct PageScroll {
    offset: f32,
    viewport: f32,
    content: f32,
    target: Option<f32>,
    sections: Vec<SectionSpan>,
}

impl PageScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the scroll area's state for this frame.
    pub fn set_metrics(&mut self, offset: f32, viewport: f32, content: f32) {
        self.offset = offset;
        self.viewport = viewport;
        self.content = content;
    }

    /// Record where each section landed in this frame's layout.
    pub fn set_sections(&mut self, sections: Vec<SectionSpan>) {
        self.sections = sections;
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn max_offset(&self) -> f32 {
        (self.content - self.viewport).max(0.0)
    }

    /// True once the reader has scrolled past the hero's upper reaches.
    pub fn navbar_elevated(&self) -> bool {
        self.offset > NAVBAR_SOLID_AT
    }

    /// Reading progress in 0..=1. Zero when the page fits the viewport.
    pub fn progress(&self) -> f32 {
        if self.content <= self.viewport {
            return 0.0;
        }
        (self.offset / (self.content - self.viewport)).clamp(0.0, 1.0)
    }

    /// Vertical shift for hero content, in points. Negative is upward.
    pub fn parallax_shift(&self) -> f32 {
        self.offset * PARALLAX_FACTOR
    }

    pub fn show_back_to_top(&self) -> bool {
        self.offset > BACK_TO_TOP_AT
    }

    /// The section the reader is in, for navbar highlighting. A section is
    /// current from ANCHOR_HEADROOM above its top edge to the same point of
    /// the next; with overlaps the later section wins.
    pub fn active_section(&self) -> Option<&str> {
        let mut current = None;
        for span in &self.sections {
            let top = span.top - ANCHOR_HEADROOM;
            if self.offset >= top && self.offset < top + span.height {
                current = Some(span.id.as_str());
            }
        }
        current
    }

    /// Begin a glide toward `offset`, clamped to the scrollable range.
    pub fn request_scroll_to(&mut self, offset: f32) {
        self.target = Some(offset.clamp(0.0, self.max_offset()));
    }

    /// Glide to a section's anchor position. Unknown ids are ignored.
    pub fn scroll_to_section(&mut self, id: &str) {
        if let Some(span) = self.sections.iter().find(|s| s.id == id) {
            self.request_scroll_to(span.top - ANCHOR_HEADROOM);
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.request_scroll_to(0.0);
    }

    pub fn is_gliding(&self) -> bool {
        self.target.is_some()
    }

    /// Abandon the glide, leaving the offset wherever it is. Called when the
    /// reader scrolls by hand mid-glide.
    pub fn cancel_glide(&mut self) {
        self.target = None;
    }

    /// Move the offset toward the target. Returns true while still gliding.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        // Layout can shrink under a glide; keep the target reachable
        let target = target.clamp(0.0, self.max_offset());
        let step = 1.0 - (-GLIDE_RATE * dt.max(0.0)).exp();
        self.offset += (target - self.offset) * step;
        if (target - self.offset).abs() < GLIDE_SNAP {
            self.offset = target;
            self.target = None;
            return false;
        }
        self.target = Some(target);
        true
    }
}
