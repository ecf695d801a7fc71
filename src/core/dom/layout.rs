//=========================================================================
// Layout
//=========================================================================
//
// Minimal flow layout for the page document.
//
// Architecture:
//   Document (dirty) → layout() → Element::rect / clip / scroll_width
//
// Flow rules:
//   Block   → children stacked vertically, width fills parent
//   Row     → children placed left to right,
//             scroll_width = total children width
//   Overlay → out of flow, covers the viewport (fixed position)
//   None    → not rendered, subtree gets empty boxes
//
// Horizontal translation (`translate_x`) shifts an element and its whole
// subtree without affecting its siblings. Elements flagged with
// `clips_overflow` clip their descendants horizontally to their own box.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::document::Document;
use super::element::ElementId;

//=== Rect ================================================================

/// Axis-aligned box in page coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Unbounded rect, used as the clip of unclipped elements.
    pub const UNBOUNDED: Rect = Rect {
        x: -1.0e12,
        y: -1.0e12,
        width: 2.0e12,
        height: 2.0e12,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Returns true if the point lies inside the box (right/bottom edges excluded).
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Overlapping region of two boxes, `None` if they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right > x && bottom > y {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

//=== Flow ================================================================

/// How an element places its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Block,
    Row,
    Overlay,
    None,
}

//=== Size ================================================================

/// Intrinsic size of an element.
///
/// A zero width means "fill the available width". The laid-out height is
/// the larger of the intrinsic height and the content height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

//=== Viewport ============================================================

/// Visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    /// Visible region in page coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

//=== Layout Pass =========================================================

/// Recomputes boxes for the whole attached tree.
pub(crate) fn layout(doc: &mut Document) {
    let viewport = doc.viewport();
    let root = doc.root();

    let mut overlays = Vec::new();
    layout_box(doc, root, 0.0, 0.0, viewport.width, Rect::UNBOUNDED, &mut overlays);

    // Overlays are fixed to the viewport and painted above the flow
    let screen = viewport.rect();
    for overlay in overlays {
        let translate = doc.element(overlay).map(|e| e.translate_x()).unwrap_or(0.0);
        let children = doc.children_of(overlay);

        let mut cursor_y = screen.y;
        for child in children {
            let mut nested = Vec::new();
            let h = layout_box(
                doc,
                child,
                screen.x + translate,
                cursor_y,
                screen.width,
                screen,
                &mut nested,
            );
            cursor_y += h;
        }

        if let Some(el) = doc.element_mut(overlay) {
            el.rect = Rect::new(screen.x + translate, screen.y, screen.width, screen.height);
            el.clip = Rect::UNBOUNDED;
            el.scroll_width = screen.width;
        }
    }
}

/// Lays out one element at (x, y) and returns the height it occupies in
/// its parent's flow.
fn layout_box(
    doc: &mut Document,
    id: ElementId,
    x: f64,
    y: f64,
    available_width: f64,
    clip: Rect,
    overlays: &mut Vec<ElementId>,
) -> f64 {
    let Some(el) = doc.element(id) else {
        return 0.0;
    };

    let flow = el.flow();
    let intrinsic = el.intrinsic_size();
    let clips = el.clips_overflow();
    let x = x + el.translate_x();
    let children = el.children().to_vec();

    match flow {
        Flow::None => {
            collapse(doc, id);
            0.0
        }

        Flow::Overlay => {
            overlays.push(id);
            0.0
        }

        Flow::Block => {
            let width = if intrinsic.width > 0.0 { intrinsic.width } else { available_width };
            let inner_clip = clip_for(clips, clip, x, width);

            let mut cursor_y = y;
            for child in children {
                cursor_y += layout_box(doc, child, x, cursor_y, width, inner_clip, overlays);
            }

            let height = intrinsic.height.max(cursor_y - y);
            if let Some(el) = doc.element_mut(id) {
                el.rect = Rect::new(x, y, width, height);
                el.clip = clip;
                el.scroll_width = width;
            }
            height
        }

        Flow::Row => {
            let width = if intrinsic.width > 0.0 { intrinsic.width } else { available_width };
            let inner_clip = clip_for(clips, clip, x, width);

            let mut cursor_x = x;
            let mut max_height: f64 = 0.0;
            for child in children {
                let child_width = doc
                    .element(child)
                    .map(|c| c.intrinsic_size().width)
                    .unwrap_or(0.0);
                let h = layout_box(doc, child, cursor_x, y, child_width, inner_clip, overlays);
                max_height = max_height.max(h);

                if doc.element(child).map(|c| c.flow() != Flow::None).unwrap_or(false) {
                    cursor_x += child_width;
                }
            }

            let height = intrinsic.height.max(max_height);
            if let Some(el) = doc.element_mut(id) {
                el.rect = Rect::new(x, y, width, height);
                el.clip = clip;
                el.scroll_width = cursor_x - x;
            }
            height
        }
    }
}

/// Narrows the inherited clip to the element's horizontal extent.
fn clip_for(clips: bool, clip: Rect, x: f64, width: f64) -> Rect {
    if !clips {
        return clip;
    }
    clip.intersect(&Rect::new(x, Rect::UNBOUNDED.y, width, Rect::UNBOUNDED.height))
        .unwrap_or_default()
}

/// Empties the boxes of a subtree that is not rendered.
fn collapse(doc: &mut Document, id: ElementId) {
    let children = doc.children_of(id);
    if let Some(el) = doc.element_mut(id) {
        el.rect = Rect::default();
        el.clip = Rect::default();
        el.scroll_width = 0.0;
    }
    for child in children {
        collapse(doc, child);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
