//=========================================================================
// Page Input Events
//
// Portable representation of the inputs the storefront page reacts to.
//
// This module abstracts platform input (e.g. Winit) into a small,
// page-level vocabulary: pointer position and clicks, wheel scrolling,
// a handful of named keys, typed text and viewport resizes.
//
// Coordinates:
//   All positions are logical pixels relative to the viewport's top-left
//   corner. The page adds its scroll offset to reach page coordinates.
//
// Coalescing:
// ```text
// PointerMoved{..} == PointerMoved{..}   ✓ (last position wins)
// Resized{..}      == Resized{..}        ✓ (last size wins)
// Click{a}         == Click{b}           only if a == b
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== Key =================================================================

/// Named keys with page-level meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Submits the contact form when a form field has focus.
    Enter,

    /// Closes the detail modal.
    Escape,

    /// Deletes the last character of the focused field.
    Backspace,

    /// Moves focus to the next contact form field.
    Tab,
}

//=== PageInput ===========================================================

/// Input event delivered to the page core.
///
/// Discrete events (clicks, keys, text) are order-significant. Continuous
/// events (pointer moves, resizes) are coalesced per frame by the
/// platform layer; wheel deltas are accumulated into one `Scroll`.
#[derive(Debug, Clone)]
pub enum PageInput {
    /// Pointer moved to a viewport position.
    PointerMoved { x: f64, y: f64 },

    /// Pointer left the window.
    PointerLeft,

    /// Primary button pressed at a viewport position.
    Click { x: f64, y: f64 },

    /// Vertical scroll by `dy` pixels (positive scrolls down).
    Scroll { dy: f64 },

    /// Named key pressed.
    Key(Key),

    /// Printable text typed.
    Text(String),

    /// Viewport resized (logical pixels).
    Resized { width: f64, height: f64 },
}

impl PageInput {
    /// Returns true for events that only carry the latest state.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::PointerMoved { .. } | Self::Resized { .. })
    }
}

//--- Trait Implementations -----------------------------------------------

/// Equality for coalescing. Continuous variants compare by kind only.
impl PartialEq for PageInput {
    fn eq(&self, other: &Self) -> bool {
        use PageInput::*;
        match (self, other) {
            (PointerMoved { .. }, PointerMoved { .. }) => true,
            (Resized { .. }, Resized { .. }) => true,
            (PointerLeft, PointerLeft) => true,
            (Click { x: ax, y: ay }, Click { x: bx, y: by }) => ax == bx && ay == by,
            (Scroll { dy: a }, Scroll { dy: b }) => a == b,
            (Key(a), Key(b)) => a == b,
            (Text(a), Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for PageInput {}

/// Hash consistent with equality: coordinates are hashed by bit pattern
/// for discrete variants, ignored for continuous ones.
impl Hash for PageInput {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::Click { x, y } => {
                x.to_bits().hash(state);
                y.to_bits().hash(state);
            }
            Self::Scroll { dy } => dy.to_bits().hash(state),
            Self::Key(key) => key.hash(state),
            Self::Text(text) => text.hash(state),
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
