//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into page inputs.
//
// Architecture:
//   Winit Events → InputProcessor → PageInput → InputBuffer
//
// Stateful tracking: caches the scale factor (physical → logical pixels)
// and the last cursor position, since Winit reports clicks without a
// position. Keys without page meaning are filtered (returns None); typed
// characters come through as text with control characters stripped.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, MouseScrollDelta},
    keyboard::{Key as WinitKey, NamedKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{Key, PageInput};

//=== InputProcessor ======================================================

/// Pixels scrolled per wheel line.
pub(crate) const LINE_HEIGHT: f64 = 40.0;

/// Converts Winit events to page inputs in logical pixels.
pub(crate) struct InputProcessor {
    scale_factor: f64,
    cursor: Option<(f64, f64)>,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            scale_factor: 1.0,
            cursor: None,
        }
    }

    //--- Scale Factor -----------------------------------------------------

    pub(crate) fn update_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    //--- Event Processing -------------------------------------------------

    /// Records the cursor and produces a pointer move.
    pub(crate) fn process_cursor_moved(&mut self, position: PhysicalPosition<f64>) -> PageInput {
        let logical = position.to_logical::<f64>(self.scale_factor);
        self.cursor = Some((logical.x, logical.y));
        PageInput::PointerMoved {
            x: logical.x,
            y: logical.y,
        }
    }

    pub(crate) fn process_cursor_left(&mut self) -> PageInput {
        self.cursor = None;
        PageInput::PointerLeft
    }

    /// Left button presses become clicks at the last cursor position.
    pub(crate) fn process_mouse_button(
        &self,
        button: MouseButton,
        state: ElementState,
    ) -> Option<PageInput> {
        if button != MouseButton::Left || state != ElementState::Pressed {
            return None;
        }
        let (x, y) = self.cursor?;
        Some(PageInput::Click { x, y })
    }

    /// Wheel deltas become page scrolls (positive scrolls down).
    pub(crate) fn process_wheel(&self, delta: MouseScrollDelta) -> Option<PageInput> {
        let dy = match delta {
            MouseScrollDelta::LineDelta(_, lines) => -f64::from(lines) * LINE_HEIGHT,
            MouseScrollDelta::PixelDelta(pixels) => -pixels.y / self.scale_factor,
        };
        (dy != 0.0).then_some(PageInput::Scroll { dy })
    }

    pub(crate) fn process_resize(&self, size: PhysicalSize<u32>) -> PageInput {
        let logical = size.to_logical::<f64>(self.scale_factor);
        PageInput::Resized {
            width: logical.width,
            height: logical.height,
        }
    }

    /// Converts a key press to a named key or typed text.
    pub(crate) fn process_key(
        &self,
        key: &WinitKey,
        state: ElementState,
        text: Option<&str>,
    ) -> Option<PageInput> {
        if state != ElementState::Pressed {
            return None;
        }

        if let WinitKey::Named(named) = key {
            if let Some(key) = named_key(*named) {
                return Some(PageInput::Key(key));
            }
        }

        let printable: String = text?.chars().filter(|c| !c.is_control()).collect();
        (!printable.is_empty()).then_some(PageInput::Text(printable))
    }
}

fn named_key(key: NamedKey) -> Option<Key> {
    match key {
        NamedKey::Enter => Some(Key::Enter),
        NamedKey::Escape => Some(Key::Escape),
        NamedKey::Backspace => Some(Key::Backspace),
        NamedKey::Tab => Some(Key::Tab),
        _ => None,
    }
}

//=========================================================================
// Tests
//=========================================================================
