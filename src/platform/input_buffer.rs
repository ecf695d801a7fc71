//=========================================================================
// Input Buffer
//
// Collects page inputs between two frames into two categories: discrete
// and continuous. Acts as a transient aggregator between the Platform and
// the core thread.
//
// Responsibilities:
// - Keep every discrete input (clicks, keys, text) in arrival order
// - Coalesce continuous inputs (pointer position, viewport size)
// - Accumulate wheel deltas into a single scroll
// - Hand the frame's inputs over via `drain()`
//
// Notes:
// Repeated discrete inputs are kept: a held Backspace or a doubled letter
// must reach the page once per occurrence. The core applies continuous
// inputs after discrete ones, so a pending resize and scroll are moved
// into the discrete stream ahead of each discrete input; a click is then
// resolved against the viewport it was made in. A `PointerLeft` drops
// any pending pointer position for the same reason.
//=========================================================================

//=== Standard Library Imports ============================================
use std::collections::HashSet;

//=== Internal Modules ====================================================
use crate::core::input::PageInput;

//=== InputBuffer Struct ==================================================
//
// Transient store for one frame of input.
//
// Internally maintains:
// - `discrete`: one-shot inputs in order
// - `continuous`: last-known value per continuous kind
// - `scroll_dy`: summed wheel delta
//
pub struct InputBuffer {
    discrete: Vec<PageInput>,
    continuous: HashSet<PageInput>,
    scroll_dy: f64,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    pub fn new() -> Self {
        const DISCRETE_BASE: usize = 32;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
            scroll_dy: 0.0,
        }
    }

    //--- Event Handling ---------------------------------------------------
    //
    // Routes an input to the matching store.
    //
    pub fn push(&mut self, input: PageInput) {
        match input {
            PageInput::Scroll { dy } => self.scroll_dy += dy,
            PageInput::PointerLeft => {
                self.continuous.retain(|c| !matches!(c, PageInput::PointerMoved { .. }));
                self.push_discrete(input);
            }
            input if input.is_continuous() => {
                self.continuous.replace(input);
            }
            input => self.push_discrete(input),
        }
    }

    /// Settles the pending viewport, then queues `input` behind it.
    fn push_discrete(&mut self, input: PageInput) {
        let resize_kind = PageInput::Resized {
            width: 0.0,
            height: 0.0,
        };
        if let Some(resized) = self.continuous.take(&resize_kind) {
            self.discrete.push(resized);
        }
        if self.scroll_dy != 0.0 {
            self.discrete.push(PageInput::Scroll { dy: self.scroll_dy });
            self.scroll_dy = 0.0;
        }
        self.discrete.push(input);
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns the frame's (discrete, continuous) inputs and clears the
    // buffer, or `None` if nothing was collected. Continuous inputs are
    // ordered resize, scroll, pointer so the pointer is resolved against
    // the final viewport.
    //
    pub fn drain(&mut self) -> Option<(Vec<PageInput>, Vec<PageInput>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = std::mem::take(&mut self.discrete);
        let mut continuous: Vec<PageInput> = self.continuous.drain().collect();
        if self.scroll_dy != 0.0 {
            continuous.push(PageInput::Scroll { dy: self.scroll_dy });
            self.scroll_dy = 0.0;
        }
        continuous.sort_by_key(apply_order);

        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------
    pub fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len() + usize::from(self.scroll_dy != 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn apply_order(input: &PageInput) -> u8 {
    match input {
        PageInput::Resized { .. } => 0,
        PageInput::Scroll { .. } => 1,
        _ => 2,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
