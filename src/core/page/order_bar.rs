//=========================================================================
// Order Bar
//=========================================================================
//
// Sticky order call-to-action that stays out of the way near the top of
// the page: `#orderBar` carries `hidden` while the scroll offset is below
// the threshold.
//
//=========================================================================

use log::trace;

use crate::core::dom::Document;

pub const BAR_ID: &str = "orderBar";
pub const ORDER_NOW_ID: &str = "orderNow";
pub const HIDDEN_CLASS: &str = "hidden";

/// Message sent by the order bar button.
pub const ORDER_NOW_MESSAGE: &str = "Hi — I want to place an order";

#[derive(Debug, Clone, Copy)]
pub struct OrderBar {
    threshold: f64,
}

impl OrderBar {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Re-evaluates visibility for the current scroll offset. Returns
    /// whether the bar is now hidden, or `None` if the page has no bar.
    pub fn update(&self, doc: &mut Document) -> Option<bool> {
        let hidden = doc.viewport().scroll_y < self.threshold;
        let bar = doc.by_id(BAR_ID)?;
        let el = doc.element_mut(bar)?;

        let changed = if hidden {
            el.add_class(HIDDEN_CLASS)
        } else {
            el.remove_class(HIDDEN_CLASS)
        };
        if changed {
            trace!("Order bar hidden: {}", hidden);
        }
        Some(hidden)
    }
}
