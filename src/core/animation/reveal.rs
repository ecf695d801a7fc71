//=========================================================================
// Reveal-on-Visibility
//=========================================================================
//
// Marks elements `visible` the first time enough of them is on screen.
//
// Two paths share one one-shot flag per element:
//   - scroll path: watcher report ≥ threshold → reveal + unobserve
//   - stagger path: product cards revealed at init, index × step ms
//
// Whichever path fires first wins; the other becomes a no-op.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::one_shot::OneShotSet;
use super::WatchOwner;
use crate::core::dom::{Document, ElementId, Selector};
use crate::core::observer::IntersectionWatcher;

//=== Constants ===========================================================

/// Class applied to revealed elements.
pub const VISIBLE_CLASS: &str = "visible";

//=== Targets =============================================================

/// Elements the reveal behaviour applies to: product cards, review cards
/// (including marquee copies) and the hero section, in that order.
pub fn reveal_targets(doc: &Document) -> Vec<ElementId> {
    let mut targets = doc.query_all(&Selector::class("product-card"));
    targets.extend(doc.query_all(&Selector::class("review-card")));
    if let Some(hero) = doc.by_id("hero") {
        targets.push(hero);
    }
    targets
}

/// Product cards in document order, the targets of the staggered path.
pub fn stagger_targets(doc: &Document) -> Vec<ElementId> {
    doc.query_all(&Selector::class("product-card"))
}

//=== RevealAnimator ======================================================

#[derive(Debug)]
pub struct RevealAnimator {
    threshold: f64,
    triggers: OneShotSet,
}

impl RevealAnimator {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            triggers: OneShotSet::new(),
        }
    }

    /// Starts watching every target that has not been revealed yet.
    ///
    /// Returns the number of new registrations.
    pub fn observe(
        &mut self,
        doc: &Document,
        targets: &[ElementId],
        watcher: &mut IntersectionWatcher<WatchOwner>,
    ) -> usize {
        let mut registered = 0;
        for &target in targets {
            if !doc.is_attached(target) || self.triggers.is_triggered(target) {
                continue;
            }
            self.triggers.register(target);
            watcher.observe(target, self.threshold, WatchOwner::Reveal);
            registered += 1;
        }
        debug!("Reveal watching {} of {} targets", registered, targets.len());
        registered
    }

    /// Handles a visibility report: reveal once, then stop watching.
    pub fn on_visible(
        &mut self,
        doc: &mut Document,
        target: ElementId,
        watcher: &mut IntersectionWatcher<WatchOwner>,
    ) -> bool {
        watcher.unobserve(target, WatchOwner::Reveal);
        self.reveal(doc, target)
    }

    /// Applies the visible flag. Returns true only the first time.
    pub fn reveal(&mut self, doc: &mut Document, target: ElementId) -> bool {
        if !doc.is_attached(target) {
            debug!("Reveal target {:?} detached, skipping", target);
            return false;
        }
        if !self.triggers.trigger(target) {
            return false;
        }
        if let Some(el) = doc.element_mut(target) {
            el.add_class(VISIBLE_CLASS);
        }
        true
    }

    pub fn is_revealed(&self, target: ElementId) -> bool {
        self.triggers.is_triggered(target)
    }

    pub fn revealed_count(&self) -> usize {
        self.triggers.triggered_count()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
