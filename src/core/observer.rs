//=========================================================================
// Intersection Watcher
//=========================================================================
//
// Reports when an element's visible-area fraction crosses a threshold.
//
// Architecture:
//   observe(element, threshold, owner)
//        ↓
//   evaluate(doc) ── per registration: visible area / element area
//        ↓
//   IntersectionEntry (only when the intersecting state changed)
//
// The first evaluation after `observe` always reports, so an element that
// is already on screen triggers without any scrolling.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::dom::{Document, ElementId};

//=== IntersectionEntry ===================================================

/// Visibility change reported to a registration's owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry<O> {
    pub element: ElementId,
    pub owner: O,
    pub ratio: f64,
    pub is_intersecting: bool,
}

//=== IntersectionWatcher =================================================

#[derive(Debug)]
struct Registration<O> {
    element: ElementId,
    threshold: f64,
    owner: O,
    last_reported: Option<bool>,
}

/// Threshold watcher over a [`Document`]'s laid-out boxes.
///
/// `O` identifies which subsystem a registration belongs to, so several
/// subsystems can watch the same element with different thresholds.
#[derive(Debug)]
pub struct IntersectionWatcher<O> {
    registrations: Vec<Registration<O>>,
}

impl<O: Copy + PartialEq + Debug> IntersectionWatcher<O> {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Starts watching `element` for `owner`. Registering the same pair
    /// twice is a no-op.
    pub fn observe(&mut self, element: ElementId, threshold: f64, owner: O) {
        if self.is_observing(element, owner) {
            return;
        }
        self.registrations.push(Registration {
            element,
            threshold: threshold.clamp(0.0, 1.0),
            owner,
            last_reported: None,
        });
    }

    /// Stops watching `element` for `owner`. Returns true if a
    /// registration was removed.
    pub fn unobserve(&mut self, element: ElementId, owner: O) -> bool {
        let before = self.registrations.len();
        self.registrations
            .retain(|r| !(r.element == element && r.owner == owner));
        before != self.registrations.len()
    }

    pub fn is_observing(&self, element: ElementId, owner: O) -> bool {
        self.registrations
            .iter()
            .any(|r| r.element == element && r.owner == owner)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    //--- Evaluation -------------------------------------------------------

    /// Computes visibility for every registration and returns the entries
    /// whose intersecting state changed since the last report.
    ///
    /// Registrations for detached elements are dropped.
    pub fn evaluate(&mut self, doc: &mut Document) -> Vec<IntersectionEntry<O>> {
        doc.ensure_layout();

        self.registrations.retain(|r| {
            let live = doc.is_attached(r.element);
            if !live {
                debug!("Dropping watch on detached element {:?} ({:?})", r.element, r.owner);
            }
            live
        });

        let mut entries = Vec::new();
        for registration in &mut self.registrations {
            let ratio = visible_ratio(doc, registration.element);
            let is_intersecting = ratio > 0.0 && ratio >= registration.threshold;

            if registration.last_reported != Some(is_intersecting) {
                registration.last_reported = Some(is_intersecting);
                entries.push(IntersectionEntry {
                    element: registration.element,
                    owner: registration.owner,
                    ratio,
                    is_intersecting,
                });
            }
        }
        entries
    }
}

impl<O: Copy + PartialEq + Debug> Default for IntersectionWatcher<O> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Geometry ============================================================

/// Fraction of the element's box visible in the viewport after clipping.
///
/// Callers must run layout first.
pub fn visible_ratio(doc: &Document, element: ElementId) -> f64 {
    let Some(el) = doc.element(element) else {
        return 0.0;
    };

    let rect = el.rect();
    let area = rect.area();
    if area <= 0.0 {
        return 0.0;
    }

    let visible = rect
        .intersect(&el.clip())
        .and_then(|r| r.intersect(&doc.viewport().rect()));

    match visible {
        Some(v) => (v.area() / area).clamp(0.0, 1.0),
        None => 0.0,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
