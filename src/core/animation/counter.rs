//=========================================================================
// Visibility Counter Animator
//=========================================================================
//
// Drives numeric labels from 0 to their `data-target` value the first
// time each label becomes visible.
//
// Lifecycle per element:
//   setup()      → text "0", registered with the watcher
//   on_visible() → one-shot trigger, unobserved immediately
//   step()       → one frame: floor(progress × target), progress by time
//   final frame  → text = target exactly, run removed
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::one_shot::OneShotSet;
use super::{AnimationTask, WatchOwner};
use crate::core::dom::{Document, ElementId, Selector};
use crate::core::observer::IntersectionWatcher;
use crate::core::scheduler::FrameScheduler;

//=== Constants ===========================================================

/// Attribute holding a counter's final value.
pub const TARGET_ATTR: &str = "data-target";

//=== Target Parsing ======================================================

/// Parses a counter target.
///
/// Non-numeric, non-finite and non-positive values become 0; fractional
/// values truncate toward zero.
pub fn parse_target(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else { return 0 };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v.trunc() as u64,
        _ => 0,
    }
}

//=== CounterRun ==========================================================

#[derive(Debug, Clone, Copy)]
struct CounterRun {
    target: u64,
    start_ms: Option<f64>,
    shown: u64,
}

//=== CounterAnimator =====================================================

#[derive(Debug)]
pub struct CounterAnimator {
    duration_ms: f64,
    threshold: f64,
    triggers: OneShotSet,
    runs: HashMap<ElementId, CounterRun>,
}

impl CounterAnimator {
    pub fn new(duration_ms: f64, threshold: f64) -> Self {
        Self {
            duration_ms,
            threshold,
            triggers: OneShotSet::new(),
            runs: HashMap::new(),
        }
    }

    //--- Setup ------------------------------------------------------------

    /// Resets every `[data-target]` label to "0" and starts watching it.
    ///
    /// Returns the number of counters found (0 means nothing to do).
    pub fn setup(&mut self, doc: &mut Document, watcher: &mut IntersectionWatcher<WatchOwner>) -> usize {
        let counters = doc.query_all(&Selector::attr(TARGET_ATTR));
        if counters.is_empty() {
            return 0;
        }

        for &counter in &counters {
            if let Some(el) = doc.element_mut(counter) {
                el.set_text("0");
            }
            if self.triggers.register(counter) {
                watcher.observe(counter, self.threshold, WatchOwner::Counter);
            }
        }

        debug!("Counters registered: {}", counters.len());
        counters.len()
    }

    /// Handles a visibility report for a counter label.
    pub fn on_visible(
        &mut self,
        doc: &mut Document,
        counter: ElementId,
        watcher: &mut IntersectionWatcher<WatchOwner>,
        frames: &mut FrameScheduler<AnimationTask>,
    ) {
        if !self.triggers.trigger(counter) {
            return;
        }

        // Unobserve on trigger, not on completion, so it cannot re-fire
        watcher.unobserve(counter, WatchOwner::Counter);

        let target = parse_target(doc.element(counter).and_then(|e| e.attr(TARGET_ATTR)));
        self.animate(doc, counter, target, frames);
    }

    /// Starts animating `counter` toward `target`.
    ///
    /// A zero target is written immediately and schedules no frames.
    pub fn animate(
        &mut self,
        doc: &mut Document,
        counter: ElementId,
        target: u64,
        frames: &mut FrameScheduler<AnimationTask>,
    ) {
        if target == 0 {
            if let Some(el) = doc.element_mut(counter) {
                el.set_text("0");
            }
            return;
        }

        debug!("Counter {:?} animating to {}", counter, target);
        self.runs.insert(
            counter,
            CounterRun {
                target,
                start_ms: None,
                shown: 0,
            },
        );
        frames.request(AnimationTask::Counter(counter));
    }

    //--- Frame Step -------------------------------------------------------

    /// Advances one counter by one frame at timestamp `now_ms`.
    pub fn step(
        &mut self,
        doc: &mut Document,
        counter: ElementId,
        now_ms: f64,
        frames: &mut FrameScheduler<AnimationTask>,
    ) {
        let Some(run) = self.runs.get_mut(&counter) else {
            return;
        };

        if !doc.is_attached(counter) {
            debug!("Counter {:?} detached mid-animation, stopping", counter);
            self.runs.remove(&counter);
            return;
        }

        let start = *run.start_ms.get_or_insert(now_ms);
        let progress = if self.duration_ms > 0.0 {
            ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };

        if progress < 1.0 {
            let value = ((progress * run.target as f64).floor() as u64)
                .min(run.target)
                .max(run.shown);
            run.shown = value;

            trace!("Counter {:?}: {} ({:.3})", counter, value, progress);
            if let Some(el) = doc.element_mut(counter) {
                el.set_text(value.to_string());
            }
            frames.request(AnimationTask::Counter(counter));
        } else {
            let target = run.target;
            self.runs.remove(&counter);

            debug!("Counter {:?} finished at {}", counter, target);
            if let Some(el) = doc.element_mut(counter) {
                el.set_text(target.to_string());
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_animating(&self, counter: ElementId) -> bool {
        self.runs.contains_key(&counter)
    }

    pub fn has_triggered(&self, counter: ElementId) -> bool {
        self.triggers.is_triggered(counter)
    }

    pub fn active(&self) -> usize {
        self.runs.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
