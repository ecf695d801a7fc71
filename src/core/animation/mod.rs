//=========================================================================
// Scroll-Driven Animation Engine
//=========================================================================
//
// Owns the three visual behaviours and the primitives that drive them.
//
// Architecture:
//   AnimationEngine
//     ├─ counters: CounterAnimator   (watcher → frame loop per element)
//     ├─ marquee:  MarqueeAnimator   (frame loop per track, hover pause)
//     ├─ reveal:   RevealAnimator    (watcher / timers → one-shot class)
//     ├─ frames:   FrameScheduler<AnimationTask>
//     ├─ timers:   TimerQueue<AnimationTimer>
//     └─ watcher:  IntersectionWatcher<WatchOwner>
//
// Frame order (`on_frame`):
//   1. expired timers   (staggered reveals, deferred reveal setup)
//   2. due frame tasks  (counter and marquee steps)
//   3. watcher reports  (counter triggers, reveals)
//
// The behaviours share no data; each animated element is mutated by
// exactly one of them.
//
//=========================================================================

//=== Module Declarations =================================================

mod counter;
mod marquee;
mod one_shot;
mod reveal;

#[cfg(test)]
mod proptests;

//=== External Dependencies ===============================================

use log::{debug, trace};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::dom::{Document, ElementId, Selector};
use crate::core::observer::IntersectionWatcher;
use crate::core::scheduler::{FrameScheduler, TimerQueue};

//=== Public API ==========================================================

pub use counter::{parse_target, CounterAnimator, TARGET_ATTR};
pub use marquee::{duplicate_content, MarqueeAnimator, MarqueeTrack, DUPLICATED_ATTR};
pub use one_shot::{OneShotSet, TriggerState};
pub use reveal::{reveal_targets, stagger_targets, RevealAnimator, VISIBLE_CLASS};

//=== Task Tokens =========================================================

/// Work scheduled on the frame scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTask {
    Counter(ElementId),
    Marquee(ElementId),
}

/// Work scheduled on the timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTimer {
    StaggerReveal(ElementId),
    SetupReveal,
}

/// Which behaviour a watcher registration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchOwner {
    Counter,
    Reveal,
}

//=== AnimationSettings ===================================================

/// Tunables for the animation engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Counter animation length.
    pub counter_duration_ms: f64,

    /// Visible fraction that starts a counter.
    pub counter_threshold: f64,

    /// Visible fraction that reveals an element.
    pub reveal_threshold: f64,

    /// Marquee speed in pixels per frame.
    pub marquee_speed: f64,

    /// Delay between consecutive product-card reveals at init.
    pub stagger_step_ms: f64,

    /// Delay before scroll-driven reveal starts watching.
    pub reveal_delay_ms: f64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            counter_duration_ms: 1400.0,
            counter_threshold: 0.25,
            reveal_threshold: 0.12,
            marquee_speed: 0.35,
            stagger_step_ms: 60.0,
            reveal_delay_ms: 120.0,
        }
    }
}

//=== AnimationEngine =====================================================

#[derive(Debug)]
pub struct AnimationEngine {
    settings: AnimationSettings,
    counters: CounterAnimator,
    marquee: MarqueeAnimator,
    reveal: RevealAnimator,
    frames: FrameScheduler<AnimationTask>,
    timers: TimerQueue<AnimationTimer>,
    watcher: IntersectionWatcher<WatchOwner>,
}

impl AnimationEngine {
    pub fn new(settings: AnimationSettings) -> Self {
        Self {
            settings,
            counters: CounterAnimator::new(settings.counter_duration_ms, settings.counter_threshold),
            marquee: MarqueeAnimator::new(settings.marquee_speed),
            reveal: RevealAnimator::new(settings.reveal_threshold),
            frames: FrameScheduler::new(),
            timers: TimerQueue::new(),
            watcher: IntersectionWatcher::new(),
        }
    }

    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    //--- Setup ------------------------------------------------------------

    /// Registers every counter label. Returns how many were found.
    pub fn setup_counters(&mut self, doc: &mut Document) -> usize {
        self.counters.setup(doc, &mut self.watcher)
    }

    /// Duplicates and starts the reviews marquee, if present.
    pub fn setup_marquee(&mut self, doc: &mut Document) -> Option<ElementId> {
        self.marquee.setup(
            doc,
            &Selector::class("review-track"),
            &Selector::class("review-card"),
            &mut self.frames,
        )
    }

    /// Starts scroll-driven reveal for all current targets immediately.
    pub fn setup_reveal(&mut self, doc: &Document) -> usize {
        let targets = reveal_targets(doc);
        if targets.is_empty() {
            return 0;
        }
        self.reveal.observe(doc, &targets, &mut self.watcher)
    }

    /// Schedules the staggered product-card reveal and the deferred
    /// reveal setup, relative to `now_ms`.
    pub fn schedule_reveal(&mut self, doc: &Document, now_ms: f64) {
        let step = self.settings.stagger_step_ms;
        for (index, card) in stagger_targets(doc).into_iter().enumerate() {
            self.timers
                .schedule(now_ms, index as f64 * step, AnimationTimer::StaggerReveal(card));
        }
        self.timers
            .schedule(now_ms, self.settings.reveal_delay_ms, AnimationTimer::SetupReveal);
    }

    //--- Input ------------------------------------------------------------

    /// Pauses or resumes marquee tracks as the pointer enters or leaves
    /// them.
    pub fn update_pointer(&mut self, doc: &Document, under_pointer: Option<ElementId>) {
        self.marquee.update_hover(doc, under_pointer, &mut self.frames);
    }

    //--- Frame ------------------------------------------------------------

    /// Runs one paint cycle at `now_ms`.
    pub fn on_frame(&mut self, doc: &mut Document, now_ms: f64) {
        //--- 1. Timers ---------------------------------------------------
        for timer in self.timers.take_expired(now_ms) {
            match timer {
                AnimationTimer::StaggerReveal(card) => {
                    self.reveal.reveal(doc, card);
                }
                AnimationTimer::SetupReveal => {
                    let registered = self.setup_reveal(doc);
                    debug!("Deferred reveal setup registered {} targets", registered);
                }
            }
        }

        //--- 2. Frame tasks ----------------------------------------------
        let due = self.frames.take_due();
        if !due.is_empty() {
            trace!("Frame {:.1}ms: {} tasks", now_ms, due.len());
        }
        for (handle, task) in due {
            match task {
                AnimationTask::Counter(counter) => {
                    self.counters.step(doc, counter, now_ms, &mut self.frames)
                }
                AnimationTask::Marquee(track) => {
                    self.marquee.step(doc, track, handle, &mut self.frames)
                }
            }
        }

        //--- 3. Visibility -----------------------------------------------
        for entry in self.watcher.evaluate(doc) {
            if !entry.is_intersecting {
                continue;
            }
            match entry.owner {
                WatchOwner::Counter => self.counters.on_visible(
                    doc,
                    entry.element,
                    &mut self.watcher,
                    &mut self.frames,
                ),
                WatchOwner::Reveal => {
                    self.reveal.on_visible(doc, entry.element, &mut self.watcher);
                }
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn counters(&self) -> &CounterAnimator {
        &self.counters
    }

    pub fn marquee(&self) -> &MarqueeAnimator {
        &self.marquee
    }

    pub fn reveal(&self) -> &RevealAnimator {
        &self.reveal
    }

    pub fn watcher(&self) -> &IntersectionWatcher<WatchOwner> {
        &self.watcher
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.pending()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

impl Default for AnimationEngine {
    fn default() -> Self {
        Self::new(AnimationSettings::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
