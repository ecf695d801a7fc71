//=========================================================================
// Infinite Marquee
//=========================================================================
//
// Continuously translates a duplicated content track to the left.
//
// Architecture:
//   setup() ── duplicate children once (data-duplicated marker)
//           └─ request first frame
//   step()  ── offset += speed; wrap at scroll_width / 2;
//              translateX(-round(offset)px); request next frame
//   pause() ── cancel the outstanding frame (offset kept)
//   resume()── request a frame only if none is outstanding
//
// The second half of the track is an exact copy of the first, so
// wrapping from half-width back to zero is visually seamless.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::AnimationTask;
use crate::core::dom::{Document, ElementId, Selector};
use crate::core::scheduler::{FrameHandle, FrameScheduler};

//=== Constants ===========================================================

/// Persistent marker set on a track once its content has been duplicated.
pub const DUPLICATED_ATTR: &str = "data-duplicated";

//=== Duplication =========================================================

/// Appends a deep copy of every child of `track` to itself, once.
///
/// Returns false (and changes nothing) if the track already carries the
/// duplication marker.
pub fn duplicate_content(doc: &mut Document, track: ElementId) -> bool {
    let already = doc
        .element(track)
        .map(|e| e.has_attr(DUPLICATED_ATTR))
        .unwrap_or(true);
    if already {
        return false;
    }

    let originals = doc.element(track).map(|e| e.children().to_vec()).unwrap_or_default();
    for child in originals {
        if let Some(copy) = doc.clone_subtree(child) {
            doc.append_child(track, copy);
        }
    }

    if let Some(el) = doc.element_mut(track) {
        el.set_attr(DUPLICATED_ATTR, "true");
    }
    true
}

//=== MarqueeTrack ========================================================

/// Running state of one marquee track.
#[derive(Debug, Clone, Copy)]
pub struct MarqueeTrack {
    pub element: ElementId,
    offset: f64,
    handle: Option<FrameHandle>,
    hovered: bool,
}

impl MarqueeTrack {
    /// Current horizontal offset in pixels (unrounded).
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Returns true if a frame step is outstanding.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

//=== MarqueeAnimator =====================================================

#[derive(Debug)]
pub struct MarqueeAnimator {
    speed: f64,
    tracks: Vec<MarqueeTrack>,
}

impl MarqueeAnimator {
    /// Creates an animator moving `speed` pixels per frame.
    pub fn new(speed: f64) -> Self {
        Self {
            speed,
            tracks: Vec::new(),
        }
    }

    //--- Setup ------------------------------------------------------------

    /// Locates the track, duplicates its content and starts its loop.
    ///
    /// Returns `None` if the track or its items are missing. Calling this
    /// again for a running track neither duplicates nor starts a second
    /// loop.
    pub fn setup(
        &mut self,
        doc: &mut Document,
        track_selector: &Selector,
        item_selector: &Selector,
        frames: &mut FrameScheduler<AnimationTask>,
    ) -> Option<ElementId> {
        let track = doc.query(track_selector)?;
        if doc.query_all_in(track, item_selector).is_empty() {
            return None;
        }

        if duplicate_content(doc, track) {
            debug!("Marquee {:?} content duplicated", track);
        }

        if self.track(track).is_some() {
            return Some(track);
        }

        let handle = frames.request(AnimationTask::Marquee(track));
        self.tracks.push(MarqueeTrack {
            element: track,
            offset: 0.0,
            handle: Some(handle),
            hovered: false,
        });
        debug!("Marquee {:?} started ({} px/frame)", track, self.speed);
        Some(track)
    }

    //--- Frame Step -------------------------------------------------------

    /// Advances one track by one frame.
    pub fn step(
        &mut self,
        doc: &mut Document,
        track: ElementId,
        handle: FrameHandle,
        frames: &mut FrameScheduler<AnimationTask>,
    ) {
        let speed = self.speed;
        let Some(index) = self.tracks.iter().position(|t| t.element == track) else {
            return;
        };

        // Stale callback (cancelled and replaced); the live one will run
        if self.tracks[index].handle != Some(handle) {
            return;
        }
        self.tracks[index].handle = None;

        if !doc.is_attached(track) {
            debug!("Marquee {:?} detached, stopping", track);
            self.tracks.remove(index);
            return;
        }

        doc.ensure_layout();
        let half_width = doc.element(track).map(|e| e.scroll_width() / 2.0).unwrap_or(0.0);

        let state = &mut self.tracks[index];
        if half_width > 0.0 {
            state.offset += speed;
            if state.offset >= half_width {
                state.offset = 0.0;
            }
            let applied = state.offset.round();
            doc.set_translate_x(track, -applied);
            trace!("Marquee {:?} offset {:.2} (half {:.1})", track, state.offset, half_width);
        } else {
            trace!("Marquee {:?} not laid out yet, retrying next frame", track);
        }

        state.handle = Some(frames.request(AnimationTask::Marquee(track)));
    }

    //--- Pause / Resume ---------------------------------------------------

    /// Cancels the outstanding step for `track`. The offset is kept.
    pub fn pause(&mut self, track: ElementId, frames: &mut FrameScheduler<AnimationTask>) -> bool {
        let Some(state) = self.tracks.iter_mut().find(|t| t.element == track) else {
            return false;
        };
        match state.handle.take() {
            Some(handle) => {
                frames.cancel(handle);
                debug!("Marquee {:?} paused at {:.2}", track, state.offset);
                true
            }
            None => false,
        }
    }

    /// Resumes `track` from its current offset. Never schedules a second
    /// concurrent step.
    pub fn resume(&mut self, track: ElementId, frames: &mut FrameScheduler<AnimationTask>) -> bool {
        let Some(state) = self.tracks.iter_mut().find(|t| t.element == track) else {
            return false;
        };
        if state.handle.is_some() {
            return false;
        }
        state.handle = Some(frames.request(AnimationTask::Marquee(track)));
        debug!("Marquee {:?} resumed at {:.2}", track, state.offset);
        true
    }

    /// Updates hover state from the element under the pointer, pausing on
    /// enter and resuming on leave.
    pub fn update_hover(
        &mut self,
        doc: &Document,
        under_pointer: Option<ElementId>,
        frames: &mut FrameScheduler<AnimationTask>,
    ) {
        let transitions: Vec<(ElementId, bool)> = self
            .tracks
            .iter()
            .filter_map(|t| {
                let inside = under_pointer
                    .map(|hit| doc.contains(t.element, hit))
                    .unwrap_or(false);
                (inside != t.hovered).then_some((t.element, inside))
            })
            .collect();

        for (track, entered) in transitions {
            if let Some(state) = self.tracks.iter_mut().find(|t| t.element == track) {
                state.hovered = entered;
            }
            if entered {
                self.pause(track, frames);
            } else {
                self.resume(track, frames);
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn track(&self, track: ElementId) -> Option<&MarqueeTrack> {
        self.tracks.iter().find(|t| t.element == track)
    }

    pub fn tracks(&self) -> &[MarqueeTrack] {
        &self.tracks
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dom::{ElementSpec, Flow, Viewport};

    /// Track with `cards` cards of `card_width` px inside a clipping frame.
    fn marquee_doc(cards: usize, card_width: f64) -> (Document, ElementId) {
        let mut doc = Document::new(Viewport::new(300.0, 400.0));
        let root = doc.root();
        let frame = doc.append(root, ElementSpec::new("section").class("reviews").clips_overflow());
        let track = doc.append(frame, ElementSpec::new("div").class("review-track").flow(Flow::Row));
        for i in 0..cards {
            doc.append(
                track,
                ElementSpec::new("div")
                    .class("review-card")
                    .text(format!("review {}", i))
                    .size(card_width, 120.0),
            );
        }
        (doc, track)
    }

    fn selectors() -> (Selector, Selector) {
        (Selector::class("review-track"), Selector::class("review-card"))
    }

    fn run_frame(animator: &mut MarqueeAnimator, doc: &mut Document, frames: &mut FrameScheduler<AnimationTask>) {
        for (handle, task) in frames.take_due() {
            if let AnimationTask::Marquee(track) = task {
                animator.step(doc, track, handle, frames);
            }
        }
    }

    //=====================================================================
    // Duplication
    //=====================================================================

    #[test]
    fn setup_duplicates_exactly_once() {
        let (mut doc, track) = marquee_doc(3, 50.0);
        let mut animator = MarqueeAnimator::new(0.35);
        let mut frames = FrameScheduler::new();
        let (track_sel, item_sel) = selectors();

        animator.setup(&mut doc, &track_sel, &item_sel, &mut frames);
        animator.setup(&mut doc, &track_sel, &item_sel, &mut frames);

        assert_eq!(doc.query_all_in(track, &item_sel).len(), 6, "2N cards, not 4N");
        assert_eq!(doc.element(track).unwrap().attr(DUPLICATED_ATTR), Some("true"));
        assert_eq!(frames.pending(), 1, "A second setup must not start a second loop");
    }

    #[test]
    fn duplicate_preserves_order_and_content() {
        let (mut doc, track) = marquee_doc(2, 50.0);
        assert!(duplicate_content(&mut doc, track));
        assert!(!duplicate_content(&mut doc, track));

        let texts: Vec<String> = doc
            .element(track)
            .unwrap()
            .children()
            .iter()
            .map(|&c| doc.element(c).unwrap().text().to_string())
            .collect();
        assert_eq!(texts, vec!["review 0", "review 1", "review 0", "review 1"]);
    }

    #[test]
    fn missing_track_or_items_is_noop() {
        let mut doc = Document::default();
        let mut animator = MarqueeAnimator::new(0.35);
        let mut frames = FrameScheduler::new();
        let (track_sel, item_sel) = selectors();

        assert!(animator.setup(&mut doc, &track_sel, &item_sel, &mut frames).is_none());

        let root = doc.root();
        doc.append(root, ElementSpec::new("div").class("review-track"));
        assert!(animator.setup(&mut doc, &track_sel, &item_sel, &mut frames).is_none());
        assert_eq!(frames.pending(), 0);
    }

    //=====================================================================
    // Stepping
    //=====================================================================

    #[test]
    fn offset_wraps_at_half_width() {
        // 2 cards × 50px duplicated → 200px track, half-width 100px
        let (mut doc, track) = marquee_doc(2, 50.0);
        let mut animator = MarqueeAnimator::new(0.35);
        let mut frames = FrameScheduler::new();
        let (track_sel, item_sel) = selectors();
        animator.setup(&mut doc, &track_sel, &item_sel, &mut frames);

        let mut wrapped = false;
        let mut previous = 0.0;
        for _ in 0..400 {
            run_frame(&mut animator, &mut doc, &mut frames);
            let offset = animator.track(track).unwrap().offset();
            assert!((0.0..100.0).contains(&offset));
            if offset < previous {
                wrapped = true;
            }
            previous = offset;
        }
        assert!(wrapped, "400 frames at 0.35px must cross the 100px boundary");
    }

    #[test]
    fn transform_uses_rounded_offset() {
        let (mut doc, track) = marquee_doc(2, 50.0);
        let mut animator = MarqueeAnimator::new(0.6);
        let mut frames = FrameScheduler::new();
        let (track_sel, item_sel) = selectors();
        animator.setup(&mut doc, &track_sel, &item_sel, &mut frames);

        run_frame(&mut animator, &mut doc, &mut frames);
        assert_eq!(doc.element(track).unwrap().style("transform"), Some("translateX(-1px)"));

        run_frame(&mut animator, &mut doc, &mut frames);
        assert_eq!(doc.element(track).unwrap().style("transform"), Some("translateX(-1px)"));

        run_frame(&mut animator, &mut doc, &mut frames);
        assert_eq!(doc.element(track).unwrap().style("transform"), Some("translateX(-2px)"));
    }

    #[test]
    fn zero_width_track_retries_without_moving() {
        let (mut doc, track) = marquee_doc(2, 0.0);
        let mut animator = MarqueeAnimator::new(0.35);
        let mut frames = FrameScheduler::new();
        let (track_sel, item_sel) = selectors();
        animator.setup(&mut doc, &track_sel, &item_sel, &mut frames);

        for _ in 0..5 {
            run_frame(&mut animator, &mut doc, &mut frames);
        }

        let state = animator.track(track).unwrap();
        assert_eq!(state.offset(), 0.0);
        assert!(state.is_running(), "Loop keeps retrying until laid out");
        assert!(doc.element(track).unwrap().style("transform").is_none());
    }

    #[test]
    fn detached_track_stops() {
        let (mut doc, track) = marquee_doc(2, 50.0);
        let mut animator = MarqueeAnimator::new(0.35);
        let mut frames = FrameScheduler::new();
        let (track_sel, item_sel) = selectors();
        animator.setup(&mut doc, &track_sel, &item_sel, &mut frames);

        doc.remove_child(track);
        run_frame(&mut animator, &mut doc, &mut frames);

        assert!(animator.track(track).is_none());
        assert_eq!(frames.pending(), 0);
    }

    //=====================================================================
    // Pause / Resume
    //=====================================================================

    #[test]
    fn pause_and_resume_keep_offset() {
        let (mut doc, track) = marquee_doc(4, 50.0);
        let mut animator = MarqueeAnimator::new(0.35);
        let mut frames = FrameScheduler::new();
        let (track_sel, item_sel) = selectors();
        animator.setup(&mut doc, &track_sel, &item_sel, &mut frames);

        for _ in 0..10 {
            run_frame(&mut animator, &mut doc, &mut frames);
        }
        let paused_at = animator.track(track).unwrap().offset();

        assert!(animator.pause(track, &mut frames));
        assert_eq!(frames.pending(), 0);
        for _ in 0..10 {
            run_frame(&mut animator, &mut doc, &mut frames);
        }
        assert_eq!(animator.track(track).unwrap().offset(), paused_at);

        assert!(animator.resume(track, &mut frames));
        assert!(!animator.resume(track, &mut frames), "Resume twice keeps one loop");
        assert_eq!(frames.pending(), 1);

        run_frame(&mut animator, &mut doc, &mut frames);
        let resumed = animator.track(track).unwrap().offset();
        assert!((resumed - (paused_at + 0.35)).abs() < 1e-9, "No jump or reset on resume");
    }

    #[test]
    fn hover_pauses_and_leave_resumes() {
        let (mut doc, track) = marquee_doc(4, 50.0);
        let mut animator = MarqueeAnimator::new(0.35);
        let mut frames = FrameScheduler::new();
        let (track_sel, item_sel) = selectors();
        animator.setup(&mut doc, &track_sel, &item_sel, &mut frames);

        let card = doc.query_all_in(track, &item_sel)[0];
        animator.update_hover(&doc, Some(card), &mut frames);
        assert!(animator.track(track).unwrap().is_hovered());
        assert_eq!(frames.pending(), 0);

        // Moving within the track does not resume
        animator.update_hover(&doc, Some(track), &mut frames);
        assert_eq!(frames.pending(), 0);

        animator.update_hover(&doc, None, &mut frames);
        assert!(!animator.track(track).unwrap().is_hovered());
        assert_eq!(frames.pending(), 1);
    }
}
