//! Property-based tests for the counter and marquee behaviours.

use proptest::prelude::*;

use super::{AnimationTask, CounterAnimator, MarqueeAnimator, TARGET_ATTR};
use crate::core::dom::{Document, ElementId, ElementSpec, Flow, Selector, Viewport};
use crate::core::scheduler::FrameScheduler;

fn counter_doc(target: u64) -> (Document, ElementId) {
    let mut doc = Document::new(Viewport::new(400.0, 400.0));
    let root = doc.root();
    let counter = doc.append(
        root,
        ElementSpec::new("span").attr(TARGET_ATTR, target.to_string()).size(0.0, 40.0),
    );
    (doc, counter)
}

fn marquee_doc(cards: usize, width: f64) -> (Document, ElementId) {
    let mut doc = Document::new(Viewport::new(300.0, 300.0));
    let root = doc.root();
    let frame = doc.append(root, ElementSpec::new("section").clips_overflow());
    let track = doc.append(frame, ElementSpec::new("div").class("review-track").flow(Flow::Row));
    for _ in 0..cards {
        doc.append(track, ElementSpec::new("div").class("review-card").size(width, 100.0));
    }
    (doc, track)
}

proptest! {
    #[test]
    fn counter_never_decreases_and_ends_on_target(
        target in 1u64..5_000_000,
        deltas in prop::collection::vec(0.0f64..400.0, 1..40),
    ) {
        let (mut doc, counter) = counter_doc(target);
        let mut animator = CounterAnimator::new(1400.0, 0.25);
        let mut frames = FrameScheduler::new();
        animator.animate(&mut doc, counter, target, &mut frames);

        let mut now = 0.0;
        let mut last = 0u64;
        for delta in deltas {
            now += delta;
            for (_, task) in frames.take_due() {
                if let AnimationTask::Counter(id) = task {
                    animator.step(&mut doc, id, now, &mut frames);
                }
            }
            let shown: u64 = doc.element(counter).unwrap().text().parse().unwrap();
            prop_assert!(shown >= last);
            prop_assert!(shown <= target);
            last = shown;
        }

        // Drain: one frame past the duration always lands on the target
        now += 1400.0;
        for (_, task) in frames.take_due() {
            if let AnimationTask::Counter(id) = task {
                animator.step(&mut doc, id, now, &mut frames);
            }
        }
        prop_assert_eq!(doc.element(counter).unwrap().text(), target.to_string());
        prop_assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn marquee_offset_stays_below_half_width(
        cards in 1usize..6,
        width in 1.0f64..200.0,
        speed in 0.05f64..20.0,
        steps in 1usize..300,
    ) {
        let (mut doc, track) = marquee_doc(cards, width);
        let mut animator = MarqueeAnimator::new(speed);
        let mut frames = FrameScheduler::new();
        animator.setup(
            &mut doc,
            &Selector::class("review-track"),
            &Selector::class("review-card"),
            &mut frames,
        );

        doc.ensure_layout();
        let half = doc.element(track).unwrap().scroll_width() / 2.0;
        for _ in 0..steps {
            for (handle, task) in frames.take_due() {
                if let AnimationTask::Marquee(id) = task {
                    animator.step(&mut doc, id, handle, &mut frames);
                }
            }
            let offset = animator.track(track).unwrap().offset();
            prop_assert!(offset >= 0.0 && offset < half);
            prop_assert_eq!(frames.pending(), 1);
        }
    }
}
