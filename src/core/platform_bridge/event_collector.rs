//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side collector with bounded draining and shutdown detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → inputs + frame → TickControl
//
// The first event is awaited with a timeout so an idle core sleeps in the
// channel instead of spinning. Draining is bounded to prevent starvation.
// When several frame ticks are queued only the latest one is kept; the
// page catches up on a single frame since all its animations are
// time-based.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::PageInput;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects platform events into per-frame inputs and a frame timestamp.
pub struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    inputs: Vec<PageInput>,
    frame: Option<f64>,
}

impl EventCollector {
    const MAX_EVENTS_PER_FRAME: usize = 100;

    pub fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            inputs: Vec::with_capacity(16),
            frame: None,
        }
    }

    /// Waits up to `timeout` for platform events and collects them.
    pub fn collect_frame(&mut self, timeout: Duration) -> TickControl {
        self.inputs.clear();
        self.frame = None;

        match self.receiver.recv_timeout(timeout) {
            Ok(event) => {
                if self.handle_event(event) == TickControl::Exit {
                    return TickControl::Exit;
                }
            }
            Err(RecvTimeoutError::Disconnected) => return TickControl::Exit,
            Err(RecvTimeoutError::Timeout) => return TickControl::Continue,
        }

        let mut drained = 1;
        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!("Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Inputs collected this frame, in arrival order.
    pub fn inputs(&self) -> &[PageInput] {
        &self.inputs
    }

    /// Takes the collected inputs, leaving an empty vec.
    pub fn take_inputs(&mut self) -> Vec<PageInput> {
        std::mem::take(&mut self.inputs)
    }

    /// Takes the latest frame timestamp collected this frame.
    pub fn take_frame(&mut self) -> Option<f64> {
        self.frame.take()
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                self.inputs.extend(discrete);
                self.inputs.extend(continuous);
                TickControl::Continue
            }
            PlatformEvent::Frame { timestamp_ms } => {
                if let Some(skipped) = self.frame.replace(timestamp_ms) {
                    trace!("Skipping stale frame at {:.1}ms", skipped);
                }
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::Key;
    use crossbeam_channel::unbounded;

    const WAIT: Duration = Duration::from_millis(5);

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        let result = collector.collect_frame(WAIT);

        assert_eq!(result, TickControl::Continue);
        assert!(collector.inputs().is_empty());
        assert_eq!(collector.take_frame(), None);
    }

    #[test]
    fn collect_aggregates_multiple_events() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs {
            discrete: vec![PageInput::Key(Key::Escape)],
            continuous: vec![],
        })
        .unwrap();
        tx.send(PlatformEvent::Inputs {
            discrete: vec![PageInput::Click { x: 1.0, y: 2.0 }],
            continuous: vec![PageInput::PointerMoved { x: 10.0, y: 20.0 }],
        })
        .unwrap();

        let result = collector.collect_frame(WAIT);

        assert_eq!(result, TickControl::Continue);
        let inputs = collector.take_inputs();
        assert_eq!(inputs.len(), 3);
        assert_eq!(inputs[0], PageInput::Key(Key::Escape));
        assert!(matches!(inputs[1], PageInput::Click { .. }));
        assert!(collector.inputs().is_empty());
    }

    #[test]
    fn keeps_latest_frame_only() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Frame { timestamp_ms: 16.0 }).unwrap();
        tx.send(PlatformEvent::Frame { timestamp_ms: 33.0 }).unwrap();

        collector.collect_frame(WAIT);

        assert_eq!(collector.take_frame(), Some(33.0));
        assert_eq!(collector.take_frame(), None);
    }

    #[test]
    fn collect_returns_exit_on_window_closed() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Frame { timestamp_ms: 1.0 }).unwrap();
        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.collect_frame(WAIT), TickControl::Exit);
    }

    #[test]
    fn collect_clears_previous_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs {
            discrete: vec![PageInput::Key(Key::Tab)],
            continuous: vec![],
        })
        .unwrap();
        collector.collect_frame(WAIT);
        assert_eq!(collector.inputs().len(), 1);

        tx.send(PlatformEvent::Inputs {
            discrete: vec![],
            continuous: vec![],
        })
        .unwrap();
        collector.collect_frame(WAIT);
        assert!(collector.inputs().is_empty());
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        drop(tx);

        assert_eq!(collector.collect_frame(WAIT), TickControl::Exit);
    }
}
