//=========================================================================
// Core Orchestrator
//=========================================================================
//
// Runs the storefront page on the logic (non-platform) thread.
//
// Responsibilities:
// - Own the `Page` and every piece of mutable page state
// - Receive platform events over the bridge channel
// - Apply inputs in arrival order, then run one page frame per tick
// - Hand page effects (links, alerts) to the configured handler
//
// Notes:
// The core never touches the window. Pacing comes from the platform's
// frame ticks rather than a fixed tick rate, so animations follow the
// paint cycle. Shutdown happens on `WindowClosed` or when the channel
// disconnects.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod animation;
pub mod catalog;
pub mod dom;
pub mod input;
pub mod messaging;
pub mod observer;
pub mod page;
pub mod platform_bridge;
pub mod scheduler;

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use page::{EffectHandler, Page};
use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== CoreOrchestrator ====================================================

/// Owns the page until the core thread is spawned.
pub struct CoreOrchestrator {
    page: Page,
    effects: Box<dyn EffectHandler>,
}

impl CoreOrchestrator {
    /// How long an idle core waits in the channel before looping.
    const IDLE_WAIT: Duration = Duration::from_millis(100);

    pub fn new(page: Page, effects: Box<dyn EffectHandler>) -> Self {
        Self { page, effects }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread. `epoch` is the instant frame timestamps
    // are measured from; the page is initialized against it.
    //
    // Each iteration:
    //  1. Collects platform events (inputs, latest frame tick)
    //  2. Applies inputs in order
    //  3. Runs the page frame, if a tick arrived
    //  4. Dispatches queued effects
    //  5. Exits after a close request or disconnect
    //
    // The page is returned through the join handle on exit.
    //
    pub fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        epoch: Instant,
    ) -> thread::JoinHandle<Page> {
        thread::spawn(move || {
            let Self { mut page, mut effects } = self;
            let mut collector = EventCollector::new(receiver);

            page.init(elapsed_ms(epoch));
            dispatch(&mut page, effects.as_mut());

            loop {
                //--- Step 1: Gather platform events ------------------------
                let control = collector.collect_frame(Self::IDLE_WAIT);

                //--- Step 2: Apply inputs ----------------------------------
                for input in collector.take_inputs() {
                    page.handle_input(input);
                }

                //--- Step 3: Paint cycle -----------------------------------
                if let Some(timestamp_ms) = collector.take_frame() {
                    page.frame(timestamp_ms);
                }

                //--- Step 4: Effects ---------------------------------------
                dispatch(&mut page, effects.as_mut());

                if control == TickControl::Exit {
                    info!("Core thread exiting");
                    break;
                }
            }

            page
        })
    }
}

fn dispatch(page: &mut Page, handler: &mut dyn EffectHandler) {
    for effect in page.take_effects() {
        debug!("Dispatching {:?}", effect);
        handler.handle(effect);
    }
}

/// Milliseconds elapsed since `epoch`.
pub(crate) fn elapsed_ms(epoch: Instant) -> f64 {
    epoch.elapsed().as_secs_f64() * 1000.0
}

//=========================================================================
// Unit Tests
//=========================================================================
