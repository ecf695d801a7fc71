//=========================================================================
// Scheduling Primitives
//=========================================================================
//
// Cooperative, single-threaded scheduling used by the page core.
//
// Components:
// - `frame_scheduler`: one-shot callbacks for the next paint cycle
//   (cancellable handles, no fixed interval)
// - `timer_queue`: one-shot callbacks after a delay in milliseconds
//
// Both queues hold plain task tokens rather than closures; the owner
// dispatches each due token to the state machine it names.
//
//=========================================================================

//=== Module Declarations =================================================

mod frame_scheduler;
mod timer_queue;

//=== Public API ==========================================================

pub use frame_scheduler::{FrameHandle, FrameScheduler};
pub use timer_queue::{TimerId, TimerQueue};
