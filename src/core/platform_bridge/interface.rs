//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types (events and errors).
//
// Defines the contract for communication between platform and core
// threads. One `RedrawRequested` on the platform side produces at most
// one `Inputs` batch followed by one `Frame` tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;
use winit::error::EventLoopError;

//=== Internal Dependencies ===============================================

use crate::core::input::PageInput;

//=== PlatformEvent =======================================================

/// Events sent from platform to core over the bridge channel.
#[derive(Debug, Clone)]
pub enum PlatformEvent {
    /// Inputs buffered since the previous frame.
    Inputs {
        discrete: Vec<PageInput>,
        continuous: Vec<PageInput>,
    },

    /// Paint cycle at `timestamp_ms` since engine start.
    Frame { timestamp_ms: f64 },

    /// Window close requested.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] EventLoopError),

    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] EventLoopError),
}
