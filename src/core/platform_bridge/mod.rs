//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the windowing platform (winit) with the page core.
//
// The platform thread only produces `PlatformEvent`s and the core thread
// only consumes them, so a different backend can drive the same page.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Core-side event collection per frame
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event_collector;
pub mod interface;

//=== Public API ==========================================================

pub use event_collector::{EventCollector, TickControl};
pub use interface::{PlatformError, PlatformEvent};
