//=========================================================================
// Storefront Engine — Library Root
//
// This crate defines the public API surface of the storefront engine.
//
// Responsibilities:
// - Expose the runtime facade (`StorefrontBuilder`, `Storefront`)
// - Expose the page core (DOM, animations, page behaviours) for hosts
//   that drive it without a window
// - Keep the windowing platform hidden from end users
//
// Typical usage:
// ```no_run
// use storefront_engine::StorefrontBuilder;
//
// fn main() -> Result<(), storefront_engine::StorefrontError> {
//     StorefrontBuilder::new().build().run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the page and everything it is built from. It is public so
// tests and headless hosts can feed `PageInput`s and frame ticks directly.
//
pub mod config;
pub mod core;
pub mod error;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit integration (window, event loop, input
// conversion) and is not part of the public API surface.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use config::{ConfigError, StorefrontConfig};
pub use engine::{Storefront, StorefrontBuilder};
pub use error::StorefrontError;
