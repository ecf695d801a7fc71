//=========================================================================
// Page Input
//
// Platform-neutral input events consumed by the page core.
//
// Notes:
// The platform layer converts OS events into `PageInput` and batches them
// per frame; the page applies each batch in order before running the
// frame's animations.
//
//=========================================================================

//=== Submodules ==========================================================
pub mod event;

//=== Public API ==========================================================
pub use event::{Key, PageInput};
