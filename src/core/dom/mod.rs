//=========================================================================
// DOM Query Layer
//=========================================================================
//
// Headless document model the page glue and animation engine operate on.
//
// Components:
// - `element`: element data, handles and the `ElementSpec` builder
// - `document`: arena tree, structural queries, viewport, hit testing
// - `selector`: compound selector matching and parsing
// - `layout`: minimal flow layout (boxes, clips, scroll widths)
//
//=========================================================================

//=== Module Declarations =================================================

mod document;
mod element;
mod layout;
mod selector;

//=== Public API ==========================================================

pub use document::Document;
pub use element::{Element, ElementId, ElementSpec};
pub use layout::{Flow, Rect, Size, Viewport};
pub use selector::{Selector, SelectorError};
