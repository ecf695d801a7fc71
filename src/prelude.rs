//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use storefront_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Storefront, StorefrontBuilder};
pub use crate::error::StorefrontError;

// Configuration and content
pub use crate::config::StorefrontConfig;
pub use crate::core::catalog::{Catalog, Product};

// Page
pub use crate::core::page::{
    ConfyFlagStore, EffectHandler, FlagStore, MemoryFlagStore, Page, PageEffect, SystemEffectHandler,
};

// Input
pub use crate::core::input::{Key, PageInput};
