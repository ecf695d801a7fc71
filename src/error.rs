//=========================================================================
// Storefront Errors
//=========================================================================
//
// Top-level error returned by the binary-facing API. Each concern keeps
// its own error type; this enum only aggregates them. Flag store failures
// never get here: the page logs and ignores them.
//
//=========================================================================

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::catalog::CatalogError;
use crate::core::platform_bridge::PlatformError;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Core thread panicked")]
    CoreThreadPanicked,
}
