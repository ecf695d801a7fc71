//=========================================================================
// Storefront Engine
//
// Main entry point and coordinator for the storefront.
//
// Architecture:
// ```text
//     StorefrontBuilder  ──build()──>  Storefront  ──run()──>  [Runtime]
//         │                               │
//         ├─ with_config()                └─ spawns core thread
//         ├─ with_catalog()                  runs platform
//         ├─ with_channel_capacity()         blocks until exit
//         ├─ with_flag_store()
//         └─ with_effect_handler()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::config::StorefrontConfig;
use crate::core::catalog::Catalog;
use crate::core::page::{EffectHandler, FlagStore, LogEffectHandler, MemoryFlagStore, Page};
use crate::core::platform_bridge::PlatformEvent;
use crate::core::CoreOrchestrator;
use crate::error::StorefrontError;
use crate::platform::Platform;

//=== StorefrontBuilder ===================================================

/// Builder for configuring and constructing a [`Storefront`].
///
/// # Default Values
///
/// - **Config**: [`StorefrontConfig::default()`]
/// - **Catalog**: the four built-in products
/// - **Channel capacity**: 128 events
/// - **Flag store**: in memory (nothing persisted)
/// - **Effect handler**: logs effects
///
/// # Examples
///
/// ```no_run
/// use storefront_engine::StorefrontBuilder;
/// use storefront_engine::core::page::{ConfyFlagStore, SystemEffectHandler};
///
/// StorefrontBuilder::new()
///     .with_flag_store(Box::new(ConfyFlagStore::default()))
///     .with_effect_handler(Box::new(SystemEffectHandler))
///     .build()
///     .run()
///     .unwrap();
/// ```
pub struct StorefrontBuilder {
    config: StorefrontConfig,
    catalog: Catalog,
    channel_capacity: usize,
    flags: Option<Box<dyn FlagStore>>,
    effects: Option<Box<dyn EffectHandler>>,
}

impl StorefrontBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: StorefrontConfig::default(),
            catalog: Catalog::default(),
            channel_capacity: 128,
            flags: None,
            effects: None,
        }
    }

    pub fn with_config(mut self, config: StorefrontConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Frame ticks are dropped rather than queued when the channel is
    /// full, so a small capacity only costs skipped frames.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets where the dark-mode flag is persisted.
    pub fn with_flag_store(mut self, flags: Box<dyn FlagStore>) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Sets who receives outbound links and alerts.
    pub fn with_effect_handler(mut self, effects: Box<dyn EffectHandler>) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Builds the storefront over the default page template.
    pub fn build(self) -> Storefront {
        info!(
            "Building storefront ({} products, channel: {})",
            self.catalog.len(),
            self.channel_capacity
        );

        let flags = self.flags.unwrap_or_else(|| Box::new(MemoryFlagStore::new()));
        let effects = self.effects.unwrap_or_else(|| Box::new(LogEffectHandler));
        let page = Page::storefront(&self.config, self.catalog, flags);

        Storefront {
            orchestrator: CoreOrchestrator::new(page, effects),
            title: self.config.window_title,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for StorefrontBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Storefront ==========================================================

/// Storefront runtime.
///
/// # Architecture
///
/// ```text
/// Storefront (Main Thread)
///   ├─► CoreOrchestrator (Core Thread, paced by frame ticks)
///   │     └─► Page: DOM, animations, actions
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input, RedrawRequested
///
/// Communication: bounded channel (PlatformEvent)
/// ```
pub struct Storefront {
    orchestrator: CoreOrchestrator,
    title: String,
    channel_capacity: usize,
}

impl Storefront {
    /// Starts the runtime and blocks until the window closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the platform → core channel and the shared time origin
    /// 2. Spawns the core thread, which initializes the page
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: `WindowClosed` → core thread exits → joined
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Platform`] if the event loop fails and
    /// [`StorefrontError::CoreThreadPanicked`] if the core thread panicked.
    pub fn run(self) -> Result<(), StorefrontError> {
        info!("Starting storefront runtime");

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);
        let epoch = Instant::now();

        info!("Channel created (capacity: {})", self.channel_capacity);

        //--- 2. Spawn the core thread -------------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, epoch);
        info!("Core thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, epoch, self.title);
        info!("Platform initialized, entering event loop");

        let platform_result = platform.run();
        if let Err(e) = &platform_result {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: Wait for the core thread to terminate -----------
        let core_result = match core_handle.join() {
            Ok(_page) => {
                info!("Core thread terminated cleanly");
                Ok(())
            }
            Err(e) => {
                error!("Core thread panicked: {:?}", e);
                Err(StorefrontError::CoreThreadPanicked)
            }
        };

        info!("Storefront shutdown complete");
        platform_result?;
        core_result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
