//=========================================================================
// Storefront Binary
//=========================================================================
//
// Opens the storefront page in a window.
//
//   storefront [--config FILE] [--catalog FILE] [--phone NUMBER]
//              [--no-persist] [--dry-run] [-v...]
//
//=========================================================================

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use storefront_engine::core::catalog::Catalog;
use storefront_engine::core::page::{
    ConfyFlagStore, EffectHandler, FlagStore, LogEffectHandler, MemoryFlagStore, SystemEffectHandler,
};
use storefront_engine::{StorefrontBuilder, StorefrontConfig, StorefrontError};

/// Storefront page with scroll-driven counters, marquee and reveal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON product catalog
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Messaging number, overrides the configuration
    #[arg(long)]
    phone: Option<String>,

    /// Keep the dark-mode preference in memory only
    #[arg(long)]
    no_persist: bool,

    /// Log outbound links instead of opening them
    #[arg(long)]
    dry_run: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter(args.verbose)))
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log filter used when `RUST_LOG` is unset.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn run(args: Args) -> Result<(), StorefrontError> {
    let mut config = match &args.config {
        Some(path) => StorefrontConfig::load(path)?,
        None => StorefrontConfig::default(),
    };
    if let Some(phone) = args.phone {
        config.phone_number = phone;
    }

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::default(),
    };
    info!("Serving {} products", catalog.len());

    let flags: Box<dyn FlagStore> = if args.no_persist {
        Box::new(MemoryFlagStore::new())
    } else {
        Box::new(ConfyFlagStore::default())
    };
    let effects: Box<dyn EffectHandler> = if args.dry_run {
        Box::new(LogEffectHandler)
    } else {
        Box::new(SystemEffectHandler)
    };

    StorefrontBuilder::new()
        .with_config(config)
        .with_catalog(catalog)
        .with_flag_store(flags)
        .with_effect_handler(effects)
        .build()
        .run()
}
