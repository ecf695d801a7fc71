//=========================================================================
// Page Effects
//=========================================================================
//
// Side effects the page requests from its host.
//
// The page never opens links or shows dialogs itself; it queues
// `PageEffect`s and the core thread hands them to an `EffectHandler`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::process::{Child, Command, ExitStatus};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use log::{info, warn};

//=== PageEffect ==========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEffect {
    /// Open `url` in a new browsing context.
    OpenLink(String),

    /// Show a blocking message to the user.
    Alert(String),
}

//=== EffectHandler =======================================================

/// Host-side sink for page effects.
pub trait EffectHandler: Send {
    fn handle(&mut self, effect: PageEffect);
}

/// Logs every effect. Used when no handler is configured.
#[derive(Debug, Default)]
pub struct LogEffectHandler;

impl EffectHandler for LogEffectHandler {
    fn handle(&mut self, effect: PageEffect) {
        match effect {
            PageEffect::OpenLink(url) => info!("Open link: {}", url),
            PageEffect::Alert(message) => info!("Alert: {}", message),
        }
    }
}

/// Opens links with the desktop's URL handler and logs alerts.
#[derive(Debug, Default)]
pub struct SystemEffectHandler;

impl SystemEffectHandler {
    /// Command and leading arguments that open a URL on this OS.
    fn opener() -> (&'static str, &'static [&'static str]) {
        if cfg!(target_os = "macos") {
            ("open", &[])
        } else if cfg!(target_os = "windows") {
            ("cmd", &["/C", "start", ""])
        } else {
            ("xdg-open", &[])
        }
    }
}

impl EffectHandler for SystemEffectHandler {
    fn handle(&mut self, effect: PageEffect) {
        match effect {
            PageEffect::OpenLink(url) => {
                let (program, args) = Self::opener();
                match Command::new(program).args(args).arg(&url).spawn() {
                    Ok(child) => {
                        info!("Opened {}", url);
                        reap(child, program);
                    }
                    Err(e) => warn!("Could not open {} with {}: {}", url, program, e),
                }
            }
            PageEffect::Alert(message) => warn!("Alert: {}", message),
        }
    }
}

/// Waits for an opener process off the core thread so it does not stay
/// behind as a zombie.
fn reap(mut child: Child, program: &'static str) -> JoinHandle<Option<ExitStatus>> {
    thread::spawn(move || match child.wait() {
        Ok(status) => {
            if !status.success() {
                warn!("{} exited with {}", program, status);
            }
            Some(status)
        }
        Err(e) => {
            warn!("Could not wait for {}: {}", program, e);
            None
        }
    })
}

/// Forwards effects to another thread.
impl EffectHandler for Sender<PageEffect> {
    fn handle(&mut self, effect: PageEffect) {
        if let Err(e) = self.send(effect) {
            warn!("Effect receiver disconnected, dropping {:?}", e.into_inner());
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
