//=========================================================================
// One-Shot Triggers
//=========================================================================
//
// Per-element transition-once state machine:
//
//   (absent) ──register()──> Registered ──trigger()──> Triggered
//       └───────────────────trigger()───────────────────┘
//
// `Triggered` is terminal. The guard is kept independently of the
// intersection watcher, so a duplicate visibility report (or a second
// trigger path such as the staggered reveal) can never fire twice.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use crate::core::dom::ElementId;

//=== TriggerState ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    /// Waiting for its visibility event.
    Registered,

    /// Fired; never leaves this state.
    Triggered,
}

//=== OneShotSet ==========================================================

#[derive(Debug, Default)]
pub struct OneShotSet {
    states: HashMap<ElementId, TriggerState>,
}

impl OneShotSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an element. Returns false if it was already known, in
    /// which case its state is left untouched.
    pub fn register(&mut self, element: ElementId) -> bool {
        if self.states.contains_key(&element) {
            return false;
        }
        self.states.insert(element, TriggerState::Registered);
        true
    }

    /// Moves an element to `Triggered`. Returns true only for the first
    /// call per element.
    pub fn trigger(&mut self, element: ElementId) -> bool {
        match self.states.insert(element, TriggerState::Triggered) {
            Some(TriggerState::Triggered) => false,
            Some(TriggerState::Registered) | None => true,
        }
    }

    pub fn state(&self, element: ElementId) -> Option<TriggerState> {
        self.states.get(&element).copied()
    }

    pub fn is_triggered(&self, element: ElementId) -> bool {
        self.state(element) == Some(TriggerState::Triggered)
    }

    pub fn triggered_count(&self) -> usize {
        self.states
            .values()
            .filter(|s| **s == TriggerState::Triggered)
            .count()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_then_triggered_once() {
        let mut set = OneShotSet::new();
        let el = ElementId(4);

        assert!(set.register(el));
        assert_eq!(set.state(el), Some(TriggerState::Registered));

        assert!(set.trigger(el));
        assert!(!set.trigger(el), "Second trigger must not fire");
        assert!(set.is_triggered(el));
    }

    #[test]
    fn register_never_resets_triggered() {
        let mut set = OneShotSet::new();
        let el = ElementId(1);

        set.trigger(el);
        assert!(!set.register(el));
        assert_eq!(set.state(el), Some(TriggerState::Triggered));
    }

    #[test]
    fn unregistered_elements_can_trigger() {
        let mut set = OneShotSet::new();
        assert!(set.trigger(ElementId(9)));
        assert_eq!(set.triggered_count(), 1);
    }
}
