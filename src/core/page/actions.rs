//=========================================================================
// Action Registry
//=========================================================================
//
// Single dispatch point for clicks: maps the hit-tested element to the
// page action it triggers.
//
// Resolution:
//   rules are tried in registration order; the first match wins
//     Closest → target or any ancestor matches the selector
//     Exact   → the target itself matches (e.g. the modal backdrop)
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::contact::{FORM_ID, RESET_ID};
use super::modal::{CLOSE_ID, MODAL_ID, ORDER_ID};
use super::order_bar::ORDER_NOW_ID;
use super::theme::TOGGLE_ID;
use crate::core::dom::{Document, ElementId, Selector};

//=== ActionRole ==========================================================

/// What a clicked element does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionRole {
    /// Product card "Details" button (`data-id`).
    Details,
    /// Product card "Order" button (`data-title`).
    Order,
    ModalOrder,
    ModalClose,
    /// Click on the modal backdrop itself.
    ModalOverlay,
    OrderNow,
    DarkToggle,
    ContactSubmit,
    ContactReset,
    /// In-page `a[href^="#"]` link.
    AnchorLink,
    /// Text input or textarea.
    FocusField,
}

//=== MatchMode ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Closest,
    Exact,
}

//=== ActionRegistry ======================================================

#[derive(Debug, Clone)]
struct ActionRule {
    selector: Selector,
    mode: MatchMode,
    role: ActionRole,
}

/// Resolved click: the role and the element that matched its rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionMatch {
    pub role: ActionRole,
    pub element: ElementId,
}

#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    rules: Vec<ActionRule>,
}

impl ActionRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every storefront rule.
    pub fn storefront() -> Self {
        let mut registry = Self::new();
        registry
            .register(Selector::id(CLOSE_ID), MatchMode::Closest, ActionRole::ModalClose)
            .register(Selector::id(ORDER_ID), MatchMode::Closest, ActionRole::ModalOrder)
            .register(Selector::class("details"), MatchMode::Closest, ActionRole::Details)
            .register(Selector::class("order"), MatchMode::Closest, ActionRole::Order)
            .register(Selector::id(ORDER_NOW_ID), MatchMode::Closest, ActionRole::OrderNow)
            .register(Selector::id(TOGGLE_ID), MatchMode::Closest, ActionRole::DarkToggle)
            .register(
                Selector::tag("button").and_attr_eq("type", "submit"),
                MatchMode::Closest,
                ActionRole::ContactSubmit,
            )
            .register(Selector::id(RESET_ID), MatchMode::Closest, ActionRole::ContactReset)
            .register(
                Selector::tag("a").and_attr_prefix("href", "#"),
                MatchMode::Closest,
                ActionRole::AnchorLink,
            )
            .register(Selector::tag("input"), MatchMode::Exact, ActionRole::FocusField)
            .register(Selector::tag("textarea"), MatchMode::Exact, ActionRole::FocusField)
            .register(Selector::id(MODAL_ID), MatchMode::Exact, ActionRole::ModalOverlay);
        registry
    }

    /// Appends a rule. Earlier rules take precedence.
    pub fn register(&mut self, selector: Selector, mode: MatchMode, role: ActionRole) -> &mut Self {
        self.rules.push(ActionRule { selector, mode, role });
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Finds the action for a click on `target`.
    pub fn resolve(&self, doc: &Document, target: ElementId) -> Option<ActionMatch> {
        let el = doc.element(target)?;
        let found = self.rules.iter().find_map(|rule| {
            let element = match rule.mode {
                MatchMode::Exact => rule.selector.matches(el).then_some(target),
                MatchMode::Closest => doc.closest(target, &rule.selector),
            }?;
            Some(ActionMatch {
                role: rule.role,
                element,
            })
        });
        trace!("Click on {:?} resolved to {:?}", target, found.map(|m| m.role));
        found
    }
}

/// Returns true if `element` belongs to the contact form.
pub(crate) fn in_contact_form(doc: &Document, element: ElementId) -> bool {
    doc.closest(element, &Selector::id(FORM_ID)).is_some()
}

//=========================================================================
// Unit Tests
//=========================================================================
