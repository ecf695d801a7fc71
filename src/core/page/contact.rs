//=========================================================================
// Contact Form
//=========================================================================
//
// Validates the contact form and composes its outbound message.
//
//   #contactForm
//     ├─ #name / #phone / #message   (text fields)
//     ├─ button[type=submit]         → submit()
//     └─ #contactReset               → reset()
//
// Field editing (typed text, Backspace) goes through `insert_text` and
// `delete_backward` on whichever field holds focus.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::dom::{Document, ElementId};

//=== Constants ===========================================================

pub const FORM_ID: &str = "contactForm";
pub const RESET_ID: &str = "contactReset";
const FIELD_IDS: [&str; 3] = ["name", "phone", "message"];

//=== ContactError ========================================================

/// Submission failures, displayed to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Form fields missing")]
    MissingFields,

    #[error("Please fill name, phone and message before sending.")]
    EmptyFields,
}

//=== ContactForm =========================================================

#[derive(Debug, Default)]
pub struct ContactForm;

impl ContactForm {
    /// Returns the form element if the page has one.
    pub fn form(doc: &Document) -> Option<ElementId> {
        doc.by_id(FORM_ID)
    }

    /// Validates the fields and returns the message to send.
    pub fn submit(doc: &Document) -> Result<String, ContactError> {
        let values: Vec<String> = FIELD_IDS
            .iter()
            .map(|id| {
                doc.by_id(id)
                    .and_then(|field| doc.element(field))
                    .map(|field| field.value().trim().to_string())
            })
            .collect::<Option<_>>()
            .ok_or(ContactError::MissingFields)?;

        if values.iter().any(String::is_empty) {
            return Err(ContactError::EmptyFields);
        }

        let message = format!("Order/Message from {} ({}): {}", values[0], values[1], values[2]);
        debug!("Contact form submitted ({} chars)", message.len());
        Ok(message)
    }

    /// Clears every field inside the form.
    pub fn reset(doc: &mut Document) {
        let Some(form) = Self::form(doc) else {
            return;
        };
        for id in FIELD_IDS {
            if let Some(field) = doc.by_id(id).filter(|&f| doc.contains(form, f)) {
                if let Some(el) = doc.element_mut(field) {
                    el.set_value("");
                }
            }
        }
    }

    //--- Editing ----------------------------------------------------------

    pub fn insert_text(doc: &mut Document, field: ElementId, text: &str) {
        if let Some(el) = doc.element_mut(field) {
            el.value_mut().push_str(text);
        }
    }

    pub fn delete_backward(doc: &mut Document, field: ElementId) {
        if let Some(el) = doc.element_mut(field) {
            el.value_mut().pop();
        }
    }

    /// Field after `current` in tab order, wrapping to the first.
    pub fn next_field(doc: &Document, current: Option<ElementId>) -> Option<ElementId> {
        let fields: Vec<ElementId> = FIELD_IDS.iter().filter_map(|id| doc.by_id(id)).collect();
        let next = current
            .and_then(|c| fields.iter().position(|&f| f == c))
            .map_or(0, |i| (i + 1) % fields.len());
        fields.get(next).copied()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dom::ElementSpec;

    fn form_doc() -> Document {
        let mut doc = Document::default();
        let root = doc.root();
        let form = doc.append(root, ElementSpec::new("form").id(FORM_ID));
        doc.append(form, ElementSpec::new("input").id("name"));
        doc.append(form, ElementSpec::new("input").id("phone"));
        doc.append(form, ElementSpec::new("textarea").id("message"));
        doc.append(form, ElementSpec::new("button").id(RESET_ID));
        doc
    }

    fn fill(doc: &mut Document, id: &str, value: &str) {
        let field = doc.by_id(id).unwrap();
        doc.element_mut(field).unwrap().set_value(value);
    }

    #[test]
    fn composes_trimmed_message() {
        let mut doc = form_doc();
        fill(&mut doc, "name", "  Asha ");
        fill(&mut doc, "phone", "98450 12345");
        fill(&mut doc, "message", "Two packs of mixture\n");

        assert_eq!(
            ContactForm::submit(&doc).unwrap(),
            "Order/Message from Asha (98450 12345): Two packs of mixture"
        );
    }

    #[test]
    fn blank_field_is_rejected() {
        let mut doc = form_doc();
        fill(&mut doc, "name", "Asha");
        fill(&mut doc, "phone", "   ");
        fill(&mut doc, "message", "Hi");

        let err = ContactForm::submit(&doc).unwrap_err();
        assert_eq!(err, ContactError::EmptyFields);
        assert_eq!(err.to_string(), "Please fill name, phone and message before sending.");
    }

    #[test]
    fn missing_field_element_is_reported() {
        let mut doc = form_doc();
        let phone = doc.by_id("phone").unwrap();
        doc.remove_child(phone);

        let err = ContactForm::submit(&doc).unwrap_err();
        assert_eq!(err.to_string(), "Form fields missing");
    }

    #[test]
    fn reset_clears_values() {
        let mut doc = form_doc();
        fill(&mut doc, "name", "Asha");
        fill(&mut doc, "message", "Hi");

        ContactForm::reset(&mut doc);

        for id in FIELD_IDS {
            let field = doc.by_id(id).unwrap();
            assert_eq!(doc.element(field).unwrap().value(), "");
        }
    }

    #[test]
    fn editing_appends_and_deletes() {
        let mut doc = form_doc();
        let name = doc.by_id("name").unwrap();

        ContactForm::insert_text(&mut doc, name, "Ravi");
        ContactForm::insert_text(&mut doc, name, "é");
        ContactForm::delete_backward(&mut doc, name);
        ContactForm::delete_backward(&mut doc, name);

        assert_eq!(doc.element(name).unwrap().value(), "Rav");
    }

    #[test]
    fn tab_order_wraps() {
        let doc = form_doc();
        let name = doc.by_id("name").unwrap();
        let message = doc.by_id("message").unwrap();

        assert_eq!(ContactForm::next_field(&doc, None), Some(name));
        assert_eq!(ContactForm::next_field(&doc, Some(message)), Some(name));
        assert_eq!(ContactForm::next_field(&doc, Some(name)), doc.by_id("phone"));
        assert_eq!(ContactForm::next_field(&Document::default(), None), None);
    }
}
