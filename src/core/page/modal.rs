//=========================================================================
// Product Detail Modal
//=========================================================================
//
// Renders one product into `#modalCard` and opens `#modal` over the page.
//
// States:
//   Closed ──open(product)──▶ Open { product, order_armed }
//   Open   ──close()────────▶ Closed
//
// The modal's order button sends once per opening; further clicks are
// ignored until the modal is opened again. The card's markup is built on
// the first opening and refilled in place afterwards.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::catalog::Product;
use crate::core::dom::{Document, ElementId, ElementSpec, Flow, Selector};

//=== Constants ===========================================================

pub const MODAL_ID: &str = "modal";
pub const CARD_ID: &str = "modalCard";
pub const ORDER_ID: &str = "modalOrder";
pub const CLOSE_ID: &str = "modalClose";
pub const OPEN_CLASS: &str = "open";
const LAYOUT_CLASS: &str = "modal-layout";
const META_CLASS: &str = "modal-meta";

//=== DetailModal =========================================================

#[derive(Debug, Clone, Copy)]
struct OpenState {
    product_id: u32,
    order_armed: bool,
}

#[derive(Debug, Default)]
pub struct DetailModal {
    state: Option<OpenState>,
}

impl DetailModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn product_id(&self) -> Option<u32> {
        self.state.map(|s| s.product_id)
    }

    /// Renders `product` and opens the modal. Returns false if the page
    /// has no modal.
    pub fn open(&mut self, doc: &mut Document, product: &Product) -> bool {
        let (Some(modal), Some(card)) = (doc.by_id(MODAL_ID), doc.by_id(CARD_ID)) else {
            debug!("Modal markup missing, cannot show product {}", product.id);
            return false;
        };

        render(doc, card, product);

        if let Some(el) = doc.element_mut(modal) {
            el.add_class(OPEN_CLASS);
            el.set_attr("aria-hidden", "false");
        }
        doc.set_flow(modal, Flow::Overlay);

        self.state = Some(OpenState {
            product_id: product.id,
            order_armed: true,
        });
        debug!("Modal opened for product {}", product.id);
        true
    }

    /// Closes the modal. Safe to call when already closed.
    pub fn close(&mut self, doc: &mut Document) {
        let Some(modal) = doc.by_id(MODAL_ID) else {
            return;
        };
        if let Some(el) = doc.element_mut(modal) {
            el.remove_class(OPEN_CLASS);
            el.set_attr("aria-hidden", "true");
        }
        doc.set_flow(modal, Flow::None);

        if self.state.take().is_some() {
            debug!("Modal closed");
        }
    }

    /// Consumes the order action for the current opening.
    ///
    /// Returns the product to order the first time it is called after
    /// `open`, then `None`.
    pub fn take_order(&mut self) -> Option<u32> {
        let state = self.state.as_mut()?;
        if !state.order_armed {
            return None;
        }
        state.order_armed = false;
        Some(state.product_id)
    }
}

//=== Rendering ===========================================================

fn render(doc: &mut Document, card: ElementId, product: &Product) {
    if doc.query_all_in(card, &Selector::class(LAYOUT_CLASS)).is_empty() {
        doc.clear_children(card);
        build(doc, card);
    }

    let first = |doc: &Document, selector: Selector| doc.query_all_in(card, &selector).first().copied();
    let image = first(doc, Selector::tag("img"));
    let title = first(doc, Selector::tag("h2"));
    let meta = first(doc, Selector::class(META_CLASS));
    let description = first(doc, Selector::tag("p"));

    if let Some(el) = image.and_then(|id| doc.element_mut(id)) {
        el.set_attr("src", product.image.as_str());
        el.set_attr("alt", product.title.as_str());
    }
    if let Some(el) = title.and_then(|id| doc.element_mut(id)) {
        el.set_text(product.title.as_str());
    }
    if let Some(el) = meta.and_then(|id| doc.element_mut(id)) {
        el.set_text(format!("{} • {}", product.unit, product.price_label()));
    }
    if let Some(el) = description.and_then(|id| doc.element_mut(id)) {
        el.set_text(product.description.as_str());
    }
}

/// Builds the empty card markup: image, title, meta, description, buttons.
fn build(doc: &mut Document, card: ElementId) {
    let layout = doc.append(card, ElementSpec::new("div").class(LAYOUT_CLASS).flow(Flow::Row));
    doc.append(layout, ElementSpec::new("img").size(320.0, 320.0));

    let info = doc.append(layout, ElementSpec::new("div").class("modal-info").size(320.0, 0.0));
    doc.append(info, ElementSpec::new("h2").size(0.0, 36.0));
    doc.append(info, ElementSpec::new("div").class(META_CLASS).size(0.0, 24.0));
    doc.append(info, ElementSpec::new("p").size(0.0, 48.0));

    let actions = doc.append(info, ElementSpec::new("div").class("modal-actions").flow(Flow::Row));
    doc.append(
        actions,
        ElementSpec::new("button")
            .id(ORDER_ID)
            .class("btn-cta")
            .text("Order on WhatsApp")
            .size(180.0, 40.0),
    );
    doc.append(
        actions,
        ElementSpec::new("button")
            .id(CLOSE_ID)
            .class("btn-outline")
            .text("Close")
            .size(100.0, 40.0),
    );
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;

    fn modal_doc() -> (Document, ElementId) {
        let mut doc = Document::default();
        let root = doc.root();
        let modal = doc.append(
            root,
            ElementSpec::new("div").id(MODAL_ID).attr("aria-hidden", "true").flow(Flow::None),
        );
        doc.append(modal, ElementSpec::new("div").id(CARD_ID));
        (doc, modal)
    }

    #[test]
    fn open_renders_product_and_shows_modal() {
        let (mut doc, modal) = modal_doc();
        let catalog = Catalog::default();
        let mut dialog = DetailModal::new();

        assert!(dialog.open(&mut doc, catalog.get(2).unwrap()));

        let el = doc.element(modal).unwrap();
        assert!(el.has_class(OPEN_CLASS));
        assert_eq!(el.attr("aria-hidden"), Some("false"));
        assert_eq!(el.flow(), Flow::Overlay);

        let title = doc.query_all_in(modal, &Selector::tag("h2"))[0];
        assert_eq!(doc.element(title).unwrap().text(), "Ribbon Murukku — pouch");
        let meta = doc.query_all_in(modal, &Selector::class("modal-meta"))[0];
        assert_eq!(doc.element(meta).unwrap().text(), "250g • ₹100");
        assert!(doc.by_id(ORDER_ID).is_some());
        assert!(doc.by_id(CLOSE_ID).is_some());
    }

    #[test]
    fn reopening_replaces_content() {
        let (mut doc, modal) = modal_doc();
        let catalog = Catalog::default();
        let mut dialog = DetailModal::new();

        dialog.open(&mut doc, catalog.get(1).unwrap());
        dialog.open(&mut doc, catalog.get(4).unwrap());

        let titles = doc.query_all_in(modal, &Selector::tag("h2"));
        assert_eq!(titles.len(), 1);
        assert_eq!(dialog.product_id(), Some(4));
    }

    #[test]
    fn reopening_reuses_card_markup() {
        let (mut doc, modal) = modal_doc();
        let catalog = Catalog::default();
        let mut dialog = DetailModal::new();

        dialog.open(&mut doc, catalog.get(1).unwrap());
        let title = doc.query_all_in(modal, &Selector::tag("h2"))[0];
        let order = doc.by_id(ORDER_ID).unwrap();

        dialog.close(&mut doc);
        dialog.open(&mut doc, catalog.get(2).unwrap());

        assert_eq!(doc.query_all_in(modal, &Selector::tag("h2")), vec![title]);
        assert_eq!(doc.by_id(ORDER_ID), Some(order));
        assert_eq!(doc.element(title).unwrap().text(), "Ribbon Murukku — pouch");
        let image = doc.query_all_in(modal, &Selector::tag("img"))[0];
        assert_eq!(doc.element(image).unwrap().attr("alt"), Some("Ribbon Murukku — pouch"));
    }

    #[test]
    fn close_hides_modal() {
        let (mut doc, modal) = modal_doc();
        let mut dialog = DetailModal::new();
        dialog.open(&mut doc, Catalog::default().get(1).unwrap());

        dialog.close(&mut doc);

        let el = doc.element(modal).unwrap();
        assert!(!el.has_class(OPEN_CLASS));
        assert_eq!(el.attr("aria-hidden"), Some("true"));
        assert!(!dialog.is_open());
    }

    #[test]
    fn order_fires_once_per_opening() {
        let (mut doc, _) = modal_doc();
        let catalog = Catalog::default();
        let mut dialog = DetailModal::new();

        dialog.open(&mut doc, catalog.get(3).unwrap());
        assert_eq!(dialog.take_order(), Some(3));
        assert_eq!(dialog.take_order(), None);

        dialog.open(&mut doc, catalog.get(3).unwrap());
        assert_eq!(dialog.take_order(), Some(3));
    }

    #[test]
    fn missing_markup_is_noop() {
        let mut doc = Document::default();
        let mut dialog = DetailModal::new();

        assert!(!dialog.open(&mut doc, Catalog::default().get(1).unwrap()));
        dialog.close(&mut doc);
        assert!(!dialog.is_open());
    }
}
