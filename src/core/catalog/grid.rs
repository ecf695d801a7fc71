//=========================================================================
// Product Grid Rendering
//=========================================================================
//
// Rebuilds `#productGrid` from the catalog, one card per product:
//
//   article.card.product-card
//     ├─ div.thumb > img[src][alt=title]
//     ├─ h4 (title)
//     ├─ div.unit / p.desc
//     └─ div.meta
//          ├─ div.price "₹{price}"
//          └─ div.product-buttons (row)
//               ├─ button.btn-outline.details[data-id]
//               └─ button.btn-cta.order[data-title=<encoded title>]
//
// Clicks are not bound here; the page's action registry resolves them.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::product::{Catalog, Product};
use crate::core::dom::{Document, ElementId, ElementSpec, Flow};
use crate::core::messaging::encode_component;

//=== Constants ===========================================================

pub const GRID_ID: &str = "productGrid";

const THUMB_HEIGHT: f64 = 220.0;
const LINE_HEIGHT: f64 = 24.0;
const BUTTON_WIDTH: f64 = 110.0;
const BUTTON_HEIGHT: f64 = 40.0;

//=== Rendering ===========================================================

/// Replaces the grid's content with one card per product.
///
/// Returns the new cards in catalog order; empty if the grid is missing.
pub fn render_grid(doc: &mut Document, catalog: &Catalog) -> Vec<ElementId> {
    let Some(grid) = doc.by_id(GRID_ID) else {
        debug!("No #{} in document, skipping grid", GRID_ID);
        return Vec::new();
    };

    doc.clear_children(grid);
    let cards: Vec<ElementId> = catalog
        .products()
        .iter()
        .map(|product| render_card(doc, grid, product))
        .collect();

    debug!("Rendered {} product cards", cards.len());
    cards
}

fn render_card(doc: &mut Document, grid: ElementId, product: &Product) -> ElementId {
    let card = doc.append(grid, ElementSpec::new("article").class("card product-card"));

    let thumb = doc.append(
        card,
        ElementSpec::new("div").class("thumb").attr("aria-hidden", "true"),
    );
    doc.append(
        thumb,
        ElementSpec::new("img")
            .attr("src", product.image.as_str())
            .attr("alt", product.title.as_str())
            .attr("loading", "lazy")
            .size(0.0, THUMB_HEIGHT),
    );

    doc.append(card, ElementSpec::new("h4").text(product.title.as_str()).size(0.0, LINE_HEIGHT));
    doc.append(
        card,
        ElementSpec::new("div").class("unit").text(product.unit.as_str()).size(0.0, LINE_HEIGHT),
    );
    doc.append(
        card,
        ElementSpec::new("p").class("desc").text(product.description.as_str()).size(0.0, LINE_HEIGHT),
    );

    let meta = doc.append(card, ElementSpec::new("div").class("meta"));
    doc.append(
        meta,
        ElementSpec::new("div").class("price").text(product.price_label()).size(0.0, LINE_HEIGHT),
    );

    let buttons = doc.append(meta, ElementSpec::new("div").class("product-buttons").flow(Flow::Row));
    doc.append(
        buttons,
        ElementSpec::new("button")
            .class("btn-outline details")
            .attr("data-id", product.id.to_string())
            .text("Details")
            .size(BUTTON_WIDTH, BUTTON_HEIGHT),
    );
    doc.append(
        buttons,
        ElementSpec::new("button")
            .class("btn-cta order")
            .attr("data-title", encode_component(&product.title))
            .text("Order")
            .size(BUTTON_WIDTH, BUTTON_HEIGHT),
    );

    card
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dom::Selector;
    use crate::core::messaging::decode_component;

    fn doc_with_grid() -> (Document, ElementId) {
        let mut doc = Document::default();
        let root = doc.root();
        let grid = doc.append(root, ElementSpec::new("div").id(GRID_ID));
        (doc, grid)
    }

    #[test]
    fn renders_one_card_per_product() {
        let (mut doc, grid) = doc_with_grid();
        let cards = render_grid(&mut doc, &Catalog::default());

        assert_eq!(cards.len(), 4);
        assert_eq!(doc.query_all_in(grid, &Selector::class("product-card")), cards);
    }

    #[test]
    fn cards_expose_details_and_order_actions() {
        let (mut doc, _) = doc_with_grid();
        let catalog = Catalog::default();
        let cards = render_grid(&mut doc, &catalog);

        for (card, product) in cards.iter().zip(catalog.products()) {
            let details = doc.query_all_in(*card, &Selector::class("details"));
            let order = doc.query_all_in(*card, &Selector::class("order"));
            assert_eq!(details.len(), 1);
            assert_eq!(order.len(), 1);

            let id = doc.element(details[0]).unwrap().data("id").unwrap();
            assert_eq!(id, product.id.to_string());

            let title = doc.element(order[0]).unwrap().data("title").unwrap();
            assert_eq!(decode_component(title), product.title);
        }
    }

    #[test]
    fn card_shows_price_and_image() {
        let (mut doc, _) = doc_with_grid();
        let cards = render_grid(&mut doc, &Catalog::default());

        let last = cards[3];
        let price = doc.query_all_in(last, &Selector::class("price"))[0];
        assert_eq!(doc.element(price).unwrap().text(), "₹350");

        let img = doc.query_all_in(last, &Selector::tag("img"))[0];
        let img = doc.element(img).unwrap();
        assert_eq!(img.attr("src"), Some("10.png"));
        assert_eq!(img.attr("alt"), Some("Dry Fruit Laddoo — box"));
    }

    #[test]
    fn rerender_replaces_previous_cards() {
        let (mut doc, grid) = doc_with_grid();
        let first = render_grid(&mut doc, &Catalog::default());
        let second = render_grid(&mut doc, &Catalog::default());

        assert!(!doc.is_attached(first[0]));
        assert_eq!(doc.element(grid).unwrap().children(), second.as_slice());
    }

    #[test]
    fn missing_grid_is_noop() {
        let mut doc = Document::default();
        assert!(render_grid(&mut doc, &Catalog::default()).is_empty());
    }
}
