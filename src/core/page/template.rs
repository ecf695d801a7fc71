//=========================================================================
// Storefront Template
//=========================================================================
//
// Default document containing every element the page behaviours expect.
//
//   body
//     ├─ header      logo, nav anchors, #darkToggle
//     ├─ #hero       hero image, headline, call to action
//     ├─ #stats      [data-target] counters
//     ├─ #products   #productGrid (filled at init)
//     ├─ #reviews    clipping frame > .review-track > .review-card*
//     ├─ #contact    #contactForm (#name, #phone, #message, submit, reset)
//     ├─ footer
//     ├─ #orderBar   #orderNow
//     └─ #modal      #modalCard (hidden until opened)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::contact::{FORM_ID, RESET_ID};
use super::modal::{CARD_ID, MODAL_ID};
use super::order_bar::{BAR_ID, ORDER_NOW_ID};
use super::theme::TOGGLE_ID;
use crate::config::StorefrontConfig;
use crate::core::animation::TARGET_ATTR;
use crate::core::catalog::GRID_ID;
use crate::core::dom::{Document, ElementId, ElementSpec, Flow, Viewport};

//=== Metrics =============================================================

const HEADER_HEIGHT: f64 = 64.0;
const HEADING_HEIGHT: f64 = 48.0;
const FIELD_HEIGHT: f64 = 40.0;
const STAT_SIZE: (f64, f64) = (240.0, 120.0);
const REVIEW_SIZE: (f64, f64) = (360.0, 160.0);

//=== Template ============================================================

/// Builds the storefront document for `config` at the given viewport.
pub fn storefront_document(config: &StorefrontConfig, viewport: Viewport) -> Document {
    let mut doc = Document::new(viewport);
    let body = doc.root();

    header(&mut doc, body);
    hero(&mut doc, body);
    stats(&mut doc, body, config);
    products(&mut doc, body);
    reviews(&mut doc, body, config);
    contact(&mut doc, body);

    doc.append(body, ElementSpec::new("footer").text("Made fresh every week").size(0.0, 120.0));

    let bar = doc.append(body, ElementSpec::new("div").id(BAR_ID).class("order-bar").flow(Flow::Row));
    doc.append(bar, ElementSpec::new("span").text("Craving something crunchy?").size(320.0, HEADER_HEIGHT));
    doc.append(
        bar,
        ElementSpec::new("button").id(ORDER_NOW_ID).class("btn-cta").text("Order now").size(160.0, HEADER_HEIGHT),
    );

    let modal = doc.append(
        body,
        ElementSpec::new("div")
            .id(MODAL_ID)
            .class("modal")
            .attr("aria-hidden", "true")
            .flow(Flow::None),
    );
    doc.append(modal, ElementSpec::new("div").id(CARD_ID).class("modal-card"));

    doc
}

fn header(doc: &mut Document, body: ElementId) {
    let header = doc.append(body, ElementSpec::new("header").class("site-header").flow(Flow::Row));
    doc.append(header, ElementSpec::new("img").id("logoImg").attr("alt", "logo").size(HEADER_HEIGHT, HEADER_HEIGHT));

    for (href, label) in [("#products", "Products"), ("#reviews", "Reviews"), ("#contact", "Contact")] {
        doc.append(
            header,
            ElementSpec::new("a").attr("href", href).text(label).size(120.0, HEADER_HEIGHT),
        );
    }

    doc.append(
        header,
        ElementSpec::new("button")
            .id(TOGGLE_ID)
            .attr("aria-pressed", "false")
            .text("🌙")
            .size(HEADER_HEIGHT, HEADER_HEIGHT),
    );
}

fn hero(doc: &mut Document, body: ElementId) {
    let hero = doc.append(body, ElementSpec::new("section").id("hero").class("hero"));
    doc.append(hero, ElementSpec::new("img").id("heroImg").attr("alt", "").size(0.0, 360.0));
    doc.append(hero, ElementSpec::new("h1").text("Traditional snacks, made at home").size(0.0, 64.0));
    doc.append(
        hero,
        ElementSpec::new("a")
            .class("btn-cta")
            .attr("href", "#products")
            .text("Shop now")
            .size(160.0, FIELD_HEIGHT),
    );
}

fn stats(doc: &mut Document, body: ElementId, config: &StorefrontConfig) {
    let section = doc.append(body, ElementSpec::new("section").id("stats").class("stats").flow(Flow::Row));
    for stat in &config.stats {
        let item = doc.append(section, ElementSpec::new("div").class("stat").size(STAT_SIZE.0, STAT_SIZE.1));
        doc.append(
            item,
            ElementSpec::new("strong")
                .class("counter")
                .attr(TARGET_ATTR, stat.target.as_str())
                .text(stat.target.as_str())
                .size(0.0, 72.0),
        );
        doc.append(item, ElementSpec::new("span").text(stat.label.as_str()).size(0.0, 24.0));
    }
}

fn products(doc: &mut Document, body: ElementId) {
    let section = doc.append(body, ElementSpec::new("section").id("products"));
    doc.append(section, ElementSpec::new("h2").text("Our products").size(0.0, HEADING_HEIGHT));
    doc.append(section, ElementSpec::new("div").id(GRID_ID).class("grid"));
}

fn reviews(doc: &mut Document, body: ElementId, config: &StorefrontConfig) {
    let section = doc.append(body, ElementSpec::new("section").id("reviews").class("reviews").clips_overflow());
    doc.append(section, ElementSpec::new("h2").text("What customers say").size(0.0, HEADING_HEIGHT));

    let track = doc.append(section, ElementSpec::new("div").class("review-track").flow(Flow::Row));
    for review in &config.testimonials {
        let card = doc.append(
            track,
            ElementSpec::new("div").class("review-card").size(REVIEW_SIZE.0, REVIEW_SIZE.1),
        );
        doc.append(card, ElementSpec::new("p").text(review.quote.as_str()).size(0.0, 96.0));
        doc.append(card, ElementSpec::new("span").text(review.author.as_str()).size(0.0, 24.0));
    }
}

fn contact(doc: &mut Document, body: ElementId) {
    let section = doc.append(body, ElementSpec::new("section").id("contact"));
    doc.append(section, ElementSpec::new("h2").text("Contact us").size(0.0, HEADING_HEIGHT));

    let form = doc.append(section, ElementSpec::new("form").id(FORM_ID));
    doc.append(
        form,
        ElementSpec::new("input").id("name").attr("type", "text").attr("placeholder", "Name").size(0.0, FIELD_HEIGHT),
    );
    doc.append(
        form,
        ElementSpec::new("input").id("phone").attr("type", "tel").attr("placeholder", "Phone").size(0.0, FIELD_HEIGHT),
    );
    doc.append(
        form,
        ElementSpec::new("textarea").id("message").attr("placeholder", "Message").size(0.0, 120.0),
    );

    let buttons = doc.append(form, ElementSpec::new("div").class("form-actions").flow(Flow::Row));
    doc.append(
        buttons,
        ElementSpec::new("button")
            .class("btn-cta")
            .attr("type", "submit")
            .text("Send on WhatsApp")
            .size(200.0, FIELD_HEIGHT),
    );
    doc.append(
        buttons,
        ElementSpec::new("button")
            .id(RESET_ID)
            .class("btn-outline")
            .attr("type", "button")
            .text("Reset")
            .size(120.0, FIELD_HEIGHT),
    );
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dom::Selector;

    #[test]
    fn template_contains_every_hook() {
        let doc = storefront_document(&StorefrontConfig::default(), Viewport::default());

        for id in [
            "hero", "heroImg", "logoImg", TOGGLE_ID, GRID_ID, FORM_ID, "name", "phone", "message",
            RESET_ID, BAR_ID, ORDER_NOW_ID, MODAL_ID, CARD_ID,
        ] {
            assert!(doc.by_id(id).is_some(), "missing #{}", id);
        }
    }

    #[test]
    fn counters_and_reviews_follow_config() {
        let config = StorefrontConfig::default();
        let doc = storefront_document(&config, Viewport::default());

        assert_eq!(doc.query_all(&Selector::attr(TARGET_ATTR)).len(), config.stats.len());
        assert_eq!(doc.query_all(&Selector::class("review-card")).len(), config.testimonials.len());
    }

    #[test]
    fn modal_starts_hidden() {
        let mut doc = storefront_document(&StorefrontConfig::default(), Viewport::default());
        let modal = doc.by_id(MODAL_ID).unwrap();
        doc.ensure_layout();

        let el = doc.element(modal).unwrap();
        assert_eq!(el.flow(), Flow::None);
        assert!(el.rect().is_empty());
    }

    #[test]
    fn review_track_overflows_its_frame() {
        let mut doc = storefront_document(&StorefrontConfig::default(), Viewport::new(800.0, 600.0));
        let track = doc.query(&Selector::class("review-track")).unwrap();
        doc.ensure_layout();

        let el = doc.element(track).unwrap();
        assert_eq!(el.scroll_width(), 4.0 * REVIEW_SIZE.0);
        assert_eq!(el.rect().width, 800.0);
    }
}
