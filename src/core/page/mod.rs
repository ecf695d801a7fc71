//=========================================================================
// Storefront Page
//=========================================================================
//
// Owns the document and every page behaviour, and routes platform input
// to them.
//
// Architecture:
// ```text
//   PageInput ──▶ Page::handle_input
//                   ├─ Click       → hit_test → ActionRegistry → action
//                   ├─ PointerMoved→ hit_test → marquee hover
//                   ├─ Scroll      → viewport → order bar
//                   ├─ Key / Text  → focused field, modal
//                   └─ Resized     → viewport
//
//   Frame tick ──▶ Page::frame → AnimationEngine::on_frame
//
//   Actions that leave the page (links, alerts) are queued as
//   PageEffects and drained by the host with take_effects().
// ```
//
//=========================================================================

//=== Submodules ==========================================================

pub mod actions;
pub mod contact;
pub mod effects;
pub mod modal;
pub mod order_bar;
pub mod template;
pub mod theme;

pub use actions::{ActionMatch, ActionRegistry, ActionRole, MatchMode};
pub use contact::{ContactError, ContactForm};
pub use effects::{EffectHandler, LogEffectHandler, PageEffect, SystemEffectHandler};
pub use modal::DetailModal;
pub use order_bar::OrderBar;
pub use template::storefront_document;
pub use theme::{ConfyFlagStore, FlagStore, MemoryFlagStore, StoreError, ThemePreference, ThemeToggle};

//=== External Dependencies ===============================================

use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::config::StorefrontConfig;
use crate::core::animation::AnimationEngine;
use crate::core::catalog::{render_grid, Catalog};
use crate::core::dom::{Document, ElementId, Viewport};
use crate::core::input::{Key, PageInput};
use crate::core::messaging::{decode_component, MessagingLink};

//=== Constants ===========================================================

const HERO_IMAGE_ID: &str = "heroImg";
const LOGO_IMAGE_ID: &str = "logoImg";

//=== Page ================================================================

#[derive(Debug)]
pub struct Page {
    doc: Document,
    catalog: Catalog,
    link: MessagingLink,
    hero_image: String,
    logo_image: String,

    animations: AnimationEngine,
    actions: ActionRegistry,
    modal: DetailModal,
    order_bar: OrderBar,
    theme: ThemeToggle,

    focus: Option<ElementId>,
    pointer: Option<(f64, f64)>,
    effects: Vec<PageEffect>,
    initialized: bool,
}

impl Page {
    //--- Construction -----------------------------------------------------

    pub fn new(
        doc: Document,
        catalog: Catalog,
        config: &StorefrontConfig,
        flags: Box<dyn FlagStore>,
    ) -> Self {
        Self {
            doc,
            catalog,
            link: MessagingLink::new(config.phone_number.as_str(), config.channel_url.as_str()),
            hero_image: config.hero_image.clone(),
            logo_image: config.logo_image.clone(),
            animations: AnimationEngine::new(config.animation),
            actions: ActionRegistry::storefront(),
            modal: DetailModal::new(),
            order_bar: OrderBar::new(config.order_bar_threshold),
            theme: ThemeToggle::new(config.dark_mode_key.as_str(), flags),
            focus: None,
            pointer: None,
            effects: Vec::new(),
            initialized: false,
        }
    }

    /// Page over the default storefront template.
    pub fn storefront(config: &StorefrontConfig, catalog: Catalog, flags: Box<dyn FlagStore>) -> Self {
        let doc = storefront_document(config, Viewport::default());
        Self::new(doc, catalog, config, flags)
    }

    //--- init() -----------------------------------------------------------
    //
    // Wires every behaviour to the document. Runs once; later calls are
    // ignored. Missing elements only disable the behaviour that needs them.
    //
    pub fn init(&mut self, now_ms: f64) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;

        //--- Images ------------------------------------------------------
        for (id, src) in [(HERO_IMAGE_ID, &self.hero_image), (LOGO_IMAGE_ID, &self.logo_image)] {
            if let Some(el) = self.doc.by_id(id).and_then(|img| self.doc.element_mut(img)) {
                el.set_attr("src", src.as_str());
            }
        }

        //--- Grid & counters ---------------------------------------------
        let cards = render_grid(&mut self.doc, &self.catalog).len();
        let counters = self.animations.setup_counters(&mut self.doc);

        //--- Contact form, order bar, theme, modal -----------------------
        let has_form = ContactForm::form(&self.doc).is_some();
        self.order_bar.update(&mut self.doc);
        self.theme.init(&mut self.doc);
        self.modal.close(&mut self.doc);

        //--- Marquee & reveal --------------------------------------------
        let marquee = self.animations.setup_marquee(&mut self.doc);
        self.animations.schedule_reveal(&self.doc, now_ms);

        info!(
            "Page initialized: {} cards, {} counters, contact form: {}, marquee: {}",
            cards,
            counters,
            has_form,
            marquee.is_some()
        );
        true
    }

    //--- Input ------------------------------------------------------------

    pub fn handle_input(&mut self, input: PageInput) {
        match input {
            PageInput::Click { x, y } => self.click_at(x, y),
            PageInput::PointerMoved { x, y } => {
                self.pointer = Some((x, y));
                self.refresh_hover();
            }
            PageInput::PointerLeft => {
                self.pointer = None;
                self.animations.update_pointer(&self.doc, None);
            }
            PageInput::Scroll { dy } => {
                self.doc.scroll_by(dy);
                self.after_scroll();
            }
            PageInput::Key(key) => self.key(key),
            PageInput::Text(text) => self.type_text(&text),
            PageInput::Resized { width, height } => {
                self.doc.set_viewport_size(width, height);
                self.after_scroll();
            }
        }
    }

    /// Dispatches a click at a viewport position.
    pub fn click_at(&mut self, x: f64, y: f64) {
        let page_y = y + self.doc.viewport().scroll_y;
        match self.doc.hit_test(x, page_y) {
            Some(target) => self.click(target),
            None => self.focus = None,
        }
    }

    /// Dispatches a click on `target` through the action registry.
    pub fn click(&mut self, target: ElementId) {
        let Some(ActionMatch { role, element }) = self.actions.resolve(&self.doc, target) else {
            self.focus = None;
            return;
        };
        if role != ActionRole::FocusField {
            self.focus = None;
        }
        debug!("Action {:?} on {:?}", role, element);

        match role {
            ActionRole::Details => {
                if let Some(id) = self.data(element, "id").and_then(|id| id.parse().ok()) {
                    self.open_details(id);
                }
            }
            ActionRole::Order => {
                if let Some(title) = self.data(element, "title") {
                    let title = decode_component(&title);
                    self.send(&format!("Hi, I want to order: {}", title));
                }
            }
            ActionRole::ModalOrder => self.order_from_modal(),
            ActionRole::ModalClose | ActionRole::ModalOverlay => self.close_details(),
            ActionRole::OrderNow => self.send(order_bar::ORDER_NOW_MESSAGE),
            ActionRole::DarkToggle => {
                self.theme.toggle(&mut self.doc);
            }
            ActionRole::ContactSubmit => {
                if actions::in_contact_form(&self.doc, element) {
                    self.submit_contact();
                }
            }
            ActionRole::ContactReset => ContactForm::reset(&mut self.doc),
            ActionRole::AnchorLink => {
                if let Some(href) = self.doc.element(element).and_then(|a| a.attr("href")) {
                    let href = href.to_string();
                    self.scroll_to_anchor(&href);
                }
            }
            ActionRole::FocusField => self.focus = Some(element),
        }
    }

    fn key(&mut self, key: Key) {
        match key {
            Key::Escape => self.close_details(),
            Key::Enter => match self.focus {
                Some(field) if self.is_textarea(field) => ContactForm::insert_text(&mut self.doc, field, "\n"),
                Some(field) if actions::in_contact_form(&self.doc, field) => self.submit_contact(),
                _ => {}
            },
            Key::Backspace => {
                if let Some(field) = self.focus {
                    ContactForm::delete_backward(&mut self.doc, field);
                }
            }
            Key::Tab => self.focus = ContactForm::next_field(&self.doc, self.focus),
        }
    }

    fn type_text(&mut self, text: &str) {
        let Some(field) = self.focus else {
            trace!("Text typed with no focused field");
            return;
        };
        let printable: String = text.chars().filter(|c| !c.is_control()).collect();
        if !printable.is_empty() {
            ContactForm::insert_text(&mut self.doc, field, &printable);
        }
    }

    fn after_scroll(&mut self) {
        self.order_bar.update(&mut self.doc);
        self.refresh_hover();
    }

    /// Re-evaluates what lies under the pointer; content moves under a
    /// still pointer when the page scrolls.
    fn refresh_hover(&mut self) {
        let Some((x, y)) = self.pointer else {
            return;
        };
        let page_y = y + self.doc.viewport().scroll_y;
        let hit = self.doc.hit_test(x, page_y);
        self.animations.update_pointer(&self.doc, hit);
    }

    //--- Actions ----------------------------------------------------------

    /// Opens the detail modal for product `id`. Unknown ids are ignored.
    pub fn open_details(&mut self, id: u32) -> bool {
        let Some(product) = self.catalog.get(id) else {
            debug!("No product with id {}", id);
            return false;
        };
        self.modal.open(&mut self.doc, product)
    }

    pub fn close_details(&mut self) {
        self.modal.close(&mut self.doc);
    }

    fn order_from_modal(&mut self) {
        let Some(product) = self.modal.take_order().and_then(|id| self.catalog.get(id)) else {
            return;
        };
        let message = format!("I would like to order: {} (1)", product.title);
        self.send(&message);
    }

    /// Validates the contact form and sends it, or raises an alert.
    pub fn submit_contact(&mut self) {
        if ContactForm::form(&self.doc).is_none() {
            return;
        }
        match ContactForm::submit(&self.doc) {
            Ok(message) => self.send(&message),
            Err(e) => self.effects.push(PageEffect::Alert(e.to_string())),
        }
    }

    /// Scrolls so the first element matching `href` (usually "#id") sits
    /// at the top of the viewport. Returns false if `href` is not a valid
    /// selector or matches nothing.
    pub fn scroll_to_anchor(&mut self, href: &str) -> bool {
        let target = match self.doc.select(href) {
            Ok(matches) => matches.first().copied(),
            Err(e) => {
                debug!("Anchor {} is not a selector: {}", href, e);
                return false;
            }
        };
        let Some(target) = target else {
            debug!("Anchor {} has no target", href);
            return false;
        };
        self.doc.ensure_layout();
        let top = self.doc.element(target).map(|el| el.rect().y).unwrap_or(0.0);
        self.doc.scroll_to(top);
        self.after_scroll();
        true
    }

    fn send(&mut self, message: &str) {
        let url = self.link.url_for(message);
        info!("Opening messaging link for {} chars", message.len());
        self.effects.push(PageEffect::OpenLink(url));
    }

    //--- Frame ------------------------------------------------------------

    /// Runs one paint cycle.
    pub fn frame(&mut self, now_ms: f64) {
        self.animations.on_frame(&mut self.doc, now_ms);
    }

    /// Drains the effects queued since the last call.
    pub fn take_effects(&mut self) -> Vec<PageEffect> {
        std::mem::take(&mut self.effects)
    }

    //--- Queries ----------------------------------------------------------

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn animations(&self) -> &AnimationEngine {
        &self.animations
    }

    pub fn modal(&self) -> &DetailModal {
        &self.modal
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme.preference()
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focus
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn data(&self, element: ElementId, key: &str) -> Option<String> {
        self.doc.element(element)?.data(key).map(str::to_string)
    }

    fn is_textarea(&self, element: ElementId) -> bool {
        self.doc.element(element).is_some_and(|el| el.tag() == "textarea")
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::animation::{TARGET_ATTR, VISIBLE_CLASS};
    use crate::core::catalog::GRID_ID;
    use crate::core::dom::{Rect, Selector};
    use crate::core::messaging::encode_component;

    const WA_PREFIX: &str = "https://wa.me/9035371303?text=";

    fn page() -> Page {
        page_with(MemoryFlagStore::new())
    }

    fn page_with(store: MemoryFlagStore) -> Page {
        let mut page = Page::storefront(&StorefrontConfig::default(), Catalog::default(), Box::new(store));
        assert!(page.init(0.0));
        page
    }

    fn rect(page: &mut Page, el: ElementId) -> Rect {
        let doc = page.document_mut();
        doc.ensure_layout();
        doc.element(el).unwrap().rect()
    }

    /// Scrolls `el` into view if needed and clicks its centre.
    fn click(page: &mut Page, el: ElementId) {
        let r = rect(page, el);
        let view = page.document().viewport();
        if r.y < view.scroll_y || r.bottom() > view.scroll_y + view.height {
            page.handle_input(PageInput::Scroll { dy: r.y - view.scroll_y });
        }
        let r = rect(page, el);
        let scroll_y = page.document().viewport().scroll_y;
        page.handle_input(PageInput::Click {
            x: r.x + r.width / 2.0,
            y: r.y + r.height / 2.0 - scroll_y,
        });
    }

    fn link(message: &str) -> PageEffect {
        PageEffect::OpenLink(format!("{}{}", WA_PREFIX, encode_component(message)))
    }

    fn first(page: &Page, selector: &Selector) -> ElementId {
        page.document().query(selector).unwrap()
    }

    //=====================================================================
    // Initialization Tests
    //=====================================================================

    #[test]
    fn init_wires_every_behaviour() {
        let page = page();
        let doc = page.document();

        let grid = doc.by_id(GRID_ID).unwrap();
        assert_eq!(doc.element(grid).unwrap().children().len(), 4);

        let hero = doc.by_id(HERO_IMAGE_ID).unwrap();
        assert_eq!(doc.element(hero).unwrap().attr("src"), Some("1.png"));

        for counter in doc.query_all(&Selector::attr(TARGET_ATTR)) {
            assert_eq!(doc.element(counter).unwrap().text(), "0");
        }

        assert_eq!(page.animations().marquee().tracks().len(), 1);
        assert_eq!(doc.query_all(&Selector::class("review-card")).len(), 8);

        let bar = doc.by_id(order_bar::BAR_ID).unwrap();
        assert!(doc.element(bar).unwrap().has_class(order_bar::HIDDEN_CLASS));
    }

    #[test]
    fn init_runs_once() {
        let mut page = page();
        assert!(!page.init(10.0));
        assert_eq!(page.document().query_all(&Selector::class("review-card")).len(), 8);
    }

    #[test]
    fn persisted_dark_mode_applies_at_init() {
        let page = page_with(MemoryFlagStore::new().with_flag("jp_dark", "true"));
        let doc = page.document();

        assert_eq!(page.theme(), ThemePreference::Dark);
        assert!(doc.element(doc.root()).unwrap().has_class(theme::DARK_CLASS));
    }

    #[test]
    fn cards_reveal_on_stagger_timers() {
        let mut page = page();
        page.frame(0.0);
        page.frame(200.0);

        let doc = page.document();
        for card in doc.query_all(&Selector::class("product-card")) {
            assert!(doc.element(card).unwrap().has_class(VISIBLE_CLASS));
        }
    }

    //=====================================================================
    // Action Tests
    //=====================================================================

    #[test]
    fn grid_order_opens_messaging_link() {
        let mut page = page();
        let order = first(&page, &Selector::class("order"));

        click(&mut page, order);

        assert_eq!(
            page.take_effects(),
            vec![link("Hi, I want to order: Garlic Murukku — pouch")]
        );
        assert!(page.take_effects().is_empty());
    }

    #[test]
    fn details_open_modal_and_order_fires_once() {
        let mut page = page();
        let details = page.document().query_all(&Selector::class("details"))[1];

        click(&mut page, details);
        assert_eq!(page.modal().product_id(), Some(2));

        let order = page.document().by_id(modal::ORDER_ID).unwrap();
        click(&mut page, order);
        click(&mut page, order);

        assert_eq!(
            page.take_effects(),
            vec![link("I would like to order: Ribbon Murukku — pouch (1)")]
        );
    }

    #[test]
    fn modal_closes_by_button_overlay_and_escape() {
        let mut page = page();

        page.open_details(1);
        let close = page.document().by_id(modal::CLOSE_ID).unwrap();
        click(&mut page, close);
        assert!(!page.modal().is_open());

        page.open_details(1);
        let overlay = page.document().by_id(modal::MODAL_ID).unwrap();
        page.click(overlay);
        assert!(!page.modal().is_open());

        page.open_details(1);
        page.handle_input(PageInput::Key(Key::Escape));
        assert!(!page.modal().is_open());
    }

    #[test]
    fn click_inside_modal_card_keeps_it_open() {
        let mut page = page();
        page.open_details(3);

        let title = page
            .document()
            .query_all_in(page.document().by_id(modal::CARD_ID).unwrap(), &Selector::tag("h2"))[0];
        click(&mut page, title);

        assert!(page.modal().is_open());
    }

    #[test]
    fn unknown_product_is_ignored() {
        let mut page = page();
        assert!(!page.open_details(99));
        assert!(!page.modal().is_open());
    }

    #[test]
    fn order_now_and_dark_toggle() {
        let mut page = page();

        let order_now = page.document().by_id(order_bar::ORDER_NOW_ID).unwrap();
        click(&mut page, order_now);
        assert_eq!(page.take_effects(), vec![link(order_bar::ORDER_NOW_MESSAGE)]);

        let toggle = page.document().by_id(theme::TOGGLE_ID).unwrap();
        click(&mut page, toggle);
        assert_eq!(page.theme(), ThemePreference::Dark);
        click(&mut page, toggle);
        assert_eq!(page.theme(), ThemePreference::Light);
    }

    #[test]
    fn anchor_scrolls_to_section() {
        let mut page = page();
        let nav = first(&page, &Selector::tag("a").and_attr_eq("href", "#products"));

        click(&mut page, nav);

        let products = page.document().by_id("products").unwrap();
        let top = rect(&mut page, products).y;
        assert_eq!(page.document().viewport().scroll_y, top);

        let bar = page.document().by_id(order_bar::BAR_ID).unwrap();
        assert!(!page.document().element(bar).unwrap().has_class(order_bar::HIDDEN_CLASS));
        assert!(!page.scroll_to_anchor("#missing"));
    }

    #[test]
    fn malformed_anchor_leaves_scroll_alone() {
        let mut page = page();
        assert!(page.scroll_to_anchor("#reviews"));
        let before = page.document().viewport().scroll_y;

        assert!(!page.scroll_to_anchor("#"));
        assert!(!page.scroll_to_anchor("#top section"));

        assert_eq!(page.document().viewport().scroll_y, before);
    }

    //=====================================================================
    // Contact Form Tests
    //=====================================================================

    fn type_into(page: &mut Page, id: &str, text: &str) {
        let field = page.document().by_id(id).unwrap();
        click(page, field);
        assert_eq!(page.focused(), Some(field));
        page.handle_input(PageInput::Text(text.to_string()));
    }

    #[test]
    fn contact_form_sends_composed_message() {
        let mut page = page();
        type_into(&mut page, "name", "Asha");
        type_into(&mut page, "phone", "98450x");
        page.handle_input(PageInput::Key(Key::Backspace));
        type_into(&mut page, "message", "Two packs");

        let submit = first(&page, &Selector::tag("button").and_attr_eq("type", "submit"));
        click(&mut page, submit);

        assert_eq!(
            page.take_effects(),
            vec![link("Order/Message from Asha (98450): Two packs")]
        );
        assert_eq!(page.focused(), None);
    }

    #[test]
    fn empty_contact_form_alerts() {
        let mut page = page();
        type_into(&mut page, "name", "Asha");
        page.handle_input(PageInput::Key(Key::Enter));

        assert_eq!(
            page.take_effects(),
            vec![PageEffect::Alert(ContactError::EmptyFields.to_string())]
        );
    }

    #[test]
    fn tab_cycles_fields_and_enter_in_textarea_adds_newline() {
        let mut page = page();
        let message = page.document().by_id("message").unwrap();

        page.handle_input(PageInput::Key(Key::Tab));
        page.handle_input(PageInput::Key(Key::Tab));
        page.handle_input(PageInput::Key(Key::Tab));
        assert_eq!(page.focused(), Some(message));

        page.handle_input(PageInput::Text("a".into()));
        page.handle_input(PageInput::Key(Key::Enter));
        page.handle_input(PageInput::Text("b\u{7}".into()));

        assert_eq!(page.document().element(message).unwrap().value(), "a\nb");
        assert!(page.take_effects().is_empty());
    }

    #[test]
    fn reset_clears_fields() {
        let mut page = page();
        type_into(&mut page, "name", "Asha");

        let reset = page.document().by_id(contact::RESET_ID).unwrap();
        click(&mut page, reset);

        let name = page.document().by_id("name").unwrap();
        assert_eq!(page.document().element(name).unwrap().value(), "");
    }

    #[test]
    fn text_without_focus_is_dropped() {
        let mut page = page();
        page.handle_input(PageInput::Text("lost".into()));

        let name = page.document().by_id("name").unwrap();
        assert_eq!(page.document().element(name).unwrap().value(), "");
    }

    //=====================================================================
    // Pointer Tests
    //=====================================================================

    #[test]
    fn hovering_reviews_pauses_marquee() {
        let mut page = page();
        let card = first(&page, &Selector::class("review-card"));
        let track = page.animations().marquee().tracks()[0].element;

        click(&mut page, card);
        let r = rect(&mut page, card);
        let scroll_y = page.document().viewport().scroll_y;
        page.handle_input(PageInput::PointerMoved {
            x: r.x + 10.0,
            y: r.y + 10.0 - scroll_y,
        });
        assert!(!page.animations().marquee().track(track).unwrap().is_running());

        page.handle_input(PageInput::PointerLeft);
        assert!(page.animations().marquee().track(track).unwrap().is_running());
    }

    #[test]
    fn resize_keeps_scroll_in_range() {
        let mut page = page();
        page.handle_input(PageInput::Scroll { dy: 1.0e6 });
        let max_before = page.document().viewport().scroll_y;

        page.handle_input(PageInput::Resized {
            width: 1280.0,
            height: 1.0e6,
        });

        assert!(max_before > 0.0);
        assert_eq!(page.document().viewport().scroll_y, 0.0);
    }
}
