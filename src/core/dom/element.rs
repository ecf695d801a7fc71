//=========================================================================
// Element
//=========================================================================
//
// A single node of the page document.
//
// Elements carry structural data (tag, classes, attributes), content
// (text, input value), presentation (inline styles, flow, size) and the
// box computed by the last layout pass. Tree links and layout results are
// owned by the Document; only content and classes are mutated directly.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

//=== Internal Dependencies ===============================================

use super::layout::{Flow, Rect, Size};

//=== ElementId ===========================================================

/// Stable handle to an element in a [`super::Document`].
///
/// Handles are never reused, so a handle to a removed element stays
/// invalid rather than pointing at a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

//=== Element =============================================================

#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    styles: BTreeMap<String, String>,

    pub(crate) flow: Flow,
    pub(crate) intrinsic: Size,
    pub(crate) translate_x: f64,
    pub(crate) clips_overflow: bool,

    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) attached: bool,

    pub(crate) rect: Rect,
    pub(crate) clip: Rect,
    pub(crate) scroll_width: f64,
}

impl Element {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
            styles: BTreeMap::new(),
            flow: Flow::Block,
            intrinsic: Size::default(),
            translate_x: 0.0,
            clips_overflow: false,
            parent: None,
            children: Vec::new(),
            attached: false,
            rect: Rect::default(),
            clip: Rect::UNBOUNDED,
            scroll_width: 0.0,
        }
    }

    //--- Structure --------------------------------------------------------

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Value of the `id` attribute.
    pub fn dom_id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    //--- Classes ----------------------------------------------------------

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Adds a class. Returns true if the class was not present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Removes a class. Returns true if the class was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        before != self.classes.len()
    }

    /// Flips a class and returns whether it is now present.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.remove_class(class) {
            false
        } else {
            self.classes.push(class.to_string());
            true
        }
    }

    //--- Attributes -------------------------------------------------------

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.remove(name)
    }

    /// `data-*` attribute lookup (`data("id")` reads `data-id`).
    pub fn data(&self, key: &str) -> Option<&str> {
        self.attributes.get(&format!("data-{}", key)).map(String::as_str)
    }

    //--- Content ----------------------------------------------------------

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Current value of a form field.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub(crate) fn value_mut(&mut self) -> &mut String {
        &mut self.value
    }

    //--- Presentation -----------------------------------------------------

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        self.styles.insert(property.to_string(), value.into());
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn intrinsic_size(&self) -> Size {
        self.intrinsic
    }

    pub fn translate_x(&self) -> f64 {
        self.translate_x
    }

    pub fn clips_overflow(&self) -> bool {
        self.clips_overflow
    }

    //--- Layout Results ---------------------------------------------------

    /// Box from the last layout pass, in page coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Region ancestors allow this element to paint into.
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Total width of the element's content (may exceed its box).
    pub fn scroll_width(&self) -> f64 {
        self.scroll_width
    }

    /// Copy of the element with tree links and layout results reset.
    pub(crate) fn detached_copy(&self) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            attached: false,
            rect: Rect::default(),
            clip: Rect::UNBOUNDED,
            scroll_width: 0.0,
            ..self.clone()
        }
    }
}

//=== ElementSpec =========================================================

/// Declarative description of an element, used to build document trees.
///
/// ```
/// use storefront_engine::core::dom::{Document, ElementSpec, Viewport};
///
/// let mut doc = Document::new(Viewport::default());
/// let root = doc.root();
/// let hero = doc.append(root, ElementSpec::new("section").id("hero").size(0.0, 480.0));
/// assert_eq!(doc.by_id("hero"), Some(hero));
/// ```
#[derive(Debug, Clone)]
pub struct ElementSpec {
    element: Element,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            element: Element::new(tag),
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.element.set_attr("id", id);
        self
    }

    pub fn class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.element.add_class(class);
        }
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.element.set_attr(name, value);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.element.set_text(text);
        self
    }

    pub fn flow(mut self, flow: Flow) -> Self {
        self.element.flow = flow;
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.element.intrinsic = Size::new(width, height);
        self
    }

    pub fn clips_overflow(mut self) -> Self {
        self.element.clips_overflow = true;
        self
    }

    pub(crate) fn into_element(self) -> Element {
        self.element
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
