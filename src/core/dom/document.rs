//=========================================================================
// Document
//=========================================================================
//
// Arena-backed element tree with structural queries.
//
// Architecture:
//   elements: Vec<Element>   (indexed by ElementId, never compacted)
//   root: ElementId          (the `body` element, always attached)
//   viewport + layout_dirty  (lazy layout, see layout.rs)
//
// Removed elements stay in the arena flagged as detached so stale
// handles held by running animations can be detected with
// `is_attached()` instead of dangling.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::element::{Element, ElementId, ElementSpec};
use super::layout::{self, Flow, Size, Viewport};
use super::selector::{Selector, SelectorError};

//=== Document ============================================================

#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    root: ElementId,
    viewport: Viewport,
    layout_dirty: bool,
}

impl Document {
    //--- Construction -----------------------------------------------------

    /// Creates an empty document with a `body` root.
    pub fn new(viewport: Viewport) -> Self {
        let mut body = Element::new("body");
        body.attached = true;

        Self {
            elements: vec![body],
            root: ElementId(0),
            viewport,
            layout_dirty: true,
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    //--- Element Access ---------------------------------------------------

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    /// Returns true if the element exists and is part of the live tree.
    pub fn is_attached(&self, id: ElementId) -> bool {
        self.element(id).map(Element::is_attached).unwrap_or(false)
    }

    pub(crate) fn children_of(&self, id: ElementId) -> Vec<ElementId> {
        self.element(id)
            .map(|e| e.children().to_vec())
            .unwrap_or_default()
    }

    //--- Tree Mutation ----------------------------------------------------

    /// Adds a detached element to the arena.
    pub fn create_element(&mut self, spec: ElementSpec) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(spec.into_element());
        id
    }

    /// Creates an element from `spec` and appends it to `parent`.
    pub fn append(&mut self, parent: ElementId, spec: ElementSpec) -> ElementId {
        let id = self.create_element(spec);
        self.append_child(parent, id);
        id
    }

    /// Moves `child` (and its subtree) under `parent`.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent == child || self.element(parent).is_none() || self.element(child).is_none() {
            return;
        }

        self.detach_from_parent(child);

        let attached = self.is_attached(parent);
        if let Some(p) = self.element_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.element_mut(child) {
            c.parent = Some(parent);
        }
        self.set_subtree_attached(child, attached);
        self.layout_dirty = true;
    }

    /// Detaches `child` from its parent. The subtree is marked detached.
    pub fn remove_child(&mut self, child: ElementId) {
        if child == self.root {
            return;
        }
        self.detach_from_parent(child);
        self.set_subtree_attached(child, false);
        self.layout_dirty = true;
    }

    /// Detaches every child of `parent`.
    pub fn clear_children(&mut self, parent: ElementId) {
        for child in self.children_of(parent) {
            self.remove_child(child);
        }
    }

    /// Deep-copies `source` into a new detached subtree.
    pub fn clone_subtree(&mut self, source: ElementId) -> Option<ElementId> {
        let copy = self.element(source)?.detached_copy();
        let children = self.children_of(source);

        let id = ElementId(self.elements.len());
        self.elements.push(copy);

        for child in children {
            if let Some(child_copy) = self.clone_subtree(child) {
                self.append_child(id, child_copy);
            }
        }
        Some(id)
    }

    fn detach_from_parent(&mut self, child: ElementId) {
        let Some(parent) = self.element(child).and_then(Element::parent) else {
            return;
        };
        if let Some(p) = self.element_mut(parent) {
            p.children.retain(|&c| c != child);
        }
        if let Some(c) = self.element_mut(child) {
            c.parent = None;
        }
    }

    fn set_subtree_attached(&mut self, id: ElementId, attached: bool) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(el) = self.element_mut(current) {
                el.attached = attached;
                stack.extend(el.children.iter().copied());
            }
        }
    }

    //--- Presentation -----------------------------------------------------

    pub fn set_flow(&mut self, id: ElementId, flow: Flow) {
        if let Some(el) = self.element_mut(id) {
            if el.flow != flow {
                el.flow = flow;
                self.layout_dirty = true;
            }
        }
    }

    pub fn set_size(&mut self, id: ElementId, width: f64, height: f64) {
        if let Some(el) = self.element_mut(id) {
            el.intrinsic = Size::new(width, height);
            self.layout_dirty = true;
        }
    }

    /// Applies a horizontal translation as both a `transform` style and a
    /// layout offset.
    pub fn set_translate_x(&mut self, id: ElementId, px: f64) {
        if let Some(el) = self.element_mut(id) {
            el.translate_x = px;
            el.set_style("transform", format!("translateX({}px)", px));
            self.layout_dirty = true;
        }
    }

    //--- Queries ----------------------------------------------------------

    /// First attached element in document order matching `selector`.
    pub fn query(&self, selector: &Selector) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    /// All attached elements matching `selector`, in document order,
    /// including the root.
    pub fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        let mut found = Vec::new();
        self.walk(self.root, &mut |id, el| {
            if selector.matches(el) {
                found.push(id);
            }
        });
        found
    }

    /// Descendants of `root` matching `selector` (root itself excluded).
    pub fn query_all_in(&self, root: ElementId, selector: &Selector) -> Vec<ElementId> {
        let mut found = Vec::new();
        for child in self.children_of(root) {
            self.walk(child, &mut |id, el| {
                if selector.matches(el) {
                    found.push(id);
                }
            });
        }
        found
    }

    /// Parses `selector` and returns every match.
    pub fn select(&self, selector: &str) -> Result<Vec<ElementId>, SelectorError> {
        let selector: Selector = selector.parse()?;
        Ok(self.query_all(&selector))
    }

    /// Element whose `id` attribute equals `id`.
    pub fn by_id(&self, id: &str) -> Option<ElementId> {
        self.query(&Selector::id(id))
    }

    /// Nearest inclusive ancestor of `start` matching `selector`.
    pub fn closest(&self, start: ElementId, selector: &Selector) -> Option<ElementId> {
        let mut current = Some(start);
        while let Some(id) = current {
            let el = self.element(id)?;
            if selector.matches(el) {
                return Some(id);
            }
            current = el.parent();
        }
        None
    }

    /// Returns true if `node` is `ancestor` or lies inside it.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.element(id).and_then(Element::parent);
        }
        false
    }

    fn walk<F>(&self, start: ElementId, visit: &mut F)
    where
        F: FnMut(ElementId, &Element),
    {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let Some(el) = self.element(id) else { continue };
            if !el.is_attached() {
                continue;
            }
            visit(id, el);
            stack.extend(el.children().iter().rev().copied());
        }
    }

    //--- Viewport & Layout ------------------------------------------------

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport.width = width.max(0.0);
        self.viewport.height = height.max(0.0);
        self.layout_dirty = true;
        let clamped = self.clamp_scroll(self.viewport.scroll_y);
        self.viewport.scroll_y = clamped;
    }

    /// Scrolls to `y`, clamped to the scrollable range. Returns the applied offset.
    pub fn scroll_to(&mut self, y: f64) -> f64 {
        let y = self.clamp_scroll(y);
        if y != self.viewport.scroll_y {
            self.viewport.scroll_y = y;
            // Overlays follow the viewport
            self.layout_dirty = true;
        }
        y
    }

    pub fn scroll_by(&mut self, dy: f64) -> f64 {
        self.scroll_to(self.viewport.scroll_y + dy)
    }

    fn clamp_scroll(&mut self, y: f64) -> f64 {
        let max = (self.document_height() - self.viewport.height).max(0.0);
        y.clamp(0.0, max)
    }

    /// Total height of the laid-out document.
    pub fn document_height(&mut self) -> f64 {
        self.ensure_layout();
        self.element(self.root).map(|r| r.rect().height).unwrap_or(0.0)
    }

    pub fn mark_layout_dirty(&mut self) {
        self.layout_dirty = true;
    }

    /// Runs a layout pass if anything changed since the last one.
    pub fn ensure_layout(&mut self) {
        if self.layout_dirty {
            trace!("Layout pass ({} elements)", self.elements.len());
            self.layout_dirty = false;
            layout::layout(self);
        }
    }

    /// Topmost rendered element under a page-space point.
    ///
    /// Overlays are searched first since they paint above the flow.
    pub fn hit_test(&mut self, x: f64, y: f64) -> Option<ElementId> {
        self.ensure_layout();

        let mut overlays = Vec::new();
        let mut flow_hit = None;
        self.hit_walk(self.root, x, y, &mut overlays, &mut flow_hit);

        for overlay in overlays.into_iter().rev() {
            let mut nested = Vec::new();
            let mut hit = None;
            self.hit_walk(overlay, x, y, &mut nested, &mut hit);
            if hit.is_some() {
                return hit;
            }
        }
        flow_hit
    }

    fn hit_walk(
        &self,
        id: ElementId,
        x: f64,
        y: f64,
        overlays: &mut Vec<ElementId>,
        hit: &mut Option<ElementId>,
    ) {
        let Some(el) = self.element(id) else { return };
        if !el.is_attached() || el.flow() == Flow::None {
            return;
        }

        let visible = el.rect().contains(x, y) && el.clip().contains(x, y);
        if visible {
            *hit = Some(id);
        }

        for &child in el.children() {
            if self.element(child).map(|c| c.flow() == Flow::Overlay).unwrap_or(false) {
                overlays.push(child);
                continue;
            }
            self.hit_walk(child, x, y, overlays, hit);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
