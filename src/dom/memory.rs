//! In-memory document.
//!
//! Elements live in an arena and never reflow: a box only moves when its
//! rectangle is set explicitly, or when `left` / `top` are written on an
//! absolutely positioned overlay, like dragging a bar in a browser.
//!
//! Removed overlays give their slot back, so redrawing bars over and over
//! does not grow the arena. Handles carry a generation: a handle to a
//! removed overlay stays detached even after its slot is reused.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{OverlayKind, OverlayTemplate, TableDom};
use crate::length::{parse_length, Length};
use crate::types::{Direction, Rect};

/// Handle of an element in a [`MemoryDom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    rect: Rect,
    styles: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    overlay: Option<OverlayKind>,
    generation: u32,
}

impl Node {
    fn new(tag: &str, parent: Option<NodeId>, generation: u32) -> Self {
        Self {
            generation,
            tag: tag.to_ascii_lowercase(),
            parent,
            children: Vec::new(),
            rect: Rect::default(),
            styles: BTreeMap::new(),
            attributes: BTreeMap::new(),
            overlay: None,
        }
    }
}

/// Arena-backed document with a `<body>` root
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    /// Slots of removed overlays, ready for reuse
    free: Vec<usize>,
    direction: Direction,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("body", None, 0)],
            free: Vec::new(),
            direction: Direction::Ltr,
        }
    }

    /// The root element; overlays are appended here
    pub fn body(&self) -> NodeId {
        NodeId {
            index: 0,
            generation: 0,
        }
    }

    /// Arena slots in use or free; removed overlays are recycled
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.index)
            .filter(|node| node.generation == id.generation)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.index)
            .filter(|node| node.generation == id.generation)
    }

    /// A fresh node in a recycled slot if there is one, else at the end
    fn allocate(&mut self, tag: &str, parent: Option<NodeId>) -> NodeId {
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.nodes.get_mut(index) {
                let generation = slot.generation;
                *slot = Node::new(tag, parent, generation);
                return NodeId { index, generation };
            }
        }
        let id = NodeId {
            index: self.nodes.len(),
            generation: 0,
        };
        self.nodes.push(Node::new(tag, parent, 0));
        id
    }

    /// Append a new `tag` element to `parent` (or leave it detached)
    pub fn create_element(&mut self, tag: &str, parent: Option<NodeId>) -> NodeId {
        let id = self.allocate(tag, parent);
        if let Some(parent) = parent.and_then(|p| self.node_mut(p)) {
            parent.children.push(id);
        }
        id
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        if let Some(node) = self.node_mut(id) {
            node.rect = rect;
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|node| node.tag.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Inline style value without copying
    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.node(id)
            .and_then(|node| node.styles.get(property))
            .map(String::as_str)
    }

    /// Attribute value without copying
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)
            .and_then(|node| node.attributes.get(name))
            .map(String::as_str)
    }

    /// Whether `id` is still reachable from the body
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.body() {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Attached overlay elements of `kind`, in creation order
    pub fn overlays(&self, kind: OverlayKind) -> Vec<NodeId> {
        self.children(self.body())
            .iter()
            .copied()
            .filter(|&id| self.node(id).and_then(|n| n.overlay) == Some(kind))
            .collect()
    }

    /// Attached elements carrying `class`
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| NodeId {
                index,
                generation: node.generation,
            })
            .filter(|&id| self.is_attached(id))
            .filter(|&id| {
                self.attribute(id, "class")
                    .is_some_and(|value| value.split_whitespace().any(|c| c == class))
            })
            .collect()
    }

    fn children_tagged(&self, id: NodeId, tags: &[&str]) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.tag(child).is_some_and(|tag| tags.contains(&tag)))
            .collect()
    }
}

impl TableDom for MemoryDom {
    type Element = NodeId;

    fn measure(&self, element: &NodeId) -> Rect {
        self.node(*element)
            .map(|node| node.rect)
            .unwrap_or_default()
    }

    fn get_style(&self, element: &NodeId, property: &str) -> Option<String> {
        self.style(*element, property)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn set_style(&mut self, element: &NodeId, property: &str, value: &str) {
        let Some(node) = self.node_mut(*element) else {
            return;
        };
        node.styles.insert(property.to_string(), value.to_string());

        if node.overlay.is_some() {
            match (property, parse_length(value)) {
                ("left", Some(Length::Px(x))) => node.rect.x = x,
                ("top", Some(Length::Px(y))) => node.rect.y = y,
                _ => {}
            }
        }
    }

    fn get_attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.attribute(*element, name).map(str::to_string)
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(*element) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn clear_attribute(&mut self, element: &NodeId, name: &str) {
        if let Some(node) = self.node_mut(*element) {
            node.attributes.remove(name);
        }
    }

    fn create_overlay(&mut self, template: &OverlayTemplate) -> Option<NodeId> {
        let id = self.create_element("div", Some(self.body()));
        for (property, value) in template.style_declarations() {
            self.set_style(&id, property, &value);
        }
        for (name, value) in template.attributes() {
            self.set_attribute(&id, name, &value);
        }
        if !template.class.is_empty() {
            self.set_attribute(&id, "class", &template.class);
        }
        let node = self.node_mut(id)?;
        node.overlay = Some(template.kind);
        node.rect = template.rect;
        Some(id)
    }

    fn remove_element(&mut self, element: &NodeId) {
        let Some(parent) = self.parent(*element) else {
            return;
        };
        if let Some(parent) = self.node_mut(parent) {
            parent.children.retain(|child| child != element);
        }
        let Some(node) = self.node_mut(*element) else {
            return;
        };
        node.parent = None;
        if node.overlay.is_some() {
            // Stale handles to this overlay must not match the next tenant
            node.generation = node.generation.wrapping_add(1);
            node.styles.clear();
            node.attributes.clear();
            node.overlay = None;
            self.free.push(element.index);
        }
    }

    fn query_ancestor(&self, element: &NodeId, tag: &str) -> Option<NodeId> {
        let mut current = Some(*element);
        while let Some(id) = current {
            if self.tag(id).is_some_and(|t| t.eq_ignore_ascii_case(tag)) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    fn table_rows(&self, table: &NodeId) -> Vec<(NodeId, Vec<NodeId>)> {
        let mut rows = Vec::new();
        for child in self.children(*table).iter().copied() {
            match self.tag(child) {
                Some("tr") => rows.push(child),
                Some("thead" | "tbody" | "tfoot") => {
                    rows.extend(self.children_tagged(child, &["tr"]));
                }
                _ => {}
            }
        }
        rows.into_iter()
            .map(|row| (row, self.children_tagged(row, &["td", "th"])))
            .collect()
    }

    fn direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::types::Axis;

    #[test]
    fn test_table_rows_through_sections() {
        let mut dom = MemoryDom::new();
        let table = dom.create_element("TABLE", Some(dom.body()));
        let head = dom.create_element("thead", Some(table));
        let tr0 = dom.create_element("tr", Some(head));
        let th = dom.create_element("th", Some(tr0));
        let tr1 = dom.create_element("tr", Some(table));
        let td = dom.create_element("td", Some(tr1));
        dom.create_element("span", Some(tr1));

        let rows = dom.table_rows(&table);
        assert_eq!(rows, vec![(tr0, vec![th]), (tr1, vec![td])]);
        assert_eq!(dom.query_ancestor(&td, "table"), Some(table));
        assert_eq!(dom.query_ancestor(&table, "table"), Some(table));
        assert_eq!(dom.query_ancestor(&td, "thead"), None);
    }

    #[test]
    fn test_overlay_lifecycle() {
        let mut dom = MemoryDom::new();
        let template = OverlayTemplate {
            kind: OverlayKind::Bar(Axis::Row),
            rect: Rect::new(0.0, 18.0, 100.0, 4.0),
            index: Some(0),
            cursor: Some("row-resize"),
            class: "bar bar-row".to_string(),
            visible: false,
        };
        let bar = dom.create_overlay(&template).unwrap();

        assert_eq!(dom.measure(&bar), template.rect);
        assert_eq!(dom.attribute(bar, "data-row"), Some("0"));
        assert_eq!(dom.elements_with_class("bar-row"), vec![bar]);
        assert_eq!(dom.overlays(OverlayKind::Bar(Axis::Row)), vec![bar]);

        dom.set_style(&bar, "top", "30px");
        assert_eq!(dom.measure(&bar).y, 30.0);

        dom.remove_element(&bar);
        assert!(!dom.is_attached(bar));
        assert!(dom.elements_with_class("bar").is_empty());
    }

    #[test]
    fn test_cells_do_not_reflow() {
        let mut dom = MemoryDom::new();
        let td = dom.create_element("td", Some(dom.body()));
        dom.set_rect(td, Rect::new(0.0, 0.0, 50.0, 20.0));
        dom.set_style(&td, "left", "30px");
        assert_eq!(dom.measure(&td).x, 0.0);
        assert_eq!(dom.get_style(&td, "left"), Some("30px".to_string()));
        assert_eq!(dom.get_style(&td, "width"), None);
    }

    #[test]
    fn test_removed_overlay_slots_are_reused() {
        let mut dom = MemoryDom::new();
        let template = OverlayTemplate::blocker();
        let first = dom.create_overlay(&template).unwrap();
        let slots = dom.slot_count();

        for _ in 0..100 {
            let current = dom.overlays(OverlayKind::Blocker);
            for id in current {
                dom.remove_element(&id);
            }
            dom.create_overlay(&template).unwrap();
        }
        assert_eq!(dom.slot_count(), slots);

        // The first handle still refers to the removed overlay
        assert!(!dom.is_attached(first));
        assert_eq!(dom.style(first, "position"), None);
        assert_eq!(dom.overlays(OverlayKind::Blocker).len(), 1);
        assert_ne!(dom.overlays(OverlayKind::Blocker), vec![first]);
    }
}
