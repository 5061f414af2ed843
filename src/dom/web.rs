//! The live browser document, through `web-sys`.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlTableElement, HtmlTableRowElement};

use super::{OverlayTemplate, TableDom};
use crate::error::{Result, TablegripError};
use crate::types::{Direction, Rect};

/// [`TableDom`] over the editable root of a page.
///
/// Overlays are appended to `root`, and its `dir` attribute decides the
/// writing direction.
pub struct WebDom {
    document: Document,
    root: HtmlElement,
}

impl WebDom {
    pub fn new(root: HtmlElement) -> Result<Self> {
        let document = root
            .owner_document()
            .ok_or_else(|| TablegripError::Dom("root element has no document".to_string()))?;
        Ok(Self { document, root })
    }

    /// Use the page's `<body>` as root
    pub fn from_body() -> Result<Self> {
        let body = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.body())
            .ok_or_else(|| TablegripError::Dom("no document body".to_string()))?;
        Self::new(body)
    }

    pub fn root(&self) -> &HtmlElement {
        &self.root
    }

    fn scroll_offset() -> (f64, f64) {
        web_sys::window()
            .map(|window| {
                (
                    window.scroll_x().unwrap_or(0.0),
                    window.scroll_y().unwrap_or(0.0),
                )
            })
            .unwrap_or((0.0, 0.0))
    }
}

impl TableDom for WebDom {
    type Element = Element;

    /// Page coordinates, so positions survive scrolling
    #[allow(clippy::cast_possible_truncation)]
    fn measure(&self, element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        let (scroll_x, scroll_y) = Self::scroll_offset();
        Rect::new(
            (rect.left() + scroll_x) as f32,
            (rect.top() + scroll_y) as f32,
            rect.width() as f32,
            rect.height() as f32,
        )
    }

    fn get_style(&self, element: &Element, property: &str) -> Option<String> {
        element
            .dyn_ref::<HtmlElement>()
            .and_then(|el| el.style().get_property_value(property).ok())
            .filter(|value| !value.is_empty())
    }

    fn set_style(&mut self, element: &Element, property: &str, value: &str) {
        if let Some(el) = element.dyn_ref::<HtmlElement>() {
            let _ = el.style().set_property(property, value);
        }
    }

    fn get_attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&mut self, element: &Element, name: &str, value: &str) {
        let _ = element.set_attribute(name, value);
    }

    fn clear_attribute(&mut self, element: &Element, name: &str) {
        let _ = element.remove_attribute(name);
    }

    fn create_overlay(&mut self, template: &OverlayTemplate) -> Option<Element> {
        let element = self.document.create_element("div").ok()?;
        let html = element.dyn_ref::<HtmlElement>()?;
        let style = html.style();
        for (property, value) in template.style_declarations() {
            let _ = style.set_property(property, &value);
        }
        for (name, value) in template.attributes() {
            let _ = element.set_attribute(name, &value);
        }
        if !template.class.is_empty() {
            element.set_class_name(&template.class);
        }
        self.root.append_child(&element).ok()?;
        Some(element)
    }

    fn remove_element(&mut self, element: &Element) {
        element.remove();
    }

    fn query_ancestor(&self, element: &Element, tag: &str) -> Option<Element> {
        element.closest(tag).ok().flatten()
    }

    fn table_rows(&self, table: &Element) -> Vec<(Element, Vec<Element>)> {
        let Some(table) = table.dyn_ref::<HtmlTableElement>() else {
            return Vec::new();
        };
        let rows = table.rows();
        (0..rows.length())
            .filter_map(|i| rows.item(i))
            .filter_map(|row| {
                let cells = row.dyn_ref::<HtmlTableRowElement>()?.cells();
                let cells = (0..cells.length()).filter_map(|i| cells.item(i)).collect();
                Some((row, cells))
            })
            .collect()
    }

    fn direction(&self) -> Direction {
        Direction::from_dir_attribute(self.root.get_attribute("dir").as_deref())
    }
}
