//! `TableResizer`: the overlay exported to JavaScript.
//!
//! All browser listeners live on the editable root. Bars and the drag
//! blocker are children of the root, so their events bubble up to it and
//! are told apart by target.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, MouseEvent};

use super::{GraceToken, ResizeOverlay};
use crate::dom::WebDom;
use crate::types::{Axis, ResizeConfig};

/// Shared state that can be accessed by event handlers
pub(crate) struct SharedState {
    pub(crate) overlay: ResizeOverlay<WebDom>,
    pub(crate) resize_callback: Option<Function>,
    pub(crate) grace_timer: Option<i32>,
    pub(crate) grace_token: Option<GraceToken>,
    pub(crate) grace_closure: Option<Closure<dyn FnMut()>>,
}

/// Resize bars for every table under an editable root
#[wasm_bindgen]
pub struct TableResizer {
    state: Rc<RefCell<SharedState>>,
    root: HtmlElement,
    closures: Vec<(&'static str, Closure<dyn FnMut(MouseEvent)>)>,
}

#[wasm_bindgen]
impl TableResizer {
    /// Attach to `root` (usually the editor body).
    ///
    /// `config` is an optional plain object, e.g. `{ minWidth: 20 }`; missing
    /// fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(root: HtmlElement, config: JsValue) -> Result<TableResizer, JsValue> {
        console_error_panic_hook::set_once();

        let config: ResizeConfig = if config.is_undefined() || config.is_null() {
            ResizeConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid resize config: {e}")))?
        };
        let dom = WebDom::new(root.clone())?;

        let state = Rc::new(RefCell::new(SharedState {
            overlay: ResizeOverlay::new(dom, config),
            resize_callback: None,
            grace_timer: None,
            grace_token: None,
            grace_closure: None,
        }));

        let mut closures: Vec<(&'static str, Closure<dyn FnMut(MouseEvent)>)> = Vec::new();

        // Mouse down (drag start on a bar)
        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                if let Some(target) = event_target(&event) {
                    if Self::internal_mouse_down(&state, &target) {
                        event.prevent_default();
                    }
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            closures.push(("mousedown", closure));
        }

        // Mouse over (hover table)
        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                if let Some(target) = event_target(&event) {
                    Self::internal_mouse_over(&state, &target);
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            closures.push(("mouseover", closure));
        }

        // Mouse move (drag)
        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                if let Some(target) = event_target(&event) {
                    Self::internal_mouse_move(
                        &state,
                        &target,
                        event.client_x() as f32,
                        event.client_y() as f32,
                    );
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            closures.push(("mousemove", closure));
        }

        // Mouse up (drop)
        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                if let Some(target) = event_target(&event) {
                    Self::internal_mouse_up(&state, &target);
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            closures.push(("mouseup", closure));
        }

        // Mouse out (delayed drop)
        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                if let Some(target) = event_target(&event) {
                    Self::internal_mouse_out(&state, &target);
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            closures.push(("mouseout", closure));
        }

        for (name, closure) in &closures {
            root.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .ok();
        }

        log::debug!("table resizer attached");
        Ok(TableResizer {
            state,
            root,
            closures,
        })
    }

    /// Called after every drop with `{ axis, index, delta }`
    #[wasm_bindgen(js_name = "setResizeCallback")]
    pub fn set_resize_callback(&mut self, callback: Function) {
        self.state.borrow_mut().resize_callback = Some(callback);
    }

    /// Remove all resize bars
    pub fn clear(&mut self) {
        self.state.borrow_mut().overlay.clear_bars();
    }

    /// Redraw the bars of `table`
    pub fn refresh(&mut self, table: Element) {
        self.state.borrow_mut().overlay.refresh_bars(&table);
    }

    #[wasm_bindgen(js_name = "isDragging")]
    pub fn is_dragging(&self) -> bool {
        self.state.borrow().overlay.session().is_dragging()
    }

    /// Resize column boundary `index` of `table` by `delta` pixels
    #[wasm_bindgen(js_name = "adjustWidth")]
    pub fn adjust_width(&mut self, table: Element, delta: f32, index: usize) {
        self.state
            .borrow_mut()
            .overlay
            .adjust(Axis::Col, &table, delta, index);
    }

    /// Resize row boundary `index` of `table` by `delta` pixels
    #[wasm_bindgen(js_name = "adjustHeight")]
    pub fn adjust_height(&mut self, table: Element, delta: f32, index: usize) {
        self.state
            .borrow_mut()
            .overlay
            .adjust(Axis::Row, &table, delta, index);
    }

    /// Detach every listener and remove the bars
    pub fn destroy(&mut self) {
        for (name, closure) in self.closures.drain(..) {
            let _ = self
                .root
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
        Self::cancel_grace_timer(&self.state);
        let mut s = self.state.borrow_mut();
        s.overlay.clear_bars();
        s.grace_closure = None;
    }
}

/// Element an event was dispatched to
fn event_target(event: &MouseEvent) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}
