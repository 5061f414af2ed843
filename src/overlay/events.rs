//! Pointer event handlers for `TableResizer`.
//!
//! All methods here are `pub(crate)` helpers called from the listeners
//! installed in `resizer.rs`. JavaScript callbacks are invoked only after the
//! shared state borrow is released, so they may call back into the resizer.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use super::resizer::{SharedState, TableResizer};
use super::DropOutcome;

impl TableResizer {
    /// Returns whether a drag started
    pub(crate) fn internal_mouse_down(state: &Rc<RefCell<SharedState>>, target: &Element) -> bool {
        state.borrow_mut().overlay.pointer_down(target)
    }

    pub(crate) fn internal_mouse_over(state: &Rc<RefCell<SharedState>>, target: &Element) {
        let mut s = state.borrow_mut();
        // Bars sit outside the table; hovering one must not drop them
        if s.overlay.bars().iter().any(|drawn| drawn.element == *target) {
            return;
        }
        s.overlay.hover(target);
    }

    pub(crate) fn internal_mouse_move(
        state: &Rc<RefCell<SharedState>>,
        target: &Element,
        x: f32,
        y: f32,
    ) {
        if !Self::is_blocker(state, target) {
            return;
        }
        Self::cancel_grace_timer(state);
        state.borrow_mut().overlay.pointer_move(x, y);
    }

    pub(crate) fn internal_mouse_up(state: &Rc<RefCell<SharedState>>, target: &Element) {
        if !Self::is_blocker(state, target) {
            return;
        }
        Self::cancel_grace_timer(state);
        let (callback, outcome) = {
            let mut s = state.borrow_mut();
            let outcome = s.overlay.pointer_up();
            (s.resize_callback.clone(), outcome)
        };
        Self::invoke_resize_callback(callback, outcome);
    }

    pub(crate) fn internal_mouse_out(state: &Rc<RefCell<SharedState>>, target: &Element) {
        if !Self::is_blocker(state, target) {
            return;
        }
        let timer = state.borrow_mut().overlay.pointer_out();
        if let Some(timer) = timer {
            Self::schedule_grace_timer(state, timer);
        }
    }

    pub(crate) fn invoke_resize_callback(callback: Option<Function>, outcome: Option<DropOutcome>) {
        let (Some(callback), Some(outcome)) = (callback, outcome) else {
            return;
        };
        match serde_wasm_bindgen::to_value(&outcome) {
            Ok(payload) => {
                let _ = callback.call1(&JsValue::NULL, &payload);
            }
            Err(e) => log::warn!("could not serialize drop outcome: {e}"),
        }
    }

    fn is_blocker(state: &Rc<RefCell<SharedState>>, target: &Element) -> bool {
        state.borrow().overlay.blocker() == Some(target)
    }
}
