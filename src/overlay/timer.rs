//! Drop grace timer for `TableResizer`.
//!
//! At most one timer is scheduled at a time: scheduling clears the previous
//! browser timeout before setting a new one.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use super::resizer::{SharedState, TableResizer};
use super::GraceTimer;

impl TableResizer {
    pub(crate) fn schedule_grace_timer(state: &Rc<RefCell<SharedState>>, timer: GraceTimer) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        // Cancel any existing timer
        if let Some(timer_id) = s.grace_timer.take() {
            window.clear_timeout_with_handle(timer_id);
        }
        s.grace_token = Some(timer.token);

        if s.grace_closure.is_none() {
            let weak_state = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    TableResizer::handle_grace_elapsed(&state);
                }
            }) as Box<dyn FnMut()>);
            s.grace_closure = Some(closure);
        }
        let Some(callback) = s.grace_closure.as_ref() else {
            return;
        };
        let delay = i32::try_from(timer.delay_ms).unwrap_or(i32::MAX);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(id) => s.grace_timer = Some(id),
            Err(_) => s.grace_timer = None,
        }
    }

    pub(crate) fn cancel_grace_timer(state: &Rc<RefCell<SharedState>>) {
        let mut s = state.borrow_mut();
        s.grace_token = None;
        if let Some(timer_id) = s.grace_timer.take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(timer_id);
            }
        }
    }

    pub(crate) fn handle_grace_elapsed(state: &Rc<RefCell<SharedState>>) {
        let (callback, outcome) = {
            let mut s = state.borrow_mut();
            s.grace_timer = None;
            let Some(token) = s.grace_token.take() else {
                return;
            };
            let outcome = s.overlay.grace_elapsed(token);
            (s.resize_callback.clone(), outcome)
        };
        Self::invoke_resize_callback(callback, outcome);
    }
}
