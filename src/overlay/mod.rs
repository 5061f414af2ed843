//! Resize bars drawn over a hovered table, and the drag that moves them.
//!
//! [`ResizeOverlay`] is the host-independent controller. It works against
//! any [`TableDom`] and is driven by plain method calls, one per pointer
//! event. On wasm32 the [`TableResizer`] wires browser events and the drop
//! grace timer to it.
//!
//! Nothing is cached between events: the logical grid is rebuilt from the
//! document on every hover and every drop.

mod session;

#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod resizer;
#[cfg(target_arch = "wasm32")]
mod timer;

pub use session::{ActiveDrag, DragSession, DragState, DropOutcome, GraceTimer, GraceToken};

#[cfg(target_arch = "wasm32")]
pub use resizer::TableResizer;

use crate::dom::{build_grid, format_px, write_plan, DomMetrics, OverlayTemplate, TableDom};
use crate::layout::{compute_bars, plan_resize, BoundaryBar, ResizePlan};
use crate::types::{Axis, ResizeConfig};

/// A bar currently in the document
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnBar<E> {
    pub element: E,
    pub bar: BoundaryBar,
}

pub struct ResizeOverlay<D: TableDom> {
    dom: D,
    config: ResizeConfig,
    session: DragSession,
    hover_table: Option<D::Element>,
    bars: Vec<DrawnBar<D::Element>>,
    dragged: Option<D::Element>,
    blocker: Option<D::Element>,
}

impl<D: TableDom> ResizeOverlay<D> {
    pub fn new(dom: D, config: ResizeConfig) -> Self {
        let session = DragSession::new(config.drop_grace_ms);
        Self {
            dom,
            config,
            session,
            hover_table: None,
            bars: Vec::new(),
            dragged: None,
            blocker: None,
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn config(&self) -> &ResizeConfig {
        &self.config
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// Table the next drop applies to
    pub fn hover_table(&self) -> Option<&D::Element> {
        self.hover_table.as_ref()
    }

    pub fn bars(&self) -> &[DrawnBar<D::Element>] {
        &self.bars
    }

    pub fn blocker(&self) -> Option<&D::Element> {
        self.blocker.as_ref()
    }

    /// Pointer entered `target`.
    ///
    /// Outside a drag, the enclosing table (or `target` itself if it is a
    /// table) becomes the hover table and gets fresh bars. Returns whether
    /// bars were redrawn.
    pub fn hover(&mut self, target: &D::Element) -> bool {
        if self.session.is_dragging() {
            return false;
        }
        let Some(table) = self.dom.query_ancestor(target, "table") else {
            return false;
        };
        self.refresh_bars(&table);
        self.hover_table = Some(table);
        true
    }

    /// Remove every drawn bar
    pub fn clear_bars(&mut self) {
        for drawn in self.bars.drain(..) {
            self.dom.remove_element(&drawn.element);
        }
    }

    /// Redraw the bars of `table` from its current state
    pub fn refresh_bars(&mut self, table: &D::Element) {
        self.clear_bars();

        let bars = {
            let grid = build_grid(&self.dom, table);
            let metrics = DomMetrics::new(&self.dom);
            let table_rect = self.dom.measure(table);
            compute_bars(&grid, &metrics, table_rect, self.config.bar_thickness)
        };

        for bar in bars {
            let template = OverlayTemplate::bar(&bar, &self.config);
            match self.dom.create_overlay(&template) {
                Some(element) => self.bars.push(DrawnBar { element, bar }),
                None => log::warn!("could not create {:?} bar {}", bar.axis, bar.index),
            }
        }
        log::trace!("drew {} resize bars", self.bars.len());
    }

    /// Pointer pressed on `target`. Starts a drag if it is one of our bars.
    pub fn pointer_down(&mut self, target: &D::Element) -> bool {
        let Some(drawn) = self.bars.iter().find(|drawn| drawn.element == *target) else {
            return false;
        };
        let axis = drawn.bar.axis;
        let index = drawn.bar.index;
        let rect = self.dom.measure(&drawn.element);
        let initial = axis.pick(rect.x, rect.y);

        self.session.begin(axis, index, initial, self.dom.direction());
        self.dragged = Some(drawn.element.clone());
        if self.blocker.is_none() {
            self.blocker = self.dom.create_overlay(&OverlayTemplate::blocker());
        }
        log::debug!("drag start: {axis:?} boundary {index} at {initial}");
        true
    }

    /// Pointer moved over the drag surface. Returns the dragged bar's new
    /// position, after moving it.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Option<f32> {
        let position = self.session.pointer_move(x, y)?;
        let axis = self.session.active()?.axis;
        if let Some(bar) = &self.dragged {
            let property = match axis {
                Axis::Col => "left",
                Axis::Row => "top",
            };
            self.dom.set_style(bar, property, &format_px(position));
        }
        Some(position)
    }

    /// Pointer left the drag surface; the host schedules the returned timer
    pub fn pointer_out(&mut self) -> Option<GraceTimer> {
        self.session.pointer_out()
    }

    /// A grace timer fired
    pub fn grace_elapsed(&mut self, token: GraceToken) -> Option<DropOutcome> {
        if self.session.pending_grace() != Some(token) {
            return None;
        }
        let outcome = self.session.grace_elapsed(token);
        self.finish_drop(outcome)
    }

    /// Pointer released
    pub fn pointer_up(&mut self) -> Option<DropOutcome> {
        let outcome = self.session.pointer_up();
        self.finish_drop(outcome)
    }

    fn finish_drop(&mut self, outcome: Option<DropOutcome>) -> Option<DropOutcome> {
        if let Some(blocker) = self.blocker.take() {
            self.dom.remove_element(&blocker);
        }
        self.dragged = None;

        let outcome = outcome?;
        log::debug!(
            "drop: {:?} boundary {} moved {}",
            outcome.axis,
            outcome.index,
            outcome.delta
        );
        if let Some(table) = self.hover_table.clone() {
            self.adjust(outcome.axis, &table, outcome.delta, outcome.index);
            self.refresh_bars(&table);
        } else {
            log::warn!("drop without a hovered table");
        }
        Some(outcome)
    }

    /// Resize boundary `index` of `table` by `delta` and write the result
    pub fn adjust(
        &mut self,
        axis: Axis,
        table: &D::Element,
        delta: f32,
        index: usize,
    ) -> ResizePlan<D::Element> {
        let plan = {
            let grid = build_grid(&self.dom, table);
            let metrics = DomMetrics::new(&self.dom);
            let extent = self.dom.measure(table).extent(axis);
            plan_resize(
                &grid,
                axis,
                &metrics,
                extent,
                index,
                delta,
                self.config.min_size(axis),
            )
        };
        log::debug!("{axis:?} deltas {:?}", plan.deltas);
        write_plan(&mut self.dom, table, &plan);
        plan
    }

    /// Adjust column widths
    pub fn adjust_width(
        &mut self,
        table: &D::Element,
        delta: f32,
        index: usize,
    ) -> ResizePlan<D::Element> {
        self.adjust(Axis::Col, table, delta, index)
    }

    /// Adjust row heights
    pub fn adjust_height(
        &mut self,
        table: &D::Element,
        delta: f32,
        index: usize,
    ) -> ResizePlan<D::Element> {
        self.adjust(Axis::Row, table, delta, index)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::dom::{MemoryDom, NodeId, OverlayKind};
    use crate::types::Rect;

    /// 1x2 table with 50x20 cells at the origin
    fn overlay() -> (ResizeOverlay<MemoryDom>, NodeId, [NodeId; 2]) {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let table = dom.create_element("table", Some(body));
        dom.set_rect(table, Rect::new(0.0, 0.0, 100.0, 20.0));
        let tr = dom.create_element("tr", Some(table));
        let a = dom.create_element("td", Some(tr));
        let b = dom.create_element("td", Some(tr));
        dom.set_rect(a, Rect::new(0.0, 0.0, 50.0, 20.0));
        dom.set_rect(b, Rect::new(50.0, 0.0, 50.0, 20.0));
        (ResizeOverlay::new(dom, ResizeConfig::default()), table, [a, b])
    }

    #[test]
    fn test_hover_draws_bars() {
        let (mut overlay, table, [a, _]) = overlay();
        assert!(overlay.hover(&a));
        assert_eq!(overlay.hover_table(), Some(&table));
        // 1 row bar + 2 column bars
        assert_eq!(overlay.bars().len(), 3);

        assert!(overlay.hover(&a));
        assert_eq!(overlay.bars().len(), 3);
        assert_eq!(
            overlay.dom().elements_with_class("table-resize-bar").len(),
            3
        );
    }

    #[test]
    fn test_hover_outside_table_keeps_bars() {
        let (mut overlay, _, [a, _]) = overlay();
        overlay.hover(&a);
        let body = overlay.dom().body();
        assert!(!overlay.hover(&body));
        assert_eq!(overlay.bars().len(), 3);
    }

    #[test]
    fn test_pointer_down_on_non_bar() {
        let (mut overlay, _, [a, _]) = overlay();
        overlay.hover(&a);
        assert!(!overlay.pointer_down(&a));
        assert!(overlay.blocker().is_none());
    }

    #[test]
    fn test_column_drag_resizes_cells() {
        let (mut overlay, table, [a, b]) = overlay();
        overlay.hover(&a);
        let bar = overlay
            .bars()
            .iter()
            .find(|d| d.bar.axis == Axis::Col && d.bar.index == 0)
            .unwrap()
            .element;

        assert!(overlay.pointer_down(&bar));
        assert_eq!(overlay.dom().overlays(OverlayKind::Blocker).len(), 1);
        overlay.pointer_move(60.0, 5.0);
        assert_eq!(overlay.pointer_move(75.0, 5.0), Some(63.0));
        assert_eq!(overlay.dom().style(bar, "left"), Some("63px"));

        let outcome = overlay.pointer_up().unwrap();
        assert_eq!(outcome.delta, 15.0);

        let dom = overlay.dom();
        assert_eq!(dom.style(a, "width"), Some("65px"));
        assert_eq!(dom.style(b, "width"), Some("35px"));
        assert_eq!(dom.style(table, "width"), Some("100px"));
        assert!(dom.overlays(OverlayKind::Blocker).is_empty());
        assert!(!dom.is_attached(bar));
        assert_eq!(overlay.bars().len(), 3);
    }

    #[test]
    fn test_hover_ignored_while_dragging() {
        let (mut overlay, _, [a, _]) = overlay();
        overlay.hover(&a);
        let bar = overlay.bars()[0].element;
        overlay.pointer_down(&bar);
        assert!(!overlay.hover(&a));
        assert!(overlay.dom().is_attached(bar));
    }

    #[test]
    fn test_grace_drop() {
        let (mut overlay, _, [a, _]) = overlay();
        overlay.hover(&a);
        let bar = overlay.bars()[0].element;
        overlay.pointer_down(&bar);

        let stale = overlay.pointer_out().unwrap();
        let live = overlay.pointer_out().unwrap();
        assert_eq!(live.delay_ms, 200);
        assert_eq!(overlay.grace_elapsed(stale.token), None);
        assert!(overlay.blocker().is_some());

        let outcome = overlay.grace_elapsed(live.token).unwrap();
        assert_eq!(outcome.delta, 0.0);
        assert!(overlay.blocker().is_none());
        assert!(!overlay.session().is_dragging());
    }
}
