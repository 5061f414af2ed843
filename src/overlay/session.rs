//! Drag session state machine.
//!
//! ```text
//! Idle --begin--> Dragging --pointer_up--------------------> Idle
//!                    |  ^                                     ^
//!        pointer_out |  | pointer_move (cancels the timer)    |
//!                    v  |                                     |
//!             grace timer pending --grace_elapsed(current)----+
//! ```
//!
//! The session owns every piece of mutable drag state: which boundary is
//! held, where its bar started, where it is now, and the last pointer
//! coordinate. It does no I/O. Hosts feed pointer events in and act on the
//! returned values.

use serde::Serialize;

use crate::types::{Axis, Direction};

/// Identifies one scheduled grace timer.
///
/// Only the most recently issued token can end a drag; older ones are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraceToken(u64);

/// A grace timer the host should schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraceTimer {
    pub token: GraceToken,
    pub delay_ms: u32,
}

/// State of a drag in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    pub axis: Axis,
    /// Boundary index carried by the dragged bar
    pub index: usize,
    /// Bar position when the drag started
    pub initial: f32,
    /// Bar position now
    pub current: f32,
    /// Pointer coordinate on the drag axis at the previous move
    pub last_pointer: Option<f32>,
    pub direction: Direction,
}

impl ActiveDrag {
    /// Signed size change for the unit before the boundary.
    ///
    /// Columns in right-to-left content grow when the bar moves left.
    pub fn delta(&self) -> f32 {
        match (self.axis, self.direction) {
            (Axis::Col, Direction::Rtl) => self.initial - self.current,
            _ => self.current - self.initial,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// Result of a completed drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DropOutcome {
    pub axis: Axis,
    pub index: usize,
    pub delta: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    state: DragState,
    pending_grace: Option<GraceToken>,
    next_token: u64,
    grace_ms: u32,
}

impl DragSession {
    pub fn new(grace_ms: u32) -> Self {
        Self {
            state: DragState::Idle,
            pending_grace: None,
            next_token: 0,
            grace_ms,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        match &self.state {
            DragState::Dragging(drag) => Some(drag),
            DragState::Idle => None,
        }
    }

    /// Grace timer still waiting to fire, if any
    pub fn pending_grace(&self) -> Option<GraceToken> {
        self.pending_grace
    }

    /// Start dragging the bar for boundary `index`, currently at `initial`.
    ///
    /// A drag already in progress is abandoned without a drop.
    pub fn begin(&mut self, axis: Axis, index: usize, initial: f32, direction: Direction) {
        if self.is_dragging() {
            log::warn!("drag started while another drag was active; discarding it");
        }
        self.pending_grace = None;
        self.state = DragState::Dragging(ActiveDrag {
            axis,
            index,
            initial,
            current: initial,
            last_pointer: None,
            direction,
        });
    }

    /// Follow the pointer, returning the bar's new position.
    ///
    /// The bar moves by the pointer travel since the previous move; the first
    /// move only records where the pointer is. Any pending grace timer is
    /// cancelled since the pointer is back on the drag surface.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Option<f32> {
        self.pending_grace = None;
        let DragState::Dragging(drag) = &mut self.state else {
            return None;
        };

        let pointer = drag.axis.pick(x, y);
        let travel = drag.last_pointer.map_or(0.0, |last| pointer - last);
        drag.last_pointer = Some(pointer);
        drag.current += travel;
        Some(drag.current)
    }

    /// The pointer left the drag surface.
    ///
    /// Returns the timer to schedule. It replaces any earlier one, so at most
    /// one timer is ever live.
    pub fn pointer_out(&mut self) -> Option<GraceTimer> {
        if !self.is_dragging() {
            return None;
        }
        self.next_token = self.next_token.wrapping_add(1);
        let token = GraceToken(self.next_token);
        self.pending_grace = Some(token);
        Some(GraceTimer {
            token,
            delay_ms: self.grace_ms,
        })
    }

    /// A grace timer fired. Drops only if `token` is still the live timer.
    pub fn grace_elapsed(&mut self, token: GraceToken) -> Option<DropOutcome> {
        if self.pending_grace != Some(token) {
            return None;
        }
        self.finish()
    }

    /// Pointer released: end the drag
    pub fn pointer_up(&mut self) -> Option<DropOutcome> {
        self.finish()
    }

    fn finish(&mut self) -> Option<DropOutcome> {
        self.pending_grace = None;
        match std::mem::take(&mut self.state) {
            DragState::Dragging(drag) => Some(DropOutcome {
                axis: drag.axis,
                index: drag.index,
                delta: drag.delta(),
            }),
            DragState::Idle => None,
        }
    }
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_DROP_GRACE_MS)
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

    #[test]
    fn test_idle_ignores_pointer() {
        let mut session = DragSession::default();
        assert_eq!(session.pointer_move(10.0, 10.0), None);
        assert_eq!(session.pointer_out(), None);
        assert_eq!(session.pointer_up(), None);
        assert_eq!(session.state(), &DragState::Idle);
    }

    #[test]
    fn test_move_is_incremental() {
        let mut session = DragSession::default();
        session.begin(Axis::Col, 0, 48.0, Direction::Ltr);

        // First move is the baseline
        assert_eq!(session.pointer_move(200.0, 5.0), Some(48.0));
        assert_eq!(session.pointer_move(210.0, 50.0), Some(58.0));
        assert_eq!(session.pointer_move(205.0, 0.0), Some(53.0));

        let outcome = session.pointer_up().unwrap();
        assert_eq!(outcome.delta, 5.0);
        assert_eq!(outcome.index, 0);
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_row_drag_follows_y() {
        let mut session = DragSession::default();
        session.begin(Axis::Row, 1, 38.0, Direction::Rtl);
        session.pointer_move(0.0, 100.0);
        session.pointer_move(500.0, 112.0);
        assert_eq!(session.pointer_up().unwrap().delta, 12.0);
    }

    #[test]
    fn test_rtl_column_delta_is_mirrored() {
        let mut session = DragSession::default();
        session.begin(Axis::Col, 0, 100.0, Direction::Rtl);
        session.pointer_move(300.0, 0.0);
        session.pointer_move(280.0, 0.0);
        assert_eq!(session.pointer_up().unwrap().delta, 20.0);
    }

    #[test]
    fn test_stale_grace_timer_is_ignored() {
        let mut session = DragSession::new(150);
        session.begin(Axis::Col, 2, 0.0, Direction::Ltr);

        let first = session.pointer_out().unwrap();
        let second = session.pointer_out().unwrap();
        assert_eq!(second.delay_ms, 150);
        assert_ne!(first.token, second.token);
        assert_eq!(session.pending_grace(), Some(second.token));

        assert_eq!(session.grace_elapsed(first.token), None);
        assert!(session.is_dragging());
        assert!(session.grace_elapsed(second.token).is_some());
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_move_cancels_grace_timer() {
        let mut session = DragSession::default();
        session.begin(Axis::Row, 0, 0.0, Direction::Ltr);
        let timer = session.pointer_out().unwrap();
        session.pointer_move(0.0, 3.0);
        assert_eq!(session.pending_grace(), None);
        assert_eq!(session.grace_elapsed(timer.token), None);
        assert!(session.is_dragging());
    }
}
