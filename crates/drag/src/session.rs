//! Per-gesture drag state: hover reordering and drop commits.

use board::{Board, CardId, Lane};
use tracing::{debug, info};

/// Vertical extent of the hovered card's rendered box, in the same
/// coordinate space as the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardBounds {
    pub top: f64,
    pub height: f64,
}

impl CardBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Vertical midpoint used by the hover guard.
    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// A committed lane change, handed to the sync layer by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneChange {
    pub card_id: CardId,
    pub from: Lane,
    pub to: Lane,
}

/// State for one in-progress drag gesture.
///
/// Created on drag-start and consumed on drop or cancel; the session is
/// a plain value owned by the caller, there is no ambient drag context.
/// `drag_index` tracks the dragged card's current flat position and is
/// retargeted after every committed hover reorder so subsequent hovers
/// compare against the new position.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    card_id: CardId,
    source_lane: Lane,
    drag_index: usize,
}

impl DragSession {
    /// Start dragging the card at `index`. A stale index yields `None`
    /// so a bad drag-start can never poison the board.
    pub fn begin(board: &Board, index: usize) -> Option<Self> {
        let card = board.get(index)?;
        debug!(card_id = %card.id, index, lane = %card.lane, "drag started");
        Some(Self {
            card_id: card.id.clone(),
            source_lane: card.lane,
            drag_index: index,
        })
    }

    pub fn card_id(&self) -> &CardId {
        &self.card_id
    }

    pub fn source_lane(&self) -> Lane {
        self.source_lane
    }

    pub fn drag_index(&self) -> usize {
        self.drag_index
    }

    /// Hover over the card at `hover_index` with the pointer at
    /// `pointer_y`.
    ///
    /// Reorders the board only once the pointer crosses the hovered
    /// card's midpoint in the drag direction. A commit retargets the
    /// session to `hover_index`, so the same hover slot cannot commit
    /// twice. Returns whether a reorder was committed.
    pub fn hover(
        &mut self,
        board: &mut Board,
        hover_index: usize,
        pointer_y: f64,
        hovered: CardBounds,
    ) -> bool {
        if hover_index == self.drag_index {
            return false;
        }
        let Some(hovered_card) = board.get(hover_index) else {
            debug!(hover_index, "hover over stale index, ignoring");
            return false;
        };
        let lane = hovered_card.lane;
        let midpoint = hovered.midpoint();
        // Dragging downwards: wait until the pointer has reached the
        // midpoint. Dragging upwards: mirror image.
        if self.drag_index < hover_index && pointer_y < midpoint {
            return false;
        }
        if self.drag_index > hover_index && pointer_y > midpoint {
            return false;
        }
        board.move_card(self.drag_index, hover_index, lane);
        self.drag_index = hover_index;
        true
    }

    /// Drop the card. `target` is the lane of the column under the
    /// pointer, or `None` when the drop landed outside any column.
    /// Reorders already applied by hovering persist either way; only a
    /// changed lane produces a commit for the sync layer.
    pub fn complete(self, board: &mut Board, target: Option<Lane>) -> Option<LaneChange> {
        let Some(to) = target else {
            debug!(card_id = %self.card_id, "drop outside any column, keeping order only");
            return None;
        };
        if to == self.source_lane {
            return None;
        }
        board.set_card_lane(&self.card_id, to);
        info!(card_id = %self.card_id, from = %self.source_lane, to = %to, "card moved to new lane");
        Some(LaneChange {
            card_id: self.card_id,
            from: self.source_lane,
            to,
        })
    }

    /// Abort the gesture (escape key or an invalid drop surface). Hover
    /// reorders persist; no lane change is committed.
    pub fn cancel(self) {
        debug!(card_id = %self.card_id, "drag cancelled");
    }
}
