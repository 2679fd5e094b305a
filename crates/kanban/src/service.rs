//! Page-level composition: board state + drag sessions + background sync.

use std::sync::Arc;

use board::{Board, Lane};
use drag::{CardBounds, DragSession, LaneChange};
use remote::{StatusSyncClient, SyncError};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::notification::NotificationService;

/// Owns the board and wires drag gestures to the backend sync.
///
/// All board mutation happens through `&mut self` on the caller's
/// thread; only dispatched status requests run in the background, and
/// nothing ever blocks the gesture on the network. In-flight requests
/// for different cards are not ordered relative to each other, and two
/// rapid lane changes to the same card race without a sequencing token.
pub struct KanbanService {
    board: Board,
    sync: Arc<StatusSyncClient>,
    notifications: NotificationService,
}

impl KanbanService {
    pub fn new(sync: StatusSyncClient, notifications: NotificationService) -> Self {
        Self {
            board: Board::default(),
            sync: Arc::new(sync),
            notifications,
        }
    }

    /// Seed the board directly, bypassing the initial fetch.
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Initial data fetch: replace the board with the backend's cards.
    pub async fn load(&mut self) -> Result<(), SyncError> {
        let cards = self.sync.fetch_cards().await?;
        info!(count = cards.len(), "board loaded");
        self.board.replace(cards);
        Ok(())
    }

    /// Drag-start on the card at `index`.
    pub fn begin_drag(&self, index: usize) -> Option<DragSession> {
        DragSession::begin(&self.board, index)
    }

    /// Continuous hover during a gesture; reorders for visual feedback
    /// and never talks to the network.
    pub fn hover(
        &mut self,
        session: &mut DragSession,
        hover_index: usize,
        pointer_y: f64,
        hovered: CardBounds,
    ) -> bool {
        session.hover(&mut self.board, hover_index, pointer_y, hovered)
    }

    /// Drop: commit the lane optimistically, then dispatch the status
    /// sync without blocking the caller. The handle is returned for
    /// callers that want to observe completion; dropping it leaves the
    /// request running.
    pub fn complete_drag(
        &mut self,
        session: DragSession,
        target: Option<Lane>,
    ) -> Option<JoinHandle<()>> {
        let change = session.complete(&mut self.board, target)?;
        Some(self.dispatch_sync(change))
    }

    /// Cancelled gesture: hover reorders persist, nothing is synced.
    pub fn cancel_drag(&self, session: DragSession) {
        session.cancel();
    }

    fn dispatch_sync(&self, change: LaneChange) -> JoinHandle<()> {
        let title = self
            .board
            .find(&change.card_id)
            .map(|c| c.title.clone())
            .unwrap_or_else(|| change.card_id.to_string());
        let sync = self.sync.clone();
        let notifications = self.notifications.clone();
        tokio::spawn(async move {
            if let Err(e) = sync.sync_status(&change.card_id, change.to).await {
                // Optimistic state stays: the board is not rolled back,
                // the user is told instead. It can diverge from the
                // server until the next full reload.
                warn!(card_id = %change.card_id, error = %e, "status sync failed");
                notifications.error(
                    "Update failed",
                    format!("Could not save the new status for \"{title}\"."),
                );
            }
        })
    }
}
