//! The board: a single flat ordered sequence of cards.

use tracing::{debug, warn};

use crate::card::{Card, CardId};
use crate::lane::Lane;

/// The full collection of cards on the board.
///
/// Rendering partitions cards by lane, but the flat sequence is the
/// single source of truth; lane views are pure filters over it and can
/// never desynchronize from it. Each card id appears at most once.
/// In-lane order is the flat-sequence order and is not persisted to the
/// backend; only lane membership is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Build a board from cards fetched from the backend. A duplicate id
    /// would break the one-card-one-entry invariant; later occurrences
    /// are discarded.
    pub fn new(cards: Vec<Card>) -> Self {
        let mut out: Vec<Card> = Vec::with_capacity(cards.len());
        for card in cards {
            if out.iter().any(|c| c.id == card.id) {
                warn!(card_id = %card.id, "duplicate card id in initial data, discarding");
                continue;
            }
            out.push(card);
        }
        Self { cards: out }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn find(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// Flat-sequence position of a card.
    pub fn position_of(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|c| &c.id == id)
    }

    /// Cards in `lane`, in flat-sequence order.
    pub fn lane_view(&self, lane: Lane) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.lane == lane).collect()
    }

    /// Remove the card at `from` and reinsert it at `to`. `lane` is the
    /// column the move happens under and is recorded for diagnostics
    /// only. This runs on the render path and must never panic:
    /// out-of-bounds indices are absorbed, and `from == to` is a no-op.
    pub fn move_card(&mut self, from: usize, to: usize, lane: Lane) {
        if from == to {
            return;
        }
        if from >= self.cards.len() || to >= self.cards.len() {
            debug!(from, to, len = self.cards.len(), %lane, "move_card out of bounds, ignoring");
            return;
        }
        let card = self.cards.remove(from);
        debug!(card_id = %card.id, from, to, %lane, "reordering card");
        self.cards.insert(to, card);
    }

    /// Overwrite the lane of the card with `id`. The card's flat
    /// position is unchanged; it moves within its new lane only through
    /// a subsequent [`Board::move_card`]. Unknown ids are absorbed.
    pub fn set_card_lane(&mut self, id: &CardId, lane: Lane) {
        match self.cards.iter_mut().find(|c| &c.id == id) {
            Some(card) => card.lane = lane,
            None => debug!(card_id = %id, %lane, "set_card_lane for unknown card, ignoring"),
        }
    }

    /// Replace the whole collection, e.g. after a refetch.
    pub fn replace(&mut self, cards: Vec<Card>) {
        *self = Self::new(cards);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_board() -> Board {
        Board::new(vec![
            Card::new("a", "Client onboarding", Lane::Todo),
            Card::new("b", "Site redesign", Lane::Todo)
                .with_description("Homepage and portfolio refresh")
                .with_price(1200.0),
            Card::new("c", "Hosting renewal", Lane::InProgress)
                .with_tags(vec!["hosting".into(), "recurring".into()]),
            Card::new("d", "Logo refresh", Lane::InProgress),
            Card::new("e", "SEO audit", Lane::Completed),
        ])
    }

    fn ids(board: &Board) -> Vec<&str> {
        board.cards().iter().map(|c| c.id.as_str()).collect()
    }

    fn lane_ids(board: &Board, lane: Lane) -> Vec<&str> {
        board
            .lane_view(lane)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect()
    }

    #[test]
    fn move_card_is_a_permutation() {
        let mut board = sample_board();
        let mut expected: Vec<String> = ids(&board).into_iter().map(String::from).collect();
        expected.sort();

        for (from, to) in [(0, 4), (4, 0), (2, 2), (1, 3), (9, 1), (3, 9), (0, 1)] {
            board.move_card(from, to, Lane::Todo);
            let mut got: Vec<String> = ids(&board).into_iter().map(String::from).collect();
            got.sort();
            assert_eq!(got, expected, "move {from}->{to} lost or duplicated a card");
        }
    }

    #[test]
    fn self_move_is_a_no_op() {
        let mut board = sample_board();
        let before: Vec<String> = ids(&board).into_iter().map(String::from).collect();
        for i in 0..board.len() {
            board.move_card(i, i, Lane::Todo);
            assert_eq!(ids(&board), before);
        }
    }

    #[test]
    fn out_of_bounds_moves_are_absorbed() {
        let mut board = sample_board();
        let before: Vec<String> = ids(&board).into_iter().map(String::from).collect();
        board.move_card(0, 99, Lane::Todo);
        board.move_card(99, 0, Lane::Todo);
        board.move_card(board.len(), 0, Lane::Todo);
        assert_eq!(ids(&board), before);
    }

    #[test]
    fn move_card_reorders_the_flat_sequence() {
        let mut board = sample_board();
        board.move_card(0, 3, Lane::Todo);
        assert_eq!(ids(&board), ["b", "c", "d", "a", "e"]);
        board.move_card(3, 0, Lane::Todo);
        assert_eq!(ids(&board), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn set_card_lane_keeps_flat_position() {
        let mut board = sample_board();
        let id = CardId::new("b");
        board.set_card_lane(&id, Lane::Completed);
        assert_eq!(board.position_of(&id), Some(1));
        assert_eq!(board.find(&id).unwrap().lane, Lane::Completed);
    }

    #[test]
    fn set_card_lane_unknown_id_is_absorbed() {
        let mut board = sample_board();
        let before = board.clone();
        board.set_card_lane(&CardId::new("nope"), Lane::Todo);
        assert_eq!(board, before);
    }

    #[test]
    fn lane_views_partition_the_flat_sequence() {
        let mut board = sample_board();
        board.set_card_lane(&CardId::new("a"), Lane::Completed);
        board.move_card(0, 3, Lane::Completed);
        board.set_card_lane(&CardId::new("e"), Lane::Todo);

        let total: usize = Lane::ALL.iter().map(|&l| board.lane_view(l).len()).sum();
        assert_eq!(total, board.len());
        for lane in Lane::ALL {
            for card in board.lane_view(lane) {
                assert_eq!(card.lane, lane);
            }
        }
        assert_eq!(lane_ids(&board, Lane::Todo), ["b", "e"]);
        assert_eq!(lane_ids(&board, Lane::InProgress), ["c", "d"]);
        assert_eq!(lane_ids(&board, Lane::Completed), ["a"]);
    }

    #[test]
    fn duplicate_ids_in_initial_data_are_discarded() {
        let board = Board::new(vec![
            Card::new("a", "first", Lane::Todo),
            Card::new("a", "second", Lane::Completed),
        ]);
        assert_eq!(board.len(), 1);
        assert_eq!(board.cards()[0].title, "first");
    }

    #[test]
    fn replace_swaps_the_collection() {
        let mut board = sample_board();
        board.replace(vec![Card::new("z", "New client", Lane::Todo)]);
        assert_eq!(ids(&board), ["z"]);
    }
}
