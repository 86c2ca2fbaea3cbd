//! Board snapshot history with branch truncation.

use super::{Board, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Ordered sequence of board snapshots.
///
/// The first snapshot is always the empty board. Snapshots are only
/// appended, except that branching from an earlier step discards every
/// later snapshot first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct History {
    snapshots: Vec<Board>,
}

impl History {
    /// Creates a history holding only the empty board.
    pub fn new() -> Self {
        Self {
            snapshots: vec![Board::new()],
        }
    }

    /// Number of snapshots (moves played + 1).
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: the empty board is never removed.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Index of the last snapshot.
    pub fn last_step(&self) -> usize {
        self.snapshots.len() - 1
    }

    /// Snapshot at `step`.
    pub fn get(&self, step: usize) -> Option<&Board> {
        self.snapshots.get(step)
    }

    /// All snapshots, oldest first.
    pub fn snapshots(&self) -> &[Board] {
        &self.snapshots
    }

    /// Position played to reach `step`.
    ///
    /// `None` for step 0 or when `step` is past the end.
    pub fn changed_cell(&self, step: usize) -> Option<Position> {
        if step == 0 {
            return None;
        }
        let before = self.snapshots.get(step - 1)?;
        let after = self.snapshots.get(step)?;
        before.diff(after).first().copied()
    }

    /// Drops every snapshot after `step`, then appends `board`.
    ///
    /// Returns the step of the appended snapshot.
    #[instrument(skip(self, board), fields(len = self.snapshots.len()))]
    pub fn branch(&mut self, step: usize, board: Board) -> usize {
        let keep = (step + 1).min(self.snapshots.len());
        if keep < self.snapshots.len() {
            debug!(
                discarded = self.snapshots.len() - keep,
                "Discarding future snapshots"
            );
        }
        self.snapshots.truncate(keep);
        self.snapshots.push(board);
        self.last_step()
    }

    /// Builds a history by playing `positions` in order from the empty board.
    ///
    /// Marks alternate X, O, X, ... Occupied cells are not checked; use
    /// [`Game::play`](crate::Game::play) for rule enforcement.
    #[instrument]
    pub fn from_positions(positions: &[Position]) -> Self {
        let mut history = Self::new();
        for (i, pos) in positions.iter().enumerate() {
            let board = history.snapshots[i].with_mark(*pos, Player::for_step(i));
            history.snapshots.push(board);
        }
        history
    }
}

impl History {
    /// Builds a history from raw snapshots, bypassing every check.
    pub(crate) fn from_snapshots(snapshots: Vec<Board>) -> Self {
        Self { snapshots }
    }
}

/// Serialized shape of a [`History`], not yet validated.
///
/// Only [`Game`](crate::Game) restores histories, after checking its
/// invariants on the result.
#[derive(Debug, Deserialize)]
pub(crate) struct HistoryRecord {
    snapshots: Vec<Board>,
}

impl From<HistoryRecord> for History {
    fn from(record: HistoryRecord) -> Self {
        Self::from_snapshots(record.snapshots)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
