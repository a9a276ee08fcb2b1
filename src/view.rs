use crate::board::{Board, COLUMN_COUNT};

/// One entry in a column's visual flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Card(String),
    /// Transient stand-in for the dragged card's insertion point. Not a
    /// card: it is never persisted and never counted by the store.
    Placeholder,
}

/// The on-screen card lists, the visual counterpart of the persisted board.
///
/// Rebuilt 1:1 from the [`Board`] after every mutation, and mutated in
/// place by the drag controller while a drag is live. At most one
/// `Placeholder` exists across all columns at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisualBoard {
    pub columns: [Vec<Slot>; COLUMN_COUNT],
}

impl VisualBoard {
    /// Build the visual lists from a board, one card slot per stored text,
    /// in stored order.
    pub fn from_board(board: &Board) -> Self {
        let mut visual = Self::default();
        for (col, texts) in board.columns.iter().enumerate() {
            visual.columns[col] = texts.iter().cloned().map(Slot::Card).collect();
        }
        visual
    }

    /// Recompute a board from the current visual order. The placeholder is
    /// skipped; any floating dragged card is not part of the flow and is
    /// therefore not included either.
    pub fn snapshot(&self) -> Board {
        let mut board = Board::default();
        for (col, slots) in self.columns.iter().enumerate() {
            board.columns[col] = slots
                .iter()
                .filter_map(|slot| match slot {
                    Slot::Card(text) => Some(text.clone()),
                    Slot::Placeholder => None,
                })
                .collect();
        }
        board
    }

    /// Number of real cards in a column (placeholder excluded).
    pub fn card_count(&self, column: usize) -> usize {
        self.columns
            .get(column)
            .map(|slots| {
                slots
                    .iter()
                    .filter(|slot| matches!(slot, Slot::Card(_)))
                    .count()
            })
            .unwrap_or(0)
    }

    /// Locate the placeholder, if one exists.
    pub fn placeholder_pos(&self) -> Option<(usize, usize)> {
        for (col, slots) in self.columns.iter().enumerate() {
            if let Some(idx) = slots.iter().position(|s| *s == Slot::Placeholder) {
                return Some((col, idx));
            }
        }
        None
    }

    pub fn remove_placeholder(&mut self) {
        if let Some((col, idx)) = self.placeholder_pos() {
            self.columns[col].remove(idx);
        }
    }

    /// Take a card out of the flow. Returns `None` (without mutating) when
    /// the slot is missing or is the placeholder.
    pub fn remove_card(&mut self, column: usize, index: usize) -> Option<String> {
        match self.columns.get(column)?.get(index)? {
            Slot::Card(_) => match self.columns[column].remove(index) {
                Slot::Card(text) => Some(text),
                Slot::Placeholder => unreachable!("slot checked to be a card"),
            },
            Slot::Placeholder => None,
        }
    }

    /// Insert a card into the flow, clamping the index to the column end.
    pub fn insert_card(&mut self, column: usize, index: usize, text: String) {
        if let Some(slots) = self.columns.get_mut(column) {
            let idx = index.min(slots.len());
            slots.insert(idx, Slot::Card(text));
        }
    }
}
