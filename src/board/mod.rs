pub mod kv;
pub mod store;

/// Number of columns on the board. Fixed; columns are created at startup
/// and never destroyed.
pub const COLUMN_COUNT: usize = 3;

/// Display names for the three columns, in storage order.
pub const COLUMN_NAMES: [&str; COLUMN_COUNT] = ["To Do", "In Progress", "Done"];

/// The full board: three fixed columns, each an ordered list of card texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    pub columns: [Vec<String>; COLUMN_COUNT],
}

impl Board {
    /// Total card count across all columns.
    pub fn total_cards(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Append a card to the end of a column.
    pub fn add_card(&mut self, column: usize, text: impl Into<String>) {
        if let Some(col) = self.columns.get_mut(column) {
            col.push(text.into());
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_card_appends_in_order() {
        let mut board = Board::default();
        board.add_card(1, "first");
        board.add_card(1, "second");
        assert_eq!(board.columns[1], vec!["first", "second"]);
        assert!(board.columns[0].is_empty());
        assert_eq!(board.total_cards(), 2);
    }

    #[test]
    fn add_card_out_of_range_column_is_noop() {
        let mut board = Board::default();
        board.add_card(COLUMN_COUNT, "lost");
        assert_eq!(board.total_cards(), 0);
    }

}
