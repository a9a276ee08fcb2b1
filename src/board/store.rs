use serde::{Deserialize, Serialize};

use super::kv::{KvStore, StoreError};
use super::Board;

/// The single key under which the whole board is persisted.
pub const BOARD_KEY: &str = "boardState";

/// Wire format: a JSON object with one array of card texts per column.
#[derive(Debug, Default, Serialize, Deserialize)]
struct BoardState {
    #[serde(default)]
    column1: Vec<String>,
    #[serde(default)]
    column2: Vec<String>,
    #[serde(default)]
    column3: Vec<String>,
}

/// Typed board persistence over an opaque key-value store.
pub struct BoardStore<K> {
    kv: K,
}

impl<K: KvStore> BoardStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Load the persisted board.
    ///
    /// An absent key or a malformed value yields the empty default board;
    /// this never fails and never surfaces a parse error.
    pub fn load(&self) -> Board {
        let Some(raw) = self.kv.get(BOARD_KEY) else {
            return Board::default();
        };
        let state: BoardState = serde_json::from_str(&raw).unwrap_or_default();
        Board {
            columns: [state.column1, state.column2, state.column3],
        }
    }

    /// Persist the board, overwriting any prior value. Synchronous and
    /// immediate; there is no batching.
    pub fn save(&mut self, board: &Board) -> Result<(), StoreError> {
        let [column1, column2, column3] = board.columns.clone();
        let state = BoardState {
            column1,
            column2,
            column3,
        };
        let raw = serde_json::to_string(&state)?;
        self.kv.set(BOARD_KEY, &raw)
    }
}
