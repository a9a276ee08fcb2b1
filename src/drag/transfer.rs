use crate::view::{Slot, VisualBoard};

/// Move the card at `card_idx` of `origin` to the end of `dest`.
///
/// Returns `false` without mutating when the move is impossible: same
/// column, out-of-range index, or the slot at the index is not a card.
/// Duplicate texts are safe because the card is identified by position,
/// never by content.
pub fn transfer_card(
    visual: &mut VisualBoard,
    origin: usize,
    card_idx: usize,
    dest: usize,
) -> bool {
    if origin == dest || dest >= visual.columns.len() {
        return false;
    }
    let Some(slots) = visual.columns.get(origin) else {
        return false;
    };
    if !matches!(slots.get(card_idx), Some(Slot::Card(_))) {
        return false;
    }
    let slot = visual.columns[origin].remove(card_idx);
    visual.columns[dest].push(slot);
    true
}
