use ratatui::layout::{Constraint, Direction, Layout, Margin, Position, Rect};

use crate::board::COLUMN_COUNT;
use crate::view::{Slot, VisualBoard};

/// Rows occupied by one card slot (a text line plus its borders).
pub const CARD_HEIGHT: u16 = 3;

/// Screen geometry for one column.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnLayout {
    /// Full column bounding box; the hit-test target for drags.
    pub area: Rect,
    /// Interior region holding the card slots.
    pub cards_area: Rect,
    /// The "+ Add card" trigger row at the bottom of the column.
    pub add_trigger: Rect,
}

/// The fixed three-column geometry of the board for one frame area.
///
/// Pure function of the area: recomputed every frame, so hit-testing and
/// drawing always agree.
#[derive(Debug, Clone, Default)]
pub struct BoardLayout {
    pub columns: Vec<ColumnLayout>,
}

impl BoardLayout {
    pub fn compute(area: Rect) -> Self {
        let constraints = vec![Constraint::Ratio(1, COLUMN_COUNT as u32); COLUMN_COUNT];
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        let columns = chunks
            .iter()
            .map(|&area| {
                let inner = area.inner(Margin::new(1, 1));
                let add_trigger = if inner.height > 0 {
                    Rect::new(inner.x, inner.bottom() - 1, inner.width, 1)
                } else {
                    Rect::default()
                };
                let cards_area = Rect::new(
                    inner.x,
                    inner.y,
                    inner.width,
                    inner.height.saturating_sub(1),
                );
                ColumnLayout {
                    area,
                    cards_area,
                    add_trigger,
                }
            })
            .collect();

        Self { columns }
    }

    /// Index of the column whose bounding box contains the point.
    pub fn column_at(&self, x: u16, y: u16) -> Option<usize> {
        self.columns
            .iter()
            .position(|col| col.area.contains(Position::new(x, y)))
    }

    /// Rect for slot `index` of `column`, if the slot fits fully inside
    /// the column's card region.
    pub fn slot_rect(&self, column: usize, index: usize) -> Option<Rect> {
        let cards = self.columns.get(column)?.cards_area;
        let y = cards.y as u32 + index as u32 * CARD_HEIGHT as u32;
        if y + CARD_HEIGHT as u32 > cards.bottom() as u32 {
            return None;
        }
        Some(Rect::new(cards.x, y as u16, cards.width, CARD_HEIGHT))
    }

    /// The card slot under the point. Placeholder slots are not cards and
    /// never hit.
    pub fn card_at(&self, visual: &VisualBoard, x: u16, y: u16) -> Option<(usize, usize)> {
        let column = self.column_at(x, y)?;
        for (idx, slot) in visual.columns.get(column)?.iter().enumerate() {
            let Some(rect) = self.slot_rect(column, idx) else {
                break;
            };
            if matches!(slot, Slot::Card(_)) && rect.contains(Position::new(x, y)) {
                return Some((column, idx));
            }
        }
        None
    }

    /// The column whose add trigger contains the point.
    pub fn add_trigger_at(&self, x: u16, y: u16) -> Option<usize> {
        self.columns
            .iter()
            .position(|col| col.add_trigger.contains(Position::new(x, y)))
    }
}

/// Hover delete affordance cell at the top-right of a card's text row.
pub fn delete_affordance(card: Rect) -> Rect {
    if card.width < 4 || card.height < 2 {
        return Rect::default();
    }
    Rect::new(card.x + card.width - 3, card.y + 1, 2, 1)
}
