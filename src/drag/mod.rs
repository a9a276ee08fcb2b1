pub mod transfer;

use ratatui::layout::Rect;

use crate::ui::layout::{BoardLayout, CARD_HEIGHT};
use crate::view::{Slot, VisualBoard};

/// A live pointer drag of one card.
///
/// While a session exists the card is out of the column flow entirely; it
/// floats at `position` and a placeholder slot marks where it would land.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub text: String,
    pub origin_column: usize,
    pub origin_index: usize,
    /// Pointer offset into the card at press time, so the card does not
    /// snap its corner to the pointer.
    pub grab_offset: (i32, i32),
    pub size: (u16, u16),
    /// Top-left cell of the floating card. Signed: the card may be dragged
    /// partially past the left or top screen edge.
    pub position: (i32, i32),
}

impl DragSession {
    /// Floating card rect clamped to the screen, for painting.
    pub fn screen_rect(&self, frame: Rect) -> Rect {
        let x = self.position.0.clamp(0, frame.width.saturating_sub(1) as i32) as u16;
        let y = self.position.1.clamp(0, frame.height.saturating_sub(1) as i32) as u16;
        let width = self.size.0.min(frame.width - x);
        let height = self.size.1.min(frame.height - y);
        Rect::new(x, y, width, height)
    }
}

/// True when the pointer row sits above the vertical midpoint of the slot.
fn above_midpoint(slot_top: u32, y: u16) -> bool {
    (y as u32) * 2 < slot_top * 2 + CARD_HEIGHT as u32
}

/// Index in `column` where the placeholder belongs for pointer row `y`:
/// just before the first card whose midpoint the pointer is above, else
/// the end of the column.
fn insertion_index(visual: &VisualBoard, layout: &BoardLayout, column: usize, y: u16) -> usize {
    let slots = &visual.columns[column];
    let cards_top = layout.columns[column].cards_area.y as u32;
    for (idx, slot) in slots.iter().enumerate() {
        if !matches!(slot, Slot::Card(_)) {
            continue;
        }
        let slot_top = cards_top + idx as u32 * CARD_HEIGHT as u32;
        if above_midpoint(slot_top, y) {
            return idx;
        }
    }
    slots.len()
}

/// Move the placeholder to track the pointer. Outside every column the
/// placeholder stays where it last was.
fn place_placeholder(visual: &mut VisualBoard, layout: &BoardLayout, x: u16, y: u16) {
    let Some(column) = layout.column_at(x, y) else {
        return;
    };
    let mut target = insertion_index(visual, layout, column, y);
    if let Some((pcol, pidx)) = visual.placeholder_pos() {
        if pcol == column && pidx == target {
            return;
        }
        visual.columns[pcol].remove(pidx);
        if pcol == column && pidx < target {
            target -= 1;
        }
    }
    let slots = &mut visual.columns[column];
    let target = target.min(slots.len());
    slots.insert(target, Slot::Placeholder);
}

/// Pointer-driven drag state machine.
///
/// `press` lifts a card out of the flow, `motion` floats it and steers the
/// placeholder, `release` splices it back in and syncs the drop column.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Start a drag if the press lands on a card. Returns whether a
    /// session started.
    pub fn press(&mut self, visual: &mut VisualBoard, layout: &BoardLayout, x: u16, y: u16) -> bool {
        if self.session.is_some() {
            return false;
        }
        let Some((column, index)) = layout.card_at(visual, x, y) else {
            return false;
        };
        let Some(rect) = layout.slot_rect(column, index) else {
            return false;
        };
        let Some(text) = visual.remove_card(column, index) else {
            return false;
        };
        self.session = Some(DragSession {
            text,
            origin_column: column,
            origin_index: index,
            grab_offset: (x as i32 - rect.x as i32, y as i32 - rect.y as i32),
            size: (rect.width, rect.height),
            position: (rect.x as i32, rect.y as i32),
        });
        true
    }

    /// Track pointer movement while a session is live.
    pub fn motion(&mut self, visual: &mut VisualBoard, layout: &BoardLayout, x: u16, y: u16) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.position = (x as i32 - session.grab_offset.0, y as i32 - session.grab_offset.1);
        place_placeholder(visual, layout, x, y);
    }

    /// Drop the card. It lands at the placeholder when one exists,
    /// otherwise back at its origin slot. Either way the release point is
    /// then hit-tested: a card that landed in its origin column while the
    /// pointer sits over a different column moves to the end of that
    /// column.
    ///
    /// Returns whether a session was live, i.e. whether the board may
    /// have changed and should be persisted.
    pub fn release(
        &mut self,
        visual: &mut VisualBoard,
        layout: &BoardLayout,
        x: u16,
        y: u16,
    ) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        let (scol, sidx) = match visual.placeholder_pos() {
            Some((scol, sidx)) => {
                visual.columns[scol][sidx] = Slot::Card(session.text);
                (scol, sidx)
            }
            None => {
                let idx = session
                    .origin_index
                    .min(visual.columns[session.origin_column].len());
                visual.insert_card(session.origin_column, idx, session.text);
                (session.origin_column, idx)
            }
        };
        if let Some(dest) = layout.column_at(x, y) {
            if dest != session.origin_column && scol == session.origin_column {
                transfer::transfer_card(visual, scol, sidx, dest);
            }
        }
        true
    }
}
