pub mod board_view;
pub mod layout;
pub mod status_bar;
pub mod theme;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::app::AppState;

/// Split a frame area into the board region and the one-line status bar.
pub fn split_frame(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn render(f: &mut Frame, state: &AppState) {
    let (board_area, status_area) = split_frame(f.area());

    board_view::render_board(f, board_area, state);
    status_bar::render_status_bar(f, status_area, state);

    // The dragged card paints over everything below it
    if let Some(session) = state.drag.session() {
        board_view::render_dragged_card(f, board_area, session);
    }
}
