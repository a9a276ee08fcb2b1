use std::time::{Duration, Instant};

use crossterm::event::{self, Event, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::DefaultTerminal;

use crate::board::kv::{FileKv, KvStore};
use crate::board::store::BoardStore;
use crate::board::Board;
use crate::drag::DragController;
use crate::input::action::Action;
use crate::input::keymap::map_key;
use crate::ui;
use crate::ui::layout::{delete_affordance, BoardLayout};
use crate::view::VisualBoard;

/// Reusable text editing buffer with cursor.
///
/// `cursor` is a **char index** (not byte index), always in `0..=char_count`.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    pub input: String,
    pub cursor: usize,
}

impl TextBuffer {
    /// Convert a char index to a byte index.
    fn byte_offset(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    pub fn insert(&mut self, c: char) {
        let byte_idx = self.byte_offset(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let byte_idx = self.byte_offset(self.cursor - 1);
            self.input.remove(byte_idx);
            self.cursor -= 1;
        }
    }

    pub fn delete_word(&mut self) {
        let byte_pos = self.byte_offset(self.cursor);
        let before = &self.input[..byte_pos];
        let trimmed = before.trim_end();
        let start_byte = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8()) // byte after the whitespace char
            .unwrap_or(0);
        let start_char = self.input[..start_byte].chars().count();
        self.input.drain(start_byte..byte_pos);
        self.cursor = start_char;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    /// The input split at the cursor, for rendering the cursor glyph at
    /// its real position.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.input.split_at(self.byte_offset(self.cursor))
    }
}

/// Current interaction mode.
#[derive(Debug, Clone)]
pub enum Mode {
    Normal,
    AddCard { column: usize, buf: TextBuffer },
}

/// Notification severity for statusbar coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Global application state.
pub struct AppState {
    pub mode: Mode,
    pub drag: DragController,
    pub visual: VisualBoard,
    pub layout: BoardLayout,
    /// Card under the pointer, tracked from motion events; drives the
    /// delete affordance.
    pub hovered: Option<(usize, usize)>,
    pub notification: Option<String>,
    pub notification_level: NotificationLevel,
    pub notification_expires: Option<Instant>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(board: &Board) -> Self {
        Self {
            mode: Mode::Normal,
            drag: DragController::default(),
            visual: VisualBoard::from_board(board),
            layout: BoardLayout::default(),
            hovered: None,
            notification: None,
            notification_level: NotificationLevel::Info,
            notification_expires: None,
            should_quit: false,
        }
    }

    /// Reset the visual lists from the board after a mutation.
    pub fn rebuild(&mut self, board: &Board) {
        self.visual = VisualBoard::from_board(board);
        self.hovered = None;
    }

    /// Show a transient notification.
    pub fn notify(&mut self, msg: impl Into<String>) {
        self.notification = Some(msg.into());
        self.notification_level = NotificationLevel::Info;
        self.notification_expires = Some(Instant::now() + Duration::from_secs(3));
    }

    /// Show a transient error notification (rendered in red).
    pub fn notify_error(&mut self, msg: impl Into<String>) {
        self.notification = Some(msg.into());
        self.notification_level = NotificationLevel::Error;
        self.notification_expires = Some(Instant::now() + Duration::from_secs(3));
    }

    /// Clear expired notifications.
    pub fn tick_notification(&mut self) {
        if let Some(expires) = self.notification_expires {
            if Instant::now() >= expires {
                self.notification = None;
                self.notification_level = NotificationLevel::Info;
                self.notification_expires = None;
            }
        }
    }
}

/// Snapshot the visual order into the board, persist it, and rebuild the
/// visual lists. Every mutation funnels through here so the screen, the
/// board, and the store never diverge.
fn commit<K: KvStore>(board: &mut Board, state: &mut AppState, store: &mut BoardStore<K>) {
    *board = state.visual.snapshot();
    if let Err(e) = store.save(board) {
        state.notify_error(format!("Save failed: {e}"));
    }
    state.rebuild(board);
}

fn process_action<K: KvStore>(
    board: &mut Board,
    state: &mut AppState,
    store: &mut BoardStore<K>,
    action: Action,
) {
    match action {
        Action::None => {}
        Action::Quit => state.should_quit = true,
        Action::OpenAddForm(column) => open_add_form(state, column),
        Action::InputChar(c) => {
            if let Mode::AddCard { buf, .. } = &mut state.mode {
                buf.insert(c);
            }
        }
        Action::InputBackspace => {
            if let Mode::AddCard { buf, .. } = &mut state.mode {
                buf.backspace();
            }
        }
        Action::InputLeft => {
            if let Mode::AddCard { buf, .. } = &mut state.mode {
                buf.move_left();
            }
        }
        Action::InputRight => {
            if let Mode::AddCard { buf, .. } = &mut state.mode {
                buf.move_right();
            }
        }
        Action::InputHome => {
            if let Mode::AddCard { buf, .. } = &mut state.mode {
                buf.home();
            }
        }
        Action::InputEnd => {
            if let Mode::AddCard { buf, .. } = &mut state.mode {
                buf.end();
            }
        }
        Action::InputDeleteWord => {
            if let Mode::AddCard { buf, .. } = &mut state.mode {
                buf.delete_word();
            }
        }
        Action::InputConfirm => submit_add(board, state, store),
        Action::InputCancel => state.mode = Mode::Normal,
    }
}

/// Open the add form for a column. A second open request while a form is
/// already up is ignored.
fn open_add_form(state: &mut AppState, column: usize) {
    if matches!(state.mode, Mode::AddCard { .. }) || state.drag.is_active() {
        return;
    }
    if column < state.visual.columns.len() {
        state.mode = Mode::AddCard {
            column,
            buf: TextBuffer::default(),
        };
    }
}

/// Confirm the add form. Whitespace-only input is ignored and the form
/// stays open.
fn submit_add<K: KvStore>(board: &mut Board, state: &mut AppState, store: &mut BoardStore<K>) {
    let Mode::AddCard { column, buf } = &state.mode else {
        return;
    };
    let text = buf.input.trim().to_string();
    if text.is_empty() {
        return;
    }
    let column = *column;
    let end = state.visual.columns[column].len();
    state.visual.insert_card(column, end, text);
    state.mode = Mode::Normal;
    commit(board, state, store);
    state.notify("Card added");
}

/// Delete the card under the pointer and persist.
fn delete_card<K: KvStore>(
    board: &mut Board,
    state: &mut AppState,
    store: &mut BoardStore<K>,
    column: usize,
    index: usize,
) {
    if state.visual.remove_card(column, index).is_some() {
        commit(board, state, store);
        state.notify("Card deleted");
    }
}

fn handle_mouse<K: KvStore>(
    board: &mut Board,
    state: &mut AppState,
    store: &mut BoardStore<K>,
    mouse: MouseEvent,
) {
    let (x, y) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_press(board, state, store, x, y),
        MouseEventKind::Drag(MouseButton::Left) => {
            state.hovered = None;
            state.drag.motion(&mut state.visual, &state.layout, x, y);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if state.drag.release(&mut state.visual, &state.layout, x, y) {
                commit(board, state, store);
            }
        }
        MouseEventKind::Moved => {
            state.hovered = state.layout.card_at(&state.visual, x, y);
        }
        _ => {}
    }
}

fn handle_press<K: KvStore>(
    board: &mut Board,
    state: &mut AppState,
    store: &mut BoardStore<K>,
    x: u16,
    y: u16,
) {
    // A press on the visible delete affordance deletes; it never starts
    // a drag
    if let Some((column, index)) = state.layout.card_at(&state.visual, x, y) {
        if state.hovered == Some((column, index)) {
            if let Some(rect) = state.layout.slot_rect(column, index) {
                if delete_affordance(rect).contains(Position::new(x, y)) {
                    delete_card(board, state, store, column, index);
                    return;
                }
            }
        }
        state.drag.press(&mut state.visual, &state.layout, x, y);
        return;
    }

    if let Some(column) = state.layout.add_trigger_at(x, y) {
        open_add_form(state, column);
    }
}

/// Main TUI application loop.
pub fn run(terminal: &mut DefaultTerminal, store_dir: &std::path::Path) -> color_eyre::Result<()> {
    let mut store = BoardStore::new(FileKv::new(store_dir));
    let mut board = store.load();
    let mut state = AppState::new(&board);

    loop {
        // Tick
        state.tick_notification();

        // Layout is recomputed from the frame size before every draw so
        // mouse hit-testing always matches what is on screen
        let size = terminal.size()?;
        let (board_area, _) = ui::split_frame(Rect::new(0, 0, size.width, size.height));
        state.layout = BoardLayout::compute(board_area);

        terminal.draw(|f| ui::render(f, &state))?;

        // Handle input
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    let action = map_key(key, &state.mode);
                    process_action(&mut board, &mut state, &mut store, action);
                }
                Event::Mouse(mouse) => {
                    handle_mouse(&mut board, &mut state, &mut store, mouse);
                }
                _ => {}
            }

            if state.should_quit {
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::kv::MemoryKv;
    use crossterm::event::KeyModifiers;

    fn mouse_event(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    fn down(x: u16, y: u16) -> MouseEvent {
        mouse_event(MouseEventKind::Down(MouseButton::Left), x, y)
    }

    fn drag(x: u16, y: u16) -> MouseEvent {
        mouse_event(MouseEventKind::Drag(MouseButton::Left), x, y)
    }

    fn up(x: u16, y: u16) -> MouseEvent {
        mouse_event(MouseEventKind::Up(MouseButton::Left), x, y)
    }

    fn moved(x: u16, y: u16) -> MouseEvent {
        mouse_event(MouseEventKind::Moved, x, y)
    }

    struct Fixture {
        board: Board,
        state: AppState,
        store: BoardStore<MemoryKv>,
    }

    /// A 96x30 terminal: a 96x29 board area over a one-line status bar.
    /// Column 0 spans x 0..32; slot i of a column spans rows 1+3i..4+3i.
    fn fixture(c1: &[&str], c2: &[&str], c3: &[&str]) -> Fixture {
        let col = |texts: &[&str]| texts.iter().map(|t| t.to_string()).collect();
        let board = Board {
            columns: [col(c1), col(c2), col(c3)],
        };
        let mut store = BoardStore::new(MemoryKv::new());
        store.save(&board).unwrap();
        let mut state = AppState::new(&board);
        let (board_area, _) = ui::split_frame(Rect::new(0, 0, 96, 30));
        state.layout = BoardLayout::compute(board_area);
        Fixture {
            board,
            state,
            store,
        }
    }

    impl Fixture {
        fn mouse(&mut self, event: MouseEvent) {
            handle_mouse(&mut self.board, &mut self.state, &mut self.store, event);
        }

        fn action(&mut self, action: Action) {
            process_action(&mut self.board, &mut self.state, &mut self.store, action);
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.action(Action::InputChar(c));
            }
        }
    }

    #[test]
    fn add_card_via_keys_appends_and_persists() {
        let mut fx = fixture(&["A"], &[], &[]);
        fx.action(Action::OpenAddForm(0));
        assert!(matches!(fx.state.mode, Mode::AddCard { column: 0, .. }));
        fx.type_text("Buy milk");
        fx.action(Action::InputConfirm);
        assert!(matches!(fx.state.mode, Mode::Normal));
        assert_eq!(fx.board.columns[0], vec!["A", "Buy milk"]);
        assert_eq!(fx.store.load(), fx.board);
    }

    #[test]
    fn add_card_trims_surrounding_whitespace() {
        let mut fx = fixture(&[], &[], &[]);
        fx.action(Action::OpenAddForm(2));
        fx.type_text("  padded  ");
        fx.action(Action::InputConfirm);
        assert_eq!(fx.board.columns[2], vec!["padded"]);
    }

    #[test]
    fn empty_add_keeps_the_form_open() {
        let mut fx = fixture(&[], &[], &[]);
        fx.action(Action::OpenAddForm(1));
        fx.type_text("   ");
        fx.action(Action::InputConfirm);
        assert!(matches!(fx.state.mode, Mode::AddCard { column: 1, .. }));
        assert_eq!(fx.board.total_cards(), 0);
    }

    #[test]
    fn cancel_discards_the_form() {
        let mut fx = fixture(&[], &[], &[]);
        fx.action(Action::OpenAddForm(0));
        fx.type_text("draft");
        fx.action(Action::InputCancel);
        assert!(matches!(fx.state.mode, Mode::Normal));
        assert_eq!(fx.board.total_cards(), 0);
    }

    #[test]
    fn open_add_form_is_noop_while_a_form_is_open() {
        let mut fx = fixture(&[], &[], &[]);
        fx.action(Action::OpenAddForm(0));
        open_add_form(&mut fx.state, 2);
        assert!(matches!(fx.state.mode, Mode::AddCard { column: 0, .. }));
    }

    #[test]
    fn add_trigger_click_opens_the_form() {
        let mut fx = fixture(&[], &[], &[]);
        // Add trigger row is the last inner row of the 29-row board area
        fx.mouse(down(40, 27));
        assert!(matches!(fx.state.mode, Mode::AddCard { column: 1, .. }));
    }

    #[test]
    fn drag_to_another_column_persists_the_move() {
        let mut fx = fixture(&["A", "B"], &["X"], &[]);
        fx.mouse(down(5, 2)); // press on "A"
        assert!(fx.state.drag.is_active());
        fx.mouse(drag(40, 6)); // below "X"'s midpoint
        fx.mouse(up(40, 6));
        assert!(!fx.state.drag.is_active());
        assert_eq!(fx.board.columns[0], vec!["B"]);
        assert_eq!(fx.board.columns[1], vec!["X", "A"]);
        assert_eq!(fx.store.load(), fx.board);
    }

    #[test]
    fn reorder_within_a_column_persists() {
        let mut fx = fixture(&["A", "B", "C"], &[], &[]);
        fx.mouse(down(5, 8)); // press on "C"
        fx.mouse(drag(5, 2)); // above "A"'s midpoint
        fx.mouse(up(5, 2));
        assert_eq!(fx.board.columns[0], vec!["C", "A", "B"]);
        assert_eq!(fx.store.load(), fx.board);
    }

    #[test]
    fn click_without_drag_changes_nothing() {
        let mut fx = fixture(&["A", "B"], &[], &[]);
        let before = fx.board.clone();
        fx.mouse(down(5, 2));
        fx.mouse(up(5, 2));
        assert_eq!(fx.board, before);
        assert_eq!(fx.store.load(), before);
    }

    #[test]
    fn hover_then_affordance_click_deletes() {
        let mut fx = fixture(&["A", "B"], &[], &[]);
        fx.mouse(moved(29, 5)); // hover over "B", on its affordance cell
        assert_eq!(fx.state.hovered, Some((0, 1)));
        fx.mouse(down(29, 5));
        assert!(!fx.state.drag.is_active());
        assert_eq!(fx.board.columns[0], vec!["A"]);
        assert_eq!(fx.store.load(), fx.board);
    }

    #[test]
    fn affordance_click_without_hover_starts_a_drag_instead() {
        let mut fx = fixture(&["A"], &[], &[]);
        fx.mouse(down(29, 2)); // affordance cell, but nothing was hovered
        assert!(fx.state.drag.is_active());
        fx.mouse(up(29, 2));
        assert_eq!(fx.board.columns[0], vec!["A"]);
    }

    #[test]
    fn hover_clears_while_dragging() {
        let mut fx = fixture(&["A", "B"], &[], &[]);
        fx.mouse(moved(5, 5));
        assert_eq!(fx.state.hovered, Some((0, 1)));
        fx.mouse(down(5, 2));
        fx.mouse(drag(5, 6));
        assert_eq!(fx.state.hovered, None);
    }

    #[test]
    fn quit_action_sets_the_flag() {
        let mut fx = fixture(&[], &[], &[]);
        fx.action(Action::Quit);
        assert!(fx.state.should_quit);
    }

    #[test]
    fn split_at_cursor_tracks_cursor_movement() {
        let mut buf = TextBuffer::default();
        for c in "héllo".chars() {
            buf.insert(c);
        }
        assert_eq!(buf.split_at_cursor(), ("héllo", ""));
        buf.move_left();
        buf.move_left();
        assert_eq!(buf.split_at_cursor(), ("hél", "lo"));
        buf.home();
        assert_eq!(buf.split_at_cursor(), ("", "héllo"));
        buf.insert('>');
        assert_eq!(buf.split_at_cursor(), (">", "héllo"));
    }

    #[test]
    fn text_buffer_editing() {
        let mut buf = TextBuffer::default();
        for c in "héllo world".chars() {
            buf.insert(c);
        }
        buf.delete_word();
        assert_eq!(buf.input, "héllo ");
        buf.backspace();
        assert_eq!(buf.input, "héllo");
        buf.home();
        buf.insert('>');
        assert_eq!(buf.input, ">héllo");
        buf.end();
        assert_eq!(buf.cursor, 6);
        buf.move_left();
        buf.backspace();
        assert_eq!(buf.input, ">héll");
    }
}
