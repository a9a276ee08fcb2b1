use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols::border;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::layout::{delete_affordance, ColumnLayout};
use super::theme::Theme;
use crate::app::{AppState, Mode, TextBuffer};
use crate::board::COLUMN_NAMES;
use crate::drag::DragSession;
use crate::view::Slot;

/// Unicode-safe truncation to `avail` display columns, with a trailing
/// ellipsis when anything was cut.
pub(crate) fn truncate_text(text: &str, avail: usize) -> String {
    if text.width() <= avail {
        return text.to_string();
    }
    let budget = avail.saturating_sub(1); // 1 for '…'
    let truncated: String = text
        .graphemes(true)
        .scan(0, |w, g| {
            let gw = g.width();
            (*w + gw <= budget).then(|| {
                *w += gw;
                g
            })
        })
        .collect();
    format!("{truncated}…")
}

pub fn render_board(f: &mut Frame, area: Rect, state: &AppState) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    for (col_idx, col_layout) in state.layout.columns.iter().enumerate() {
        render_column(f, col_idx, col_layout, state);
    }
}

fn render_column(f: &mut Frame, col_idx: usize, col_layout: &ColumnLayout, state: &AppState) {
    let header_line = Line::from(vec![
        Span::styled(
            format!(" {} ", COLUMN_NAMES[col_idx]),
            Style::default()
                .fg(Theme::COLUMN_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("({}) ", state.visual.card_count(col_idx)), Theme::dim_style()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::COLUMN_BORDER))
        .border_type(BorderType::Rounded)
        .title(header_line);
    f.render_widget(block, col_layout.area);

    if col_layout.cards_area.width == 0 {
        return;
    }

    let slots = &state.visual.columns[col_idx];
    for (slot_idx, slot) in slots.iter().enumerate() {
        let Some(rect) = state.layout.slot_rect(col_idx, slot_idx) else {
            break;
        };
        match slot {
            Slot::Card(text) => {
                let hovered =
                    !state.drag.is_active() && state.hovered == Some((col_idx, slot_idx));
                render_card(f, rect, text, hovered);
            }
            Slot::Placeholder => render_placeholder(f, rect),
        }
    }

    // The add form takes the next free slot; with the column full it falls
    // back to the trigger row
    if let Mode::AddCard { column, buf } = &state.mode {
        if *column == col_idx {
            let form_area = state
                .layout
                .slot_rect(col_idx, slots.len())
                .unwrap_or(col_layout.add_trigger);
            render_add_form(f, form_area, buf);
            return;
        }
    }

    if col_layout.add_trigger.height > 0 {
        let trigger = Paragraph::new(Span::styled(" + Add card", Theme::dim_style()));
        f.render_widget(trigger, col_layout.add_trigger);
    }
}

fn render_card(f: &mut Frame, area: Rect, text: &str, hovered: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::CARD_BORDER))
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width < 2 || inner.height == 0 {
        return;
    }

    // Keep the text clear of the delete affordance when it is showing
    let reserved = if hovered { 3 } else { 1 };
    let avail = (inner.width as usize).saturating_sub(reserved);
    let display = truncate_text(text, avail);
    let line = Paragraph::new(Span::styled(
        format!(" {display}"),
        Style::default().fg(Theme::CARD_TEXT),
    ));
    f.render_widget(line, inner);

    if hovered {
        let affordance = delete_affordance(area);
        if affordance.width > 0 {
            let mark = Paragraph::new(Span::styled("✕", Style::default().fg(Theme::DELETE)));
            f.render_widget(mark, affordance);
        }
    }
}

/// Dashed outline marking where the dragged card would land.
fn render_placeholder(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::PLACEHOLDER))
        .border_type(BorderType::Rounded)
        .border_set(border::Set {
            top_left: "╭",
            top_right: "╮",
            bottom_left: "╰",
            bottom_right: "╯",
            vertical_left: "╎",
            vertical_right: "╎",
            horizontal_top: "╌",
            horizontal_bottom: "╌",
        });
    f.render_widget(block, area);
}

fn render_add_form(f: &mut Frame, area: Rect, buf: &TextBuffer) {
    if area.height >= 3 {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::FG))
            .border_type(BorderType::Rounded);
        let inner = block.inner(area);
        f.render_widget(block, area);
        if inner.width >= 2 {
            render_add_form_line(f, inner, buf);
        }
    } else if area.height == 1 {
        render_add_form_line(f, area, buf);
    }
}

// Overflow past the line width is clipped by the paragraph; the cursor
// glyph sits at the real cursor position, not at the end of the input.
fn render_add_form_line(f: &mut Frame, area: Rect, buf: &TextBuffer) {
    let line = if buf.input.is_empty() {
        Line::from(vec![
            Span::raw(" _"),
            Span::styled("Card text", Theme::dim_style()),
        ])
    } else {
        let (before, after) = buf.split_at_cursor();
        Line::from(vec![
            Span::raw(format!(" {before}")),
            Span::raw("_"),
            Span::raw(after),
        ])
    };
    f.render_widget(Paragraph::new(line), area);
}

/// Paint the floating dragged card last so it overlaps the column flow.
pub fn render_dragged_card(f: &mut Frame, board_area: Rect, session: &DragSession) {
    let area = session.screen_rect(board_area);
    if area.width < 2 || area.height == 0 {
        return;
    }

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::DRAGGED))
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width >= 2 && inner.height >= 1 {
        let avail = (inner.width as usize).saturating_sub(1);
        let line = Paragraph::new(Span::styled(
            format!(" {}", truncate_text(&session.text, avail)),
            Style::default().fg(Theme::DRAGGED),
        ));
        f.render_widget(line, inner);
    }
}
