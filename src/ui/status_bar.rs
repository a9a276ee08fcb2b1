use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::app::{AppState, Mode, NotificationLevel};
use crate::board::COLUMN_NAMES;

pub fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    // The add form takes over the entire bar
    if let Some(line) = render_full_line_mode(state) {
        let paragraph = Paragraph::new(line).style(Theme::status_style());
        f.render_widget(paragraph, area);
        return;
    }

    let left = build_left_zone(state);
    let right = build_right_zone(state);

    let left_width: usize = left.iter().map(|s| s.content.width()).sum();
    let right_width: usize = right.iter().map(|s| s.content.width()).sum();
    let total_width = area.width as usize;

    // Center zone: notification (fills remaining space)
    let center_avail = total_width.saturating_sub(left_width + right_width);
    let center = build_center_zone(state, center_avail);

    let mut spans = left;
    spans.extend(center);
    spans.extend(right);

    let paragraph = Paragraph::new(Line::from(spans)).style(Theme::status_style());
    f.render_widget(paragraph, area);
}

/// Build the left zone: mode badge + hint keys.
fn build_left_zone(state: &AppState) -> Vec<Span<'_>> {
    let mode_str = if state.drag.is_active() { "DRAG" } else { "NORMAL" };

    vec![
        Span::styled(
            format!(" {mode_str} "),
            Style::default()
                .fg(Theme::FG)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::raw(" "),
        Span::styled("1-3 add  q quit ", Theme::dim_style()),
    ]
}

/// Build the right zone: total card count.
fn build_right_zone(state: &AppState) -> Vec<Span<'_>> {
    let total: usize = (0..COLUMN_NAMES.len())
        .map(|col| state.visual.card_count(col))
        .sum();
    let label = if total == 1 { "card" } else { "cards" };
    vec![Span::styled(
        format!("{total} {label} "),
        Style::default().fg(Theme::DIM),
    )]
}

/// Build the center zone: notification text padded to fill available width.
fn build_center_zone(state: &AppState, avail_width: usize) -> Vec<Span<'_>> {
    if let Some(ref notif) = state.notification {
        let notif_width = notif.width();
        let color = match state.notification_level {
            NotificationLevel::Info => Theme::FG,
            NotificationLevel::Error => Theme::STATUS_ERROR,
        };

        if notif_width >= avail_width {
            let truncated: String = notif.chars().take(avail_width).collect();
            return vec![Span::styled(truncated, Style::default().fg(color))];
        }

        // Center the notification in the available space
        let pad_total = avail_width - notif_width;
        let pad_left = pad_total / 2;
        let pad_right = pad_total - pad_left;

        vec![
            Span::raw(" ".repeat(pad_left)),
            Span::styled(notif.as_str(), Style::default().fg(color)),
            Span::raw(" ".repeat(pad_right)),
        ]
    } else {
        vec![Span::raw(" ".repeat(avail_width))]
    }
}

/// Render the full-line add form bar.
fn render_full_line_mode(state: &AppState) -> Option<Line<'_>> {
    match &state.mode {
        Mode::AddCard { column, buf } => {
            let (before, after) = buf.split_at_cursor();
            let spans = vec![
                Span::styled(
                    format!(" Add to {} ", COLUMN_NAMES[*column]),
                    Style::default()
                        .fg(Theme::FG)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                ),
                Span::raw(format!(" {before}")),
                Span::raw("_"),
                Span::raw(after),
                Span::styled("  Enter confirm  Esc cancel", Theme::dim_style()),
            ];
            Some(Line::from(spans))
        }
        Mode::Normal => None,
    }
}
