use ratatui::style::{Color, Style};

/// Color theme for Karta.
///
/// All text and UI chrome uses the terminal's default foreground color
/// (Color::Reset). Only functional elements (delete affordance, errors)
/// get color.
pub struct Theme;

impl Theme {
    // Base — everything defaults to the terminal's own foreground
    pub const FG: Color = Color::Reset;
    pub const DIM: Color = Color::DarkGray;

    // Column
    pub const COLUMN_HEADER: Color = Color::Reset;
    pub const COLUMN_BORDER: Color = Color::Reset;

    // Card
    pub const CARD_BORDER: Color = Color::Reset;
    pub const CARD_TEXT: Color = Color::Reset;
    pub const DRAGGED: Color = Color::DarkGray;
    pub const PLACEHOLDER: Color = Color::DarkGray;

    // Functional colors
    pub const DELETE: Color = Color::Red;

    // Status bar
    pub const STATUS_ERROR: Color = Color::Red;

    pub fn dim_style() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn status_style() -> Style {
        Style::default().fg(Self::FG)
    }
}
