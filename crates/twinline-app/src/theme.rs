// Terminal palette for the side-by-side view.

use twinline_core::{Color, HighlightStyle, TextStyle};

// Highlight backgrounds
pub const DELETE_BG: Color = Color::rgb(0xff, 0xec, 0xec);
pub const INSERT_BG: Color = Color::rgb(0xe8, 0xf4, 0xff);
pub const REPLACE_BG: Color = Color::rgb(0xff, 0xf4, 0xe5);
pub const CURRENT_BG: Color = Color::rgb(0xff, 0xe0, 0x66);

// Text
pub const HIGHLIGHT_TEXT: Color = Color::BLACK;
pub const GUTTER_TEXT: Color = Color::rgb(0x55, 0x55, 0x55);
pub const DIVIDER: Color = Color::rgb(0x88, 0x88, 0x88);

// Layout
pub const GUTTER_WIDTH: usize = 5; // "1234 " including the separating space
pub const DIVIDER_STR: &str = " │ ";
pub const FOCUS_MARKER: char = '▶';
pub const DEFAULT_WIDTH: usize = 120;

pub fn highlight_style(style: HighlightStyle) -> TextStyle {
    let background = match style {
        HighlightStyle::Delete => DELETE_BG,
        HighlightStyle::Insert => INSERT_BG,
        HighlightStyle::Replace => REPLACE_BG,
    };
    TextStyle { foreground: Some(HIGHLIGHT_TEXT), background: Some(background), ..TextStyle::default() }
}

pub fn current_style() -> TextStyle {
    TextStyle { foreground: Some(HIGHLIGHT_TEXT), background: Some(CURRENT_BG), bold: true, dim: false }
}

pub fn gutter_style() -> TextStyle {
    TextStyle { foreground: Some(GUTTER_TEXT), dim: true, ..TextStyle::default() }
}

pub fn divider_style() -> TextStyle {
    TextStyle { foreground: Some(DIVIDER), ..TextStyle::default() }
}
