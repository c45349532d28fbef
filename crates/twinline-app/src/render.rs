// Side-by-side rendering of the current difference for a text terminal.
//
// The engine reports highlights, spacers and focus through `DiffSurface`;
// `TerminalSurface` records them per visual row and `render_window` turns
// the rows around the focus into printable lines.

use std::collections::{HashMap, HashSet};

use crossterm::style::{Attribute, Color as TermColor, ContentStyle};
use twinline_core::{DiffSurface, HighlightStyle, LineRange, Side, SpacerRun, TextStyle};
use twinline_engine::padding::VisualRow;
use twinline_engine::DiffEngine;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme;

const TAB: &str = "    ";
const MIN_COLUMN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Total terminal columns.
    pub width: usize,
    /// Rows shown above and below the current difference.
    pub context: usize,
    pub color: bool,
    pub gutter: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { width: theme::DEFAULT_WIDTH, context: 3, color: true, gutter: true }
    }
}

fn slot(side: Side) -> usize {
    match side {
        Side::Left => 0,
        Side::Right => 1,
    }
}

/// What the engine last presented, indexed by visual row.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    highlights: [HashMap<usize, HighlightStyle>; 2],
    spacers: [HashSet<usize>; 2],
    focus: [Option<LineRange>; 2],
}

impl TerminalSurface {
    pub fn highlight_at(&self, side: Side, row: usize) -> Option<HighlightStyle> {
        self.highlights[slot(side)].get(&row).copied()
    }

    pub fn is_spacer(&self, side: Side, row: usize) -> bool {
        self.spacers[slot(side)].contains(&row)
    }

    pub fn focus_range(&self, side: Side) -> Option<LineRange> {
        self.focus[slot(side)]
    }

    fn is_focused(&self, side: Side, row: usize) -> bool {
        self.focus_range(side).is_some_and(|r| r.contains(row))
    }
}

impl DiffSurface for TerminalSurface {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn highlight(&mut self, side: Side, rows: LineRange, style: HighlightStyle) {
        let map = &mut self.highlights[slot(side)];
        for row in rows.start..rows.end {
            map.insert(row, style);
        }
    }

    fn spacer(&mut self, run: SpacerRun) {
        let set = &mut self.spacers[slot(run.side)];
        set.extend(run.rows().start..run.rows().end);
    }

    fn focus(&mut self, side: Side, rows: LineRange) {
        self.focus[slot(side)] = Some(rows);
    }
}

/// Render the rows around the current difference, or the top of both
/// documents when nothing is selected.
pub fn render_window(engine: &DiffEngine, opts: &RenderOptions) -> Vec<String> {
    let mut surface = TerminalSurface::default();
    engine.present(&mut surface);

    let rows = Side::BOTH.map(|side| engine.visual_rows(side));
    let anchors = Side::BOTH.map(|side| anchor_row(engine, &surface, side));
    let span = Side::BOTH
        .iter()
        .filter_map(|&side| surface.focus_range(side).map(|r| r.len()))
        .max()
        .unwrap_or(1)
        .max(1);
    let height = span + 2 * opts.context;
    let starts = anchors.map(|anchor| anchor.saturating_sub(opts.context));
    let column = column_width(opts);

    let mut out = Vec::with_capacity(height);
    for offset in 0..height {
        let visual = starts.map(|start| start + offset);
        if visual[0] >= rows[0].len() && visual[1] >= rows[1].len() {
            break;
        }
        let mut line = String::new();
        for side in Side::BOTH {
            if side == Side::Right {
                line.push_str(&paint(theme::DIVIDER_STR, theme::divider_style(), opts.color));
            }
            let row = visual[slot(side)];
            line.push_str(&cell(engine, &surface, side, row, rows[slot(side)].get(row), column, opts));
        }
        out.push(line);
    }
    out
}

fn anchor_row(engine: &DiffEngine, surface: &TerminalSurface, side: Side) -> usize {
    if let Some(range) = surface.focus_range(side) {
        return range.start;
    }
    match engine.current_block() {
        Some(block) => engine.spacers().visual_range(side, block.range(side)).start,
        None => 0,
    }
}

fn column_width(opts: &RenderOptions) -> usize {
    let gutter = if opts.gutter { theme::GUTTER_WIDTH } else { 1 };
    let fixed = 2 * gutter + UnicodeWidthStr::width(theme::DIVIDER_STR);
    (opts.width.saturating_sub(fixed) / 2).max(MIN_COLUMN)
}

fn cell(
    engine: &DiffEngine,
    surface: &TerminalSurface,
    side: Side,
    row: usize,
    visual: Option<&VisualRow>,
    column: usize,
    opts: &RenderOptions,
) -> String {
    let focused = surface.is_focused(side, row);
    let marker = if focused { theme::FOCUS_MARKER } else { ' ' };
    let gutter = if opts.gutter {
        match engine.gutter_number(side, row).filter(|_| visual.is_some() && !surface.is_spacer(side, row)) {
            Some(n) => format!("{:>4}{}", n, marker),
            None => format!("    {}", marker),
        }
    } else {
        marker.to_string()
    };

    let text = match visual {
        Some(VisualRow::Content(line)) => engine.lines(side)[*line].replace('\t', TAB),
        _ => String::new(),
    };
    let text = fit(&text, column);

    let style = if focused {
        Some(theme::current_style())
    } else {
        surface.highlight_at(side, row).map(theme::highlight_style)
    };
    let mut out = paint(&gutter, theme::gutter_style(), opts.color);
    match style {
        Some(style) => out.push_str(&paint(&text, style, opts.color)),
        None => out.push_str(&text),
    }
    out
}

/// Truncate or pad to exactly `width` display columns.
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    if UnicodeWidthStr::width(text) > width {
        let limit = width.saturating_sub(1);
        for ch in text.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if used + w > limit {
                break;
            }
            out.push(ch);
            used += w;
        }
        if width > 0 {
            out.push('…');
            used += 1;
        }
    } else {
        out.push_str(text);
        used = UnicodeWidthStr::width(text);
    }
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(used)));
    out
}

fn term_color(color: twinline_core::Color) -> TermColor {
    TermColor::Rgb { r: color.r, g: color.g, b: color.b }
}

fn paint(text: &str, style: TextStyle, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    let mut content = ContentStyle::new();
    content.foreground_color = style.foreground.map(term_color);
    content.background_color = style.background.map(term_color);
    if style.bold {
        content.attributes.set(Attribute::Bold);
    }
    if style.dim {
        content.attributes.set(Attribute::Dim);
    }
    content.apply(text).to_string()
}
