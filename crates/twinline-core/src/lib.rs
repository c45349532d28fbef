use std::fmt;

// ──────────────────────────────────────────────
// Sides
// ──────────────────────────────────────────────

/// One of the two documents being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn name(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ──────────────────────────────────────────────
// Ranges
// ──────────────────────────────────────────────

/// Half-open range of 0-based line indices `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, line: usize) -> bool {
        line >= self.start && line < self.end
    }

    /// The same range shifted down by `offset` rows.
    pub const fn offset(&self, offset: usize) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }
}

impl From<(usize, usize)> for LineRange {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

// ──────────────────────────────────────────────
// Edit script
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Equal,
    Insert,
    Delete,
    Replace,
}

impl OpKind {
    pub fn name(self) -> &'static str {
        match self {
            OpKind::Equal => "equal",
            OpKind::Insert => "insert",
            OpKind::Delete => "delete",
            OpKind::Replace => "replace",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One step of an edit script: `left[left.start..left.end]` relates to
/// `right[right.start..right.end]` as described by `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode {
    pub kind: OpKind,
    pub left: LineRange,
    pub right: LineRange,
}

impl Opcode {
    pub const fn new(
        kind: OpKind,
        left_start: usize,
        left_end: usize,
        right_start: usize,
        right_end: usize,
    ) -> Self {
        Self {
            kind,
            left: LineRange::new(left_start, left_end),
            right: LineRange::new(right_start, right_end),
        }
    }
}

// ──────────────────────────────────────────────
// Highlighting
// ──────────────────────────────────────────────

/// How a populated block side should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightStyle {
    /// Lines only present on the left.
    Delete,
    /// Lines only present on the right.
    Insert,
    /// Lines present on both sides but different.
    Replace,
}

/// A padding run: `count` blank rows inserted after visual line `at`
/// (1-based), which is also the 0-based index of the first spacer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpacerRun {
    pub side: Side,
    pub at: usize,
    pub count: usize,
}

impl SpacerRun {
    pub fn rows(&self) -> LineRange {
        LineRange::new(self.at, self.at + self.count)
    }
}

// ──────────────────────────────────────────────
// Merging
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeChoice {
    UseLeft,
    UseRight,
    UseBoth,
}

impl MergeChoice {
    /// Sides to copy from, in concatenation order.
    pub fn sides(self) -> &'static [Side] {
        match self {
            MergeChoice::UseLeft => &[Side::Left],
            MergeChoice::UseRight => &[Side::Right],
            MergeChoice::UseBoth => &[Side::Left, Side::Right],
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(MergeChoice::UseLeft),
            "right" => Some(MergeChoice::UseRight),
            "both" => Some(MergeChoice::UseBoth),
            _ => None,
        }
    }
}

impl fmt::Display for MergeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MergeChoice::UseLeft => "left",
            MergeChoice::UseRight => "right",
            MergeChoice::UseBoth => "both",
        })
    }
}

// ──────────────────────────────────────────────
// Colors
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
}

// ──────────────────────────────────────────────
// Text Styling
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub bold: bool,
    pub dim: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            foreground: None,
            background: None,
            bold: false,
            dim: false,
        }
    }
}

// ──────────────────────────────────────────────
// Trait: DiffSurface
// ──────────────────────────────────────────────

/// Anything that displays the two compared documents.
/// The engine reports what to highlight and where padding goes;
/// the surface decides how that looks.
/// All row numbers are 0-based visual rows.
pub trait DiffSurface {
    /// Forget all highlights, spacers and focus from a previous report.
    fn clear(&mut self);
    fn highlight(&mut self, side: Side, rows: LineRange, style: HighlightStyle);
    fn spacer(&mut self, run: SpacerRun);
    /// Mark the rows of the currently selected block.
    fn focus(&mut self, side: Side, rows: LineRange);
}
