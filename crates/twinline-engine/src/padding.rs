// Alignment padding: blank spacer rows that keep both sides in visual
// lockstep, so every block starts on the same row on the left and right.
//
// Spacer rows never touch the line sequences themselves; they live in a
// separate map from visual rows to logical lines.

use twinline_core::{LineRange, OpKind, Opcode, Side, SpacerRun};

/// One row of a padded side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualRow {
    /// Logical line index into the side's line sequence.
    Content(usize),
    Spacer,
}

/// Spacer runs per side, in ascending visual order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpacerMap {
    left: Vec<SpacerRun>,
    right: Vec<SpacerRun>,
}

impl SpacerMap {
    /// Walk the edit script and pad the shorter side of every unbalanced
    /// block right after that block's last row.
    pub fn compute(opcodes: &[Opcode]) -> Self {
        let mut map = Self::default();
        let mut left_offset = 0;
        let mut right_offset = 0;
        for op in opcodes {
            if op.kind == OpKind::Equal {
                continue;
            }
            let left_len = op.left.len();
            let right_len = op.right.len();
            if left_len > right_len {
                let count = left_len - right_len;
                map.right.push(SpacerRun { side: Side::Right, at: op.right.end + right_offset, count });
                right_offset += count;
            } else if right_len > left_len {
                let count = right_len - left_len;
                map.left.push(SpacerRun { side: Side::Left, at: op.left.end + left_offset, count });
                left_offset += count;
            }
        }
        map
    }

    pub fn runs(&self, side: Side) -> &[SpacerRun] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// Total spacer rows on one side.
    pub fn spacer_count(&self, side: Side) -> usize {
        self.runs(side).iter().map(|r| r.count).sum()
    }

    /// Number of rows a side of `logical_len` lines occupies once padded.
    pub fn visual_len(&self, side: Side, logical_len: usize) -> usize {
        logical_len + self.spacer_count(side)
    }

    pub fn is_spacer(&self, side: Side, visual: usize) -> bool {
        self.runs(side).iter().any(|r| r.rows().contains(visual))
    }

    /// Visual row of a logical line. `logical` must name a real line of
    /// the side; an index at or past the end lands after any trailing
    /// spacers. Use [`SpacerMap::visual_range`] for block positions, which
    /// handles empty ranges.
    pub fn visual_line(&self, side: Side, logical: usize) -> usize {
        let mut shift = 0;
        for run in self.runs(side) {
            if run.at > logical + shift {
                break;
            }
            shift += run.count;
        }
        logical + shift
    }

    /// Logical line shown on a visual row, `None` on spacer rows.
    pub fn logical_line(&self, side: Side, visual: usize) -> Option<usize> {
        let mut shift = 0;
        for run in self.runs(side) {
            if visual < run.at {
                break;
            }
            if run.rows().contains(visual) {
                return None;
            }
            shift += run.count;
        }
        Some(visual - shift)
    }

    /// Visual rows covering a logical range. An empty range maps to the
    /// row right after the preceding line, ahead of any spacers there.
    pub fn visual_range(&self, side: Side, range: LineRange) -> LineRange {
        if range.is_empty() {
            let at = match range.start {
                0 => 0,
                start => self.visual_line(side, start - 1) + 1,
            };
            return LineRange::new(at, at);
        }
        let start = self.visual_line(side, range.start);
        let end = self.visual_line(side, range.end - 1) + 1;
        LineRange::new(start, end)
    }

    /// Every row of one side, spacers included.
    pub fn visual_rows(&self, side: Side, logical_len: usize) -> Vec<VisualRow> {
        let total = self.visual_len(side, logical_len);
        (0..total)
            .map(|v| match self.logical_line(side, v) {
                Some(line) => VisualRow::Content(line),
                None => VisualRow::Spacer,
            })
            .collect()
    }
}

/// Applies and clears spacers. Applying twice without clearing is a no-op,
/// so rows are never padded twice.
#[derive(Debug, Default)]
pub struct AlignmentPadder {
    map: SpacerMap,
    applied: bool,
}

impl AlignmentPadder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if spacers were computed by this call.
    pub fn apply(&mut self, opcodes: &[Opcode]) -> bool {
        if self.applied {
            return false;
        }
        self.map = SpacerMap::compute(opcodes);
        self.applied = true;
        log::debug!(
            "alignment spacers applied: left={} right={}",
            self.map.spacer_count(Side::Left),
            self.map.spacer_count(Side::Right)
        );
        true
    }

    pub fn clear(&mut self) {
        self.map = SpacerMap::default();
        self.applied = false;
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// Current spacers; empty when not applied.
    pub fn map(&self) -> &SpacerMap {
        &self.map
    }
}
