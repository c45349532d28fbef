// Difference blocks: the non-equal opcodes, in document order.

use twinline_core::{HighlightStyle, LineRange, OpKind, Opcode, Side};

/// One navigable difference between the two documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffBlock {
    pub kind: OpKind,
    pub left: LineRange,
    pub right: LineRange,
}

/// A block side that has lines to highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub range: LineRange,
    pub style: HighlightStyle,
}

impl DiffBlock {
    pub fn range(&self, side: Side) -> LineRange {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Highlight for one side, absent when that side's range is empty.
    /// Replace blocks keep their own style; otherwise the left side reads as
    /// a deletion and the right side as an insertion.
    pub fn highlight(&self, side: Side) -> Option<Highlight> {
        let range = self.range(side);
        if range.is_empty() {
            return None;
        }
        let style = match (self.kind, side) {
            (OpKind::Replace, _) => HighlightStyle::Replace,
            (_, Side::Left) => HighlightStyle::Delete,
            (_, Side::Right) => HighlightStyle::Insert,
        };
        Some(Highlight { range, style })
    }
}

/// Promote every non-equal opcode to a block, keeping opcode order.
pub fn extract_blocks(opcodes: &[Opcode]) -> Vec<DiffBlock> {
    opcodes
        .iter()
        .filter(|op| op.kind != OpKind::Equal)
        .map(|op| DiffBlock { kind: op.kind, left: op.left, right: op.right })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(kind: OpKind, l: (usize, usize), r: (usize, usize)) -> DiffBlock {
        DiffBlock { kind, left: l.into(), right: r.into() }
    }

    #[test]
    fn equal_opcodes_are_skipped() {
        let ops = vec![
            Opcode::new(OpKind::Equal, 0, 1, 0, 1),
            Opcode::new(OpKind::Replace, 1, 2, 1, 2),
            Opcode::new(OpKind::Equal, 2, 3, 2, 3),
            Opcode::new(OpKind::Insert, 3, 3, 3, 5),
        ];
        assert_eq!(
            extract_blocks(&ops),
            vec![block(OpKind::Replace, (1, 2), (1, 2)), block(OpKind::Insert, (3, 3), (3, 5))]
        );
    }

    #[test]
    fn no_differences_no_blocks() {
        assert!(extract_blocks(&[Opcode::new(OpKind::Equal, 0, 4, 0, 4)]).is_empty());
        assert!(extract_blocks(&[]).is_empty());
    }

    #[test]
    fn insert_has_no_left_highlight() {
        let b = block(OpKind::Insert, (2, 2), (2, 4));
        assert_eq!(b.highlight(Side::Left), None);
        assert_eq!(
            b.highlight(Side::Right),
            Some(Highlight { range: LineRange::new(2, 4), style: HighlightStyle::Insert })
        );
    }

    #[test]
    fn delete_has_no_right_highlight() {
        let b = block(OpKind::Delete, (1, 2), (1, 1));
        assert_eq!(b.highlight(Side::Right), None);
        assert_eq!(b.highlight(Side::Left).map(|h| h.style), Some(HighlightStyle::Delete));
    }

    #[test]
    fn replace_styles_both_sides() {
        let b = block(OpKind::Replace, (0, 1), (0, 3));
        assert_eq!(b.highlight(Side::Left).map(|h| h.style), Some(HighlightStyle::Replace));
        assert_eq!(b.highlight(Side::Right).map(|h| h.style), Some(HighlightStyle::Replace));
    }
}
