// twinline-engine: line diff, block navigation, alignment padding and merging.

pub mod blocks;
pub mod error;
pub mod lines;
pub mod matcher;
pub mod merge;
pub mod navigator;
pub mod padding;


use twinline_core::{DiffSurface, LineRange, MergeChoice, OpKind, Opcode, Side};

use blocks::DiffBlock;
use matcher::{AlignerOptions, SequenceMatcher};
use merge::MergeBuffer;
use navigator::BlockNavigator;
use padding::{AlignmentPadder, SpacerMap, VisualRow};

pub use error::EngineError;
pub use lines::LineSequence;

/// Result of a comparison pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareReport {
    pub block_count: usize,
    pub identical: bool,
}

/// The block under the cursor, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSummary {
    pub index: usize,
    /// 1-based position, for "difference 2 of 5".
    pub position: usize,
    pub total: usize,
    pub kind: OpKind,
    pub left: LineRange,
    pub right: LineRange,
}

/// Owns both documents, the comparison derived from them, the block cursor
/// and the merge buffer. One instance serves one compare/merge session;
/// every mutating call runs to completion before the next.
pub struct DiffEngine {
    left: LineSequence,
    right: LineSequence,
    options: AlignerOptions,
    opcodes: Vec<Opcode>,
    blocks: Vec<DiffBlock>,
    compared: bool,
    alignment_enabled: bool,
    padder: AlignmentPadder,
    navigator: BlockNavigator,
    merge: MergeBuffer,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffEngine {
    pub fn new() -> Self {
        Self::with_options(AlignerOptions::default())
    }

    pub fn with_options(options: AlignerOptions) -> Self {
        Self {
            left: LineSequence::new(),
            right: LineSequence::new(),
            options,
            opcodes: Vec::new(),
            blocks: Vec::new(),
            compared: false,
            alignment_enabled: false,
            padder: AlignmentPadder::new(),
            navigator: BlockNavigator::new(),
            merge: MergeBuffer::new(),
        }
    }

    pub fn set_left(&mut self, lines: LineSequence) {
        self.set_side(Side::Left, lines);
    }

    pub fn set_right(&mut self, lines: LineSequence) {
        self.set_side(Side::Right, lines);
    }

    /// Replace one document. Any previous comparison is dropped.
    pub fn set_side(&mut self, side: Side, lines: LineSequence) {
        match side {
            Side::Left => self.left = lines,
            Side::Right => self.right = lines,
        }
        self.invalidate();
    }

    pub fn lines(&self, side: Side) -> &LineSequence {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn invalidate(&mut self) {
        self.opcodes.clear();
        self.blocks.clear();
        self.compared = false;
        self.padder.clear();
        self.navigator.clear();
    }

    /// Align both documents and rebuild the block list. The cursor moves to
    /// the first block; spacers are recomputed if alignment is on.
    pub fn compare(&mut self) -> CompareReport {
        self.invalidate();
        for side in Side::BOTH {
            if self.lines(side).is_empty() {
                log::warn!("{} document is empty, comparing against no lines", side);
            }
        }

        let left = self.left.texts();
        let right = self.right.texts();
        self.opcodes = SequenceMatcher::new(&left, &right, self.options).opcodes();
        self.blocks = blocks::extract_blocks(&self.opcodes);
        self.compared = true;
        log::debug!(
            "compared {} vs {} lines: {} opcodes, {} blocks",
            left.len(),
            right.len(),
            self.opcodes.len(),
            self.blocks.len()
        );

        self.navigator.reset(self.blocks.len());
        if self.alignment_enabled && !self.blocks.is_empty() {
            self.padder.apply(&self.opcodes);
        }

        CompareReport { block_count: self.blocks.len(), identical: self.blocks.is_empty() }
    }

    pub fn is_compared(&self) -> bool {
        self.compared
    }

    pub fn opcodes(&self) -> &[Opcode] {
        &self.opcodes
    }

    pub fn blocks(&self) -> &[DiffBlock] {
        &self.blocks
    }

    // ── Alignment ─────────────────────────────

    /// Turn spacer padding on or off. Repeating the current state changes
    /// nothing. Returns the new state.
    pub fn set_alignment_enabled(&mut self, enabled: bool) -> bool {
        self.alignment_enabled = enabled;
        if enabled {
            if self.compared {
                self.padder.apply(&self.opcodes);
            }
        } else {
            self.padder.clear();
        }
        enabled
    }

    pub fn alignment_enabled(&self) -> bool {
        self.alignment_enabled
    }

    /// Spacers currently applied (empty when alignment is off).
    pub fn spacers(&self) -> &SpacerMap {
        self.padder.map()
    }

    /// Rows of one side as currently displayed.
    pub fn visual_rows(&self, side: Side) -> Vec<VisualRow> {
        self.spacers().visual_rows(side, self.lines(side).len())
    }

    /// 1-based gutter number for a visual row, `None` on spacer rows.
    pub fn gutter_number(&self, side: Side, visual: usize) -> Option<usize> {
        self.spacers().logical_line(side, visual).map(|line| line + 1)
    }

    // ── Navigation ────────────────────────────

    pub fn next(&mut self) -> Result<BlockSummary, EngineError> {
        self.navigator.next(self.blocks.len());
        self.current_summary().ok_or(EngineError::NoActiveBlock)
    }

    pub fn prev(&mut self) -> Result<BlockSummary, EngineError> {
        self.navigator.prev(self.blocks.len());
        self.current_summary().ok_or(EngineError::NoActiveBlock)
    }

    pub fn current_block(&self) -> Option<&DiffBlock> {
        self.navigator.current().and_then(|i| self.blocks.get(i))
    }

    pub fn current_summary(&self) -> Option<BlockSummary> {
        let index = self.navigator.current()?;
        let block = self.blocks.get(index)?;
        Some(BlockSummary {
            index,
            position: index + 1,
            total: self.blocks.len(),
            kind: block.kind,
            left: block.left,
            right: block.right,
        })
    }

    // ── Merging ───────────────────────────────

    /// Append the current block's text from the chosen side(s) to the merge
    /// buffer and return what was appended.
    pub fn merge_current(&mut self, choice: MergeChoice) -> Result<String, EngineError> {
        let block = self.current_block().ok_or(EngineError::NoActiveBlock)?;
        let text = merge::compose(&self.left, &self.right, block, choice);
        if !self.merge.append(&text) {
            return Err(EngineError::EmptySelection(choice));
        }
        log::info!("merged {} bytes from {}", text.len(), choice);
        Ok(text)
    }

    pub fn clear_merge(&mut self) {
        self.merge.clear();
    }

    pub fn undo_merge(&mut self) -> Result<(), EngineError> {
        if self.merge.undo() {
            Ok(())
        } else {
            Err(EngineError::NothingToUndo)
        }
    }

    pub fn redo_merge(&mut self) -> Result<(), EngineError> {
        if self.merge.redo() {
            Ok(())
        } else {
            Err(EngineError::NothingToRedo)
        }
    }

    pub fn merge_text(&self) -> String {
        self.merge.text()
    }

    pub fn merge_buffer(&self) -> &MergeBuffer {
        &self.merge
    }

    // ── Reporting ─────────────────────────────

    /// Report highlights, spacers and the current block to a surface, in
    /// visual rows.
    pub fn present(&self, surface: &mut dyn DiffSurface) {
        surface.clear();
        let spacers = self.spacers();
        for block in &self.blocks {
            for side in Side::BOTH {
                if let Some(hl) = block.highlight(side) {
                    surface.highlight(side, spacers.visual_range(side, hl.range), hl.style);
                }
            }
        }
        for side in Side::BOTH {
            for run in spacers.runs(side) {
                surface.spacer(*run);
            }
        }
        if let Some(block) = self.current_block() {
            for side in Side::BOTH {
                let range = block.range(side);
                if !range.is_empty() {
                    surface.focus(side, spacers.visual_range(side, range));
                }
            }
        }
    }
}
