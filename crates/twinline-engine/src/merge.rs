// Merge buffer: text picked from either side, appended fragment by fragment,
// with undo/redo of appends and clears.

use twinline_core::{MergeChoice, Side};

use crate::blocks::DiffBlock;
use crate::lines::LineSequence;

/// Literal text of a block for `choice`, left before right for `UseBoth`.
/// Block ranges index the line sequences directly, so spacer rows can never
/// end up in the result.
pub fn compose(left: &LineSequence, right: &LineSequence, block: &DiffBlock, choice: MergeChoice) -> String {
    choice
        .sides()
        .iter()
        .map(|&side| match side {
            Side::Left => left.slice_text(block.left),
            Side::Right => right.slice_text(block.right),
        })
        .collect()
}

/// A single reversible merge action.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MergeOp {
    Append(String),
    /// Holds the fragments that were cleared.
    Clear(Vec<String>),
}

#[derive(Debug, Default)]
pub struct MergeBuffer {
    fragments: Vec<String>,
    undo_stack: Vec<MergeOp>,
    redo_stack: Vec<MergeOp>,
}

impl MergeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the end. Empty text is ignored and reported as `false`.
    pub fn append(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.fragments.push(text.to_string());
        self.undo_stack.push(MergeOp::Append(text.to_string()));
        self.redo_stack.clear();
        true
    }

    /// Empty the buffer. Clearing an empty buffer records nothing.
    pub fn clear(&mut self) {
        if self.fragments.is_empty() {
            return;
        }
        let cleared = std::mem::take(&mut self.fragments);
        self.undo_stack.push(MergeOp::Clear(cleared));
        self.redo_stack.clear();
    }

    /// Revert the last append or clear. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(op) = self.undo_stack.pop() else {
            return false;
        };
        match &op {
            MergeOp::Append(_) => {
                self.fragments.pop();
            }
            MergeOp::Clear(cleared) => {
                self.fragments = cleared.clone();
            }
        }
        self.redo_stack.push(op);
        true
    }

    /// Re-apply the last undone action. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(op) = self.redo_stack.pop() else {
            return false;
        };
        match &op {
            MergeOp::Append(text) => self.fragments.push(text.clone()),
            MergeOp::Clear(_) => self.fragments.clear(),
        }
        self.undo_stack.push(op);
        true
    }

    pub fn text(&self) -> String {
        self.fragments.concat()
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.fragments.iter().all(|f| f.trim().is_empty())
    }
}
