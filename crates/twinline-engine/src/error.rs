use thiserror::Error;
use twinline_core::MergeChoice;

/// Informational outcomes the caller should show the user. None of these
/// leave the engine in a bad state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("No difference selected.")]
    NoActiveBlock,
    #[error("Nothing to merge for this choice ({0}).")]
    EmptySelection(MergeChoice),
    #[error("Nothing to undo.")]
    NothingToUndo,
    #[error("Nothing to redo.")]
    NothingToRedo,
}
