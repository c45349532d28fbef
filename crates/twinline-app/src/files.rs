// Document I/O: UTF-8 text in, merged text out.

use std::fs;
use std::io;
use std::path::Path;

use twinline_engine::LineSequence;

/// Read and split a document. Nothing is handed to the engine unless the
/// whole read succeeds.
pub fn load_document(path: &Path) -> io::Result<LineSequence> {
    let content = fs::read_to_string(path)?;
    log::info!("read {} bytes from {}", content.len(), path.display());
    Ok(LineSequence::from_text(&content))
}

pub fn save_text(path: &Path, content: &str) -> io::Result<()> {
    fs::write(path, content)?;
    log::info!("wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
