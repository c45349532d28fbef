// Line-oriented command session over a DiffEngine.
//
// Each command runs to completion and prints one status line, followed by
// the side-by-side window when the view changed.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use twinline_core::Side;
use twinline_engine::{BlockSummary, DiffEngine, EngineError};

use crate::command::{self, Command, HELP};
use crate::files;
use crate::render::{self, RenderOptions};

pub const GREETING: &str = "Load two files, then type 'compare'. Type 'help' for commands.";
const PROMPT: &str = "twinline> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<W: Write> {
    engine: DiffEngine,
    paths: [Option<PathBuf>; 2],
    output_path: Option<PathBuf>,
    render: RenderOptions,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(engine: DiffEngine, render: RenderOptions, out: W) -> Self {
        Self { engine, paths: [None, None], output_path: None, render, out }
    }

    /// Default target for `save` without an argument.
    pub fn with_output_path(mut self, path: Option<PathBuf>) -> Self {
        self.output_path = path;
        self
    }

    #[cfg(test)]
    pub fn engine(&self) -> &DiffEngine {
        &self.engine
    }

    pub fn path(&self, side: Side) -> Option<&Path> {
        self.paths[side_slot(side)].as_deref()
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn status(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message)
    }

    /// Read commands until end of input or `quit`.
    pub fn run<R: BufRead>(&mut self, input: R, prompt: bool) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(self.out, "{}", PROMPT)?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else { break };
            let line = line?;
            match command::parse(&line) {
                Ok(Some(cmd)) => {
                    if self.execute(cmd)? == Flow::Quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => self.status(&e.to_string())?,
            }
        }
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> io::Result<Flow> {
        log::debug!("command: {:?}", command);
        match command {
            Command::Load(side, path) => self.load(side, &path)?,
            Command::Compare => self.compare()?,
            Command::Sync(enabled) => {
                self.engine.set_alignment_enabled(enabled);
                if enabled {
                    self.status("Sync view enabled. Scrolls are now linked.")?;
                } else {
                    self.status("Sync view disabled.")?;
                }
                if self.engine.current_block().is_some() {
                    self.show_window()?;
                }
            }
            Command::Next => {
                let moved = self.engine.next();
                self.navigated(moved)?;
            }
            Command::Prev => {
                let moved = self.engine.prev();
                self.navigated(moved)?;
            }
            Command::Merge(choice) => match self.engine.merge_current(choice) {
                Ok(_) => self.status("Appended selection to the merged document.")?,
                Err(e) => self.status(&e.to_string())?,
            },
            Command::Undo => match self.engine.undo_merge() {
                Ok(()) => self.status("Undid the last merge action.")?,
                Err(e) => self.status(&e.to_string())?,
            },
            Command::Redo => match self.engine.redo_merge() {
                Ok(()) => self.status("Redid the last merge action.")?,
                Err(e) => self.status(&e.to_string())?,
            },
            Command::Clear => {
                self.engine.clear_merge();
                self.status("Cleared merged document.")?;
            }
            Command::Show => self.show()?,
            Command::Merged => {
                let text = self.engine.merge_text();
                if text.is_empty() {
                    self.status("Merged document is empty.")?;
                } else {
                    write!(self.out, "{}", text)?;
                    if !text.ends_with('\n') {
                        writeln!(self.out)?;
                    }
                }
            }
            Command::Save(path) => self.save(path)?,
            Command::Help => self.status(HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Read the whole file before touching the engine; a failed read leaves
    /// the previous document in place.
    pub fn load(&mut self, side: Side, path: &Path) -> io::Result<()> {
        match files::load_document(path) {
            Ok(doc) => {
                self.engine.set_side(side, doc);
                self.paths[side_slot(side)] = Some(path.to_path_buf());
                self.status(&format!("Loaded {} file: {}", side, path.display()))
            }
            Err(e) => {
                log::error!("Failed to read {}: {}", path.display(), e);
                self.status(&format!("Could not open file: {}: {}", path.display(), e))
            }
        }
    }

    fn compare(&mut self) -> io::Result<()> {
        log::info!(
            "comparing {} with {}",
            self.path(Side::Left).map_or("<none>".into(), |p| p.display().to_string()),
            self.path(Side::Right).map_or("<none>".into(), |p| p.display().to_string())
        );
        let report = self.engine.compare();
        if report.identical {
            return self.status("The documents are identical.");
        }
        self.status(&format!("Found {} differing block(s).", report.block_count))?;
        self.show()
    }

    fn navigated(&mut self, moved: Result<BlockSummary, EngineError>) -> io::Result<()> {
        match moved {
            Ok(_) => self.show(),
            Err(e) => self.status(&e.to_string()),
        }
    }

    fn show(&mut self) -> io::Result<()> {
        match self.engine.current_summary() {
            Some(summary) => {
                self.status(&format!("Viewing difference {} of {}", summary.position, summary.total))?;
            }
            None if !self.engine.is_compared() => {
                self.status("Not compared yet.")?;
            }
            None => {}
        }
        self.show_window()
    }

    fn show_window(&mut self) -> io::Result<()> {
        for line in render::render_window(&self.engine, &self.render) {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    fn save(&mut self, path: Option<PathBuf>) -> io::Result<()> {
        if self.engine.merge_buffer().is_blank() {
            return self.status("Merged document is empty.");
        }
        let Some(path) = path.or_else(|| self.output_path.clone()) else {
            return self.status("No output path. Use 'save PATH' or start with --output PATH.");
        };
        match files::save_text(&path, &self.engine.merge_text()) {
            Ok(()) => self.status(&format!("Merged file saved to: {}", path.display())),
            Err(e) => {
                log::error!("Failed to write {}: {}", path.display(), e);
                self.status(&format!("Could not save file: {}", e))
            }
        }
    }
}

fn side_slot(side: Side) -> usize {
    match side {
        Side::Left => 0,
        Side::Right => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;

    fn session() -> Session<Vec<u8>> {
        let render = RenderOptions { width: 33, context: 1, color: false, gutter: true };
        Session::new(DiffEngine::new(), render, Vec::new())
    }

    fn run_script(session: &mut Session<Vec<u8>>, script: &str) {
        session.run(Cursor::new(script.to_string()), false).unwrap();
    }

    fn output(session: Session<Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    fn write_pair(dir: &Path) -> (PathBuf, PathBuf) {
        let left = dir.join("left.txt");
        let right = dir.join("right.txt");
        fs::write(&left, "one\ntwo\nthree\n").unwrap();
        fs::write(&right, "one\nTWO\nthree\n").unwrap();
        (left, right)
    }

    #[test]
    fn compare_merge_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let (left, right) = write_pair(dir.path());
        let target = dir.path().join("merged.txt");
        let mut s = session();
        run_script(
            &mut s,
            &format!(
                "load left {}\nload right {}\ncompare\nuse right\nsave {}\n",
                left.display(),
                right.display(),
                target.display()
            ),
        );
        assert_eq!(s.path(Side::Left), Some(left.as_path()));
        let out = output(s);
        assert!(out.contains(&format!("Loaded left file: {}", left.display())));
        assert!(out.contains("Found 1 differing block(s)."));
        assert!(out.contains("Viewing difference 1 of 1"));
        assert!(out.contains("Appended selection to the merged document."));
        assert!(out.contains("Merged file saved to:"));
        assert_eq!(fs::read_to_string(&target).unwrap(), "TWO\n");
    }

    #[test]
    fn identical_documents() {
        let dir = tempfile::tempdir().unwrap();
        let (left, _) = write_pair(dir.path());
        let mut s = session();
        run_script(&mut s, &format!("load left {0}\nload right {0}\ncompare\nnext\n", left.display()));
        let out = output(s);
        assert!(out.contains("The documents are identical."));
        assert!(out.contains("No difference selected."));
    }

    #[test]
    fn failed_load_keeps_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let (left, _) = write_pair(dir.path());
        let mut s = session();
        run_script(&mut s, &format!("load left {}\nload left {}\n", left.display(), dir.path().join("nope").display()));
        assert_eq!(s.engine().lines(Side::Left).len(), 3);
        assert_eq!(s.path(Side::Left), Some(left.as_path()));
        assert!(output(s).contains("Could not open file:"));
    }

    #[test]
    fn save_refuses_blank_merge() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");
        let mut s = session();
        run_script(&mut s, &format!("save {}\n", target.display()));
        assert!(output(s).contains("Merged document is empty."));
        assert!(!target.exists());
    }

    #[test]
    fn save_falls_back_to_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let (left, right) = write_pair(dir.path());
        let target = dir.path().join("default.txt");
        let mut s = session().with_output_path(Some(target.clone()));
        run_script(
            &mut s,
            &format!("load left {}\nload right {}\ncompare\nuse both\nsave\n", left.display(), right.display()),
        );
        assert_eq!(fs::read_to_string(&target).unwrap(), "two\nTWO\n");
    }

    #[test]
    fn save_without_any_path() {
        let dir = tempfile::tempdir().unwrap();
        let (left, right) = write_pair(dir.path());
        let mut s = session();
        run_script(&mut s, &format!("load left {}\nload right {}\nc\nuse left\nsave\n", left.display(), right.display()));
        assert!(output(s).contains("No output path."));
    }

    #[test]
    fn undo_redo_and_merged_listing() {
        let dir = tempfile::tempdir().unwrap();
        let (left, right) = write_pair(dir.path());
        let mut s = session();
        run_script(
            &mut s,
            &format!(
                "load left {}\nload right {}\ncompare\nuse left\nundo\nundo\nredo\nmerged\n",
                left.display(),
                right.display()
            ),
        );
        assert_eq!(s.engine().merge_text(), "two\n");
        let out = output(s);
        assert!(out.contains("Undid the last merge action."));
        assert!(out.contains("Nothing to undo."));
        assert!(out.contains("Redid the last merge action."));
        assert!(out.ends_with("two\n"));
    }

    #[test]
    fn sync_messages() {
        let mut s = session();
        run_script(&mut s, "sync on\nsync off\n");
        assert!(!s.engine().alignment_enabled());
        let out = output(s);
        assert!(out.contains("Sync view enabled. Scrolls are now linked."));
        assert!(out.contains("Sync view disabled."));
    }

    #[test]
    fn errors_and_quit() {
        let mut s = session();
        run_script(&mut s, "bogus\n# comment\nuse left\nquit\nuse right\n");
        let out = output(s);
        assert!(out.contains("Unknown command 'bogus'."));
        // Only the merge before `quit` ran.
        assert_eq!(out.matches("No difference selected.").count(), 1);
    }

    #[test]
    fn prompt_is_written_per_line() {
        let mut s = session();
        s.run(Cursor::new("help\n"), true).unwrap();
        let out = output(s);
        assert!(out.starts_with(PROMPT));
        assert!(out.contains("Commands:"));
        assert_eq!(out.matches(PROMPT).count(), 2);
    }
}
