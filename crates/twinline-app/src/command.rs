// Session commands: one line of input maps to one engine call.

use std::path::PathBuf;

use thiserror::Error;
use twinline_core::{MergeChoice, Side};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(Side, PathBuf),
    Compare,
    Sync(bool),
    Next,
    Prev,
    Merge(MergeChoice),
    Undo,
    Redo,
    Clear,
    Show,
    Merged,
    Save(Option<PathBuf>),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    Unknown(String),
    #[error("'{command}' needs {expected}.")]
    MissingArgument { command: &'static str, expected: &'static str },
    #[error("'{command}' does not understand '{value}' (expected {expected}).")]
    BadArgument { command: &'static str, value: String, expected: &'static str },
}

pub const HELP: &str = "\
Commands:
  load left|right PATH   replace one document
  compare                find differences
  sync on|off            pad both sides so differences line up
  next | n               go to the next difference
  prev | p               go to the previous difference
  use left|right|both    append the current difference to the merge
  undo / redo            revert or re-apply the last merge action
  clear                  empty the merged document
  show                   display the current difference
  merged                 print the merged document
  save [PATH]            write the merged document
  help                   this text
  quit | q               leave";

fn parse_side(command: &'static str, value: Option<&str>) -> Result<Side, CommandError> {
    match value {
        Some("left") => Ok(Side::Left),
        Some("right") => Ok(Side::Right),
        Some(other) => Err(CommandError::BadArgument {
            command,
            value: other.to_string(),
            expected: "left or right",
        }),
        None => Err(CommandError::MissingArgument { command, expected: "left or right" }),
    }
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = if rest.is_empty() { None } else { Some(rest) };

    let command = match word {
        "load" => {
            let (side, path) = match arg.and_then(|a| a.split_once(char::is_whitespace)) {
                Some((side, path)) => (Some(side), path.trim()),
                None => (arg, ""),
            };
            let side = parse_side("load", side)?;
            if path.is_empty() {
                return Err(CommandError::MissingArgument { command: "load", expected: "a file path" });
            }
            Command::Load(side, PathBuf::from(path))
        }
        "compare" | "c" => Command::Compare,
        "sync" => match arg {
            Some("on") => Command::Sync(true),
            Some("off") => Command::Sync(false),
            Some(other) => {
                return Err(CommandError::BadArgument {
                    command: "sync",
                    value: other.to_string(),
                    expected: "on or off",
                })
            }
            None => return Err(CommandError::MissingArgument { command: "sync", expected: "on or off" }),
        },
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "use" => match arg {
            Some(name) => match MergeChoice::from_name(name) {
                Some(choice) => Command::Merge(choice),
                None => {
                    return Err(CommandError::BadArgument {
                        command: "use",
                        value: name.to_string(),
                        expected: "left, right or both",
                    })
                }
            },
            None => {
                return Err(CommandError::MissingArgument { command: "use", expected: "left, right or both" })
            }
        },
        "undo" => Command::Undo,
        "redo" => Command::Redo,
        "clear" => Command::Clear,
        "show" | "s" => Command::Show,
        "merged" => Command::Merged,
        "save" => Command::Save(arg.map(PathBuf::from)),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}
