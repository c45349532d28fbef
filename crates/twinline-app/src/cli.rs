use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::settings::TwinlineSettings;

#[derive(Parser, Debug)]
#[command(name = "twinline")]
#[command(author, version, about = "Compare two text files side by side and build a merged result", long_about = None)]
pub struct Cli {
    /// Left document
    #[arg(value_name = "LEFT")]
    pub left: Option<PathBuf>,

    /// Right document
    #[arg(value_name = "RIGHT")]
    pub right: Option<PathBuf>,

    /// Pad both sides so differences line up row for row
    #[arg(long)]
    pub sync: bool,

    /// Plain output without colors
    #[arg(long)]
    pub no_color: bool,

    /// Use popular lines as alignment anchors even in large documents
    #[arg(long)]
    pub no_autojunk: bool,

    /// Rows of context around the current difference
    #[arg(long, value_name = "ROWS")]
    pub context: Option<usize>,

    /// Default path for `save`
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Store the effective settings as the new defaults
    #[arg(long)]
    pub save_settings: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Command-line flags win over stored settings.
    pub fn apply_to(&self, settings: &mut TwinlineSettings) {
        if self.sync {
            settings.sync_view = true;
        }
        if self.no_color {
            settings.color = false;
        }
        if self.no_autojunk {
            settings.autojunk = false;
        }
        if let Some(context) = self.context {
            settings.context = context;
        }
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_paths_and_flags() {
        let cli = Cli::parse_from(["twinline", "a.txt", "b.txt", "--sync", "-vv"]);
        assert_eq!(cli.left, Some(PathBuf::from("a.txt")));
        assert_eq!(cli.right, Some(PathBuf::from("b.txt")));
        assert!(cli.sync);
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn flags_override_settings() {
        let cli = Cli::parse_from(["twinline", "--no-color", "--no-autojunk", "--context", "9"]);
        let mut settings = TwinlineSettings::default();
        cli.apply_to(&mut settings);
        assert!(!settings.color);
        assert!(!settings.autojunk);
        assert_eq!(settings.context, 9);
        assert!(!settings.sync_view);
    }

    #[test]
    fn absent_flags_keep_settings() {
        let cli = Cli::parse_from(["twinline"]);
        let mut settings = TwinlineSettings { sync_view: true, color: false, ..TwinlineSettings::default() };
        cli.apply_to(&mut settings);
        assert!(settings.sync_view);
        assert!(!settings.color);
    }
}
