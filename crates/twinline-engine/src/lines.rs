// Line splitting: documents become ordered line sequences that remember
// their terminators, so extracted text round-trips byte-for-byte.

use std::ops::Index;

use twinline_core::LineRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Last line of a document with no trailing newline, or a bare line.
    #[default]
    None,
    Lf,
    CrLf,
    Cr,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::None => "",
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Cr => "\r",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub ending: LineEnding,
}

impl Line {
    pub fn bare(text: impl Into<String>) -> Self {
        Self { text: text.into(), ending: LineEnding::None }
    }
}

/// Immutable, index-addressable list of lines (0-based).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineSequence {
    lines: Vec<Line>,
}

impl LineSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split raw text on `\n`, `\r\n` and lone `\r`.
    /// A trailing terminator does not open an extra empty line.
    pub fn from_text(content: &str) -> Self {
        let mut lines = Vec::new();
        let bytes = content.as_bytes();
        let mut start = 0;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => {
                    lines.push(Line { text: content[start..i].to_string(), ending: LineEnding::Lf });
                    i += 1;
                    start = i;
                }
                b'\r' => {
                    let crlf = bytes.get(i + 1) == Some(&b'\n');
                    let ending = if crlf { LineEnding::CrLf } else { LineEnding::Cr };
                    lines.push(Line { text: content[start..i].to_string(), ending });
                    i += if crlf { 2 } else { 1 };
                    start = i;
                }
                _ => i += 1,
            }
        }
        if start < bytes.len() {
            lines.push(Line::bare(&content[start..]));
        }
        Self { lines }
    }

    /// Build from bare strings (no terminators).
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { lines: lines.into_iter().map(Line::bare).collect() }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(|l| l.text.as_str())
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Line contents only, the form the aligner compares.
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    /// Literal text of `range` including each line's terminator.
    /// Out-of-bounds parts of the range are ignored.
    pub fn slice_text(&self, range: LineRange) -> String {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        self.lines[start..end]
            .iter()
            .map(|l| format!("{}{}", l.text, l.ending.as_str()))
            .collect()
    }

    /// Reassemble the original document.
    pub fn to_text(&self) -> String {
        self.slice_text(LineRange::new(0, self.lines.len()))
    }

    /// Character count of the longest line.
    pub fn max_line_chars(&self) -> usize {
        self.lines.iter().map(|l| l.text.chars().count()).max().unwrap_or(0)
    }
}

impl Index<usize> for LineSequence {
    type Output = str;

    fn index(&self, idx: usize) -> &str {
        &self.lines[idx].text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_lines() {
        let seq = LineSequence::from_text("");
        assert!(seq.is_empty());
        assert_eq!(seq.to_text(), "");
    }

    #[test]
    fn trailing_newline_does_not_add_line() {
        let seq = LineSequence::from_text("a\nb\n");
        assert_eq!(seq.texts(), vec!["a", "b"]);
    }

    #[test]
    fn missing_trailing_newline_keeps_last_line() {
        let seq = LineSequence::from_text("a\nb");
        assert_eq!(seq.texts(), vec!["a", "b"]);
        assert_eq!(seq.lines()[1].ending, LineEnding::None);
    }

    #[test]
    fn blank_lines_are_kept() {
        let seq = LineSequence::from_text("\n\nx\n");
        assert_eq!(seq.texts(), vec!["", "", "x"]);
    }

    #[test]
    fn mixed_endings_round_trip() {
        let text = "one\r\ntwo\rthree\nfour";
        let seq = LineSequence::from_text(text);
        assert_eq!(seq.texts(), vec!["one", "two", "three", "four"]);
        assert_eq!(seq.to_text(), text);
    }

    #[test]
    fn slice_text_includes_terminators() {
        let seq = LineSequence::from_text("a\nb\nc\n");
        assert_eq!(seq.slice_text(LineRange::new(1, 3)), "b\nc\n");
        assert_eq!(seq.slice_text(LineRange::new(2, 2)), "");
        assert_eq!(seq.slice_text(LineRange::new(2, 9)), "c\n");
    }

    #[test]
    fn bare_lines_have_no_terminators() {
        let seq = LineSequence::from_lines(["a", "b"]);
        assert_eq!(seq.slice_text(LineRange::new(0, 2)), "ab");
        assert_eq!(&seq[1], "b");
    }

    #[test]
    fn multibyte_lines() {
        let seq = LineSequence::from_text("가나\r\n다");
        assert_eq!(seq.texts(), vec!["가나", "다"]);
        assert_eq!(seq.max_line_chars(), 2);
    }
}
