// Line-level sequence alignment based on longest matching blocks.
//
// Anchors are the longest runs of equal lines (earliest wins on ties);
// the gaps around each anchor are aligned recursively, and whatever is
// left over becomes insert/delete/replace.

use std::collections::HashMap;
use std::hash::Hash;

use twinline_core::{OpKind, Opcode};

/// Right-side length from which popular lines stop being anchor candidates.
const AUTOJUNK_MIN_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignerOptions {
    /// Ignore very frequent right-side lines when looking for anchors
    /// (only on documents of at least 200 lines).
    pub autojunk: bool,
}

impl Default for AlignerOptions {
    fn default() -> Self {
        Self { autojunk: true }
    }
}

/// `left[left..left + len] == right[right..right + len]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchBlock {
    pub left: usize,
    pub right: usize,
    pub len: usize,
}

pub struct SequenceMatcher<'a, T> {
    left: &'a [T],
    right: &'a [T],
    /// Right-side positions of every anchor-eligible line, ascending.
    right_index: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    pub fn new(left: &'a [T], right: &'a [T], options: AlignerOptions) -> Self {
        let mut right_index: HashMap<&T, Vec<usize>> = HashMap::new();
        for (j, line) in right.iter().enumerate() {
            right_index.entry(line).or_default().push(j);
        }

        let n = right.len();
        if options.autojunk && n >= AUTOJUNK_MIN_LEN {
            let threshold = n / 100 + 1;
            let before = right_index.len();
            right_index.retain(|_, positions| positions.len() <= threshold);
            log::debug!(
                "autojunk dropped {} popular line(s) from anchor index",
                before - right_index.len()
            );
        }

        Self { left, right, right_index }
    }

    /// Longest matching block in `left[alo..ahi]` × `right[blo..bhi]`.
    /// Ties go to the smallest left index, then the smallest right index.
    fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchBlock {
        let mut best_i = alo;
        let mut best_j = blo;
        let mut best_len = 0;

        // run length of the match ending at right position j, for the previous left line
        let mut run_lens: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next_runs: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.right_index.get(&self.left[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_lens.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_runs.insert(j, k);
                    if k > best_len {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_len = k;
                    }
                }
            }
            run_lens = next_runs;
        }

        // Grow across neighbours the index skipped (popular lines).
        while best_i > alo && best_j > blo && self.left[best_i - 1] == self.right[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_len += 1;
        }
        while best_i + best_len < ahi
            && best_j + best_len < bhi
            && self.left[best_i + best_len] == self.right[best_j + best_len]
        {
            best_len += 1;
        }

        MatchBlock { left: best_i, right: best_j, len: best_len }
    }

    /// All matching blocks in document order, adjacent blocks coalesced,
    /// terminated by the sentinel `(left.len(), right.len(), 0)`.
    pub fn matching_blocks(&self) -> Vec<MatchBlock> {
        let la = self.left.len();
        let lb = self.right.len();

        let mut pending = vec![(0, la, 0, lb)];
        let mut found = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.len == 0 {
                continue;
            }
            found.push(m);
            if alo < m.left && blo < m.right {
                pending.push((alo, m.left, blo, m.right));
            }
            if m.left + m.len < ahi && m.right + m.len < bhi {
                pending.push((m.left + m.len, ahi, m.right + m.len, bhi));
            }
        }
        found.sort_by_key(|m| (m.left, m.right, m.len));

        let mut blocks: Vec<MatchBlock> = Vec::with_capacity(found.len() + 1);
        for m in found {
            match blocks.last_mut() {
                Some(last) if last.left + last.len == m.left && last.right + last.len == m.right => {
                    last.len += m.len;
                }
                _ => blocks.push(m),
            }
        }
        blocks.push(MatchBlock { left: la, right: lb, len: 0 });
        blocks
    }

    /// Edit script covering both sequences end to end.
    pub fn opcodes(&self) -> Vec<Opcode> {
        let mut ops = Vec::new();
        let mut i = 0;
        let mut j = 0;
        for m in self.matching_blocks() {
            let kind = match (i < m.left, j < m.right) {
                (true, true) => Some(OpKind::Replace),
                (true, false) => Some(OpKind::Delete),
                (false, true) => Some(OpKind::Insert),
                (false, false) => None,
            };
            if let Some(kind) = kind {
                ops.push(Opcode::new(kind, i, m.left, j, m.right));
            }
            if m.len > 0 {
                ops.push(Opcode::new(OpKind::Equal, m.left, m.left + m.len, m.right, m.right + m.len));
            }
            i = m.left + m.len;
            j = m.right + m.len;
        }
        ops
    }
}

/// Align two line lists with default options.
pub fn diff_lines<T: Eq + Hash>(left: &[T], right: &[T]) -> Vec<Opcode> {
    SequenceMatcher::new(left, right, AlignerOptions::default()).opcodes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(left: &[&str], right: &[&str]) -> Vec<Opcode> {
        diff_lines(left, right)
    }

    #[test]
    fn both_empty_yields_nothing() {
        assert!(ops(&[], &[]).is_empty());
    }

    #[test]
    fn left_empty_is_single_insert() {
        assert_eq!(ops(&[], &["a", "b"]), vec![Opcode::new(OpKind::Insert, 0, 0, 0, 2)]);
    }

    #[test]
    fn right_empty_is_single_delete() {
        assert_eq!(ops(&["a", "b", "c"], &[]), vec![Opcode::new(OpKind::Delete, 0, 3, 0, 0)]);
    }

    #[test]
    fn identical_is_single_equal() {
        let l = ["x", "y"];
        assert_eq!(ops(&l, &l), vec![Opcode::new(OpKind::Equal, 0, 2, 0, 2)]);
    }

    #[test]
    fn middle_replace() {
        assert_eq!(
            ops(&["one", "two", "three"], &["one", "TWO", "three"]),
            vec![
                Opcode::new(OpKind::Equal, 0, 1, 0, 1),
                Opcode::new(OpKind::Replace, 1, 2, 1, 2),
                Opcode::new(OpKind::Equal, 2, 3, 2, 3),
            ]
        );
    }

    #[test]
    fn trailing_delete() {
        assert_eq!(
            ops(&["a", "b"], &["a"]),
            vec![Opcode::new(OpKind::Equal, 0, 1, 0, 1), Opcode::new(OpKind::Delete, 1, 2, 1, 1)]
        );
    }

    #[test]
    fn disjoint_is_single_replace() {
        assert_eq!(ops(&["a", "b"], &["x", "y", "z"]), vec![Opcode::new(OpKind::Replace, 0, 2, 0, 3)]);
    }

    #[test]
    fn longest_anchor_wins() {
        // "c d e" is the longest common run. The trailing "a" on the right has
        // no partner after the anchor on the left, so it stays an insert.
        let left = ["a", "b", "c", "d", "e"];
        let right = ["c", "d", "e", "a"];
        assert_eq!(
            ops(&left, &right),
            vec![
                Opcode::new(OpKind::Delete, 0, 2, 0, 0),
                Opcode::new(OpKind::Equal, 2, 5, 0, 3),
                Opcode::new(OpKind::Insert, 5, 5, 3, 4),
            ]
        );
    }

    #[test]
    fn earliest_match_breaks_ties() {
        let m = SequenceMatcher::new(&["x", "q", "x"][..], &["x"][..], AlignerOptions::default());
        assert_eq!(m.matching_blocks()[0], MatchBlock { left: 0, right: 0, len: 1 });
    }

    #[test]
    fn matching_blocks_end_with_sentinel() {
        let left = ["a", "b"];
        let right = ["a", "c"];
        let m = SequenceMatcher::new(&left[..], &right[..], AlignerOptions::default());
        let blocks = m.matching_blocks();
        assert_eq!(blocks.last(), Some(&MatchBlock { left: 2, right: 2, len: 0 }));
    }

    #[test]
    fn adjacent_matches_are_coalesced() {
        let left = ["a", "b", "c"];
        let m = SequenceMatcher::new(&left[..], &left[..], AlignerOptions::default());
        assert_eq!(
            m.matching_blocks(),
            vec![MatchBlock { left: 0, right: 0, len: 3 }, MatchBlock { left: 3, right: 3, len: 0 }]
        );
    }

    #[test]
    fn autojunk_ignores_popular_lines_as_anchors() {
        // 300 blank lines make "" popular on the right, so the gap after "k"
        // has no anchor and collapses into one replace.
        let mut right: Vec<String> = vec!["k".into(), "z".into()];
        right.extend(std::iter::repeat(String::new()).take(300));
        let left = vec!["k".to_string(), String::new()];

        let with = SequenceMatcher::new(&left, &right, AlignerOptions { autojunk: true }).opcodes();
        assert_eq!(
            with,
            vec![Opcode::new(OpKind::Equal, 0, 1, 0, 1), Opcode::new(OpKind::Replace, 1, 2, 1, 302)]
        );

        let without = SequenceMatcher::new(&left, &right, AlignerOptions { autojunk: false }).opcodes();
        assert_eq!(
            without,
            vec![
                Opcode::new(OpKind::Equal, 0, 1, 0, 1),
                Opcode::new(OpKind::Insert, 1, 1, 1, 2),
                Opcode::new(OpKind::Equal, 1, 2, 2, 3),
                Opcode::new(OpKind::Insert, 2, 2, 3, 302),
            ]
        );
    }

    #[test]
    fn small_documents_ignore_autojunk() {
        let right = vec![""; 50];
        let left = vec![""; 2];
        let with = SequenceMatcher::new(&left, &right, AlignerOptions { autojunk: true }).opcodes();
        let without = SequenceMatcher::new(&left, &right, AlignerOptions { autojunk: false }).opcodes();
        assert_eq!(with, without);
    }

    #[test]
    fn deterministic() {
        let left = ["a", "b", "a", "c", "b"];
        let right = ["b", "a", "c", "a", "b"];
        assert_eq!(ops(&left, &right), ops(&left, &right));
    }
}
