// Block cursor with wraparound next/previous movement.

/// `None` is the idle state: nothing compared yet, or no differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockNavigator {
    current: Option<usize>,
}

impl BlockNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Move to the first block of a fresh comparison, or go idle if it found none.
    pub fn reset(&mut self, block_count: usize) {
        self.current = if block_count > 0 { Some(0) } else { None };
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn next(&mut self, block_count: usize) -> Option<usize> {
        if block_count == 0 {
            return None;
        }
        self.current = Some(match self.current {
            Some(i) => (i + 1) % block_count,
            None => 0,
        });
        self.current
    }

    pub fn prev(&mut self, block_count: usize) -> Option<usize> {
        if block_count == 0 {
            return None;
        }
        self.current = Some(match self.current {
            Some(i) => (i + block_count - 1) % block_count,
            None => 0,
        });
        self.current
    }
}
