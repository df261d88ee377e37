//! Nesting tracker for one region of interest.

/// Tracks whether a markup region is open and how deeply it is nested.
///
/// A region is active exactly when its depth is non-zero. Closing an inactive
/// region is a no-op, so unbalanced end tags can never drive the depth
/// negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Region {
    depth: usize,
}

impl Region {
    /// Whether the region is open.
    #[must_use]
    pub const fn is_active(self) -> bool {
        self.depth > 0
    }

    /// Current nesting depth; zero when inactive.
    #[must_use]
    pub const fn depth(self) -> usize {
        self.depth
    }

    /// Open the region at depth 1.
    pub const fn open(&mut self) {
        self.depth = 1;
    }

    /// Record a nested open inside an active region. Ignored when inactive.
    pub const fn nest(&mut self) {
        if self.depth > 0 {
            self.depth += 1;
        }
    }

    /// Record a close. Returns `true` when this close deactivated the region.
    #[must_use]
    pub const fn close(&mut self) -> bool {
        match self.depth {
            0 => false,
            depth => {
                self.depth = depth - 1;
                self.depth == 0
            }
        }
    }
}
