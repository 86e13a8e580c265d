//! Parser configuration.

/// Default limit on nested expressions and subqueries.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options controlling a [`Parser`](super::Parser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserOptions {
    /// Maximum nesting depth of expressions and subqueries. Deeper input is
    /// rejected with a structural error instead of exhausting the stack.
    pub max_depth: usize,
}

impl ParserOptions {
    /// Creates the default options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::new()
    }
}
