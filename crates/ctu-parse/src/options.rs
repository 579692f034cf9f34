/// Default bound on nested statements, expressions and types.
pub const DEFAULT_MAX_DEPTH: u32 = 128;

/// Parser knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deeper input fails with `ParseError::TooDeep` instead of
    /// exhausting the stack.
    pub max_depth: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}
