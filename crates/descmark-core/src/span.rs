//! Byte ranges used to locate parse errors within a line.

/// A byte range in a single line of source text.
///
/// Offsets are bytes (not characters) relative to the start of the line
/// the error was found in. `[start, end)`.
///
/// # Example
///
/// ```rust
/// use descmark_core::span::Span;
///
/// let span = Span::new(6, 9);
/// assert_eq!(span.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Starting byte offset (inclusive).
    pub start: u32,
    /// Ending byte offset (exclusive).
    pub end: u32,
}

impl Span {
    /// Create a new span from byte offsets.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Get the length of this span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Check if this span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
