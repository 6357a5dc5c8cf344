//! Input normalization and line splitting for the block parser.
//!
//! The block parser sees the input as normalized text: surrounding whitespace
//! trimmed and no more than one blank line in a row. In normalized text an
//! empty line is exactly a chunk separator.
//!
//! # Performance
//!
//! - Zero-copy: Lines borrow directly from the normalized text
//! - SIMD-accelerated newline scanning via `memchr`

use memchr::memchr;

/// Trim surrounding whitespace and collapse every run of three or more line
/// breaks to exactly two. CRLF line endings are read as LF.
pub fn normalize(input: &str) -> String {
    let unified;
    let input = if memchr(b'\r', input.as_bytes()).is_some() {
        unified = input.replace("\r\n", "\n");
        unified.as_str()
    } else {
        input
    };

    let trimmed = input.trim();
    let bytes = trimmed.as_bytes();
    let mut out = String::with_capacity(trimmed.len());
    let mut offset = 0;

    while let Some(pos) = memchr(b'\n', &bytes[offset..]) {
        let start = offset + pos;
        let run = bytes[start..].iter().take_while(|&&b| b == b'\n').count();
        out.push_str(&trimmed[offset..start]);
        out.push_str(if run >= 2 { "\n\n" } else { "\n" });
        offset = start + run;
    }
    out.push_str(&trimmed[offset..]);
    out
}

/// A single line of normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text (without trailing newline).
    pub text: &'a str,
    /// 1-based line number.
    pub number: usize,
}

impl<'a> Line<'a> {
    /// Check if this line separates two chunks.
    #[inline(always)]
    pub fn is_separator(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if the line starts with the given prefix.
    #[inline(always)]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.text.as_bytes().starts_with(prefix.as_bytes())
    }

    /// Strip a prefix from the line, returning the remainder.
    #[inline(always)]
    pub fn strip_prefix(&self, prefix: &str) -> Option<&'a str> {
        self.text.strip_prefix(prefix)
    }
}

/// Line-based lexer for the block parser.
pub struct Lexer<'a> {
    /// The normalized text.
    input: &'a str,
    /// Current byte offset.
    offset: usize,
    /// Number of the next line to read.
    line: usize,
    /// Whether the final (unterminated) line has been returned.
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer over already normalized text.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            line: 1,
            done: input.is_empty(),
        }
    }

    /// Consume and return the next line.
    ///
    /// Returns `None` if at end of input.
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        if self.done {
            return None;
        }

        let start = self.offset;
        let end = match memchr(b'\n', &self.input.as_bytes()[start..]) {
            Some(pos) => start + pos,
            None => {
                self.done = true;
                self.input.len()
            }
        };
        self.offset = end + 1;

        let number = self.line;
        self.line += 1;

        Some(Line {
            text: &self.input[start..end],
            number,
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_collapses_blank_runs() {
        assert_eq!(normalize("  \n a\n\n\n\nb \n\n"), "a\n\nb");
        assert_eq!(normalize("a\nb\n\nc"), "a\nb\n\nc");
        assert_eq!(normalize("a\n\n\nb\n\n\n\n\nc"), "a\n\nb\n\nc");
        assert_eq!(normalize(" \t\n"), "");
    }

    #[test]
    fn test_normalize_reads_crlf_as_lf() {
        assert_eq!(normalize("a\r\nb\r\n\r\n\r\nc\r\n"), "a\nb\n\nc");
    }

    #[test]
    fn test_normalize_leaves_whitespace_only_lines() {
        assert_eq!(normalize("a\n \n\n\nb"), "a\n \n\nb");
    }

    #[test]
    fn test_lines_are_numbered() {
        let lines: Vec<_> = Lexer::new("a\n\n* b\n  c").collect();
        let texts: Vec<_> = lines.iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["a", "", "* b", "  c"]);
        assert_eq!(lines[3].number, 4);
        assert!(lines[1].is_separator());
        assert!(lines[2].starts_with("* "));
        assert_eq!(lines[3].strip_prefix("  "), Some("c"));
    }

    #[test]
    fn test_empty_input_has_no_lines() {
        assert_eq!(Lexer::new("").next_line(), None);
    }
}
