//! Single-line scanner for inline elements.
//!
//! A line is plain text interleaved with command spans `{alias content}`.
//! Plain text has no escapes; inside a command body `\\`, `\{` and `\}`
//! stand for the escaped character. Command bodies never nest.
//!
//! Uses SIMD-accelerated scanning for the delimiters of each state.

use memchr::{memchr, memchr2};

use crate::ast::{CommandSpan, Inline, TextSpan};
use crate::command::CommandType;
use crate::error::ParseError;
use crate::span::Span;

/// Parse inline elements from one line of text.
///
/// The line must not contain line breaks. Empty plain text between
/// commands is dropped.
///
/// # Errors
///
/// Fails on the first malformed command: `{` without a command token, an
/// unknown alias, or a body left open at end of line.
pub fn parse_inlines(line: &str) -> Result<Vec<Inline>, ParseError> {
    if line.is_empty() {
        return Ok(Vec::new());
    }

    InlineParser::new(line).parse()
}

struct InlineParser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> InlineParser<'a> {
    #[inline]
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn parse(&mut self) -> Result<Vec<Inline>, ParseError> {
        let mut inlines = Vec::with_capacity(8);

        while self.pos < self.bytes.len() {
            let open = match memchr(b'{', &self.bytes[self.pos..]) {
                Some(offset) => self.pos + offset,
                None => break,
            };

            self.flush_text(&mut inlines, open)?;

            let kind = self.read_command(open)?;
            let content = self.read_body(open)?;
            inlines.push(Inline::Command(CommandSpan::new(
                kind,
                TextSpan::new(content)?,
            )));
        }

        // Flush remaining text
        self.flush_text(&mut inlines, self.bytes.len())?;

        Ok(inlines)
    }

    /// Emit plain text from the current position up to `end`, unless it
    /// collapses to nothing.
    #[inline]
    fn flush_text(&mut self, inlines: &mut Vec<Inline>, end: usize) -> Result<(), ParseError> {
        if self.pos < end {
            let span = TextSpan::new(&self.text[self.pos..end])?;
            if !span.is_empty() {
                inlines.push(Inline::Text(span));
            }
        }
        self.pos = end;
        Ok(())
    }

    /// Read the command token after the `{` at `open`, and the whitespace
    /// that follows it.
    fn read_command(&mut self, open: usize) -> Result<CommandType, ParseError> {
        let start = open + 1;
        let rest = &self.text[start..];

        let token_len = rest
            .find(|c: char| c.is_whitespace() || c == '}')
            .unwrap_or(rest.len());
        if token_len == 0 {
            return Err(ParseError::braces_without_command(Span::new(
                open as u32,
                start as u32,
            )));
        }
        let token_end = start + token_len;
        let token = &self.text[start..token_end];

        let after = &self.text[token_end..];
        let skipped = after.len() - after.trim_start().len();
        self.pos = token_end + skipped;

        CommandType::from_alias(token).ok_or_else(|| {
            ParseError::unknown_command(token, Span::new(start as u32, token_end as u32))
        })
    }

    /// Read a command body up to and including its closing `}`.
    fn read_body(&mut self, open: usize) -> Result<String, ParseError> {
        let mut content = String::new();

        loop {
            let offset = match memchr2(b'}', b'\\', &self.bytes[self.pos..]) {
                Some(offset) => offset,
                None => {
                    return Err(ParseError::unclosed_command(Span::new(
                        open as u32,
                        self.bytes.len() as u32,
                    )))
                }
            };
            let at = self.pos + offset;
            content.push_str(&self.text[self.pos..at]);

            if self.bytes[at] == b'}' {
                self.pos = at + 1;
                return Ok(content);
            }

            match self.bytes.get(at + 1) {
                Some(&escaped @ (b'\\' | b'{' | b'}')) => {
                    content.push(escaped as char);
                    self.pos = at + 2;
                }
                _ => {
                    content.push('\\');
                    self.pos = at + 1;
                }
            }
        }
    }
}
