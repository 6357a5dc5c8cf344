//! Block parser for descriptions.
//!
//! The input is normalized, then read line by line. Blank lines separate
//! chunks; within a chunk each line either starts a list item (`* `),
//! continues the last list item (two leading spaces while a list is open),
//! or belongs to a paragraph. At most one block is being accumulated at any
//! time, and switching kinds flushes the open one.

use std::mem;

use tracing::{debug, trace};

use crate::ast::{Block, Document, Inline, List, ListItem, Paragraph, TextSpan};
use crate::error::ParseError;
use crate::inline::parse_inlines;
use crate::lexer::{normalize, Lexer, Line};
use crate::optimize::optimize;

/// Parse a description with the default parser.
pub fn parse(input: &str) -> Result<Document, ParseError> {
    Parser::new().parse(input)
}

/// Description parser.
///
/// The parser holds no state between calls and may be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Parse the input, returning an error on first failure.
    ///
    /// There is no partial result: the first error in top-to-bottom,
    /// left-to-right order aborts the parse.
    pub fn parse(&self, input: &str) -> Result<Document, ParseError> {
        let normalized = normalize(input);
        let mut builder = BlockBuilder::new();

        for line in Lexer::new(&normalized) {
            if line.is_separator() {
                builder.transition(Accumulator::Idle)?;
            } else {
                builder.push_line(&line)?;
            }
        }
        builder.transition(Accumulator::Idle)?;

        debug!(
            input_bytes = input.len(),
            blocks = builder.blocks.len(),
            "parsed description"
        );
        Ok(Document::new(builder.blocks))
    }
}

/// The block currently being accumulated.
#[derive(Debug)]
enum Accumulator {
    Idle,
    Paragraph(Vec<Inline>),
    List(Vec<Vec<Inline>>),
}

struct BlockBuilder {
    state: Accumulator,
    blocks: Vec<Block>,
}

impl BlockBuilder {
    fn new() -> Self {
        Self {
            state: Accumulator::Idle,
            blocks: Vec::with_capacity(16),
        }
    }

    /// Close the open block, if any, and make `next` the open one.
    fn transition(&mut self, next: Accumulator) -> Result<(), ParseError> {
        match mem::replace(&mut self.state, next) {
            Accumulator::Idle => {}
            Accumulator::Paragraph(content) => {
                trace!(inlines = content.len(), "flushing paragraph");
                self.blocks.push(Paragraph::new(optimize(content)?).into());
            }
            Accumulator::List(items) => {
                trace!(items = items.len(), "flushing list");
                let items = items
                    .into_iter()
                    .map(|item| optimize(item).map(ListItem::new))
                    .collect::<Result<Vec<_>, _>>()?;
                self.blocks.push(List::new(items).into());
            }
        }
        Ok(())
    }

    fn push_line(&mut self, line: &Line<'_>) -> Result<(), ParseError> {
        if let Some(rest) = line.strip_prefix("* ") {
            let content = parse_line(rest, line)?;
            match &mut self.state {
                Accumulator::List(items) => items.push(content),
                _ => self.transition(Accumulator::List(vec![content]))?,
            }
            return Ok(());
        }

        if let Accumulator::List(items) = &mut self.state {
            if let (Some(rest), Some(item)) = (line.strip_prefix("  "), items.last_mut()) {
                let content = parse_line(rest, line)?;
                if !item.is_empty() && !line.starts_with("   ") {
                    item.push(Inline::Text(TextSpan::line_break()));
                }
                item.extend(content);
                return Ok(());
            }
        }

        let content = parse_line(line.text, line)?;
        match &mut self.state {
            Accumulator::Paragraph(paragraph) => {
                if !paragraph.is_empty() && !line.starts_with(" ") {
                    paragraph.push(Inline::Text(TextSpan::line_break()));
                }
                paragraph.extend(content);
            }
            _ => self.transition(Accumulator::Paragraph(content))?,
        }
        Ok(())
    }
}

fn parse_line(text: &str, line: &Line<'_>) -> Result<Vec<Inline>, ParseError> {
    parse_inlines(text).map_err(|err| ParseError::in_line(line.number, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn test_error_names_line() {
        let err = parse("first\n\nsecond {nope x}").unwrap_err();
        assert_eq!(err.message, "invalid description at line 3");
        assert_eq!(err.token(), Some("nope"));
        assert_eq!(err.root_cause().span.map(|s| s.start), Some(8));
    }

    #[test]
    fn test_list_then_paragraph_in_one_chunk() {
        let doc = parse("* a\nplain").unwrap();
        assert_eq!(doc.blocks().len(), 2);
        assert!(matches!(doc.blocks()[0], Block::List(_)));
        assert!(matches!(doc.blocks()[1], Block::Paragraph(_)));
    }

    #[test]
    fn test_paragraph_then_list_in_one_chunk() {
        let doc = parse("plain\n* a\n* b").unwrap();
        assert_eq!(doc.blocks().len(), 2);
        match &doc.blocks()[1] {
            Block::List(list) => assert_eq!(list.items().len(), 2),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_indented_line_without_list_is_paragraph() {
        let doc = parse("a\n  b").unwrap();
        assert_eq!(doc.blocks().len(), 1);
        assert_eq!(doc.to_string(), "a b");
    }

    #[test]
    fn test_error_in_list_continuation() {
        let err = parse("* a\n  {c open").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedCommand);
        assert_eq!(err.message, "invalid description at line 2");
    }
}
