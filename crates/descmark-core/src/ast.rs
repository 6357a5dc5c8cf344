//! Tree types for parsed descriptions.
//!
//! The tree is two levels deep:
//!
//! - **Blocks**: [`Paragraph`] and [`List`], held in order by a [`Document`]
//! - **Inlines**: [`TextSpan`] and [`CommandSpan`], held by paragraphs and
//!   list items
//!
//! Nodes are immutable once built. Every node implements [`fmt::Display`],
//! which writes its canonical markup; `to_string()` is the serializer.

use std::fmt;

use crate::command::CommandType;
use crate::error::ParseError;

/// Normalized plain text.
///
/// Construction collapses every run of whitespace into the run's first
/// character and rejects text holding two consecutive line breaks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextSpan {
    text: String,
}

impl TextSpan {
    /// Build a text span, collapsing whitespace runs.
    ///
    /// # Errors
    ///
    /// Fails with "multiple line breaks in text" if `text` contains `"\n\n"`.
    pub fn new(text: impl AsRef<str>) -> Result<Self, ParseError> {
        let text = text.as_ref();
        if text.contains("\n\n") {
            return Err(ParseError::multiple_line_breaks());
        }
        Ok(Self {
            text: collapse_whitespace(text),
        })
    }

    /// A span holding a single line break.
    pub(crate) fn line_break() -> Self {
        Self {
            text: "\n".to_string(),
        }
    }

    /// The normalized text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(c);
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A typed annotation wrapping one text span, written `{alias content}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpan {
    kind: CommandType,
    content: TextSpan,
}

impl CommandSpan {
    pub fn new(kind: CommandType, content: TextSpan) -> Self {
        Self { kind, content }
    }

    /// Build a command span straight from raw content text.
    pub fn from_text(kind: CommandType, content: impl AsRef<str>) -> Result<Self, ParseError> {
        Ok(Self::new(kind, TextSpan::new(content)?))
    }

    #[inline]
    pub fn kind(&self) -> CommandType {
        self.kind
    }

    #[inline]
    pub fn content(&self) -> &TextSpan {
        &self.content
    }
}

impl fmt::Display for CommandSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        f.write_str(self.kind.canonical_alias())?;
        let content = self.content.text();
        if !content.is_empty() {
            f.write_str(" ")?;
            // Only a body that is exactly one of these characters is escaped.
            if matches!(content, "\\" | "{" | "}") {
                f.write_str("\\")?;
            }
            f.write_str(content)?;
        }
        f.write_str("}")
    }
}

/// Inline-level nodes (within paragraphs and list items).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Plain text.
    Text(TextSpan),
    /// Typed annotation.
    Command(CommandSpan),
}

impl Inline {
    /// The text span, if this is plain text.
    pub fn as_text(&self) -> Option<&TextSpan> {
        match self {
            Inline::Text(text) => Some(text),
            Inline::Command(_) => None,
        }
    }

    /// The command span, if this is a command.
    pub fn as_command(&self) -> Option<&CommandSpan> {
        match self {
            Inline::Command(command) => Some(command),
            Inline::Text(_) => None,
        }
    }
}

impl From<TextSpan> for Inline {
    fn from(text: TextSpan) -> Self {
        Inline::Text(text)
    }
}

impl From<CommandSpan> for Inline {
    fn from(command: CommandSpan) -> Self {
        Inline::Command(command)
    }
}

impl fmt::Display for Inline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inline::Text(text) => fmt::Display::fmt(text, f),
            Inline::Command(command) => fmt::Display::fmt(command, f),
        }
    }
}

fn write_inlines(f: &mut fmt::Formatter<'_>, inlines: &[Inline]) -> fmt::Result {
    for inline in inlines {
        fmt::Display::fmt(inline, f)?;
    }
    Ok(())
}

/// Text paragraph containing inline elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    content: Vec<Inline>,
}

impl Paragraph {
    pub fn new(content: Vec<Inline>) -> Self {
        Self { content }
    }

    #[inline]
    pub fn content(&self) -> &[Inline] {
        &self.content
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\n")?;
        write_inlines(f, &self.content)?;
        f.write_str("\n")
    }
}

/// A single bulleted list item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListItem {
    content: Vec<Inline>,
}

impl ListItem {
    pub fn new(content: Vec<Inline>) -> Self {
        Self { content }
    }

    #[inline]
    pub fn content(&self) -> &[Inline] {
        &self.content
    }
}

/// Writes the item's inlines; continuation lines are indented by two spaces.
impl fmt::Display for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: String = self.content.iter().map(Inline::to_string).collect();
        f.write_str(&joined.replace('\n', "\n  "))
    }
}

/// A bulleted list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct List {
    items: Vec<ListItem>,
}

impl List {
    pub fn new(items: Vec<ListItem>) -> Self {
        Self { items }
    }

    #[inline]
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\n")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "* {}", item)?;
        }
        f.write_str("\n")
    }
}

/// Block-level nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Text paragraph with inline annotations.
    Paragraph(Paragraph),
    /// Bulleted list.
    List(List),
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Block::Paragraph(paragraph)
    }
}

impl From<List> for Block {
    fn from(list: List) -> Self {
        Block::List(list)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Paragraph(paragraph) => fmt::Display::fmt(paragraph, f),
            Block::List(list) => fmt::Display::fmt(list, f),
        }
    }
}

/// A parsed description: blocks in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Check whether `input` is already in canonical form, i.e. parsing and
    /// serializing it gives back the same text.
    pub fn is_canonical(input: &str) -> Result<bool, ParseError> {
        Ok(crate::parser::parse(input)?.to_string() == input)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: String = self.blocks.iter().map(Block::to_string).collect();
        f.write_str(joined.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    fn text(s: &str) -> Inline {
        Inline::Text(TextSpan::new(s).unwrap())
    }

    fn command(kind: CommandType, s: &str) -> Inline {
        Inline::Command(CommandSpan::from_text(kind, s).unwrap())
    }

    #[test]
    fn test_text_span_collapses_to_first_char_of_run() {
        assert_eq!(TextSpan::new("a   b\tc").unwrap().text(), "a b\tc");
        assert_eq!(TextSpan::new("a \t b").unwrap().text(), "a b");
        assert_eq!(TextSpan::new("a\t\tb").unwrap().text(), "a\tb");
        assert_eq!(TextSpan::new("a\n b").unwrap().text(), "a\nb");
    }

    #[test]
    fn test_text_span_rejects_double_line_break() {
        let err = TextSpan::new("line1\n\nline2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MultipleLineBreaks);
        assert_eq!(err.message, "multiple line breaks in text");
    }

    #[test]
    fn test_command_span_empty_content_has_no_space() {
        let span = CommandSpan::from_text(CommandType::ProperName, "").unwrap();
        assert_eq!(span.to_string(), "{p}");
    }

    #[test]
    fn test_command_span_uses_canonical_alias() {
        let span = CommandSpan::from_text(CommandType::CurlyBraceOpen, "").unwrap();
        assert_eq!(span.to_string(), "{cb}");
    }

    #[test]
    fn test_command_span_escapes_single_special_char() {
        for (content, expected) in [("\\", "{c \\\\}"), ("{", "{c \\{}"), ("}", "{c \\}}")] {
            let span = CommandSpan::from_text(CommandType::Code, content).unwrap();
            assert_eq!(span.to_string(), expected);
        }
    }

    #[test]
    fn test_command_span_does_not_escape_longer_content() {
        let span = CommandSpan::from_text(CommandType::Code, "a\\b").unwrap();
        assert_eq!(span.to_string(), "{c a\\b}");
        let span = CommandSpan::from_text(CommandType::Code, "{}").unwrap();
        assert_eq!(span.to_string(), "{c {}}");
    }

    #[test]
    fn test_list_indents_internal_line_breaks() {
        let list = List::new(vec![
            ListItem::new(vec![text("one"), Inline::Text(TextSpan::line_break()), text("more")]),
            ListItem::new(vec![text("two"), command(CommandType::Code, "x")]),
        ]);
        assert_eq!(list.to_string(), "\n* one\n  more\n* two{c x}\n");
    }

    #[test]
    fn test_document_trims_block_separators() {
        let doc = Document::new(vec![
            Paragraph::new(vec![text("first")]).into(),
            List::new(vec![ListItem::new(vec![text("item")])]).into(),
            Paragraph::new(vec![text("last")]).into(),
        ]);
        assert_eq!(doc.to_string(), "first\n\n* item\n\nlast");
    }

    #[test]
    fn test_empty_document_serializes_empty() {
        assert_eq!(Document::default().to_string(), "");
    }
}
