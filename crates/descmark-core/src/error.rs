use crate::span::Span;

/// Error kinds for categorizing parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A text span was built from text holding two consecutive line breaks.
    MultipleLineBreaks,
    /// `{` followed directly by whitespace, `}` or end of line.
    BracesWithoutCommand,
    /// A command token that matches no known alias.
    UnknownCommand {
        /// The offending token as written.
        token: String,
    },
    /// End of line reached inside a command body.
    UnclosedCommand,
}

/// A parse error with an optional location and at most one level of cause.
///
/// Errors raised while scanning a line are wrapped by the block parser in an
/// outer error naming the line; the outer error keeps the inner kind and
/// exposes the inner error through [`std::error::Error::source`]. `Display`
/// writes this error's own message only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}{}", location(.span))]
pub struct ParseError {
    /// Error categorization
    pub kind: ParseErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Byte range within the offending line
    pub span: Option<Span>,
    /// The error this one wraps, if any
    #[source]
    pub cause: Option<Box<ParseError>>,
}

fn location(span: &Option<Span>) -> String {
    match span {
        Some(span) => format!(" at bytes {}..{}", span.start, span.end),
        None => String::new(),
    }
}

impl ParseError {
    fn new(kind: ParseErrorKind, message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            cause: None,
        }
    }

    /// Create an error for text holding two consecutive line breaks.
    pub fn multiple_line_breaks() -> Self {
        Self::new(
            ParseErrorKind::MultipleLineBreaks,
            "multiple line breaks in text",
            None,
        )
    }

    /// Create an error for a `{` that is not followed by a command token.
    pub fn braces_without_command(span: Span) -> Self {
        Self::new(
            ParseErrorKind::BracesWithoutCommand,
            "braces without command",
            Some(span),
        )
    }

    /// Create an error for an unrecognized command token.
    pub fn unknown_command(token: &str, span: Span) -> Self {
        Self::new(
            ParseErrorKind::UnknownCommand {
                token: token.to_string(),
            },
            format!("unknown command: {}", token),
            Some(span),
        )
    }

    /// Create an error for a command body left open at end of line.
    pub fn unclosed_command(span: Span) -> Self {
        Self::new(ParseErrorKind::UnclosedCommand, "unclosed command", Some(span))
    }

    /// Wrap an error raised while parsing the given 1-based line.
    pub fn in_line(line: usize, cause: ParseError) -> Self {
        Self {
            kind: cause.kind.clone(),
            message: format!("invalid description at line {}", line),
            span: None,
            cause: Some(Box::new(cause)),
        }
    }

    /// The innermost error in the chain.
    pub fn root_cause(&self) -> &ParseError {
        match self.cause.as_deref() {
            Some(cause) => cause.root_cause(),
            None => self,
        }
    }

    /// The unknown token, for [`ParseErrorKind::UnknownCommand`] errors.
    pub fn token(&self) -> Option<&str> {
        match &self.kind {
            ParseErrorKind::UnknownCommand { token } => Some(token),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_includes_location() {
        let err = ParseError::braces_without_command(Span::new(4, 5));
        assert_eq!(err.to_string(), "braces without command at bytes 4..5");
    }

    #[test]
    fn test_wrapped_error_chains_cause() {
        let inner = ParseError::unknown_command("zzz", Span::new(1, 4));
        let outer = ParseError::in_line(3, inner.clone());

        assert_eq!(outer.kind, inner.kind);
        assert_eq!(outer.token(), Some("zzz"));
        assert_eq!(outer.root_cause(), &inner);
        assert_eq!(outer.to_string(), "invalid description at line 3");
        assert_eq!(
            outer.source().map(|e| e.to_string()),
            Some(inner.to_string())
        );
    }
}
