//! Merging of adjacent text spans.

use crate::ast::{Inline, TextSpan};
use crate::error::ParseError;

/// Merge runs of adjacent text spans and drop empty ones.
///
/// Command spans and element order are left as they are; merging never
/// crosses a command span. Merged text is normalized again, so whitespace
/// meeting at a seam collapses.
pub fn optimize(inlines: Vec<Inline>) -> Result<Vec<Inline>, ParseError> {
    let mut out = Vec::with_capacity(inlines.len());
    let mut pending: Option<String> = None;

    for inline in inlines {
        match inline {
            Inline::Text(span) => pending.get_or_insert_with(String::new).push_str(span.text()),
            command @ Inline::Command(_) => {
                flush(&mut out, pending.take())?;
                out.push(command);
            }
        }
    }
    flush(&mut out, pending)?;

    Ok(out)
}

fn flush(out: &mut Vec<Inline>, pending: Option<String>) -> Result<(), ParseError> {
    if let Some(text) = pending {
        let span = TextSpan::new(text)?;
        if !span.is_empty() {
            out.push(Inline::Text(span));
        }
    }
    Ok(())
}
