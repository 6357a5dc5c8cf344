//! # descmark Core
//!
//! Parser and canonical serializer for descmark, a small markup language
//! for rich descriptions: prose with typed inline commands and bulleted
//! lists.
//!
//! ## Quick Start
//!
//! ```rust
//! use descmark_core::{parse, Block};
//!
//! let doc = parse("Call {c parse} on the {p Parser}.\n\n* one\n* two").unwrap();
//! assert_eq!(doc.blocks().len(), 2);
//! assert!(matches!(doc.blocks()[1], Block::List(_)));
//!
//! // Display writes the canonical form
//! assert_eq!(doc.to_string(), "Call {c parse} on the {p Parser}.\n\n* one\n* two");
//! ```
//!
//! ## Syntax
//!
//! - `{alias content}` - command span; aliases are listed in [`CommandType`]
//! - `\\`, `\{`, `\}` - escapes, only inside a command body
//! - `* item` - list item; lines indented by two spaces continue it
//! - blank line - separates blocks
//!
//! ## Building Trees
//!
//! ```rust
//! use descmark_core::{CommandSpan, CommandType, Document, Paragraph, TextSpan};
//!
//! let paragraph = Paragraph::new(vec![
//!     TextSpan::new("Press ").unwrap().into(),
//!     CommandSpan::from_text(CommandType::StrongEmphasis, "now").unwrap().into(),
//! ]);
//! let doc = Document::new(vec![paragraph.into()]);
//! assert_eq!(doc.to_string(), "Press {s now}");
//! ```

pub mod ast;
pub mod command;
pub mod error;
pub mod inline;
pub mod lexer;
pub mod optimize;
pub mod parser;
pub mod span;

pub use ast::{Block, CommandSpan, Document, Inline, List, ListItem, Paragraph, TextSpan};
pub use command::CommandType;
pub use error::{ParseError, ParseErrorKind};
pub use parser::{parse, Parser};
