//! descmark CLI - Parse, validate, and format descmark descriptions
//!
//! Usage:
//!   dmcli [OPTIONS] <COMMAND> <FILE>
//!
//! Commands:
//!   parse     Parse and display document structure
//!   validate  Check document for errors
//!   format    Print the canonical form
//!   stats     Show document statistics

use std::fs;
use std::io::{self, Read};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use descmark_core::{Block, CommandType, Document, Inline, ParseError, Parser};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, ClapParser)]
#[command(name = "dmcli", version, about = "descmark description parser and formatter")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse and display document structure
    Parse {
        /// Input file, or `-` for stdin
        file: String,
        /// Output the tree as JSON
        #[arg(short, long)]
        json: bool,
        /// Show every inline element
        #[arg(short, long)]
        tree: bool,
    },
    /// Check document for errors without output
    Validate {
        /// Input file, or `-` for stdin
        file: String,
        /// Output the result as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Print the canonical form of the document
    Format {
        /// Input file, or `-` for stdin
        file: String,
        /// Exit with an error if the file is not already canonical
        #[arg(long)]
        check: bool,
    },
    /// Show document statistics
    Stats {
        /// Input file, or `-` for stdin
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let parser = Parser::new();

    match cli.command {
        Command::Parse { file, json, tree } => {
            let input = read_input(&file)?;
            cmd_parse(&parser, &input, json, tree)
        }
        Command::Validate { file, json } => {
            let input = read_input(&file)?;
            cmd_validate(&parser, &input, json)
        }
        Command::Format { file, check } => {
            let input = read_input(&file)?;
            cmd_format(&parser, &input, check)
        }
        Command::Stats { file } => {
            let input = read_input(&file)?;
            cmd_stats(&parser, &input)
        }
    }
}

fn read_input(file: &str) -> Result<String> {
    let input = if file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(file).with_context(|| format!("failed to read '{}'", file))?
    };
    debug!(file, bytes = input.len(), "read input");
    Ok(input)
}

// =============================================================================
// Parse Command
// =============================================================================

fn cmd_parse(parser: &Parser, input: &str, json: bool, tree: bool) -> Result<()> {
    let doc = parser.parse(input)?;

    if json {
        let json_doc = convert_document(&doc);
        println!("{}", serde_json::to_string_pretty(&json_doc)?);
    } else if tree {
        print_document_tree(&doc);
    } else {
        print_document_summary(&doc);
    }

    Ok(())
}

// =============================================================================
// Validate Command
// =============================================================================

fn cmd_validate(parser: &Parser, input: &str, json: bool) -> Result<()> {
    match parser.parse(input) {
        Ok(_) => {
            if json {
                println!(r#"{{"valid": true, "errors": []}}"#);
            } else {
                println!("Valid: no errors found");
            }
            Ok(())
        }
        Err(err) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({"valid": false, "errors": [error_json(&err)]})
                );
            } else {
                eprintln!("Invalid: {}", err);
                if let Some(cause) = &err.cause {
                    eprintln!("  caused by: {}", cause);
                }
            }
            Err(anyhow::anyhow!("document is not valid"))
        }
    }
}

fn error_json(err: &ParseError) -> serde_json::Value {
    let root = err.root_cause();
    serde_json::json!({
        "message": err.to_string(),
        "cause": err.cause.as_ref().map(|c| c.to_string()),
        "token": err.token(),
        "span": root.span.map(|s| serde_json::json!({"start": s.start, "end": s.end})),
    })
}

// =============================================================================
// Format Command
// =============================================================================

fn cmd_format(parser: &Parser, input: &str, check: bool) -> Result<()> {
    let canonical = parser.parse(input)?.to_string();

    if check {
        // Files conventionally end with a newline; the canonical form never does.
        if canonical != input.strip_suffix('\n').unwrap_or(input) {
            anyhow::bail!("document is not in canonical form");
        }
        println!("Canonical: no changes needed");
    } else {
        println!("{}", canonical);
    }

    Ok(())
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(parser: &Parser, input: &str) -> Result<()> {
    let doc = parser.parse(input)?;
    let stats = DocumentStats::from_document(&doc, input);

    println!("Document Statistics");
    println!("-------------------");
    println!("Content:");
    println!("  Total blocks:   {}", stats.total_blocks);
    println!("  Paragraphs:     {}", stats.paragraphs);
    println!("  Lists:          {}", stats.lists);
    println!("  List items:     {}", stats.list_items);
    println!();
    println!("Commands:");
    for kind in CommandType::ALL {
        let count = stats.commands[kind.ordinal()];
        if count > 0 {
            println!("  {:<20} {}", kind.name(), count);
        }
    }
    println!();
    println!("Size:");
    println!("  Characters:     {}", stats.chars);
    println!("  Words (est.):   {}", stats.words);
    println!("  Lines:          {}", stats.lines);

    Ok(())
}

struct DocumentStats {
    total_blocks: usize,
    paragraphs: usize,
    lists: usize,
    list_items: usize,
    commands: [usize; CommandType::ALL.len()],
    chars: usize,
    words: usize,
    lines: usize,
}

impl DocumentStats {
    fn from_document(doc: &Document, input: &str) -> Self {
        let mut stats = Self {
            total_blocks: doc.blocks().len(),
            paragraphs: 0,
            lists: 0,
            list_items: 0,
            commands: [0; CommandType::ALL.len()],
            chars: input.chars().count(),
            words: input.split_whitespace().count(),
            lines: input.lines().count(),
        };

        for block in doc.blocks() {
            match block {
                Block::Paragraph(p) => {
                    stats.paragraphs += 1;
                    stats.count_inlines(p.content());
                }
                Block::List(l) => {
                    stats.lists += 1;
                    stats.list_items += l.items().len();
                    for item in l.items() {
                        stats.count_inlines(item.content());
                    }
                }
            }
        }
        stats
    }

    fn count_inlines(&mut self, inlines: &[Inline]) {
        for inline in inlines {
            if let Inline::Command(c) = inline {
                self.commands[c.kind().ordinal()] += 1;
            }
        }
    }
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize)]
struct JsonDocument<'a> {
    blocks: Vec<JsonBlock<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum JsonBlock<'a> {
    Paragraph { content: Vec<JsonInline<'a>> },
    List { items: Vec<Vec<JsonInline<'a>>> },
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum JsonInline<'a> {
    Text {
        content: &'a str,
    },
    Command {
        command: &'static str,
        alias: &'static str,
        content: &'a str,
    },
}

fn convert_document(doc: &Document) -> JsonDocument<'_> {
    JsonDocument {
        blocks: doc.blocks().iter().map(convert_block).collect(),
    }
}

fn convert_block(block: &Block) -> JsonBlock<'_> {
    match block {
        Block::Paragraph(p) => JsonBlock::Paragraph {
            content: p.content().iter().map(convert_inline).collect(),
        },
        Block::List(l) => JsonBlock::List {
            items: l
                .items()
                .iter()
                .map(|item| item.content().iter().map(convert_inline).collect())
                .collect(),
        },
    }
}

fn convert_inline(inline: &Inline) -> JsonInline<'_> {
    match inline {
        Inline::Text(t) => JsonInline::Text { content: t.text() },
        Inline::Command(c) => JsonInline::Command {
            command: c.kind().name(),
            alias: c.kind().canonical_alias(),
            content: c.content().text(),
        },
    }
}

// =============================================================================
// Text Output
// =============================================================================

fn print_document_summary(doc: &Document) {
    println!("Blocks: {}", doc.blocks().len());
    for (i, block) in doc.blocks().iter().enumerate() {
        println!("  [{}] {}", i + 1, describe_block(block));
    }
}

fn print_document_tree(doc: &Document) {
    println!("=== descmark tree ===");

    for (i, block) in doc.blocks().iter().enumerate() {
        println!();
        println!("[{}] {}", i + 1, describe_block(block));
        match block {
            Block::Paragraph(p) => print_inlines(p.content(), 1),
            Block::List(l) => {
                for (i, item) in l.items().iter().enumerate() {
                    println!("  Item {}:", i + 1);
                    print_inlines(item.content(), 2);
                }
            }
        }
    }
}

fn describe_block(block: &Block) -> String {
    match block {
        Block::Paragraph(p) => format!("Paragraph ({} inlines)", p.content().len()),
        Block::List(l) => format!("List ({} items)", l.items().len()),
    }
}

fn print_inlines(inlines: &[Inline], indent: usize) {
    let prefix = "  ".repeat(indent);

    for inline in inlines {
        match inline {
            Inline::Text(t) => println!("{}Text {:?}", prefix, t.text()),
            Inline::Command(c) => {
                println!("{}{} {:?}", prefix, c.kind().name(), c.content().text())
            }
        }
    }
}
