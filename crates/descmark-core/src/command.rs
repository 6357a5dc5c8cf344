//! The fixed catalog of inline command types.
//!
//! Each command type is selected inside braces by one of its aliases
//! (`{e text}`, `{cb}`). The catalog order doubles as lookup priority, and
//! the first alias of each entry is the one written back on serialization.

use std::fmt;

/// An inline command type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandType {
    /// `{e ...}`
    Emphasis,
    /// `{s ...}`
    StrongEmphasis,
    /// `{p ...}`
    ProperName,
    /// `{c ...}`
    Code,
    /// `{m ...}`
    Message,
    /// `{mp ...}`
    MessagePlaceholder,
    /// `{cb}` or `{cbo}`, a literal `{`.
    CurlyBraceOpen,
    /// `{cbc}`, a literal `}`.
    CurlyBraceClosed,
}

struct Entry {
    kind: CommandType,
    name: &'static str,
    aliases: &'static [&'static str],
}

static CATALOG: [Entry; 8] = [
    Entry {
        kind: CommandType::Emphasis,
        name: "EMPHASIS",
        aliases: &["e"],
    },
    Entry {
        kind: CommandType::StrongEmphasis,
        name: "STRONG_EMPHASIS",
        aliases: &["s"],
    },
    Entry {
        kind: CommandType::ProperName,
        name: "PROPER_NAME",
        aliases: &["p"],
    },
    Entry {
        kind: CommandType::Code,
        name: "CODE",
        aliases: &["c"],
    },
    Entry {
        kind: CommandType::Message,
        name: "MESSAGE",
        aliases: &["m"],
    },
    Entry {
        kind: CommandType::MessagePlaceholder,
        name: "MESSAGE_PLACEHOLDER",
        aliases: &["mp"],
    },
    Entry {
        kind: CommandType::CurlyBraceOpen,
        name: "CURLY_BRACE_OPEN",
        aliases: &["cb", "cbo"],
    },
    Entry {
        kind: CommandType::CurlyBraceClosed,
        name: "CURLY_BRACE_CLOSED",
        aliases: &["cbc"],
    },
];

impl CommandType {
    /// Every command type, in catalog order.
    pub const ALL: [CommandType; 8] = [
        CommandType::Emphasis,
        CommandType::StrongEmphasis,
        CommandType::ProperName,
        CommandType::Code,
        CommandType::Message,
        CommandType::MessagePlaceholder,
        CommandType::CurlyBraceOpen,
        CommandType::CurlyBraceClosed,
    ];

    #[inline]
    fn entry(self) -> &'static Entry {
        &CATALOG[self as usize]
    }

    /// Position in the catalog, stable across releases.
    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Symbolic name, e.g. `"STRONG_EMPHASIS"`.
    #[inline]
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// All aliases accepted for this type; never empty.
    #[inline]
    pub fn aliases(self) -> &'static [&'static str] {
        self.entry().aliases
    }

    /// The alias used when serializing.
    #[inline]
    pub fn canonical_alias(self) -> &'static str {
        self.entry().aliases[0]
    }

    /// Look up a command type by its symbolic name.
    pub fn from_name(name: &str) -> Option<CommandType> {
        CATALOG
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.kind)
    }

    /// Look up a command type by any of its aliases.
    ///
    /// Entries are tried in catalog order and the first match wins.
    pub fn from_alias(alias: &str) -> Option<CommandType> {
        CATALOG
            .iter()
            .find(|entry| entry.aliases.contains(&alias))
            .map(|entry| entry.kind)
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_declaration_order() {
        for (i, kind) in CommandType::ALL.iter().enumerate() {
            assert_eq!(kind.ordinal(), i);
            assert_eq!(CATALOG[i].kind, *kind);
        }
    }

    #[test]
    fn test_lookup_by_alias() {
        assert_eq!(CommandType::from_alias("e"), Some(CommandType::Emphasis));
        assert_eq!(CommandType::from_alias("mp"), Some(CommandType::MessagePlaceholder));
        assert_eq!(CommandType::from_alias("cb"), Some(CommandType::CurlyBraceOpen));
        assert_eq!(CommandType::from_alias("cbo"), Some(CommandType::CurlyBraceOpen));
        assert_eq!(CommandType::from_alias("cbc"), Some(CommandType::CurlyBraceClosed));
        assert_eq!(CommandType::from_alias("E"), None);
        assert_eq!(CommandType::from_alias(""), None);
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(CommandType::from_name("CODE"), Some(CommandType::Code));
        assert_eq!(
            CommandType::from_name("CURLY_BRACE_OPEN"),
            Some(CommandType::CurlyBraceOpen)
        );
        assert_eq!(CommandType::from_name("code"), None);
    }

    #[test]
    fn test_canonical_alias_is_first() {
        assert_eq!(CommandType::CurlyBraceOpen.canonical_alias(), "cb");
        assert_eq!(CommandType::Message.canonical_alias(), "m");
        assert_eq!(CommandType::StrongEmphasis.to_string(), "STRONG_EMPHASIS");
    }

    #[test]
    fn test_aliases_are_unique() {
        let mut seen = Vec::new();
        for kind in CommandType::ALL {
            for alias in kind.aliases() {
                assert!(!seen.contains(alias), "duplicate alias {}", alias);
                seen.push(*alias);
            }
        }
    }
}
