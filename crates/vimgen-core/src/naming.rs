//! Identifier utilities for code generation.
//!
//! Schema names come from an XML API and are not always legal Rust identifiers.
//! These helpers turn them into safe identifiers and doc comments.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `type` | [`escape_reserved`] | `type_` |
//! | `name`, public | [`with_visibility`] | `Name` |
//! | `vmx-07` | [`sanitize_identifier`] | `vmx_07` |
//! | `"a\nb"` | [`doc_comment`] | `"\n/// a\n/// b"` |

/// Suffix appended to identifiers that collide with a Rust keyword.
pub const RESERVED_SUFFIX: &str = "_";

/// Rust keywords, including reserved and edition-dependent ones.
const RESERVED_WORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Whether `identifier` is a Rust keyword.
pub fn is_reserved(identifier: &str) -> bool {
    RESERVED_WORDS.contains(&identifier)
}

/// Append [`RESERVED_SUFFIX`] to Rust keywords, leave everything else alone.
///
/// Escaping is idempotent: `type_` is not a keyword, so escaping it again is a
/// no-op.
///
/// # Examples
///
/// ```
/// use vimgen_core::naming::escape_reserved;
///
/// assert_eq!(escape_reserved("type"), "type_");
/// assert_eq!(escape_reserved("type_"), "type_");
/// assert_eq!(escape_reserved("host"), "host");
/// ```
pub fn escape_reserved(identifier: &str) -> String {
    if is_reserved(identifier) {
        format!("{identifier}{RESERVED_SUFFIX}")
    } else {
        identifier.to_string()
    }
}

/// Visibility of a generated identifier, expressed through its first letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// Rewrite the case of the first character only.
///
/// # Examples
///
/// ```
/// use vimgen_core::naming::{Visibility, with_visibility};
///
/// assert_eq!(with_visibility("name", Visibility::Public), "Name");
/// assert_eq!(with_visibility("PowerOnVM_Task", Visibility::Private), "powerOnVM_Task");
/// assert_eq!(with_visibility("", Visibility::Public), "");
/// ```
pub fn with_visibility(identifier: &str, visibility: Visibility) -> String {
    let mut chars = identifier.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => match visibility {
            Visibility::Public => first.to_uppercase().chain(chars).collect(),
            Visibility::Private => first.to_lowercase().chain(chars).collect(),
        },
    }
}

/// Replace characters that cannot appear in an identifier with `_`.
///
/// A leading digit gets a `_` prefix. A result that is empty or made only of
/// underscores is not a usable identifier, so it gets an `Empty` suffix.
///
/// # Examples
///
/// ```
/// use vimgen_core::naming::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("vmx-07"), "vmx_07");
/// assert_eq!(sanitize_identifier("ha.primary"), "ha_primary");
/// assert_eq!(sanitize_identifier("3d"), "_3d");
/// assert_eq!(sanitize_identifier("_"), "_Empty");
/// ```
pub fn sanitize_identifier(s: &str) -> String {
    let mut out: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }

    if out.chars().all(|c| c == '_') {
        out.push_str("Empty");
    }

    out
}

/// Format free text as a `///` doc comment block.
///
/// Returns an empty string for empty or whitespace-only text so that no
/// comment is emitted for undocumented entities. Otherwise every line starts
/// with a line break, so the block can be placed directly before a
/// declaration.
///
/// # Examples
///
/// ```
/// use vimgen_core::naming::doc_comment;
///
/// assert_eq!(doc_comment("Host name."), "\n/// Host name.");
/// assert_eq!(doc_comment("   \n  "), "");
/// ```
pub fn doc_comment(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    text.lines()
        .map(|line| {
            let line = line.trim_start();
            if line.is_empty() {
                "\n///".to_string()
            } else {
                format!("\n/// {line}")
            }
        })
        .collect()
}
