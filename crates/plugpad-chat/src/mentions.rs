//! Mention extraction from message text.
//!
//! The platform's mention marker is `<@` followed by an identifier of
//! letters, digits, hyphens, and underscores, closed by `>`.

/// Extract mentioned user ids from `text`.
///
/// Returns the captured identifiers deduplicated, preserving first-seen
/// order. Pure and idempotent: identical input always yields identical
/// output.
pub fn extract_mentions(text: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find("<@") {
        rest = &rest[open + 2..];

        let ident_end = rest
            .find(|c: char| !is_mention_char(c))
            .unwrap_or(rest.len());

        // An empty identifier or a missing closing bracket is not a mention;
        // keep scanning after the marker.
        if ident_end > 0 && rest[ident_end..].starts_with('>') {
            let id = &rest[..ident_end];
            if !ids.iter().any(|existing| existing == id) {
                ids.push(id.to_string());
            }
            rest = &rest[ident_end + 1..];
        }
    }

    ids
}

fn is_mention_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}
