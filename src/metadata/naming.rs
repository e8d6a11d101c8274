//! Identifier synthesis for compiled metadata.
//!
//! Constraint and index names hash to the same bytes the ORM naming
//! convention produces, so introspected and compiled schemas agree on names
//! and no-op diffs stay empty.

use sha1::{Digest, Sha1};

/// Synthesized identifiers are capped at 30 characters, prefix included.
pub const MAX_IDENTIFIER_LENGTH: usize = 30;

/// `prefix + sha1(table + "_" + sorted(columns).join("_"))`, truncated.
pub fn synthetic_name(prefix: &str, table_name: &str, column_names: &[String]) -> String {
    let mut sorted = column_names.to_vec();
    sorted.sort();

    let digest = Sha1::digest(format!("{}_{}", table_name, sorted.join("_")).as_bytes());
    let mut name = format!("{}{:x}", prefix, digest);
    name.truncate(MAX_IDENTIFIER_LENGTH);
    name
}

/// Convert an entity name to its default table name.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_numeric());
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if i > 0 && (prev_lower || next_lower) {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(*c);
        }
    }

    out
}
