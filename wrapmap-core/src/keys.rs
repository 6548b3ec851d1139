//! Property-name normalization and key resolution
//!
//! Attribute-style access finds entries by name under multiple naming
//! conventions: `resolve_key` tries a verbatim hit first, then matches
//! the normalized (lowercase, separator-delimited) form of the requested
//! name against the normalized form of every stored string key.

use std::collections::HashMap;

use heck::ToSnakeCase;

use crate::value::{ItemMap, Key};

/// Canonical lowercase, separator-delimited form of a property name.
///
/// An all-uppercase ASCII token is lowercased as-is (`"URL"` stays one
/// word); everything else goes through snake-case conversion, so
/// `"CamelCase"`, `"mixedCase"` and `"spaced out"` all become
/// `"camel_case"`, `"mixed_case"` and `"spaced_out"`.
pub fn normalize(name: &str) -> String {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_uppercase()) {
        name.to_ascii_lowercase()
    } else {
        name.to_snake_case()
    }
}

/// Resolve a requested property name against the mapping's key set.
///
/// Verbatim string-key matches win. Otherwise every stored string key is
/// indexed by its normalized form (later keys overwrite earlier ones on
/// collision) and the normalized requested name is looked up. Integer
/// keys only ever match verbatim-style access, never by name.
pub fn resolve_key(items: &ItemMap, requested: &str) -> Option<Key> {
    let verbatim = Key::Str(requested.to_string());
    if items.contains_key(&verbatim) {
        return Some(verbatim);
    }

    let mut by_normalized: HashMap<String, &Key> = HashMap::new();
    for key in items.keys() {
        if let Key::Str(name) = key {
            by_normalized.insert(normalize(name), key);
        }
    }

    by_normalized.get(&normalize(requested)).map(|k| (*k).clone())
}
