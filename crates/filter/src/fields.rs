//! Maps a plan's logical attribute references onto physical column names.

use std::collections::HashMap;

const ATTR_PREFIX_LONG: &str = "request.resource.attr.";
const ATTR_PREFIX_SHORT: &str = "R.attr.";

/// Resolves a variable path from a query plan to a column identifier.
///
/// Resolution strips the resource-attribute namespace prefix (long or
/// short form, at most one), consults the override map, and otherwise
/// snake-cases the attribute name. The override map covers attributes
/// whose column does not derive mechanically, e.g. a relationship
/// attribute mapping onto its join column.
///
/// Resolution is total: an attribute with no override and no matching
/// column still produces a name, and the mismatch only surfaces when the
/// store executes the query.
#[derive(Debug, Clone, Default)]
pub struct FieldResolver {
    overrides: HashMap<String, String>,
}

impl FieldResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        FieldResolver { overrides }
    }

    /// Adds a single attribute-to-column override.
    pub fn map(mut self, attribute: &str, column: &str) -> Self {
        self.overrides
            .insert(attribute.to_string(), column.to_string());
        self
    }

    pub fn resolve(&self, path: &str) -> String {
        let name = path
            .strip_prefix(ATTR_PREFIX_LONG)
            .or_else(|| path.strip_prefix(ATTR_PREFIX_SHORT))
            .unwrap_or(path);

        if let Some(column) = self.overrides.get(name) {
            return column.clone();
        }

        to_snake_case(name)
    }
}

fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let after_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let before_lower = chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            if i > 0 && chars[i - 1] != '_' && (after_lower || before_lower) {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
