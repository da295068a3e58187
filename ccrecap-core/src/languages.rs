//! Extension-to-language lookup.
//!
//! The mapping ships as an embedded TOML resource
//! (`assets/languages.toml`) so it can be extended without touching
//! pipeline code. Lookups are against the lowercased extension with no
//! leading dot.

use std::collections::BTreeMap;
use std::sync::OnceLock;

static LANGUAGES_TOML: &str = include_str!("../assets/languages.toml");

static TABLE: OnceLock<BTreeMap<String, String>> = OnceLock::new();

fn table() -> &'static BTreeMap<String, String> {
    TABLE.get_or_init(|| {
        toml::from_str(LANGUAGES_TOML).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "embedded language table is invalid");
            BTreeMap::new()
        })
    })
}

/// Look up the language for a file extension (e.g. "rs" -> "Rust").
///
/// Returns `None` for extensions the table does not group.
pub fn language_for(ext: &str) -> Option<&'static str> {
    table().get(ext).map(|s| s.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(language_for("rs"), Some("Rust"));
        assert_eq!(language_for("md"), Some("Markdown"));
        assert_eq!(language_for("tsx"), Some("TypeScript"));
        assert_eq!(language_for("dockerfile"), Some("Docker"));
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(language_for("xyz123"), None);
        assert_eq!(language_for(""), None);
    }

    #[test]
    fn test_table_parses() {
        assert!(!table().is_empty());
    }
}
