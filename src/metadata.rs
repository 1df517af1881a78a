//! Front-matter metadata lookups.

use std::collections::HashMap;

/// Returns the value stored under `key`, or `fallback` when the map is
/// absent or has no such key.
///
/// ```rust
/// use std::collections::HashMap;
/// use sitetheme::value_or;
///
/// let mut meta = HashMap::new();
/// meta.insert("author".to_string(), "Dana".to_string());
///
/// assert_eq!(value_or(Some(&meta), "author", "anonymous"), "Dana");
/// assert_eq!(value_or(Some(&meta), "image", "/img/default.png"), "/img/default.png");
/// assert_eq!(value_or(None, "author", "anonymous"), "anonymous");
/// ```
pub fn value_or<'a>(
    metadata: Option<&'a HashMap<String, String>>,
    key: &str,
    fallback: &'a str,
) -> &'a str {
    metadata
        .and_then(|m| m.get(key))
        .map(String::as_str)
        .unwrap_or(fallback)
}
