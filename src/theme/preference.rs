//! Preference and resolved-theme values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// The user's stored theme intent.
///
/// `System` defers to the live appearance signal; the other two variants
/// pin the theme regardless of what the operating system reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    /// All preferences, in toggle order.
    pub const ALL: [ThemePreference; 3] = [
        ThemePreference::Light,
        ThemePreference::Dark,
        ThemePreference::System,
    ];

    /// Returns the persisted string form.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    /// Returns the preference that follows this one when toggling.
    ///
    /// The cycle is fixed: `Light -> Dark -> System -> Light`.
    ///
    /// ```rust
    /// use sitetheme::ThemePreference;
    ///
    /// assert_eq!(ThemePreference::Light.next(), ThemePreference::Dark);
    /// assert_eq!(ThemePreference::System.next(), ThemePreference::Light);
    /// ```
    pub fn next(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::System,
            ThemePreference::System => ThemePreference::Light,
        }
    }

    /// Resolves against the given system appearance.
    pub fn resolve_with(self, prefers_dark: bool) -> ResolvedTheme {
        match self {
            ThemePreference::Light => ResolvedTheme::Light,
            ThemePreference::Dark => ResolvedTheme::Dark,
            ThemePreference::System => ResolvedTheme::from_prefers_dark(prefers_dark),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Only the exact persisted forms are accepted; `"Dark"` or `" dark"` are
/// foreign values.
impl FromStr for ThemePreference {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            _ => Err(ThemeError::InvalidPreference(s.to_string())),
        }
    }
}

/// The concrete theme that is actually rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl ResolvedTheme {
    /// Maps a "prefers dark" reading onto a theme.
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            ResolvedTheme::Dark
        } else {
            ResolvedTheme::Light
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResolvedTheme::Light => "light",
            ResolvedTheme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == ResolvedTheme::Dark
    }
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ResolvedTheme> for ThemePreference {
    fn from(theme: ResolvedTheme) -> Self {
        match theme {
            ResolvedTheme::Light => ThemePreference::Light,
            ResolvedTheme::Dark => ThemePreference::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!("light".parse::<ThemePreference>().unwrap(), ThemePreference::Light);
        assert_eq!("dark".parse::<ThemePreference>().unwrap(), ThemePreference::Dark);
        assert_eq!("system".parse::<ThemePreference>().unwrap(), ThemePreference::System);
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("DARK".parse::<ThemePreference>().is_err());
        assert!(" dark".parse::<ThemePreference>().is_err());
        assert!("System".parse::<ThemePreference>().is_err());
        assert!("light\n".parse::<ThemePreference>().is_err());
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "sepia".parse::<ThemePreference>().unwrap_err();
        assert!(matches!(err, ThemeError::InvalidPreference(ref v) if v == "sepia"));
        assert!("".parse::<ThemePreference>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for pref in ThemePreference::ALL {
            assert_eq!(pref.to_string().parse::<ThemePreference>().unwrap(), pref);
        }
    }

    #[test]
    fn test_next_cycle_closes_after_three() {
        for start in ThemePreference::ALL {
            assert_eq!(start.next().next().next(), start);
        }
    }

    #[test]
    fn test_resolve_with() {
        assert_eq!(ThemePreference::Light.resolve_with(true), ResolvedTheme::Light);
        assert_eq!(ThemePreference::Dark.resolve_with(false), ResolvedTheme::Dark);
        assert_eq!(ThemePreference::System.resolve_with(true), ResolvedTheme::Dark);
        assert_eq!(ThemePreference::System.resolve_with(false), ResolvedTheme::Light);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ThemePreference::System).unwrap();
        assert_eq!(json, "\"system\"");
        let theme: ResolvedTheme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(theme, ResolvedTheme::Dark);
    }

    #[test]
    fn test_default_is_system() {
        assert_eq!(ThemePreference::default(), ThemePreference::System);
    }
}
