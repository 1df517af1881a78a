//! Tag chip colors.
//!
//! One table maps post tags to chip colors. Lookups are case-insensitive,
//! ignore surrounding whitespace and transliterate accents, and anything not
//! in the table gets [`ChipColor::FALLBACK`].

use std::collections::HashMap;
use std::fmt;

use deunicode::deunicode;
use once_cell::sync::Lazy;
use serde::Serialize;

/// A chip color name from the site's palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipColor {
    Purple,
    Yellow,
    Blue,
    Orange,
    Pink,
    Green,
    Red,
    Gray,
    Cyan,
    Teal,
    Indigo,
    Lime,
    Amber,
    Violet,
    Fuchsia,
    Emerald,
    Rose,
    Slate,
}

impl ChipColor {
    /// Color for tags missing from the table.
    pub const FALLBACK: ChipColor = ChipColor::Gray;

    pub fn as_str(self) -> &'static str {
        match self {
            ChipColor::Purple => "purple",
            ChipColor::Yellow => "yellow",
            ChipColor::Blue => "blue",
            ChipColor::Orange => "orange",
            ChipColor::Pink => "pink",
            ChipColor::Green => "green",
            ChipColor::Red => "red",
            ChipColor::Gray => "gray",
            ChipColor::Cyan => "cyan",
            ChipColor::Teal => "teal",
            ChipColor::Indigo => "indigo",
            ChipColor::Lime => "lime",
            ChipColor::Amber => "amber",
            ChipColor::Violet => "violet",
            ChipColor::Fuchsia => "fuchsia",
            ChipColor::Emerald => "emerald",
            ChipColor::Rose => "rose",
            ChipColor::Slate => "slate",
        }
    }
}

impl fmt::Display for ChipColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const TAG_COLORS: &[(&str, ChipColor)] = &[
    ("c#", ChipColor::Purple),
    ("javascript", ChipColor::Yellow),
    ("python", ChipColor::Blue),
    ("html", ChipColor::Orange),
    ("css", ChipColor::Pink),
    ("java", ChipColor::Green),
    ("ruby", ChipColor::Red),
    ("news", ChipColor::Gray),
    ("blazor", ChipColor::Cyan),
    ("tutorial", ChipColor::Teal),
    ("dotnet", ChipColor::Indigo),
    ("tips", ChipColor::Lime),
    ("book", ChipColor::Amber),
    ("article", ChipColor::Violet),
    ("blog", ChipColor::Fuchsia),
    ("career", ChipColor::Emerald),
    ("life", ChipColor::Rose),
    ("misc", ChipColor::Slate),
];

static TAG_TABLE: Lazy<HashMap<&'static str, ChipColor>> =
    Lazy::new(|| TAG_COLORS.iter().copied().collect());

fn normalize(tag: &str) -> String {
    deunicode(tag.trim()).to_lowercase()
}

/// Returns the chip color for a tag.
///
/// ```rust
/// use sitetheme::{chip_color, ChipColor};
///
/// assert_eq!(chip_color("C#"), ChipColor::Purple);
/// assert_eq!(chip_color("  Blazor "), ChipColor::Cyan);
/// assert_eq!(chip_color("gardening"), ChipColor::FALLBACK);
/// ```
pub fn chip_color(tag: &str) -> ChipColor {
    TAG_TABLE
        .get(normalize(tag).as_str())
        .copied()
        .unwrap_or(ChipColor::FALLBACK)
}

/// Tags with an assigned color, in table order.
pub fn known_tags() -> impl Iterator<Item = (&'static str, ChipColor)> {
    TAG_COLORS.iter().copied()
}
