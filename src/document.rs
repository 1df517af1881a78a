//! Document root surface.
//!
//! The controller marks the root element with exactly one of the `dark` /
//! `light` class tokens and records the raw preference and the resolved
//! theme as attributes, mirroring what a browser `<html>` element receives.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::theme::{ResolvedTheme, ThemePreference};

pub const DARK_CLASS: &str = "dark";
pub const LIGHT_CLASS: &str = "light";
/// Attribute holding the raw preference (`light`, `dark` or `system`).
pub const THEME_ATTRIBUTE: &str = "data-theme";
/// Attribute holding the resolved theme (`light` or `dark`).
pub const RESOLVED_THEME_ATTRIBUTE: &str = "data-resolved-theme";

/// The mutable surface of a document root element.
pub trait DocumentSurface {
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
    fn set_attribute(&mut self, name: &str, value: &str);
}

/// Marks `document` with the given theme.
///
/// Both marker classes are cleared before the matching one is added, so the
/// root never carries both or neither. Applying the same values again leaves
/// the surface unchanged.
pub(crate) fn apply_theme<D: DocumentSurface + ?Sized>(
    document: &mut D,
    preference: ThemePreference,
    resolved: ResolvedTheme,
) {
    document.remove_class(DARK_CLASS);
    document.remove_class(LIGHT_CLASS);
    document.add_class(match resolved {
        ResolvedTheme::Dark => DARK_CLASS,
        ResolvedTheme::Light => LIGHT_CLASS,
    });
    document.set_attribute(THEME_ATTRIBUTE, preference.as_str());
    document.set_attribute(RESOLVED_THEME_ATTRIBUTE, resolved.as_str());
}

/// An in-memory root element.
///
/// Renders as an opening `<html>` tag through `Display`, which is what the
/// command-line front end prints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootElement {
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
}

impl RootElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

impl DocumentSurface for RootElement {
    fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }
}

impl fmt::Display for RootElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<html")?;
        if !self.classes.is_empty() {
            let classes: Vec<&str> = self.classes().collect();
            write!(f, " class=\"{}\"", classes.join(" "))?;
        }
        for (name, value) in &self.attributes {
            write!(f, " {}=\"{}\"", name, value)?;
        }
        write!(f, ">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_theme_sets_marker_and_attributes() {
        let mut root = RootElement::new();
        apply_theme(&mut root, ThemePreference::System, ResolvedTheme::Dark);

        assert!(root.has_class(DARK_CLASS));
        assert!(!root.has_class(LIGHT_CLASS));
        assert_eq!(root.attribute(THEME_ATTRIBUTE), Some("system"));
        assert_eq!(root.attribute(RESOLVED_THEME_ATTRIBUTE), Some("dark"));
    }

    #[test]
    fn test_apply_theme_is_idempotent() {
        let mut once = RootElement::new();
        apply_theme(&mut once, ThemePreference::Light, ResolvedTheme::Light);

        let mut twice = once.clone();
        apply_theme(&mut twice, ThemePreference::Light, ResolvedTheme::Light);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_theme_never_leaves_both_markers() {
        let mut root = RootElement::new();
        root.add_class(DARK_CLASS);
        root.add_class(LIGHT_CLASS);

        apply_theme(&mut root, ThemePreference::Dark, ResolvedTheme::Dark);
        apply_theme(&mut root, ThemePreference::Light, ResolvedTheme::Light);

        let markers: Vec<&str> = root
            .classes()
            .filter(|c| *c == DARK_CLASS || *c == LIGHT_CLASS)
            .collect();
        assert_eq!(markers, vec![LIGHT_CLASS]);
    }

    #[test]
    fn test_apply_theme_keeps_unrelated_classes() {
        let mut root = RootElement::new();
        root.add_class("scroll-smooth");
        apply_theme(&mut root, ThemePreference::Dark, ResolvedTheme::Dark);
        assert!(root.has_class("scroll-smooth"));
    }

    #[test]
    fn test_display_renders_open_tag() {
        let mut root = RootElement::new();
        apply_theme(&mut root, ThemePreference::System, ResolvedTheme::Light);
        assert_eq!(
            root.to_string(),
            r#"<html class="light" data-resolved-theme="light" data-theme="system">"#
        );
    }
}
