//! Property tests for theme resolution and persistence.

use proptest::prelude::*;
use sitetheme::{
    ManualAppearance, MemoryStore, PreferenceStore, ResolvedTheme, RootElement, ThemeController,
    ThemePreference, DEFAULT_STORAGE_KEY,
};

fn preference() -> impl Strategy<Value = ThemePreference> {
    prop::sample::select(ThemePreference::ALL.to_vec())
}

fn page(prefers_dark: bool) -> ThemeController<MemoryStore, ManualAppearance, RootElement> {
    let mut page = ThemeController::new(
        MemoryStore::new(),
        ManualAppearance::new(prefers_dark),
        RootElement::new(),
    );
    page.initialize();
    page
}

proptest! {
    #[test]
    fn resolve_agrees_with_explicit_choices(pref in preference(), dark in any::<bool>()) {
        let resolved = page(dark).resolve(pref);
        match pref {
            ThemePreference::Light => prop_assert_eq!(resolved, ResolvedTheme::Light),
            ThemePreference::Dark => prop_assert_eq!(resolved, ResolvedTheme::Dark),
            ThemePreference::System => prop_assert_eq!(resolved.is_dark(), dark),
        }
    }

    #[test]
    fn stored_preference_matches_current(prefs in prop::collection::vec(preference(), 1..12), dark in any::<bool>()) {
        let mut page = page(dark);
        for pref in prefs {
            page.set_theme(pref).unwrap();
            let stored = page.store().get(DEFAULT_STORAGE_KEY);
            prop_assert_eq!(stored.as_deref(), Some(pref.as_str()));
            prop_assert_eq!(page.preference(), pref);
        }
    }

    #[test]
    fn exactly_one_marker_after_any_sequence(prefs in prop::collection::vec(preference(), 0..12), flips in prop::collection::vec(any::<bool>(), 0..12)) {
        let appearance = ManualAppearance::new(false);
        let mut page = ThemeController::new(MemoryStore::new(), appearance.clone(), RootElement::new());
        page.initialize();
        for (pref, dark) in prefs.into_iter().zip(flips) {
            page.set_theme(pref).unwrap();
            appearance.set_prefers_dark(dark);
            page.poll_appearance();

            let doc = page.document();
            prop_assert!(doc.has_class("dark") ^ doc.has_class("light"));
            prop_assert_eq!(doc.has_class("dark"), page.resolved().is_dark());
        }
    }

    #[test]
    fn invalid_names_change_nothing(raw in "[a-z]{1,10}") {
        prop_assume!(raw.parse::<ThemePreference>().is_err());
        let mut page = page(false);
        page.set_theme(ThemePreference::Dark).unwrap();

        prop_assert!(page.set_theme_named(&raw).is_err());
        prop_assert_eq!(page.preference(), ThemePreference::Dark);
        prop_assert_eq!(page.store().writes(), 1);
    }
}

#[test]
fn toggle_three_times_from_light_returns_to_light() {
    let mut page = page(false);
    page.set_theme(ThemePreference::Light).unwrap();
    for _ in 0..3 {
        page.toggle_theme().unwrap();
    }
    assert_eq!(page.preference(), ThemePreference::Light);
}
