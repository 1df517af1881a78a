//! Theme preference controller.

use tracing::{debug, info, warn};

use super::appearance::AppearanceSignal;
use super::event::{Listeners, SubscriptionId, ThemeChangeEvent};
use super::preference::{ResolvedTheme, ThemePreference};
use crate::document::{apply_theme, DocumentSurface};
use crate::error::ThemeError;
use crate::store::PreferenceStore;
use crate::widget::{MountedWidgets, WidgetHost, WidgetId};

/// Store key the preference is persisted under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "theme-preference";

/// Resolves, applies, persists and announces the page theme.
///
/// The controller owns its collaborators: a [`PreferenceStore`] for the
/// persisted preference, an [`AppearanceSignal`] for the system's light/dark
/// setting, and a [`DocumentSurface`] that receives the theme markers.
/// Create one per page session and hand out references to it; there is no
/// global instance.
///
/// All operations run to completion on the caller's thread. Appearance
/// changes are delivered by the owner's event loop through
/// [`handle_appearance_change`](Self::handle_appearance_change) or
/// [`poll_appearance`](Self::poll_appearance).
///
/// # Example
///
/// ```rust
/// use sitetheme::{
///     ManualAppearance, MemoryStore, PreferenceStore, ResolvedTheme, RootElement,
///     ThemeController, ThemePreference,
/// };
///
/// let appearance = ManualAppearance::new(true);
/// let mut controller = ThemeController::new(MemoryStore::new(), appearance, RootElement::new());
///
/// // Nothing stored yet: follows the system, which prefers dark.
/// assert_eq!(controller.initialize(), ResolvedTheme::Dark);
/// assert!(controller.document().has_class("dark"));
///
/// controller.set_theme(ThemePreference::Light).unwrap();
/// assert_eq!(controller.store().get("theme-preference").as_deref(), Some("light"));
/// assert!(controller.document().has_class("light"));
/// ```
#[derive(Debug)]
pub struct ThemeController<S, A, D> {
    store: S,
    appearance: A,
    document: D,
    storage_key: String,
    current: ThemePreference,
    applied: Option<ResolvedTheme>,
    observed_dark: bool,
    listeners: Listeners,
    widgets: MountedWidgets,
}

impl<S, A, D> ThemeController<S, A, D>
where
    S: PreferenceStore,
    A: AppearanceSignal,
    D: DocumentSurface,
{
    /// Creates a controller using [`DEFAULT_STORAGE_KEY`].
    pub fn new(store: S, appearance: A, document: D) -> Self {
        Self::with_storage_key(DEFAULT_STORAGE_KEY, store, appearance, document)
    }

    /// Creates a controller that persists under `key`.
    ///
    /// The initial preference is read from the store; the document is not
    /// touched until [`initialize`](Self::initialize).
    pub fn with_storage_key(key: impl Into<String>, store: S, appearance: A, document: D) -> Self {
        let storage_key = key.into();
        let current = read_preference(&store, &storage_key);
        let observed_dark = appearance.prefers_dark();
        Self {
            store,
            appearance,
            document,
            storage_key,
            current,
            applied: None,
            observed_dark,
            listeners: Listeners::default(),
            widgets: MountedWidgets::default(),
        }
    }

    /// Loads the stored preference and applies it to the document.
    ///
    /// Missing or unrecognized stored values fall back to
    /// [`ThemePreference::System`]. Nothing is persisted and no event is
    /// emitted.
    pub fn initialize(&mut self) -> ResolvedTheme {
        self.current = read_preference(&self.store, &self.storage_key);
        self.observed_dark = self.appearance.prefers_dark();
        let resolved = self.current.resolve_with(self.observed_dark);
        self.apply(resolved);
        debug!(preference = %self.current, resolved = %resolved, "theme initialized");
        resolved
    }

    /// Resolves a preference against the live appearance signal.
    pub fn resolve(&self, preference: ThemePreference) -> ResolvedTheme {
        preference.resolve_with(self.appearance.prefers_dark())
    }

    /// Makes `preference` the current preference.
    ///
    /// Persists it, applies the resolved theme, notifies listeners in
    /// subscription order and forwards the resolved theme to every mounted
    /// widget.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Store`] if the preference cannot be persisted.
    /// The controller is left unchanged in that case.
    pub fn set_theme(&mut self, preference: ThemePreference) -> Result<ThemeChangeEvent, ThemeError> {
        self.store.set(&self.storage_key, preference.as_str())?;
        self.current = preference;

        let resolved = self.resolve(preference);
        self.apply(resolved);
        info!(preference = %preference, resolved = %resolved, "theme preference changed");

        let event = ThemeChangeEvent {
            preference,
            resolved,
        };
        self.notify(&event);
        Ok(event)
    }

    /// Parses `raw` and sets it as the preference.
    ///
    /// # Errors
    ///
    /// Unknown values are logged and rejected with
    /// [`ThemeError::InvalidPreference`] before any state is touched.
    pub fn set_theme_named(&mut self, raw: &str) -> Result<ThemeChangeEvent, ThemeError> {
        let preference = raw.parse::<ThemePreference>().inspect_err(|_| {
            warn!(value = raw, "ignoring invalid theme preference");
        })?;
        self.set_theme(preference)
    }

    /// Advances the preference `Light -> Dark -> System -> Light`.
    pub fn toggle_theme(&mut self) -> Result<ThemeChangeEvent, ThemeError> {
        self.set_theme(self.current.next())
    }

    /// Reacts to a system appearance notification.
    ///
    /// Only has an effect while the preference is `System`. The document is
    /// re-marked without persisting; when the resolved theme actually changed,
    /// listeners and widgets are notified as for an explicit change.
    pub fn handle_appearance_change(&mut self) -> Option<ThemeChangeEvent> {
        self.observed_dark = self.appearance.prefers_dark();
        if self.current != ThemePreference::System {
            return None;
        }

        let resolved = ResolvedTheme::from_prefers_dark(self.observed_dark);
        let changed = self.applied != Some(resolved);
        self.apply(resolved);
        if !changed {
            return None;
        }

        debug!(resolved = %resolved, "system appearance changed");
        let event = ThemeChangeEvent {
            preference: self.current,
            resolved,
        };
        self.notify(&event);
        Some(event)
    }

    /// Checks the appearance signal and handles it if it moved since the last
    /// observation.
    pub fn poll_appearance(&mut self) -> Option<ThemeChangeEvent> {
        if self.appearance.prefers_dark() == self.observed_dark {
            return None;
        }
        self.handle_appearance_change()
    }

    /// Registers a change listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ThemeChangeEvent) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Mounts a widget and sends it the current resolved theme.
    pub fn mount_widget<W>(&mut self, host: W) -> WidgetId
    where
        W: WidgetHost + 'static,
    {
        let mut host: Box<dyn WidgetHost> = Box::new(host);
        host.set_theme(self.resolved());
        self.widgets.mount(host)
    }

    /// Unmounts a widget so it no longer receives theme updates.
    pub fn unmount_widget(&mut self, id: WidgetId) -> Option<Box<dyn WidgetHost>> {
        self.widgets.unmount(id)
    }

    /// The current preference.
    pub fn preference(&self) -> ThemePreference {
        self.current
    }

    /// The current preference resolved against the live appearance.
    pub fn resolved(&self) -> ResolvedTheme {
        self.resolve(self.current)
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn appearance(&self) -> &A {
        &self.appearance
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    fn apply(&mut self, resolved: ResolvedTheme) {
        apply_theme(&mut self.document, self.current, resolved);
        self.applied = Some(resolved);
    }

    fn notify(&mut self, event: &ThemeChangeEvent) {
        self.listeners.emit(event);
        self.widgets.broadcast(event.resolved);
    }
}

fn read_preference<S: PreferenceStore>(store: &S, key: &str) -> ThemePreference {
    match store.get(key) {
        None => ThemePreference::default(),
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            debug!(key, value = %raw, "unrecognized stored theme preference; using system");
            ThemePreference::default()
        }),
    }
}
