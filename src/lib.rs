//! # sitetheme
//!
//! Light/dark theme handling for a static site.
//!
//! A visitor's stored preference (`light`, `dark` or `system`) is resolved
//! against the system appearance, written to the document root as class and
//! attribute markers, persisted, announced to listeners, and forwarded to an
//! embedded giscus comment thread so it matches the page.
//!
//! ## Quick Start
//!
//! ```rust
//! use sitetheme::{ManualAppearance, MemoryStore, RootElement, ThemeController, ThemePreference};
//!
//! let mut controller = ThemeController::new(
//!     MemoryStore::new(),
//!     ManualAppearance::new(false),
//!     RootElement::new(),
//! );
//! controller.initialize();
//! controller.subscribe(|event| println!("theme is now {}", event.resolved));
//!
//! controller.toggle_theme().unwrap(); // system -> light
//! assert_eq!(controller.preference(), ThemePreference::Light);
//! ```
//!
//! ## Collaborators
//!
//! The controller talks to the outside world through small traits:
//!
//! - [`PreferenceStore`]: [`MemoryStore`] or [`JsonFileStore`]
//! - [`AppearanceSignal`]: [`SystemAppearance`] (reads the OS) or [`ManualAppearance`]
//! - [`DocumentSurface`]: [`RootElement`]
//! - [`WidgetHost`]: [`GiscusWidget`]
//!
//! ## Site helpers
//!
//! - [`chip_color`]: the tag chip color table
//! - [`value_or`]: metadata lookup with a fallback
//! - [`render_embed`]: giscus loader markup

pub mod config;
pub mod document;
mod error;
mod metadata;
pub mod store;
mod tags;
pub mod theme;
pub mod widget;

pub use config::{ConfigError, SiteConfig};
pub use document::{DocumentSurface, RootElement};
pub use error::ThemeError;
pub use metadata::value_or;
pub use store::{JsonFileStore, MemoryStore, PreferenceStore, StoreError};
pub use tags::{chip_color, known_tags, ChipColor};
pub use theme::{
    AppearanceSignal, ManualAppearance, ResolvedTheme, SubscriptionId, SystemAppearance,
    ThemeChangeEvent, ThemeController, ThemePreference, DEFAULT_STORAGE_KEY,
};
pub use widget::{
    control_message, render_embed, GiscusOptions, GiscusWidget, MessageChannel, WidgetError,
    WidgetHost, WidgetId, WriterChannel,
};
