//! Theme resolution and persistence.
//!
//! This module provides:
//!
//! - [`ThemePreference`] / [`ResolvedTheme`]: the stored intent and the
//!   concrete theme it resolves to
//! - [`ThemeController`]: applies, persists and announces theme changes
//! - [`ThemeChangeEvent`]: what listeners receive
//! - [`AppearanceSignal`]: the system light/dark reading, with
//!   [`SystemAppearance`] and [`ManualAppearance`] implementations

mod appearance;
mod controller;
mod event;
mod preference;

pub use appearance::{AppearanceSignal, ManualAppearance, SystemAppearance};
pub use controller::{ThemeController, DEFAULT_STORAGE_KEY};
pub use event::{SubscriptionId, ThemeChangeEvent};
pub use preference::{ResolvedTheme, ThemePreference};
