//! System appearance signal.
//!
//! The controller never asks the operating system directly; it reads an
//! [`AppearanceSignal`]. [`SystemAppearance`] reads the OS setting through
//! `dark-light`, and [`ManualAppearance`] is a shared switch that tests and
//! embedders flip by hand.

use std::cell::Cell;
use std::rc::Rc;

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};

/// A live "prefers dark" reading.
pub trait AppearanceSignal {
    /// Returns `true` when the system currently prefers a dark appearance.
    fn prefers_dark(&self) -> bool;
}

impl<F: Fn() -> bool> AppearanceSignal for F {
    fn prefers_dark(&self) -> bool {
        self()
    }
}

/// Reads the operating system's color mode on every call.
///
/// Platforms that cannot report a mode read as light.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAppearance;

impl AppearanceSignal for SystemAppearance {
    fn prefers_dark(&self) -> bool {
        matches!(detect_os_theme(), OsThemeMode::Dark)
    }
}

/// An appearance value set by hand.
///
/// Clones share the same underlying value, so one handle can stay with the
/// caller while another is owned by the controller.
///
/// # Example
///
/// ```rust
/// use sitetheme::{AppearanceSignal, ManualAppearance};
///
/// let signal = ManualAppearance::new(false);
/// let handle = signal.clone();
/// handle.set_prefers_dark(true);
/// assert!(signal.prefers_dark());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualAppearance {
    dark: Rc<Cell<bool>>,
}

impl ManualAppearance {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            dark: Rc::new(Cell::new(prefers_dark)),
        }
    }

    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.dark.set(prefers_dark);
    }
}

impl AppearanceSignal for ManualAppearance {
    fn prefers_dark(&self) -> bool {
        self.dark.get()
    }
}
