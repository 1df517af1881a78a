//! Embedded comment widgets that follow the page theme.
//!
//! - [`WidgetHost`]: the capability the controller forwards resolved themes to
//! - [`GiscusWidget`]: giscus host with embed markup and `setConfig` messages
//! - [`MessageChannel`]: delivery of control messages to a widget frame
//! - [`WidgetError`]: markup and delivery failures

mod channel;
mod error;
mod giscus;

pub use channel::{MessageChannel, WriterChannel};
pub use error::WidgetError;
pub use giscus::{
    control_message, render_embed, GiscusOptions, GiscusWidget, InputPosition, Mapping,
    CONTAINER_ID,
};

use crate::theme::ResolvedTheme;

/// Receives resolved themes from the controller.
///
/// Forwarding is best-effort. Implementations handle their own failures;
/// nothing they do may reach the controller's caller.
pub trait WidgetHost {
    fn set_theme(&mut self, theme: ResolvedTheme);
}

/// Handle returned when a widget is mounted on a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(u64);

/// The widgets currently mounted on the page.
#[derive(Default)]
pub(crate) struct MountedWidgets {
    next_id: u64,
    hosts: Vec<(WidgetId, Box<dyn WidgetHost>)>,
}

impl MountedWidgets {
    pub(crate) fn mount(&mut self, host: Box<dyn WidgetHost>) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        self.hosts.push((id, host));
        id
    }

    pub(crate) fn unmount(&mut self, id: WidgetId) -> Option<Box<dyn WidgetHost>> {
        let index = self.hosts.iter().position(|(entry, _)| *entry == id)?;
        Some(self.hosts.remove(index).1)
    }

    pub(crate) fn broadcast(&mut self, theme: ResolvedTheme) {
        for (_, host) in self.hosts.iter_mut() {
            host.set_theme(theme);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.hosts.len()
    }
}

impl std::fmt::Debug for MountedWidgets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountedWidgets")
            .field("count", &self.hosts.len())
            .finish()
    }
}
