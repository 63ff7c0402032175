//! Status line shown to the user.

use std::sync::Arc;

use maybe_sync::{MaybeSend, MaybeSync};
use parking_lot::Mutex;

/// Destination of short human-readable status messages.
pub trait StatusReporter: MaybeSend + MaybeSync {
    /// Replaces the currently shown status with `message`.
    fn report(&self, message: &str);
}

/// Writes status messages into the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogStatusReporter;

impl StatusReporter for LogStatusReporter {
    fn report(&self, message: &str) {
        log::info!("Status: {message}");
    }
}

/// Status line kept in memory. Clones share the same line.
#[derive(Debug, Default, Clone)]
pub struct StatusLine(Arc<Mutex<Option<String>>>);

impl StatusLine {
    /// Last reported message.
    pub fn current(&self) -> Option<String> {
        self.0.lock().clone()
    }
}

impl StatusReporter for StatusLine {
    fn report(&self, message: &str) {
        log::debug!("Status: {message}");
        *self.0.lock() = Some(message.to_string());
    }
}

/// Writes status messages into the text of a DOM element.
#[cfg(target_arch = "wasm32")]
pub struct DomStatusReporter {
    element_id: String,
}

#[cfg(target_arch = "wasm32")]
impl DomStatusReporter {
    /// Id of the status element in the page template.
    pub const DEFAULT_ELEMENT_ID: &'static str = "statusText";

    /// Creates a reporter writing into the element with the given id.
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for DomStatusReporter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ELEMENT_ID)
    }
}

#[cfg(target_arch = "wasm32")]
impl StatusReporter for DomStatusReporter {
    fn report(&self, message: &str) {
        let element = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(&self.element_id));

        match element {
            Some(element) => element.set_text_content(Some(message)),
            None => log::warn!("Status element '{}' not found", self.element_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_keeps_last_message() {
        let line = StatusLine::default();
        assert_eq!(line.current(), None);

        let shared = line.clone();
        shared.report("Location found");
        shared.report("Route calculated");

        assert_eq!(line.current().as_deref(), Some("Route calculated"));
    }
}
