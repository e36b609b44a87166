//! Main application state management

use std::time::Instant;

use tokio::sync::watch;

use crate::{countdown::Countdown, dom::SharedDocument};

use super::WidgetStatus;

/// State shared by the HTTP handlers: the hosted page and the status
/// channels of every countdown rendered into it
#[derive(Debug)]
pub struct AppState {
    /// Page the countdowns render into
    pub document: SharedDocument,
    /// Selector the countdowns were started with
    pub selector: String,
    /// One receiver per countdown instance
    pub widgets: Vec<watch::Receiver<WidgetStatus>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    /// Create an AppState with no countdowns tracked yet
    pub fn new(document: SharedDocument, selector: String, port: u16, host: String) -> Self {
        Self {
            document,
            selector,
            widgets: Vec::new(),
            start_time: Instant::now(),
            port,
            host,
        }
    }

    /// Track the status of started countdowns
    pub fn with_countdowns(mut self, countdowns: &[Countdown]) -> Self {
        self.widgets.extend(countdowns.iter().map(Countdown::subscribe));
        self
    }

    /// Latest status of every tracked countdown
    pub fn widget_statuses(&self) -> Vec<WidgetStatus> {
        self.widgets.iter().map(|rx| rx.borrow().clone()).collect()
    }

    /// True once every tracked countdown has expired
    pub fn all_expired(&self) -> bool {
        self.widgets.iter().all(|rx| !rx.borrow().is_running())
    }

    /// Render the hosted page as a complete HTML document
    pub fn render_page(&self) -> String {
        let body = self.document.read(|doc| doc.to_html());
        format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>simply-countdown</title></head>{}</html>",
            body
        )
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn empty_state_renders_page_and_counts_as_expired() {
        let state = AppState::new(
            SharedDocument::new(Document::new()),
            ".simply-countdown".to_string(),
            8080,
            "127.0.0.1".to_string(),
        );

        assert!(state.widget_statuses().is_empty());
        assert!(state.all_expired());
        assert!(state.render_page().contains("<body></body>"));
        assert_eq!(state.get_uptime(), "0s");
    }
}
