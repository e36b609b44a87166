//! State management module
//!
//! Shared state of the hosting server and the per-widget status snapshots.

pub mod app_state;
pub mod widget_status;

// Re-export main types
pub use app_state::AppState;
pub use widget_status::WidgetStatus;
