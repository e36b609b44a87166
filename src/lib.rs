//! Simply Countdown - A countdown widget rendered into a document
//!
//! This library counts down to a fixed date, writing days, hours, minutes
//! and seconds into every element matching a selector until the date is
//! reached, then fires a completion callback. The binary hosts a page with
//! countdown containers and serves it over HTTP.

pub mod api;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod dom;
pub mod error;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use clock::{Clock, ManualClock, MonotonicClock, SystemClock};
pub use config::Config;
pub use countdown::{simply_countdown, Countdown, CountdownExt, CountdownParams, Host, HostTimezone, Options};
pub use dom::{Document, NodeId, RenderTarget, SharedDocument};
pub use error::CountdownError;
pub use state::{AppState, WidgetStatus};
pub use utils::signals::shutdown_signal;
