//! Background tasks module
//!
//! One refresh task runs per live countdown widget.

pub mod countdown_timer;

pub use countdown_timer::countdown_timer_task;
