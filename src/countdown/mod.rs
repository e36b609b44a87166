//! Countdown widget module
//!
//! Option merging, target resolution, remaining-time decomposition, the
//! element builder, the ticker state machine, and the public entry point.

pub mod date_field;
pub mod elements;
pub mod params;
pub mod remaining;
pub mod target;
pub mod ticker;
pub mod widget;

pub use date_field::DateField;
pub use elements::{CountdownElements, UnitNodes};
pub use params::{extend, CountdownParams, OnEnd, Options, Words};
pub use remaining::{format_amount, inline_sentence, unit_word, Remaining, UnitWords};
pub use target::{HostTimezone, TargetInstant};
pub use ticker::{TickReport, Ticker, TickerPhase};
pub use widget::{simply_countdown, Countdown, CountdownExt, Host, Selection};
