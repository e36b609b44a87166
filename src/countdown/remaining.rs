//! Remaining-time decomposition and unit labels

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{TargetInstant, Words};

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Time left split into whole units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Remaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Remaining {
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Split a whole number of seconds into days, hours, minutes and seconds
    pub fn from_seconds(total: u64) -> Self {
        Self {
            days: total / SECONDS_PER_DAY,
            hours: (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }

    /// Time left until `target` as seen at `now`, and whether the target has
    /// been reached. Reached means no positive time is left, even a fraction
    /// of a second keeps the countdown running.
    pub fn until(target: TargetInstant, now: DateTime<Utc>) -> (Self, bool) {
        let Some(target) = target.instant() else {
            return (Self::ZERO, true);
        };

        let millis_left = target.signed_duration_since(now).num_milliseconds();
        if millis_left > 0 {
            // Positive, so integer division is the floor.
            (Self::from_seconds((millis_left / 1000) as u64), false)
        } else {
            (Self::ZERO, true)
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }
}

/// Label for a unit: plural only when the amount is greater than 1, so both
/// 0 and 1 use the bare word.
pub fn unit_word(amount: u64, word: &str, plural_letter: &str) -> String {
    if amount > 1 {
        format!("{}{}", word, plural_letter)
    } else {
        word.to_string()
    }
}

/// Numeric text for an amount, with one leading zero below 10 when padding
pub fn format_amount(amount: u64, zero_pad: bool) -> String {
    if zero_pad && amount < 10 {
        format!("0{}", amount)
    } else {
        amount.to_string()
    }
}

/// Labels for the four units in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitWords {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl UnitWords {
    pub fn select(remaining: &Remaining, words: &Words) -> Self {
        let suffix = &words.plural_letter;
        Self {
            days: unit_word(remaining.days, &words.days, suffix),
            hours: unit_word(remaining.hours, &words.hours, suffix),
            minutes: unit_word(remaining.minutes, &words.minutes, suffix),
            seconds: unit_word(remaining.seconds, &words.seconds, suffix),
        }
    }
}

/// The single sentence shown in inline mode
pub fn inline_sentence(remaining: &Remaining, labels: &UnitWords) -> String {
    format!(
        "{} {}, {} {}, {} {}, {} {}.",
        remaining.days,
        labels.days,
        remaining.hours,
        labels.hours,
        remaining.minutes,
        labels.minutes,
        remaining.seconds,
        labels.seconds
    )
}
