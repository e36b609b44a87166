//! Target instant resolution

use chrono::{
    DateTime, FixedOffset, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeDelta, TimeZone, Utc,
};
use tracing::warn;

use super::CountdownParams;

/// Timezone the target's date fields are read in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HostTimezone {
    /// The process's local timezone
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl HostTimezone {
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Interpret wall-clock fields in this timezone
    fn localize(&self, fields: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::Local => localize_in(&chrono::Local, fields),
            Self::Fixed(offset) => localize_in(offset, fields),
        }
    }
}

fn localize_in<Tz: TimeZone>(tz: &Tz, fields: NaiveDateTime) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&fields) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        // Skipped by a DST transition: land just after the gap.
        LocalResult::None => {
            let shifted = fields.checked_add_signed(TimeDelta::hours(1))?;
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        }
    }
}

/// The moment a countdown runs down to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetInstant {
    Valid(DateTime<Utc>),
    /// Fields could not be turned into an instant; counts as already expired
    Invalid,
}

impl TargetInstant {
    /// Resolve the target from the parameters' date fields.
    ///
    /// With `enable_utc` set, the UTC field values of the local instant are
    /// read back as local fields. That relabels the fields, it does not apply
    /// the offset in the usual direction.
    pub fn resolve(params: &CountdownParams, tz: HostTimezone) -> Self {
        let instant = normalized_fields(params).and_then(|fields| tz.localize(fields));
        let instant = match instant {
            Some(local) if params.enable_utc => tz.localize(local.naive_utc()),
            other => other,
        };

        match instant {
            Some(instant) => Self::Valid(instant),
            None => {
                warn!(
                    "Countdown target {}-{}-{} {}:{}:{} is not a representable instant",
                    params.year, params.month, params.day, params.hours, params.minutes, params.seconds
                );
                Self::Invalid
            }
        }
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Valid(instant) => Some(*instant),
            Self::Invalid => None,
        }
    }
}

/// Build wall-clock fields, rolling out-of-range components into their
/// neighbours (month 13 is January of the next year, day 0 is the last day
/// of the previous month).
/// Any non-numeric field leaves nothing to build.
fn normalized_fields(params: &CountdownParams) -> Option<NaiveDateTime> {
    let year = i32::try_from(params.year.value()?).ok()?;
    let january = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let date = shift_months(january, params.month.value()?.checked_sub(1)?)?;
    let date = date.checked_add_signed(TimeDelta::try_days(params.day.value()?.checked_sub(1)?)?)?;

    date.and_time(NaiveTime::MIN)
        .checked_add_signed(TimeDelta::try_hours(params.hours.value()?)?)?
        .checked_add_signed(TimeDelta::try_minutes(params.minutes.value()?)?)?
        .checked_add_signed(TimeDelta::try_seconds(params.seconds.value()?)?)
}

fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}
