//! Leniently typed date components

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One component of the target date (year, month, day, hours, minutes or
/// seconds).
///
/// Any JSON value is accepted. Numbers and numeric strings are truncated
/// toward zero, booleans count as 0 or 1 and an empty string as 0. Anything
/// else is kept as an invalid component, which makes the target itself
/// invalid rather than failing option resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct DateField(Option<i64>);

impl DateField {
    pub const INVALID: Self = Self(None);

    /// Coerced integer value, `None` when the input was not numeric
    pub fn value(&self) -> Option<i64> {
        self.0
    }
}

/// Truncate toward zero; non-finite or out of range values have no integer.
fn truncate(f: f64) -> Option<i64> {
    // 2^63 is exactly representable, i64::MAX is not.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let t = f.trunc();
    (t.is_finite() && t > -LIMIT && t < LIMIT).then_some(t as i64)
}

fn coerce(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Some(0);
            }
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl From<Value> for DateField {
    fn from(value: Value) -> Self {
        Self(coerce(&value))
    }
}

impl From<DateField> for Value {
    fn from(field: DateField) -> Self {
        field.0.map_or(Value::Null, Value::from)
    }
}

impl From<i64> for DateField {
    fn from(value: i64) -> Self {
        Self(Some(value))
    }
}

impl From<i32> for DateField {
    fn from(value: i32) -> Self {
        Self(Some(value.into()))
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => f.write_str("<invalid>"),
        }
    }
}
