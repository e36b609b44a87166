//! Countdown parameters, defaults, and option merging

use std::{fmt, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::CountdownError;

use super::DateField;

/// Completion callback fired once when a countdown expires
#[derive(Clone)]
pub struct OnEnd(Arc<dyn Fn() + Send + Sync>);

impl OnEnd {
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl Default for OnEnd {
    fn default() -> Self {
        Self::new(|| {})
    }
}

impl fmt::Debug for OnEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OnEnd(..)")
    }
}

/// Display words for each unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Words {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    /// Appended to a word when its amount is greater than 1
    pub plural_letter: String,
}

impl Default for Words {
    fn default() -> Self {
        Self {
            days: "day".to_string(),
            hours: "hour".to_string(),
            minutes: "minute".to_string(),
            seconds: "second".to_string(),
            plural_letter: "s".to_string(),
        }
    }
}

/// Effective configuration of a countdown widget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountdownParams {
    pub year: DateField,
    /// 1 = January. Out-of-range values roll over like calendar arithmetic.
    pub month: DateField,
    pub day: DateField,
    pub hours: DateField,
    pub minutes: DateField,
    pub seconds: DateField,
    pub words: Words,
    /// Accepted for compatibility. Pluralization is driven only by
    /// `words.plural_letter`, this flag is not consulted.
    pub plural: bool,
    pub inline: bool,
    pub enable_utc: bool,
    /// Refresh period in milliseconds
    pub refresh: u64,
    pub inline_class: String,
    pub section_class: String,
    pub amount_class: String,
    pub word_class: String,
    pub zero_pad: bool,
    #[serde(skip)]
    pub on_end: OnEnd,
    /// Keys this crate does not know about, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CountdownParams {
    fn default() -> Self {
        Self {
            year: DateField::from(2024),
            month: DateField::from(10),
            day: DateField::from(30),
            hours: DateField::from(3),
            minutes: DateField::from(30),
            seconds: DateField::from(0),
            words: Words::default(),
            plural: true,
            inline: false,
            enable_utc: true,
            refresh: 1000,
            inline_class: "simply-countdown-inline".to_string(),
            section_class: "simply-section".to_string(),
            amount_class: "simply-amount".to_string(),
            word_class: "simply-word".to_string(),
            zero_pad: false,
            on_end: OnEnd::default(),
            extra: Map::new(),
        }
    }
}

impl CountdownParams {
    /// Period between ticks. A zero refresh cannot be scheduled and is
    /// raised to one millisecond.
    pub fn refresh_period(&self) -> Duration {
        if self.refresh == 0 {
            warn!("Refresh period of 0ms requested, using 1ms");
            Duration::from_millis(1)
        } else {
            Duration::from_millis(self.refresh)
        }
    }
}

/// Merge `overrides` into `base`.
///
/// Objects merge key by key, recursively. Any other override value replaces
/// the base value outright; arrays are not merged. A `null` override leaves
/// the base untouched.
pub fn extend(base: &mut Value, overrides: &Value) {
    let Value::Object(overrides) = overrides else {
        if !overrides.is_null() {
            *base = overrides.clone();
        }
        return;
    };

    let Value::Object(base) = base else {
        *base = Value::Object(overrides.clone());
        return;
    };

    for (key, value) in overrides {
        if value.is_null() {
            continue;
        }
        match base.get_mut(key) {
            Some(existing) if existing.is_object() && value.is_object() => extend(existing, value),
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

/// User supplied overrides for a countdown
#[derive(Debug, Clone, Default)]
pub struct Options {
    values: Value,
    on_end: Option<OnEnd>,
}

impl Options {
    pub fn new(values: Value) -> Self {
        Self {
            values,
            on_end: None,
        }
    }

    /// Set the completion callback
    pub fn on_end(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_end = Some(OnEnd::new(f));
        self
    }

    /// Merge a further layer of overrides on top of the current ones
    pub fn merge(mut self, more: &Value) -> Self {
        extend(&mut self.values, more);
        self
    }

    pub fn values(&self) -> &Value {
        &self.values
    }

    /// Merge these overrides onto the defaults
    pub fn resolve(&self) -> Result<CountdownParams, CountdownError> {
        let mut merged = serde_json::to_value(CountdownParams::default())?;
        extend(&mut merged, &self.values);

        let mut params: CountdownParams = serde_json::from_value(merged)?;
        if !params.extra.is_empty() {
            debug!(
                "Carrying unrecognized countdown options: {:?}",
                params.extra.keys().collect::<Vec<_>>()
            );
        }
        if let Some(on_end) = &self.on_end {
            params.on_end = on_end.clone();
        }
        Ok(params)
    }
}

impl From<Value> for Options {
    fn from(values: Value) -> Self {
        Self::new(values)
    }
}
