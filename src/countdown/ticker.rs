//! Per-instance countdown state machine

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::dom::RenderTarget;

use super::{
    elements::{CountdownElements, UnitNodes},
    remaining::{format_amount, inline_sentence, Remaining, UnitWords},
    CountdownParams, TargetInstant,
};

/// Lifecycle of a countdown; `Expired` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TickerPhase {
    Running,
    Expired,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub phase: TickerPhase,
    pub remaining: Remaining,
    /// Whether this tick changed the rendered nodes
    pub rendered: bool,
    /// Whether this tick moved the countdown to `Expired`
    pub ended: bool,
}

/// Recomputes the remaining time and writes it into the instance's nodes
#[derive(Debug)]
pub struct Ticker {
    params: Arc<CountdownParams>,
    target: TargetInstant,
    elements: CountdownElements,
    phase: TickerPhase,
    remaining: Remaining,
}

impl Ticker {
    pub fn new(params: Arc<CountdownParams>, target: TargetInstant, elements: CountdownElements) -> Self {
        Self {
            params,
            target,
            elements,
            phase: TickerPhase::Running,
            remaining: Remaining::ZERO,
        }
    }

    pub fn phase(&self) -> TickerPhase {
        self.phase
    }

    /// Remaining time as of the last tick
    pub fn remaining(&self) -> Remaining {
        self.remaining
    }

    pub fn elements(&self) -> &CountdownElements {
        &self.elements
    }

    pub fn params(&self) -> &CountdownParams {
        &self.params
    }

    /// Run one tick at `now` and fire `on_end` if it ended the countdown.
    pub fn tick<R: RenderTarget + ?Sized>(&mut self, now: DateTime<Utc>, target: &mut R) -> TickReport {
        let report = self.render_tick(now, target);
        self.complete(&report);
        report
    }

    /// Render one tick at `now` without running the completion callback.
    ///
    /// All of the instance's nodes are written through `target` in one go,
    /// so a caller holding a lock for the duration publishes the tick
    /// atomically. Ticks after expiry touch nothing.
    pub fn render_tick<R: RenderTarget + ?Sized>(&mut self, now: DateTime<Utc>, target: &mut R) -> TickReport {
        if self.phase == TickerPhase::Expired {
            return TickReport {
                phase: TickerPhase::Expired,
                remaining: Remaining::ZERO,
                rendered: false,
                ended: false,
            };
        }

        let (remaining, expired) = Remaining::until(self.target, now);
        debug!(
            "Tick at {}: target={:?}, {}d {}h {}m {}s left",
            now, self.target, remaining.days, remaining.hours, remaining.minutes, remaining.seconds
        );

        self.remaining = remaining;
        self.render(&remaining, target);

        if expired {
            self.phase = TickerPhase::Expired;
            info!("Countdown reached its target");
        }

        TickReport {
            phase: self.phase,
            remaining,
            rendered: true,
            ended: expired,
        }
    }

    /// Fire `on_end` for the tick that ended the countdown. Call it once the
    /// render target is released.
    pub fn complete(&self, report: &TickReport) {
        if report.ended {
            self.params.on_end.call();
        }
    }

    fn render<R: RenderTarget + ?Sized>(&self, remaining: &Remaining, target: &mut R) {
        let labels = UnitWords::select(remaining, &self.params.words);

        match &self.elements {
            CountdownElements::Inline(node) => {
                target.set_text(*node, &inline_sentence(remaining, &labels));
            }
            CountdownElements::Sections { days, hours, minutes, seconds } => {
                let zero_pad = self.params.zero_pad;
                let mut write = |nodes: &UnitNodes, amount: u64, word: &str| {
                    target.set_text(nodes.amount, &format_amount(amount, zero_pad));
                    target.set_text(nodes.word, word);
                };
                write(days, remaining.days, labels.days.as_str());
                write(hours, remaining.hours, labels.hours.as_str());
                write(minutes, remaining.minutes, labels.minutes.as_str());
                write(seconds, remaining.seconds, labels.seconds.as_str());
            }
        }
    }
}
