//! Observable status of one countdown widget

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    countdown::{Remaining, TickReport, TickerPhase},
    dom::NodeId,
};

/// Snapshot published after every tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetStatus {
    /// Container the widget renders into
    pub container: NodeId,
    pub phase: TickerPhase,
    pub remaining: Remaining,
    /// None when the configured date could not be resolved
    pub target: Option<DateTime<Utc>>,
    pub ticks: u64,
}

impl WidgetStatus {
    /// Status of a widget that has not ticked yet
    pub fn new(container: NodeId, target: Option<DateTime<Utc>>) -> Self {
        Self {
            container,
            phase: TickerPhase::Running,
            remaining: Remaining::ZERO,
            target,
            ticks: 0,
        }
    }

    /// Fold a tick result into the snapshot. Ticks that rendered nothing are
    /// not counted.
    pub fn record(&mut self, report: &TickReport) {
        self.phase = report.phase;
        self.remaining = report.remaining;
        if report.rendered {
            self.ticks += 1;
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == TickerPhase::Running
    }

    /// Seconds left while running
    pub fn remaining_seconds(&self) -> Option<u64> {
        self.is_running().then(|| self.remaining.total_seconds())
    }
}
