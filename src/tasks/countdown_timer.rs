//! Periodic countdown refresh task

use std::sync::Arc;

use tokio::{
    sync::watch,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{
    clock::Clock,
    countdown::{Ticker, TickerPhase},
    dom::SharedDocument,
    state::WidgetStatus,
};

/// Background task that re-runs `ticker` every refresh period until it
/// expires.
///
/// The caller runs the first tick itself, so the first scheduled tick lands
/// one period after the task starts. Each tick renders under one document
/// lock, which is dropped before `on_end` runs. A late tick delays the following ones
/// instead of bursting to catch up.
pub async fn countdown_timer_task(
    mut ticker: Ticker,
    document: SharedDocument,
    clock: Arc<dyn Clock>,
    status_tx: watch::Sender<WidgetStatus>,
) {
    let period = ticker.params().refresh_period();
    let container = status_tx.borrow().container;
    debug!("Starting countdown task for {:?} every {:?}", container, period);

    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let report = ticker.render_tick(clock.now(), &mut *document.lock());
        ticker.complete(&report);
        status_tx.send_modify(|status| status.record(&report));

        if report.phase == TickerPhase::Expired {
            info!("Countdown for {:?} expired, stopping refresh", container);
            break;
        }
    }
}
