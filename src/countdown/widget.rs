//! Countdown entry point

use std::sync::Arc;

use tokio::{runtime::Handle, sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    clock::{Clock, SystemClock},
    dom::{NodeId, SharedDocument},
    error::CountdownError,
    state::WidgetStatus,
    tasks::countdown_timer_task,
};

use super::{CountdownElements, CountdownParams, HostTimezone, Options, TargetInstant, Ticker, TickerPhase};

/// Handle to one running (or already finished) countdown instance
#[derive(Debug)]
pub struct Countdown {
    container: NodeId,
    status: watch::Receiver<WidgetStatus>,
    task: Option<JoinHandle<()>>,
}

impl Countdown {
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Latest published status
    pub fn status(&self) -> WidgetStatus {
        self.status.borrow().clone()
    }

    /// Receiver that is notified after every tick
    pub fn subscribe(&self) -> watch::Receiver<WidgetStatus> {
        self.status.clone()
    }

    /// Wait until the countdown has expired and stopped refreshing
    pub async fn finished(self) {
        if let Some(task) = self.task {
            if let Err(e) = task.await {
                warn!("Countdown task for {:?} ended abnormally: {}", self.container, e);
            }
        }
    }
}

/// Environment countdowns run in: the document to render into, the clock
/// ticks read, and the timezone target dates are read in.
#[derive(Clone)]
pub struct Host {
    document: SharedDocument,
    clock: Arc<dyn Clock>,
    timezone: HostTimezone,
}

impl Host {
    /// Host backed by the wall clock and the local timezone
    pub fn new(document: SharedDocument) -> Self {
        Self {
            document,
            clock: Arc::new(SystemClock),
            timezone: HostTimezone::Local,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_timezone(mut self, timezone: HostTimezone) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    /// Selection of the elements matching `selector`
    pub fn select(&self, selector: &str) -> Selection<'_> {
        Selection {
            host: self,
            selector: selector.to_string(),
        }
    }

    /// Start a countdown in every element currently matching `selector`.
    ///
    /// Each match gets its own nodes and its own refresh task; all of them
    /// count down to the same target. The first tick runs before this
    /// returns, so a target already in the past fires `on_end` here and
    /// spawns nothing. No match is not an error.
    pub fn simply_countdown(
        &self,
        selector: &str,
        options: impl Into<Options>,
    ) -> Result<Vec<Countdown>, CountdownError> {
        let runtime = Handle::try_current().map_err(|_| CountdownError::NoRuntime)?;
        let params = Arc::new(options.into().resolve()?);
        let target = TargetInstant::resolve(&params, self.timezone);

        let built = {
            let mut doc = self.document.lock();
            let containers = doc.query_selector_all(selector)?;
            containers
                .into_iter()
                .map(|container| (container, CountdownElements::build(&params, container, &mut *doc)))
                .collect::<Vec<_>>()
        };

        if built.is_empty() {
            debug!("Selector '{}' matched no elements", selector);
        } else {
            info!(
                "Starting {} countdown(s) on '{}' towards {:?}",
                built.len(),
                selector,
                target.instant()
            );
        }

        Ok(built
            .into_iter()
            .map(|(container, elements)| self.start(&runtime, &params, target, container, elements))
            .collect())
    }

    fn start(
        &self,
        runtime: &Handle,
        params: &Arc<CountdownParams>,
        target: TargetInstant,
        container: NodeId,
        elements: CountdownElements,
    ) -> Countdown {
        let document = self.document.clone();
        let mut ticker = Ticker::new(Arc::clone(params), target, elements);

        let mut status = WidgetStatus::new(container, target.instant());
        let report = ticker.render_tick(self.clock.now(), &mut *document.lock());
        ticker.complete(&report);
        status.record(&report);

        let (status_tx, status_rx) = watch::channel(status);
        let task = (report.phase == TickerPhase::Running).then(|| {
            runtime.spawn(countdown_timer_task(
                ticker,
                document,
                Arc::clone(&self.clock),
                status_tx,
            ))
        });

        Countdown {
            container,
            status: status_rx,
            task,
        }
    }
}

/// Elements selected by a selector string, used by [`CountdownExt`]
#[derive(Clone)]
pub struct Selection<'a> {
    host: &'a Host,
    selector: String,
}

impl Selection<'_> {
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Elements currently matching the selection
    pub fn nodes(&self) -> Result<Vec<NodeId>, CountdownError> {
        self.host.document.lock().query_selector_all(&self.selector)
    }
}

/// Adds `simply_countdown` to element selections
pub trait CountdownExt {
    fn simply_countdown(&self, options: impl Into<Options>) -> Result<Vec<Countdown>, CountdownError>;
}

impl CountdownExt for Selection<'_> {
    fn simply_countdown(&self, options: impl Into<Options>) -> Result<Vec<Countdown>, CountdownError> {
        self.host.simply_countdown(&self.selector, options)
    }
}

/// Start countdowns in `document` using the wall clock and local timezone
pub fn simply_countdown(
    document: &SharedDocument,
    selector: &str,
    options: impl Into<Options>,
) -> Result<Vec<Countdown>, CountdownError> {
    Host::new(document.clone()).simply_countdown(selector, options)
}
