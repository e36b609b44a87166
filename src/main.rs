//! Simply Countdown - A countdown widget rendered into a document
//!
//! This is the main entry point: it builds a page with countdown containers,
//! starts the countdowns and serves the page over HTTP.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use simply_countdown::{
    api::create_router,
    clock::MonotonicClock,
    config::Config,
    countdown::{Host, Options},
    dom::{Document, SharedDocument},
    state::AppState,
    utils::shutdown_signal,
};

/// Page with `count` empty countdown containers
fn build_page(count: usize) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    for i in 0..count {
        let container = doc.create_element("div");
        doc.set_id(container, &format!("countdown-{}", i + 1));
        doc.add_class(container, "simply-countdown");
        doc.append_child(root, container);
    }
    doc
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("simply_countdown={},tower_http=info", config.log_level()))
        .init();

    info!("Starting simply-countdown v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, selector='{}', containers={}",
          config.host, config.port, config.selector, config.containers);

    let options = config
        .option_layers()?
        .iter()
        .fold(Options::default(), |options, layer| options.merge(layer))
        .on_end(|| info!("Countdown reached its target date"));

    let document = SharedDocument::new(build_page(config.containers));
    let mut host = Host::new(document.clone());
    if config.monotonic {
        host = host.with_clock(MonotonicClock::starting_now());
    }

    let countdowns = host.simply_countdown(&config.selector, options)?;
    if countdowns.is_empty() {
        warn!("Selector '{}' matched no containers, nothing will count down", config.selector);
    }

    let state = Arc::new(
        AppState::new(document, config.selector.clone(), config.port, config.host.clone())
            .with_countdowns(&countdowns),
    );

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /        - Page with the rendered countdowns");
    info!("  GET  /status  - Countdown status as JSON");
    info!("  GET  /health  - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
