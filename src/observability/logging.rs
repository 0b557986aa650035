//! Structured logging.
//!
//! `RUST_LOG` selects what is logged (default
//! `postal_gateway=info,tower_http=info`); `LOG_FORMAT` selects human-readable
//! or JSON lines.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "postal_gateway=info,tower_http=info";

/// Install the global subscriber.
///
/// Later calls are ignored, which keeps tests that share a process quiet.
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (json_layer, pretty_layer) = if json {
        (Some(fmt::layer().json().with_current_span(true)), None)
    } else {
        (None, Some(fmt::layer().with_target(true)))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init();
}
