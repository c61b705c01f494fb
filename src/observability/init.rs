//! Tracing subscriber setup.

use super::tracer;
use crate::infrastructure::TRACE_FILE;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "bookshelf";

/// Installs the global subscriber exporting spans to `<data_dir>/bookshelf-otlp.json`.
///
/// The filter comes from `RUST_LOG` when set, else from `config.trace_level`,
/// else `info`. If the data directory cannot be created, export is disabled
/// and nothing is installed. Calling this more than once has no further
/// effect.
///
/// Returns the trace file path when export was installed by this call.
///
/// # Example
///
/// ```rust,no_run
/// use bookshelf::observability::init_tracing;
/// use bookshelf::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return None;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let trace_file = data_dir.join(TRACE_FILE);
    let provider = tracer::create_tracer_provider(trace_file.clone(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .ok()
        .map(|()| trace_file)
}
