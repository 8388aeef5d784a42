//! Tracing subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name attached to every exported span.
const SERVICE_NAME: &str = "chatterm";

/// Name of the trace file inside the plugin data directory.
const TRACE_FILE_NAME: &str = "chatterm-otlp.json";

/// Installs the global subscriber: an [`EnvFilter`] built from
/// `config.trace_level` (default `info`) feeding an OpenTelemetry layer that
/// exports to `<data dir>/chatterm-otlp.json`.
///
/// Tracing stays disabled when the data directory cannot be created, and a
/// second call is a no-op.
///
/// # Parameters
///
/// * `config` - Plugin configuration; only `trace_level` is read, as an
///   [`EnvFilter`] directive such as `debug` or `chatterm::app=trace`
///
/// # Example
///
/// ```rust,no_run
/// use chatterm::{observability, Config};
///
/// let config = Config {
///     trace_level: Some("chatterm=debug".to_string()),
///     ..Config::default()
/// };
/// observability::init_tracing(&config);
/// tracing::info!("plugin loaded");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}
