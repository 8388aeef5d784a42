//! File-backed OpenTelemetry span exporter and tracer provider.
//!
//! Zellij plugins run as WASI modules without network access, so spans are
//! exported synchronously to a local file instead of an OTLP endpoint.

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes every exported batch as one OTLP/JSON line.
struct FileSpanExporter {
    /// Rotating trace file.
    writer: FileWriter,
    formatter: SpanFormatter,
    /// Set by `shutdown`; later exports are refused.
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    /// Creates an exporter appending to `file_path`.
    ///
    /// # Parameters
    ///
    /// * `file_path` - Trace file, created on first export
    /// * `resource` - Resource attributes repeated in every batch
    const fn new(file_path: PathBuf, resource: Resource) -> Self {
        Self {
            writer: FileWriter::new(file_path),
            formatter: SpanFormatter::new(resource),
            is_shutdown: AtomicBool::new(false),
        }
    }

    /// Formats `batch` and appends it to the trace file.
    ///
    /// # Returns
    ///
    /// - `Ok(())` once the line is flushed
    /// - `Err(TraceError)` after shutdown or when the file cannot be written
    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Err(TraceError::from("exporter is shut down"));
        }

        let line = self.formatter.format_batch(batch).to_string();
        self.writer
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    /// Writes the batch synchronously; the returned future is already resolved.
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("is_shutdown", &self.is_shutdown)
            .finish_non_exhaustive()
    }
}

/// Builds a provider whose spans are written to `file_path` as they end.
///
/// Spans go through the simple span processor, one export per finished span.
///
/// # Parameters
///
/// * `file_path` - Destination trace file
/// * `resource` - Service name and version attached to every span
///
/// # Returns
///
/// A provider ready to hand tracers to `tracing-opentelemetry`.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
