//! OpenTelemetry tracing exported to a local file.
//!
//! `tracing` spans and events from the whole crate flow through an
//! `OpenTelemetryLayer` into a [`SpanExporter`](opentelemetry_sdk::export::trace::SpanExporter)
//! that appends OTLP/JSON lines to `<data dir>/chatterm-otlp.json`:
//!
//! ```text
//! tracing spans ─▶ EnvFilter ─▶ OpenTelemetryLayer ─▶ FileSpanExporter
//!                                                          │
//!                                      SpanFormatter (OTLP JSON) ─▶ FileWriter
//!                                                                   (10 MiB, 3 backups)
//! ```
//!
//! Request builders in [`crate::service`] read the active span's ids so the
//! chat-service bridge can join the same trace.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
