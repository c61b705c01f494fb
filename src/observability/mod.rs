//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → SDK tracer provider → OtlpFileExporter → JSON lines
//! ```
//!
//! - Traces land in `<data_dir>/bookshelf-otlp.json`, one OTLP document per line
//! - The file rotates at 10 MB, keeping three numbered backups
//! - The level comes from `RUST_LOG`, then `trace_level`, then `info`
//!
//! Nothing is printed to the terminal: stdout belongs to the renderer.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::RotatingFile;
pub use init::init_tracing;
