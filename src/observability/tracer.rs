//! Tracer provider exporting finished spans to a rotating OTLP JSON file.

use super::file_writer::RotatingFile;
use super::span_formatter::OtlpJsonEncoder;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// `SpanExporter` that appends one OTLP document per batch to a file.
struct OtlpFileExporter {
    file: RotatingFile,
    encoder: OtlpJsonEncoder,
    stopped: AtomicBool,
}

impl SpanExporter for OtlpFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.stopped.load(Ordering::SeqCst) {
            Err(TraceError::from("trace file exporter stopped"))
        } else {
            let line = self.encoder.encode_batch(&batch).to_string();
            self.file
                .write_line(&line)
                .map_err(|e| TraceError::from(format!("writing {}: {e}", self.file.path().display())))
        };

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.encoder = OtlpJsonEncoder::new(resource.clone());
    }
}

impl std::fmt::Debug for OtlpFileExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtlpFileExporter")
            .field("file", &self.file)
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}

/// Builds a provider whose spans are written to `file_path` as they end.
///
/// Uses the simple (unbatched) span processor, so every finished span hits the
/// file immediately and nothing is lost when the process exits abruptly.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = OtlpFileExporter {
        file: RotatingFile::new(file_path),
        encoder: OtlpJsonEncoder::new(resource.clone()),
        stopped: AtomicBool::new(false),
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
