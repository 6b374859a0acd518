//! Tracing setup for the binary plus a capturing subscriber for tests.
//!
//! Diagnostics always go to stderr so command output on stdout stays
//! machine-readable. The filter comes from `CHROMATIC_LOG` (falling back to
//! `RUST_LOG`) and defaults to `warn`.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::Level;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

pub const DEFAULT_FILTER: &str = "warn";

/// Builds the filter from `CHROMATIC_LOG`, then `RUST_LOG`, then [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("CHROMATIC_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global stderr subscriber. Returns `false` when one is
/// already installed.
pub fn init_logging() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

/// Structured log entry captured by [`TestLogSubscriber`].
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

/// Subscriber layer that records events so tests can assert on them.
#[derive(Debug, Clone, Default)]
pub struct TestLogSubscriber {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<S> Layer<S> for TestLogSubscriber
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let entry = LogEntry {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        };

        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let value_str = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value_str);
        } else {
            self.fields.push((field.name().to_string(), value_str));
        }
    }
}
