//! Observability for catalog and configuration I/O
//!
//! Structured, synchronous JSON logs with typed events.
//!
//! ```ignore
//! use tupledesc::observability::{Event, LogSink};
//!
//! LogSink::stdio().event(Event::DescriptorSaved, &[("table", "users")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{LogSink, Logger, Severity};

impl Event {
    /// Severity an event is logged at by default
    pub fn severity(&self) -> Severity {
        match self {
            Event::CatalogLoadFailed => Severity::Error,
            Event::MalformedDescriptorSkipped => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl LogSink {
    /// Log a lifecycle event at its default severity
    pub fn event(&self, event: Event, fields: &[(&str, &str)]) {
        self.log(event.severity(), event.as_str(), fields);
    }
}

/// Log a lifecycle event with fields to stdout/stderr
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
