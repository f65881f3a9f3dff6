//! Shared test utilities and fixtures for Logweave integration tests.

pub use logweave_core::{LogFormat, LogLevel, Logger, LoggerConfig};

/// In-memory sink for asserting on emitted lines
pub mod sinks {
    use logweave_core::LogSink;
    use parking_lot::Mutex;
    use serde_json::Value;
    use std::sync::Arc;

    /// A sink that captures every written line for later inspection.
    #[derive(Clone, Default)]
    pub struct CaptureSink {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl CaptureSink {
        pub fn new() -> Self {
            Self::default()
        }

        /// All captured lines, in write order.
        pub fn lines(&self) -> Vec<String> {
            self.lines.lock().clone()
        }

        /// Captured lines parsed as JSON records.
        pub fn records(&self) -> Vec<Value> {
            self.lines()
                .iter()
                .map(|line| {
                    serde_json::from_str(line).expect("captured line is not valid JSON")
                })
                .collect()
        }

        pub fn is_empty(&self) -> bool {
            self.lines.lock().is_empty()
        }
    }

    impl LogSink for CaptureSink {
        fn write_line(&self, line: &str) {
            self.lines.lock().push(line.to_string());
        }
    }
}

/// Engine fixtures
pub mod fixtures {
    use super::sinks::CaptureSink;
    use logweave_core::{LogFormat, LogLevel, Logger, LoggerConfig};

    /// JSON-mode config with an `info` threshold and no redaction.
    pub fn json_config() -> LoggerConfig {
        LoggerConfig::new()
            .with_service("test")
            .with_environment("test")
            .with_min_level(LogLevel::Info)
            .with_format(LogFormat::Json)
            .with_redaction(vec![])
    }

    /// An engine over a capture sink, plus the sink for assertions.
    pub fn capture_logger(config: LoggerConfig) -> (Logger, CaptureSink) {
        let sink = CaptureSink::new();
        let logger = Logger::with_sink(config, Box::new(sink.clone()));
        (logger, sink)
    }
}
