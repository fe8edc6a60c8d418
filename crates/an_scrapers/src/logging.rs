use std::collections::VecDeque;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Prefixes log lines with the component that emitted them, e.g. `[arxiv]`.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefixes: VecDeque<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            prefixes: VecDeque::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push_back(prefix.into());
        self
    }

    fn prefix(&self) -> String {
        self.prefixes.iter().map(|p| format!("{} ", p)).collect()
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}{}", self.prefix(), message);
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}{}", self.prefix(), message);
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}{}", self.prefix(), message);
    }
}

/// Installs the process-wide subscriber once. `RUST_LOG` overrides `default_directive`.
pub fn init_logging(default_directive: &str) -> Logger {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive));
            if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
                eprintln!("Failed to install log subscriber: {}", e);
            }
        });
    }
    Logger::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_accumulate() {
        let logger = Logger::new().with_prefix("[arxiv]").with_prefix("[fetch]");
        assert_eq!(logger.prefix(), "[arxiv] [fetch] ");
        assert_eq!(Logger::new().prefix(), "");
    }

    #[test]
    fn test_init_logging_is_repeatable() {
        init_logging("info");
        init_logging("debug");
        assert!(tracing::dispatcher::has_been_set());
    }
}
