// ABOUTME: Logging configuration and structured logging setup for the Mealwise CLI and library
// ABOUTME: Configures log levels, output formats and noise reduction for HTTP client crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration
//!
//! Log output goes to stderr so command output on stdout stays pipeable.

use crate::constants::service_names;
use anyhow::{anyhow, Result};
use serde_json::json;
use std::env;
use std::io;
use tracing::{info, warn};
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Emit span open/close events (useful with `#[instrument]` on model calls)
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for machine consumption
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for interactive CLI use
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value; unknown values fall back to compact
    #[must_use]
    pub fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: LogFormat::Compact,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::MEALWISE.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: env::var("RUST_LOG").unwrap_or(defaults.level),
            format: env::var("LOG_FORMAT")
                .map_or(defaults.format, |value| LogFormat::from_env_value(&value)),
            include_location: env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: env::var("LOG_INCLUDE_THREAD").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: defaults.service_name,
            service_version: defaults.service_version,
        }
    }

    /// Raise the level to `debug` (CLI `--verbose`)
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.level = "debug".into();
        }
        self
    }

    /// Directive pinning this crate to the configured level
    ///
    /// Only produced for a bare level; a directive list such as
    /// `mealwise=trace,warn` already says what it wants for this crate.
    fn crate_directive(&self) -> Option<String> {
        let level = self.level.trim().to_ascii_lowercase();
        level
            .parse::<LevelFilter>()
            .ok()
            .map(|_| format!("{}={level}", service_names::MEALWISE))
    }

    /// Build the filter: configured level plus noise reduction for HTTP internals
    fn env_filter(&self) -> EnvFilter {
        let directive = |raw: &str, fallback: tracing::Level| {
            raw.parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::Directive::from(fallback))
        };

        let mut filter = EnvFilter::new(&self.level)
            .add_directive(directive("hyper=warn", tracing::Level::WARN))
            .add_directive(directive("hyper_util=warn", tracing::Level::WARN))
            .add_directive(directive("reqwest=warn", tracing::Level::WARN))
            .add_directive(directive("rustls=warn", tracing::Level::WARN));
        if let Some(crate_level) = self.crate_directive() {
            filter = filter.add_directive(directive(&crate_level, tracing::Level::INFO));
        }
        filter
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let installed = match self.format {
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_thread_ids(self.include_thread)
                        .with_target(true)
                        .with_writer(io::stderr)
                        .with_span_events(span_events)
                        .json(),
                )
                .try_init(),
            LogFormat::Pretty => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_thread_ids(self.include_thread)
                        .with_target(true)
                        .with_writer(io::stderr)
                        .with_span_events(span_events),
                )
                .try_init(),
            LogFormat::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(io::stderr)
                        .with_span_events(span_events),
                )
                .try_init(),
        };
        installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        let summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "spans": self.include_spans,
            }
        });
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            "Logging initialized: {}", summary
        );
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Domain-specific structured log events
pub struct AppLogger;

impl AppLogger {
    /// Log a completed generative model call
    pub fn log_model_call(operation: &str, model: &str, duration_ms: u128, success: bool) {
        if success {
            info!(
                llm.operation = %operation,
                llm.model = %model,
                llm.duration_ms = %duration_ms,
                "Model call completed"
            );
        } else {
            warn!(
                llm.operation = %operation,
                llm.model = %model,
                llm.duration_ms = %duration_ms,
                "Model call failed"
            );
        }
    }

    /// Log the outcome of a nutrition database lookup
    pub fn log_lookup(query: &str, matched: Option<&str>, score: Option<u8>) {
        info!(
            lookup.query = %query,
            lookup.matched = matched.unwrap_or("none"),
            lookup.score = score.map_or(-1, i16::from),
            "Nutrition lookup"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_env_value("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_env_value("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::from_env_value("anything"), LogFormat::Compact);
    }

    #[test]
    fn test_crate_directive_only_for_bare_levels() {
        let bare = LoggingConfig {
            level: "debug".into(),
            ..LoggingConfig::default()
        };
        assert_eq!(bare.crate_directive().as_deref(), Some("mealwise=debug"));

        for level in ["mealwise=debug", "warn,mealwise=trace", "reqwest=info"] {
            let listed = LoggingConfig {
                level: level.into(),
                ..LoggingConfig::default()
            };
            assert_eq!(listed.crate_directive(), None, "{level}");
        }
    }

    #[test]
    fn test_verbose_raises_level() {
        let config = LoggingConfig::default().verbose(true);
        assert_eq!(config.level, "debug");
        let quiet = LoggingConfig::default().verbose(false);
        assert_eq!(quiet.level, "warn");
    }
}
