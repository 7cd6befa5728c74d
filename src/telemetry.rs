//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured level. Logs go to
//! stderr; stdout carries the JSON views of `replay` and `serve`.

use tracing::Subscriber;
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::LoggingConfig;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,

    #[error("Unknown log format: {0} (expected pretty or json)")]
    UnknownFormat(String),
}

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(TelemetryError::UnknownFormat(other.to_string())),
        }
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn fmt_layer<S, W>(format: LogFormat, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_writer(writer).boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .boxed(),
    }
}

/// Install the global subscriber
pub fn init(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let format: LogFormat = config.format.parse()?;
    let registry = tracing_subscriber::registry().with(env_filter(&config.level));

    registry
        .with(fmt_layer(format, std::io::stderr))
        .try_init()
        .map_err(|_| TelemetryError::AlreadyInitialized)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        level = %config.level,
        ?format,
        "medibook telemetry initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_logs_go_to_the_given_writer() {
        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("info"))
            .with(fmt_layer(LogFormat::Json, move || sink.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(modal = "logout-modal", "Modal opened");
        });

        let text = captured.text();
        let line: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(line["fields"]["message"], "Modal opened");
        assert_eq!(line["fields"]["modal"], "logout-modal");
    }

    #[test]
    fn test_pretty_layer_uses_the_given_writer() {
        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = tracing_subscriber::registry()
            .with(fmt_layer(LogFormat::Pretty, move || sink.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("Unknown appointment row");
        });
        assert!(captured.text().contains("Unknown appointment row"));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!(" JSON ".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!(matches!(
            "xml".parse::<LogFormat>(),
            Err(TelemetryError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_second_init_fails() {
        let config = LoggingConfig::default();
        // Another test binary thread may have installed one first
        let _ = init(&config);
        assert!(matches!(
            init(&config),
            Err(TelemetryError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_unknown_format_rejected_before_install() {
        let config = LoggingConfig {
            level: "debug".into(),
            format: "xml".into(),
        };
        assert!(matches!(init(&config), Err(TelemetryError::UnknownFormat(_))));
    }
}
