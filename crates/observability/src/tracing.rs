//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Output format of the fmt subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    /// Parse a format name; unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "pretty" | "text" => Some(LogFormat::Pretty),
            _ => None,
        }
    }
}

/// Subscriber configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directives, e.g. `info,haya_accounting=debug`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl ObservabilityConfig {
    pub const FORMAT_ENV: &'static str = "HAYA_LOG_FORMAT";

    /// Read `RUST_LOG` and `HAYA_LOG_FORMAT`, keeping defaults for anything
    /// unset or unrecognised.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let filter = lookup(EnvFilter::DEFAULT_ENV)
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(defaults.filter);
        let format = lookup(Self::FORMAT_ENV)
            .and_then(|f| LogFormat::parse(&f))
            .unwrap_or(defaults.format);

        Self { filter, format }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). An invalid
/// filter falls back to `info`.
pub fn init_with(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime);

    let _ = match config.format {
        LogFormat::Json => builder.json().with_target(false).try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_formats() {
        assert_eq!(LogFormat::parse("JSON"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" pretty "), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("text"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("xml"), None);
    }

    #[test]
    fn lookup_keeps_defaults_for_blank_or_unknown_values() {
        let config = ObservabilityConfig::from_lookup(|key| match key {
            "RUST_LOG" => Some("  ".to_string()),
            ObservabilityConfig::FORMAT_ENV => Some("xml".to_string()),
            _ => None,
        });
        assert_eq!(config, ObservabilityConfig::default());

        let config = ObservabilityConfig::from_lookup(|key| match key {
            "RUST_LOG" => Some("haya_accounting=debug".to_string()),
            ObservabilityConfig::FORMAT_ENV => Some("pretty".to_string()),
            _ => None,
        });
        assert_eq!(config.filter, "haya_accounting=debug");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn builders_override_defaults() {
        let config = ObservabilityConfig::default()
            .with_filter("debug")
            .with_format(LogFormat::Pretty);
        assert_eq!(config.filter, "debug");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn repeated_init_is_a_no_op() {
        let config = ObservabilityConfig::default().with_filter("not a = valid [filter");
        init_with(&config);
        init_with(&ObservabilityConfig::default());
    }
}
