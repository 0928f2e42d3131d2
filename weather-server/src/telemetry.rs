//! Logging setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use weather_core::LogLevel;

/// Filter directives for a verbosity; `RUST_LOG` overrides them.
pub fn default_directives(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Verbose => "weather=debug,weather_server=debug,weather_core=debug,tower_http=debug",
        LogLevel::Quiet => "warn",
    }
}

/// Install the fmt subscriber. Call once, from the binary.
pub fn init(level: LogLevel) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives(level).into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_only_warns() {
        assert_eq!(default_directives(LogLevel::Quiet), "warn");
    }

    #[test]
    fn verbose_directives_parse() {
        let filter = EnvFilter::try_new(default_directives(LogLevel::Verbose));
        assert!(filter.is_ok());
    }
}
