//! Application state shared across handlers

use std::sync::Arc;

use weather_core::{
    Config, ConfigurationError, Mode, Units, WeatherRecordStore, WeatherSource,
    upstream_from_config,
};

/// Where `/weather` requests are answered from.
#[derive(Debug, Clone)]
pub enum Backend {
    Proxy(Arc<dyn WeatherSource>),
    Store(Arc<WeatherRecordStore>),
}

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub backend: Backend,
    /// Applied when a request carries no `units` parameter.
    pub default_units: Units,
}

impl AppState {
    pub fn proxy(source: Arc<dyn WeatherSource>, default_units: Units) -> Self {
        Self {
            backend: Backend::Proxy(source),
            default_units,
        }
    }

    pub fn store(store: Arc<WeatherRecordStore>) -> Self {
        Self {
            backend: Backend::Store(store),
            default_units: Units::default(),
        }
    }

    /// Build the backend the config asks for. In proxy mode this reads the
    /// upstream API key, so a missing key fails here, before the listener opens.
    pub fn from_config(config: &Config) -> Result<Self, ConfigurationError> {
        let state = match config.mode {
            Mode::Proxy => Self::proxy(Arc::new(upstream_from_config(config)?), config.units),
            Mode::Store => Self {
                default_units: config.units,
                ..Self::store(Arc::new(WeatherRecordStore::new()))
            },
        };
        Ok(state)
    }

    pub fn mode(&self) -> Mode {
        match self.backend {
            Backend::Proxy(_) => Mode::Proxy,
            Backend::Store(_) => Mode::Store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_mode_needs_no_api_key() {
        let cfg = Config {
            mode: Mode::Store,
            api_key_env: "WEATHER_SERVER_TEST_SURELY_UNSET_KEY".into(),
            units: Units::Metric,
            ..Config::default()
        };

        let state = AppState::from_config(&cfg).expect("store mode must build");
        assert_eq!(state.mode(), Mode::Store);
        assert_eq!(state.default_units, Units::Metric);
    }

    #[test]
    fn proxy_mode_fails_without_api_key() {
        let cfg = Config {
            mode: Mode::Proxy,
            api_key_env: "WEATHER_SERVER_TEST_SURELY_UNSET_KEY".into(),
            ..Config::default()
        };

        let err = AppState::from_config(&cfg).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingApiKeyEnv("WEATHER_SERVER_TEST_SURELY_UNSET_KEY".into())
        );
    }
}
