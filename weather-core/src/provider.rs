use crate::{
    Config, ConfigurationError, FetchError, Units, WeatherRecord,
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod openweather;

/// Anything that can resolve a city into a weather record.
///
/// The HTTP service only depends on this trait, so tests swap in fakes
/// instead of talking to the real provider.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &str, units: Units) -> Result<WeatherRecord, FetchError>;
}

/// Read the upstream API key from the environment variable named `var`.
pub fn api_key_from_env(var: &str) -> Result<String, ConfigurationError> {
    match std::env::var(var) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigurationError::MissingApiKeyEnv(var.to_string())),
    }
}

/// Construct the upstream client from config, pulling the API key from the
/// environment variable the config names.
pub fn upstream_from_config(config: &Config) -> Result<OpenWeatherClient, ConfigurationError> {
    let api_key = api_key_from_env(&config.api_key_env)?;

    Ok(OpenWeatherClient::new(api_key, config.units)?
        .with_base_url(config.upstream_base_url.clone())
        .with_timeout(Duration::from_secs(config.upstream_timeout_secs)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_from_env_errors_when_unset() {
        let err = api_key_from_env("WEATHER_CORE_TEST_SURELY_UNSET_KEY").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingApiKeyEnv("WEATHER_CORE_TEST_SURELY_UNSET_KEY".into())
        );
    }

    #[test]
    fn upstream_from_config_errors_when_key_missing() {
        let cfg = Config {
            api_key_env: "WEATHER_CORE_TEST_SURELY_UNSET_KEY".into(),
            ..Config::default()
        };

        let err = upstream_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("WEATHER_CORE_TEST_SURELY_UNSET_KEY value not set"));
    }

    #[test]
    fn upstream_from_config_applies_settings() {
        // PATH is set in every environment the tests run in.
        let cfg = Config {
            api_key_env: "PATH".into(),
            units: Units::Metric,
            upstream_base_url: "http://localhost:1234".into(),
            upstream_timeout_secs: 3,
            ..Config::default()
        };

        let client = upstream_from_config(&cfg).expect("client must build");
        assert_eq!(client.units(), Units::Metric);
        assert_eq!(client.timeout(), Duration::from_secs(3));
        assert!(
            client
                .request_url("Kaneohe", Units::Metric)
                .expect("valid url")
                .as_str()
                .starts_with("http://localhost:1234/data/2.5/weather?q=Kaneohe&units=metric")
        );
    }
}
