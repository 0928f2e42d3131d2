use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    error::{ConfigurationError, FetchError},
    model::{Units, WeatherRecord},
};

use super::WeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Upper bound for a single upstream call, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// OpenWeather "current weather" client.
///
/// Every call is a fresh request: no retries, no caching.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    units: Units,
    base_url: String,
    timeout: Duration,
    http: Client,
}

impl OpenWeatherClient {
    /// Validate `units` and build a client. Fails on an empty key or an
    /// unknown unit system.
    pub fn configure(api_key: impl Into<String>, units: &str) -> Result<Self, ConfigurationError> {
        let units = units.parse::<Units>()?;
        Self::new(api_key, units)
    }

    pub fn new(api_key: impl Into<String>, units: Units) -> Result<Self, ConfigurationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigurationError::EmptyApiKey);
        }

        let http = Client::builder()
            .build()
            .map_err(|e| ConfigurationError::HttpClient(e.to_string()))?;

        Ok(Self {
            api_key,
            units,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Upstream URL for `city`. Contains the API key, so never log it.
    pub fn request_url(&self, city: &str, units: Units) -> Result<Url, FetchError> {
        let endpoint = format!("{}/data/2.5/weather", self.base_url);

        Url::parse_with_params(
            &endpoint,
            &[("q", city), ("units", units.as_str()), ("appid", self.api_key.as_str())],
        )
        .map_err(|e| FetchError::Transport(format!("invalid upstream URL '{endpoint}': {e}")))
    }

    /// Fetch using the configured unit system.
    pub async fn fetch(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        self.fetch_weather(city, self.units).await
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    #[instrument(skip(self), fields(units = %units))]
    async fn fetch_weather(&self, city: &str, units: Units) -> Result<WeatherRecord, FetchError> {
        let url = self.request_url(city, units)?;

        let res = self.http.get(url).timeout(self.timeout).send().await.map_err(|e| {
            let err = FetchError::from(e);
            warn!(error = %err, "OpenWeather request failed");
            err
        })?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "OpenWeather returned an error status");
            return Err(FetchError::UpstreamStatus { code: status.as_u16() });
        }

        let record = parse_response(&body, units)?;
        debug!(city = %record.city, condition = %record.condition, "OpenWeather lookup succeeded");

        Ok(record)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

/// Map the upstream "current weather" body into a record. `units` comes from
/// the request, not from the body.
fn parse_response(body: &str, units: Units) -> Result<WeatherRecord, FetchError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

    let first = parsed
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::MalformedResponse("weather list is empty".to_string()))?;

    Ok(WeatherRecord {
        id: String::new(),
        condition: first.main,
        description: first.description,
        temperature: parsed.main.temp,
        city: parsed.name,
        units,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
