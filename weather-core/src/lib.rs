//! Core library for the weather service.
//!
//! This crate defines:
//! - Weather records and unit systems
//! - Configuration & error taxonomy
//! - The `WeatherSource` abstraction and its OpenWeather client
//! - An in-memory, lock-guarded record store
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod store;

pub use config::{Config, LogLevel, Mode};
pub use error::{ConfigurationError, FetchError, FetchErrorKind};
pub use model::{Units, WeatherRecord, new_record_id};
pub use provider::{
    WeatherSource, api_key_from_env, openweather::OpenWeatherClient, upstream_from_config,
};
pub use store::WeatherRecordStore;
