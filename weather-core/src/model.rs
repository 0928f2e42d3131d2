use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::ConfigurationError;

/// Temperature scale convention requested from the upstream provider.
///
/// Only determines how `temperature` is interpreted; values are never
/// converted server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    #[default]
    Imperial,
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    /// Temperature suffix for human-readable output.
    pub fn symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => " K",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial, Units::Standard]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            _ => Err(ConfigurationError::InvalidUnits(value.to_string())),
        }
    }
}

/// One normalized weather observation for a city.
///
/// The wire shape keeps the short field names clients already post:
/// `{"id":"id1","main":"Cloudy","description":"Partly cloudy","temp":74.6,"city":"Kaneohe"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "main")]
    pub condition: String,
    pub description: String,
    #[serde(rename = "temp")]
    pub temperature: f64,
    pub city: String,
    #[serde(default)]
    pub units: Units,
}

impl WeatherRecord {
    /// Case-insensitive comparison against a city name.
    pub fn matches_city(&self, city: &str) -> bool {
        self.city.to_lowercase() == city.to_lowercase()
    }
}

/// Server-generated record id for inserts that arrive without one.
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_parse_roundtrip() {
        for units in Units::all() {
            let parsed: Units = units.as_str().parse().expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn units_parse_is_case_sensitive() {
        for value in ["METRIC", "Metric", "Imperial", " standard"] {
            assert_eq!(
                value.parse::<Units>(),
                Err(ConfigurationError::InvalidUnits(value.into()))
            );
        }
    }

    #[test]
    fn symbols_follow_unit_system() {
        assert_eq!(Units::Metric.symbol(), "°C");
        assert_eq!(Units::Imperial.symbol(), "°F");
        assert_eq!(Units::Standard.symbol(), " K");
    }

    #[test]
    fn unknown_units_error() {
        let err = "kelvin".parse::<Units>().unwrap_err();
        assert_eq!(err, ConfigurationError::InvalidUnits("kelvin".into()));
    }

    #[test]
    fn record_uses_wire_field_names() {
        let json = r#"{"id":"id3","main":"Sunny","description":"Clear","temp":74.6,"city":"Kyoto"}"#;
        let record: WeatherRecord = serde_json::from_str(json).expect("valid record");

        assert_eq!(record.condition, "Sunny");
        assert_eq!(record.temperature, 74.6);
        assert_eq!(record.units, Units::Imperial);

        let value = serde_json::to_value(&record).expect("serializable");
        assert_eq!(value["main"], "Sunny");
        assert_eq!(value["temp"], 74.6);
        assert_eq!(value["units"], "imperial");
    }

    #[test]
    fn missing_id_defaults_to_empty() {
        let json = r#"{"main":"Rain","description":"Showers","temp":60.0,"city":"Hilo"}"#;
        let record: WeatherRecord = serde_json::from_str(json).expect("valid record");
        assert!(record.id.is_empty());
    }

    #[test]
    fn city_match_is_case_insensitive() {
        let record = WeatherRecord {
            id: "id1".into(),
            condition: "Cloudy".into(),
            description: "Partly cloudy".into(),
            temperature: 74.6,
            city: "Kaneohe".into(),
            units: Units::Imperial,
        };

        assert!(record.matches_city("kaneohe"));
        assert!(record.matches_city("KANEOHE"));
        assert!(!record.matches_city("Kailua"));
    }

    #[test]
    fn generated_ids_are_unique() {
        let mut ids: Vec<String> = (0..10).map(|_| new_record_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }
}
