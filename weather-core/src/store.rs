//! In-memory weather record store.
//!
//! A single lock serializes every call, reads included. Records are handed
//! out as clones; callers never see the map or the lock.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use tracing::debug;

use crate::model::WeatherRecord;

#[derive(Debug, Default)]
pub struct WeatherRecordStore {
    records: Mutex<BTreeMap<String, WeatherRecord>>,
}

impl WeatherRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `records`. Later ids win on collision.
    pub fn with_records(records: impl IntoIterator<Item = WeatherRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.put(record);
        }
        store
    }

    /// Insert or replace the record keyed by `record.id`.
    ///
    /// An empty id is a valid key; assigning ids is the caller's job.
    pub fn put(&self, record: WeatherRecord) {
        let mut records = self.records.lock();
        let replaced = records.insert(record.id.clone(), record).is_some();
        debug!(replaced, size = records.len(), "stored weather record");
    }

    /// Every stored record. Ordering is by id but callers must not depend on it.
    pub fn get_all(&self) -> Vec<WeatherRecord> {
        self.records.lock().values().cloned().collect()
    }

    /// Records whose city equals `city`, ignoring case. Empty when nothing matches.
    pub fn get_by_city(&self, city: &str) -> Vec<WeatherRecord> {
        self.records
            .lock()
            .values()
            .filter(|record| record.matches_city(city))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Units;
    use std::{sync::Arc, thread};

    fn record(id: &str, city: &str, temperature: f64) -> WeatherRecord {
        WeatherRecord {
            id: id.into(),
            condition: "Cloudy".into(),
            description: "Partly cloudy".into(),
            temperature,
            city: city.into(),
            units: Units::Imperial,
        }
    }

    #[test]
    fn put_then_get_all_returns_record() {
        let store = WeatherRecordStore::new();
        let kaneohe = record("id1", "Kaneohe", 74.6);

        store.put(kaneohe.clone());

        assert_eq!(store.get_all(), vec![kaneohe]);
    }

    #[test]
    fn put_with_same_id_replaces() {
        let store = WeatherRecordStore::new();
        store.put(record("id1", "Kaneohe", 74.6));
        store.put(record("id1", "Kaneohe", 80.1));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_all()[0].temperature, 80.1);
    }

    #[test]
    fn empty_id_is_accepted() {
        let store = WeatherRecordStore::new();
        store.put(record("", "Hilo", 70.0));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_all()[0].id, "");
    }

    #[test]
    fn get_by_city_ignores_case() {
        let store = WeatherRecordStore::with_records([
            record("id1", "Kaneohe", 74.6),
            record("id2", "Seattle", 64.6),
            record("id3", "kaneohe", 71.0),
        ]);

        let upper = store.get_by_city("Kaneohe");
        let lower = store.get_by_city("kaneohe");

        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 2);
        assert!(upper.iter().all(|r| r.id != "id2"));
    }

    #[test]
    fn get_by_city_without_match_is_empty() {
        let store = WeatherRecordStore::with_records([record("id1", "Kaneohe", 74.6)]);
        assert!(store.get_by_city("zzz").is_empty());
    }

    #[test]
    fn concurrent_puts_are_all_kept() {
        let store = Arc::new(WeatherRecordStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.put(record(&format!("id{i}"), "Seattle", 60.0)))
            })
            .collect();

        for handle in handles {
            handle.join().expect("writer thread panicked");
        }

        assert_eq!(store.len(), 8);
        assert_eq!(store.get_by_city("seattle").len(), 8);
    }
}
