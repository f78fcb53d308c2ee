//! Favorite locations persisted to a key-value store

use chrono::{DateTime, Utc};

use super::storage::{KeyValueStore, StorageError};
use crate::models::{FavoriteLocation, NewFavorite};
use crate::types::location_key;

/// Storage key holding the JSON array of favorites
pub const FAVORITES_STORAGE_KEY: &str = "weather-app-favorites";

/// Favorites collection.
///
/// Hydrated from the store on construction, so nothing can be written back
/// before the stored data has been read. Every mutation re-serializes the
/// whole collection.
#[derive(Debug)]
pub struct Favorites<S: KeyValueStore> {
    store: S,
    entries: Vec<FavoriteLocation>,
}

impl<S: KeyValueStore> Favorites<S> {
    /// Load favorites from the store. Missing or unreadable data yields an
    /// empty collection.
    pub fn load(store: S) -> Self {
        let entries = match read_entries(&store) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to load favorites: {}", e);
                Vec::new()
            }
        };
        tracing::debug!("Loaded {} favorites", entries.len());

        Self { store, entries }
    }

    pub fn list(&self) -> &[FavoriteLocation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FavoriteLocation> {
        self.entries.iter().find(|f| f.id == id)
    }

    /// Save a location. Returns `false` when it is already a favorite.
    pub fn add(&mut self, candidate: NewFavorite) -> bool {
        self.add_at(candidate, Utc::now())
    }

    /// Save a location with an explicit creation time
    pub fn add_at(&mut self, candidate: NewFavorite, added_at: DateTime<Utc>) -> bool {
        let favorite = FavoriteLocation::new(candidate, added_at);
        if self.get(&favorite.id).is_some() {
            return false;
        }

        self.entries.push(favorite);
        self.persist();
        true
    }

    /// Remove by identity key. Returns whether an entry was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|f| f.id != id);
        self.persist();
        self.entries.len() != before
    }

    pub fn is_favorite(&self, lat: f64, lon: f64) -> bool {
        self.get(&location_key(lat, lon)).is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serialize the full collection. Failures are logged; memory stays authoritative.
    fn persist(&mut self) {
        if let Err(e) = write_entries(&mut self.store, &self.entries) {
            tracing::error!("Failed to save favorites: {}", e);
        }
    }
}

fn read_entries<S: KeyValueStore>(store: &S) -> Result<Vec<FavoriteLocation>, StorageError> {
    match store.get(FAVORITES_STORAGE_KEY)? {
        Some(raw) if !raw.is_empty() => Ok(serde_json::from_str(&raw)?),
        _ => Ok(Vec::new()),
    }
}

fn write_entries<S: KeyValueStore>(
    store: &mut S,
    entries: &[FavoriteLocation],
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(entries)?;
    store.set(FAVORITES_STORAGE_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::MemoryStore;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn candidate(name: &str, lat: f64, lon: f64) -> NewFavorite {
        NewFavorite {
            name: name.to_string(),
            region: "Region".to_string(),
            country: "Country".to_string(),
            lat,
            lon,
        }
    }

    /// Store whose writes always fail
    #[derive(Default)]
    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut favorites = Favorites::load(MemoryStore::new());
        assert!(favorites.add(candidate("Paris", 48.87, 2.33)));
        assert!(!favorites.add(candidate("Paris again", 48.87, 2.33)));
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites.list()[0].name, "Paris");
    }

    #[test]
    fn test_membership_tracks_mutations() {
        let mut favorites = Favorites::load(MemoryStore::new());
        assert!(!favorites.is_favorite(48.87, 2.33));

        favorites.add(candidate("Paris", 48.87, 2.33));
        assert!(favorites.is_favorite(48.87, 2.33));
        assert!(!favorites.is_favorite(48.8700001, 2.33));

        assert!(favorites.remove("48.87-2.33"));
        assert!(!favorites.is_favorite(48.87, 2.33));
        assert!(!favorites.remove("48.87-2.33"));
    }

    #[test]
    fn test_every_mutation_persists_full_collection() {
        let mut favorites = Favorites::load(MemoryStore::new());
        favorites.add(candidate("Paris", 48.87, 2.33));
        favorites.add(candidate("Rome", 41.9, 12.48));

        let stored: Vec<FavoriteLocation> =
            serde_json::from_str(favorites.store().raw(FAVORITES_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(stored.len(), 2);

        favorites.remove("48.87-2.33");
        let stored: Vec<FavoriteLocation> =
            serde_json::from_str(favorites.store().raw(FAVORITES_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, "Rome");
    }

    #[test]
    fn test_reload_round_trip() {
        let added_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let mut favorites = Favorites::load(MemoryStore::new());
        favorites.add_at(candidate("Paris", 48.87, 2.33), added_at);
        favorites.add_at(candidate("Lima", -12.05, -77.05), added_at);

        let reloaded = Favorites::load(favorites.store().clone());
        assert_eq!(reloaded.list(), favorites.list());
    }

    #[test]
    fn test_stored_format_uses_added_at() {
        let added_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let mut favorites = Favorites::load(MemoryStore::new());
        favorites.add_at(candidate("Paris", 48.87, 2.33), added_at);

        let raw = favorites.store().raw(FAVORITES_STORAGE_KEY).unwrap();
        let json: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(json[0]["id"], "48.87-2.33");
        assert_eq!(json[0]["addedAt"], "2024-05-01T12:30:00Z");
    }

    #[test]
    fn test_corrupt_storage_loads_empty_without_overwriting() {
        let store = MemoryStore::new().with_entry(FAVORITES_STORAGE_KEY, "{not json");
        let favorites = Favorites::load(store);
        assert!(favorites.is_empty());
        assert_eq!(favorites.store().raw(FAVORITES_STORAGE_KEY), Some("{not json"));
    }

    #[test]
    fn test_loads_existing_entries_before_first_write() {
        let seeded = r#"[{"id": "41.9-12.48", "name": "Rome", "region": "Lazio", "country": "Italy",
                          "lat": 41.9, "lon": 12.48, "addedAt": "2024-01-01T00:00:00Z"}]"#;
        let mut favorites =
            Favorites::load(MemoryStore::new().with_entry(FAVORITES_STORAGE_KEY, seeded));
        assert!(favorites.is_favorite(41.9, 12.48));

        favorites.add(candidate("Paris", 48.87, 2.33));
        let stored: Vec<FavoriteLocation> =
            serde_json::from_str(favorites.store().raw(FAVORITES_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut favorites = Favorites::load(ReadOnlyStore::default());
        assert!(favorites.add(candidate("Paris", 48.87, 2.33)));
        assert!(favorites.is_favorite(48.87, 2.33));
    }

    proptest! {
        #[test]
        fn prop_no_duplicate_ids(
            coords in proptest::collection::vec((-90i32..=90, -180i32..=180), 0..20)
        ) {
            let mut favorites = Favorites::load(MemoryStore::new());
            for (lat, lon) in &coords {
                favorites.add(candidate("Place", f64::from(*lat), f64::from(*lon)));
            }
            let mut ids: Vec<_> = favorites.list().iter().map(|f| f.id.clone()).collect();
            let total = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), total);
        }
    }
}
