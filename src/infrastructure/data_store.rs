//! Loading, migrating and saving the blog aggregate

use crate::domain::settings::DEFAULT_FONT_SIZE;
use crate::domain::{AppData, AppSettings, CustomLabels};
use crate::error::Result;
use crate::infrastructure::store::KeyValueStore;
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Key the aggregate is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "rosetint_blog_data_v3";

/// Suffix of the key an unreadable record is copied to
pub const CORRUPT_SUFFIX: &str = ".corrupt";

/// Where a loaded aggregate came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Parsed from the stored record
    Stored,
    /// Nothing was stored; the initial dataset was written
    Initialized,
    /// The stored record was unreadable; the initial dataset was returned
    /// and the record left as it was. `backup` names the key holding a
    /// copy of the unreadable text, if the copy could be written.
    Recovered {
        reason: String,
        backup: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub data: AppData,
    pub origin: LoadOrigin,
}

/// Persists the whole aggregate as one JSON record under a fixed key
pub struct DataStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> DataStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        DataStore {
            store,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the aggregate, seeding the initial dataset on first run.
    ///
    /// A corrupt record is not an error: it is logged and the initial
    /// dataset is returned without overwriting the record.
    pub fn load(&self) -> Result<Loaded> {
        let Some(raw) = self.store.get(&self.key)? else {
            let data = AppData::initial(Utc::now().timestamp_millis());
            self.save(&data)?;
            info!(key = %self.key, "no stored data, wrote initial dataset");
            return Ok(Loaded {
                data,
                origin: LoadOrigin::Initialized,
            });
        };

        match parse_record(&raw) {
            Ok(data) => {
                debug!(
                    key = %self.key,
                    posts = data.posts.len(),
                    images = data.images.len(),
                    "loaded stored data"
                );
                Ok(Loaded {
                    data,
                    origin: LoadOrigin::Stored,
                })
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored data is corrupt, using initial dataset");
                Ok(Loaded {
                    data: AppData::initial(Utc::now().timestamp_millis()),
                    origin: LoadOrigin::Recovered {
                        reason: e.to_string(),
                        backup: self.back_up(&raw),
                    },
                })
            }
        }
    }

    /// Copy an unreadable record aside so the next save cannot lose it
    fn back_up(&self, raw: &str) -> Option<String> {
        let backup_key = format!("{}{}", self.key, CORRUPT_SUFFIX);
        match self.store.set(&backup_key, raw) {
            Ok(()) => {
                info!(key = %backup_key, "copied unreadable record");
                Some(backup_key)
            }
            Err(e) => {
                warn!(key = %backup_key, error = %e, "could not copy unreadable record");
                None
            }
        }
    }

    /// Overwrite the stored record with `data`
    pub fn save(&self, data: &AppData) -> Result<()> {
        let json = serde_json::to_string(data)?;
        self.store.set(&self.key, &json)
    }
}

fn parse_record(raw: &str) -> serde_json::Result<AppData> {
    let mut value: Value = serde_json::from_str(raw)?;
    migrate(&mut value);
    serde_json::from_value(value)
}

/// JavaScript-style falsiness: absent, null, false, 0, or ""
fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

/// Upgrade a stored record in place.
///
/// Records carry no version tag, so each step checks its own field. Falsy
/// values are treated as absent, so a stored font size of 0 or an empty
/// lock-screen id is replaced too.
pub fn migrate(value: &mut Value) {
    let Some(root) = value.as_object_mut() else {
        return;
    };

    let settings_missing = !matches!(root.get("settings"), Some(Value::Object(_)));
    if settings_missing {
        root.insert("settings".to_string(), default_settings_value());
        return;
    }

    let Some(settings) = root.get_mut("settings").and_then(Value::as_object_mut) else {
        return;
    };

    if is_falsy(settings.get("labels")) {
        settings.insert("labels".to_string(), default_labels_value());
    }
    if is_falsy(settings.get("lockScreenImageId")) {
        settings.insert("lockScreenImageId".to_string(), Value::Null);
    }
    default_font_size(settings, "editorFontSize");
    default_font_size(settings, "previewFontSize");
}

fn default_font_size(settings: &mut Map<String, Value>, key: &str) {
    if is_falsy(settings.get(key)) {
        settings.insert(key.to_string(), Value::from(DEFAULT_FONT_SIZE));
    }
}

fn default_settings_value() -> Value {
    serde_json::to_value(AppSettings::default()).unwrap_or(Value::Null)
}

fn default_labels_value() -> Value {
    serde_json::to_value(CustomLabels::default()).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Post, StoredImage};
    use crate::error::RosetintError;
    use crate::infrastructure::store::MemoryStore;
    use serde_json::json;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(RosetintError::Storage("quota exceeded".to_string()))
        }
    }

    /// Holds one record and refuses every write
    struct ReadOnlyStore(&'static str);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(Some(self.0.to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(RosetintError::Storage("read-only".to_string()))
        }
    }

    fn stored(store: &MemoryStore, value: Value) {
        store
            .set(DEFAULT_STORAGE_KEY, &value.to_string())
            .unwrap();
    }

    fn sample_data() -> AppData {
        let mut data = AppData::initial(1_700_000_000_000);
        data.posts.push(Post {
            id: "p2".to_string(),
            title: "Second".to_string(),
            content: "![x](img1)".to_string(),
            category_id: "tech".to_string(),
            created_at: 5,
            updated_at: 6,
        });
        data.images.push(StoredImage::new(
            "i1".to_string(),
            "img1".to_string(),
            "one.png".to_string(),
            7,
        ));
        data.settings.background_image_id = Some("i1".to_string());
        data.settings.editor_font_size = 120;
        data
    }

    #[test]
    fn test_load_empty_store_writes_initial() {
        let store = MemoryStore::new();
        let data_store = DataStore::new(&store);

        let loaded = data_store.load().unwrap();

        assert_eq!(loaded.origin, LoadOrigin::Initialized);
        assert_eq!(loaded.data.posts.len(), 1);
        assert_eq!(loaded.data.categories.len(), 3);
        assert!(loaded.data.images.is_empty());

        // The store now holds that same dataset
        let again = data_store.load().unwrap();
        assert_eq!(again.origin, LoadOrigin::Stored);
        assert_eq!(again.data, loaded.data);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let store = MemoryStore::new();
        let data_store = DataStore::new(&store);
        let data = sample_data();

        data_store.save(&data).unwrap();
        let loaded = data_store.load().unwrap();

        assert_eq!(loaded.origin, LoadOrigin::Stored);
        assert_eq!(loaded.data, data);
    }

    #[test]
    fn test_load_twice_is_stable() {
        let store = MemoryStore::new();
        stored(
            &store,
            json!({ "posts": [], "categories": [], "images": [], "settings": { "labels": null } }),
        );
        let data_store = DataStore::new(&store);

        let first = data_store.load().unwrap();
        let second = data_store.load().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_settings_get_defaults() {
        let store = MemoryStore::new();
        stored(&store, json!({ "posts": [], "categories": [], "images": [] }));

        let loaded = DataStore::new(&store).load().unwrap();

        assert_eq!(loaded.data.settings, AppSettings::default());
        assert_eq!(loaded.data.settings.labels, CustomLabels::default());
        assert_eq!(loaded.data.settings.editor_font_size, 100);
        assert_eq!(loaded.data.settings.preview_font_size, 100);
    }

    #[test]
    fn test_missing_labels_and_font_sizes() {
        let store = MemoryStore::new();
        stored(
            &store,
            json!({
                "posts": [],
                "categories": [],
                "images": [],
                "settings": { "backgroundImageId": "bg" }
            }),
        );

        let loaded = DataStore::new(&store).load().unwrap();
        let settings = loaded.data.settings;

        assert_eq!(settings.background_image_id, Some("bg".to_string()));
        assert_eq!(settings.lock_screen_image_id, None);
        assert_eq!(settings.labels, CustomLabels::default());
        assert_eq!(settings.editor_font_size, 100);
        assert_eq!(settings.preview_font_size, 100);
    }

    #[test]
    fn test_explicit_null_lock_screen_stays_null() {
        let store = MemoryStore::new();
        let mut value = serde_json::to_value(AppData::initial(0)).unwrap();
        value["settings"]["lockScreenImageId"] = Value::Null;
        stored(&store, value);

        let loaded = DataStore::new(&store).load().unwrap();

        assert_eq!(loaded.origin, LoadOrigin::Stored);
        assert_eq!(loaded.data.settings.lock_screen_image_id, None);
    }

    #[test]
    fn test_falsy_values_are_defaulted() {
        let mut value = json!({
            "settings": {
                "lockScreenImageId": "",
                "editorFontSize": 0,
                "previewFontSize": null,
                "labels": {}
            }
        });

        migrate(&mut value);

        let settings = &value["settings"];
        assert!(settings["lockScreenImageId"].is_null());
        assert_eq!(settings["editorFontSize"], 100);
        assert_eq!(settings["previewFontSize"], 100);
        // An empty object is truthy and kept; serde fills its keys later
        assert_eq!(settings["labels"], json!({}));
    }

    #[test]
    fn test_non_object_settings_replaced() {
        let mut value = json!({ "settings": 5 });
        migrate(&mut value);
        assert_eq!(value["settings"], default_settings_value());
    }

    #[test]
    fn test_truthy_values_untouched() {
        let mut value = json!({
            "settings": {
                "lockScreenImageId": "lock",
                "editorFontSize": 80,
                "previewFontSize": 140
            }
        });

        migrate(&mut value);

        let settings = &value["settings"];
        assert_eq!(settings["lockScreenImageId"], "lock");
        assert_eq!(settings["editorFontSize"], 80);
        assert_eq!(settings["previewFontSize"], 140);
    }

    #[test]
    fn test_corrupt_record_recovers_without_overwrite() {
        let store = MemoryStore::new();
        store.set(DEFAULT_STORAGE_KEY, "{not json").unwrap();

        let loaded = DataStore::new(&store).load().unwrap();

        assert!(matches!(loaded.origin, LoadOrigin::Recovered { .. }));
        assert_eq!(loaded.data.posts.len(), 1);
        assert_eq!(
            store.get(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_corrupt_record_is_copied_aside() {
        let store = MemoryStore::new();
        store.set(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let data_store = DataStore::new(&store);

        let loaded = data_store.load().unwrap();
        let backup_key = format!("{}{}", DEFAULT_STORAGE_KEY, CORRUPT_SUFFIX);
        match loaded.origin {
            LoadOrigin::Recovered { backup, .. } => {
                assert_eq!(backup.as_deref(), Some(backup_key.as_str()))
            }
            other => panic!("Expected Recovered, got {:?}", other),
        }

        // The copy survives the save that replaces the record
        data_store.save(&loaded.data).unwrap();
        assert_eq!(
            store.get(&backup_key).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_corrupt_record_without_room_for_copy() {
        let store = ReadOnlyStore("{not json");

        let loaded = DataStore::new(&store).load().unwrap();

        assert!(matches!(
            loaded.origin,
            LoadOrigin::Recovered { backup: None, .. }
        ));
        assert_eq!(loaded.data.posts.len(), 1);
    }

    #[test]
    fn test_wrong_shape_recovers() {
        let store = MemoryStore::new();
        stored(&store, json!({ "posts": "nope" }));

        let loaded = DataStore::new(&store).load().unwrap();

        assert!(matches!(loaded.origin, LoadOrigin::Recovered { .. }));
    }

    #[test]
    fn test_save_failure_is_reported() {
        let data_store = DataStore::new(FailingStore);
        match data_store.save(&AppData::initial(0)) {
            Err(RosetintError::Storage(msg)) => assert!(msg.contains("quota")),
            other => panic!("Expected Storage error, got {:?}", other),
        }
    }

    #[test]
    fn test_seeding_failure_is_reported() {
        let data_store = DataStore::new(FailingStore);
        assert!(data_store.load().is_err());
    }

    #[test]
    fn test_custom_key() {
        let store = MemoryStore::new();
        let data_store = DataStore::with_key(&store, "other");
        data_store.load().unwrap();

        assert!(store.get("other").unwrap().is_some());
        assert!(store.get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }
}
