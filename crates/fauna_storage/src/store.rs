//! Collection-partitioned JSON file store.

use fauna_error::{FaunaResult, StorageError, StorageErrorKind};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Contents of one collection: string keys to arbitrary JSON values.
pub type Collection = Map<String, Value>;

/// Key-value store persisting each collection as a JSON file.
///
/// Every operation reads the whole collection from disk and, when it changes
/// something, writes the whole collection back. Keys are anything
/// displayable, so numeric platform ids are stored as their decimal string.
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(data_dir))]
    pub fn new(data_dir: impl Into<PathBuf>) -> FaunaResult<Self> {
        let data_dir = data_dir.into();

        std::fs::create_dir_all(&data_dir).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                data_dir.display(),
                e
            )))
        })?;

        tracing::info!(path = %data_dir.display(), "Opened JSON store");
        Ok(Self { data_dir })
    }

    /// Directory holding the collection files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File backing `collection`.
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }

    async fn try_read(&self, collection: &str) -> Result<Collection, StorageError> {
        let path = self.collection_path(collection);

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Collection::new()),
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                ))));
            }
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(StorageError::new(StorageErrorKind::Corrupt(format!(
                "{}: expected an object, found {}",
                path.display(),
                json_type(&other)
            )))),
            Err(e) => Err(StorageError::new(StorageErrorKind::Corrupt(format!(
                "{}: {}",
                path.display(),
                e
            )))),
        }
    }

    async fn try_write(&self, collection: &str, data: &Collection) -> Result<(), StorageError> {
        let path = self.collection_path(collection);
        let text = serde_json::to_string_pretty(data).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidValue(format!("{collection}: {e}")))
        })?;

        // Write to temp file first, then rename so readers never see half a file
        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, text.as_bytes())
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    temp_path.display(),
                    e
                )))
            })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::debug!(
            path = %path.display(),
            keys = data.len(),
            "Wrote collection"
        );
        Ok(())
    }

    /// Read an entire collection.
    ///
    /// A missing file is an empty collection. An unreadable or corrupt file
    /// is logged and also read as empty.
    #[tracing::instrument(skip(self))]
    pub async fn read(&self, collection: &str) -> Collection {
        match self.try_read(collection).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(error = %e, "Treating unreadable collection as empty");
                Collection::new()
            }
        }
    }

    /// Replace an entire collection on disk.
    ///
    /// Failures are logged and swallowed; callers cannot assume the data
    /// was persisted.
    #[tracing::instrument(skip(self, data), fields(keys = data.len()))]
    pub async fn write(&self, collection: &str, data: &Collection) {
        if let Err(e) = self.try_write(collection, data).await {
            tracing::error!(error = %e, "Failed to write collection");
        }
    }

    /// Raw JSON value stored under `key`.
    pub async fn get_value(&self, collection: &str, key: impl Display) -> Option<Value> {
        self.read(collection).await.remove(&key.to_string())
    }

    /// Value stored under `key`, decoded as `T`.
    ///
    /// A value that exists but does not decode as `T` is logged and reported
    /// as absent.
    pub async fn get<T: DeserializeOwned>(&self, collection: &str, key: impl Display) -> Option<T> {
        let key = key.to_string();
        let value = self.get_value(collection, &key).await?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(
                    collection,
                    key = %key,
                    error = %e,
                    "Stored value has unexpected shape"
                );
                None
            }
        }
    }

    /// Value stored under `key`, or `default` when absent.
    pub async fn get_or<T: DeserializeOwned>(
        &self,
        collection: &str,
        key: impl Display,
        default: T,
    ) -> T {
        self.get(collection, key).await.unwrap_or(default)
    }

    /// Store `value` under `key`, replacing anything already there.
    #[tracing::instrument(skip(self, key, value), fields(key = %key))]
    pub async fn set<T: Serialize>(&self, collection: &str, key: impl Display, value: T) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(error = %e, "Value cannot be stored as JSON");
                return;
            }
        };
        let mut data = self.read(collection).await;
        data.insert(key.to_string(), value);
        self.write(collection, &data).await;
    }

    /// Whether `key` is present.
    pub async fn exists(&self, collection: &str, key: impl Display) -> bool {
        self.read(collection).await.contains_key(&key.to_string())
    }

    /// Remove `key`. Returns whether it was present.
    #[tracing::instrument(skip(self, key), fields(key = %key))]
    pub async fn delete(&self, collection: &str, key: impl Display) -> bool {
        let mut data = self.read(collection).await;
        if data.remove(&key.to_string()).is_none() {
            return false;
        }
        self.write(collection, &data).await;
        true
    }

    /// Append `item` to the list under `key`.
    ///
    /// An absent entry starts as an empty list; an entry holding anything
    /// other than a list is replaced by one.
    #[tracing::instrument(skip(self, key, item), fields(key = %key))]
    pub async fn push<T: Serialize>(&self, collection: &str, key: impl Display, item: T) {
        let item = match serde_json::to_value(item) {
            Ok(item) => item,
            Err(e) => {
                tracing::error!(error = %e, "Item cannot be stored as JSON");
                return;
            }
        };
        let mut data = self.read(collection).await;
        let entry = data
            .entry(key.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !entry.is_array() {
            tracing::debug!("Replacing non-list value with a list");
            *entry = Value::Array(Vec::new());
        }
        if let Value::Array(items) = entry {
            items.push(item);
        }
        self.write(collection, &data).await;
    }

    /// Remove the first element equal to `item` from the list under `key`.
    ///
    /// Returns whether anything was removed; absent keys and non-list values
    /// remove nothing.
    #[tracing::instrument(skip(self, key, item), fields(key = %key))]
    pub async fn pull<T: Serialize>(&self, collection: &str, key: impl Display, item: T) -> bool {
        let Ok(item) = serde_json::to_value(item) else {
            return false;
        };
        let mut data = self.read(collection).await;
        let Some(Value::Array(items)) = data.get_mut(&key.to_string()) else {
            return false;
        };
        let Some(pos) = items.iter().position(|v| v == &item) else {
            return false;
        };
        items.remove(pos);
        self.write(collection, &data).await;
        true
    }

    /// Add `amount` to the integer under `key` and return the new value.
    ///
    /// Absent and non-integer values count as zero.
    #[tracing::instrument(skip(self, key), fields(key = %key))]
    pub async fn increment(&self, collection: &str, key: impl Display, amount: i64) -> i64 {
        let mut data = self.read(collection).await;
        let key = key.to_string();
        let current = data.get(&key).and_then(Value::as_i64).unwrap_or(0);
        let next = current.saturating_add(amount);
        data.insert(key, Value::from(next));
        self.write(collection, &data).await;
        next
    }

    /// All keys in the collection.
    pub async fn keys(&self, collection: &str) -> Vec<String> {
        self.read(collection).await.into_iter().map(|(k, _)| k).collect()
    }

    /// All values in the collection.
    pub async fn values(&self, collection: &str) -> Vec<Value> {
        self.read(collection).await.into_iter().map(|(_, v)| v).collect()
    }

    /// Number of keys in the collection.
    pub async fn len(&self, collection: &str) -> usize {
        self.read(collection).await.len()
    }

    /// Whether the collection has no keys.
    pub async fn is_empty(&self, collection: &str) -> bool {
        self.read(collection).await.is_empty()
    }

    /// Remove every key from the collection.
    pub async fn clear(&self, collection: &str) {
        self.write(collection, &Collection::new()).await;
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
