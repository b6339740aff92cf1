//! JSON helpers over a raw [`Store`].

use crate::error::StoreError;
use crate::store::Store;
use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Load a JSON value, falling back to `T::default()` when the key is missing
/// or its contents do not decode.
///
/// Only IO-level failures are reported as errors.
pub fn load_json<T>(store: &dyn Store, key: &str) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.load_raw(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!("malformed stored value ignored (key={key}): {err}");
            Ok(T::default())
        }
    }
}

/// Serialize a value as JSON and save it under `key`.
pub fn save_json<T>(store: &dyn Store, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
{
    let serialized = serde_json::to_string(value)?;
    store.save_raw(key, &serialized)
}

#[cfg(test)]
mod tests {
    use super::{load_json, save_json};
    use crate::{FileStore, MemoryStore, Store};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn empty_collection_round_trips() {
        let temp = tempdir().expect("tempdir");
        let store = FileStore::new(temp.path()).expect("store");
        let empty: Vec<String> = Vec::new();
        save_json(&store, "tasks", &empty).expect("save");

        let reopened = FileStore::new(temp.path()).expect("reopen");
        let loaded: Vec<String> = load_json(&reopened, "tasks").expect("load");
        assert_eq!(loaded, empty);
    }

    #[test]
    fn malformed_value_loads_as_default() {
        let store = MemoryStore::new();
        store.save_raw("tasks", "{not json").expect("save");
        let loaded: Vec<u32> = load_json(&store, "tasks").expect("load");
        assert!(loaded.is_empty());
    }

    #[test]
    fn wrong_shape_loads_as_default() {
        let store = MemoryStore::new();
        store.save_raw("clients", r#"{"name":"x"}"#).expect("save");
        let loaded: Vec<u32> = load_json(&store, "clients").expect("load");
        assert!(loaded.is_empty());
    }
}
