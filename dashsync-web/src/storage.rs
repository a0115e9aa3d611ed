use gloo_storage::{LocalStorage, Storage};
use shared::session::{KeyValueStore, SessionError};

/// Browser `localStorage` as a session backend.
///
/// Values are stored as raw strings (not JSON-quoted) so the token is
/// readable by anything else on the origin that expects it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalStorageStore;

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| SessionError::Write {
                key: key.to_string(),
                reason: format!("{err:?}"),
            })
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|err| SessionError::Write {
                key: key.to_string(),
                reason: format!("{err:?}"),
            })
    }
}
