//! JSON persistence over LocalStorage
//!
//! On native builds there is no storage: loads find nothing and saves are dropped.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{GameError, GameResult};

/// Read and decode a value. `Ok(None)` when the key is absent.
pub fn load_json<T: DeserializeOwned>(key: &str) -> GameResult<Option<T>> {
    match backend::get(key)? {
        Some(json) => decode(&json).map(Some),
        None => Ok(None),
    }
}

/// Encode and write a value
pub fn save_json<T: Serialize>(key: &str, value: &T) -> GameResult<()> {
    let json = serde_json::to_string(value).map_err(GameError::Serialize)?;
    backend::set(key, &json)
}

/// Delete a stored value
pub fn remove(key: &str) -> GameResult<()> {
    backend::remove(key)
}

fn decode<T: DeserializeOwned>(json: &str) -> GameResult<T> {
    serde_json::from_str(json).map_err(|e| GameError::Storage(format!("corrupt entry: {e}")))
}

#[cfg(target_arch = "wasm32")]
mod backend {
    use crate::error::{GameError, GameResult};

    fn storage() -> GameResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| GameError::Storage("no window".into()))?
            .local_storage()
            .map_err(|_| GameError::Storage("access denied".into()))?
            .ok_or_else(|| GameError::Storage("LocalStorage unavailable".into()))
    }

    pub fn get(key: &str) -> GameResult<Option<String>> {
        storage()?
            .get_item(key)
            .map_err(|_| GameError::Storage(format!("read of {key} failed")))
    }

    pub fn set(key: &str, value: &str) -> GameResult<()> {
        storage()?
            .set_item(key, value)
            .map_err(|_| GameError::Storage(format!("write of {key} failed")))
    }

    pub fn remove(key: &str) -> GameResult<()> {
        storage()?
            .remove_item(key)
            .map_err(|_| GameError::Storage(format!("remove of {key} failed")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use crate::error::GameResult;

    pub fn get(_key: &str) -> GameResult<Option<String>> {
        Ok(None)
    }

    pub fn set(_key: &str, _value: &str) -> GameResult<()> {
        Ok(())
    }

    pub fn remove(_key: &str) -> GameResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_entries_are_storage_errors() {
        let err = decode::<Vec<u32>>("[1, 2,").unwrap_err();
        assert!(matches!(err, GameError::Storage(_)));
    }

    #[test]
    fn native_backend_is_empty() {
        assert!(save_json("k", &42u32).is_ok());
        assert_eq!(load_json::<u32>("k").unwrap(), None);
        assert!(remove("k").is_ok());
    }
}
