//! LLM provider settings kept in client-local storage.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::api::Backend;
use crate::error::ClientError;

pub const PROVIDER_KEY: &str = "llmProvider";
pub const BASE_URL_KEY: &str = "llmBaseUrl";
pub const MODEL_KEY: &str = "llmModel";

pub const DEFAULT_PROVIDER: &str = "ollama";
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2:latest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub provider: String,
    pub base_url: String,
    pub model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

/// String key-value storage that outlives the page.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;
}

/// `window.localStorage`.
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    pub fn local() -> Result<Self, ClientError> {
        let window = web_sys::window().ok_or(ClientError::Unavailable("window"))?;
        let storage = window
            .local_storage()
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))?
            .ok_or(ClientError::Unavailable("localStorage"))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        self.storage
            .get_item(key)
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))
    }
}

/// In-memory store. Used when `localStorage` is unavailable (private
/// browsing, sandboxed frames); clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub struct SettingsStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Each unset field falls back to its default independently.
    pub fn load(&self) -> Result<Settings, ClientError> {
        Ok(Settings {
            provider: self.read_or(PROVIDER_KEY, DEFAULT_PROVIDER)?,
            base_url: self.read_or(BASE_URL_KEY, DEFAULT_BASE_URL)?,
            model: self.read_or(MODEL_KEY, DEFAULT_MODEL)?,
        })
    }

    /// Written verbatim, last write wins.
    pub fn save(&self, settings: &Settings) -> Result<(), ClientError> {
        self.store.set(PROVIDER_KEY, &settings.provider)?;
        self.store.set(BASE_URL_KEY, &settings.base_url)?;
        self.store.set(MODEL_KEY, &settings.model)?;
        log::info!(
            "Saved LLM settings: provider={} model={}",
            settings.provider,
            settings.model
        );
        Ok(())
    }

    fn read_or(&self, key: &str, default: &str) -> Result<String, ClientError> {
        Ok(self
            .store
            .get(key)?
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string()))
    }
}

/// Settings store over `localStorage`, or over memory if that is unavailable.
pub fn browser_settings() -> SettingsStore<Box<dyn KeyValueStore>> {
    let store: Box<dyn KeyValueStore> = match BrowserStorage::local() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::warn!("Falling back to in-memory settings: {}", e);
            Box::new(MemoryStore::default())
        }
    };
    SettingsStore::new(store)
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        (**self).set(key, value)
    }
}

/// Probe the backend's LLM route with the given (possibly unsaved) settings.
pub async fn test_connection<B: Backend + ?Sized>(
    backend: &B,
    settings: &Settings,
) -> Result<String, ClientError> {
    backend.probe_llm(settings).await
}
