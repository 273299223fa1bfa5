//! Browser bindings for the offline cache: `CacheStorage`, fetch and the
//! service worker's event handlers.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, Response, ServiceWorkerGlobalScope};

use super::lifecycle::{CachePolicy, CacheStorage, Network, OfflineCache, OfflineError, WorkerScope};

/// Script the page registers as its service worker: the JS bootstrap in
/// `sw/sw.js`, which loads the `service-worker` binary and forwards events
/// to its exported `on_install`, `on_activate` and `on_fetch`.
pub const SERVICE_WORKER_URL: &str = "/sw.js";

fn js_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

pub struct BrowserCaches {
    storage: web_sys::CacheStorage,
}

impl BrowserCaches {
    pub fn new(scope: &ServiceWorkerGlobalScope) -> Result<Self, OfflineError> {
        let storage = scope
            .caches()
            .map_err(|e| OfflineError::Cache(js_error(e)))?;
        Ok(Self { storage })
    }
}

#[async_trait(?Send)]
impl CacheStorage for BrowserCaches {
    type Request = Request;
    type Response = Response;

    async fn add_all(&self, cache_name: &str, urls: &[String]) -> Result<(), OfflineError> {
        let cache: web_sys::Cache = JsFuture::from(self.storage.open(cache_name))
            .await
            .map_err(|e| OfflineError::Cache(js_error(e)))?
            .unchecked_into();

        let list = js_sys::Array::new();
        for url in urls {
            list.push(&JsValue::from_str(url));
        }
        JsFuture::from(cache.add_all_with_str_sequence(&list))
            .await
            .map_err(|e| OfflineError::Cache(js_error(e)))?;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, OfflineError> {
        let keys = JsFuture::from(self.storage.keys())
            .await
            .map_err(|e| OfflineError::Cache(js_error(e)))?;
        serde_wasm_bindgen::from_value(keys).map_err(|e| OfflineError::Cache(e.to_string()))
    }

    async fn delete(&self, cache_name: &str) -> Result<bool, OfflineError> {
        let deleted = JsFuture::from(self.storage.delete(cache_name))
            .await
            .map_err(|e| OfflineError::Cache(js_error(e)))?;
        Ok(deleted.as_bool().unwrap_or(false))
    }

    async fn lookup(&self, request: &Request) -> Result<Option<Response>, OfflineError> {
        let found = JsFuture::from(self.storage.match_with_request(request))
            .await
            .map_err(|e| OfflineError::Cache(js_error(e)))?;
        if found.is_undefined() || found.is_null() {
            Ok(None)
        } else {
            Ok(Some(found.unchecked_into()))
        }
    }
}

/// Worker global scope: network access and lifecycle controls.
#[derive(Clone)]
pub struct BrowserScope {
    scope: ServiceWorkerGlobalScope,
}

impl BrowserScope {
    pub fn current() -> Result<Self, OfflineError> {
        let scope = js_sys::global()
            .dyn_into::<ServiceWorkerGlobalScope>()
            .map_err(|_| OfflineError::Unavailable("ServiceWorkerGlobalScope"))?;
        Ok(Self { scope })
    }
}

#[async_trait(?Send)]
impl Network for BrowserScope {
    type Request = Request;
    type Response = Response;

    async fn fetch(&self, request: &Request) -> Result<Response, OfflineError> {
        let resp = JsFuture::from(self.scope.fetch_with_request(request))
            .await
            .map_err(|e| OfflineError::Network(js_error(e)))?;
        Ok(resp.unchecked_into())
    }
}

#[async_trait(?Send)]
impl WorkerScope for BrowserScope {
    async fn skip_waiting(&self) -> Result<(), OfflineError> {
        let promise = self
            .scope
            .skip_waiting()
            .map_err(|e| OfflineError::Cache(js_error(e)))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| OfflineError::Cache(js_error(e)))?;
        Ok(())
    }

    async fn claim_clients(&self) -> Result<(), OfflineError> {
        JsFuture::from(self.scope.clients().claim())
            .await
            .map_err(|e| OfflineError::Cache(js_error(e)))?;
        Ok(())
    }
}

type BrowserShim = OfflineCache<BrowserCaches, BrowserScope, BrowserScope>;

thread_local! {
    static SHIM: RefCell<Option<Rc<BrowserShim>>> = const { RefCell::new(None) };
}

/// The worker's shim, built on first use.
fn worker_shim() -> Result<Rc<BrowserShim>, OfflineError> {
    if let Some(shim) = SHIM.with(|s| s.borrow().clone()) {
        return Ok(shim);
    }
    let scope = BrowserScope::current()?;
    let caches = BrowserCaches::new(&scope.scope)?;
    let shim = Rc::new(OfflineCache::new(
        CachePolicy::default(),
        caches,
        scope.clone(),
        scope,
    ));
    SHIM.with(|s| *s.borrow_mut() = Some(shim.clone()));
    Ok(shim)
}

pub async fn handle_install() -> Result<(), OfflineError> {
    let shim = worker_shim()?;
    shim.install().await
}

pub async fn handle_activate() -> Result<Vec<String>, OfflineError> {
    let shim = worker_shim()?;
    shim.activate().await
}

pub async fn handle_fetch(request: Request) -> Result<Response, OfflineError> {
    let shim = worker_shim()?;
    shim.fetch(&request).await
}

/// Register the offline worker from the page. Browsers without service
/// worker support are skipped.
pub fn register_service_worker() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker"))
        .unwrap_or(false);
    if !supported {
        log::info!("Service workers unsupported; running without offline cache");
        return;
    }

    let promise = navigator.service_worker().register(SERVICE_WORKER_URL);
    wasm_bindgen_futures::spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => log::info!("Registered {}", SERVICE_WORKER_URL),
            Err(e) => log::warn!("Service worker registration failed: {}", js_error(e)),
        }
    });
}

#[cfg(test)]
mod tests {
    const BOOTSTRAP: &str = include_str!("../../sw/sw.js");

    #[test]
    fn test_bootstrap_adds_listeners_synchronously() {
        for (event, export) in [
            ("install", "on_install"),
            ("activate", "on_activate"),
            ("fetch", "on_fetch"),
        ] {
            assert!(
                BOOTSTRAP.contains(&format!("self.addEventListener('{}'", event)),
                "missing top-level '{}' listener",
                event
            );
            assert!(
                BOOTSTRAP.contains(&format!("wasm_bindgen.{}(", export)),
                "'{}' not forwarded to {}",
                event,
                export
            );
        }
        // Nothing may suspend evaluation before the listeners are added.
        assert!(!BOOTSTRAP.contains("await"));
        assert!(BOOTSTRAP.contains("event.respondWith(ready.then("));
    }

    #[test]
    fn test_bootstrap_is_registered_url() {
        assert_eq!(super::SERVICE_WORKER_URL, "/sw.js");
        assert!(BOOTSTRAP.contains("importScripts('/service-worker.js')"));
    }
}
