//! Wasm half of the offline worker. `sw/sw.js` owns the event listeners and
//! calls these exports once the module is loaded.

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::Request;

use calorie_tracker::config::{init_logging, ClientConfig};
use calorie_tracker::offline::browser::{handle_activate, handle_fetch, handle_install};
use calorie_tracker::offline::{OfflineError, CACHE_VERSION};

fn main() {
    init_logging(ClientConfig::default().log_level);
    log::info!("Service worker loaded ({})", CACHE_VERSION);
}

fn rejection(action: &str, err: OfflineError) -> JsValue {
    log::error!("{} failed: {}", action, err);
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub fn on_install() -> Promise {
    future_to_promise(async {
        handle_install()
            .await
            .map(|_| JsValue::UNDEFINED)
            .map_err(|e| rejection("Install", e))
    })
}

#[wasm_bindgen]
pub fn on_activate() -> Promise {
    future_to_promise(async {
        handle_activate()
            .await
            .map(|_| JsValue::UNDEFINED)
            .map_err(|e| rejection("Activate", e))
    })
}

#[wasm_bindgen]
pub fn on_fetch(request: Request) -> Promise {
    future_to_promise(async move {
        handle_fetch(request)
            .await
            .map(JsValue::from)
            .map_err(|e| rejection("Fetch", e))
    })
}
