use wasm_bindgen::JsCast;

/// Name of the `<meta>` tag that overrides where the backend API lives.
pub const API_BASE_META: &str = "ct-api-base";

/// Runtime configuration of the page client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Prefix for every API path. Empty means same-origin.
    pub api_base: String,
    pub log_level: log::Level,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            log_level: default_log_level(),
        }
    }
}

impl ClientConfig {
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Read the configuration from the current document, falling back to
    /// defaults outside a browser or when the meta tag is absent.
    pub fn from_document() -> Self {
        let api_base = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| {
                doc.query_selector(&format!("meta[name=\"{}\"]", API_BASE_META))
                    .ok()
                    .flatten()
            })
            .and_then(|el| el.dyn_into::<web_sys::HtmlMetaElement>().ok())
            .map(|meta| meta.content());

        match api_base {
            Some(base) => Self::with_api_base(base),
            None => Self::default(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

fn default_log_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}

/// Install the panic hook and console logger. Safe to call more than once.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_same_origin() {
        let config = ClientConfig::default();
        assert_eq!(config.url("/api/entries/"), "/api/entries/");
    }

    #[test]
    fn test_api_base_trailing_slash_trimmed() {
        let config = ClientConfig::with_api_base("http://localhost:8000/");
        assert_eq!(
            config.url("/api/chat/message"),
            "http://localhost:8000/api/chat/message"
        );
    }
}
