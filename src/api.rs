//! HTTP boundary to the nutrition backend.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::{ChatReply, ChatRequest, Entry, LlmProbeReply, LlmProbeRequest, NewEntry};
use crate::settings::Settings;

pub const CHAT_PATH: &str = "/api/chat/message";
pub const ENTRIES_PATH: &str = "/api/entries/";
pub const LLM_CHAT_PATH: &str = "/api/llm/chat";

/// Calls the views make against the backend.
///
/// Futures are not `Send`: the browser runs everything on one thread.
#[async_trait(?Send)]
pub trait Backend {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError>;

    async fn list_entries(&self) -> Result<Vec<Entry>, ClientError>;

    async fn create_entry(&self, entry: &NewEntry) -> Result<(), ClientError>;

    /// Send a fixed greeting through the configured provider and return its reply.
    async fn probe_llm(&self, settings: &Settings) -> Result<String, ClientError>;
}

/// `Backend` over the browser's fetch API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        let url = self.config.url(CHAT_PATH);
        log::debug!("Sending {} chat turns", request.messages.len());

        let resp = Request::post(&url)
            .json(request)
            .map_err(|e| ClientError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        decode(check(resp, &url)?).await
    }

    async fn list_entries(&self) -> Result<Vec<Entry>, ClientError> {
        let url = self.config.url(ENTRIES_PATH);
        log::debug!("Fetching entries");

        let resp = Request::get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        decode(check(resp, &url)?).await
    }

    async fn create_entry(&self, entry: &NewEntry) -> Result<(), ClientError> {
        let url = self.config.url(ENTRIES_PATH);
        log::debug!("Creating entry '{}' ({} kcal)", entry.name, entry.calories);

        let resp = Request::post(&url)
            .json(entry)
            .map_err(|e| ClientError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        check(resp, &url).map(|_| ())
    }

    async fn probe_llm(&self, settings: &Settings) -> Result<String, ClientError> {
        let url = self.config.url(LLM_CHAT_PATH);
        log::debug!("Testing LLM connection via provider '{}'", settings.provider);

        let resp = Request::post(&url)
            .query([
                ("provider", settings.provider.as_str()),
                ("base_url", settings.base_url.as_str()),
                ("model", settings.model.as_str()),
            ])
            .json(&LlmProbeRequest::greeting())
            .map_err(|e| ClientError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let reply: LlmProbeReply = decode(check(resp, &url)?).await?;
        Ok(reply.reply)
    }
}

fn check(resp: Response, url: &str) -> Result<Response, ClientError> {
    if resp.ok() {
        Ok(resp)
    } else {
        log::warn!("{} returned {}", url, resp.status());
        Err(ClientError::Status {
            status: resp.status(),
            url: url.to_string(),
        })
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    resp.json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}
