//! In-memory `Backend` for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use async_trait::async_trait;

use crate::api::Backend;
use crate::error::ClientError;
use crate::model::{ChatReply, ChatRequest, DraftEntry, Entry, NewEntry};
use crate::settings::Settings;

#[derive(Default)]
pub struct FakeBackend {
    chat_replies: RefCell<VecDeque<Option<ChatReply>>>,
    chat_requests: RefCell<Vec<ChatRequest>>,
    entries: RefCell<Vec<Entry>>,
    next_id: Cell<i64>,
    fail_create: Cell<bool>,
    fail_list: Cell<bool>,
    probe_reply: RefCell<String>,
    fail_probe: Cell<bool>,
    probes: RefCell<Vec<Settings>>,
}

impl FakeBackend {
    pub fn reply_with(&self, text: &str, draft: Option<DraftEntry>) {
        self.chat_replies.borrow_mut().push_back(Some(ChatReply {
            text: text.to_string(),
            draft_entry: draft,
        }));
    }

    /// The next chat turn fails at the transport layer.
    pub fn fail_next_chat(&self) {
        self.chat_replies.borrow_mut().push_back(None);
    }

    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_requests.borrow().clone()
    }

    pub fn seed_entry(&self, entry: NewEntry) {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.entries.borrow_mut().push(Entry {
            id,
            name: entry.name,
            calories: entry.calories,
            protein: Some(entry.protein),
            carbs: Some(entry.carbs),
            fat: Some(entry.fat),
            sugar: Some(entry.sugar),
            details: entry.details,
        });
    }

    pub fn stored_entries(&self) -> Vec<Entry> {
        self.entries.borrow().clone()
    }

    pub fn fail_create(&self) {
        self.fail_create.set(true);
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.set(fail);
    }

    pub fn set_probe_reply(&self, reply: &str) {
        *self.probe_reply.borrow_mut() = reply.to_string();
    }

    pub fn fail_probe(&self) {
        self.fail_probe.set(true);
    }

    pub fn probes(&self) -> Vec<Settings> {
        self.probes.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Backend for FakeBackend {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        self.chat_requests.borrow_mut().push(request.clone());
        match self.chat_replies.borrow_mut().pop_front() {
            Some(Some(reply)) => Ok(reply),
            Some(None) => Err(ClientError::Network("connection refused".to_string())),
            None => Ok(ChatReply {
                text: "ok".to_string(),
                draft_entry: None,
            }),
        }
    }

    async fn list_entries(&self) -> Result<Vec<Entry>, ClientError> {
        if self.fail_list.get() {
            return Err(ClientError::Status {
                status: 500,
                url: "/api/entries/".to_string(),
            });
        }
        // Backend lists newest first.
        Ok(self.entries.borrow().iter().rev().cloned().collect())
    }

    async fn create_entry(&self, entry: &NewEntry) -> Result<(), ClientError> {
        if self.fail_create.get() {
            return Err(ClientError::Network("connection reset".to_string()));
        }
        self.seed_entry(entry.clone());
        Ok(())
    }

    async fn probe_llm(&self, settings: &Settings) -> Result<String, ClientError> {
        self.probes.borrow_mut().push(settings.clone());
        if self.fail_probe.get() {
            return Err(ClientError::Network("connection refused".to_string()));
        }
        Ok(self.probe_reply.borrow().clone())
    }
}
