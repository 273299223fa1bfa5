use crate::api::Backend;
use crate::error::ClientError;
use crate::model::{ChatMessage, ChatReply, ChatRequest, DraftEntry, NewEntry};

pub const GREETING: &str =
    "Hello! What did you eat today? I can help you look up nutrition info.";
pub const CHAT_ERROR_TEXT: &str =
    "Sorry, I encountered an error communicating with the server.";
pub const DRAFT_SAVED_TEXT: &str = "Entry saved successfully! Check the daily log.";

/// Why a submission was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRejected {
    /// Empty or whitespace-only text.
    Empty,
    /// A turn is already waiting on the backend.
    Busy,
}

/// Transcript of the current chat session. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    loading: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session opened with the assistant's greeting.
    pub fn with_greeting() -> Self {
        let mut session = Self::new();
        session.push(ChatMessage::assistant(GREETING));
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Append the user's message, mark the session busy and return the request
    /// carrying the whole transcript.
    pub fn begin_turn(&mut self, text: &str) -> Result<ChatRequest, TurnRejected> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TurnRejected::Empty);
        }
        if self.loading {
            return Err(TurnRejected::Busy);
        }

        self.push(ChatMessage::user(text));
        self.loading = true;
        Ok(ChatRequest::from_transcript(&self.messages))
    }

    /// Append the assistant's answer (or the fixed error text) and clear the
    /// busy flag, whatever the outcome.
    pub fn finish_turn(&mut self, result: Result<ChatReply, ClientError>) {
        let message = match result {
            Ok(reply) => ChatMessage::assistant(reply.text).with_draft(reply.draft_entry),
            Err(e) => {
                log::error!("Chat turn failed: {}", e);
                ChatMessage::assistant(CHAT_ERROR_TEXT)
            }
        };
        self.push(message);
        self.loading = false;
    }

    /// Run one full turn against `backend`.
    pub async fn submit<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        text: &str,
    ) -> Result<(), TurnRejected> {
        let request = self.begin_turn(text)?;
        let result = backend.send_chat(&request).await;
        self.finish_turn(result);
        Ok(())
    }

    pub fn draft_saved(&mut self) {
        self.push(ChatMessage::assistant(DRAFT_SAVED_TEXT));
    }
}

/// Persist a confirmed draft as a real entry.
pub async fn save_draft<B: Backend + ?Sized>(
    backend: &B,
    draft: &DraftEntry,
) -> Result<(), ClientError> {
    let entry = NewEntry::try_from(draft)?;
    backend.create_entry(&entry).await?;
    log::info!("Saved draft '{}' as entry", draft.name);
    Ok(())
}
