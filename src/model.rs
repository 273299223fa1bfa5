//! Data carried between the views and the backend API.
//!
//! Field names follow the backend's JSON shapes, so every type here
//! serializes straight onto the wire.

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// Display view of one ingredient inside a stored breakdown. Other fields
/// are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub calories: f64,
}

/// Candidate entry proposed by the backend, pending user confirmation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DraftEntry {
    pub name: String,
    #[serde(default)]
    pub total_calories: i64,
    #[serde(default)]
    pub total_protein: f64,
    #[serde(default)]
    pub total_carbs: f64,
    #[serde(default)]
    pub total_fat: f64,
    #[serde(default)]
    pub total_sugar: f64,
    /// Kept exactly as the backend sent them; they are stored verbatim in
    /// the saved entry's `details`.
    #[serde(default)]
    pub ingredients: Vec<serde_json::Value>,
}

/// A chat turn as held in the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub draft_entry: Option<DraftEntry>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            draft_entry: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            draft_entry: None,
        }
    }

    pub fn with_draft(mut self, draft: Option<DraftEntry>) -> Self {
        self.draft_entry = draft;
        self
    }

    /// Wire form of this message; the draft never leaves the client.
    pub fn turn(&self) -> ChatTurn {
        ChatTurn {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Body of `POST /api/chat/message`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatTurn>,
}

impl ChatRequest {
    pub fn from_transcript(messages: &[ChatMessage]) -> Self {
        Self {
            messages: messages.iter().map(ChatMessage::turn).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub text: String,
    #[serde(default)]
    pub draft_entry: Option<DraftEntry>,
}

/// A persisted food-log record. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Entry {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub calories: i64,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub sugar: Option<f64>,
    #[serde(default)]
    pub details: Option<String>,
}

impl Entry {
    /// Parsed `details`, or `None` when the entry carries no breakdown.
    pub fn parsed_details(&self) -> Option<EntryDetails> {
        self.details.as_deref().and_then(EntryDetails::parse)
    }
}

/// Body of `POST /api/entries/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntry {
    pub name: String,
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sugar: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl TryFrom<&DraftEntry> for NewEntry {
    type Error = ClientError;

    fn try_from(draft: &DraftEntry) -> Result<Self, Self::Error> {
        Ok(NewEntry {
            name: draft.name.clone(),
            calories: draft.total_calories,
            protein: draft.total_protein,
            carbs: draft.total_carbs,
            fat: draft.total_fat,
            sugar: draft.total_sugar,
            details: Some(serde_json::to_string(&draft.ingredients)?),
        })
    }
}

/// Body of `POST /api/llm/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct LlmProbeRequest {
    pub messages: Vec<ChatTurn>,
}

impl LlmProbeRequest {
    pub fn greeting() -> Self {
        Self {
            messages: vec![ChatTurn {
                role: ChatRole::User,
                content: "Hello".to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProbeReply {
    pub reply: String,
}

/// Stored ingredient breakdown of an entry.
///
/// The backend keeps `details` as free text. Text that parses as a list of
/// ingredients becomes `Ingredients`; anything else is shown verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryDetails {
    Ingredients(Vec<Ingredient>),
    Raw(String),
}

impl EntryDetails {
    /// Returns `None` for empty text. Never fails.
    pub fn parse(text: &str) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        Some(match serde_json::from_str::<Vec<Ingredient>>(text) {
            Ok(items) => EntryDetails::Ingredients(items),
            Err(_) => EntryDetails::Raw(text.to_string()),
        })
    }

    /// Display line: `"egg (70 kcal), toast (90 kcal)"` or the raw text.
    pub fn summary(&self) -> String {
        match self {
            EntryDetails::Ingredients(items) => items
                .iter()
                .map(|i| format!("{} ({} kcal)", i.name, i.calories))
                .collect::<Vec<_>>()
                .join(", "),
            EntryDetails::Raw(text) => text.clone(),
        }
    }
}
