use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which cache/provider pair a lookup goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupKind {
    Word,
    Explain,
}

/// Parsed dictionary answer for a single word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    pub definition: String,
    /// At most five, in provider order
    pub synonyms: Vec<String>,
    pub example: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    FetchWordData,
    ExplainLikeFive,
}

/// Message sent by a front end to the lookup service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub action: Action,
    pub word: String,
}

impl Request {
    pub fn new(action: Action, word: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            action,
            word: word.into(),
        }
    }

    pub fn fetch_word_data(word: impl Into<String>) -> Self {
        Self::new(Action::FetchWordData, word)
    }

    pub fn explain_like_five(word: impl Into<String>) -> Self {
        Self::new(Action::ExplainLikeFive, word)
    }
}

/// Tagged reply to a [`Request`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: Uuid,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LookupResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn word_data(id: Uuid, data: LookupResult) -> Self {
        Self {
            id,
            success: true,
            data: Some(data),
            explanation: None,
            error: None,
        }
    }

    pub fn explanation(id: Uuid, explanation: String) -> Self {
        Self {
            id,
            success: true,
            data: None,
            explanation: Some(explanation),
            error: None,
        }
    }

    pub fn failure(id: Uuid, error: impl Into<String>) -> Self {
        Self {
            id,
            success: false,
            data: None,
            explanation: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Request(Request),
    Response {
        word: String,
        response: Response,
    },
    /// Host network signal, clears or sets the offline flag
    NetworkChanged {
        online: bool,
    },
    InputClosed,
}
