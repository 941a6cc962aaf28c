use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsPayload {
    pub total_startups: i64,
    pub last_update: String,
    pub top_sectors: Vec<RankedEntry>,
    pub top_countries: Vec<RankedEntry>,
}

/// One line of a ranked list. Both fields are rendered as received.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankedEntry {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub count: Option<Value>,
}

impl RankedEntry {
    pub fn new(name: &str, count: i64) -> Self {
        Self {
            name: Some(Value::from(name)),
            count: Some(Value::from(count)),
        }
    }
}

/// A startup row. Any field may be absent, null or empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub nome: Option<Value>,
    #[serde(default)]
    pub investidor: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub pais: Option<Value>,
    #[serde(default)]
    pub tam: Option<Value>,
    #[serde(default)]
    pub setor: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub enabled: bool,
}

/// HTML checkbox submission: the field is only present when checked.
#[derive(Debug, Deserialize)]
pub struct FilterForm {
    pub enabled: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChatReply {
    pub ok: bool,
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub title: Option<String>,
    pub link: String,
}

impl Source {
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.link)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

impl ChatRole {
    pub fn class(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub role: ChatRole,
    pub sources: Vec<Source>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: ChatRole::User,
            sources: Vec::new(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role: ChatRole::Bot,
            sources: Vec::new(),
        }
    }

    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }
}

/// JavaScript-style truthiness: null, false, zero and the empty string count as missing.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
