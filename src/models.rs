use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GatewayError;

pub const MAX_TOPIC_CHARS: usize = 500;

// Kinds of content the gateway can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Presentation,
    Document,
    Social,
    Blog,
    Email,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::Presentation,
        ContentType::Document,
        ContentType::Social,
        ContentType::Blog,
        ContentType::Email,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Presentation => "presentation",
            ContentType::Document => "document",
            ContentType::Social => "social",
            ContentType::Blog => "blog",
            ContentType::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Japanese,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Portuguese,
        Language::Japanese,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
            Language::French => "french",
            Language::German => "german",
            Language::Italian => "italian",
            Language::Portuguese => "portuguese",
            Language::Japanese => "japanese",
        }
    }

    // Capitalised name used inside prompts and markers
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Portuguese => "Portuguese",
            Language::Japanese => "Japanese",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Friendly,
    Formal,
    Persuasive,
    Informative,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Tone::Professional,
        Tone::Casual,
        Tone::Friendly,
        Tone::Formal,
        Tone::Persuasive,
        Tone::Informative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Friendly => "friendly",
            Tone::Formal => "formal",
            Tone::Persuasive => "persuasive",
            Tone::Informative => "informative",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Friendly => "Friendly",
            Tone::Formal => "Formal",
            Tone::Persuasive => "Persuasive",
            Tone::Informative => "Informative",
        }
    }
}

// Body of POST /api/generate and the input of the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerationRequest {
    pub topic: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub tone: Tone,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            topic: topic.into(),
            content_type,
            language: Language::default(),
            tone: Tone::default(),
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    /// Checks the free-text field and returns a copy with the topic trimmed.
    /// Enum fields are already validated by deserialization.
    pub fn validated(self) -> Result<Self, GatewayError> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(GatewayError::validation("topic must not be empty"));
        }
        if topic.chars().count() > MAX_TOPIC_CHARS {
            return Err(GatewayError::validation(format!(
                "topic must be at most {} characters",
                MAX_TOPIC_CHARS
            )));
        }
        Ok(Self {
            topic: topic.to_string(),
            ..self
        })
    }
}

// Where a piece of content came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "name")]
pub enum ContentSource {
    Cache,
    Provider(String),
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationMetadata {
    pub topic: String,
    pub content_type: ContentType,
    pub language: Language,
    pub tone: Tone,
    pub word_count: usize,
    pub character_count: usize,
    pub generation_time_ms: u64,
    pub source: ContentSource,
    pub generated_at: DateTime<Utc>,
}

// Envelope returned by POST /api/generate
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub id: Uuid,
    pub content: String,
    pub metadata: GenerationMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionsResponse {
    pub content_types: Vec<ContentType>,
    pub languages: Vec<Language>,
    pub tones: Vec<Tone>,
}

impl OptionsResponse {
    pub fn all() -> Self {
        Self {
            content_types: ContentType::ALL.to_vec(),
            languages: Language::ALL.to_vec(),
            tones: Tone::ALL.to_vec(),
        }
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
