use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GatewayError;
use crate::models::{ContentSource, ContentType, Language, Tone, word_count};

// A generated piece of content kept for later listing and export
#[derive(Debug, Clone, Serialize)]
pub struct StoredContent {
    pub id: Uuid,
    pub topic: String,
    pub content_type: ContentType,
    pub language: Language,
    pub tone: Tone,
    pub content: String,
    pub word_count: usize,
    pub source: ContentSource,
    pub created_at: DateTime<Utc>,
}

// Listing row without the content body
#[derive(Debug, Clone, Serialize)]
pub struct ContentSummary {
    pub id: Uuid,
    pub topic: String,
    pub content_type: ContentType,
    pub language: Language,
    pub tone: Tone,
    pub word_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&StoredContent> for ContentSummary {
    fn from(item: &StoredContent) -> Self {
        Self {
            id: item.id,
            topic: item.topic.clone(),
            content_type: item.content_type,
            language: item.language,
            tone: item.tone,
            word_count: item.word_count,
            created_at: item.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Markdown,
    Text,
    Json,
}

impl ExportFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Text => "text/plain; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
        }
    }
}

// True when the first line after any `[...]` marker lines is a level-one heading
fn starts_with_heading(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !(line.starts_with('[') && line.ends_with(']')))
        .is_some_and(|line| line.starts_with("# "))
}

/// In-process content store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct ContentStore {
    items: DashMap<Uuid, StoredContent>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn insert(
        &self,
        topic: String,
        content_type: ContentType,
        language: Language,
        tone: Tone,
        content: String,
        source: ContentSource,
        created_at: DateTime<Utc>,
    ) -> StoredContent {
        let item = StoredContent {
            id: Uuid::new_v4(),
            topic,
            content_type,
            language,
            tone,
            word_count: word_count(&content),
            content,
            source,
            created_at,
        };
        self.items.insert(item.id, item.clone());
        item
    }

    pub fn get(&self, id: Uuid) -> Result<StoredContent, GatewayError> {
        self.items
            .get(&id)
            .map(|item| item.clone())
            .ok_or_else(|| GatewayError::not_found(format!("content {} not found", id)))
    }

    // Newest first, optionally restricted to one content type
    pub fn list(&self, content_type: Option<ContentType>) -> Vec<ContentSummary> {
        let mut rows: Vec<ContentSummary> = self
            .items
            .iter()
            .filter(|item| content_type.is_none_or(|ct| item.content_type == ct))
            .map(|item| ContentSummary::from(item.value()))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        rows
    }

    pub fn delete(&self, id: Uuid) -> Result<(), GatewayError> {
        self.items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| GatewayError::not_found(format!("content {} not found", id)))
    }

    pub fn export(&self, id: Uuid, format: ExportFormat) -> Result<String, GatewayError> {
        let item = self.get(id)?;
        match format {
            ExportFormat::Text => Ok(item.content),
            ExportFormat::Markdown => {
                let body = item.content.trim_end();
                let heading = if starts_with_heading(body) {
                    String::new()
                } else {
                    format!("# {}\n\n", item.topic)
                };
                Ok(format!(
                    "{}{}\n\n---\n*{} | {} | {} | generated {}*\n",
                    heading,
                    body,
                    item.content_type.as_str(),
                    item.language.as_str(),
                    item.tone.as_str(),
                    item.created_at.to_rfc3339()
                ))
            }
            ExportFormat::Json => serde_json::to_string_pretty(&item)
                .map_err(|e| GatewayError::internal(format!("failed to serialize content: {}", e))),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
