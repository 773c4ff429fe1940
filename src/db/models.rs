// Database model structs

use color_eyre::{eyre::OptionExt, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::question::{Answer, QuestionType};

/// Raw `questions` row; JSON columns still serialized.
#[derive(sqlx::FromRow)]
pub struct QuestionRow {
    pub id: i64,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub prompt: String,
    pub choices: Option<String>,
    pub answer: String,
    pub tags: Option<String>,
    pub links: Option<String>,
    pub creator: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Stored question as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRecord {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    pub answer: Answer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn from_json_column<T: DeserializeOwned>(column: Option<String>) -> Result<Option<T>> {
    column
        .map(|text| serde_json::from_str(&text))
        .transpose()
        .map_err(Into::into)
}

impl QuestionRow {
    pub fn into_record(self) -> Result<QuestionRecord> {
        let kind =
            QuestionType::from_tag(&self.kind).ok_or_eyre("unknown question type in row")?;

        Ok(QuestionRecord {
            id: self.id,
            kind,
            prompt: self.prompt,
            choices: from_json_column(self.choices)?,
            answer: serde_json::from_str(&self.answer)?,
            tags: from_json_column(self.tags)?,
            links: from_json_column(self.links)?,
            creator: self.creator,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
