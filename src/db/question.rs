use color_eyre::Result;

use crate::question::ValidatedQuestion;

use super::models::{QuestionRecord, QuestionRow};
use super::Db;

const QUESTION_COLUMNS: &str =
    "id, type, prompt, choices, answer, tags, links, creator, created_at, updated_at";

impl Db {
    /// Store an already-validated question; the row gets its identity and
    /// timestamps here.
    pub async fn create_question(&self, question: &ValidatedQuestion) -> Result<QuestionRecord> {
        let choices = question
            .choices
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let answer = serde_json::to_string(&question.answer)?;
        let tags = question.tags.as_ref().map(serde_json::to_string).transpose()?;
        let links = question
            .links
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let row = sqlx::query_as::<_, QuestionRow>(&format!(
            r#"
            INSERT INTO questions (type, prompt, choices, answer, tags, links, creator)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {QUESTION_COLUMNS}
            "#,
        ))
        .bind(question.kind.as_tag())
        .bind(&question.prompt)
        .bind(choices)
        .bind(answer)
        .bind(tags)
        .bind(links)
        .bind(&question.creator)
        .fetch_one(&self.pool)
        .await?;

        row.into_record()
    }

    pub async fn get_question(&self, question_id: i64) -> Result<Option<QuestionRecord>> {
        let row = sqlx::query_as::<_, QuestionRow>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1",
        ))
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(QuestionRow::into_record).transpose()
    }

    pub async fn questions(&self) -> Result<Vec<QuestionRecord>> {
        let rows = sqlx::query_as::<_, QuestionRow>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions ORDER BY id",
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(QuestionRow::into_record).collect()
    }

    pub async fn delete_question(&self, question_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(question_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
