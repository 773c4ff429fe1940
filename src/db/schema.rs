// Database schema initialization

use color_eyre::Result;

pub async fn create_schema(pool: &sqlx::SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id INTEGER PRIMARY KEY,
            type TEXT NOT NULL,
            prompt TEXT NOT NULL,
            choices TEXT,
            answer TEXT NOT NULL,
            tags TEXT,
            links TEXT,
            creator TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
