use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::{
    question::{self, RawQuestion},
    rejections::{AppError, ResultExt},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{id}", get(get_question).delete(delete_question))
}

async fn create_question(
    State(state): State<AppState>,
    Json(raw): Json<RawQuestion>,
) -> Result<impl IntoResponse, AppError> {
    let question = question::validate(&raw)?;

    let record = state
        .db
        .create_question(&question)
        .await
        .reject("could not store question")?;

    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_questions(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let questions = state
        .db
        .questions()
        .await
        .reject("could not list questions")?;

    Ok(Json(questions))
}

async fn get_question(
    State(state): State<AppState>,
    Path(question_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let record = state
        .db
        .get_question(question_id)
        .await
        .reject("could not get question")?
        .ok_or(AppError::NotFound)?;

    Ok(Json(record))
}

async fn delete_question(
    State(state): State<AppState>,
    Path(question_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state
        .db
        .delete_question(question_id)
        .await
        .reject("could not delete question")?;

    if !deleted {
        return Err(AppError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
