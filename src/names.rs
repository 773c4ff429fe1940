pub const QUESTIONS_URL: &str = "/questions";

pub fn question_url(question_id: i64) -> String {
    format!("/questions/{question_id}")
}
