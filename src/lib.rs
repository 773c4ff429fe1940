pub mod db;
pub mod handlers;
pub mod names;
pub mod question;
pub mod rejections;
pub mod statics;

use axum::Router;
use tower_http::compression::CompressionLayer;

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::question::routes())
        .nest("/static", statics::routes())
        .layer(CompressionLayer::new())
        .with_state(state)
}
