use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rscr::{
    crawl::Crawler, db::Pool, error::RunError, persist::PersistOutcome, review::IdentifiedReview,
};
use serde::Serialize;
use tokio::sync::Mutex;

pub struct AppState {
    pub crawler: Crawler,
    pub pool: Pool,
    /// Held for the whole of a run; a second request waits for the first.
    pub running: Mutex<()>,
}

pub type SharedState = Arc<AppState>;

pub struct ServiceError(RunError);

impl From<RunError> for ServiceError {
    fn from(err: RunError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct Body {
            message: String,
        }

        let status = if self.0.is_conflict() {
            StatusCode::CONFLICT
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(Body { message: self.0.to_string() })).into_response()
    }
}

pub async fn new_reviews(State(state): State<SharedState>) -> Result<Json<PersistOutcome>, ServiceError> {
    let _guard = state.running.lock().await;
    log::info!(target: "server", "run started for {}", state.crawler.config().base_url);

    match state.crawler.run(&state.pool).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e) => {
            log::error!(target: "server", "\x1b[31mrun failed: {e}\x1b[0m");
            Err(e.into())
        }
    }
}

pub async fn preview(State(state): State<SharedState>) -> Result<Json<Vec<IdentifiedReview>>, ServiceError> {
    let _guard = state.running.lock().await;
    log::info!(target: "server", "preview started for {}", state.crawler.config().base_url);

    match state.crawler.collect().await {
        Ok(batch) => Ok(Json(batch)),
        Err(e) => {
            log::error!(target: "server", "\x1b[31mpreview failed: {e}\x1b[0m");
            Err(e.into())
        }
    }
}
