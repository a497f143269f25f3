use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::{
    analysis::{self, RequestError},
    api::dtos::{AnalyzeRequest, AnalyzeResponse, ErrorResponse, NewsFeedResponse},
    app_state::AppState,
    feed,
};

pub async fn analyze(State(state): State<AppState>, Json(payload): Json<AnalyzeRequest>) -> Response {
    match analysis::assess(state.search.as_ref(), &state.analyzer, &payload.text).await {
        Ok(report) => (
            StatusCode::OK,
            Json(AnalyzeResponse {
                status: "success".to_string(),
                input: report.input,
                analysis: report.analysis,
            }),
        )
            .into_response(),
        Err(e) => {
            let status = match &e {
                RequestError::EmptyInput | RequestError::Extract(_) => StatusCode::BAD_REQUEST,
                RequestError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            if status.is_server_error() {
                error!(error = %e, "analysis request failed");
            } else {
                info!(error = %e, "analysis request rejected");
            }
            (status, Json(ErrorResponse { error: e.to_string() })).into_response()
        }
    }
}

pub async fn news(State(state): State<AppState>) -> Json<NewsFeedResponse> {
    let articles = state.feed.top_headlines(feed::DEFAULT_MAX_ITEMS).await;
    Json(NewsFeedResponse { articles })
}
