//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    infrastructure::dto::{
        conversion::ranking_entries,
        http::{ErrorDto, RankingEntryDto, RoundStateDto, SpeedRequest, StartRoundRequest},
    },
    ui::state::AppState,
    usecase::RoundControlError,
};

impl IntoResponse for RoundControlError {
    fn into_response(self) -> Response {
        tracing::info!("Rejected round control request: {}", self);
        let body = ErrorDto {
            error: self.to_string(),
        };
        (StatusCode::CONFLICT, Json(body)).into_response()
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Current round snapshot; the crash point is hidden until the round has ended.
pub async fn get_round_state(State(state): State<Arc<AppState>>) -> Json<RoundStateDto> {
    let snapshot = state.get_round_state_usecase.execute().await;
    Json(snapshot.into())
}

pub async fn start_round(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartRoundRequest>,
) -> Result<Json<RoundStateDto>, RoundControlError> {
    let snapshot = state
        .start_round_usecase
        .execute(request.wager.as_f64(), request.cash_out_target.as_f64())
        .await?;
    Ok(Json(snapshot.into()))
}

pub async fn reset_round(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoundStateDto>, RoundControlError> {
    let snapshot = state.reset_round_usecase.execute().await?;
    Ok(Json(snapshot.into()))
}

pub async fn set_speed(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SpeedRequest>,
) -> Result<Json<RoundStateDto>, RoundControlError> {
    let snapshot = state
        .set_speed_usecase
        .execute(request.speed_factor.as_f64())
        .await?;
    Ok(Json(snapshot.into()))
}

pub async fn get_ranking(State(state): State<Arc<AppState>>) -> Json<Vec<RankingEntryDto>> {
    let ranked = state.get_ranking_usecase.execute().await;
    Json(ranking_entries(&ranked))
}
