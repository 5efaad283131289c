//! HTTP route handlers for Axum.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::warn;

use crate::api::types::{ErrorBody, QueryRequest, QueryResponse, StatsResponse, TableResponse};
use crate::error::ServiceError;

use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

pub async fn process_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> ApiResult<QueryResponse> {
    match state.orchestrator.answer_query(&request.query) {
        Ok(outcome) => Ok(Json(QueryResponse::from(outcome))),
        Err(err @ ServiceError::EmptyQuery) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: err.to_string(),
            }),
        )),
        Err(err) => {
            warn!(%err, "query pipeline failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: format!("Error processing query: {err}"),
                }),
            ))
        }
    }
}

pub async fn get_stats(State(state): State<AppState>) -> ApiResult<StatsResponse> {
    Ok(Json(StatsResponse {
        treatment_categories: state.store.treatment_categories(),
        top_side_effects: state.store.top_side_effects(5),
    }))
}

pub async fn get_data(
    Path(data_type): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<TableResponse> {
    let data = match data_type.as_str() {
        "cancer_types" => serde_json::to_value(state.store.cancer_types()),
        "treatments" => serde_json::to_value(state.store.treatments()),
        "side_effects" => serde_json::to_value(state.store.side_effects()),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: "Invalid data type".to_string(),
                }),
            ))
        }
    };
    match data {
        Ok(data) => Ok(Json(TableResponse { data })),
        Err(err) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: err.to_string(),
            }),
        )),
    }
}
