use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::db::Database;
use crate::models::*;

type ApiResult<T> = Result<T, (StatusCode, String)>;

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

fn bad_request(msg: impl Into<String>) -> (StatusCode, String) {
    let msg = msg.into();
    tracing::warn!("Validation error: {}", msg);
    (StatusCode::BAD_REQUEST, msg)
}

fn not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Feature not found".to_string())
}

/// Malformed bodies and unknown statuses are client errors, not 422s.
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(input)| input)
        .map_err(|rejection| bad_request(rejection.body_text()))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Features
// ============================================================

pub async fn list_features(State(db): State<Database>) -> ApiResult<Json<Vec<Feature>>> {
    db.get_all_features().map(Json).map_err(internal_error)
}

pub async fn create_feature(
    State(db): State<Database>,
    body: Result<Json<CreateFeatureInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Feature>)> {
    let input = json_body(body)?;
    if normalize_title(&input.title).is_none() {
        return Err(bad_request("Title is required"));
    }

    let feature = db.create_feature(input).map_err(internal_error)?;
    tracing::info!("Created feature {} ({})", feature.id, feature.title);
    Ok((StatusCode::CREATED, Json(feature)))
}

pub async fn update_feature(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateFeatureInput>, JsonRejection>,
) -> ApiResult<Json<Feature>> {
    let input = json_body(body)?;
    if let Some(title) = &input.title {
        if normalize_title(title).is_none() {
            return Err(bad_request("Title cannot be empty"));
        }
    }

    db.update_feature(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(not_found)
}

pub async fn delete_feature(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if db.delete_feature(id).map_err(internal_error)? {
        tracing::info!("Deleted feature {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}
