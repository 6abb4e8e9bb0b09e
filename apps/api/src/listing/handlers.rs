//! Axum route handler for listing extraction.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::listing::ExtractedProjectData;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub data: ExtractedProjectData,
}

/// POST /api/extract-project-data
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    let data = state.listings.extract(&request.url).await?;
    Ok(Json(ExtractResponse {
        success: true,
        data,
    }))
}
