use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::project::ProjectRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CreateProjectRequest {
    fn into_row(self) -> Result<ProjectRow, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(
                "Campo obrigatório ausente: name".to_string(),
            ));
        }
        Ok(ProjectRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: self.description.trim().to_string(),
            created_at: Utc::now(),
        })
    }
}

/// POST /api/projects
pub async fn handle_create(
    State(state): State<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectRow>), AppError> {
    let project = req.into_row()?;
    state.projects.create_project(&project).await?;
    info!("Created project {} ({})", project.id, project.name);
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
pub async fn handle_list(State(state): State<AppState>) -> Result<Json<Vec<ProjectRow>>, AppError> {
    Ok(Json(state.projects.list_projects().await?))
}

/// GET /api/projects/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectRow>, AppError> {
    let project = state
        .projects
        .get_project(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;
    Ok(Json(project))
}

/// DELETE /api/projects/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.projects.delete_project(id).await? {
        return Err(AppError::NotFound(format!("Project {id} not found")));
    }
    info!("Deleted project {id}");
    Ok(StatusCode::NO_CONTENT)
}
