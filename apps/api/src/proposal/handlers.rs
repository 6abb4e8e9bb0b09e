//! Axum route handlers for the Proposal API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::proposal::{ImportedProposal, ProposalFilter, ProposalRow, ProposalStats};
use crate::proposal::generator::{
    generate_proposal, GeneratedProposal, GenerationDeps, GenerationRequest,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub proposal: GeneratedProposal,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: usize,
}

/// POST /api/generate-proposal
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let deps = GenerationDeps {
        proposals: state.proposals.as_ref(),
        projects: state.projects.as_ref(),
        llm: &state.llm,
        credentials: &state.credentials,
        author: &state.config.proposal_author,
    };

    let proposal = generate_proposal(&deps, request).await?;

    Ok(Json(GenerateResponse {
        success: true,
        proposal,
    }))
}

/// GET /api/proposals
pub async fn handle_list(
    State(state): State<AppState>,
    Query(filter): Query<ProposalFilter>,
) -> Result<Json<Vec<ProposalRow>>, AppError> {
    if filter.limit.is_some_and(|limit| limit < 0) {
        return Err(AppError::Validation(
            "limit deve ser um número não negativo".to_string(),
        ));
    }
    Ok(Json(state.proposals.list_proposals(&filter).await?))
}

/// GET /api/proposals/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProposalRow>, AppError> {
    let proposal = state
        .proposals
        .get_proposal(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Proposal {id} not found")))?;
    Ok(Json(proposal))
}

/// DELETE /api/proposals/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.proposals.delete_proposal(id).await? {
        return Err(AppError::NotFound(format!("Proposal {id} not found")));
    }
    info!("Deleted proposal {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/proposals/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<ProposalStats>, AppError> {
    Ok(Json(state.proposals.proposal_stats().await?))
}

/// GET /api/proposals/export
pub async fn handle_export(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProposalRow>>, AppError> {
    let proposals = state
        .proposals
        .list_proposals(&ProposalFilter::default())
        .await?;
    info!("Exporting {} proposals", proposals.len());
    Ok(Json(proposals))
}

/// POST /api/proposals/import
pub async fn handle_import(
    State(state): State<AppState>,
    Json(records): Json<Vec<ImportedProposal>>,
) -> Result<Json<ImportResponse>, AppError> {
    let rows: Vec<ProposalRow> = records.into_iter().map(ProposalRow::from).collect();
    let imported = state.proposals.import_proposals(&rows).await?;
    info!("Imported {imported} proposals");
    Ok(Json(ImportResponse { imported }))
}
