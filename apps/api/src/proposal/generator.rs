//! Proposal generation: orchestrates the full generation pipeline.
//!
//! Flow: resolve selected project → compose fields → resolve credential →
//!       build (system, user) payload → LLM generate → persist → return.
//!
//! Nothing reaches the provider until every validation step has passed.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{Credential, CredentialChain, GenerationClient, ModelTier};
use crate::models::proposal::ProposalRow;
use crate::proposal::builder::build_payload;
use crate::proposal::composer::{compose, ProjectContext};
use crate::proposal::markers::MarkerUsage;
use crate::store::{ProjectStore, ProposalStore};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Monetary value as sent by the client: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

/// Request body for proposal generation.
///
/// Required text fields default to empty so that a missing field surfaces as a
/// validation error naming the field, not as a body-decoding failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub project_description: String,
    pub value: Option<AmountInput>,
    #[serde(default)]
    pub deadline: String,
    /// Comma-separated list.
    pub additional_points: Option<String>,
    pub custom_prompt: Option<String>,
    /// Opaque reference into the project store.
    pub project_id: Option<String>,
    pub model_tier: Option<ModelTier>,
    /// Older clients send this flag instead of `modelTier`.
    #[serde(default, rename = "useGPT4")]
    pub use_gpt4: bool,
    pub api_key: Option<Credential>,
}

impl GenerationRequest {
    pub fn tier(&self) -> ModelTier {
        match (self.model_tier, self.use_gpt4) {
            (Some(tier), _) => tier,
            (None, true) => ModelTier::Advanced,
            (None, false) => ModelTier::Standard,
        }
    }
}

/// Pipeline output: the stored proposal plus the bulleted differentiators.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedProposal {
    #[serde(flatten)]
    pub proposal: ProposalRow,
    pub differentiators: Option<String>,
}

/// Collaborators the pipeline needs.
pub struct GenerationDeps<'a> {
    pub proposals: &'a dyn ProposalStore,
    pub projects: &'a dyn ProjectStore,
    pub llm: &'a GenerationClient,
    pub credentials: &'a CredentialChain,
    pub author: &'a str,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full proposal pipeline and persists the result.
///
/// Steps:
/// 1. resolve `projectId` → Option<ProjectContext> (unresolvable is not an error)
/// 2. compose() → ComposedFields (required fields, numeric value)
/// 3. resolve credential: request → process default → baseline
/// 4. build_payload() → (system, user)
/// 5. LLM generate → raw marker-annotated text
/// 6. save to the proposal store, then return
pub async fn generate_proposal(
    deps: &GenerationDeps<'_>,
    request: GenerationRequest,
) -> Result<GeneratedProposal, AppError> {
    // Step 1: Selected project
    let (project_id, project) = resolve_project(deps.projects, request.project_id.as_deref()).await;

    // Step 2: Compose + validate
    let fields = compose(&request, project.as_ref())?;

    // Step 3: Credential
    let credential = deps.credentials.resolve(request.api_key.as_ref()).ok_or_else(|| {
        AppError::Validation(
            "Chave API OpenAI não configurada. Forneça uma chave API para gerar a proposta."
                .to_string(),
        )
    })?;

    // Step 4: Prompt
    let payload = build_payload(&fields, deps.author);
    let tier = request.tier();

    // Step 5: Model call
    info!(
        "Generating proposal for client '{}' (model: {}, project: {:?})",
        fields.client_name(),
        tier.model_id(),
        project_id
    );
    let content = deps
        .llm
        .generate(credential, tier, &payload.system, &payload.user)
        .await?;

    let usage = MarkerUsage::scan(&content);
    if usage.total() == 0 {
        warn!("Generated proposal contains no formatting markers");
    }

    // Step 6: Persist
    let proposal = ProposalRow {
        id: Uuid::new_v4(),
        client_name: fields.client_name().to_string(),
        project_description: request.project_description.trim().to_string(),
        value: fields.value,
        deadline: request.deadline.trim().to_string(),
        additional_points: request.additional_points.clone(),
        custom_prompt: request.custom_prompt.clone(),
        content,
        author: deps.author.to_string(),
        model: tier.model_id().to_string(),
        project_id,
        created_at: Utc::now(),
    };
    deps.proposals.save_proposal(&proposal).await?;

    info!(
        "Stored proposal {} ({} chars, markers b/i/u = {}/{}/{})",
        proposal.id,
        proposal.content.len(),
        usage.bold,
        usage.italic,
        usage.underline
    );

    Ok(GeneratedProposal {
        proposal,
        differentiators: fields.differentiators,
    })
}

/// Looks up the selected project. Any failure degrades to "no project".
async fn resolve_project(
    projects: &dyn ProjectStore,
    raw_id: Option<&str>,
) -> (Option<Uuid>, Option<ProjectContext>) {
    let Some(raw_id) = raw_id.map(str::trim).filter(|s| !s.is_empty()) else {
        return (None, None);
    };

    let Ok(id) = Uuid::parse_str(raw_id) else {
        warn!("Ignoring malformed projectId '{raw_id}'");
        return (None, None);
    };

    match projects.get_project(id).await {
        Ok(Some(row)) => (Some(id), Some(ProjectContext::from(row))),
        Ok(None) => {
            warn!("Project {id} not found; generating without project context");
            (None, None)
        }
        Err(e) => {
            warn!("Project lookup for {id} failed ({e}); generating without project context");
            (None, None)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
