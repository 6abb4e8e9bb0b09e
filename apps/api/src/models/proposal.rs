use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A generated proposal. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRow {
    pub id: Uuid,
    pub client_name: String,
    pub project_description: String,
    pub value: f64,
    pub deadline: String,
    pub additional_points: Option<String>,
    pub custom_prompt: Option<String>,
    /// Model output, annotated with `{b}`/`{i}`/`{u}` markers.
    pub content: String,
    pub author: String,
    /// Resolved provider model identifier.
    pub model: String,
    pub project_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Filters for listing proposals. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalFilter {
    /// Case-insensitive substring match on the client name.
    pub client_name: Option<String>,
    pub project_id: Option<Uuid>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ModelCount {
    pub model: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MonthCount {
    /// `YYYY-MM`
    pub month: String,
    pub count: i64,
}

/// Aggregate view over every stored proposal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalStats {
    pub total: i64,
    pub total_value: f64,
    pub by_model: Vec<ModelCount>,
    /// Newest month first.
    pub by_month: Vec<MonthCount>,
}

/// A previously exported proposal being loaded back in.
///
/// Every import gets a fresh id, so re-importing an export never collides
/// with the rows it came from. A missing timestamp is minted; a missing model
/// is recorded as `unknown`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedProposal {
    pub client_name: String,
    pub project_description: String,
    pub value: f64,
    pub deadline: String,
    pub additional_points: Option<String>,
    pub custom_prompt: Option<String>,
    pub content: String,
    pub author: String,
    pub model: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<ImportedProposal> for ProposalRow {
    fn from(p: ImportedProposal) -> Self {
        ProposalRow {
            id: Uuid::new_v4(),
            client_name: p.client_name,
            project_description: p.project_description,
            value: p.value,
            deadline: p.deadline,
            additional_points: p.additional_points,
            custom_prompt: p.custom_prompt,
            content: p.content,
            author: p.author,
            model: p.model.unwrap_or_else(|| "unknown".to_string()),
            // Project links do not survive an export/import cycle.
            project_id: None,
            created_at: p.created_at.unwrap_or_else(Utc::now),
        }
    }
}
