//! Persistence seams for proposals and projects.
//!
//! `AppState` carries `Arc<dyn ProposalStore>` and `Arc<dyn ProjectStore>`;
//! production wires both to `PgStore`, tests use the in-memory store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::project::ProjectRow;
use crate::models::proposal::{ProposalFilter, ProposalRow, ProposalStats};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[async_trait]
pub trait ProposalStore: Send + Sync {
    async fn save_proposal(&self, proposal: &ProposalRow) -> Result<(), AppError>;

    /// Inserts every row or none of them. Returns the number inserted.
    async fn import_proposals(&self, proposals: &[ProposalRow]) -> Result<usize, AppError>;

    /// Newest first.
    async fn list_proposals(&self, filter: &ProposalFilter) -> Result<Vec<ProposalRow>, AppError>;

    async fn get_proposal(&self, id: Uuid) -> Result<Option<ProposalRow>, AppError>;

    /// Returns `false` when nothing was deleted.
    async fn delete_proposal(&self, id: Uuid) -> Result<bool, AppError>;

    async fn proposal_stats(&self) -> Result<ProposalStats, AppError>;
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create_project(&self, project: &ProjectRow) -> Result<(), AppError>;

    async fn list_projects(&self) -> Result<Vec<ProjectRow>, AppError>;

    async fn get_project(&self, id: Uuid) -> Result<Option<ProjectRow>, AppError>;

    /// Proposals that referenced the project keep their content and lose the
    /// back-reference. Returns `false` when nothing was deleted.
    async fn delete_project(&self, id: Uuid) -> Result<bool, AppError>;
}
