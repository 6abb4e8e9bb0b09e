//! In-memory store used by tests in place of PostgreSQL.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::project::ProjectRow;
use crate::models::proposal::{ModelCount, MonthCount, ProposalFilter, ProposalRow, ProposalStats};
use crate::store::{ProjectStore, ProposalStore};

#[derive(Default)]
pub struct MemoryStore {
    proposals: RwLock<Vec<ProposalRow>>,
    projects: RwLock<Vec<ProjectRow>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn proposal_count(&self) -> usize {
        self.proposals.read().await.len()
    }
}

/// Mirrors the primary-key constraint on `proposals.id`.
fn reject_duplicate(proposals: &[ProposalRow], id: Uuid) -> Result<(), AppError> {
    if proposals.iter().any(|p| p.id == id) {
        return Err(AppError::Internal(anyhow::anyhow!(
            "duplicate key value violates unique constraint on proposals.id ({id})"
        )));
    }
    Ok(())
}

#[async_trait]
impl ProposalStore for MemoryStore {
    async fn save_proposal(&self, proposal: &ProposalRow) -> Result<(), AppError> {
        let mut proposals = self.proposals.write().await;
        reject_duplicate(&proposals, proposal.id)?;
        proposals.push(proposal.clone());
        Ok(())
    }

    async fn import_proposals(&self, incoming: &[ProposalRow]) -> Result<usize, AppError> {
        let mut proposals = self.proposals.write().await;
        let mut staged = proposals.clone();
        for proposal in incoming {
            reject_duplicate(&staged, proposal.id)?;
            staged.push(proposal.clone());
        }
        *proposals = staged;
        Ok(incoming.len())
    }

    async fn list_proposals(&self, filter: &ProposalFilter) -> Result<Vec<ProposalRow>, AppError> {
        let needle = filter.client_name.as_ref().map(|n| n.to_lowercase());
        let mut rows: Vec<ProposalRow> = self
            .proposals
            .read()
            .await
            .iter()
            .filter(|p| {
                needle
                    .as_ref()
                    .map_or(true, |n| p.client_name.to_lowercase().contains(n))
            })
            .filter(|p| filter.project_id.map_or(true, |id| p.project_id == Some(id)))
            .cloned()
            .collect();

        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = filter.limit {
            rows.truncate(limit.max(0) as usize);
        }
        Ok(rows)
    }

    async fn get_proposal(&self, id: Uuid) -> Result<Option<ProposalRow>, AppError> {
        Ok(self.proposals.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn delete_proposal(&self, id: Uuid) -> Result<bool, AppError> {
        let mut proposals = self.proposals.write().await;
        let before = proposals.len();
        proposals.retain(|p| p.id != id);
        Ok(proposals.len() < before)
    }

    async fn proposal_stats(&self) -> Result<ProposalStats, AppError> {
        let proposals = self.proposals.read().await;

        let mut by_model: BTreeMap<String, i64> = BTreeMap::new();
        let mut by_month: BTreeMap<String, i64> = BTreeMap::new();
        for p in proposals.iter() {
            *by_model.entry(p.model.clone()).or_default() += 1;
            *by_month
                .entry(p.created_at.format("%Y-%m").to_string())
                .or_default() += 1;
        }

        Ok(ProposalStats {
            total: proposals.len() as i64,
            total_value: proposals.iter().map(|p| p.value).sum(),
            by_model: by_model
                .into_iter()
                .map(|(model, count)| ModelCount { model, count })
                .collect(),
            by_month: by_month
                .into_iter()
                .rev()
                .map(|(month, count)| MonthCount { month, count })
                .collect(),
        })
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create_project(&self, project: &ProjectRow) -> Result<(), AppError> {
        self.projects.write().await.push(project.clone());
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRow>, AppError> {
        let mut rows = self.projects.read().await.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<ProjectRow>, AppError> {
        Ok(self.projects.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, AppError> {
        let mut projects = self.projects.write().await;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        let deleted = projects.len() < before;

        if deleted {
            for proposal in self.proposals.write().await.iter_mut() {
                if proposal.project_id == Some(id) {
                    proposal.project_id = None;
                }
            }
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn proposal(client: &str, model: &str, value: f64, days_ago: i64) -> ProposalRow {
        ProposalRow {
            id: Uuid::new_v4(),
            client_name: client.to_string(),
            project_description: "Landing page".to_string(),
            value,
            deadline: "7 dias".to_string(),
            additional_points: Some("SEO, responsivo".to_string()),
            custom_prompt: None,
            content: "{b}Prezado Sr. Carlos{/b}".to_string(),
            author: "Rivaldo Silveira".to_string(),
            model: model.to_string(),
            project_id: None,
            created_at: Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
                - Duration::days(days_ago),
        }
    }

    #[tokio::test]
    async fn test_saved_proposal_round_trips_by_id() {
        let store = MemoryStore::new();
        let original = proposal("Carlos", "gpt-4", 1500.5, 0);
        store.save_proposal(&original).await.unwrap();

        let fetched = store.get_proposal(original.id).await.unwrap().unwrap();
        assert_eq!(fetched, original);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_filters() {
        let store = MemoryStore::new();
        store.save_proposal(&proposal("Carlos Lima", "gpt-4", 100.0, 10)).await.unwrap();
        store.save_proposal(&proposal("Ana", "gpt-4", 200.0, 1)).await.unwrap();
        store.save_proposal(&proposal("carlos souza", "gpt-3.5-turbo", 300.0, 5)).await.unwrap();

        let all = store.list_proposals(&ProposalFilter::default()).await.unwrap();
        let clients: Vec<&str> = all.iter().map(|p| p.client_name.as_str()).collect();
        assert_eq!(clients, vec!["Ana", "carlos souza", "Carlos Lima"]);

        let filter = ProposalFilter {
            client_name: Some("CARLOS".to_string()),
            limit: Some(1),
            ..Default::default()
        };
        let carlos = store.list_proposals(&filter).await.unwrap();
        assert_eq!(carlos.len(), 1);
        assert_eq!(carlos[0].client_name, "carlos souza");
    }

    #[tokio::test]
    async fn test_delete_reports_whether_anything_was_removed() {
        let store = MemoryStore::new();
        let p = proposal("Ana", "gpt-4", 100.0, 0);
        store.save_proposal(&p).await.unwrap();

        assert!(store.delete_proposal(p.id).await.unwrap());
        assert!(!store.delete_proposal(p.id).await.unwrap());
        assert!(store.get_proposal(p.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stats_aggregate_by_model_and_month() {
        let store = MemoryStore::new();
        store.save_proposal(&proposal("A", "gpt-4", 100.0, 0)).await.unwrap();
        store.save_proposal(&proposal("B", "gpt-4", 250.5, 1)).await.unwrap();
        store.save_proposal(&proposal("C", "gpt-3.5-turbo", 49.5, 30)).await.unwrap();

        let stats = store.proposal_stats().await.unwrap();
        assert_eq!(stats.total, 3);
        assert!((stats.total_value - 400.0).abs() < f64::EPSILON);
        assert_eq!(
            stats.by_model,
            vec![
                ModelCount { model: "gpt-3.5-turbo".to_string(), count: 1 },
                ModelCount { model: "gpt-4".to_string(), count: 2 },
            ]
        );
        assert_eq!(stats.by_month[0], MonthCount { month: "2026-03".to_string(), count: 2 });
        assert_eq!(stats.by_month[1], MonthCount { month: "2026-02".to_string(), count: 1 });
    }

    #[tokio::test]
    async fn test_deleting_project_clears_back_reference() {
        let store = MemoryStore::new();
        let project = ProjectRow {
            id: Uuid::new_v4(),
            name: "ERP".to_string(),
            description: "Sistema de gestão".to_string(),
            created_at: Utc::now(),
        };
        store.create_project(&project).await.unwrap();

        let mut p = proposal("Ana", "gpt-4", 100.0, 0);
        p.project_id = Some(project.id);
        store.save_proposal(&p).await.unwrap();

        assert!(store.delete_project(project.id).await.unwrap());
        let fetched = store.get_proposal(p.id).await.unwrap().unwrap();
        assert!(fetched.project_id.is_none());
        assert_eq!(fetched.content, p.content);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let store = MemoryStore::new();
        let row = proposal("Carlos", "gpt-4", 100.0, 0);
        store.save_proposal(&row).await.unwrap();

        assert!(store.save_proposal(&row).await.is_err());
        assert_eq!(store.proposal_count().await, 1);
    }

    #[tokio::test]
    async fn test_import_is_all_or_nothing() {
        let store = MemoryStore::new();
        let existing = proposal("Carlos", "gpt-4", 100.0, 0);
        store.save_proposal(&existing).await.unwrap();

        let batch = vec![proposal("Diana", "gpt-4", 200.0, 1), existing.clone()];
        assert!(store.import_proposals(&batch).await.is_err());
        assert_eq!(store.proposal_count().await, 1);

        let batch = vec![
            proposal("Diana", "gpt-4", 200.0, 1),
            proposal("Edu", "gpt-3.5-turbo", 300.0, 2),
        ];
        assert_eq!(store.import_proposals(&batch).await.unwrap(), 2);
        assert_eq!(store.proposal_count().await, 3);
    }
}
