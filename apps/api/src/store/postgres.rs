use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::project::ProjectRow;
use crate::models::proposal::{ModelCount, MonthCount, ProposalFilter, ProposalRow, ProposalStats};
use crate::store::{ProjectStore, ProposalStore};

/// PostgreSQL-backed store. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn insert_proposal(p: &ProposalRow) -> Query<'_, Postgres, PgArguments> {
    sqlx::query(
        r#"
        INSERT INTO proposals
            (id, client_name, project_description, value, deadline, additional_points,
             custom_prompt, content, author, model, project_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(p.id)
    .bind(&p.client_name)
    .bind(&p.project_description)
    .bind(p.value)
    .bind(&p.deadline)
    .bind(&p.additional_points)
    .bind(&p.custom_prompt)
    .bind(&p.content)
    .bind(&p.author)
    .bind(&p.model)
    .bind(p.project_id)
    .bind(p.created_at)
}

/// Escapes `LIKE` wildcards so the client-name filter matches literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl ProposalStore for PgStore {
    async fn save_proposal(&self, p: &ProposalRow) -> Result<(), AppError> {
        insert_proposal(p).execute(&self.pool).await?;
        Ok(())
    }

    async fn import_proposals(&self, proposals: &[ProposalRow]) -> Result<usize, AppError> {
        let mut tx = self.pool.begin().await?;
        for p in proposals {
            insert_proposal(p).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(proposals.len())
    }

    async fn list_proposals(&self, filter: &ProposalFilter) -> Result<Vec<ProposalRow>, AppError> {
        let rows = sqlx::query_as::<_, ProposalRow>(
            r#"
            SELECT * FROM proposals
            WHERE ($1::text IS NULL OR client_name ILIKE '%' || $1 || '%' ESCAPE '\')
              AND ($2::uuid IS NULL OR project_id = $2)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(filter.client_name.as_deref().map(escape_like))
        .bind(filter.project_id)
        .bind(filter.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_proposal(&self, id: Uuid) -> Result<Option<ProposalRow>, AppError> {
        let row = sqlx::query_as::<_, ProposalRow>("SELECT * FROM proposals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_proposal(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM proposals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn proposal_stats(&self) -> Result<ProposalStats, AppError> {
        let (total, total_value): (i64, Option<f64>) =
            sqlx::query_as("SELECT COUNT(*), SUM(value) FROM proposals")
                .fetch_one(&self.pool)
                .await?;

        let by_model = sqlx::query_as::<_, ModelCount>(
            "SELECT model, COUNT(*) AS count FROM proposals GROUP BY model ORDER BY model",
        )
        .fetch_all(&self.pool)
        .await?;

        let by_month = sqlx::query_as::<_, MonthCount>(
            r#"
            SELECT to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM') AS month, COUNT(*) AS count
            FROM proposals
            GROUP BY month
            ORDER BY month DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(ProposalStats {
            total,
            total_value: total_value.unwrap_or(0.0),
            by_model,
            by_month,
        })
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn create_project(&self, project: &ProjectRow) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO projects (id, name, description, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(project.id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRow>, AppError> {
        let rows =
            sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<ProjectRow>, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, AppError> {
        // proposals.project_id is ON DELETE SET NULL
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_neutralises_wildcards() {
        assert_eq!(escape_like("Ana"), "Ana");
        assert_eq!(escape_like("100%_off"), "100\\%\\_off");
        assert_eq!(escape_like(r"a\b"), r"a\\b");
    }
}
