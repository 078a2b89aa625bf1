//! Persistence for planning application records.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::domain::record::PlanningApplicationRecord;

/// Result of a single dedup-checked insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Inserted,
    Skipped,
}

/// Repository for the `westtamar` table. Append-only: rows are never updated
/// or deleted once written.
#[derive(Clone)]
pub struct PlanningApplicationRepository {
    pool: SqlitePool,
}

impl PlanningApplicationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the `westtamar` table if it does not exist. The unique
    /// constraint on `council_reference` is what lets `insert_if_absent` be a
    /// single atomic statement instead of a check-then-act pair.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS westtamar (
                id INTEGER PRIMARY KEY,
                description TEXT,
                date_scraped TEXT,
                date_received TEXT,
                on_notice_to TEXT,
                address TEXT,
                council_reference TEXT UNIQUE,
                applicant TEXT,
                owner TEXT,
                stage_description TEXT,
                stage_status TEXT,
                document_description TEXT,
                title_reference TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts the record unless a row with the same `council_reference`
    /// already exists. Two malformed items both keyed `"NA"` collide here;
    /// the second one is skipped as a duplicate.
    pub async fn insert_if_absent(
        &self,
        record: &PlanningApplicationRecord,
    ) -> Result<PersistOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO westtamar
                (description, date_scraped, date_received, on_notice_to, address,
                 council_reference, applicant, owner, stage_description,
                 stage_status, document_description, title_reference)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(council_reference) DO NOTHING
            "#,
        )
        .bind(&record.description)
        .bind(&record.date_scraped)
        .bind(&record.date_received)
        .bind(&record.on_notice_to)
        .bind(&record.address)
        .bind(&record.council_reference)
        .bind(&record.applicant)
        .bind(&record.owner)
        .bind(&record.stage_description)
        .bind(&record.stage_status)
        .bind(&record.document_description)
        .bind(&record.title_reference)
        .execute(&self.pool)
        .await?;

        Ok(if result.rows_affected() == 0 {
            PersistOutcome::Skipped
        } else {
            PersistOutcome::Inserted
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database_connection::DatabaseConnection;
    use sqlx::Row;
    use tempfile::tempdir;

    async fn test_repository(dir: &tempfile::TempDir) -> Result<PlanningApplicationRepository> {
        let database_url = format!("sqlite:{}", dir.path().join("test.db").display());
        let db = DatabaseConnection::new(&database_url).await?;
        let repository = PlanningApplicationRepository::new(db.pool().clone());
        repository.ensure_schema().await?;
        Ok(repository)
    }

    fn record(reference: &str) -> PlanningApplicationRecord {
        let mut record = PlanningApplicationRecord::unextracted("2024-08-30");
        record.council_reference = reference.to_string();
        record
    }

    async fn row_count(repository: &PlanningApplicationRepository) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM westtamar")
            .fetch_one(repository.pool())
            .await?;
        Ok(row.get("n"))
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() -> Result<()> {
        let dir = tempdir()?;
        let repository = test_repository(&dir).await?;
        repository.ensure_schema().await?;
        repository.ensure_schema().await?;
        Ok(())
    }

    #[tokio::test]
    async fn inserts_new_record_and_skips_duplicate() -> Result<()> {
        let dir = tempdir()?;
        let repository = test_repository(&dir).await?;

        assert_eq!(
            repository.insert_if_absent(&record("PA 2024/0042")).await?,
            PersistOutcome::Inserted
        );
        assert_eq!(
            repository.insert_if_absent(&record("PA 2024/0042")).await?,
            PersistOutcome::Skipped
        );
        assert_eq!(row_count(&repository).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn distinct_references_both_insert() -> Result<()> {
        let dir = tempdir()?;
        let repository = test_repository(&dir).await?;

        assert_eq!(
            repository.insert_if_absent(&record("PA 1")).await?,
            PersistOutcome::Inserted
        );
        assert_eq!(
            repository.insert_if_absent(&record("PA 2")).await?,
            PersistOutcome::Inserted
        );
        assert_eq!(row_count(&repository).await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn second_all_sentinel_record_is_treated_as_duplicate() -> Result<()> {
        let dir = tempdir()?;
        let repository = test_repository(&dir).await?;

        assert_eq!(
            repository.insert_if_absent(&record("NA")).await?,
            PersistOutcome::Inserted
        );
        assert_eq!(
            repository.insert_if_absent(&record("NA")).await?,
            PersistOutcome::Skipped
        );
        Ok(())
    }
}
