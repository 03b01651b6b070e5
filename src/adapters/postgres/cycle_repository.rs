//! PostgreSQL implementation of CycleRepository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::cycle::{AppraisalCycle, CycleDetails};
use crate::domain::foundation::{CycleId, DomainError, ErrorCode, Timestamp};
use crate::ports::CycleRepository;

use super::db_error;

/// PostgreSQL implementation of CycleRepository.
#[derive(Clone)]
pub struct PostgresCycleRepository {
    pool: PgPool,
}

impl PostgresCycleRepository {
    /// Creates a new PostgresCycleRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn not_found(id: &CycleId) -> DomainError {
    DomainError::new(ErrorCode::CycleNotFound, format!("Cycle not found: {}", id))
}

#[async_trait]
impl CycleRepository for PostgresCycleRepository {
    async fn save(&self, cycle: &AppraisalCycle) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO appraisal_cycles (
                id, name, start_date, end_date, is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(cycle.id().as_uuid())
        .bind(cycle.name())
        .bind(cycle.start_date())
        .bind(cycle.end_date())
        .bind(cycle.is_active())
        .bind(cycle.created_at().as_datetime())
        .bind(cycle.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert cycle"))?;

        Ok(())
    }

    async fn update(&self, cycle: &AppraisalCycle) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE appraisal_cycles SET
                name = $2,
                start_date = $3,
                end_date = $4,
                is_active = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(cycle.id().as_uuid())
        .bind(cycle.name())
        .bind(cycle.start_date())
        .bind(cycle.end_date())
        .bind(cycle.is_active())
        .bind(cycle.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update cycle"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(&cycle.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &CycleId) -> Result<Option<AppraisalCycle>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, start_date, end_date, is_active, created_at, updated_at
            FROM appraisal_cycles WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch cycle"))?;

        Ok(row.map(row_to_cycle))
    }

    async fn list(&self) -> Result<Vec<AppraisalCycle>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, start_date, end_date, is_active, created_at, updated_at
            FROM appraisal_cycles
            ORDER BY start_date DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list cycles"))?;

        Ok(rows.into_iter().map(row_to_cycle).collect())
    }

    async fn delete(&self, id: &CycleId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM appraisal_cycles WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                // Appraisals reference cycles without cascading.
                if e.as_database_error()
                    .is_some_and(|db| db.is_foreign_key_violation())
                {
                    return DomainError::new(
                        ErrorCode::CycleInUse,
                        "Cycle is referenced by existing appraisals",
                    );
                }
                db_error("delete cycle")(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn row_to_cycle(row: sqlx::postgres::PgRow) -> AppraisalCycle {
    let id: Uuid = row.get("id");
    let start_date: NaiveDate = row.get("start_date");
    let end_date: NaiveDate = row.get("end_date");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    AppraisalCycle::reconstitute(
        CycleId::from_uuid(id),
        CycleDetails {
            name: row.get("name"),
            start_date,
            end_date,
            is_active: row.get("is_active"),
        },
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    )
}
