//! PostgreSQL implementation of AppraisalRepository.
//!
//! An appraisal row and its KPI rows are written in one transaction. `apply`
//! takes a row lock with `SELECT ... FOR UPDATE`, so concurrent commands on
//! the same appraisal run one after another and the loser sees the winner's
//! status.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::domain::appraisal::{Appraisal, AppraisalRecord, Kpi, KpiLedger, KpiScores};
use crate::domain::foundation::{
    AppraisalId, AppraisalStatus, CycleId, DomainError, ErrorCode, KpiId, Rating, Timestamp,
    UserId, Weight,
};
use crate::ports::{AppliedChange, AppraisalMutation, AppraisalRepository};

use super::db_error;

const APPRAISAL_COLUMNS: &str = r#"
    id, employee_id, cycle_id, status, overall_rating, comments,
    employee_self_review, employee_self_rating, rejection_reason,
    created_at, updated_at
"#;

const KPI_COLUMNS: &str = r#"
    id, appraisal_id, title, description, target, weight,
    employee_score, hod_score, employee_comment, hod_comment, created_at
"#;

/// PostgreSQL implementation of AppraisalRepository.
#[derive(Clone)]
pub struct PostgresAppraisalRepository {
    pool: PgPool,
}

impl PostgresAppraisalRepository {
    /// Creates a new PostgresAppraisalRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_all(&self, rows: Vec<sqlx::postgres::PgRow>) -> Result<Vec<Appraisal>, DomainError> {
        let mut appraisals = Vec::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row.get("id");
            let kpis = load_kpis(&self.pool, &AppraisalId::from_uuid(id)).await?;
            appraisals.push(row_to_appraisal(row, kpis)?);
        }
        Ok(appraisals)
    }
}

fn not_found(id: &AppraisalId) -> DomainError {
    DomainError::new(
        ErrorCode::AppraisalNotFound,
        format!("Appraisal not found: {}", id),
    )
}

#[async_trait]
impl AppraisalRepository for PostgresAppraisalRepository {
    async fn save(&self, appraisal: &Appraisal) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        sqlx::query(
            r#"
            INSERT INTO appraisals (
                id, employee_id, cycle_id, status, overall_rating, comments,
                employee_self_review, employee_self_rating, rejection_reason,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(appraisal.id().as_uuid())
        .bind(appraisal.employee_id().as_str())
        .bind(appraisal.cycle_id().as_uuid())
        .bind(appraisal.status().as_str())
        .bind(appraisal.overall_rating().map(|r| r.value()))
        .bind(appraisal.comments())
        .bind(appraisal.employee_self_review())
        .bind(appraisal.employee_self_rating().map(|r| r.value()))
        .bind(appraisal.rejection_reason())
        .bind(appraisal.created_at().as_datetime())
        .bind(appraisal.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            let db = e.as_database_error();
            if db.is_some_and(|db| db.is_unique_violation()) {
                return DomainError::new(
                    ErrorCode::DuplicateAppraisal,
                    "Employee already has an appraisal in this cycle",
                )
                .with_detail("employee_id", appraisal.employee_id().as_str())
                .with_detail("cycle_id", appraisal.cycle_id().to_string());
            }
            if db.is_some_and(|db| db.is_foreign_key_violation()) {
                return DomainError::new(
                    ErrorCode::CycleNotFound,
                    format!("Cycle not found: {}", appraisal.cycle_id()),
                );
            }
            db_error("insert appraisal")(e)
        })?;

        insert_kpis(&mut tx, appraisal).await?;

        tx.commit().await.map_err(db_error("commit transaction"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &AppraisalId) -> Result<Option<Appraisal>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM appraisals WHERE id = $1",
            APPRAISAL_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch appraisal"))?;

        match row {
            Some(row) => {
                let kpis = load_kpis(&self.pool, id).await?;
                Ok(Some(row_to_appraisal(row, kpis)?))
            }
            None => Ok(None),
        }
    }

    async fn find_by_employee_and_cycle(
        &self,
        employee_id: &UserId,
        cycle_id: &CycleId,
    ) -> Result<Option<Appraisal>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM appraisals WHERE employee_id = $1 AND cycle_id = $2",
            APPRAISAL_COLUMNS
        ))
        .bind(employee_id.as_str())
        .bind(cycle_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch appraisal"))?;

        Ok(self.load_all(rows).await?.into_iter().next())
    }

    async fn list(&self) -> Result<Vec<Appraisal>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM appraisals ORDER BY created_at DESC",
            APPRAISAL_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list appraisals"))?;

        self.load_all(rows).await
    }

    async fn list_by_employee(&self, employee_id: &UserId) -> Result<Vec<Appraisal>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM appraisals WHERE employee_id = $1 ORDER BY created_at DESC",
            APPRAISAL_COLUMNS
        ))
        .bind(employee_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list appraisals"))?;

        self.load_all(rows).await
    }

    async fn count_by_cycle(&self, cycle_id: &CycleId) -> Result<u64, DomainError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM appraisals WHERE cycle_id = $1")
            .bind(cycle_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("count appraisals"))?;

        Ok(count.max(0) as u64)
    }

    async fn find_kpi(&self, kpi_id: &KpiId) -> Result<Option<Kpi>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM kpis WHERE id = $1", KPI_COLUMNS))
            .bind(kpi_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch KPI"))?;

        row.map(row_to_kpi).transpose()
    }

    async fn apply(
        &self,
        id: &AppraisalId,
        mutation: AppraisalMutation,
    ) -> Result<AppliedChange, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        let row = sqlx::query(&format!(
            "SELECT {} FROM appraisals WHERE id = $1 FOR UPDATE",
            APPRAISAL_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("lock appraisal"))?
        .ok_or_else(|| not_found(id))?;

        let kpi_rows = sqlx::query(&format!(
            "SELECT {} FROM kpis WHERE appraisal_id = $1 ORDER BY position",
            KPI_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error("fetch KPIs"))?;
        let kpis = kpi_rows
            .into_iter()
            .map(row_to_kpi)
            .collect::<Result<Vec<_>, _>>()?;

        let mut appraisal = row_to_appraisal(row, kpis)?;
        // Dropping the transaction on error rolls it back.
        let event = mutation(&mut appraisal)?;

        sqlx::query(
            r#"
            UPDATE appraisals SET
                status = $2,
                overall_rating = $3,
                comments = $4,
                employee_self_review = $5,
                employee_self_rating = $6,
                rejection_reason = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(appraisal.id().as_uuid())
        .bind(appraisal.status().as_str())
        .bind(appraisal.overall_rating().map(|r| r.value()))
        .bind(appraisal.comments())
        .bind(appraisal.employee_self_review())
        .bind(appraisal.employee_self_rating().map(|r| r.value()))
        .bind(appraisal.rejection_reason())
        .bind(appraisal.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("update appraisal"))?;

        sqlx::query("DELETE FROM kpis WHERE appraisal_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error("clear KPIs"))?;
        insert_kpis(&mut tx, &appraisal).await?;

        tx.commit().await.map_err(db_error("commit transaction"))?;

        Ok(AppliedChange { appraisal, event })
    }

    async fn delete(&self, id: &AppraisalId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM appraisals WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete appraisal"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

async fn insert_kpis(
    tx: &mut Transaction<'_, Postgres>,
    appraisal: &Appraisal,
) -> Result<(), DomainError> {
    for (position, kpi) in appraisal.kpis().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO kpis (
                id, appraisal_id, position, title, description, target, weight,
                employee_score, hod_score, employee_comment, hod_comment, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(kpi.id().as_uuid())
        .bind(appraisal.id().as_uuid())
        .bind(position as i32)
        .bind(kpi.title())
        .bind(kpi.description())
        .bind(kpi.target())
        .bind(kpi.weight().value())
        .bind(kpi.employee_score().map(|r| r.value()))
        .bind(kpi.hod_score().map(|r| r.value()))
        .bind(kpi.employee_comment())
        .bind(kpi.hod_comment())
        .bind(kpi.created_at().as_datetime())
        .execute(&mut **tx)
        .await
        .map_err(db_error("insert KPI"))?;
    }
    Ok(())
}

async fn load_kpis(pool: &PgPool, appraisal_id: &AppraisalId) -> Result<Vec<Kpi>, DomainError> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM kpis WHERE appraisal_id = $1 ORDER BY position",
        KPI_COLUMNS
    ))
    .bind(appraisal_id.as_uuid())
    .fetch_all(pool)
    .await
    .map_err(db_error("fetch KPIs"))?;

    rows.into_iter().map(row_to_kpi).collect()
}

fn corrupt(what: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Stored {} is invalid: {}", what, e),
    )
}

fn stored_rating(what: &str, value: Option<f64>) -> Result<Option<Rating>, DomainError> {
    value
        .map(Rating::try_new)
        .transpose()
        .map_err(|e| corrupt(what, e))
}

fn stored_status(value: &str) -> Result<AppraisalStatus, DomainError> {
    value
        .parse::<AppraisalStatus>()
        .map_err(|e| corrupt("status", e))
}

fn stored_weight(value: f64) -> Result<Weight, DomainError> {
    Weight::try_new(value).map_err(|e| corrupt("weight", e))
}

fn row_to_appraisal(row: sqlx::postgres::PgRow, kpis: Vec<Kpi>) -> Result<Appraisal, DomainError> {
    let id: Uuid = row.get("id");
    let employee_id: String = row.get("employee_id");
    let cycle_id: Uuid = row.get("cycle_id");
    let status: String = row.get("status");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    let record = AppraisalRecord {
        status: stored_status(&status)?,
        overall_rating: stored_rating("overall_rating", row.get("overall_rating"))?,
        comments: row.get("comments"),
        employee_self_review: row.get("employee_self_review"),
        employee_self_rating: stored_rating("employee_self_rating", row.get("employee_self_rating"))?,
        rejection_reason: row.get("rejection_reason"),
    };

    Ok(Appraisal::reconstitute(
        AppraisalId::from_uuid(id),
        UserId::new(employee_id).map_err(|e| corrupt("employee_id", e))?,
        CycleId::from_uuid(cycle_id),
        record,
        KpiLedger::from_kpis(kpis),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}

fn row_to_kpi(row: sqlx::postgres::PgRow) -> Result<Kpi, DomainError> {
    let id: Uuid = row.get("id");
    let appraisal_id: Uuid = row.get("appraisal_id");
    let weight: f64 = row.get("weight");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    let scores = KpiScores {
        employee_score: stored_rating("employee_score", row.get("employee_score"))?,
        hod_score: stored_rating("hod_score", row.get("hod_score"))?,
        employee_comment: row.get("employee_comment"),
        hod_comment: row.get("hod_comment"),
    };

    Ok(Kpi::reconstitute(
        KpiId::from_uuid(id),
        AppraisalId::from_uuid(appraisal_id),
        row.get("title"),
        row.get("description"),
        row.get("target"),
        stored_weight(weight)?,
        scores,
        Timestamp::from_datetime(created_at),
    ))
}
