//! Read-side handlers for appraisals and KPIs.
//!
//! HR and managers may read every appraisal. Employees may read only their
//! own; anything else is `Forbidden`.

use std::sync::Arc;

use tracing::debug;

use crate::domain::appraisal::{Appraisal, AppraisalProgress, Kpi};
use crate::domain::foundation::{
    Actor, AppraisalId, CommandMetadata, DomainError, ErrorCode, Role, UserId,
};
use crate::ports::AppraisalRepository;

async fn load_visible(
    appraisals: &dyn AppraisalRepository,
    id: &AppraisalId,
    actor: &Actor,
) -> Result<Appraisal, DomainError> {
    let appraisal = appraisals.find_by_id(id).await?.ok_or_else(|| {
        DomainError::new(
            ErrorCode::AppraisalNotFound,
            format!("Appraisal not found: {}", id),
        )
    })?;
    if !appraisal.is_visible_to(actor) {
        return Err(DomainError::forbidden(
            "Employees may only view their own appraisals",
        ));
    }
    Ok(appraisal)
}

/// Fetches one appraisal with its KPIs.
pub struct GetAppraisalHandler {
    appraisals: Arc<dyn AppraisalRepository>,
}

impl GetAppraisalHandler {
    pub fn new(appraisals: Arc<dyn AppraisalRepository>) -> Self {
        Self { appraisals }
    }

    pub async fn handle(
        &self,
        id: AppraisalId,
        metadata: CommandMetadata,
    ) -> Result<Appraisal, DomainError> {
        debug!(appraisal_id = %id, actor = %metadata.actor.id, "Loading appraisal");
        load_visible(self.appraisals.as_ref(), &id, &metadata.actor).await
    }
}

/// Lists appraisals visible to the caller.
pub struct ListAppraisalsHandler {
    appraisals: Arc<dyn AppraisalRepository>,
}

impl ListAppraisalsHandler {
    pub fn new(appraisals: Arc<dyn AppraisalRepository>) -> Self {
        Self { appraisals }
    }

    /// Employees get their own appraisals, everyone else gets all of them.
    pub async fn handle(&self, metadata: CommandMetadata) -> Result<Vec<Appraisal>, DomainError> {
        debug!(actor = %metadata.actor.id, "Listing appraisals");
        match metadata.actor.role {
            Role::Employee => self.appraisals.list_by_employee(&metadata.actor.id).await,
            Role::Hr | Role::Manager => self.appraisals.list().await,
        }
    }
}

/// Lists the appraisals of one employee.
pub struct ListEmployeeAppraisalsHandler {
    appraisals: Arc<dyn AppraisalRepository>,
}

impl ListEmployeeAppraisalsHandler {
    pub fn new(appraisals: Arc<dyn AppraisalRepository>) -> Self {
        Self { appraisals }
    }

    pub async fn handle(
        &self,
        employee_id: UserId,
        metadata: CommandMetadata,
    ) -> Result<Vec<Appraisal>, DomainError> {
        let actor = &metadata.actor;
        if actor.has_role(Role::Employee) && actor.id != employee_id {
            return Err(DomainError::forbidden(
                "Employees may only view their own appraisals",
            ));
        }
        self.appraisals.list_by_employee(&employee_id).await
    }
}

/// Lists the KPIs of one appraisal in creation order.
pub struct ListKpisHandler {
    appraisals: Arc<dyn AppraisalRepository>,
}

impl ListKpisHandler {
    pub fn new(appraisals: Arc<dyn AppraisalRepository>) -> Self {
        Self { appraisals }
    }

    pub async fn handle(
        &self,
        appraisal_id: AppraisalId,
        metadata: CommandMetadata,
    ) -> Result<Vec<Kpi>, DomainError> {
        let appraisal = load_visible(self.appraisals.as_ref(), &appraisal_id, &metadata.actor).await?;
        Ok(appraisal.kpis().list().to_vec())
    }
}

/// Reports scoring progress for both reviewers.
pub struct GetProgressHandler {
    appraisals: Arc<dyn AppraisalRepository>,
}

impl GetProgressHandler {
    pub fn new(appraisals: Arc<dyn AppraisalRepository>) -> Self {
        Self { appraisals }
    }

    pub async fn handle(
        &self,
        appraisal_id: AppraisalId,
        metadata: CommandMetadata,
    ) -> Result<AppraisalProgress, DomainError> {
        let appraisal = load_visible(self.appraisals.as_ref(), &appraisal_id, &metadata.actor).await?;
        Ok(appraisal.progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::*;

    #[tokio::test]
    async fn employee_lists_only_own_appraisals() {
        let fx = Fixture::new().await;
        fx.create_appraisal("emp-1").await;
        fx.create_appraisal("emp-2").await;
        let handler = ListAppraisalsHandler::new(fx.appraisals.clone());

        let own = handler.handle(as_employee("emp-1")).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].employee_id().as_str(), "emp-1");

        let all = handler.handle(as_hr()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn employee_cannot_read_someone_elses_appraisal() {
        let fx = Fixture::new().await;
        let id = fx.create_appraisal("emp-1").await;

        let err = GetAppraisalHandler::new(fx.appraisals.clone())
            .handle(id, as_employee("emp-2"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let err = ListEmployeeAppraisalsHandler::new(fx.appraisals.clone())
            .handle(user("emp-1"), as_employee("emp-2"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn kpis_are_listed_in_creation_order() {
        let fx = Fixture::new().await;
        let id = fx.create_appraisal("emp-1").await;
        let created = fx.add_kpis(id, &[10.0, 20.0, 70.0]).await;

        let kpis = ListKpisHandler::new(fx.appraisals.clone())
            .handle(id, as_manager())
            .await
            .unwrap();
        let ids: Vec<_> = kpis.iter().map(|k| k.id()).collect();
        assert_eq!(ids, created);
    }

    #[tokio::test]
    async fn progress_reflects_scores() {
        let fx = Fixture::new().await;
        let id = fx.create_appraisal("emp-1").await;
        let kpis = fx.add_kpis(id, &[60.0, 40.0]).await;
        fx.reach_employee_review(id, "emp-1", &kpis).await;

        let progress = GetProgressHandler::new(fx.appraisals.clone())
            .handle(id, as_employee("emp-1"))
            .await
            .unwrap();
        assert_eq!(progress.employee_completion.value(), 100);
        assert_eq!(progress.manager_completion.value(), 0);
        assert_eq!(progress.employee_weighted_score.unwrap().value(), 4.0);
    }

    #[tokio::test]
    async fn missing_appraisal_is_not_found() {
        let fx = Fixture::new().await;
        let err = GetAppraisalHandler::new(fx.appraisals.clone())
            .handle(AppraisalId::new(), as_hr())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AppraisalNotFound);
    }
}
