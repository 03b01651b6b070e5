//! ReviseKpiHandler - HR edits a KPI's definition while its appraisal is in Draft.

use std::sync::Arc;

use crate::domain::appraisal::{Appraisal, Kpi, KpiDraft};
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, KpiId};
use crate::ports::AppraisalRepository;

use super::apply_logged;

#[derive(Debug, Clone)]
pub struct ReviseKpiCommand {
    pub kpi_id: KpiId,
    pub draft: KpiDraft,
}

pub struct ReviseKpiHandler {
    appraisals: Arc<dyn AppraisalRepository>,
}

impl ReviseKpiHandler {
    pub fn new(appraisals: Arc<dyn AppraisalRepository>) -> Self {
        Self { appraisals }
    }

    pub async fn handle(
        &self,
        cmd: ReviseKpiCommand,
        metadata: CommandMetadata,
    ) -> Result<Kpi, DomainError> {
        let owner = self
            .appraisals
            .find_kpi(&cmd.kpi_id)
            .await?
            .ok_or_else(|| kpi_not_found(cmd.kpi_id))?
            .appraisal_id();

        let actor = metadata.actor.clone();
        let kpi_id = cmd.kpi_id;
        let draft = cmd.draft;
        let change = apply_logged(
            self.appraisals.as_ref(),
            &owner,
            &metadata,
            Box::new(move |appraisal: &mut Appraisal| appraisal.revise_kpi(&actor, kpi_id, draft)),
        )
        .await?;

        change
            .appraisal
            .kpis()
            .get(kpi_id)
            .cloned()
            .ok_or_else(|| kpi_not_found(kpi_id))
    }
}

pub(super) fn kpi_not_found(id: KpiId) -> DomainError {
    DomainError::new(ErrorCode::KpiNotFound, format!("KPI not found: {}", id))
}
