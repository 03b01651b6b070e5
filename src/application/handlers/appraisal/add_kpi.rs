//! AddKpiHandler - HR attaches a KPI to an appraisal still in Draft.

use std::sync::Arc;

use crate::domain::appraisal::{Appraisal, AppraisalEvent, Kpi, KpiDraft};
use crate::domain::foundation::{AppraisalId, CommandMetadata, DomainError};
use crate::ports::AppraisalRepository;

use super::apply_logged;

#[derive(Debug, Clone)]
pub struct AddKpiCommand {
    pub appraisal_id: AppraisalId,
    pub draft: KpiDraft,
}

/// The created KPI and the appraisal that now owns it.
#[derive(Debug, Clone)]
pub struct AddKpiResult {
    pub appraisal: Appraisal,
    pub kpi: Kpi,
}

pub struct AddKpiHandler {
    appraisals: Arc<dyn AppraisalRepository>,
}

impl AddKpiHandler {
    pub fn new(appraisals: Arc<dyn AppraisalRepository>) -> Self {
        Self { appraisals }
    }

    pub async fn handle(
        &self,
        cmd: AddKpiCommand,
        metadata: CommandMetadata,
    ) -> Result<AddKpiResult, DomainError> {
        let actor = metadata.actor.clone();
        let draft = cmd.draft;
        let change = apply_logged(
            self.appraisals.as_ref(),
            &cmd.appraisal_id,
            &metadata,
            Box::new(move |appraisal: &mut Appraisal| appraisal.add_kpi(&actor, draft)),
        )
        .await?;

        let kpi = match change.event {
            AppraisalEvent::KpiAdded { kpi_id, .. } => change.appraisal.kpis().get(kpi_id).cloned(),
            _ => None,
        }
        .ok_or_else(|| DomainError::internal("Added KPI missing from ledger"))?;

        Ok(AddKpiResult {
            appraisal: change.appraisal,
            kpi,
        })
    }
}
