//! RemoveKpiHandler - HR deletes a KPI while its appraisal is in Draft.

use std::sync::Arc;

use crate::domain::appraisal::Appraisal;
use crate::domain::foundation::{CommandMetadata, DomainError, KpiId};
use crate::ports::AppraisalRepository;

use super::apply_logged;
use super::revise_kpi::kpi_not_found;

#[derive(Debug, Clone)]
pub struct RemoveKpiCommand {
    pub kpi_id: KpiId,
}

pub struct RemoveKpiHandler {
    appraisals: Arc<dyn AppraisalRepository>,
}

impl RemoveKpiHandler {
    pub fn new(appraisals: Arc<dyn AppraisalRepository>) -> Self {
        Self { appraisals }
    }

    /// Removes the KPI and returns the owning appraisal.
    pub async fn handle(
        &self,
        cmd: RemoveKpiCommand,
        metadata: CommandMetadata,
    ) -> Result<Appraisal, DomainError> {
        let owner = self
            .appraisals
            .find_kpi(&cmd.kpi_id)
            .await?
            .ok_or_else(|| kpi_not_found(cmd.kpi_id))?
            .appraisal_id();

        let actor = metadata.actor.clone();
        let kpi_id = cmd.kpi_id;
        let change = apply_logged(
            self.appraisals.as_ref(),
            &owner,
            &metadata,
            Box::new(move |appraisal: &mut Appraisal| appraisal.remove_kpi(&actor, kpi_id)),
        )
        .await?;
        Ok(change.appraisal)
    }
}
