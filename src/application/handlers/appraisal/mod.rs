//! Appraisal command and query handlers.
//!
//! Every state change is routed through [`AppraisalRepository::apply`], so a
//! handler never holds an appraisal outside the per-appraisal critical
//! section.

mod add_kpi;
mod create_appraisal;
mod delete_appraisal;
mod queries;
mod remove_kpi;
mod respond_to_kpis;
mod revise_kpi;
mod submit_employee_review;
mod submit_hod_review;
mod submit_kpis;

pub use add_kpi::{AddKpiCommand, AddKpiHandler, AddKpiResult};
pub use create_appraisal::{CreateAppraisalCommand, CreateAppraisalHandler};
pub use delete_appraisal::{DeleteAppraisalCommand, DeleteAppraisalHandler};
pub use queries::{
    GetAppraisalHandler, GetProgressHandler, ListAppraisalsHandler, ListEmployeeAppraisalsHandler,
    ListKpisHandler,
};
pub use remove_kpi::{RemoveKpiCommand, RemoveKpiHandler};
pub use respond_to_kpis::{RespondToKpisCommand, RespondToKpisHandler};
pub use revise_kpi::{ReviseKpiCommand, ReviseKpiHandler};
pub use submit_employee_review::{SubmitEmployeeReviewCommand, SubmitEmployeeReviewHandler};
pub use submit_hod_review::{SubmitHodReviewCommand, SubmitHodReviewHandler};
pub use submit_kpis::{SubmitKpisCommand, SubmitKpisHandler};

use tracing::{error, info, warn};

use crate::domain::foundation::{AppraisalId, CommandMetadata, DomainError};
use crate::ports::{AppliedChange, AppraisalMutation, AppraisalRepository};

/// Runs a mutation under the appraisal's lock and logs the outcome.
pub(crate) async fn apply_logged(
    repository: &dyn AppraisalRepository,
    appraisal_id: &AppraisalId,
    metadata: &CommandMetadata,
    mutation: AppraisalMutation,
) -> Result<AppliedChange, DomainError> {
    let correlation_id = metadata.correlation_id();
    match repository.apply(appraisal_id, mutation).await {
        Ok(change) => {
            info!(
                event = change.event.name(),
                appraisal_id = %appraisal_id,
                actor = %metadata.actor.id,
                role = metadata.actor.role.as_str(),
                status = change.appraisal.status().as_str(),
                correlation_id = %correlation_id,
                "Appraisal updated"
            );
            Ok(change)
        }
        Err(err) if err.is_storage() => {
            error!(
                appraisal_id = %appraisal_id,
                correlation_id = %correlation_id,
                error = %err,
                "Appraisal update failed in storage"
            );
            Err(err)
        }
        Err(err) => {
            warn!(
                appraisal_id = %appraisal_id,
                actor = %metadata.actor.id,
                role = metadata.actor.role.as_str(),
                code = %err.code,
                correlation_id = %correlation_id,
                "Appraisal command rejected"
            );
            Err(err)
        }
    }
}
