//! AppraisalWorkflow - the single entry point for callers of the core.
//!
//! Bundles every handler over one pair of repositories so the HTTP layer
//! (or any other driver) holds one value instead of a dozen handlers.

use std::sync::Arc;

use crate::domain::appraisal::{Appraisal, AppraisalProgress, Kpi, WorkflowPolicy};
use crate::domain::cycle::AppraisalCycle;
use crate::domain::foundation::{AppraisalId, CommandMetadata, CycleId, DomainError, UserId};
use crate::ports::{AppliedChange, AppraisalRepository, CycleRepository};

use super::handlers::{
    AddKpiCommand, AddKpiHandler, AddKpiResult, CreateAppraisalCommand, CreateAppraisalHandler,
    CreateCycleCommand, CreateCycleHandler, DeleteAppraisalCommand, DeleteAppraisalHandler,
    DeleteCycleCommand, DeleteCycleHandler, GetAppraisalHandler, GetCycleHandler,
    GetProgressHandler, ListAppraisalsHandler, ListCyclesHandler, ListEmployeeAppraisalsHandler,
    ListKpisHandler, RemoveKpiCommand, RemoveKpiHandler, RespondToKpisCommand,
    RespondToKpisHandler, ReviseKpiCommand, ReviseKpiHandler, SubmitEmployeeReviewCommand,
    SubmitEmployeeReviewHandler, SubmitHodReviewCommand, SubmitHodReviewHandler,
    SubmitKpisCommand, SubmitKpisHandler, UpdateCycleCommand, UpdateCycleHandler,
};

/// Facade over all appraisal and cycle handlers.
pub struct AppraisalWorkflow {
    create_appraisal: CreateAppraisalHandler,
    delete_appraisal: DeleteAppraisalHandler,
    add_kpi: AddKpiHandler,
    revise_kpi: ReviseKpiHandler,
    remove_kpi: RemoveKpiHandler,
    submit_kpis: SubmitKpisHandler,
    respond_to_kpis: RespondToKpisHandler,
    submit_employee_review: SubmitEmployeeReviewHandler,
    submit_hod_review: SubmitHodReviewHandler,
    get_appraisal: GetAppraisalHandler,
    list_appraisals: ListAppraisalsHandler,
    list_employee_appraisals: ListEmployeeAppraisalsHandler,
    list_kpis: ListKpisHandler,
    get_progress: GetProgressHandler,
    create_cycle: CreateCycleHandler,
    update_cycle: UpdateCycleHandler,
    delete_cycle: DeleteCycleHandler,
    get_cycle: GetCycleHandler,
    list_cycles: ListCyclesHandler,
}

impl AppraisalWorkflow {
    pub fn new(
        appraisals: Arc<dyn AppraisalRepository>,
        cycles: Arc<dyn CycleRepository>,
        policy: WorkflowPolicy,
    ) -> Self {
        Self {
            create_appraisal: CreateAppraisalHandler::new(appraisals.clone(), cycles.clone()),
            delete_appraisal: DeleteAppraisalHandler::new(appraisals.clone()),
            add_kpi: AddKpiHandler::new(appraisals.clone()),
            revise_kpi: ReviseKpiHandler::new(appraisals.clone()),
            remove_kpi: RemoveKpiHandler::new(appraisals.clone()),
            submit_kpis: SubmitKpisHandler::new(appraisals.clone(), policy),
            respond_to_kpis: RespondToKpisHandler::new(appraisals.clone()),
            submit_employee_review: SubmitEmployeeReviewHandler::new(appraisals.clone()),
            submit_hod_review: SubmitHodReviewHandler::new(appraisals.clone()),
            get_appraisal: GetAppraisalHandler::new(appraisals.clone()),
            list_appraisals: ListAppraisalsHandler::new(appraisals.clone()),
            list_employee_appraisals: ListEmployeeAppraisalsHandler::new(appraisals.clone()),
            list_kpis: ListKpisHandler::new(appraisals.clone()),
            get_progress: GetProgressHandler::new(appraisals.clone()),
            create_cycle: CreateCycleHandler::new(cycles.clone()),
            update_cycle: UpdateCycleHandler::new(cycles.clone()),
            delete_cycle: DeleteCycleHandler::new(cycles.clone(), appraisals),
            get_cycle: GetCycleHandler::new(cycles.clone()),
            list_cycles: ListCyclesHandler::new(cycles),
        }
    }

    // === Appraisal commands ===

    pub async fn create_appraisal(
        &self,
        cmd: CreateAppraisalCommand,
        metadata: CommandMetadata,
    ) -> Result<Appraisal, DomainError> {
        self.create_appraisal.handle(cmd, metadata).await
    }

    pub async fn delete_appraisal(
        &self,
        cmd: DeleteAppraisalCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        self.delete_appraisal.handle(cmd, metadata).await
    }

    pub async fn add_kpi(
        &self,
        cmd: AddKpiCommand,
        metadata: CommandMetadata,
    ) -> Result<AddKpiResult, DomainError> {
        self.add_kpi.handle(cmd, metadata).await
    }

    pub async fn revise_kpi(
        &self,
        cmd: ReviseKpiCommand,
        metadata: CommandMetadata,
    ) -> Result<Kpi, DomainError> {
        self.revise_kpi.handle(cmd, metadata).await
    }

    pub async fn remove_kpi(
        &self,
        cmd: RemoveKpiCommand,
        metadata: CommandMetadata,
    ) -> Result<Appraisal, DomainError> {
        self.remove_kpi.handle(cmd, metadata).await
    }

    pub async fn submit_kpis(
        &self,
        cmd: SubmitKpisCommand,
        metadata: CommandMetadata,
    ) -> Result<AppliedChange, DomainError> {
        self.submit_kpis.handle(cmd, metadata).await
    }

    pub async fn respond_to_kpis(
        &self,
        cmd: RespondToKpisCommand,
        metadata: CommandMetadata,
    ) -> Result<AppliedChange, DomainError> {
        self.respond_to_kpis.handle(cmd, metadata).await
    }

    pub async fn submit_employee_review(
        &self,
        cmd: SubmitEmployeeReviewCommand,
        metadata: CommandMetadata,
    ) -> Result<AppliedChange, DomainError> {
        self.submit_employee_review.handle(cmd, metadata).await
    }

    pub async fn submit_hod_review(
        &self,
        cmd: SubmitHodReviewCommand,
        metadata: CommandMetadata,
    ) -> Result<AppliedChange, DomainError> {
        self.submit_hod_review.handle(cmd, metadata).await
    }

    // === Appraisal queries ===

    pub async fn get_appraisal(
        &self,
        id: AppraisalId,
        metadata: CommandMetadata,
    ) -> Result<Appraisal, DomainError> {
        self.get_appraisal.handle(id, metadata).await
    }

    pub async fn list_appraisals(
        &self,
        metadata: CommandMetadata,
    ) -> Result<Vec<Appraisal>, DomainError> {
        self.list_appraisals.handle(metadata).await
    }

    pub async fn list_employee_appraisals(
        &self,
        employee_id: UserId,
        metadata: CommandMetadata,
    ) -> Result<Vec<Appraisal>, DomainError> {
        self.list_employee_appraisals.handle(employee_id, metadata).await
    }

    pub async fn list_kpis(
        &self,
        appraisal_id: AppraisalId,
        metadata: CommandMetadata,
    ) -> Result<Vec<Kpi>, DomainError> {
        self.list_kpis.handle(appraisal_id, metadata).await
    }

    pub async fn progress(
        &self,
        appraisal_id: AppraisalId,
        metadata: CommandMetadata,
    ) -> Result<AppraisalProgress, DomainError> {
        self.get_progress.handle(appraisal_id, metadata).await
    }

    // === Cycles ===

    pub async fn create_cycle(
        &self,
        cmd: CreateCycleCommand,
        metadata: CommandMetadata,
    ) -> Result<AppraisalCycle, DomainError> {
        self.create_cycle.handle(cmd, metadata).await
    }

    pub async fn update_cycle(
        &self,
        cmd: UpdateCycleCommand,
        metadata: CommandMetadata,
    ) -> Result<AppraisalCycle, DomainError> {
        self.update_cycle.handle(cmd, metadata).await
    }

    pub async fn delete_cycle(
        &self,
        cmd: DeleteCycleCommand,
        metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        self.delete_cycle.handle(cmd, metadata).await
    }

    pub async fn get_cycle(&self, id: CycleId) -> Result<AppraisalCycle, DomainError> {
        self.get_cycle.handle(id).await
    }

    pub async fn list_cycles(&self) -> Result<Vec<AppraisalCycle>, DomainError> {
        self.list_cycles.handle().await
    }
}
