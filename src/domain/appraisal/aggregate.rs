//! Appraisal aggregate - one employee's review in one cycle.
//!
//! The aggregate owns its KPI ledger and is the only gate through which the
//! ledger or the status changes. Every command follows the same order:
//! role, ownership, status, payload, completion. Nothing is written until all
//! checks pass, so a failed command leaves the aggregate untouched.

use crate::domain::foundation::{
    Actor, AppraisalId, AppraisalStatus, CycleId, DomainError, ErrorCode, KpiId, Rating, Role,
    StateMachine, Timestamp, UserId,
};

use super::kpi::normalize_text;
use super::transition::{authorize_kpi_authoring, Transition};
use super::{
    gate_final_submission, AppraisalEvent, AppraisalProgress, Kpi, KpiDraft, KpiLedger,
    KpiScoreUpdate, Perspective, WorkflowPolicy,
};

/// Persisted appraisal fields other than KPIs, used when reconstituting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppraisalRecord {
    pub status: AppraisalStatus,
    pub overall_rating: Option<Rating>,
    pub comments: Option<String>,
    pub employee_self_review: Option<String>,
    pub employee_self_rating: Option<Rating>,
    pub rejection_reason: Option<String>,
}

/// The appraisal aggregate root.
#[derive(Debug, Clone, PartialEq)]
pub struct Appraisal {
    id: AppraisalId,
    employee_id: UserId,
    cycle_id: CycleId,
    status: AppraisalStatus,
    overall_rating: Option<Rating>,
    comments: Option<String>,
    employee_self_review: Option<String>,
    employee_self_rating: Option<Rating>,
    rejection_reason: Option<String>,
    kpis: KpiLedger,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Appraisal {
    /// Creates a new appraisal in `Draft` with no KPIs.
    pub fn new(employee_id: UserId, cycle_id: CycleId, comments: Option<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: AppraisalId::new(),
            employee_id,
            cycle_id,
            status: AppraisalStatus::Draft,
            overall_rating: None,
            comments: normalize_text(comments),
            employee_self_review: None,
            employee_self_rating: None,
            rejection_reason: None,
            kpis: KpiLedger::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitutes an appraisal from persisted data.
    pub fn reconstitute(
        id: AppraisalId,
        employee_id: UserId,
        cycle_id: CycleId,
        record: AppraisalRecord,
        kpis: KpiLedger,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            employee_id,
            cycle_id,
            status: record.status,
            overall_rating: record.overall_rating,
            comments: record.comments,
            employee_self_review: record.employee_self_review,
            employee_self_rating: record.employee_self_rating,
            rejection_reason: record.rejection_reason,
            kpis,
            created_at,
            updated_at,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // KPI authoring
    // ───────────────────────────────────────────────────────────────

    /// Adds a KPI. HR only, Draft only.
    pub fn add_kpi(&mut self, actor: &Actor, draft: KpiDraft) -> Result<AppraisalEvent, DomainError> {
        authorize_kpi_authoring(actor, self.status)?;
        let kpi = Kpi::new(self.id, draft)?;
        let kpi_id = kpi.id();
        self.kpis.add(kpi);
        self.touch();
        Ok(AppraisalEvent::KpiAdded {
            appraisal_id: self.id,
            kpi_id,
        })
    }

    /// Replaces a KPI's definition. HR only, Draft only.
    pub fn revise_kpi(
        &mut self,
        actor: &Actor,
        kpi_id: KpiId,
        draft: KpiDraft,
    ) -> Result<AppraisalEvent, DomainError> {
        authorize_kpi_authoring(actor, self.status)?;
        self.kpis.get_mut(kpi_id)?.revise(draft)?;
        self.touch();
        Ok(AppraisalEvent::KpiRevised {
            appraisal_id: self.id,
            kpi_id,
        })
    }

    /// Removes a KPI. HR only, Draft only.
    pub fn remove_kpi(&mut self, actor: &Actor, kpi_id: KpiId) -> Result<AppraisalEvent, DomainError> {
        authorize_kpi_authoring(actor, self.status)?;
        self.kpis.remove(kpi_id)?;
        self.touch();
        Ok(AppraisalEvent::KpiRemoved {
            appraisal_id: self.id,
            kpi_id,
        })
    }

    // ───────────────────────────────────────────────────────────────
    // Transitions
    // ───────────────────────────────────────────────────────────────

    /// HR hands the KPI set to the employee.
    pub fn submit_kpis(
        &mut self,
        actor: &Actor,
        policy: &WorkflowPolicy,
    ) -> Result<AppraisalEvent, DomainError> {
        Transition::SubmitKpis.authorize(actor, &self.employee_id, self.status)?;
        if self.kpis.is_empty() {
            return Err(DomainError::new(
                ErrorCode::NoKpisDefined,
                "At least one KPI is required before submission",
            ));
        }
        policy.check_weights(&self.kpis)?;

        self.advance(AppraisalStatus::KpisSubmitted)?;
        Ok(AppraisalEvent::KpisSubmitted {
            appraisal_id: self.id,
            kpi_count: self.kpis.len(),
        })
    }

    /// The employee accepts the KPIs or sends them back to HR.
    ///
    /// Rejection returns the appraisal to `Draft` with the KPIs intact.
    pub fn respond_to_kpis(
        &mut self,
        actor: &Actor,
        accepted: bool,
        rejection_reason: Option<String>,
    ) -> Result<AppraisalEvent, DomainError> {
        Transition::RespondToKpis.authorize(actor, &self.employee_id, self.status)?;

        if accepted {
            self.advance(AppraisalStatus::KpisRespondedTo)?;
            self.rejection_reason = None;
            Ok(AppraisalEvent::KpisAccepted {
                appraisal_id: self.id,
            })
        } else {
            let reason = normalize_text(rejection_reason);
            self.advance(AppraisalStatus::Draft)?;
            self.rejection_reason = reason.clone();
            Ok(AppraisalEvent::KpisRejected {
                appraisal_id: self.id,
                reason,
            })
        }
    }

    /// The employee scores every KPI and rates themselves.
    pub fn submit_employee_review(
        &mut self,
        actor: &Actor,
        self_review: Option<String>,
        self_rating: f64,
        updates: Vec<KpiScoreUpdate>,
    ) -> Result<AppraisalEvent, DomainError> {
        Transition::SubmitEmployeeReview.authorize(actor, &self.employee_id, self.status)?;
        let self_rating = Rating::for_field("employee_self_rating", self_rating)?;

        let mut kpis = self.kpis.clone();
        kpis.apply_scores(Perspective::Employee, updates)?;
        gate_final_submission(&kpis, Perspective::Employee)?;

        self.advance(AppraisalStatus::EmployeeReviewSubmitted)?;
        self.kpis = kpis;
        self.employee_self_review = normalize_text(self_review);
        self.employee_self_rating = Some(self_rating);
        Ok(AppraisalEvent::EmployeeReviewSubmitted {
            appraisal_id: self.id,
            self_rating: self_rating.value(),
        })
    }

    /// The manager scores every KPI and records the overall rating.
    pub fn submit_hod_review(
        &mut self,
        actor: &Actor,
        overall_rating: f64,
        comments: Option<String>,
        updates: Vec<KpiScoreUpdate>,
    ) -> Result<AppraisalEvent, DomainError> {
        Transition::SubmitHodReview.authorize(actor, &self.employee_id, self.status)?;
        let overall_rating = Rating::for_field("overall_rating", overall_rating)?;

        let mut kpis = self.kpis.clone();
        kpis.apply_scores(Perspective::Manager, updates)?;
        gate_final_submission(&kpis, Perspective::Manager)?;

        self.advance(AppraisalStatus::HodReviewSubmitted)?;
        self.kpis = kpis;
        self.comments = normalize_text(comments);
        self.overall_rating = Some(overall_rating);
        Ok(AppraisalEvent::HodReviewSubmitted {
            appraisal_id: self.id,
            overall_rating: overall_rating.value(),
        })
    }

    fn advance(&mut self, target: AppraisalStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target)?;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    // ───────────────────────────────────────────────────────────────
    // Queries
    // ───────────────────────────────────────────────────────────────

    /// Returns true if `actor` may read this appraisal.
    ///
    /// HR and managers see every appraisal; employees only their own.
    pub fn is_visible_to(&self, actor: &Actor) -> bool {
        match actor.role {
            Role::Employee => actor.id == self.employee_id,
            _ => true,
        }
    }

    pub fn progress(&self) -> AppraisalProgress {
        AppraisalProgress::of(&self.kpis)
    }

    pub fn id(&self) -> AppraisalId {
        self.id
    }

    pub fn employee_id(&self) -> &UserId {
        &self.employee_id
    }

    pub fn cycle_id(&self) -> CycleId {
        self.cycle_id
    }

    pub fn status(&self) -> AppraisalStatus {
        self.status
    }

    pub fn overall_rating(&self) -> Option<Rating> {
        self.overall_rating
    }

    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    pub fn employee_self_review(&self) -> Option<&str> {
        self.employee_self_review.as_deref()
    }

    pub fn employee_self_rating(&self) -> Option<Rating> {
        self.employee_self_rating
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    pub fn kpis(&self) -> &KpiLedger {
        &self.kpis
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}
