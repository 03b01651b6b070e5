//! Facts produced by successful appraisal mutations.

use serde::Serialize;

use crate::domain::foundation::{AppraisalId, AppraisalStatus, KpiId, UserId};

/// What a successful mutation changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppraisalEvent {
    Created {
        appraisal_id: AppraisalId,
        employee_id: UserId,
    },
    KpiAdded {
        appraisal_id: AppraisalId,
        kpi_id: KpiId,
    },
    KpiRevised {
        appraisal_id: AppraisalId,
        kpi_id: KpiId,
    },
    KpiRemoved {
        appraisal_id: AppraisalId,
        kpi_id: KpiId,
    },
    KpisSubmitted {
        appraisal_id: AppraisalId,
        kpi_count: usize,
    },
    KpisAccepted {
        appraisal_id: AppraisalId,
    },
    KpisRejected {
        appraisal_id: AppraisalId,
        reason: Option<String>,
    },
    EmployeeReviewSubmitted {
        appraisal_id: AppraisalId,
        self_rating: f64,
    },
    HodReviewSubmitted {
        appraisal_id: AppraisalId,
        overall_rating: f64,
    },
}

impl AppraisalEvent {
    pub fn appraisal_id(&self) -> AppraisalId {
        match self {
            AppraisalEvent::Created { appraisal_id, .. }
            | AppraisalEvent::KpiAdded { appraisal_id, .. }
            | AppraisalEvent::KpiRevised { appraisal_id, .. }
            | AppraisalEvent::KpiRemoved { appraisal_id, .. }
            | AppraisalEvent::KpisSubmitted { appraisal_id, .. }
            | AppraisalEvent::KpisAccepted { appraisal_id }
            | AppraisalEvent::KpisRejected { appraisal_id, .. }
            | AppraisalEvent::EmployeeReviewSubmitted { appraisal_id, .. }
            | AppraisalEvent::HodReviewSubmitted { appraisal_id, .. } => *appraisal_id,
        }
    }

    /// Event name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            AppraisalEvent::Created { .. } => "appraisal.created",
            AppraisalEvent::KpiAdded { .. } => "appraisal.kpi_added",
            AppraisalEvent::KpiRevised { .. } => "appraisal.kpi_revised",
            AppraisalEvent::KpiRemoved { .. } => "appraisal.kpi_removed",
            AppraisalEvent::KpisSubmitted { .. } => "appraisal.kpis_submitted",
            AppraisalEvent::KpisAccepted { .. } => "appraisal.kpis_accepted",
            AppraisalEvent::KpisRejected { .. } => "appraisal.kpis_rejected",
            AppraisalEvent::EmployeeReviewSubmitted { .. } => "appraisal.employee_review_submitted",
            AppraisalEvent::HodReviewSubmitted { .. } => "appraisal.hod_review_submitted",
        }
    }

    /// Status the appraisal entered, for status-changing events.
    pub fn new_status(&self) -> Option<AppraisalStatus> {
        match self {
            AppraisalEvent::Created { .. } | AppraisalEvent::KpisRejected { .. } => {
                Some(AppraisalStatus::Draft)
            }
            AppraisalEvent::KpisSubmitted { .. } => Some(AppraisalStatus::KpisSubmitted),
            AppraisalEvent::KpisAccepted { .. } => Some(AppraisalStatus::KpisRespondedTo),
            AppraisalEvent::EmployeeReviewSubmitted { .. } => {
                Some(AppraisalStatus::EmployeeReviewSubmitted)
            }
            AppraisalEvent::HodReviewSubmitted { .. } => Some(AppraisalStatus::HodReviewSubmitted),
            AppraisalEvent::KpiAdded { .. }
            | AppraisalEvent::KpiRevised { .. }
            | AppraisalEvent::KpiRemoved { .. } => None,
        }
    }
}
