//! Role and status gates for appraisal transitions.
//!
//! Every gate checks the actor's role first, then ownership where it
//! applies, then the current status. A caller therefore sees exactly one
//! error and `Forbidden` always wins over `PreconditionFailed`.

use std::fmt;

use crate::domain::foundation::{Actor, AppraisalStatus, DomainError, ErrorCode, Role, UserId};

/// The four workflow transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    SubmitKpis,
    RespondToKpis,
    SubmitEmployeeReview,
    SubmitHodReview,
}

impl Transition {
    /// The only role allowed to perform this transition.
    pub fn actor_role(&self) -> Role {
        match self {
            Transition::SubmitKpis => Role::Hr,
            Transition::RespondToKpis | Transition::SubmitEmployeeReview => Role::Employee,
            Transition::SubmitHodReview => Role::Manager,
        }
    }

    /// The status the appraisal must be in.
    pub fn required_status(&self) -> AppraisalStatus {
        match self {
            Transition::SubmitKpis => AppraisalStatus::Draft,
            Transition::RespondToKpis => AppraisalStatus::KpisSubmitted,
            Transition::SubmitEmployeeReview => AppraisalStatus::KpisRespondedTo,
            Transition::SubmitHodReview => AppraisalStatus::EmployeeReviewSubmitted,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Transition::SubmitKpis => "submit_kpis",
            Transition::RespondToKpis => "respond_to_kpis",
            Transition::SubmitEmployeeReview => "submit_employee_review",
            Transition::SubmitHodReview => "submit_hod_review",
        }
    }

    /// Checks role, ownership and status for this transition.
    pub fn authorize(
        &self,
        actor: &Actor,
        owner: &UserId,
        status: AppraisalStatus,
    ) -> Result<(), DomainError> {
        let role = self.actor_role();
        if !actor.has_role(role) {
            return Err(DomainError::forbidden(format!(
                "{} may not perform {}",
                actor.role, self
            ))
            .with_detail("required_role", role.as_str())
            .with_detail("transition", self.name()));
        }
        if role == Role::Employee && &actor.id != owner {
            return Err(DomainError::forbidden(format!(
                "Only the appraised employee may perform {}",
                self
            ))
            .with_detail("transition", self.name()));
        }
        let required = self.required_status();
        if status != required {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot {} while the appraisal is '{}'",
                    self,
                    status.label()
                ),
            )
            .with_detail("status", status.as_str())
            .with_detail("required_status", required.as_str()));
        }
        Ok(())
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Gate for adding, revising and removing KPIs: HR only, Draft only.
pub fn authorize_kpi_authoring(actor: &Actor, status: AppraisalStatus) -> Result<(), DomainError> {
    if !actor.has_role(Role::Hr) {
        return Err(DomainError::forbidden("Only HR may author KPIs")
            .with_detail("required_role", Role::Hr.as_str()));
    }
    if !status.kpis_editable() {
        return Err(DomainError::new(
            ErrorCode::KpisLocked,
            format!("KPIs are locked once the appraisal is '{}'", status.label()),
        )
        .with_detail("status", status.as_str()));
    }
    Ok(())
}
