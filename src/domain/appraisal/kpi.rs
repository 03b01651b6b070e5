//! Kpi entity - one weighted objective with two independent score/comment pairs.

use crate::domain::foundation::{AppraisalId, KpiId, Rating, Timestamp, ValidationError, Weight};

use super::Perspective;

/// Author-supplied KPI definition, validated into a [`Kpi`].
#[derive(Debug, Clone, PartialEq)]
pub struct KpiDraft {
    pub title: String,
    pub description: Option<String>,
    pub target: Option<String>,
    pub weight: f64,
}

/// Validated definition fields.
#[derive(Debug, Clone, PartialEq)]
struct Definition {
    title: String,
    description: Option<String>,
    target: Option<String>,
    weight: Weight,
}

impl KpiDraft {
    fn validate(self) -> Result<Definition, ValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let weight = Weight::try_new(self.weight)?;
        Ok(Definition {
            title,
            description: normalize_text(self.description),
            target: normalize_text(self.target),
            weight,
        })
    }
}

/// A KPI attached to exactly one appraisal.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpi {
    id: KpiId,
    appraisal_id: AppraisalId,
    title: String,
    description: Option<String>,
    target: Option<String>,
    weight: Weight,
    employee_score: Option<Rating>,
    hod_score: Option<Rating>,
    employee_comment: Option<String>,
    hod_comment: Option<String>,
    created_at: Timestamp,
}

/// Persisted score state of a KPI, used when reconstituting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiScores {
    pub employee_score: Option<Rating>,
    pub hod_score: Option<Rating>,
    pub employee_comment: Option<String>,
    pub hod_comment: Option<String>,
}

impl Kpi {
    /// Creates a KPI with no scores.
    pub fn new(appraisal_id: AppraisalId, draft: KpiDraft) -> Result<Self, ValidationError> {
        let def = draft.validate()?;
        Ok(Self {
            id: KpiId::new(),
            appraisal_id,
            title: def.title,
            description: def.description,
            target: def.target,
            weight: def.weight,
            employee_score: None,
            hod_score: None,
            employee_comment: None,
            hod_comment: None,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitutes a KPI from persisted data.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: KpiId,
        appraisal_id: AppraisalId,
        title: String,
        description: Option<String>,
        target: Option<String>,
        weight: Weight,
        scores: KpiScores,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            appraisal_id,
            title,
            description,
            target,
            weight,
            employee_score: scores.employee_score,
            hod_score: scores.hod_score,
            employee_comment: scores.employee_comment,
            hod_comment: scores.hod_comment,
            created_at,
        }
    }

    /// Replaces the definition fields. Scores are left alone.
    pub fn revise(&mut self, draft: KpiDraft) -> Result<(), ValidationError> {
        let def = draft.validate()?;
        self.title = def.title;
        self.description = def.description;
        self.target = def.target;
        self.weight = def.weight;
        Ok(())
    }

    /// Records the employee's self-assessment for this KPI.
    pub fn record_employee_score(&mut self, score: Option<Rating>, comment: Option<String>) {
        self.employee_score = score;
        self.employee_comment = normalize_text(comment);
    }

    /// Records the manager's assessment for this KPI.
    pub fn record_manager_score(&mut self, score: Option<Rating>, comment: Option<String>) {
        self.hod_score = score;
        self.hod_comment = normalize_text(comment);
    }

    /// Returns the score recorded from the given perspective.
    pub fn score_for(&self, perspective: Perspective) -> Option<Rating> {
        match perspective {
            Perspective::Employee => self.employee_score,
            Perspective::Manager => self.hod_score,
        }
    }

    pub fn id(&self) -> KpiId {
        self.id
    }

    pub fn appraisal_id(&self) -> AppraisalId {
        self.appraisal_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn employee_score(&self) -> Option<Rating> {
        self.employee_score
    }

    pub fn hod_score(&self) -> Option<Rating> {
        self.hod_score
    }

    pub fn employee_comment(&self) -> Option<&str> {
        self.employee_comment.as_deref()
    }

    pub fn hod_comment(&self) -> Option<&str> {
        self.hod_comment.as_deref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// Trims free text and maps blank input to `None`.
pub(crate) fn normalize_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
