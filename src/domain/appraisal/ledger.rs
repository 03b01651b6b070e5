//! KpiLedger - the ordered set of KPIs owned by one appraisal.
//!
//! The ledger is a passive store. It knows nothing about roles or statuses;
//! the [`Appraisal`](super::Appraisal) aggregate decides when it may change.

use crate::domain::foundation::{DomainError, ErrorCode, KpiId, Rating};

use super::{Kpi, Perspective};

/// One reviewer's score and comment for a single KPI.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiScoreUpdate {
    pub kpi_id: KpiId,
    pub score: Option<f64>,
    pub comment: Option<String>,
}

/// Creation-ordered KPIs of one appraisal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiLedger {
    kpis: Vec<Kpi>,
}

impl KpiLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger from KPIs already in creation order.
    pub fn from_kpis(kpis: Vec<Kpi>) -> Self {
        Self { kpis }
    }

    /// Appends a KPI.
    pub fn add(&mut self, kpi: Kpi) {
        self.kpis.push(kpi);
    }

    /// Returns the KPIs in creation order.
    pub fn list(&self) -> &[Kpi] {
        &self.kpis
    }

    pub fn len(&self) -> usize {
        self.kpis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kpis.is_empty()
    }

    pub fn get(&self, id: KpiId) -> Option<&Kpi> {
        self.kpis.iter().find(|k| k.id() == id)
    }

    /// Returns a mutable KPI or `KpiNotFound`.
    pub fn get_mut(&mut self, id: KpiId) -> Result<&mut Kpi, DomainError> {
        self.kpis
            .iter_mut()
            .find(|k| k.id() == id)
            .ok_or_else(|| kpi_not_found(id))
    }

    /// Removes a KPI, preserving the order of the rest.
    pub fn remove(&mut self, id: KpiId) -> Result<Kpi, DomainError> {
        let pos = self
            .kpis
            .iter()
            .position(|k| k.id() == id)
            .ok_or_else(|| kpi_not_found(id))?;
        Ok(self.kpis.remove(pos))
    }

    /// Records an employee score. An absent score is legal.
    pub fn record_employee_score(
        &mut self,
        kpi_id: KpiId,
        score: Option<Rating>,
        comment: Option<String>,
    ) -> Result<(), DomainError> {
        self.get_mut(kpi_id)?.record_employee_score(score, comment);
        Ok(())
    }

    /// Records a manager score. An absent score is legal.
    pub fn record_manager_score(
        &mut self,
        kpi_id: KpiId,
        score: Option<Rating>,
        comment: Option<String>,
    ) -> Result<(), DomainError> {
        self.get_mut(kpi_id)?.record_manager_score(score, comment);
        Ok(())
    }

    /// Validates and applies a batch of score updates from one perspective.
    ///
    /// All updates are validated before any is applied, so a failure leaves
    /// the ledger unchanged.
    pub fn apply_scores(
        &mut self,
        perspective: Perspective,
        updates: Vec<KpiScoreUpdate>,
    ) -> Result<(), DomainError> {
        let field = match perspective {
            Perspective::Employee => "employee_score",
            Perspective::Manager => "hod_score",
        };

        let mut validated = Vec::with_capacity(updates.len());
        for update in updates {
            if self.get(update.kpi_id).is_none() {
                return Err(kpi_not_found(update.kpi_id));
            }
            let score = update
                .score
                .map(|s| Rating::for_field(field, s))
                .transpose()
                .map_err(|e| DomainError::from(e).with_detail("kpi_id", update.kpi_id.to_string()))?;
            validated.push((update.kpi_id, score, update.comment));
        }

        for (kpi_id, score, comment) in validated {
            match perspective {
                Perspective::Employee => self.record_employee_score(kpi_id, score, comment)?,
                Perspective::Manager => self.record_manager_score(kpi_id, score, comment)?,
            }
        }
        Ok(())
    }

    /// Number of KPIs scored from the given perspective.
    pub fn scored_count(&self, perspective: Perspective) -> usize {
        self.kpis
            .iter()
            .filter(|k| k.score_for(perspective).is_some())
            .count()
    }

    /// Sum of all KPI weights.
    pub fn total_weight(&self) -> f64 {
        self.kpis.iter().map(|k| k.weight().value()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Kpi> {
        self.kpis.iter()
    }
}

fn kpi_not_found(id: KpiId) -> DomainError {
    DomainError::new(ErrorCode::KpiNotFound, format!("KPI not found: {}", id))
        .with_detail("kpi_id", id.to_string())
}
