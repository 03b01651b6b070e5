//! Shared fixtures for handler tests.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::adapters::memory::{InMemoryAppraisalRepository, InMemoryCycleRepository};
use crate::domain::appraisal::{Appraisal, AppraisalEvent, KpiDraft, KpiScoreUpdate, WorkflowPolicy};
use crate::domain::cycle::{AppraisalCycle, CycleDetails};
use crate::domain::foundation::{Actor, AppraisalId, CommandMetadata, CycleId, KpiId, Role, UserId};

pub use crate::ports::{AppraisalRepository, CycleRepository};

pub fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

pub fn actor(id: &str, role: Role) -> Actor {
    Actor::new(user(id), role)
}

pub fn as_hr() -> CommandMetadata {
    CommandMetadata::new(actor("hr-1", Role::Hr)).with_source("test")
}

pub fn as_employee(id: &str) -> CommandMetadata {
    CommandMetadata::new(actor(id, Role::Employee)).with_source("test")
}

pub fn as_manager() -> CommandMetadata {
    CommandMetadata::new(actor("mgr-1", Role::Manager)).with_source("test")
}

pub fn draft(title: &str, weight: f64) -> KpiDraft {
    KpiDraft {
        title: title.to_string(),
        description: None,
        target: None,
        weight,
    }
}

pub fn scores(kpis: &[KpiId], score: Option<f64>) -> Vec<KpiScoreUpdate> {
    kpis.iter()
        .map(|kpi_id| KpiScoreUpdate {
            kpi_id: *kpi_id,
            score,
            comment: None,
        })
        .collect()
}

/// In-memory stores with one seeded cycle.
pub struct Fixture {
    pub appraisals: Arc<InMemoryAppraisalRepository>,
    pub cycles: Arc<InMemoryCycleRepository>,
    pub cycle_id: CycleId,
}

impl Fixture {
    pub async fn new() -> Self {
        let cycles = Arc::new(InMemoryCycleRepository::new());
        let cycle = AppraisalCycle::new(CycleDetails {
            name: "2025 Annual".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            is_active: true,
        })
        .unwrap();
        cycles.save(&cycle).await.unwrap();

        Self {
            appraisals: Arc::new(InMemoryAppraisalRepository::linked(Arc::clone(&cycles))),
            cycles,
            cycle_id: cycle.id(),
        }
    }

    pub async fn create_appraisal(&self, employee: &str) -> AppraisalId {
        let appraisal = Appraisal::new(user(employee), self.cycle_id, None);
        self.appraisals.save(&appraisal).await.unwrap();
        appraisal.id()
    }

    pub async fn add_kpis(&self, id: AppraisalId, weights: &[f64]) -> Vec<KpiId> {
        let mut ids = Vec::new();
        for (i, weight) in weights.iter().enumerate() {
            let kpi = draft(&format!("KPI {}", i + 1), *weight);
            let change = self
                .appraisals
                .apply(
                    &id,
                    Box::new(move |a: &mut Appraisal| a.add_kpi(&actor("hr-1", Role::Hr), kpi)),
                )
                .await
                .unwrap();
            if let AppraisalEvent::KpiAdded { kpi_id, .. } = change.event {
                ids.push(kpi_id);
            }
        }
        ids
    }

    pub async fn submit_kpis(&self, id: AppraisalId) {
        self.appraisals
            .apply(
                &id,
                Box::new(|a: &mut Appraisal| {
                    a.submit_kpis(&actor("hr-1", Role::Hr), &WorkflowPolicy::default())
                }),
            )
            .await
            .unwrap();
    }

    pub async fn accept_kpis(&self, id: AppraisalId, employee: &str) {
        let employee = actor(employee, Role::Employee);
        self.appraisals
            .apply(
                &id,
                Box::new(move |a: &mut Appraisal| a.respond_to_kpis(&employee, true, None)),
            )
            .await
            .unwrap();
    }

    /// Drives an appraisal with KPIs to EmployeeReviewSubmitted, scoring every KPI 4.
    pub async fn reach_employee_review(&self, id: AppraisalId, employee: &str, kpis: &[KpiId]) {
        self.submit_kpis(id).await;
        self.accept_kpis(id, employee).await;
        let employee = actor(employee, Role::Employee);
        let updates = scores(kpis, Some(4.0));
        self.appraisals
            .apply(
                &id,
                Box::new(move |a: &mut Appraisal| {
                    a.submit_employee_review(&employee, None, 4.0, updates)
                }),
            )
            .await
            .unwrap();
    }
}
