//! End-to-end workflow tests through `AppraisalWorkflow` on in-memory storage.

use std::sync::Arc;

use chrono::NaiveDate;

use appraisal_flow::adapters::{InMemoryAppraisalRepository, InMemoryCycleRepository};
use appraisal_flow::application::handlers::{
    AddKpiCommand, CreateAppraisalCommand, CreateCycleCommand, DeleteCycleCommand,
    RemoveKpiCommand, RespondToKpisCommand, SubmitEmployeeReviewCommand, SubmitHodReviewCommand,
    SubmitKpisCommand,
};
use appraisal_flow::application::AppraisalWorkflow;
use appraisal_flow::domain::appraisal::{KpiDraft, KpiScoreUpdate, WorkflowPolicy};
use appraisal_flow::domain::cycle::CycleDetails;
use appraisal_flow::domain::foundation::{
    Actor, AppraisalId, AppraisalStatus, CommandMetadata, CycleId, ErrorCategory, ErrorCode,
    KpiId, Role, UserId,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn meta(id: &str, role: Role) -> CommandMetadata {
    CommandMetadata::new(Actor::new(UserId::new(id).unwrap(), role)).with_source("test")
}

fn hr() -> CommandMetadata {
    meta("hr-1", Role::Hr)
}

fn employee() -> CommandMetadata {
    meta("emp-1", Role::Employee)
}

fn manager() -> CommandMetadata {
    meta("mgr-1", Role::Manager)
}

fn draft(title: &str, weight: f64) -> KpiDraft {
    KpiDraft {
        title: title.to_string(),
        description: Some(format!("{} description", title)),
        target: None,
        weight,
    }
}

fn scored(kpis: &[KpiId], score: f64, comment: &str) -> Vec<KpiScoreUpdate> {
    kpis.iter()
        .map(|kpi_id| KpiScoreUpdate {
            kpi_id: *kpi_id,
            score: Some(score),
            comment: Some(comment.to_string()),
        })
        .collect()
}

struct World {
    workflow: AppraisalWorkflow,
    cycle_id: CycleId,
}

impl World {
    async fn new() -> Self {
        Self::with_policy(WorkflowPolicy::default()).await
    }

    async fn with_policy(policy: WorkflowPolicy) -> Self {
        let cycles = Arc::new(InMemoryCycleRepository::new());
        let workflow = AppraisalWorkflow::new(
            Arc::new(InMemoryAppraisalRepository::linked(Arc::clone(&cycles))),
            cycles,
            policy,
        );
        let cycle = workflow
            .create_cycle(
                CreateCycleCommand {
                    details: CycleDetails {
                        name: "2025 Annual".to_string(),
                        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                        end_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
                        is_active: true,
                    },
                },
                hr(),
            )
            .await
            .unwrap();
        Self {
            workflow,
            cycle_id: cycle.id(),
        }
    }

    async fn appraisal(&self) -> AppraisalId {
        self.workflow
            .create_appraisal(
                CreateAppraisalCommand {
                    employee_id: UserId::new("emp-1").unwrap(),
                    cycle_id: self.cycle_id,
                    comments: None,
                },
                hr(),
            )
            .await
            .unwrap()
            .id()
    }

    async fn add(&self, appraisal_id: AppraisalId, title: &str, weight: f64) -> KpiId {
        self.workflow
            .add_kpi(
                AddKpiCommand {
                    appraisal_id,
                    draft: draft(title, weight),
                },
                hr(),
            )
            .await
            .unwrap()
            .kpi
            .id()
    }

    async fn submit(&self, appraisal_id: AppraisalId) {
        self.workflow
            .submit_kpis(SubmitKpisCommand { appraisal_id }, hr())
            .await
            .unwrap();
    }

    async fn accept(&self, appraisal_id: AppraisalId) {
        self.workflow
            .respond_to_kpis(
                RespondToKpisCommand {
                    appraisal_id,
                    accepted: true,
                    rejection_reason: None,
                },
                employee(),
            )
            .await
            .unwrap();
    }

    async fn status(&self, appraisal_id: AppraisalId) -> AppraisalStatus {
        self.workflow
            .get_appraisal(appraisal_id, hr())
            .await
            .unwrap()
            .status()
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn round_trip_to_employee_review() {
    let world = World::new().await;
    let id = world.appraisal().await;
    let a = world.add(id, "Delivery", 60.0).await;
    let b = world.add(id, "Quality", 40.0).await;
    world.submit(id).await;
    world.accept(id).await;

    let change = world
        .workflow
        .submit_employee_review(
            SubmitEmployeeReviewCommand {
                appraisal_id: id,
                self_review: Some("Good year".to_string()),
                self_rating: 4.0,
                kpi_updates: scored(&[a, b], 4.0, "on track"),
            },
            employee(),
        )
        .await
        .unwrap();

    assert_eq!(change.appraisal.status(), AppraisalStatus::EmployeeReviewSubmitted);

    let stored = world.workflow.get_appraisal(id, hr()).await.unwrap();
    assert_eq!(stored.status(), AppraisalStatus::EmployeeReviewSubmitted);
    assert_eq!(stored.employee_self_rating().unwrap().value(), 4.0);
    assert_eq!(stored.employee_self_review(), Some("Good year"));
}

#[tokio::test]
async fn rejection_returns_to_draft_and_keeps_kpis() {
    let world = World::new().await;
    let id = world.appraisal().await;
    let kpi = world.add(id, "Delivery", 100.0).await;
    world.submit(id).await;

    world
        .workflow
        .respond_to_kpis(
            RespondToKpisCommand {
                appraisal_id: id,
                accepted: false,
                rejection_reason: Some("needs clarity".to_string()),
            },
            employee(),
        )
        .await
        .unwrap();

    let stored = world.workflow.get_appraisal(id, hr()).await.unwrap();
    assert_eq!(stored.status(), AppraisalStatus::Draft);
    assert_eq!(stored.rejection_reason(), Some("needs clarity"));

    let kpis = world.workflow.list_kpis(id, hr()).await.unwrap();
    assert_eq!(kpis.len(), 1);
    assert_eq!(kpis[0].id(), kpi);

    // HR can revise and resubmit.
    world.submit(id).await;
    assert_eq!(world.status(id).await, AppraisalStatus::KpisSubmitted);
}

#[tokio::test]
async fn manager_review_completes_the_appraisal() {
    let world = World::new().await;
    let id = world.appraisal().await;
    let a = world.add(id, "Delivery", 60.0).await;
    let b = world.add(id, "Quality", 40.0).await;
    world.submit(id).await;
    world.accept(id).await;
    world
        .workflow
        .submit_employee_review(
            SubmitEmployeeReviewCommand {
                appraisal_id: id,
                self_review: None,
                self_rating: 4.0,
                kpi_updates: scored(&[a, b], 4.0, "mine"),
            },
            employee(),
        )
        .await
        .unwrap();

    world
        .workflow
        .submit_hod_review(
            SubmitHodReviewCommand {
                appraisal_id: id,
                overall_rating: 3.5,
                comments: Some("solid".to_string()),
                kpi_updates: scored(&[a, b], 3.0, "agreed"),
            },
            manager(),
        )
        .await
        .unwrap();

    let stored = world.workflow.get_appraisal(id, employee()).await.unwrap();
    assert_eq!(stored.status(), AppraisalStatus::HodReviewSubmitted);
    assert_eq!(stored.overall_rating().unwrap().value(), 3.5);
    assert_eq!(stored.comments(), Some("solid"));
    for kpi in stored.kpis().iter() {
        assert_eq!(kpi.hod_score().unwrap().value(), 3.0);
        assert_eq!(kpi.hod_comment(), Some("agreed"));
        assert_eq!(kpi.employee_score().unwrap().value(), 4.0);
    }

    let progress = world.workflow.progress(id, manager()).await.unwrap();
    assert_eq!(progress.manager_completion.value(), 100);
    assert_eq!(progress.manager_weighted_score.unwrap().value(), 3.0);
}

// =============================================================================
// Properties
// =============================================================================

#[tokio::test]
async fn submitting_without_kpis_is_a_precondition_failure() {
    let world = World::new().await;
    let id = world.appraisal().await;

    let err = world
        .workflow
        .submit_kpis(SubmitKpisCommand { appraisal_id: id }, hr())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::NoKpisDefined);
    assert_eq!(err.category(), ErrorCategory::PreconditionFailed);
    assert_eq!(world.status(id).await, AppraisalStatus::Draft);
}

#[tokio::test]
async fn wrong_role_is_forbidden_before_status_is_checked() {
    let world = World::new().await;
    let id = world.appraisal().await;
    world.add(id, "Delivery", 100.0).await;

    // Status is Draft, so submit_kpis would succeed for HR.
    let err = world
        .workflow
        .submit_kpis(SubmitKpisCommand { appraisal_id: id }, manager())
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Forbidden);

    // Status is wrong for respond_to_kpis as well, yet HR still sees Forbidden.
    let err = world
        .workflow
        .respond_to_kpis(
            RespondToKpisCommand {
                appraisal_id: id,
                accepted: true,
                rejection_reason: None,
            },
            hr(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Forbidden);
}

#[tokio::test]
async fn partial_self_scoring_is_rejected_and_leaves_no_trace() {
    let world = World::new().await;
    let id = world.appraisal().await;
    let a = world.add(id, "Delivery", 30.0).await;
    let b = world.add(id, "Quality", 30.0).await;
    world.add(id, "Growth", 40.0).await;
    world.submit(id).await;
    world.accept(id).await;

    let err = world
        .workflow
        .submit_employee_review(
            SubmitEmployeeReviewCommand {
                appraisal_id: id,
                self_review: None,
                self_rating: 4.0,
                kpi_updates: scored(&[a, b], 4.0, "partial"),
            },
            employee(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::IncompleteScoring);
    assert_eq!(err.details.get("completion"), Some(&"67".to_string()));

    let stored = world.workflow.get_appraisal(id, hr()).await.unwrap();
    assert_eq!(stored.status(), AppraisalStatus::KpisRespondedTo);
    assert!(stored.kpis().iter().all(|k| k.employee_score().is_none()));
}

#[tokio::test]
async fn kpis_are_locked_after_submission() {
    let world = World::new().await;
    let id = world.appraisal().await;
    let kpi = world.add(id, "Delivery", 100.0).await;
    world.submit(id).await;

    let err = world
        .workflow
        .remove_kpi(RemoveKpiCommand { kpi_id: kpi }, hr())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::KpisLocked);
}

#[tokio::test]
async fn strict_policy_requires_weights_to_total_hundred() {
    let world = World::with_policy(WorkflowPolicy::strict()).await;
    let id = world.appraisal().await;
    world.add(id, "Delivery", 60.0).await;

    let err = world
        .workflow
        .submit_kpis(SubmitKpisCommand { appraisal_id: id }, hr())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::WeightTotalMismatch);

    world.add(id, "Quality", 40.0).await;
    world.submit(id).await;
}

#[tokio::test]
async fn one_appraisal_per_employee_per_cycle() {
    let world = World::new().await;
    world.appraisal().await;

    let err = world
        .workflow
        .create_appraisal(
            CreateAppraisalCommand {
                employee_id: UserId::new("emp-1").unwrap(),
                cycle_id: world.cycle_id,
                comments: None,
            },
            hr(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DuplicateAppraisal);
    assert_eq!(err.category(), ErrorCategory::Validation);
}

#[tokio::test]
async fn cycle_in_use_cannot_be_deleted() {
    let world = World::new().await;
    world.appraisal().await;

    let err = world
        .workflow
        .delete_cycle(
            DeleteCycleCommand {
                cycle_id: world.cycle_id,
            },
            hr(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CycleInUse);
}

#[tokio::test]
async fn employees_only_see_their_own_appraisals() {
    let world = World::new().await;
    let id = world.appraisal().await;

    let stranger = meta("emp-2", Role::Employee);
    let err = world.workflow.get_appraisal(id, stranger.clone()).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Forbidden);

    assert!(world.workflow.list_appraisals(stranger).await.unwrap().is_empty());
    assert_eq!(world.workflow.list_appraisals(employee()).await.unwrap().len(), 1);
    assert_eq!(world.workflow.list_appraisals(manager()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_submissions_apply_once() {
    let world = Arc::new(World::new().await);
    let id = world.appraisal().await;
    world.add(id, "Delivery", 100.0).await;

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let world = Arc::clone(&world);
        tasks.push(tokio::spawn(async move {
            world
                .workflow
                .submit_kpis(SubmitKpisCommand { appraisal_id: id }, hr())
                .await
        }));
    }

    let mut ok = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => ok += 1,
            Err(e) => assert_eq!(e.code, ErrorCode::InvalidStateTransition),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(world.status(id).await, AppraisalStatus::KpisSubmitted);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn cycle_delete_racing_creates_never_orphans_appraisals() {
    let world = Arc::new(World::new().await);

    let mut creates = Vec::new();
    for n in 0..8 {
        let world = Arc::clone(&world);
        creates.push(tokio::spawn(async move {
            world
                .workflow
                .create_appraisal(
                    CreateAppraisalCommand {
                        employee_id: UserId::new(format!("emp-{}", n)).unwrap(),
                        cycle_id: world.cycle_id,
                        comments: None,
                    },
                    hr(),
                )
                .await
        }));
    }
    let deleted = world
        .workflow
        .delete_cycle(
            DeleteCycleCommand {
                cycle_id: world.cycle_id,
            },
            hr(),
        )
        .await;

    for task in creates {
        if let Err(e) = task.await.unwrap() {
            assert_eq!(e.code, ErrorCode::CycleNotFound);
        }
    }

    let appraisals = world.workflow.list_appraisals(hr()).await.unwrap();
    match deleted {
        Ok(()) => assert!(appraisals.is_empty()),
        Err(e) => {
            assert_eq!(e.code, ErrorCode::CycleInUse);
            assert!(!appraisals.is_empty());
            assert!(world.workflow.get_cycle(world.cycle_id).await.is_ok());
        }
    }
}
