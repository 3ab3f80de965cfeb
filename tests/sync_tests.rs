use std::future::Future;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::sync::{Notify, Semaphore};

use resumedit::{
    ChangeSynchronizer, Experience, FieldValidity, FormValidator, ListOp, ListTarget, Mode,
    RecordFieldRef, ResumeDocument, ResumeFieldErrors, ScalarField, ServerErrorState, Session,
    SessionAction, SessionError, SubmitError, SubmitResume, UpdateResumeInput, ListField,
};

type Calls = Arc<StdMutex<Vec<UpdateResumeInput>>>;

fn mk_experience(company: &str, index: i32) -> Experience {
    Experience {
        index,
        position: format!("{company} engineer"),
        company_name: company.to_string(),
        from_date: "2021-05".to_string(),
        to_date: "2023-09".to_string(),
        achievements: vec![
            format!("launched {company} search"),
            format!("halved {company} incident rate"),
        ],
    }
}

fn mk_resume() -> ResumeDocument {
    ResumeDocument {
        id: "resume-1".to_string(),
        title: "Backend engineer".to_string(),
        description: "Five years of Rust".to_string(),
        experiences: vec![
            mk_experience("alpha", 1),
            mk_experience("beta", 2),
            mk_experience("gamma", 3),
        ],
        education: Vec::new(),
    }
}

/// What the server would do: apply the diff onto its copy and echo it back.
fn apply_input(mut base: ResumeDocument, input: &UpdateResumeInput) -> ResumeDocument {
    if let Some(title) = &input.title {
        base.title = title.clone();
    }
    if let Some(description) = &input.description {
        base.description = description.clone();
    }
    if let Some(experiences) = &input.experiences {
        base.experiences = experiences.clone();
    }
    if let Some(education) = &input.education {
        base.education = education.clone();
    }
    base
}

#[derive(Clone)]
struct RecordingSubmitter {
    calls: Calls,
    base: ResumeDocument,
}

impl SubmitResume for RecordingSubmitter {
    fn submit(
        &self,
        input: UpdateResumeInput,
    ) -> impl Future<Output = Result<ResumeDocument, SubmitError>> + Send {
        let calls = Arc::clone(&self.calls);
        let base = self.base.clone();
        async move {
            calls.lock().unwrap().push(input.clone());
            Ok(apply_input(base, &input))
        }
    }
}

#[derive(Clone)]
struct RejectingSubmitter {
    calls: Calls,
}

impl SubmitResume for RejectingSubmitter {
    fn submit(
        &self,
        input: UpdateResumeInput,
    ) -> impl Future<Output = Result<ResumeDocument, SubmitError>> + Send {
        let calls = Arc::clone(&self.calls);
        async move {
            calls.lock().unwrap().push(input);
            Err(SubmitError::Rejected(ResumeFieldErrors {
                title: Some("too short".to_string()),
                ..ResumeFieldErrors::default()
            }))
        }
    }
}

/// Blocks inside `submit` until the test releases the gate, so the test can
/// observe the in-flight window.
struct GatedSubmitter {
    calls: Calls,
    base: ResumeDocument,
    gate: Arc<Semaphore>,
    entered: Arc<Notify>,
}

impl SubmitResume for GatedSubmitter {
    fn submit(
        &self,
        input: UpdateResumeInput,
    ) -> impl Future<Output = Result<ResumeDocument, SubmitError>> + Send {
        let calls = Arc::clone(&self.calls);
        let base = self.base.clone();
        let gate = Arc::clone(&self.gate);
        let entered = Arc::clone(&self.entered);
        async move {
            entered.notify_one();
            let _permit = gate.acquire().await.unwrap();
            calls.lock().unwrap().push(input.clone());
            Ok(apply_input(base, &input))
        }
    }
}

fn mk_sync(delay: Duration) -> (ChangeSynchronizer<RecordingSubmitter>, Calls) {
    let calls: Calls = Arc::default();
    let submitter = RecordingSubmitter {
        calls: Arc::clone(&calls),
        base: mk_resume(),
    };
    let sync = ChangeSynchronizer::new(
        Session::new(Mode::Update { resume: mk_resume() }),
        FormValidator::new().unwrap(),
        submitter,
        delay,
    );
    (sync, calls)
}

async fn edit_and_blur(
    sync: &ChangeSynchronizer<impl SubmitResume>,
    field: ScalarField,
    value: &str,
) {
    sync.dispatch(SessionAction::FieldChanged {
        field,
        value: value.to_string(),
    })
    .await
    .unwrap();
    sync.dispatch(SessionAction::FieldBlurred { field })
        .await
        .unwrap();
}

#[tokio::test]
async fn debounced_sync_submits_the_changed_scalars() {
    let (sync, calls) = mk_sync(Duration::ZERO);
    edit_and_blur(&sync, ScalarField::Title, "Platform engineer").await;
    sync.settled().await;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id.as_deref(), Some("resume-1"));
    assert_eq!(calls[0].title.as_deref(), Some("Platform engineer"));
    assert_eq!(calls[0].description, None);
    assert_eq!(calls[0].experiences, None);
}

#[tokio::test]
async fn same_tick_edits_coalesce_into_one_submit() {
    let (sync, calls) = mk_sync(Duration::ZERO);
    edit_and_blur(&sync, ScalarField::Title, "Platform engineer").await;
    edit_and_blur(&sync, ScalarField::Title, "Platform engineering lead").await;
    sync.settled().await;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].title.as_deref(),
        Some("Platform engineering lead")
    );
}

#[tokio::test(start_paused = true)]
async fn rearming_extends_the_quiet_window() {
    let (sync, calls) = mk_sync(Duration::from_millis(200));
    edit_and_blur(&sync, ScalarField::Title, "Platform engineer").await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    edit_and_blur(&sync, ScalarField::Title, "Platform engineering lead").await;
    sync.settled().await;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].title.as_deref(),
        Some("Platform engineering lead")
    );
}

#[tokio::test]
async fn list_add_syncs_the_full_renumbered_list() {
    let (sync, calls) = mk_sync(Duration::ZERO);
    sync.dispatch(SessionAction::ListOp {
        target: ListTarget::Experiences,
        op: ListOp::Add { position: 1 },
    })
    .await
    .unwrap();
    sync.settled().await;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].title, None);
    let experiences = calls[0].experiences.as_ref().unwrap();
    assert_eq!(experiences.len(), 4);
    assert_eq!(experiences[0].company_name, "alpha");
    assert_eq!(experiences[0].index, 1);
    assert_eq!(experiences[1].company_name, "beta");
    assert_eq!(experiences[1].index, 2);
    assert_eq!(experiences[2].company_name, "");
    assert_eq!(experiences[2].index, 3);
    assert_eq!(experiences[3].company_name, "gamma");
    assert_eq!(experiences[3].index, 4);
}

#[tokio::test]
async fn achievement_edits_diff_against_the_refreshed_baseline() {
    let (sync, calls) = mk_sync(Duration::ZERO);

    sync.dispatch(SessionAction::ListOp {
        target: ListTarget::ExperienceAchievements { record: 0 },
        op: ListOp::Add { position: 0 },
    })
    .await
    .unwrap();
    sync.settled().await;

    sync.dispatch(SessionAction::RecordFieldChanged {
        field: RecordFieldRef::Achievement {
            list: ListField::Experiences,
            record: 0,
            entry: 1,
        },
        value: "new achievement".to_string(),
    })
    .await
    .unwrap();
    sync.settled().await;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    let first = calls[0].experiences.as_ref().unwrap();
    assert_eq!(
        first[0].achievements,
        ["launched alpha search", "", "halved alpha incident rate"]
    );
    let second = calls[1].experiences.as_ref().unwrap();
    assert_eq!(
        second[0].achievements,
        [
            "launched alpha search",
            "new achievement",
            "halved alpha incident rate"
        ]
    );
}

#[tokio::test]
async fn successful_sync_reopens_the_session_on_the_new_baseline() {
    let (sync, calls) = mk_sync(Duration::ZERO);
    edit_and_blur(&sync, ScalarField::Title, "Platform engineer").await;
    sync.settled().await;

    let snapshot = sync.snapshot().await;
    assert!(snapshot.is_editable());
    let form = snapshot.form().unwrap();
    assert_eq!(
        form.mode.reference().map(|resume| resume.title.as_str()),
        Some("Platform engineer")
    );

    // the title is now the baseline; only the new description edit goes out
    edit_and_blur(&sync, ScalarField::Description, "Six years of Rust").await;
    sync.settled().await;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].title, None);
    assert_eq!(calls[1].description.as_deref(), Some("Six years of Rust"));
}

#[tokio::test]
async fn create_mode_submits_every_populated_field() {
    let calls: Calls = Arc::default();
    let submitter = RecordingSubmitter {
        calls: Arc::clone(&calls),
        base: mk_resume(),
    };
    let sync = ChangeSynchronizer::new(
        Session::new(Mode::Create),
        FormValidator::new().unwrap(),
        submitter,
        Duration::ZERO,
    );
    edit_and_blur(&sync, ScalarField::Title, "First resume").await;
    edit_and_blur(&sync, ScalarField::Description, "Fresh graduate").await;
    sync.settled().await;

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id, None);
    assert_eq!(calls[0].title.as_deref(), Some("First resume"));
    assert_eq!(calls[0].description.as_deref(), Some("Fresh graduate"));
}

#[tokio::test]
async fn server_rejection_lands_on_the_form_and_session_recovers() {
    let calls: Calls = Arc::default();
    let submitter = RejectingSubmitter {
        calls: Arc::clone(&calls),
    };
    let sync = ChangeSynchronizer::new(
        Session::new(Mode::Update { resume: mk_resume() }),
        FormValidator::new().unwrap(),
        submitter,
        Duration::ZERO,
    );
    edit_and_blur(&sync, ScalarField::Title, "Platform engineer").await;
    sync.settled().await;

    assert_eq!(calls.lock().unwrap().len(), 1);
    let snapshot = sync.snapshot().await;
    assert_eq!(
        snapshot.server_errors(),
        Some(&ServerErrorState::FieldErrors)
    );
    assert_eq!(
        snapshot.form().unwrap().fields.title.validity,
        FieldValidity::Invalid {
            error: "too short".to_string()
        }
    );

    // the next keystroke re-enters editable so the user can correct it
    sync.dispatch(SessionAction::FieldChanged {
        field: ScalarField::Title,
        value: "Senior platform engineer".to_string(),
    })
    .await
    .unwrap();
    assert!(sync.snapshot().await.is_editable());
}

#[tokio::test]
async fn in_flight_submission_blocks_edits_and_queues_the_next_attempt() {
    let calls: Calls = Arc::default();
    let gate = Arc::new(Semaphore::new(0));
    let entered = Arc::new(Notify::new());
    let submitter = GatedSubmitter {
        calls: Arc::clone(&calls),
        base: mk_resume(),
        gate: Arc::clone(&gate),
        entered: Arc::clone(&entered),
    };
    let sync = ChangeSynchronizer::new(
        Session::new(Mode::Update { resume: mk_resume() }),
        FormValidator::new().unwrap(),
        submitter,
        Duration::ZERO,
    );

    edit_and_blur(&sync, ScalarField::Title, "Platform engineer").await;
    entered.notified().await;

    // the session is frozen while the diff is in flight
    let err = sync
        .dispatch(SessionAction::FieldChanged {
            field: ScalarField::Description,
            value: "racing the submit".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::NotEditable));

    // a timer firing mid-flight queues exactly one follow-up attempt
    sync.schedule().await;
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }

    gate.add_permits(1);
    sync.settled().await;

    // one network call; the queued attempt ran after resolution and found
    // nothing new to send against the refreshed baseline
    assert_eq!(calls.lock().unwrap().len(), 1);
    assert!(sync.snapshot().await.is_editable());
}
