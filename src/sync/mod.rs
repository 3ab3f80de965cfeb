use std::future::Future;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, Notify};
use tracing::{debug, trace};

use crate::domain::{ResumeDocument, UpdateResumeInput};
use crate::session::{
    ActionOutcome, Session, SessionAction, SessionEngine, SessionError, SubmitError,
};
use crate::validate::FormValidator;

/// The network/mutation collaborator. Receives a diff payload and resolves
/// to the updated document or a structured failure.
pub trait SubmitResume: Send + Sync + 'static {
    fn submit(
        &self,
        input: UpdateResumeInput,
    ) -> impl Future<Output = Result<ResumeDocument, SubmitError>> + Send;
}

/// Coalesces rapid edits into a single debounced submit call.
///
/// Owns the session. Every dispatch that reports `ScheduleSync` (re)arms a
/// single-slot timer of the configured delay; only the most recent arming
/// within the window fires, and the payload is computed at fire time from
/// the latest state, so intervening edits coalesce into one submission. At
/// most one submission is in flight; a timer firing mid-flight queues
/// exactly one follow-up attempt, started right after the in-flight call
/// resolves. After a successful submit the session is re-opened so editing
/// continues against the freshly returned reference document.
pub struct ChangeSynchronizer<S: SubmitResume> {
    inner: Arc<SyncInner<S>>,
}

struct SyncInner<S> {
    session: Mutex<Session>,
    validator: FormValidator,
    submitter: S,
    delay: Duration,
    state: Mutex<SyncState>,
    settled: Notify,
}

#[derive(Debug, Default)]
struct SyncState {
    generation: u64,
    timer_armed: bool,
    in_flight: bool,
    queued: bool,
}

impl SyncState {
    fn is_idle(&self) -> bool {
        !self.timer_armed && !self.in_flight && !self.queued
    }
}

impl<S: SubmitResume> ChangeSynchronizer<S> {
    /// A zero delay is valid; it still coalesces edits issued in the same
    /// tick into one submission.
    pub fn new(session: Session, validator: FormValidator, submitter: S, delay: Duration) -> Self {
        Self {
            inner: Arc::new(SyncInner {
                session: Mutex::new(session),
                validator,
                submitter,
                delay,
                state: Mutex::new(SyncState::default()),
                settled: Notify::new(),
            }),
        }
    }

    /// Applies an action to the session; a `ScheduleSync` outcome arms the
    /// debounce timer.
    pub async fn dispatch(&self, action: SessionAction) -> Result<ActionOutcome, SessionError> {
        let outcome = {
            let mut session = self.inner.session.lock().await;
            SessionEngine::new(&mut session, &self.inner.validator).dispatch(action)?
        };
        if outcome == ActionOutcome::ScheduleSync {
            self.schedule().await;
        }
        Ok(outcome)
    }

    /// Arms the debounce timer, superseding any pending arming.
    pub async fn schedule(&self) {
        let generation = {
            let mut state = self.inner.state.lock().await;
            state.generation += 1;
            state.timer_armed = true;
            state.generation
        };
        trace!(generation, "debounce timer armed");
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.delay).await;
            SyncInner::on_timer(inner, generation).await;
        });
    }

    /// A cloned snapshot of the current session, for hosts that render it.
    pub async fn snapshot(&self) -> Session {
        self.inner.session.lock().await.clone()
    }

    /// Resolves once no timer is pending, no submission is in flight and no
    /// follow-up is queued.
    pub async fn settled(&self) {
        loop {
            let mut notified = pin!(self.inner.settled.notified());
            notified.as_mut().enable();
            {
                let state = self.inner.state.lock().await;
                if state.is_idle() {
                    return;
                }
            }
            notified.await;
        }
    }
}

impl<S: SubmitResume> SyncInner<S> {
    async fn on_timer(inner: Arc<Self>, generation: u64) {
        {
            let mut state = inner.state.lock().await;
            if state.generation != generation {
                trace!(generation, "debounce timer superseded");
                return;
            }
            state.timer_armed = false;
            if state.in_flight {
                state.queued = true;
                debug!("submission queued behind the in-flight one");
                return;
            }
            state.in_flight = true;
        }
        loop {
            inner.run_submission().await;
            let mut state = inner.state.lock().await;
            if state.queued {
                state.queued = false;
                drop(state);
                continue;
            }
            state.in_flight = false;
            drop(state);
            inner.settled.notify_waiters();
            return;
        }
    }

    async fn run_submission(&self) {
        let payload = {
            let mut session = self.session.lock().await;
            match SessionEngine::new(&mut session, &self.validator).dispatch(SessionAction::Submit)
            {
                Ok(ActionOutcome::SubmitReady(payload)) => payload,
                Ok(outcome) => {
                    trace!(?outcome, "debounced submission skipped");
                    return;
                }
                Err(err) => {
                    debug!(%err, "debounced submission not applicable");
                    return;
                }
            }
        };
        debug!("submitting resume diff");
        let result = self.submitter.submit(payload).await;
        let mut session = self.session.lock().await;
        match result {
            Ok(resume) => {
                let applied = SessionEngine::new(&mut session, &self.validator)
                    .dispatch(SessionAction::SubmitSuccess { resume })
                    .is_ok();
                if applied {
                    session.reopen();
                }
            }
            Err(error) => {
                let _ = SessionEngine::new(&mut session, &self.validator)
                    .dispatch(SessionAction::ServerErrors { error });
            }
        }
    }
}
