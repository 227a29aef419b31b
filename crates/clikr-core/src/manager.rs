//! Worker lifecycle: one run at a time, stop-then-start, completion relay.

use crate::{
    stop_signal, ClickWorker, FinishReason, InputError, RunOutcome, StopTrigger, WorkerInputs,
};
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, warn};

pub type RunId = u64;

/// Manager state machine: `Idle -> Running -> {Finishing, Cancelling} -> Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    /// The worker ended on its own and is reporting.
    Finishing,
    /// A stop was requested; waiting for the worker to wind down.
    Cancelling,
}

/// Delivered to the completion callback once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub run_id: RunId,
    pub events_completed: u64,
    pub reason: FinishReason,
    pub elapsed_ms: u64,
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleAction {
    Started(RunId),
    Stopped,
}

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Inputs(#[from] InputError),
    #[error("failed to spawn click worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

type CompletionCallback = Box<dyn Fn(RunReport) + Send + Sync>;

#[derive(Debug, Default)]
struct Slot {
    run_id: RunId,
    state: RunState,
}

/// State shared with worker threads.
struct Shared {
    slot: Mutex<Slot>,
    on_finished: CompletionCallback,
}

impl Shared {
    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Transition `run_id` to `new` if it is still the current run and in one of `from`.
    fn transition(&self, run_id: RunId, from: &[RunState], new: RunState) -> bool {
        let mut slot = self.slot();
        if slot.run_id != run_id || !from.contains(&slot.state) {
            return false;
        }
        let old = slot.state;
        slot.state = new;
        debug!(run_id, ?old, ?new, "run state transition");
        true
    }

    fn finish(&self, run_id: RunId, outcome: RunOutcome, started: Instant) {
        self.transition(run_id, &[RunState::Running], RunState::Finishing);
        self.transition(
            run_id,
            &[RunState::Finishing, RunState::Cancelling],
            RunState::Idle,
        );

        let report = RunReport {
            run_id,
            events_completed: outcome.events_completed,
            reason: outcome.reason,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        info!(run_id, events = report.events_completed, reason = ?report.reason, "run finished");
        (self.on_finished)(report);
    }
}

struct ActiveRun {
    id: RunId,
    trigger: StopTrigger,
    thread: JoinHandle<()>,
}

/// Single point of control for click runs.
///
/// At most one run exists at a time. Starting while a run is active stops the
/// old run and joins its thread before the new one begins, so two runs never
/// share the injection device.
///
/// The completion callback runs on the worker thread. It must not call
/// `start`, `stop` or `toggle` synchronously; forward to another thread instead.
pub struct ClickWorkerManager {
    shared: Arc<Shared>,
    active: Mutex<Option<ActiveRun>>,
    next_id: AtomicU64,
}

impl ClickWorkerManager {
    pub fn new(on_finished: impl Fn(RunReport) + Send + Sync + 'static) -> Self {
        Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot::default()),
                on_finished: Box::new(on_finished),
            }),
            active: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    /// Start a new run, stopping and joining any previous one first.
    pub fn start(&self, inputs: WorkerInputs) -> Result<RunId, ManagerError> {
        let mut active = self.lock_active();
        self.launch(&mut active, inputs)
    }

    /// Request cancellation of the active run without waiting for it to wind down.
    ///
    /// Returns `true` if a running run was signalled.
    pub fn stop(&self) -> bool {
        let mut active = self.lock_active();
        self.request_stop(&mut active)
    }

    /// Stop if running, otherwise start with freshly built inputs.
    ///
    /// The check and the action happen under one lock, so concurrent toggles
    /// resolve one after another.
    pub fn toggle<F>(&self, make_inputs: F) -> Result<ToggleAction, ManagerError>
    where
        F: FnOnce() -> Result<WorkerInputs, InputError>,
    {
        let mut active = self.lock_active();
        if self.is_running() {
            self.request_stop(&mut active);
            return Ok(ToggleAction::Stopped);
        }
        let inputs = make_inputs()?;
        self.launch(&mut active, inputs).map(ToggleAction::Started)
    }

    /// Stop the active run and wait for its thread to exit.
    pub fn shutdown(&self) {
        let mut active = self.lock_active();
        self.retire(&mut active);
    }

    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }

    pub fn state(&self) -> RunState {
        self.shared.slot().state
    }

    fn lock_active(&self) -> MutexGuard<'_, Option<ActiveRun>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn request_stop(&self, active: &mut Option<ActiveRun>) -> bool {
        let Some(run) = active.as_mut() else {
            return false;
        };
        run.trigger.stop();
        let signalled = self
            .shared
            .transition(run.id, &[RunState::Running], RunState::Cancelling);
        if signalled {
            info!(run_id = run.id, "stop requested");
        }
        signalled
    }

    /// Stop and join the active run, if any.
    fn retire(&self, active: &mut Option<ActiveRun>) {
        let Some(mut run) = active.take() else {
            return;
        };
        run.trigger.stop();
        self.shared
            .transition(run.id, &[RunState::Running], RunState::Cancelling);
        debug!(run_id = run.id, "joining worker thread");
        if run.thread.join().is_err() {
            warn!(run_id = run.id, "worker thread panicked");
        }
    }

    fn launch(&self, active: &mut Option<ActiveRun>, inputs: WorkerInputs) -> Result<RunId, ManagerError> {
        self.retire(active);

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        {
            let mut slot = self.shared.slot();
            slot.run_id = id;
            slot.state = RunState::Running;
        }

        let (trigger, signal) = stop_signal();
        let shared = self.shared.clone();
        let spawned = thread::Builder::new()
            .name(format!("clikr-worker-{id}"))
            .spawn(move || {
                let started = Instant::now();
                let mut worker = ClickWorker::new();
                let progress = worker.progress();
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| worker.run(&inputs, &signal)))
                    .unwrap_or_else(|_| {
                        let completed = progress.load(Ordering::Relaxed);
                        error!(run_id = id, events = completed, "click worker panicked");
                        RunOutcome::failed(completed, "click worker panicked")
                    });
                shared.finish(id, outcome, started);
            });

        let thread = match spawned {
            Ok(thread) => thread,
            Err(e) => {
                error!(run_id = id, error = %e, "failed to spawn click worker");
                self.shared.transition(id, &[RunState::Running], RunState::Idle);
                return Err(e.into());
            }
        };

        info!(run_id = id, "run started");
        *active = Some(ActiveRun { id, trigger, thread });
        Ok(id)
    }
}

impl Drop for ClickWorkerManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
