//! Polling scheduler
//!
//! Owns the two periodic tasks that discover job progress: a fast
//! execution-log poll and a slower directory reconciliation. Both run only
//! while the job is active; the directory task starts lazily once a
//! directory handle is known, which may happen mid-job via a log poll.
//!
//! Stopping is deterministic and idempotent: both timer tasks are aborted,
//! and any load still in flight is discarded rather than committed, so a
//! late result can never clobber post-job state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use quill_client::AgentBackend;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use crate::config::MonitorConfig;
use crate::loader::load_snapshot;
use crate::state::MonitorState;

/// Scheduler lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    ActivePolling,
    Stopped,
}

/// Periodic poller for one job run
///
/// Created per job and stopped exactly once when the job ends or the
/// owning scope is torn down. A stopped scheduler never restarts.
pub struct PollingScheduler {
    backend: Arc<dyn AgentBackend>,
    state: Arc<MonitorState>,
    config: MonitorConfig,
    /// Handed to spawned tasks so they can reach back without keeping the
    /// scheduler alive
    weak: Weak<Self>,
    stopped: AtomicBool,
    inner: Mutex<Inner>,
}

struct Inner {
    state: SchedulerState,
    log_task: Option<JoinHandle<()>>,
    directory_task: Option<JoinHandle<()>>,
    settle_task: Option<JoinHandle<()>>,
}

impl PollingScheduler {
    /// Creates a scheduler for one job run
    pub fn new(
        backend: Arc<dyn AgentBackend>,
        state: Arc<MonitorState>,
        config: MonitorConfig,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            backend,
            state,
            config,
            weak: weak.clone(),
            stopped: AtomicBool::new(false),
            inner: Mutex::new(Inner {
                state: SchedulerState::Idle,
                log_task: None,
                directory_task: None,
                settle_task: None,
            }),
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> SchedulerState {
        self.inner.lock().unwrap().state
    }

    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Starts polling (Idle -> ActivePolling)
    ///
    /// Spawns the log-poll task immediately; the directory task follows as
    /// soon as a directory handle is known. Calling start on a scheduler
    /// that already left Idle is a no-op.
    pub fn start(&self) {
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.state != SchedulerState::Idle {
                return;
            }
            inner.state = SchedulerState::ActivePolling;
            inner.log_task = Some(self.spawn_log_task());
        }

        // The handle can already be known if polling starts mid-job.
        if let Some(handle) = self.state.directory_handle() {
            self.ensure_directory_task(handle);
        }
    }

    /// Stops polling (-> Stopped)
    ///
    /// Aborts both timer tasks. Idempotent: stopping an already-stopped
    /// scheduler is a no-op.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);

        let mut inner = self.inner.lock().unwrap();
        if inner.state == SchedulerState::Stopped {
            return;
        }
        inner.state = SchedulerState::Stopped;
        if let Some(task) = inner.log_task.take() {
            task.abort();
        }
        if let Some(task) = inner.directory_task.take() {
            task.abort();
        }
        debug!("Polling stopped");
    }

    /// Stops polling and cancels any pending settle fetch
    ///
    /// Used when the owning scope goes away entirely (new job, reset,
    /// drop), as opposed to a job merely ending.
    pub fn teardown(&self) {
        self.stop();
        if let Some(task) = self.inner.lock().unwrap().settle_task.take() {
            task.abort();
        }
    }

    /// One extra reconciliation after the job has ended
    ///
    /// Covers the case where the directory handle was learned too late for
    /// any periodic tick to land (e.g. only from the terminal response).
    /// Runs at most once per job, after `settle_delay`, and only when no
    /// documents were observed; the scheduler stays Stopped afterwards.
    pub fn schedule_settle_fetch(&self) {
        let Some(handle) = self.state.directory_handle() else {
            return;
        };
        if self.state.document_count() > 0 {
            return;
        }

        let mut inner = self.inner.lock().unwrap();
        if inner.state != SchedulerState::Stopped || inner.settle_task.is_some() {
            return;
        }

        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        let config = self.config.clone();
        inner.settle_task = Some(tokio::spawn(async move {
            time::sleep(config.settle_delay).await;
            debug!("Running settle fetch for {}", handle);
            match load_snapshot(&backend, &handle, &config).await {
                Ok(snapshot) => state.publish_snapshot(snapshot),
                Err(e) => warn!("Settle fetch failed: {}", e),
            }
        }));
    }

    /// Spawns the execution-log poll loop
    ///
    /// The poll runs inline in its own loop so a slow poll can never
    /// overlap the next tick of the same action.
    fn spawn_log_task(&self) -> JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        let scheduler = self.weak.clone();
        let period = self.config.log_poll_interval;

        tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                match backend.poll_logs().await {
                    Ok(feed) => {
                        let Some(scheduler) = scheduler.upgrade() else {
                            return;
                        };
                        if scheduler.is_stopped() {
                            return;
                        }
                        state.replace_logs(feed.logs);
                        if let Some(handle) = feed.directory_handle {
                            if state.record_directory_handle(&handle) {
                                debug!("Directory handle discovered: {}", handle);
                                scheduler.ensure_directory_task(handle);
                            }
                        }
                    }
                    Err(e) => warn!("Log poll failed: {}", e),
                }
            }
        })
    }

    /// Spawns the directory reconciliation loop if not already running
    fn ensure_directory_task(&self, handle: String) {
        let mut inner = self.inner.lock().unwrap();
        if inner.state != SchedulerState::ActivePolling || inner.directory_task.is_some() {
            return;
        }
        inner.directory_task = Some(self.spawn_directory_task(handle));
    }

    fn spawn_directory_task(&self, handle: String) -> JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let state = Arc::clone(&self.state);
        let config = self.config.clone();
        let scheduler = self.weak.clone();

        tokio::spawn(async move {
            let mut ticker = time::interval(config.directory_poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                match load_snapshot(&backend, &handle, &config).await {
                    Ok(snapshot) => {
                        // A load that resolves after stop is stale; drop it.
                        let Some(scheduler) = scheduler.upgrade() else {
                            return;
                        };
                        if scheduler.is_stopped() {
                            return;
                        }
                        debug!("Publishing snapshot with {} document(s)", snapshot.len());
                        state.publish_snapshot(snapshot);
                    }
                    Err(e) => {
                        // Expected to self-heal; keep the previous snapshot
                        // and retry on the next natural tick.
                        warn!("Directory listing failed, keeping previous snapshot: {}", e);
                    }
                }
            }
        })
    }
}

impl Drop for PollingScheduler {
    fn drop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
        let mut inner = self.inner.lock().unwrap();
        inner.state = SchedulerState::Stopped;
        for task in [
            inner.log_task.take(),
            inner.directory_task.take(),
            inner.settle_task.take(),
        ]
        .into_iter()
        .flatten()
        {
            task.abort();
        }
    }
}
