//! Worker pool manager
//!
//! The pool owns every worker handle, keyed by `WorkerId`. It enforces the
//! concurrency bound and the worker lifecycle, but makes no policy
//! decisions: when to spawn, reassign or retire is up to the coordinator.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::LinkExtractor;
use crate::crawler::worker::{run_worker, WorkerCommand, WorkerContext, WorkerEvent, WorkerId};
use crate::state::WorkerState;
use crate::{Result, StrandError};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;

/// Pool-side view of one worker
#[derive(Debug)]
struct WorkerHandle {
    state: WorkerState,
    assignment: Option<String>,
    commands: UnboundedSender<WorkerCommand>,
    task: JoinHandle<()>,
}

/// Bounded set of worker tasks
pub struct WorkerPool<F, E> {
    max_workers: usize,
    next_id: u64,
    workers: HashMap<WorkerId, WorkerHandle>,
    in_flight: HashSet<String>,
    events: UnboundedSender<WorkerEvent>,
    context: WorkerContext<F, E>,
    spawned: usize,
    peak: usize,
}

impl<F, E> WorkerPool<F, E>
where
    F: Fetcher,
    E: LinkExtractor,
{
    /// Creates an empty pool
    ///
    /// # Arguments
    ///
    /// * `max_workers` - Upper bound on simultaneously active workers (at least 1)
    /// * `fetcher` - Shared page fetcher
    /// * `extractor` - Shared link extractor
    /// * `host` - Hostname every discovered link must match
    /// * `events` - Channel on which workers report to the coordinator
    pub fn new(
        max_workers: usize,
        fetcher: Arc<F>,
        extractor: Arc<E>,
        host: &str,
        events: UnboundedSender<WorkerEvent>,
    ) -> Self {
        Self {
            max_workers: max_workers.max(1),
            next_id: 1,
            workers: HashMap::new(),
            in_flight: HashSet::new(),
            events,
            context: WorkerContext {
                fetcher,
                extractor,
                host: Arc::from(host),
            },
            spawned: 0,
            peak: 0,
        }
    }

    /// Number of workers that have not been retired
    pub fn active_count(&self) -> usize {
        self.workers.len()
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Returns true if another worker may be spawned
    pub fn has_capacity(&self) -> bool {
        self.workers.len() < self.max_workers
    }

    /// Total workers spawned over the pool's lifetime
    pub fn spawned_count(&self) -> usize {
        self.spawned
    }

    /// Highest number of simultaneously active workers observed
    pub fn peak_count(&self) -> usize {
        self.peak
    }

    /// Returns true if some worker currently holds `url`
    pub fn is_in_flight(&self, url: &str) -> bool {
        self.in_flight.contains(url)
    }

    /// Lifecycle state of a worker, if it is still in the pool
    pub fn state(&self, id: WorkerId) -> Option<WorkerState> {
        self.workers.get(&id).map(|handle| handle.state)
    }

    /// Spawns a new worker and hands it its first URL
    pub fn spawn(&mut self, url: String) -> Result<WorkerId> {
        if !self.has_capacity() {
            return Err(StrandError::PoolFull(self.max_workers));
        }

        let id = WorkerId(self.next_id);
        self.next_id += 1;

        let (commands, receiver) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_worker(
            id,
            receiver,
            self.events.clone(),
            self.context.clone(),
        ));

        self.workers.insert(
            id,
            WorkerHandle {
                state: WorkerState::Idle,
                assignment: None,
                commands,
                task,
            },
        );
        self.spawned += 1;
        self.peak = self.peak.max(self.workers.len());
        tracing::debug!(
            "Spawned worker {} ({}/{} active)",
            id,
            self.workers.len(),
            self.max_workers
        );

        self.assign(id, url)?;
        Ok(id)
    }

    /// Hands `url` to an idle or reported worker
    ///
    /// On `WorkerGone` the worker's state is left untouched.
    pub fn assign(&mut self, id: WorkerId, url: String) -> Result<()> {
        let handle = self
            .workers
            .get_mut(&id)
            .ok_or(StrandError::UnknownWorker(id))?;

        check_transition(id, handle.state, WorkerState::Assigned)?;

        handle
            .commands
            .send(WorkerCommand::Crawl(url.clone()))
            .map_err(|_| StrandError::WorkerGone(id))?;

        // The worker starts fetching as soon as it receives the command
        handle.state = WorkerState::Assigned;
        check_transition(id, handle.state, WorkerState::Fetching)?;
        handle.state = WorkerState::Fetching;

        self.in_flight.insert(url.clone());
        handle.assignment = Some(url);
        Ok(())
    }

    /// Records that a worker reported on its assignment
    ///
    /// Returns the URL the worker had been holding.
    pub fn record_report(&mut self, id: WorkerId) -> Result<Option<String>> {
        let handle = self
            .workers
            .get_mut(&id)
            .ok_or(StrandError::UnknownWorker(id))?;

        check_transition(id, handle.state, WorkerState::Reported)?;
        handle.state = WorkerState::Reported;

        let url = handle.assignment.take();
        if let Some(url) = &url {
            self.in_flight.remove(url);
        }
        Ok(url)
    }

    /// Tells a reported (or idle) worker to exit and drops it from the pool
    pub fn retire(&mut self, id: WorkerId) -> Result<()> {
        let handle = self
            .workers
            .get_mut(&id)
            .ok_or(StrandError::UnknownWorker(id))?;

        check_transition(id, handle.state, WorkerState::Retiring)?;
        handle.state = WorkerState::Retiring;

        if let Some(handle) = self.workers.remove(&id) {
            // The task may already be gone; nothing left to tell it then
            let _ = handle.commands.send(WorkerCommand::Stop);
        }

        tracing::debug!(
            "Retired worker {} ({} still active)",
            id,
            self.workers.len()
        );
        Ok(())
    }

    /// Removes a worker that exited without being retired
    ///
    /// Returns the URL it was holding, if any.
    pub fn remove_crashed(&mut self, id: WorkerId) -> Result<Option<String>> {
        let handle = self
            .workers
            .remove(&id)
            .ok_or(StrandError::UnknownWorker(id))?;

        if let Some(url) = &handle.assignment {
            self.in_flight.remove(url);
        }
        tracing::debug!(
            "Removed crashed worker {} ({} still active)",
            id,
            self.workers.len()
        );
        Ok(handle.assignment)
    }

    /// Stops every worker, abandoning tasks that are still fetching
    ///
    /// Returns the number of workers that were shut down.
    pub fn shutdown(&mut self) -> usize {
        let count = self.workers.len();
        for (id, handle) in self.workers.drain() {
            let _ = handle.commands.send(WorkerCommand::Stop);
            if handle.state.is_busy() {
                tracing::debug!("Aborting worker {} while {}", id, handle.state);
                handle.task.abort();
            }
        }
        self.in_flight.clear();
        count
    }

    /// Kills a worker's task behind the pool's back and waits for its
    /// command channel to close
    #[cfg(test)]
    pub(crate) async fn kill_worker(&self, id: WorkerId) {
        if let Some(handle) = self.workers.get(&id) {
            handle.task.abort();
            handle.commands.closed().await;
        }
    }
}

fn check_transition(id: WorkerId, from: WorkerState, to: WorkerState) -> Result<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(StrandError::InvalidTransition {
            worker: id,
            from,
            to,
        })
    }
}
