//! Thread coordinator
//!
//! Every live instruction pointer runs its own loop on a dedicated OS thread,
//! so no split ever waits for a free worker. The coordinator hands out thread
//! ids, keeps the live count, collects exit reasons and lets the async caller
//! wait until the last thread is gone.

use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use super::errors::RunError;
use super::exec_loop::{self, ThreadSummary};
use super::vm::{RunContext, ThreadExit, ThreadState};

/// Number of threads that ended for each reason
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitCounts {
    pub left_grid: usize,
    pub returned: usize,
    pub end_of_input: usize,
}

impl ExitCounts {
    pub fn record(&mut self, exit: ThreadExit) {
        match exit {
            ThreadExit::LeftGrid => self.left_grid += 1,
            ThreadExit::Returned => self.returned += 1,
            ThreadExit::EndOfInput => self.end_of_input += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.left_grid + self.returned + self.end_of_input
    }
}

pub struct ThreadCoordinator {
    next_id: AtomicUsize,
    /// Live thread count; the run is over when it drops back to zero
    live: watch::Sender<usize>,
    steps: AtomicU64,
    exits: Mutex<ExitCounts>,
    error: Mutex<Option<RunError>>,
}

impl ThreadCoordinator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicUsize::new(0),
            live: watch::channel(0).0,
            steps: AtomicU64::new(0),
            exits: Mutex::new(ExitCounts::default()),
            error: Mutex::new(None),
        })
    }

    /// Start a new thread of control
    ///
    /// The live count is raised before this returns, so a splitting thread
    /// can never be observed as the last one while its child is starting.
    pub fn spawn(self: &Arc<Self>, ctx: &Arc<RunContext>, mut state: ThreadState) {
        state.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let id = state.id;
        self.live.send_modify(|live| *live += 1);
        tracing::debug!(thread = id, pos = %state.ip.pos, "thread started");

        let coordinator = Arc::clone(self);
        let ctx = Arc::clone(ctx);
        let spawned = std::thread::Builder::new()
            .name(format!("snusp-ip-{}", id))
            .spawn(move || coordinator.run_thread(&ctx, state));

        if let Err(err) = spawned {
            tracing::warn!(thread = id, error = %err, "failed to start thread");
            self.error.lock().get_or_insert(RunError::Spawn(err));
            self.release();
        }
    }

    /// Wait until every spawned thread has exited
    pub async fn join(&self) {
        let mut live = self.live.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = live.wait_for(|count| *count == 0).await;
    }

    pub fn threads_spawned(&self) -> usize {
        self.next_id.load(Ordering::SeqCst)
    }

    pub fn steps(&self) -> u64 {
        self.steps.load(Ordering::SeqCst)
    }

    pub fn exits(&self) -> ExitCounts {
        *self.exits.lock()
    }

    /// First failure seen by any thread
    pub fn take_error(&self) -> Option<RunError> {
        self.error.lock().take()
    }

    fn run_thread(self: &Arc<Self>, ctx: &Arc<RunContext>, mut state: ThreadState) {
        let _live = LiveGuard(self);
        let span = tracing::debug_span!("thread", id = state.id);
        let _enter = span.enter();

        let mut rng = match ctx.seed {
            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(state.id as u64)),
            None => SmallRng::from_entropy(),
        };

        let result = exec_loop::run_until_done(ctx, &mut state, &mut rng, |child| {
            self.spawn(ctx, child)
        })
        .and_then(|summary| {
            ctx.io.flush()?;
            Ok(summary)
        });

        self.finish(result);
    }

    fn finish(&self, result: Result<ThreadSummary, RunError>) {
        match result {
            Ok(summary) => {
                self.steps.fetch_add(summary.steps, Ordering::SeqCst);
                self.exits.lock().record(summary.exit);
            }
            Err(err) => {
                tracing::warn!(error = %err, "thread stopped on stream failure");
                self.error.lock().get_or_insert(err);
            }
        }
    }

    fn release(&self) {
        self.live.send_modify(|live| *live -= 1);
        tracing::debug!(live = *self.live.borrow(), "thread finished");
    }
}

/// Lowers the live count when a thread ends, even by unwinding
struct LiveGuard<'a>(&'a ThreadCoordinator);

impl Drop for LiveGuard<'_> {
    fn drop(&mut self) {
        self.0.release();
    }
}
