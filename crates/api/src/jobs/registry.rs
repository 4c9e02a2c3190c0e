//! In-process slideshow job registry.
//!
//! A mapping from job id to a registered unit of work, drained by a
//! concurrency gate fixed at one execution at a time across *all* jobs.
//! Two users' slideshow requests submitted concurrently are processed
//! strictly sequentially, in `run` invocation order (the semaphore is
//! fair/FIFO).
//!
//! State is in-memory only: registrations are lost on process restart and
//! the persisted job row stays `queued` forever. Accepted limitation.

use std::collections::HashMap;

use anyhow::Context;
use futures::future::BoxFuture;
use tokio::sync::{Mutex, Semaphore};

use omoide_core::types::DbId;

/// A registered unit of work: a boxed `'static` future.
pub type JobFuture = BoxFuture<'static, anyhow::Result<()>>;

pub struct JobRegistry {
    slots: Mutex<HashMap<DbId, JobFuture>>,
    gate: Semaphore,
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl JobRegistry {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            gate: Semaphore::new(1),
        }
    }

    /// Store a unit of work under `job_id`, replacing any prior
    /// registration for that id. No validation.
    pub async fn register(&self, job_id: DbId, work: JobFuture) {
        self.slots.lock().await.insert(job_id, work);
    }

    /// Execute the unit of work registered under `job_id`.
    ///
    /// Returns `Ok(())` immediately (without queuing) if nothing is
    /// registered under that id. Otherwise waits for the single concurrency
    /// slot, consumes the registration, and runs the work to completion.
    ///
    /// The registration is always removed before the work's error (if any)
    /// propagates to the caller; the registry itself persists no failure
    /// state. Recording the failure is the caller's job.
    pub async fn run(&self, job_id: DbId) -> anyhow::Result<()> {
        if !self.slots.lock().await.contains_key(&job_id) {
            return Ok(());
        }

        let _permit = self.gate.acquire().await.context("job gate closed")?;

        // Re-check under the permit: a concurrent run may have consumed it.
        let work = self.slots.lock().await.remove(&job_id);
        match work {
            Some(work) => work.await,
            None => Ok(()),
        }
    }
}
