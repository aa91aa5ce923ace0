//! Job poller
//!
//! Submits jobs and waits for them by polling their status.
//! Each job is awaited on its own; jobs started together share nothing but a
//! semaphore bounding how many are in flight.

use std::sync::Arc;

use dubline_core::CoreError;
use dubline_core::domain::job::{Artifact, JobHandle, JobStatus};
use dubline_core::domain::language::TargetLanguage;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::backend::JobBackend;
use crate::config::PollerConfig;
use crate::error::PollerError;

/// Outcome of one target in [`JobPoller::run_many`]
pub type TargetOutcome = (TargetLanguage, Result<Artifact, PollerError>);

/// Polls asynchronous jobs to completion
#[derive(Clone)]
pub struct JobPoller {
    backend: Arc<dyn JobBackend>,
    config: PollerConfig,
    semaphore: Arc<Semaphore>,
}

impl JobPoller {
    /// Creates a new job poller
    pub fn new(backend: Arc<dyn JobBackend>, config: PollerConfig) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_parallel_jobs.max(1)));
        Self {
            backend,
            config,
            semaphore,
        }
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Submits a job
    ///
    /// The payload is sent exactly once. A rejection is returned as
    /// [`PollerError::Submission`] and never retried, since resubmitting could
    /// start a duplicate job.
    pub async fn submit(
        &self,
        payload: Vec<u8>,
        file_name: &str,
        target: TargetLanguage,
    ) -> Result<JobHandle, PollerError> {
        if payload.is_empty() {
            return Err(CoreError::EmptyPayload(file_name.to_string()).into());
        }

        let size = payload.len();
        let job_id = self
            .backend
            .submit(payload, file_name, &target)
            .await
            .map_err(PollerError::Submission)?;

        info!(
            "Submitted job {} ({} bytes from {}, target {})",
            job_id, size, file_name, target
        );

        Ok(JobHandle::new(job_id, target))
    }

    /// Waits until the job is terminal and returns its artifact
    ///
    /// Status is queried every `poll_interval`. On completion the artifact is
    /// fetched exactly once. Up to `max_transient_retries` consecutive
    /// transient query failures are tolerated; a successful query resets the
    /// count. Once `max_wait` has elapsed without a terminal status the wait
    /// ends with [`PollerError::Timeout`] and the job is left running. A status
    /// query still in flight at the deadline is abandoned.
    pub async fn await_completion(
        &self,
        handle: &JobHandle,
        poll_interval: Duration,
        max_wait: Duration,
    ) -> Result<Artifact, PollerError> {
        let started = Instant::now();
        let mut observed = JobStatus::Pending;
        let mut queries: u32 = 0;
        let mut consecutive_failures: u32 = 0;

        loop {
            queries += 1;

            let remaining = max_wait.saturating_sub(started.elapsed());
            let query = match time::timeout(remaining, self.backend.status(&handle.job_id)).await {
                Ok(query) => query,
                Err(_) => return Err(Self::timed_out(handle, started, observed)),
            };

            match query {
                Ok(report) => {
                    consecutive_failures = 0;

                    let next = observed.advance(report.status);
                    if next != report.status {
                        warn!(
                            "Job {} reported {} after {}, keeping {}",
                            handle.job_id, report.status, observed, next
                        );
                    }
                    observed = next;

                    debug!(
                        "Job {} is {} (query {})",
                        handle.job_id, observed, queries
                    );

                    match observed {
                        JobStatus::Complete => return self.fetch(handle, queries).await,
                        JobStatus::Failed => {
                            let reason = report
                                .reason
                                .unwrap_or_else(|| "no reason reported".to_string());
                            error!("Job {} failed: {}", handle.job_id, reason);
                            return Err(PollerError::JobFailed {
                                job_id: handle.job_id.clone(),
                                reason,
                            });
                        }
                        JobStatus::Pending | JobStatus::Processing => {}
                    }
                }
                Err(e) if e.is_transient() => {
                    consecutive_failures += 1;

                    if consecutive_failures > self.config.max_transient_retries {
                        error!(
                            "Giving up on job {} after {} failed status queries",
                            handle.job_id, consecutive_failures
                        );
                        return Err(PollerError::Polling {
                            job_id: handle.job_id.clone(),
                            attempts: consecutive_failures,
                            source: e,
                        });
                    }

                    warn!(
                        "Status query for job {} failed (attempt {}/{}): {}",
                        handle.job_id,
                        consecutive_failures,
                        self.config.max_transient_retries + 1,
                        e
                    );
                }
                Err(e) => {
                    error!("Status query for job {} rejected: {}", handle.job_id, e);
                    return Err(PollerError::Polling {
                        job_id: handle.job_id.clone(),
                        attempts: consecutive_failures + 1,
                        source: e,
                    });
                }
            }

            let elapsed = started.elapsed();
            if elapsed >= max_wait {
                return Err(Self::timed_out(handle, started, observed));
            }

            time::sleep(poll_interval.min(max_wait - elapsed)).await;
        }
    }

    /// Submits a job and waits for it with the configured interval and deadline
    pub async fn run(
        &self,
        payload: Vec<u8>,
        file_name: &str,
        target: TargetLanguage,
    ) -> Result<Artifact, PollerError> {
        let handle = self.submit(payload, file_name, target).await?;
        self.await_completion(&handle, self.config.poll_interval, self.config.max_wait)
            .await
    }

    /// Runs one job per target, each in its own task
    ///
    /// At most `max_parallel_jobs` jobs are in flight at once. Every target
    /// gets an outcome, in the order the targets were given; a task that
    /// panicked yields [`PollerError::Task`].
    pub async fn run_many(
        &self,
        payload: Vec<u8>,
        file_name: &str,
        targets: Vec<TargetLanguage>,
    ) -> Vec<TargetOutcome> {
        let mut tasks: Vec<(TargetLanguage, JoinHandle<Result<Artifact, PollerError>>)> =
            Vec::with_capacity(targets.len());

        for target in targets {
            let poller = self.clone();
            let payload = payload.clone();
            let file_name = file_name.to_string();
            let task_target = target.clone();

            let handle = tokio::spawn(async move {
                // Permit is released when the task finishes
                let _permit = Arc::clone(&poller.semaphore).acquire_owned().await;
                poller.run(payload, &file_name, task_target).await
            });
            tasks.push((target, handle));
        }

        let mut outcomes = Vec::with_capacity(tasks.len());
        for (target, handle) in tasks {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    error!("Job task for {} panicked: {}", target, e);
                    Err(PollerError::Task(e.to_string()))
                }
            };
            outcomes.push((target, result));
        }

        outcomes
    }

    fn timed_out(handle: &JobHandle, started: Instant, observed: JobStatus) -> PollerError {
        let waited = started.elapsed();
        warn!(
            "Job {} still {} after {:?} (submitted {}s ago), leaving it running",
            handle.job_id,
            observed,
            waited,
            handle.age().num_seconds()
        );
        PollerError::Timeout {
            job_id: handle.job_id.clone(),
            waited,
            last_status: observed,
        }
    }

    async fn fetch(&self, handle: &JobHandle, queries: u32) -> Result<Artifact, PollerError> {
        let bytes = self
            .backend
            .fetch_result(&handle.job_id, &handle.target)
            .await
            .map_err(|source| PollerError::Fetch {
                job_id: handle.job_id.clone(),
                source,
            })?;

        info!(
            "Job {} complete after {} status queries ({} bytes)",
            handle.job_id,
            queries,
            bytes.len()
        );

        Ok(Artifact {
            job_id: handle.job_id.clone(),
            target: handle.target.clone(),
            bytes,
            status_queries: queries,
        })
    }
}
