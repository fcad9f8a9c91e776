/*! Worker pool.

A fixed number of workers process independent tasks.

Workers are the threads of a dedicated [rayon::ThreadPool], each one running [WorkerPool::run]'s
worker loop through [rayon::ThreadPool::broadcast]:

1. take a start ticket and wait for its delay,
1. load the annotation models (once per worker),
1. claim the next unprocessed task (first come, first served) until none are left.

Each task yields a [TaskOutcome]. Errors, and panics ([Error::Panic]), stay local to their task, except fatal ones
([Error::is_fatal]) which stop the workers from claiming new tasks and are returned by [WorkerPool::run].
!*/
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use log::{debug, error, info, warn};
use rayon::ThreadPoolBuilder;

use crate::annotators::AnnotatorFactory;
use crate::error::Error;
use crate::identifiers::StartTickets;

/// Delay between two consecutive worker initializations.
pub const DEFAULT_STAGGER: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub workers: usize,
    pub stagger: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism().map_or(1, |n| n.get()),
            stagger: DEFAULT_STAGGER,
        }
    }
}

/// Result of a single task.
#[derive(Debug)]
pub struct TaskOutcome<T, R> {
    pub task: T,
    pub result: Result<R, Error>,
}

/// Outcomes of every task of a run, in task order.
#[derive(Debug)]
pub struct Ledger<T, R> {
    outcomes: Vec<TaskOutcome<T, R>>,
}

impl<T, R> Ledger<T, R> {
    pub fn outcomes(&self) -> &[TaskOutcome<T, R>] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<TaskOutcome<T, R>> {
        self.outcomes
    }

    pub fn successes(&self) -> impl Iterator<Item = (&T, &R)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|r| (&o.task, r)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&T, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.task, e)))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

pub struct WorkerPool {
    config: PoolConfig,
}

impl WorkerPool {
    /// Fails if the configuration asks for no workers.
    pub fn new(config: PoolConfig) -> Result<Self, Error> {
        if config.workers == 0 {
            return Err(Error::Custom("worker pool needs at least one worker".to_string()));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Process every task, returning once all of them are done.
    ///
    /// `process` is called with the worker's annotator and the task.
    /// Tasks that no worker could take (every worker failed to load its models)
    /// are recorded with [Error::NoWorker].
    pub fn run<F, T, R, P>(
        &self,
        factory: &F,
        tasks: Vec<T>,
        process: P,
    ) -> Result<Ledger<T, R>, Error>
    where
        F: AnnotatorFactory,
        T: Sync,
        R: Send,
        P: Fn(&F::Annotator, &T) -> Result<R, Error> + Sync,
    {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|idx| format!("vrt-worker-{}", idx))
            .build()?;

        let tickets = StartTickets::new(self.config.stagger);
        let next_task = AtomicUsize::new(0);
        let halt = AtomicBool::new(false);

        info!(
            "starting {} workers for {} tasks",
            self.config.workers,
            tasks.len()
        );

        let per_worker: Vec<Vec<(usize, Result<R, Error>)>> = pool.broadcast(|ctx| {
            let ticket = tickets.acquire();
            debug!("worker {} got ticket {}", ctx.index(), ticket.ordinal());
            ticket.wait();

            let loaded = panic::catch_unwind(AssertUnwindSafe(|| factory.load()))
                .unwrap_or_else(|payload| Err(Error::Panic(panic_message(payload))));
            let annotator = match loaded {
                Ok(a) => a,
                Err(e) => {
                    error!("worker {} could not load models: {:?}", ctx.index(), e);
                    return Vec::new();
                }
            };
            info!("worker {} ready", ctx.index());

            let mut results = Vec::new();
            while !halt.load(Ordering::SeqCst) {
                let idx = next_task.fetch_add(1, Ordering::SeqCst);
                let task = match tasks.get(idx) {
                    Some(task) => task,
                    None => break,
                };

                let result = panic::catch_unwind(AssertUnwindSafe(|| process(&annotator, task)))
                    .unwrap_or_else(|payload| {
                        let msg = panic_message(payload);
                        error!("worker {} panicked on task {}: {}", ctx.index(), idx, msg);
                        Err(Error::Panic(msg))
                    });
                if let Err(e) = &result {
                    if e.is_fatal() {
                        error!("fatal error, stopping workers: {:?}", e);
                        halt.store(true, Ordering::SeqCst);
                    }
                }
                results.push((idx, result));
            }
            debug!("worker {} done ({} tasks)", ctx.index(), results.len());
            results
        });

        let mut results: Vec<Option<Result<R, Error>>> = (0..tasks.len()).map(|_| None).collect();
        for (idx, result) in per_worker.into_iter().flatten() {
            results[idx] = Some(result);
        }

        let mut fatal = None;
        let outcomes = tasks
            .into_iter()
            .zip(results)
            .map(|(task, result)| {
                let result = match result {
                    Some(Err(e)) if e.is_fatal() && fatal.is_none() => {
                        fatal = Some(e);
                        Err(Error::Custom("aborted by a fatal error".to_string()))
                    }
                    Some(result) => result,
                    None => Err(Error::NoWorker),
                };
                TaskOutcome { task, result }
            })
            .collect::<Vec<_>>();

        if let Some(e) = fatal {
            return Err(e);
        }

        let ledger = Ledger { outcomes };
        let failed = ledger.failures().count();
        if failed > 0 {
            warn!("{} out of {} tasks failed", failed, ledger.len());
        }
        Ok(ledger)
    }
}

/// Message of a caught panic, when it has one.
fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
