//! Background job queue interface.
//!
//! Host job queues carry opaque, serializable job descriptions; workers
//! deserialize the parameters and do the actual work. The queue itself
//! only promises ordering and a cheap "is anything of this kind pending"
//! check, which is what enqueue-side deduplication is built on.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;

/// A queued unit of background work: a kind tag plus JSON parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedJob {
    /// Job kind, used for routing and pending checks.
    pub kind: String,
    /// Opaque parameters, interpreted by the worker for this kind.
    pub params: Value,
}

impl QueuedJob {
    /// Create a job description.
    pub fn new(kind: impl Into<String>, params: Value) -> Self {
        Self {
            kind: kind.into(),
            params,
        }
    }
}

/// Durable, ordered job queue.
pub trait JobQueue: Send + Sync {
    /// Whether any job of the given kind is currently queued.
    fn has_pending(&self, kind: &str) -> bool;

    /// Append a job to the queue.
    fn push(&self, job: QueuedJob);
}

/// In-memory [`JobQueue`] for tests: jobs accumulate until popped.
#[derive(Debug, Default)]
pub struct MemoryJobQueue {
    queue: Mutex<VecDeque<QueuedJob>>,
}

impl MemoryJobQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest queued job, if any.
    pub fn pop(&self) -> Option<QueuedJob> {
        self.queue.lock().pop_front()
    }

    /// Number of queued jobs.
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

impl JobQueue for MemoryJobQueue {
    fn has_pending(&self, kind: &str) -> bool {
        self.queue.lock().iter().any(|job| job.kind == kind)
    }

    fn push(&self, job: QueuedJob) {
        self.queue.lock().push_back(job);
    }
}
