//! src/registry.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

/// Progress cell written by one worker and read by the monitor.
#[derive(Debug)]
pub struct WorkerState {
    index: usize,
    percentage: AtomicU8,
    finished: AtomicBool,
}

impl WorkerState {
    fn new(index: usize) -> Self {
        Self {
            index,
            percentage: AtomicU8::new(0),
            finished: AtomicBool::new(false),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn percentage(&self) -> u8 {
        self.percentage.load(Ordering::Acquire)
    }

    /// Never moves backwards; values above 100 are clamped.
    pub fn set_percentage(&self, percentage: u8) {
        self.percentage
            .fetch_max(percentage.min(100), Ordering::AcqRel);
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    pub fn mark_finished(&self) {
        self.finished.store(true, Ordering::Release);
    }
}

/// Point-in-time view of one registered worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerProgress {
    pub index: usize,
    pub percentage: u8,
    pub finished: bool,
}

/// Fixed set of progress cells, one per chunk, handed out in spawn order.
///
/// Only the registered prefix is visible to readers, so the monitor never
/// sees a cell before its worker has been submitted.
#[derive(Debug)]
pub struct WorkerRegistry {
    states: Vec<Arc<WorkerState>>,
    registered: AtomicUsize,
}

impl WorkerRegistry {
    pub fn with_capacity(chunks: usize) -> Self {
        Self {
            states: (0..chunks).map(|i| Arc::new(WorkerState::new(i))).collect(),
            registered: AtomicUsize::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.states.len()
    }

    /// Publishes the next cell. Returns `None` once every cell is taken.
    pub fn register(&self) -> Option<Arc<WorkerState>> {
        let capacity = self.states.len();
        let slot = self
            .registered
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < capacity).then_some(n + 1)
            })
            .ok()?;
        Some(Arc::clone(&self.states[slot]))
    }

    pub fn len(&self) -> usize {
        self.registered.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered workers in spawn order.
    pub fn snapshot(&self) -> Vec<WorkerProgress> {
        self.states[..self.len()]
            .iter()
            .map(|state| WorkerProgress {
                index: state.index(),
                percentage: state.percentage(),
                finished: state.is_finished(),
            })
            .collect()
    }
}
