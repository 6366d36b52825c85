//! [`BoundedSampleQueue`]: mutex-guarded `VecDeque` with a fixed capacity.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use organic_core::config::QueueConfig;
use organic_core::errors::ConfigError;
use organic_core::traits::OrganicQueue;
use rand::Rng;

/// Capacity-bounded queue of organic samples.
///
/// Items are kept in arrival order so the oldest can be evicted on overflow.
/// `sample` removes a uniformly random item with an order-preserving remove,
/// which is O(n) but keeps eviction FIFO.
#[derive(Debug)]
pub struct BoundedSampleQueue<T> {
    capacity: usize,
    items: Mutex<VecDeque<T>>,
}

impl<T> BoundedSampleQueue<T> {
    /// Create a queue holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        QueueConfig { capacity }.validate()?;
        Ok(Self {
            capacity,
            items: Mutex::new(VecDeque::new()),
        })
    }

    pub fn from_config(config: &QueueConfig) -> Result<Self, ConfigError> {
        Self::new(config.capacity)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a sample, evicting and returning the oldest one if full.
    pub fn add(&self, sample: T) -> Option<T> {
        let mut items = self.lock();
        let evicted = if items.len() >= self.capacity {
            items.pop_front()
        } else {
            None
        };
        items.push_back(sample);
        evicted
    }

    /// Remove and return a uniformly random sample, or `None` when empty.
    pub fn sample(&self) -> Option<T> {
        let mut items = self.lock();
        if items.is_empty() {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..items.len());
        items.remove(index)
    }

    pub fn size(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every queued sample, returning how many were removed.
    pub fn clear(&self) -> usize {
        let mut items = self.lock();
        let count = items.len();
        items.clear();
        count
    }

    /// A poisoned lock only means a producer panicked mid-push; the deque
    /// itself is still consistent.
    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> BoundedSampleQueue<T> {
    /// Copy of the queued samples in arrival order.
    pub fn snapshot(&self) -> Vec<T> {
        self.lock().iter().cloned().collect()
    }
}

impl<T: Send> OrganicQueue<T> for BoundedSampleQueue<T> {
    fn add(&self, sample: T) -> Option<T> {
        BoundedSampleQueue::add(self, sample)
    }

    fn sample(&self) -> Option<T> {
        BoundedSampleQueue::sample(self)
    }

    fn size(&self) -> usize {
        BoundedSampleQueue::size(self)
    }

    fn is_empty(&self) -> bool {
        BoundedSampleQueue::is_empty(self)
    }
}
