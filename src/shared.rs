//! A partition shared between callers.
//!
//! [`Partition`] does no internal locking. When several callers need the same
//! partition, `SharedPartition` puts the whole surface (replacement, infection,
//! queries, selection) behind one exclusive lock so an infection is never
//! observed half-applied.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::partition::{Infection, Partition};
use crate::selector::Selection;
use crate::snapshot::PartitionSnapshot;
use crate::store::VertexError;

/// Cloneable handle to one lock-guarded partition.
#[derive(Debug, Clone)]
pub struct SharedPartition {
    inner: Arc<Mutex<Partition>>,
}

impl SharedPartition {
    /// Wrap a partition.
    pub fn new(partition: Partition) -> Self {
        Self {
            inner: Arc::new(Mutex::new(partition)),
        }
    }

    /// Swap in a freshly built partition, returning the old one.
    pub fn replace(&self, partition: Partition) -> Partition {
        std::mem::replace(&mut *self.inner.lock(), partition)
    }

    /// Run `f` with exclusive access.
    pub fn with<T>(&self, f: impl FnOnce(&mut Partition) -> T) -> T {
        f(&mut *self.inner.lock())
    }

    /// See [`Partition::version`].
    pub fn version(&self, uid: u32) -> Result<u32, VertexError> {
        self.inner.lock().version(uid)
    }

    /// See [`Partition::predict`].
    pub fn predict(&self, uid: u32) -> Result<usize, VertexError> {
        self.inner.lock().predict(uid)
    }

    /// See [`Partition::infect`].
    pub fn infect(&self, uid: u32) -> Result<Infection, VertexError> {
        self.inner.lock().infect(uid)
    }

    /// See [`Partition::select_by_limit`].
    pub fn select_by_limit(&self, limit: usize) -> Selection {
        self.inner.lock().select_by_limit(limit)
    }

    /// See [`Partition::groups_report`].
    pub fn groups_report(&self) -> String {
        self.inner.lock().groups_report()
    }

    /// Capture a snapshot under the lock.
    pub fn snapshot(&self) -> Result<PartitionSnapshot, VertexError> {
        PartitionSnapshot::capture(&*self.inner.lock())
    }
}
