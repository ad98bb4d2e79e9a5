/*!
 * Exclusion Registry
 * Copy-on-write record list with wait-free lookup and deferred reclamation
 */

use arc_swap::ArcSwap;
use log::debug;
use parking_lot::Mutex;
use std::sync::Arc;

use super::types::{
    ExclusionError, ExclusionHandle, ExclusionResult, ExclusionStats, ProcessIdentity,
};
use crate::core::types::FilesTableId;

/// Concurrent registry of exclusion records.
///
/// The membership list is published as an immutable snapshot behind an
/// atomic pointer. Readers load the current snapshot and traverse it without
/// taking any lock; writers serialize among themselves, build a successor
/// list, and publish it in one atomic store. A superseded snapshot (and any
/// record removed with it) is reclaimed only once the last reader holding it
/// lets go, so an in-flight traversal can never dereference freed memory.
///
/// # Performance
///
/// - **Reads**: one atomic snapshot load plus a linear scan (~ns); no
///   contention with writers
/// - **Writes**: clone-modify-swap under the writer mutex; rare
///   (process start/stop of exclusion), so the copy cost is acceptable
pub struct ExclusionRegistry {
    /// Published membership snapshot
    records: ArcSwap<Vec<ExclusionHandle>>,
    /// Serializes writer-vs-writer only; readers never touch it
    write_lock: Mutex<()>,
}

impl ExclusionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: ArcSwap::from_pointee(Vec::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Look up the first record for `identity` in the current snapshot.
    ///
    /// # Performance
    /// Hot path - called on every intercepted file and filesystem operation
    #[inline]
    #[must_use]
    pub fn lookup(&self, identity: FilesTableId) -> Option<ExclusionHandle> {
        let snapshot = self.records.load();
        snapshot
            .iter()
            .find(|member| member.identity() == identity)
            .cloned()
    }

    /// Allocate a record for `source` and publish it at the tail of the list.
    ///
    /// The record is published fully formed with `active = false`; concurrent
    /// readers either see all of it or none of it. Fails only on allocation
    /// exhaustion, in which case nothing was published.
    ///
    /// Registering the same identity twice creates two independent records;
    /// keeping at most one record per identity is the client protocol's
    /// bookkeeping, not the registry's.
    pub fn insert(&self, source: ProcessIdentity) -> ExclusionResult<ExclusionHandle> {
        let handle = ExclusionHandle::new(source);

        let _writer = self.write_lock.lock();
        let current = self.records.load_full();
        let mut next: Vec<ExclusionHandle> = Vec::new();
        next.try_reserve_exact(current.len() + 1)
            .map_err(|err| ExclusionError::AllocationFailed(err.to_string().into()))?;
        next.extend(current.iter().cloned());
        next.push(handle.clone());
        self.records.store(Arc::new(next));

        Ok(handle)
    }

    /// Whether `handle` names a record currently in the registry
    #[must_use]
    pub fn contains(&self, handle: &ExclusionHandle) -> bool {
        self.records
            .load()
            .iter()
            .any(|member| member.ptr_eq(handle))
    }

    /// Unlink the record named by `handle`.
    ///
    /// The record disappears from every subsequent lookup immediately; its
    /// memory is reclaimed once the last reader that loaded the old snapshot
    /// has finished. Removing a handle that is not a member is an expected
    /// race with external registry resets and returns `false` without error.
    pub fn remove(&self, handle: &ExclusionHandle) -> bool {
        let _writer = self.write_lock.lock();
        let current = self.records.load_full();
        if !current.iter().any(|member| member.ptr_eq(handle)) {
            debug!(
                "Isolated process [{}/{}] deregistered",
                handle.pid(),
                handle.tid()
            );
            return false;
        }

        let next: Vec<ExclusionHandle> = current
            .iter()
            .filter(|member| !member.ptr_eq(handle))
            .cloned()
            .collect();
        self.records.store(Arc::new(next));

        true
    }

    /// Remove every record; used at processor teardown.
    ///
    /// Returns the number of records drained. Readers that already hold the
    /// old snapshot finish against it; nobody starting afterwards can
    /// observe any of the drained records.
    pub fn drain(&self) -> usize {
        let _writer = self.write_lock.lock();
        let old = self.records.swap(Arc::new(Vec::new()));
        if !old.is_empty() {
            debug!("Drained {} exclusion records", old.len());
        }
        old.len()
    }

    /// Records currently registered
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.load().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.load().is_empty()
    }

    /// Consistent snapshot of registry counters
    #[must_use]
    pub fn stats(&self) -> ExclusionStats {
        let snapshot = self.records.load();
        ExclusionStats {
            registered: snapshot.len(),
            active: snapshot.iter().filter(|member| member.is_active()).count(),
        }
    }
}

impl Default for ExclusionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
