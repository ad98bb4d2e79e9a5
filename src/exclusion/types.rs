/*!
 * Exclusion Types
 * Records, handles, and state for the process-exclusion registry
 */

use crate::core::types::{CommString, FilesTableId, Pid, Tid};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Exclusion operation result
///
/// # Must Use
/// A failed registration leaves the caller without a handle and must be handled
pub type ExclusionResult<T> = Result<T, ExclusionError>;

/// Exclusion errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error", content = "details", rename_all = "snake_case")]
pub enum ExclusionError {
    #[error("Record allocation failed: {0}")]
    #[diagnostic(
        code(exclusion::allocation_failed),
        help("The host is out of memory. No partial record was published; retrying is safe.")
    )]
    AllocationFailed(CommString),
}

/// Identity of a calling process as resolved from its execution context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessIdentity {
    /// The exclusion key: shared by all threads on one file table
    pub files: FilesTableId,
    /// Thread-group leader ID, diagnostics only
    pub pid: Pid,
    /// Calling thread ID, diagnostics only
    pub tid: Tid,
}

impl ProcessIdentity {
    #[inline]
    #[must_use]
    pub const fn new(files: FilesTableId, pid: Pid, tid: Tid) -> Self {
        Self { files, pid, tid }
    }
}

/// One process's exclusion state.
///
/// `files`, `pid`, and `tid` are immutable after construction; only `active`
/// changes while a record is registered. Readers therefore always observe
/// fully formed records regardless of concurrent writer activity.
#[derive(Debug)]
pub(crate) struct ExclusionRecord {
    source: ProcessIdentity,
    active: AtomicBool,
}

/// Opaque handle to an exclusion record.
///
/// The registry owns the record; a handle only names it. Cloning a handle
/// refers to the same record, equality is record identity (never field
/// comparison), and dropping every handle does not remove the record from
/// the registry.
#[derive(Clone)]
pub struct ExclusionHandle {
    record: Arc<ExclusionRecord>,
}

impl ExclusionHandle {
    pub(crate) fn new(source: ProcessIdentity) -> Self {
        Self {
            record: Arc::new(ExclusionRecord {
                source,
                active: AtomicBool::new(false),
            }),
        }
    }

    /// The identity this record tracks
    #[inline(always)]
    #[must_use]
    pub fn identity(&self) -> FilesTableId {
        self.record.source.files
    }

    #[inline]
    #[must_use]
    pub fn pid(&self) -> Pid {
        self.record.source.pid
    }

    #[inline]
    #[must_use]
    pub fn tid(&self) -> Tid {
        self.record.source.tid
    }

    /// Whether the owning process currently wants interception bypassed
    ///
    /// # Performance
    /// Hot path - read on every intercepted operation that matches
    #[inline(always)]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.record.active.load(Ordering::Acquire)
    }

    pub(crate) fn set_active(&self, active: bool) {
        self.record.active.store(active, Ordering::Release);
    }

    /// Record identity: true iff both handles name the same record
    #[inline]
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.record, &other.record)
    }

    /// Reclamation probe for tests: upgradeable while the record is alive
    #[cfg(test)]
    pub(crate) fn probe(&self) -> std::sync::Weak<ExclusionRecord> {
        Arc::downgrade(&self.record)
    }
}

impl PartialEq for ExclusionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ExclusionHandle {}

impl fmt::Debug for ExclusionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExclusionHandle")
            .field("identity", &self.identity())
            .field("pid", &self.pid())
            .field("tid", &self.tid())
            .field("active", &self.is_active())
            .finish()
    }
}

/// Registry statistics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExclusionStats {
    /// Records currently registered
    pub registered: usize,
    /// Registered records currently marked active
    pub active: usize,
}
