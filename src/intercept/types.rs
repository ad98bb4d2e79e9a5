/*!
 * Interception Types
 * Shared vocabulary between the host framework and its intercept filters
 */

use crate::core::types::{CommString, FilesTableId, Pid, Tid};
use crate::exclusion::ProcessIdentity;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Recommended action for an intercepted operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterceptAction {
    /// Continue with the next evaluator
    Next,
    /// Bypass further evaluation and allow the operation
    Allow,
    /// Deny the operation (never set by this subsystem)
    Deny,
    /// Evaluation timed out
    Timeout,
}

/// Shared decision object threaded through every intercept filter.
///
/// Filters that have an opinion overwrite the recommendation; filters that
/// do not leave it untouched for downstream evaluators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EvaluationReport {
    recommended: InterceptAction,
}

impl EvaluationReport {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            recommended: InterceptAction::Next,
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn recommended_action(&self) -> InterceptAction {
        self.recommended
    }

    #[inline]
    pub fn recommend(&mut self, action: InterceptAction) {
        self.recommended = action;
    }
}

impl Default for EvaluationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Execution context of the calling thread, resolved by the host framework
/// before a filter is invoked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExecutionContext {
    files: FilesTableId,
    pid: Pid,
    tid: Tid,
    comm: CommString,
}

impl ExecutionContext {
    #[must_use]
    pub fn new(files: FilesTableId, pid: Pid, tid: Tid) -> Self {
        Self {
            files,
            pid,
            tid,
            comm: CommString::new(),
        }
    }

    /// Attach the process name for diagnostics
    #[must_use]
    pub fn with_comm(mut self, comm: impl Into<CommString>) -> Self {
        self.comm = comm.into();
        self
    }

    /// The exclusion key of this context
    #[inline(always)]
    #[must_use]
    pub fn files(&self) -> FilesTableId {
        self.files
    }

    #[inline]
    #[must_use]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    #[must_use]
    pub fn tid(&self) -> Tid {
        self.tid
    }

    #[inline]
    #[must_use]
    pub fn comm(&self) -> &str {
        &self.comm
    }

    /// The identity triple used for registry records
    #[inline]
    #[must_use]
    pub fn identity(&self) -> ProcessIdentity {
        ProcessIdentity::new(self.files, self.pid, self.tid)
    }
}

/// Details of an intercepted file operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FileInfo {
    pub path: PathBuf,
    /// Open flags as supplied by the interception point
    pub flags: u32,
}

impl FileInfo {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            flags: 0,
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }
}

/// Details of an intercepted filesystem (mount) operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FilesystemInfo {
    pub device: String,
    pub mount_point: PathBuf,
    pub fs_type: String,
}

impl FilesystemInfo {
    #[must_use]
    pub fn new(
        device: impl Into<String>,
        mount_point: impl Into<PathBuf>,
        fs_type: impl Into<String>,
    ) -> Self {
        Self {
            device: device.into(),
            mount_point: mount_point.into(),
            fs_type: fs_type.into(),
        }
    }
}
