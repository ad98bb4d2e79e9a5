/*!
 * Core Types
 * Common types used across the exclusion subsystem
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Process ID type (diagnostics only)
pub type Pid = u32;

/// Thread ID type (diagnostics only)
pub type Tid = u32;

/// Inline-optimized string for short process names and error payloads
pub type CommString = smartstring::alias::String;

/// File-descriptor-table identity of a process.
///
/// This is the key the exclusion subsystem distinguishes processes by: all
/// threads sharing one file table share one `FilesTableId`. It is supplied
/// by the host framework and is not a numeric process ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct FilesTableId(u64);

impl FilesTableId {
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline(always)]
    #[must_use]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for FilesTableId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for FilesTableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
