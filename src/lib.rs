/*!
 * Process Exclusion Subsystem
 * Policy component letting designated processes bypass filesystem interception
 *
 * Consulted synchronously on every intercepted file-open and mount
 * operation: the read path is wait-free and lock-free, the write path
 * (clients registering and toggling exclusion) is serialized and defers
 * record reclamation past every in-flight reader.
 */

pub mod core;
pub mod exclusion;
pub mod intercept;

// Re-exports
pub use crate::core::types::{CommString, FilesTableId, Pid, Tid};
pub use exclusion::{
    Activation, ExclusionError, ExclusionHandle, ExclusionRegistry, ExclusionResult,
    ExclusionState, ExclusionStats, ProcessIdentity, Transition,
};
pub use intercept::{
    ConfigEntry, Configurable, EvaluationReport, ExclusionComponent, ExclusionProcessor,
    ExecutionContext, FileInfo, FilesystemInfo, InterceptAction, InterceptFilter,
    ProcessExcluder, StatusConfig,
};
