/*!
 * Interception Module
 *
 * The framework-facing surface of the exclusion subsystem:
 * - Shared interception vocabulary (reports, contexts, operation details)
 * - The three capability traits and the processor implementing them
 * - Runtime enable/disable configuration
 */

mod config;
mod processor;
mod traits;
mod types;

pub use config::{
    ConfigEntry, StatusConfig, CFG_ACTION_DISABLE, CFG_ACTION_ENABLE, CFG_STATUS,
    CFG_VALUE_DISABLED, CFG_VALUE_ENABLED,
};
pub use processor::ExclusionProcessor;
pub use traits::{Configurable, ExclusionComponent, InterceptFilter, ProcessExcluder};
pub use types::{
    EvaluationReport, ExecutionContext, FileInfo, FilesystemInfo, InterceptAction,
};
