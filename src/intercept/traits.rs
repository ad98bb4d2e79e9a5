/*!
 * Interception Traits
 * The three capability contracts composed around the exclusion registry
 */

use super::config::ConfigEntry;
use super::types::{EvaluationReport, ExecutionContext, FileInfo, FilesystemInfo};
use crate::exclusion::{Activation, ExclusionHandle, ExclusionResult};

/// Intercept filter interface, invoked by the host framework on every
/// guarded operation
pub trait InterceptFilter: Send + Sync {
    /// Examine an intercepted file operation and update the shared report
    /// if bypass applies
    fn examine_file(
        &self,
        report: &mut EvaluationReport,
        ctx: &ExecutionContext,
        info: &FileInfo,
    );

    /// Examine an intercepted filesystem (mount) operation and update the
    /// shared report if bypass applies
    fn examine_filesystem(
        &self,
        report: &mut EvaluationReport,
        ctx: &ExecutionContext,
        info: &FilesystemInfo,
    );

    /// Whether this filter currently participates in evaluation
    fn is_enabled(&self) -> bool;
}

/// Control interface for cooperating clients. A client registers once,
/// brackets each sensitive operation with mark_active/mark_idle, and
/// deregisters on exit.
pub trait ProcessExcluder: Send + Sync {
    /// Register the calling context and return a handle for later calls
    fn register(&self, ctx: &ExecutionContext) -> ExclusionResult<ExclusionHandle>;

    /// Remove a registration; returns `false` (without error) if the handle
    /// was already absent
    fn deregister(&self, handle: &ExclusionHandle) -> bool;

    /// Request interception bypass for the calling context, implicitly
    /// re-registering if the handle was reset out from under the caller
    fn mark_active(
        &self,
        ctx: &ExecutionContext,
        handle: &ExclusionHandle,
    ) -> ExclusionResult<Activation>;

    /// Resume normal interception for the calling context, implicitly
    /// re-registering if the handle was reset out from under the caller
    fn mark_idle(
        &self,
        ctx: &ExecutionContext,
        handle: &ExclusionHandle,
    ) -> ExclusionResult<Activation>;
}

/// Runtime configuration interface exposed to the management layer
pub trait Configurable: Send + Sync {
    /// Component name under which this instance is published
    fn config_name(&self) -> &'static str;

    /// All configuration entries, in declaration order
    fn all_config(&self) -> Vec<ConfigEntry>;

    /// Value of a named entry; `None` for unrecognized names
    fn config(&self, name: &str) -> Option<String>;

    /// Apply an action to a named entry; unrecognized names and actions are
    /// ignored
    fn set_config(&self, name: &str, value: &str);
}

/// Combined contract for hosts that need all three facets of one component
pub trait ExclusionComponent: InterceptFilter + ProcessExcluder + Configurable {}

/// Implement ExclusionComponent for types that implement all three facets
impl<T> ExclusionComponent for T where T: InterceptFilter + ProcessExcluder + Configurable {}
