/*!
 * Process Exclusion Processor
 * The registry-owning component behind all three capability facets
 */

use log::{debug, info};

use super::config::{
    ConfigEntry, StatusConfig, CFG_ACTION_DISABLE, CFG_ACTION_ENABLE, CFG_STATUS,
};
use super::traits::{Configurable, InterceptFilter, ProcessExcluder};
use super::types::{
    EvaluationReport, ExecutionContext, FileInfo, FilesystemInfo, InterceptAction,
};
use crate::exclusion::{
    Activation, ExclusionHandle, ExclusionRegistry, ExclusionResult, ExclusionStats,
};

/// Process-exclusion policy component.
///
/// One value implements the three contracts the host framework consumes:
/// [`InterceptFilter`] on every guarded operation (read path),
/// [`ProcessExcluder`] for cooperating clients (write path), and
/// [`Configurable`] for the management layer. The host composes the facets
/// via trait references; no global instance exists.
pub struct ExclusionProcessor {
    registry: ExclusionRegistry,
    status: StatusConfig,
}

impl ExclusionProcessor {
    /// Create a processor that participates in interception immediately
    #[must_use]
    pub fn new() -> Self {
        info!("Process exclusion processor initialized");
        Self {
            registry: ExclusionRegistry::new(),
            status: StatusConfig::default(),
        }
    }

    /// Create a processor that stays inert until enabled
    #[must_use]
    pub fn disabled() -> Self {
        info!("Process exclusion processor initialized (disabled)");
        Self {
            registry: ExclusionRegistry::new(),
            status: StatusConfig::new(false),
        }
    }

    /// The underlying registry
    #[must_use]
    pub fn registry(&self) -> &ExclusionRegistry {
        &self.registry
    }

    /// Registry counters
    #[must_use]
    pub fn stats(&self) -> ExclusionStats {
        self.registry.stats()
    }

    /// Enable interception bypass evaluation; idempotent
    pub fn enable(&self) -> bool {
        self.status.enable()
    }

    /// Disable interception bypass evaluation; idempotent
    pub fn disable(&self) -> bool {
        self.status.disable()
    }

    /// Remove every registration; used at teardown
    pub fn drain(&self) -> usize {
        self.registry.drain()
    }

    /// Whether the calling context is excluded and currently active.
    ///
    /// # Performance
    /// Hot path - the common case is "no match" and costs one flag load
    /// plus one snapshot scan, with no lock
    #[inline]
    fn bypass_applies(&self, ctx: &ExecutionContext) -> bool {
        if !self.status.is_enabled() {
            return false;
        }
        match self.registry.lookup(ctx.files()) {
            Some(handle) => handle.is_active(),
            None => false,
        }
    }
}

impl Default for ExclusionProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl InterceptFilter for ExclusionProcessor {
    fn examine_file(
        &self,
        report: &mut EvaluationReport,
        ctx: &ExecutionContext,
        _info: &FileInfo,
    ) {
        if self.bypass_applies(ctx) {
            debug!(
                "[intercepted {}-{}] {} - excluded",
                ctx.pid(),
                ctx.tid(),
                ctx.comm()
            );
            report.recommend(InterceptAction::Allow);
        }
    }

    fn examine_filesystem(
        &self,
        report: &mut EvaluationReport,
        ctx: &ExecutionContext,
        _info: &FilesystemInfo,
    ) {
        if self.bypass_applies(ctx) {
            debug!(
                "[intercepted {}-{}] {} - excluded",
                ctx.pid(),
                ctx.tid(),
                ctx.comm()
            );
            report.recommend(InterceptAction::Allow);
        }
    }

    fn is_enabled(&self) -> bool {
        self.status.is_enabled()
    }
}

impl ProcessExcluder for ExclusionProcessor {
    fn register(&self, ctx: &ExecutionContext) -> ExclusionResult<ExclusionHandle> {
        let handle = self.registry.insert(ctx.identity())?;
        info!(
            "Process [{}/{}] registered for exclusion",
            ctx.pid(),
            ctx.tid()
        );
        Ok(handle)
    }

    fn deregister(&self, handle: &ExclusionHandle) -> bool {
        let removed = self.registry.remove(handle);
        if removed {
            info!(
                "Process [{}/{}] deregistered",
                handle.pid(),
                handle.tid()
            );
        }
        removed
    }

    fn mark_active(
        &self,
        ctx: &ExecutionContext,
        handle: &ExclusionHandle,
    ) -> ExclusionResult<Activation> {
        let activation = self.registry.set_activity(ctx.identity(), handle, true)?;
        debug!("Process [{}-{}] active", ctx.pid(), ctx.tid());
        Ok(activation)
    }

    fn mark_idle(
        &self,
        ctx: &ExecutionContext,
        handle: &ExclusionHandle,
    ) -> ExclusionResult<Activation> {
        let activation = self.registry.set_activity(ctx.identity(), handle, false)?;
        debug!("Process [{}-{}] idle", ctx.pid(), ctx.tid());
        Ok(activation)
    }
}

impl Configurable for ExclusionProcessor {
    fn config_name(&self) -> &'static str {
        "ProcessExclusionProcessor"
    }

    fn all_config(&self) -> Vec<ConfigEntry> {
        vec![ConfigEntry {
            name: CFG_STATUS.to_string(),
            value: self.status.value().to_string(),
        }]
    }

    fn config(&self, name: &str) -> Option<String> {
        (name == CFG_STATUS).then(|| self.status.value().to_string())
    }

    fn set_config(&self, name: &str, value: &str) {
        // Cannot set that which does not exist
        if name != CFG_STATUS {
            return;
        }
        match value {
            CFG_ACTION_ENABLE => {
                self.status.enable();
            }
            CFG_ACTION_DISABLE => {
                self.status.disable();
            }
            _ => {}
        }
    }
}
