/*!
 * Runtime Configuration
 * Enable/disable toggle and the config table for the exclusion processor
 */

use log::info;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Recognized configuration key
pub const CFG_STATUS: &str = "status";

/// Reported value while enabled
pub const CFG_VALUE_ENABLED: &str = "enabled";
/// Reported value while disabled
pub const CFG_VALUE_DISABLED: &str = "disabled";
/// Action enabling the processor
pub const CFG_ACTION_ENABLE: &str = "enable";
/// Action disabling the processor
pub const CFG_ACTION_DISABLE: &str = "disable";

/// Single named configuration entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ConfigEntry {
    pub name: String,
    pub value: String,
}

/// Runtime status toggle.
///
/// The flag is read lock-free on every intercepted operation; transitions
/// are serialized by a dedicated mutex so configuration changes never block
/// or are blocked by interception reads or registry mutation.
#[derive(Debug)]
pub struct StatusConfig {
    enabled: AtomicBool,
    /// Serializes enable/disable transitions only
    serialize: Mutex<()>,
}

impl StatusConfig {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            serialize: Mutex::new(()),
        }
    }

    /// # Performance
    /// Hot path - checked on every intercepted operation
    #[inline(always)]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Enable the processor; returns whether the state changed.
    ///
    /// Idempotent: a second call is a silent no-op.
    pub fn enable(&self) -> bool {
        let _serialized = self.serialize.lock();
        if self.enabled.load(Ordering::Relaxed) {
            return false;
        }
        self.enabled.store(true, Ordering::Relaxed);
        info!("Enabled");
        true
    }

    /// Disable the processor; returns whether the state changed.
    ///
    /// Idempotent: a second call is a silent no-op.
    pub fn disable(&self) -> bool {
        let _serialized = self.serialize.lock();
        if !self.enabled.load(Ordering::Relaxed) {
            return false;
        }
        self.enabled.store(false, Ordering::Relaxed);
        info!("Disabled");
        true
    }

    /// Current value of the `status` entry
    #[must_use]
    pub fn value(&self) -> &'static str {
        if self.is_enabled() {
            CFG_VALUE_ENABLED
        } else {
            CFG_VALUE_DISABLED
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enable_is_idempotent() {
        let status = StatusConfig::new(false);
        assert!(status.enable());
        assert!(!status.enable(), "second enable must be a no-op");
        assert!(status.is_enabled());
        assert_eq!(status.value(), CFG_VALUE_ENABLED);
    }

    #[test]
    fn disable_is_idempotent() {
        let status = StatusConfig::default();
        assert!(status.disable());
        assert!(!status.disable(), "second disable must be a no-op");
        assert!(!status.is_enabled());
        assert_eq!(status.value(), CFG_VALUE_DISABLED);
    }
}
