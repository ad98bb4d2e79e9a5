/*!
 * Exclusion State Machine
 * Active/idle transitions layered on the registry
 */

use log::debug;
use serde::{Deserialize, Serialize};

use super::registry::ExclusionRegistry;
use super::types::{ExclusionHandle, ExclusionResult, ProcessIdentity};
use crate::core::types::FilesTableId;

/// Observable exclusion state of an identity.
///
/// Lifecycle: `Unregistered` → `Idle` ⇄ `Active` → `Unregistered` again on
/// deregistration (the record is reclaimed; a deregistered identity is
/// indistinguishable from one that never registered).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionState {
    /// No record for this identity
    Unregistered,
    /// Registered, interception evaluates normally
    Idle,
    /// Registered, interception is bypassed
    Active,
}

/// How an activity change was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// The flag was flipped on a record already in the registry
    InPlace,
    /// The handle was no longer a member; a fresh record was registered
    /// first, then flagged
    ImplicitRegister,
}

/// Result of an activity change: the record now carrying the flag, which is
/// a fresh one after an implicit registration
#[derive(Debug, Clone)]
pub struct Activation {
    pub handle: ExclusionHandle,
    pub transition: Transition,
}

impl ExclusionRegistry {
    /// Set the active flag for the record named by `handle`.
    ///
    /// If the handle is no longer a member (the registry was reset out from
    /// under the caller), a fresh record is registered under `source` and
    /// flagged instead, so this call always leaves a valid record in the
    /// requested state. It fails only if that implicit registration cannot
    /// allocate.
    pub fn set_activity(
        &self,
        source: ProcessIdentity,
        handle: &ExclusionHandle,
        active: bool,
    ) -> ExclusionResult<Activation> {
        if self.contains(handle) {
            // A concurrent remove may win between the membership check and
            // the flip; the flip then lands on an unlinked record, which no
            // reader can observe.
            handle.set_active(active);
            return Ok(Activation {
                handle: handle.clone(),
                transition: Transition::InPlace,
            });
        }

        debug!(
            "Process [{}/{}] implicitly re-registering",
            source.pid, source.tid
        );
        let fresh = self.insert(source)?;
        fresh.set_active(active);
        Ok(Activation {
            handle: fresh,
            transition: Transition::ImplicitRegister,
        })
    }

    /// Observable state of `identity` in the current snapshot
    #[must_use]
    pub fn state_of(&self, identity: FilesTableId) -> ExclusionState {
        match self.lookup(identity) {
            Some(handle) if handle.is_active() => ExclusionState::Active,
            Some(_) => ExclusionState::Idle,
            None => ExclusionState::Unregistered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(key: u64) -> ProcessIdentity {
        ProcessIdentity::new(FilesTableId::new(key), key as u32, key as u32)
    }

    #[test]
    fn activity_on_member_flips_in_place() {
        let registry = ExclusionRegistry::new();
        let handle = registry.insert(source(3)).unwrap();

        let activation = registry.set_activity(source(3), &handle, true).unwrap();
        assert_eq!(activation.transition, Transition::InPlace);
        assert!(activation.handle.ptr_eq(&handle));
        assert_eq!(registry.state_of(FilesTableId::new(3)), ExclusionState::Active);

        let activation = registry.set_activity(source(3), &handle, false).unwrap();
        assert_eq!(activation.transition, Transition::InPlace);
        assert_eq!(registry.state_of(FilesTableId::new(3)), ExclusionState::Idle);
    }

    #[test]
    fn activity_after_reset_registers_implicitly() {
        let registry = ExclusionRegistry::new();
        let stale = registry.insert(source(3)).unwrap();
        registry.drain();

        let activation = registry.set_activity(source(3), &stale, true).unwrap();
        assert_eq!(activation.transition, Transition::ImplicitRegister);
        assert!(!activation.handle.ptr_eq(&stale));
        assert_eq!(registry.state_of(FilesTableId::new(3)), ExclusionState::Active);
        // The stale record itself was not resurrected
        assert!(!registry.contains(&stale));
    }

    #[test]
    fn idle_after_reset_registers_idle() {
        let registry = ExclusionRegistry::new();
        let stale = registry.insert(source(9)).unwrap();
        registry.drain();

        let activation = registry.set_activity(source(9), &stale, false).unwrap();
        assert_eq!(activation.transition, Transition::ImplicitRegister);
        assert_eq!(registry.state_of(FilesTableId::new(9)), ExclusionState::Idle);
    }

    #[test]
    fn full_lifecycle_states() {
        let registry = ExclusionRegistry::new();
        let identity = FilesTableId::new(42);
        assert_eq!(registry.state_of(identity), ExclusionState::Unregistered);

        let handle = registry.insert(source(42)).unwrap();
        assert_eq!(registry.state_of(identity), ExclusionState::Idle);

        registry.set_activity(source(42), &handle, true).unwrap();
        assert_eq!(registry.state_of(identity), ExclusionState::Active);

        registry.set_activity(source(42), &handle, false).unwrap();
        assert_eq!(registry.state_of(identity), ExclusionState::Idle);

        assert!(registry.remove(&handle));
        assert_eq!(registry.state_of(identity), ExclusionState::Unregistered);
    }
}
