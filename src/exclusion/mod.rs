/*!
 * Exclusion Module
 *
 * The concurrent exclusion registry and its state machine:
 * - Copy-on-write record list with wait-free lookup
 * - Writer-serialized mutation with reclamation deferred past in-flight readers
 * - Active/idle transitions with implicit re-registration
 */

mod registry;
mod state;
mod types;

pub use registry::ExclusionRegistry;
pub use state::{Activation, ExclusionState, Transition};
pub use types::{
    ExclusionError, ExclusionHandle, ExclusionResult, ExclusionStats, ProcessIdentity,
};
