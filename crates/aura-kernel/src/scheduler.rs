//! Promotion step. Reads state and decides whether to issue the single
//! conditional mutation that moves the queue head into the running slot. The
//! reducer for `PromoteHead` is itself a no-op on an occupied slot, so the
//! whole step is safe to invoke redundantly.

use aura_state::AuraState;

/// True when the scheduler should promote: unpaused, idle slot, work queued.
pub fn should_promote(state: &AuraState) -> bool {
    !state.session.paused
        && state.kernel.running_task.is_none()
        && !state.kernel.task_queue.is_empty()
}
