//! Pure slice reducers. Each reducer sees one slice and one syscall and
//! returns a replacement slice only when the syscall touches it; the root
//! [`reduce`] merges the patches. Reducers never read or write outside their
//! declared slice.

mod forge;
mod goals;
mod history;
mod kernel;
mod session;

use aura_types::Syscall;

use crate::state::AuraState;

/// Apply one syscall to the state tree, returning the next state. Untouched
/// slices are carried over unchanged.
pub fn reduce(state: &AuraState, call: &Syscall) -> AuraState {
    AuraState {
        kernel: kernel::reduce(&state.kernel, call).unwrap_or_else(|| state.kernel.clone()),
        history: history::reduce(&state.history, call).unwrap_or_else(|| state.history.clone()),
        goals: goals::reduce(&state.goals, call).unwrap_or_else(|| state.goals.clone()),
        forge: forge::reduce(&state.forge, call).unwrap_or_else(|| state.forge.clone()),
        session: session::reduce(&state.session, call).unwrap_or_else(|| state.session.clone()),
    }
}
