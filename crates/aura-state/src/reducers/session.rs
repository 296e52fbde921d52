use aura_types::Syscall;

use crate::state::SessionSlice;

pub(crate) fn reduce(slice: &SessionSlice, call: &Syscall) -> Option<SessionSlice> {
    match call {
        Syscall::SetPaused { paused } => {
            if slice.paused == *paused {
                return None;
            }
            let mut next = slice.clone();
            next.paused = *paused;
            Some(next)
        }
        _ => None,
    }
}
