use aura_types::Syscall;

use crate::state::ForgeSlice;

pub(crate) fn reduce(slice: &ForgeSlice, call: &Syscall) -> Option<ForgeSlice> {
    match call {
        Syscall::SetForgeStatus { status } => {
            let mut next = slice.clone();
            next.status = status.clone();
            Some(next)
        }
        Syscall::SetForgeDocument { document } => {
            let mut next = slice.clone();
            next.document = Some(document.clone());
            Some(next)
        }
        _ => None,
    }
}
