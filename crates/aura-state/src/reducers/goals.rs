use aura_types::Syscall;

use crate::state::GoalSlice;

pub(crate) fn reduce(slice: &GoalSlice, call: &Syscall) -> Option<GoalSlice> {
    match call {
        Syscall::PlantGoalTree { tree } => {
            let mut next = slice.clone();
            next.trees.push(tree.clone());
            Some(next)
        }
        Syscall::SetGoalStatus { goal, status } => {
            let mut next = slice.clone();
            let updated = next
                .trees
                .iter_mut()
                .any(|tree| tree.set_status(*goal, *status));
            updated.then_some(next)
        }
        _ => None,
    }
}
