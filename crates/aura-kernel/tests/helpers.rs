use std::sync::Arc;

use aura_kernel::{Kernel, SkillRegistry};
use aura_reasoner::ScriptedReasoner;
use aura_sandbox::StaticRuntime;
use aura_state::Store;
use aura_types::{TriageCategory, TriageVerdict};

/// Kernel wired to scripted collaborators, with handles kept for scripting
/// and assertions.
pub struct TestWorld {
    pub kernel: Kernel,
    pub reasoner: Arc<ScriptedReasoner>,
    pub runtime: Arc<StaticRuntime>,
}

pub fn world() -> TestWorld {
    world_with_skills(SkillRegistry::new())
}

pub fn world_with_skills(skills: SkillRegistry) -> TestWorld {
    let reasoner = Arc::new(ScriptedReasoner::new());
    let runtime = Arc::new(StaticRuntime::new());
    let kernel = Kernel::new(Store::in_memory(), reasoner.clone(), runtime.clone())
        .with_skills(skills);
    TestWorld {
        kernel,
        reasoner,
        runtime,
    }
}

pub fn verdict(category: TriageCategory, goal: &str) -> TriageVerdict {
    TriageVerdict {
        category,
        goal: goal.into(),
        reasoning: "scripted".into(),
        code: None,
    }
}
