//! Crystallized skills: pattern-matched fast paths that run a pre-registered
//! code body without consulting the Reasoning Service.

use regex::Regex;

use aura_types::Language;

#[derive(Debug, Clone)]
pub struct CrystallizedSkill {
    pub name: String,
    /// Regex tested against the raw user command.
    pub trigger: String,
    pub language: Language,
    /// Code body; occurrences of `{{command}}` are replaced with the raw
    /// command at execution time.
    pub code: String,
}

#[derive(Debug, Default)]
pub struct SkillRegistry {
    skills: Vec<CrystallizedSkill>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, skill: CrystallizedSkill) {
        self.skills.push(skill);
    }

    pub fn get(&self, name: &str) -> Option<&CrystallizedSkill> {
        self.skills.iter().find(|skill| skill.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// First skill whose trigger matches the command. A trigger that fails to
    /// compile is skipped so one bad pattern never blocks input processing.
    pub fn match_command(&self, input: &str) -> Option<&CrystallizedSkill> {
        for skill in &self.skills {
            match Regex::new(&skill.trigger) {
                Ok(trigger) => {
                    if trigger.is_match(input) {
                        return Some(skill);
                    }
                }
                Err(err) => {
                    log::warn!(
                        "skill '{}' trigger failed to compile, skipping: {err}",
                        skill.name
                    );
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str, trigger: &str) -> CrystallizedSkill {
        CrystallizedSkill {
            name: name.into(),
            trigger: trigger.into(),
            language: Language::Python,
            code: "print('ok')".into(),
        }
    }

    #[test]
    fn first_match_wins() {
        let mut registry = SkillRegistry::new();
        registry.register(skill("time", r"^!time\b"));
        registry.register(skill("echo", r"^!\w+"));

        assert_eq!(registry.match_command("!time now").unwrap().name, "time");
        assert_eq!(registry.match_command("!echo hi").unwrap().name, "echo");
        assert!(registry.match_command("hello").is_none());
    }

    #[test]
    fn invalid_trigger_does_not_block_later_skills() {
        let mut registry = SkillRegistry::new();
        registry.register(skill("broken", r"(unclosed"));
        registry.register(skill("works", r"^!go"));

        assert_eq!(registry.match_command("!go").unwrap().name, "works");
        assert!(registry.match_command("nothing").is_none());
    }
}
