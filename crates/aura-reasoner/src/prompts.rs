//! Prompt templates. Kept in one place so adapters stay thin wrappers around
//! transport and parsing.

use aura_types::{ChatMode, HistoryEntry, Language, Role};

use crate::types::ChatRequest;

/// Render the transcript plus request context into a single prompt string.
pub fn chat(request: &ChatRequest) -> String {
    if let Some(override_prompt) = &request.prompt_override {
        return override_prompt.clone();
    }

    let mut prompt = String::new();
    match request.mode {
        Some(ChatMode::Vision) => {
            prompt.push_str("You are Aura. Describe and reason about the visual scene the user refers to.\n\n");
        }
        Some(ChatMode::GapAnalysis) => {
            prompt.push_str("You are Aura. Analyze the plan below for gaps, risks and missing steps.\n\n");
        }
        Some(ChatMode::Plain) | None => {
            prompt.push_str("You are Aura, a helpful cognitive assistant. Reply to the user.\n\n");
        }
    }
    if let Some(strategy) = &request.strategy {
        prompt.push_str(&format!("Active strategy: {strategy}\n\n"));
    }
    prompt.push_str(&render_transcript(&request.history));
    prompt.push_str("\nbot:");
    prompt
}

fn render_transcript(history: &[HistoryEntry]) -> String {
    let mut out = String::new();
    for entry in history {
        let speaker = match entry.role {
            Role::User => "user",
            Role::Bot => "bot",
            Role::System => "system",
            Role::Tool => "tool",
        };
        out.push_str(speaker);
        out.push_str(": ");
        out.push_str(entry.display_text());
        out.push('\n');
    }
    out
}

pub fn triage(command: &str) -> String {
    format!(
        "Classify the user command into exactly one category: simple_chat, \
         code_task, complex_task, math_proof, brainstorm, vision, or \
         symbolic_solve. Respond with JSON only, matching \
         {{\"category\": ..., \"goal\": ..., \"reasoning\": ..., \"code\": null}}. \
         The goal is a short restatement of what the user wants.\n\n\
         Command: {command}"
    )
}

pub fn decompose(goal: &str) -> String {
    format!(
        "Break the following goal into an ordered list of concrete subtasks. \
         Respond with a JSON array of strings, nothing else.\n\nGoal: {goal}"
    )
}

pub fn generate_code(language: Language, goal: &str) -> String {
    format!(
        "Write a complete {language} program that accomplishes the goal below. \
         Output raw source only, with no markdown fences and no commentary.\n\n\
         Goal: {goal}"
    )
}

pub fn math_verification(claim: &str) -> String {
    format!(
        "Write a Python program that checks the following mathematical claim \
         symbolically or numerically and prints VERIFIED or REFUTED with a \
         short justification. Output raw Python only, no fences.\n\n\
         Claim: {claim}"
    )
}

pub fn outline(goal: &str) -> String {
    format!(
        "Produce a chapter outline for a document about the goal below. \
         Respond with JSON only: {{\"title\": ..., \"chapters\": \
         [{{\"id\": ..., \"title\": ...}}]}}.\n\nGoal: {goal}"
    )
}

pub fn chapter(title: &str, context: &str) -> String {
    format!(
        "Write the chapter titled \"{title}\" in Markdown. Context for the \
         document so far:\n{context}\n\nOutput the chapter body only."
    )
}

pub fn brainstorm(topic: &str, personas: &[String]) -> String {
    format!(
        "Brainstorm ideas on the topic below. Adopt each persona in turn: {}. \
         Respond with JSON only: an array of {{\"persona\": ..., \"idea\": ...}}.\n\n\
         Topic: {topic}",
        personas.join(", ")
    )
}

/// Prompt for the follow-up chat task chained after strategic decomposition.
pub fn gap_analysis(goal: &str, subtasks: &[String]) -> String {
    let mut plan = String::new();
    for (index, subtask) in subtasks.iter().enumerate() {
        plan.push_str(&format!("{}. {subtask}\n", index + 1));
    }
    format!(
        "The goal \"{goal}\" was decomposed into this plan:\n{plan}\n\
         Explain the plan to the user and point out any gaps, risks or \
         prerequisites the decomposition missed."
    )
}

pub fn explain_verification(claim: &str, output: &str) -> String {
    format!(
        "A verification program was run for the claim \"{claim}\" and printed:\n\
         {output}\n\nExplain in plain language what this result means for the claim."
    )
}
