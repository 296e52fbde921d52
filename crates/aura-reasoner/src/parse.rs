//! Helpers that turn raw model output into typed values. Triage verdicts are
//! validated against a JSON schema before deserialization so malformed
//! classifications fail loudly at the parse layer and callers can degrade.

use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde_json::Value;

use aura_types::{BrainstormIdea, DocumentOutline, TriageVerdict};

use crate::errors::ReasonerError;

static TRIAGE_SCHEMA: Lazy<JSONSchema> = Lazy::new(|| {
    let schema = serde_json::json!({
        "type": "object",
        "required": ["category", "goal", "reasoning"],
        "properties": {
            "category": {
                "type": "string",
                "enum": [
                    "simple_chat", "code_task", "complex_task", "math_proof",
                    "brainstorm", "vision", "symbolic_solve"
                ]
            },
            "goal": { "type": "string" },
            "reasoning": { "type": "string" },
            "code": { "type": ["string", "null"] }
        }
    });
    JSONSchema::compile(&schema).expect("triage schema is valid")
});

/// Strip a single surrounding markdown fence (```lang ... ```), if present.
pub fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    // Drop the info string on the opening fence line.
    let body = match rest.split_once('\n') {
        Some((_info, body)) => body,
        None => rest,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
        .to_string()
}

/// Parse model output as JSON, tolerating fences and prose around the value.
pub fn extract_json(raw: &str) -> Result<Value, ReasonerError> {
    let cleaned = strip_code_fences(raw);
    if let Ok(value) = serde_json::from_str(&cleaned) {
        return Ok(value);
    }
    // Fall back to the outermost object or array embedded in prose.
    for (open, close) in [('{', '}'), ('[', ']')] {
        if let (Some(start), Some(end)) = (cleaned.find(open), cleaned.rfind(close)) {
            if start < end {
                if let Ok(value) = serde_json::from_str(&cleaned[start..=end]) {
                    return Ok(value);
                }
            }
        }
    }
    Err(ReasonerError::Parse(format!(
        "no JSON value in output: {}",
        truncate(&cleaned, 120)
    )))
}

/// Parse and schema-validate a triage verdict.
pub fn triage_verdict(raw: &str) -> Result<TriageVerdict, ReasonerError> {
    let value = extract_json(raw)?;
    if let Err(errors) = TRIAGE_SCHEMA.validate(&value) {
        let detail = errors
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ReasonerError::Schema(detail));
    }
    serde_json::from_value(value).map_err(|err| ReasonerError::Parse(err.to_string()))
}

/// Parse an ordered subtask list: a JSON array of strings, or numbered lines
/// when the model ignored the format instruction.
pub fn subtask_list(raw: &str) -> Result<Vec<String>, ReasonerError> {
    if let Ok(Value::Array(items)) = extract_json(raw) {
        let subtasks: Vec<String> = items
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect();
        if !subtasks.is_empty() {
            return Ok(subtasks);
        }
    }
    let lines: Vec<String> = raw
        .lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == '-')
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        return Err(ReasonerError::Parse("empty subtask list".into()));
    }
    Ok(lines)
}

pub fn document_outline(raw: &str) -> Result<DocumentOutline, ReasonerError> {
    let value = extract_json(raw)?;
    serde_json::from_value(value).map_err(|err| ReasonerError::Parse(err.to_string()))
}

pub fn brainstorm_ideas(raw: &str) -> Result<Vec<BrainstormIdea>, ReasonerError> {
    let value = extract_json(raw)?;
    serde_json::from_value(value).map_err(|err| ReasonerError::Parse(err.to_string()))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_types::TriageCategory;

    #[test]
    fn strips_fences_with_info_string() {
        let raw = "```python\nprint(1)\n```";
        assert_eq!(strip_code_fences(raw), "print(1)");
        assert_eq!(strip_code_fences("plain"), "plain");
    }

    #[test]
    fn extracts_json_from_prose() {
        let raw = "Sure! Here you go: {\"goal\": \"x\"} hope that helps";
        let value = extract_json(raw).unwrap();
        assert_eq!(value["goal"], "x");
    }

    #[test]
    fn triage_accepts_valid_verdict() {
        let raw = r#"{"category":"code_task","goal":"sort a list","reasoning":"asks for code"}"#;
        let verdict = triage_verdict(raw).unwrap();
        assert_eq!(verdict.category, TriageCategory::CodeTask);
        assert_eq!(verdict.goal, "sort a list");
    }

    #[test]
    fn triage_rejects_unknown_category() {
        let raw = r#"{"category":"interpretive_dance","goal":"g","reasoning":"r"}"#;
        assert!(matches!(
            triage_verdict(raw),
            Err(ReasonerError::Schema(_))
        ));
    }

    #[test]
    fn triage_rejects_non_json() {
        assert!(triage_verdict("I cannot classify that").is_err());
    }

    #[test]
    fn subtasks_fall_back_to_numbered_lines() {
        let raw = "1. survey the field\n2. build a prototype\n3. evaluate";
        let subtasks = subtask_list(raw).unwrap();
        assert_eq!(subtasks.len(), 3);
        assert_eq!(subtasks[1], "build a prototype");
    }
}
