use serde::{Deserialize, Serialize};

/// One chapter stub in a document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterOutline {
    pub id: String,
    pub title: String,
}

/// Outline returned by the Reasoning Service before chapter generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    pub title: String,
    pub chapters: Vec<ChapterOutline>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgedChapter {
    pub title: String,
    /// Markdown body.
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgedDocument {
    pub title: String,
    pub chapters: Vec<ForgedChapter>,
}

/// Forge progress, updated between stages so observers can render per-chapter
/// progress before the task completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum ForgeStatus {
    #[default]
    Idle,
    Outlining,
    WritingChapter {
        index: usize,
        total: usize,
        title: String,
    },
    Done,
    Failed {
        reason: String,
    },
}
