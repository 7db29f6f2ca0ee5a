//! Caller-facing projections: question/page/answer views and the final
//! exam result.
//!
//! Views are what an attempt exposes to a UI or API layer. They carry no
//! solution data; the correct answer is only reachable through
//! [`crate::attempt::ExamAttempt::correct_answer_for_question`].

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attempt::{Answer, AnswerValue};
use crate::model::{Question, QuestionKind};

/// Display projection of a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionView {
    pub question_id: Uuid,
    pub prompt: String,
    pub description: String,
    pub hint: String,
    pub feedback: String,
    pub counts_towards_marking: bool,
    pub detail: QuestionDetailView,
}

/// Kind-specific display detail. Deliberately excludes correct answers,
/// expected text and thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionDetailView {
    MultipleChoice { options: Vec<String> },
    FreeText,
    Slider { min_value: i32, max_value: i32 },
}

impl QuestionView {
    pub(crate) fn from_question(question: &Question) -> Self {
        let detail = match &question.kind {
            QuestionKind::MultipleChoice { options, .. } => QuestionDetailView::MultipleChoice {
                options: options.clone(),
            },
            QuestionKind::FreeText { .. } => QuestionDetailView::FreeText,
            QuestionKind::Slider {
                min_value,
                max_value,
                ..
            } => QuestionDetailView::Slider {
                min_value: *min_value,
                max_value: *max_value,
            },
        };

        Self {
            question_id: question.id,
            prompt: question.prompt.clone(),
            description: question.description.clone(),
            hint: question.hint.clone(),
            feedback: question.feedback.clone(),
            counts_towards_marking: question.counts_towards_marking,
            detail,
        }
    }
}

/// Display projection of an answer, with its awarded mark once marked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerView {
    pub question_id: Uuid,
    pub mark: Option<Decimal>,
    pub given: AnswerValue,
}

impl AnswerView {
    pub(crate) fn from_answer(answer: &Answer) -> Self {
        Self {
            question_id: answer.question_id,
            mark: answer.mark,
            given: answer.given.clone(),
        }
    }
}

/// Display projection of the attempt's current page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageView {
    pub title: String,
    pub description: String,
    pub question_count: usize,
    /// 1-based position within the attempt's presentation order.
    pub position: usize,
    pub page_count: usize,
}

/// Outcome of a submitted attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamStatus {
    /// The exam is unmarked; answers were recorded but not scored.
    NotMarked,
    Passed,
    Failed,
}

impl fmt::Display for ExamStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamStatus::NotMarked => write!(f, "not marked"),
            ExamStatus::Passed => write!(f, "passed"),
            ExamStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Snapshot produced when an attempt is submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResult {
    pub exam_id: Uuid,
    pub attempt_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    pub status: ExamStatus,
    /// Total awarded mark, rounded; `None` for unmarked exams.
    pub mark: Option<Decimal>,
    pub maximum_possible_mark: Option<Decimal>,
    pub passing_mark: Option<Decimal>,
    /// Every stored answer, with individual marks where awarded.
    pub answers: Vec<AnswerView>,
}

impl ExamResult {
    /// Save the result as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize result")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write result to {}", path.display()))?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read result from {}", path.display()))?;
        let result: ExamResult =
            serde_json::from_str(&content).context("failed to parse result JSON")?;
        Ok(result)
    }
}
