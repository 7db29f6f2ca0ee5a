//! Authoring model: exams, pages, and questions.
//!
//! An [`Exam`] owns an ordered collection of [`Page`]s, each owning an
//! ordered collection of [`Question`]s. Identity is fixed at construction;
//! content is mutable until an attempt starts, at which point the exam is
//! shared read-only.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::marking::MarkingStrategy;

/// Result of validating an exam or a question. Collected errors, not an
/// `Err`: callers display them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the validated item can be attempted/marked as-is.
    pub valid: bool,
    /// Every rule violation found, in rule order.
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            errors,
        }
    }
}

/// Authoring difficulty label. Informational only; marking ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    NotSpecified,
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::NotSpecified => write!(f, "not specified"),
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "not specified" | "not_specified" => Ok(Difficulty::NotSpecified),
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// An exam definition: the unit a candidate attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    /// Unique identifier, fixed at construction.
    pub id: Uuid,
    /// Human-readable title.
    pub title: String,
    /// Longer description shown to candidates.
    pub description: String,
    /// Subject area label.
    pub subject: String,
    /// Tags for cataloguing.
    pub tags: Vec<String>,
    /// Authoring difficulty label.
    pub difficulty: Difficulty,
    /// Whether pages are presented in random order per attempt.
    pub randomise_page_order: bool,
    /// Pages, in authored order.
    pub pages: Vec<Page>,
    /// Whether submitted answers are scored at all.
    is_marked: bool,
    /// Fraction of the maximum possible mark required to pass, in [0, 1].
    passing_mark_percentage: Decimal,
}

impl Exam {
    /// Create an empty exam. The passing mark percentage defaults to 0.7.
    pub fn new(title: impl Into<String>, is_marked: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            subject: String::new(),
            tags: Vec::new(),
            difficulty: Difficulty::NotSpecified,
            randomise_page_order: false,
            pages: Vec::new(),
            is_marked,
            passing_mark_percentage: Decimal::new(7, 1),
        }
    }

    pub fn is_marked(&self) -> bool {
        self.is_marked
    }

    pub fn passing_mark_percentage(&self) -> Decimal {
        self.passing_mark_percentage
    }

    /// Set the passing mark percentage. Returns `false` (and leaves the
    /// current value in place) when outside [0, 1].
    pub fn set_passing_mark_percentage(&mut self, percentage: Decimal) -> bool {
        if percentage < Decimal::ZERO || percentage > Decimal::ONE {
            return false;
        }
        self.passing_mark_percentage = percentage;
        true
    }

    /// Validate that the exam can be attempted. Rules are checked in order
    /// and every violation is collected; nothing short-circuits.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        if self.pages.is_empty() {
            errors.push("exam has no pages".to_string());
        }

        if self.questions().next().is_none() {
            errors.push("exam has no questions".to_string());
        }

        if self.is_marked {
            let counting: Vec<&Question> = self.questions_counting_towards_mark().collect();
            if counting.is_empty() {
                errors.push(
                    "exam is marked but has no questions that count towards the mark".to_string(),
                );
            } else {
                for question in counting {
                    errors.extend(question.validate().errors);
                }
            }
        }

        if errors.is_empty() {
            ValidationResult::ok()
        } else {
            ValidationResult::invalid(errors)
        }
    }

    /// All questions across all pages, in authored order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.pages.iter().flat_map(|p| p.questions.iter())
    }

    /// Questions whose mark contributes to the exam total.
    pub fn questions_counting_towards_mark(&self) -> impl Iterator<Item = &Question> {
        self.questions().filter(|q| q.counts_towards_marking)
    }

    /// Look up a question anywhere in the exam.
    pub fn question(&self, id: Uuid) -> Option<&Question> {
        self.questions().find(|q| q.id == id)
    }

    /// Sum of every page's maximum possible mark.
    pub fn maximum_possible_mark(&self) -> Decimal {
        self.pages.iter().map(Page::maximum_possible_mark).sum()
    }

    /// The mark a candidate must reach to pass.
    pub fn passing_mark_total(&self) -> Decimal {
        self.maximum_possible_mark() * self.passing_mark_percentage
    }
}

/// A page of questions within an exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// 1-based position within the exam's presentation order.
    pub order: u32,
    /// Whether this page's questions are presented in random order per attempt.
    pub randomise_question_order: bool,
    pub questions: Vec<Question>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            order: 1,
            randomise_question_order: false,
            questions: Vec::new(),
        }
    }

    /// Sum of this page's questions' maximum possible marks.
    pub fn maximum_possible_mark(&self) -> Decimal {
        self.questions
            .iter()
            .map(Question::maximum_possible_mark)
            .sum()
    }
}

/// A single question: common fields plus a kind-specific payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub prompt: String,
    pub description: String,
    pub hint: String,
    /// Feedback shown to candidates after marking.
    pub feedback: String,
    /// Whether this question's mark contributes to the exam total.
    pub counts_towards_marking: bool,
    /// 1-based position within the page's presentation order.
    pub order: u32,
    /// The scoring strategy bound to this question.
    pub strategy: MarkingStrategy,
    pub kind: QuestionKind,
}

/// Kind-specific question payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<String>,
        correct_answers: Vec<String>,
    },
    FreeText {
        expected_answer: String,
        keywords: Vec<String>,
        use_exact_match: bool,
    },
    Slider {
        min_value: i32,
        max_value: i32,
        passing_threshold: i32,
        reverse_passing_threshold: bool,
    },
}

impl QuestionKind {
    pub fn name(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => "multiple choice",
            QuestionKind::FreeText { .. } => "free text",
            QuestionKind::Slider { .. } => "slider",
        }
    }
}

impl Question {
    fn base(prompt: impl Into<String>, strategy: MarkingStrategy, kind: QuestionKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt: prompt.into(),
            description: String::new(),
            hint: String::new(),
            feedback: String::new(),
            counts_towards_marking: true,
            order: 1,
            strategy,
            kind,
        }
    }

    /// A multiple choice question, marked all-or-nothing by default.
    pub fn multiple_choice(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answers: Vec<String>,
    ) -> Self {
        Self::base(
            prompt,
            MarkingStrategy::AllOrNothing,
            QuestionKind::MultipleChoice {
                options,
                correct_answers,
            },
        )
    }

    /// A free text question marked by exact (normalized) comparison.
    pub fn free_text_exact(prompt: impl Into<String>, expected_answer: impl Into<String>) -> Self {
        Self::base(
            prompt,
            MarkingStrategy::FreeText,
            QuestionKind::FreeText {
                expected_answer: expected_answer.into(),
                keywords: Vec::new(),
                use_exact_match: true,
            },
        )
    }

    /// A free text question marked by keyword presence.
    pub fn free_text_keywords(prompt: impl Into<String>, keywords: Vec<String>) -> Self {
        Self::base(
            prompt,
            MarkingStrategy::FreeText,
            QuestionKind::FreeText {
                expected_answer: String::new(),
                keywords,
                use_exact_match: false,
            },
        )
    }

    /// A slider question passing at `passing_threshold` and above, or below
    /// when `reverse` is set.
    pub fn slider(
        prompt: impl Into<String>,
        min_value: i32,
        max_value: i32,
        passing_threshold: i32,
        reverse: bool,
    ) -> Self {
        Self::base(
            prompt,
            MarkingStrategy::slider_threshold(),
            QuestionKind::Slider {
                min_value,
                max_value,
                passing_threshold,
                reverse_passing_threshold: reverse,
            },
        )
    }

    /// Switch a multiple choice question to all-or-nothing marking.
    pub fn use_all_or_nothing_marking(&mut self) {
        self.strategy = MarkingStrategy::AllOrNothing;
    }

    /// Switch a multiple choice question to partial credit marking with the
    /// default point/penalty parameters.
    pub fn use_partial_credit_marking(&mut self) {
        self.strategy = MarkingStrategy::partial_credit();
    }

    /// Validate this question's structural constraints.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        match &self.kind {
            QuestionKind::MultipleChoice {
                options,
                correct_answers,
            } => {
                if options.len() < 2 {
                    errors.push(format!(
                        "a multiple choice question must have at least 2 options ({})",
                        self.id
                    ));
                }
                if self.counts_towards_marking {
                    if correct_answers.is_empty() {
                        errors.push(format!(
                            "a multiple choice question must have at least 1 correct answer ({})",
                            self.id
                        ));
                    }
                    for correct in correct_answers {
                        if !options.contains(correct) {
                            errors.push(format!(
                                "correct answer '{correct}' is not in the list of options ({})",
                                self.id
                            ));
                        }
                    }
                }
            }
            QuestionKind::FreeText {
                expected_answer,
                keywords,
                use_exact_match,
            } => {
                if self.counts_towards_marking {
                    if *use_exact_match && expected_answer.is_empty() {
                        errors.push(format!(
                            "a free text question needs an expected answer ({})",
                            self.id
                        ));
                    }
                    if !*use_exact_match && keywords.is_empty() {
                        errors.push(format!(
                            "a free text question needs expected keywords ({})",
                            self.id
                        ));
                    }
                }
            }
            QuestionKind::Slider {
                min_value,
                max_value,
                passing_threshold,
                ..
            } => {
                if min_value >= max_value {
                    errors.push(format!(
                        "a slider question needs a min value less than the max value ({})",
                        self.id
                    ));
                }
                if passing_threshold > max_value || passing_threshold < min_value {
                    errors.push(format!(
                        "a slider question needs a passing threshold within its range ({})",
                        self.id
                    ));
                }
            }
        }

        if errors.is_empty() {
            ValidationResult::ok()
        } else {
            ValidationResult::invalid(errors)
        }
    }

    /// The highest mark this question can contribute to the exam total.
    /// Zero when the question does not count towards marking.
    pub fn maximum_possible_mark(&self) -> Decimal {
        if !self.counts_towards_marking {
            return Decimal::ZERO;
        }

        match (&self.kind, &self.strategy) {
            (
                QuestionKind::MultipleChoice { correct_answers, .. },
                MarkingStrategy::PartialCredit { .. },
            ) => {
                let distinct: HashSet<&String> = correct_answers.iter().collect();
                Decimal::from(distinct.len() as u64)
            }
            _ => Decimal::ONE,
        }
    }
}
