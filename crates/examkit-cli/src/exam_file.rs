//! TOML exam definition and answers file formats.
//!
//! The core library defines no file format; these structures belong to the
//! CLI. Exam files are parsed into intermediate serde structs and mapped
//! into domain types, so file-level defaults and error reporting stay out
//! of the domain model.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use examkit_core::attempt::AnswerValue;
use examkit_core::marking::MarkingStrategy;
use examkit_core::model::{Difficulty, Exam, Page, Question};

#[derive(Debug, Deserialize)]
struct TomlExamFile {
    exam: TomlExamHeader,
    #[serde(default)]
    pages: Vec<TomlPage>,
}

#[derive(Debug, Deserialize)]
struct TomlExamHeader {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default = "default_true")]
    is_marked: bool,
    #[serde(default)]
    randomise_page_order: bool,
    #[serde(default)]
    passing_mark_percentage: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TomlPage {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    order: Option<u32>,
    #[serde(default)]
    randomise_question_order: bool,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    kind: String,
    prompt: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    hint: String,
    #[serde(default)]
    feedback: String,
    #[serde(default = "default_true")]
    counts_towards_marking: bool,
    #[serde(default)]
    order: Option<u32>,

    /// Multiple choice: "all_or_nothing" (default) or "partial_credit".
    #[serde(default)]
    marking: Option<String>,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_answers: Vec<String>,
    #[serde(default)]
    point_per_correct: Option<f64>,
    #[serde(default)]
    penalty_per_incorrect: Option<f64>,

    // Free text.
    #[serde(default)]
    expected_answer: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    use_exact_match: Option<bool>,

    // Slider.
    #[serde(default)]
    min_value: Option<i32>,
    #[serde(default)]
    max_value: Option<i32>,
    #[serde(default)]
    passing_threshold: Option<i32>,
    #[serde(default)]
    reverse_passing_threshold: bool,
}

fn default_true() -> bool {
    true
}

/// Parse a single TOML file into an `Exam`.
pub fn parse_exam(path: &Path) -> Result<Exam> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exam file: {}", path.display()))?;
    parse_exam_str(&content, path)
}

/// Parse a TOML string into an `Exam` (useful for testing).
pub fn parse_exam_str(content: &str, source_path: &Path) -> Result<Exam> {
    let parsed: TomlExamFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let header = parsed.exam;
    let mut exam = Exam::new(header.title, header.is_marked);
    exam.description = header.description;
    exam.subject = header.subject;
    exam.tags = header.tags;
    exam.randomise_page_order = header.randomise_page_order;

    if let Some(label) = header.difficulty {
        exam.difficulty = label
            .parse::<Difficulty>()
            .map_err(|e| anyhow::anyhow!("{e}"))?;
    }

    if let Some(percentage) = header.passing_mark_percentage {
        let percentage = Decimal::from_f64(percentage)
            .with_context(|| format!("invalid passing mark percentage: {percentage}"))?;
        if !exam.set_passing_mark_percentage(percentage) {
            bail!("passing mark percentage must be between 0.0 and 1.0, got {percentage}");
        }
    }

    for (position, toml_page) in parsed.pages.into_iter().enumerate() {
        let default_order = position as u32 + 1;
        let mut page = Page::new(toml_page.title);
        page.description = toml_page.description;
        page.order = toml_page.order.unwrap_or(default_order);
        page.randomise_question_order = toml_page.randomise_question_order;

        for (q_position, toml_question) in toml_page.questions.into_iter().enumerate() {
            let question = build_question(toml_question, q_position as u32 + 1)?;
            page.questions.push(question);
        }

        exam.pages.push(page);
    }

    Ok(exam)
}

fn build_question(toml_question: TomlQuestion, default_order: u32) -> Result<Question> {
    let mut question = match toml_question.kind.as_str() {
        "multiple_choice" => {
            let mut q = Question::multiple_choice(
                toml_question.prompt,
                toml_question.options,
                toml_question.correct_answers,
            );
            q.strategy = match toml_question.marking.as_deref() {
                None | Some("all_or_nothing") => MarkingStrategy::AllOrNothing,
                Some("partial_credit") => {
                    let point = decimal_param(toml_question.point_per_correct, Decimal::ONE)?;
                    let penalty =
                        decimal_param(toml_question.penalty_per_incorrect, Decimal::new(5, 1))?;
                    MarkingStrategy::PartialCredit {
                        point_per_correct: point,
                        penalty_per_incorrect: penalty,
                    }
                }
                Some(other) => bail!(
                    "unknown marking strategy '{other}' (expected all_or_nothing or partial_credit)"
                ),
            };
            q
        }
        "free_text" => {
            if toml_question.use_exact_match.unwrap_or(true) {
                Question::free_text_exact(
                    toml_question.prompt,
                    toml_question.expected_answer.unwrap_or_default(),
                )
            } else {
                Question::free_text_keywords(toml_question.prompt, toml_question.keywords)
            }
        }
        "slider" => Question::slider(
            toml_question.prompt,
            toml_question.min_value.unwrap_or(0),
            toml_question.max_value.unwrap_or(10),
            toml_question.passing_threshold.unwrap_or(7),
            toml_question.reverse_passing_threshold,
        ),
        other => bail!("unknown question kind '{other}' (expected multiple_choice, free_text, or slider)"),
    };

    question.description = toml_question.description;
    question.hint = toml_question.hint;
    question.feedback = toml_question.feedback;
    question.counts_towards_marking = toml_question.counts_towards_marking;
    question.order = toml_question.order.unwrap_or(default_order);
    Ok(question)
}

fn decimal_param(value: Option<f64>, default: Decimal) -> Result<Decimal> {
    match value {
        None => Ok(default),
        Some(v) => Decimal::from_f64(v).with_context(|| format!("invalid decimal value: {v}")),
    }
}

/// Load all `.toml` exam files from a directory (non-recursive).
pub fn load_exam_directory(dir: &Path) -> Result<Vec<Exam>> {
    if !dir.is_dir() {
        bail!("not a directory: {}", dir.display());
    }

    let mut exams = Vec::new();
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_exam(&path) {
                Ok(exam) => exams.push(exam),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(exams)
}

#[derive(Debug, Deserialize)]
struct TomlAnswerFile {
    #[serde(default)]
    answers: Vec<TomlAnswer>,
}

#[derive(Debug, Deserialize)]
struct TomlAnswer {
    /// Prompt of the question being answered.
    prompt: String,
    #[serde(default)]
    selected: Option<Vec<String>>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    value: Option<i32>,
}

/// An answer loaded from a file, keyed by question prompt.
#[derive(Debug, Clone)]
pub struct LoadedAnswer {
    pub prompt: String,
    pub given: AnswerValue,
}

/// Parse an answers TOML file.
pub fn parse_answers(path: &Path) -> Result<Vec<LoadedAnswer>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    parse_answers_str(&content, path)
}

/// Parse an answers TOML string (useful for testing).
pub fn parse_answers_str(content: &str, source_path: &Path) -> Result<Vec<LoadedAnswer>> {
    let parsed: TomlAnswerFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    parsed
        .answers
        .into_iter()
        .map(|a| {
            let given = match (a.selected, a.text, a.value) {
                (Some(selected), None, None) => AnswerValue::Selection(selected),
                (None, Some(text), None) => AnswerValue::Text(text),
                (None, None, Some(value)) => AnswerValue::Number(value),
                _ => bail!(
                    "answer for '{}' must set exactly one of: selected, text, value",
                    a.prompt
                ),
            };
            Ok(LoadedAnswer {
                prompt: a.prompt,
                given,
            })
        })
        .collect()
}

/// Map question prompts to ids. Answers files reference questions by
/// prompt, so prompts must be unique within the exam.
pub fn prompt_index(exam: &Exam) -> Result<HashMap<String, Uuid>> {
    let mut index = HashMap::new();
    for question in exam.questions() {
        if index.insert(question.prompt.clone(), question.id).is_some() {
            bail!(
                "duplicate question prompt '{}'; answers files reference questions by prompt",
                question.prompt
            );
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use examkit_core::model::QuestionKind;
    use std::path::PathBuf;

    const VALID_EXAM: &str = r#"
[exam]
title = "General Aptitude"
description = "A short sample exam"
subject = "general"
difficulty = "easy"
passing_mark_percentage = 0.5

[[pages]]
title = "Numbers"

[[pages.questions]]
kind = "multiple_choice"
prompt = "Select all even numbers"
options = ["1", "2", "3", "4"]
correct_answers = ["2", "4"]

[[pages.questions]]
kind = "free_text"
prompt = "The answer to everything?"
expected_answer = "42"

[[pages]]
title = "Confidence"

[[pages.questions]]
kind = "slider"
prompt = "Rate your confidence"
min_value = 1
max_value = 5
passing_threshold = 3
"#;

    #[test]
    fn parse_valid_exam() {
        let exam = parse_exam_str(VALID_EXAM, &PathBuf::from("exam.toml")).unwrap();
        assert_eq!(exam.title, "General Aptitude");
        assert_eq!(exam.difficulty, Difficulty::Easy);
        assert!(exam.is_marked());
        assert_eq!(exam.pages.len(), 2);
        assert_eq!(exam.questions().count(), 3);
        assert!(exam.validate().valid);

        // Orders default to file position.
        assert_eq!(exam.pages[0].order, 1);
        assert_eq!(exam.pages[1].order, 2);
        assert_eq!(exam.pages[0].questions[1].order, 2);
    }

    #[test]
    fn partial_credit_marking_with_parameters() {
        let toml = r#"
[exam]
title = "T"

[[pages]]
title = "P"

[[pages.questions]]
kind = "multiple_choice"
prompt = "Pick"
options = ["a", "b"]
correct_answers = ["a"]
marking = "partial_credit"
penalty_per_incorrect = 0.25
"#;
        let exam = parse_exam_str(toml, &PathBuf::from("exam.toml")).unwrap();
        let question = exam.questions().next().unwrap();
        assert_eq!(
            question.strategy,
            MarkingStrategy::PartialCredit {
                point_per_correct: Decimal::ONE,
                penalty_per_incorrect: Decimal::new(25, 2),
            }
        );
    }

    #[test]
    fn keyword_free_text_question() {
        let toml = r#"
[exam]
title = "T"

[[pages]]
title = "P"

[[pages.questions]]
kind = "free_text"
prompt = "Describe it"
use_exact_match = false
keywords = ["green", "leafy"]
"#;
        let exam = parse_exam_str(toml, &PathBuf::from("exam.toml")).unwrap();
        let question = exam.questions().next().unwrap();
        match &question.kind {
            QuestionKind::FreeText {
                keywords,
                use_exact_match,
                ..
            } => {
                assert!(!use_exact_match);
                assert_eq!(keywords, &vec!["green", "leafy"]);
            }
            other => panic!("expected free text, got {other:?}"),
        }
    }

    #[test]
    fn unknown_question_kind_is_an_error() {
        let toml = r#"
[exam]
title = "T"

[[pages]]
title = "P"

[[pages.questions]]
kind = "essay"
prompt = "Write"
"#;
        let err = parse_exam_str(toml, &PathBuf::from("exam.toml")).unwrap_err();
        assert!(err.to_string().contains("unknown question kind 'essay'"));
    }

    #[test]
    fn out_of_range_passing_percentage_is_an_error() {
        let toml = r#"
[exam]
title = "T"
passing_mark_percentage = 1.5
"#;
        let err = parse_exam_str(toml, &PathBuf::from("exam.toml")).unwrap_err();
        assert!(err.to_string().contains("between 0.0 and 1.0"));
    }

    #[test]
    fn answers_require_exactly_one_payload() {
        let none = r#"
[[answers]]
prompt = "Q"
"#;
        assert!(parse_answers_str(none, &PathBuf::from("a.toml")).is_err());

        let both = r#"
[[answers]]
prompt = "Q"
text = "x"
value = 3
"#;
        assert!(parse_answers_str(both, &PathBuf::from("a.toml")).is_err());

        let ok = r#"
[[answers]]
prompt = "Q"
selected = ["a"]
"#;
        let answers = parse_answers_str(ok, &PathBuf::from("a.toml")).unwrap();
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].given, AnswerValue::Selection(vec!["a".into()]));
    }

    #[test]
    fn prompt_index_rejects_duplicates() {
        let toml = r#"
[exam]
title = "T"

[[pages]]
title = "P"

[[pages.questions]]
kind = "free_text"
prompt = "Same"
expected_answer = "x"

[[pages.questions]]
kind = "free_text"
prompt = "Same"
expected_answer = "y"
"#;
        let exam = parse_exam_str(toml, &PathBuf::from("exam.toml")).unwrap();
        let err = prompt_index(&exam).unwrap_err();
        assert!(err.to_string().contains("duplicate question prompt"));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("exam.toml"), VALID_EXAM).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let exams = load_exam_directory(dir.path()).unwrap();
        assert_eq!(exams.len(), 1);
        assert_eq!(exams[0].title, "General Aptitude");
    }
}
