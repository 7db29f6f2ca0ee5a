//! Attempt and marking error types.
//!
//! Exam/question *validation* problems are data (`ValidationResult`), never
//! errors. The enums here cover operational failures: calls that abort
//! immediately without mutating the attempt.

use thiserror::Error;
use uuid::Uuid;

use crate::marking::MarkingError;

/// Errors raised by [`crate::attempt::ExamAttempt`] operations.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// The exam failed validation when the attempt was started.
    #[error("exam is not valid to attempt: {}", errors.join("; "))]
    ExamInvalid { errors: Vec<String> },

    /// The attempt has already been submitted; no further mutation or
    /// navigation is permitted.
    #[error("exam attempt has already been submitted")]
    AlreadySubmitted,

    /// The referenced question is not on the current page.
    #[error("question {0} is not on the current page")]
    QuestionNotOnPage(Uuid),

    /// The answer payload does not match the question's kind.
    #[error("answer payload does not match the {expected} question {question_id}")]
    AnswerTypeMismatch {
        question_id: Uuid,
        expected: &'static str,
    },

    /// A multiple choice answer selected nothing.
    #[error("a multiple choice answer must select at least one option")]
    NoSelection,

    /// A multiple choice answer selected something outside the question's options.
    #[error("'{0}' is not one of the question's options")]
    UnknownOption(String),

    /// A free text answer was empty or whitespace.
    #[error("a free text answer must not be blank")]
    BlankText,

    /// A slider answer fell outside the question's declared bounds.
    #[error("slider value {given} is outside the range {min}..={max}")]
    ValueOutOfRange { given: i32, min: i32, max: i32 },

    /// A marking strategy was invoked against a question kind it does not
    /// support. Signals a wiring bug, not candidate error.
    #[error(transparent)]
    Marking(#[from] MarkingError),
}

impl AttemptError {
    /// Returns `true` if this error rejected the submitted answer itself
    /// (as opposed to the attempt being in the wrong state).
    pub fn is_answer_rejection(&self) -> bool {
        matches!(
            self,
            AttemptError::AnswerTypeMismatch { .. }
                | AttemptError::NoSelection
                | AttemptError::UnknownOption(_)
                | AttemptError::BlankText
                | AttemptError::ValueOutOfRange { .. }
        )
    }
}
