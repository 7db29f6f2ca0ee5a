//! Marking strategies: the pluggable scoring functions bound to questions.
//!
//! Each strategy supports exactly the question kinds it is written for;
//! invoking one against anything else is a [`MarkingError`], which signals a
//! construction/wiring bug rather than candidate error.

use std::collections::{BTreeSet, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attempt::{Answer, AnswerValue};
use crate::model::{Question, QuestionKind};

/// Errors raised when a strategy is asked to mark something it cannot.
#[derive(Debug, Error)]
pub enum MarkingError {
    #[error("the {strategy} strategy cannot mark a {kind} question")]
    UnsupportedQuestionKind {
        strategy: &'static str,
        kind: &'static str,
    },

    #[error("answer payload does not match a {kind} question")]
    MismatchedAnswer { kind: &'static str },
}

/// A scoring strategy. Bound to a question at authoring time and invoked
/// once per submitted answer when the attempt is submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkingStrategy {
    /// Full mark iff the given selection set exactly equals the correct set,
    /// compared case-insensitively and order-independently. Multiple choice
    /// only.
    AllOrNothing,

    /// Per-selection scoring for multiple choice: points for each correct
    /// selection, a penalty for each incorrect one, floored at zero.
    PartialCredit {
        point_per_correct: Decimal,
        penalty_per_incorrect: Decimal,
    },

    /// Binary free text marking: exact normalized comparison, or any-keyword
    /// substring match, depending on the question's match mode.
    FreeText,

    /// Slider pass/fail against a threshold. `None` fields fall back to the
    /// question's own threshold and direction.
    SliderThreshold {
        threshold: Option<i32>,
        reverse: Option<bool>,
    },
}

impl MarkingStrategy {
    /// Partial credit with the default parameters: 1 point per correct
    /// selection, 0.5 penalty per incorrect one.
    pub fn partial_credit() -> Self {
        MarkingStrategy::PartialCredit {
            point_per_correct: Decimal::ONE,
            penalty_per_incorrect: Decimal::new(5, 1),
        }
    }

    /// Slider threshold marking deferring entirely to the question's own
    /// threshold and direction.
    pub fn slider_threshold() -> Self {
        MarkingStrategy::SliderThreshold {
            threshold: None,
            reverse: None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarkingStrategy::AllOrNothing => "all-or-nothing",
            MarkingStrategy::PartialCredit { .. } => "partial credit",
            MarkingStrategy::FreeText => "free text",
            MarkingStrategy::SliderThreshold { .. } => "slider threshold",
        }
    }

    /// Evaluate `answer` against `question`, returning the awarded mark.
    pub fn evaluate(&self, question: &Question, answer: &Answer) -> Result<Decimal, MarkingError> {
        match self {
            MarkingStrategy::AllOrNothing => {
                let correct = self.correct_answers(question)?;
                let given = self.selection(answer, question)?;
                let correct: BTreeSet<String> = normalised(correct);
                let given: BTreeSet<String> = normalised(given);
                Ok(if correct == given {
                    Decimal::ONE
                } else {
                    Decimal::ZERO
                })
            }

            MarkingStrategy::PartialCredit {
                point_per_correct,
                penalty_per_incorrect,
            } => {
                let correct: HashSet<String> = normalised(self.correct_answers(question)?);
                let given: HashSet<String> = normalised(self.selection(answer, question)?);

                let correct_count = given.iter().filter(|g| correct.contains(*g)).count();
                let incorrect_count = given.len() - correct_count;

                let score = Decimal::from(correct_count as u64) * *point_per_correct
                    - Decimal::from(incorrect_count as u64) * *penalty_per_incorrect;
                Ok(score.max(Decimal::ZERO))
            }

            MarkingStrategy::FreeText => {
                let QuestionKind::FreeText {
                    expected_answer,
                    keywords,
                    use_exact_match,
                } = &question.kind
                else {
                    return Err(self.unsupported(question));
                };
                let AnswerValue::Text(given) = &answer.given else {
                    return Err(self.mismatched(question));
                };

                let response = given.trim().to_lowercase();
                let awarded = if *use_exact_match {
                    response == expected_answer.trim().to_lowercase()
                } else {
                    keywords
                        .iter()
                        .any(|k| response.contains(&k.trim().to_lowercase()))
                };
                Ok(if awarded { Decimal::ONE } else { Decimal::ZERO })
            }

            MarkingStrategy::SliderThreshold { threshold, reverse } => {
                let QuestionKind::Slider {
                    passing_threshold,
                    reverse_passing_threshold,
                    ..
                } = &question.kind
                else {
                    return Err(self.unsupported(question));
                };
                let AnswerValue::Number(given) = &answer.given else {
                    return Err(self.mismatched(question));
                };

                let threshold = threshold.unwrap_or(*passing_threshold);
                let reverse = reverse.unwrap_or(*reverse_passing_threshold);
                let passed = if reverse {
                    *given <= threshold
                } else {
                    *given >= threshold
                };
                Ok(if passed { Decimal::ONE } else { Decimal::ZERO })
            }
        }
    }

    fn correct_answers<'q>(&self, question: &'q Question) -> Result<&'q [String], MarkingError> {
        match &question.kind {
            QuestionKind::MultipleChoice {
                correct_answers, ..
            } => Ok(correct_answers),
            _ => Err(self.unsupported(question)),
        }
    }

    fn selection<'a>(
        &self,
        answer: &'a Answer,
        question: &Question,
    ) -> Result<&'a [String], MarkingError> {
        match &answer.given {
            AnswerValue::Selection(selected) => Ok(selected),
            _ => Err(self.mismatched(question)),
        }
    }

    fn unsupported(&self, question: &Question) -> MarkingError {
        MarkingError::UnsupportedQuestionKind {
            strategy: self.name(),
            kind: question.kind.name(),
        }
    }

    fn mismatched(&self, question: &Question) -> MarkingError {
        MarkingError::MismatchedAnswer {
            kind: question.kind.name(),
        }
    }
}

fn normalised<C: FromIterator<String>>(values: &[String]) -> C {
    values.iter().map(|v| v.to_lowercase()).collect()
}
