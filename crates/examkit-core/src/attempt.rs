//! The attempt state machine: one candidate's run through an exam.
//!
//! An [`ExamAttempt`] validates the exam up front, fixes the page and
//! question presentation order (randomised or by the authored `order`
//! fields), accepts and replaces answers for questions on the current page,
//! and finally marks everything into an [`ExamResult`]. Submission is
//! terminal: every mutating or navigating call afterwards fails with
//! [`AttemptError::AlreadySubmitted`].
//!
//! The attempt is private, single-threaded state. The underlying [`Exam`]
//! is shared read-only via [`Arc`] and may back any number of concurrent
//! attempts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AttemptError;
use crate::model::{Exam, Page, Question, QuestionKind};
use crate::views::{AnswerView, ExamResult, ExamStatus, PageView, QuestionView};

/// A candidate's response to one question. Immutable once stored, but
/// replaceable: re-answering the same question overwrites the prior answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: Uuid,
    /// Awarded mark; `None` until the attempt is submitted and marked.
    pub mark: Option<Decimal>,
    pub given: AnswerValue,
}

/// The type-matched payload of an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerValue {
    /// Selected option strings (multiple choice).
    Selection(Vec<String>),
    /// Free text response.
    Text(String),
    /// Slider value.
    Number(i32),
}

impl Answer {
    pub fn selection(question_id: Uuid, selected: Vec<String>) -> Self {
        Self {
            question_id,
            mark: None,
            given: AnswerValue::Selection(selected),
        }
    }

    pub fn text(question_id: Uuid, text: impl Into<String>) -> Self {
        Self {
            question_id,
            mark: None,
            given: AnswerValue::Text(text.into()),
        }
    }

    pub fn number(question_id: Uuid, value: i32) -> Self {
        Self {
            question_id,
            mark: None,
            given: AnswerValue::Number(value),
        }
    }
}

/// An in-progress or submitted exam attempt.
pub struct ExamAttempt {
    attempt_id: Uuid,
    exam: Arc<Exam>,
    answers: Vec<Answer>,
    /// Page presentation order: indices into `exam.pages`.
    page_order: Vec<usize>,
    /// Question presentation order per page, indexed like `exam.pages`.
    question_order: Vec<Vec<usize>>,
    /// Cursor into `page_order`.
    cursor: usize,
    started_at: DateTime<Utc>,
    submitted_at: Option<DateTime<Utc>>,
    result: Option<ExamResult>,
}

impl ExamAttempt {
    /// Start an attempt with thread-local entropy for any randomised
    /// ordering.
    pub fn start(exam: Arc<Exam>) -> Result<Self, AttemptError> {
        Self::start_with_rng(exam, &mut rand::thread_rng())
    }

    /// Start an attempt with a caller-supplied random source, so ordering is
    /// reproducible under a seeded generator.
    ///
    /// Fails with [`AttemptError::ExamInvalid`] when the exam does not pass
    /// [`Exam::validate`].
    pub fn start_with_rng(exam: Arc<Exam>, rng: &mut impl Rng) -> Result<Self, AttemptError> {
        let validation = exam.validate();
        if !validation.valid {
            return Err(AttemptError::ExamInvalid {
                errors: validation.errors,
            });
        }

        let mut page_order: Vec<usize> = (0..exam.pages.len()).collect();
        if exam.randomise_page_order {
            page_order.shuffle(rng);
        } else {
            page_order.sort_by_key(|&i| exam.pages[i].order);
        }

        let question_order: Vec<Vec<usize>> = exam
            .pages
            .iter()
            .map(|page| {
                let mut order: Vec<usize> = (0..page.questions.len()).collect();
                if page.randomise_question_order {
                    order.shuffle(rng);
                } else {
                    order.sort_by_key(|&i| page.questions[i].order);
                }
                order
            })
            .collect();

        let attempt_id = Uuid::new_v4();
        tracing::debug!(attempt = %attempt_id, exam = %exam.id, pages = page_order.len(), "exam attempt started");

        Ok(Self {
            attempt_id,
            exam,
            answers: Vec::new(),
            page_order,
            question_order,
            cursor: 0,
            started_at: Utc::now(),
            submitted_at: None,
            result: None,
        })
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn exam(&self) -> &Exam {
        &self.exam
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }

    /// The answers stored so far, at most one per question.
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// The result produced by [`ExamAttempt::submit`], if the attempt has
    /// been submitted.
    pub fn result(&self) -> Option<&ExamResult> {
        self.result.as_ref()
    }

    /// Store an answer for a question on the current page, replacing any
    /// prior answer for the same question.
    ///
    /// The answer must structurally fit its question: a non-empty selection
    /// drawn from the options, non-blank text, or a slider value within the
    /// question's bounds. Nothing is mutated on any error path.
    pub fn submit_answer(&mut self, answer: Answer) -> Result<(), AttemptError> {
        self.ensure_in_progress()?;

        let question = self
            .current_page_ref()
            .questions
            .iter()
            .find(|q| q.id == answer.question_id)
            .ok_or(AttemptError::QuestionNotOnPage(answer.question_id))?;
        validate_answer(question, &answer)?;

        self.answers.retain(|a| a.question_id != answer.question_id);
        self.answers.push(answer);
        Ok(())
    }

    /// The current page's questions, projected to display views in the
    /// attempt's presentation order. Views never carry solution data.
    pub fn questions_on_current_page(&self) -> Vec<QuestionView> {
        let page_idx = self.page_order[self.cursor];
        let page = &self.exam.pages[page_idx];
        self.question_order[page_idx]
            .iter()
            .map(|&qi| QuestionView::from_question(&page.questions[qi]))
            .collect()
    }

    /// The current page's details.
    pub fn current_page(&self) -> PageView {
        let page = self.current_page_ref();
        PageView {
            title: page.title.clone(),
            description: page.description.clone(),
            question_count: page.questions.len(),
            position: self.cursor + 1,
            page_count: self.page_order.len(),
        }
    }

    /// The currently stored answer for a question, if any.
    pub fn current_answer_for_question(&self, question_id: Uuid) -> Option<AnswerView> {
        self.answers
            .iter()
            .find(|a| a.question_id == question_id)
            .map(AnswerView::from_answer)
    }

    /// The canonical correct answer for a question anywhere in the exam:
    /// the correct option set, the expected text, or the passing threshold.
    /// This is the one accessor that exposes solution data.
    pub fn correct_answer_for_question(&self, question_id: Uuid) -> Option<AnswerView> {
        let question = self.exam.question(question_id)?;
        let given = match &question.kind {
            QuestionKind::MultipleChoice {
                correct_answers, ..
            } => AnswerValue::Selection(correct_answers.clone()),
            QuestionKind::FreeText {
                expected_answer, ..
            } => AnswerValue::Text(expected_answer.clone()),
            QuestionKind::Slider {
                passing_threshold, ..
            } => AnswerValue::Number(*passing_threshold),
        };
        Some(AnswerView {
            question_id,
            mark: None,
            given,
        })
    }

    /// Move to the next page in the presentation order. A no-op on the last
    /// page.
    pub fn next_page(&mut self) -> Result<(), AttemptError> {
        self.ensure_in_progress()?;
        if self.cursor + 1 < self.page_order.len() {
            self.cursor += 1;
        }
        Ok(())
    }

    /// Move to the previous page in the presentation order. A no-op on the
    /// first page.
    pub fn previous_page(&mut self) -> Result<(), AttemptError> {
        self.ensure_in_progress()?;
        self.cursor = self.cursor.saturating_sub(1);
        Ok(())
    }

    /// Submit the attempt for marking and produce the final result.
    ///
    /// For an unmarked exam no strategy runs: the result carries no mark and
    /// status [`ExamStatus::NotMarked`]. Otherwise every stored answer whose
    /// question counts towards the mark is evaluated by the question's bound
    /// strategy; the total is rounded to the nearest whole mark (banker's
    /// rounding) and compared against the exam's passing mark total.
    pub fn submit(&mut self) -> Result<ExamResult, AttemptError> {
        self.ensure_in_progress()?;

        let marked = self.exam.is_marked();
        let mut total = Decimal::ZERO;
        let mut marks: Vec<Option<Decimal>> = vec![None; self.answers.len()];

        if marked {
            for (i, answer) in self.answers.iter().enumerate() {
                let Some(question) = self.exam.question(answer.question_id) else {
                    continue;
                };
                if !question.counts_towards_marking {
                    tracing::debug!(question = %question.id, "question does not count towards the mark; skipping");
                    continue;
                }
                let mark = question.strategy.evaluate(question, answer)?;
                total += mark;
                marks[i] = Some(mark);
            }
        }

        // Marking is complete; commit state from here on.
        for (answer, mark) in self.answers.iter_mut().zip(marks) {
            if mark.is_some() {
                answer.mark = mark;
            }
        }
        let submitted_at = Utc::now();
        self.submitted_at = Some(submitted_at);

        let answers: Vec<AnswerView> = self.answers.iter().map(AnswerView::from_answer).collect();
        let result = if marked {
            let mark = total.round();
            let passing_mark = self.exam.passing_mark_total();
            let status = if mark >= passing_mark {
                ExamStatus::Passed
            } else {
                ExamStatus::Failed
            };
            ExamResult {
                exam_id: self.exam.id,
                attempt_id: self.attempt_id,
                started_at: self.started_at,
                submitted_at,
                status,
                mark: Some(mark),
                maximum_possible_mark: Some(self.exam.maximum_possible_mark()),
                passing_mark: Some(passing_mark),
                answers,
            }
        } else {
            ExamResult {
                exam_id: self.exam.id,
                attempt_id: self.attempt_id,
                started_at: self.started_at,
                submitted_at,
                status: ExamStatus::NotMarked,
                mark: None,
                maximum_possible_mark: None,
                passing_mark: None,
                answers,
            }
        };

        tracing::debug!(attempt = %self.attempt_id, status = %result.status, "exam attempt submitted");
        self.result = Some(result.clone());
        Ok(result)
    }

    fn ensure_in_progress(&self) -> Result<(), AttemptError> {
        if self.submitted_at.is_some() {
            return Err(AttemptError::AlreadySubmitted);
        }
        Ok(())
    }

    fn current_page_ref(&self) -> &Page {
        &self.exam.pages[self.page_order[self.cursor]]
    }
}

/// Check that an answer structurally fits its question.
fn validate_answer(question: &Question, answer: &Answer) -> Result<(), AttemptError> {
    match (&question.kind, &answer.given) {
        (QuestionKind::MultipleChoice { options, .. }, AnswerValue::Selection(selected)) => {
            if selected.is_empty() {
                return Err(AttemptError::NoSelection);
            }
            for choice in selected {
                if !options.contains(choice) {
                    return Err(AttemptError::UnknownOption(choice.clone()));
                }
            }
            Ok(())
        }
        (QuestionKind::FreeText { .. }, AnswerValue::Text(text)) => {
            if text.trim().is_empty() {
                return Err(AttemptError::BlankText);
            }
            Ok(())
        }
        (
            QuestionKind::Slider {
                min_value,
                max_value,
                ..
            },
            AnswerValue::Number(given),
        ) => {
            if given < min_value || given > max_value {
                return Err(AttemptError::ValueOutOfRange {
                    given: *given,
                    min: *min_value,
                    max: *max_value,
                });
            }
            Ok(())
        }
        _ => Err(AttemptError::AnswerTypeMismatch {
            question_id: question.id,
            expected: question.kind.name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;
    use crate::views::QuestionDetailView;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Fixture {
        exam: Arc<Exam>,
        mcq: Uuid,
        free_text: Uuid,
        slider: Uuid,
    }

    /// One page, one question of each kind, passing percentage 0.5.
    fn three_question_exam() -> Fixture {
        let mut mcq = Question::multiple_choice(
            "Select all even numbers",
            vec!["1".into(), "2".into(), "3".into(), "4".into()],
            vec!["2".into(), "4".into()],
        );
        mcq.order = 1;
        let mut free_text = Question::free_text_exact("The answer to everything?", "42");
        free_text.order = 2;
        let mut slider = Question::slider("Rate from 1 to 5", 1, 5, 3, false);
        slider.order = 3;

        let ids = (mcq.id, free_text.id, slider.id);

        let mut page = Page::new("Page 1");
        page.questions = vec![mcq, free_text, slider];

        let mut exam = Exam::new("Aptitude", true);
        exam.pages.push(page);
        assert!(exam.set_passing_mark_percentage(Decimal::new(5, 1)));

        Fixture {
            exam: Arc::new(exam),
            mcq: ids.0,
            free_text: ids.1,
            slider: ids.2,
        }
    }

    fn paged_exam(randomise: bool) -> Arc<Exam> {
        let mut exam = Exam::new("Paged", false);
        exam.randomise_page_order = randomise;
        // Authored out of order on purpose.
        for (title, order) in [("Second", 2), ("First", 1), ("Third", 3)] {
            let mut page = Page::new(title);
            page.order = order;
            page.randomise_question_order = randomise;
            for n in 0u32..3 {
                let mut q = Question::free_text_exact(format!("{title} Q{n}"), "x");
                q.order = n + 1;
                page.questions.push(q);
            }
            exam.pages.push(page);
        }
        Arc::new(exam)
    }

    #[test]
    fn start_rejects_invalid_exam() {
        let exam = Arc::new(Exam::new("Empty", true));
        let err = ExamAttempt::start(exam).unwrap_err();
        match err {
            AttemptError::ExamInvalid { errors } => assert_eq!(errors.len(), 3),
            other => panic!("expected ExamInvalid, got {other:?}"),
        }
    }

    #[test]
    fn pages_and_questions_follow_order_fields() {
        let mut attempt = ExamAttempt::start(paged_exam(false)).unwrap();

        assert_eq!(attempt.current_page().title, "First");
        let prompts: Vec<String> = attempt
            .questions_on_current_page()
            .iter()
            .map(|q| q.prompt.clone())
            .collect();
        assert_eq!(prompts, vec!["First Q0", "First Q1", "First Q2"]);

        attempt.next_page().unwrap();
        assert_eq!(attempt.current_page().title, "Second");
        attempt.next_page().unwrap();
        assert_eq!(attempt.current_page().title, "Third");
    }

    #[test]
    fn seeded_shuffle_is_deterministic() {
        let exam = paged_exam(true);

        let walk = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut attempt = ExamAttempt::start_with_rng(Arc::clone(&exam), &mut rng).unwrap();
            let mut seen = Vec::new();
            loop {
                for view in attempt.questions_on_current_page() {
                    seen.push(view.question_id);
                }
                let page = attempt.current_page();
                if page.position == page.page_count {
                    break;
                }
                attempt.next_page().unwrap();
            }
            seen
        };

        assert_eq!(walk(42), walk(42));
        assert_eq!(walk(42).len(), 9);
    }

    #[test]
    fn resubmission_replaces_the_stored_answer() {
        let f = three_question_exam();
        let mut attempt = ExamAttempt::start(f.exam).unwrap();

        attempt
            .submit_answer(Answer::selection(f.mcq, vec!["2".into()]))
            .unwrap();
        attempt
            .submit_answer(Answer::selection(f.mcq, vec!["2".into(), "4".into()]))
            .unwrap();

        assert_eq!(attempt.answers().len(), 1);
        let view = attempt.current_answer_for_question(f.mcq).unwrap();
        assert_eq!(
            view.given,
            AnswerValue::Selection(vec!["2".into(), "4".into()])
        );
    }

    #[test]
    fn answering_a_question_on_another_page_fails() {
        let exam = paged_exam(false);
        let last_page_question = exam
            .pages
            .iter()
            .find(|p| p.order == 3)
            .unwrap()
            .questions[0]
            .id;

        let mut attempt = ExamAttempt::start(exam).unwrap();
        let err = attempt
            .submit_answer(Answer::text(last_page_question, "x"))
            .unwrap_err();
        assert!(matches!(err, AttemptError::QuestionNotOnPage(id) if id == last_page_question));
    }

    #[test]
    fn out_of_range_slider_answer_leaves_answers_unchanged() {
        let f = three_question_exam();
        let mut attempt = ExamAttempt::start(f.exam).unwrap();
        attempt
            .submit_answer(Answer::number(f.slider, 5))
            .unwrap();

        let err = attempt
            .submit_answer(Answer::number(f.slider, 6))
            .unwrap_err();
        assert!(matches!(
            err,
            AttemptError::ValueOutOfRange {
                given: 6,
                min: 1,
                max: 5
            }
        ));
        assert!(err.is_answer_rejection());

        // The earlier in-range answer is untouched.
        assert_eq!(attempt.answers().len(), 1);
        assert_eq!(
            attempt.current_answer_for_question(f.slider).unwrap().given,
            AnswerValue::Number(5)
        );
    }

    #[test]
    fn structurally_invalid_answers_are_rejected() {
        let f = three_question_exam();
        let mut attempt = ExamAttempt::start(f.exam).unwrap();

        let err = attempt
            .submit_answer(Answer::selection(f.mcq, vec![]))
            .unwrap_err();
        assert!(matches!(err, AttemptError::NoSelection));

        let err = attempt
            .submit_answer(Answer::selection(f.mcq, vec!["7".into()]))
            .unwrap_err();
        assert!(matches!(err, AttemptError::UnknownOption(o) if o == "7"));

        let err = attempt
            .submit_answer(Answer::text(f.free_text, "   "))
            .unwrap_err();
        assert!(matches!(err, AttemptError::BlankText));

        let err = attempt
            .submit_answer(Answer::number(f.free_text, 3))
            .unwrap_err();
        assert!(matches!(
            err,
            AttemptError::AnswerTypeMismatch {
                expected: "free text",
                ..
            }
        ));

        assert!(attempt.answers().is_empty());
    }

    #[test]
    fn navigation_saturates_at_both_ends() {
        let mut attempt = ExamAttempt::start(paged_exam(false)).unwrap();

        attempt.previous_page().unwrap();
        assert_eq!(attempt.current_page().position, 1);

        for _ in 0..5 {
            attempt.next_page().unwrap();
        }
        let page = attempt.current_page();
        assert_eq!(page.position, 3);
        assert_eq!(page.page_count, 3);
    }

    #[test]
    fn question_views_carry_no_solutions() {
        let f = three_question_exam();
        let attempt = ExamAttempt::start(f.exam).unwrap();
        let views = attempt.questions_on_current_page();
        assert_eq!(views.len(), 3);

        match &views[0].detail {
            QuestionDetailView::MultipleChoice { options } => {
                assert_eq!(options, &vec!["1", "2", "3", "4"]);
            }
            other => panic!("expected multiple choice detail, got {other:?}"),
        }
        assert!(matches!(views[1].detail, QuestionDetailView::FreeText));
        assert!(matches!(
            views[2].detail,
            QuestionDetailView::Slider {
                min_value: 1,
                max_value: 5
            }
        ));
    }

    #[test]
    fn correct_answer_lookup_spans_the_whole_exam() {
        let f = three_question_exam();
        let attempt = ExamAttempt::start(f.exam).unwrap();

        let mcq = attempt.correct_answer_for_question(f.mcq).unwrap();
        assert_eq!(
            mcq.given,
            AnswerValue::Selection(vec!["2".into(), "4".into()])
        );

        let text = attempt.correct_answer_for_question(f.free_text).unwrap();
        assert_eq!(text.given, AnswerValue::Text("42".into()));

        let slider = attempt.correct_answer_for_question(f.slider).unwrap();
        assert_eq!(slider.given, AnswerValue::Number(3));

        assert!(attempt.correct_answer_for_question(Uuid::new_v4()).is_none());
        assert!(attempt.current_answer_for_question(f.mcq).is_none());
    }

    #[test]
    fn unmarked_exam_submits_without_marking() {
        let exam = paged_exam(false);
        let question = exam.pages.iter().find(|p| p.order == 1).unwrap().questions[0].id;

        let mut attempt = ExamAttempt::start(exam).unwrap();
        attempt.submit_answer(Answer::text(question, "x")).unwrap();
        let result = attempt.submit().unwrap();

        assert_eq!(result.status, ExamStatus::NotMarked);
        assert!(result.mark.is_none());
        assert!(result.maximum_possible_mark.is_none());
        assert!(result.passing_mark.is_none());
        assert_eq!(result.answers.len(), 1);
        assert!(result.answers[0].mark.is_none());
    }

    #[test]
    fn all_correct_answers_pass_end_to_end() {
        let f = three_question_exam();
        let mut attempt = ExamAttempt::start(Arc::clone(&f.exam)).unwrap();

        attempt
            .submit_answer(Answer::selection(f.mcq, vec!["4".into(), "2".into()]))
            .unwrap();
        attempt
            .submit_answer(Answer::text(f.free_text, " 42 "))
            .unwrap();
        attempt.submit_answer(Answer::number(f.slider, 3)).unwrap();

        let result = attempt.submit().unwrap();

        assert_eq!(result.status, ExamStatus::Passed);
        assert_eq!(result.mark, Some(Decimal::from(3)));
        assert_eq!(result.maximum_possible_mark, Some(Decimal::from(3)));
        assert_eq!(result.passing_mark, Some(Decimal::new(15, 1)));
        assert_eq!(result.exam_id, f.exam.id);
        assert_eq!(result.attempt_id, attempt.attempt_id());
        assert!(result.answers.iter().all(|a| a.mark == Some(Decimal::ONE)));
        assert_eq!(attempt.result().unwrap().status, ExamStatus::Passed);
    }

    #[test]
    fn submission_is_terminal() {
        let f = three_question_exam();
        let mut attempt = ExamAttempt::start(f.exam).unwrap();
        attempt
            .submit_answer(Answer::selection(f.mcq, vec!["2".into(), "4".into()]))
            .unwrap();
        attempt.submit().unwrap();

        assert!(matches!(
            attempt.submit().unwrap_err(),
            AttemptError::AlreadySubmitted
        ));
        assert!(matches!(
            attempt.submit().unwrap_err(),
            AttemptError::AlreadySubmitted
        ));
        assert!(matches!(
            attempt
                .submit_answer(Answer::number(f.slider, 3))
                .unwrap_err(),
            AttemptError::AlreadySubmitted
        ));
        assert!(matches!(
            attempt.next_page().unwrap_err(),
            AttemptError::AlreadySubmitted
        ));
        assert!(matches!(
            attempt.previous_page().unwrap_err(),
            AttemptError::AlreadySubmitted
        ));
    }

    #[test]
    fn total_mark_rounds_half_to_even() {
        let f = three_question_exam();
        // Switch the MCQ to partial credit so a fractional total is possible.
        let mut exam = (*f.exam).clone();
        for q in &mut exam.pages[0].questions {
            if q.id == f.mcq {
                q.use_partial_credit_marking();
            }
        }
        let mut attempt = ExamAttempt::start(Arc::new(exam)).unwrap();

        // MCQ: two correct and one incorrect selection = 2.0 - 0.5 = 1.5.
        attempt
            .submit_answer(Answer::selection(
                f.mcq,
                vec!["2".into(), "4".into(), "3".into()],
            ))
            .unwrap();
        // Free text correct = 1.0; slider unanswered. Total 2.5 rounds to 2.
        attempt.submit_answer(Answer::text(f.free_text, "42")).unwrap();

        let result = attempt.submit().unwrap();
        assert_eq!(result.mark, Some(Decimal::from(2)));

        let mcq_mark = result
            .answers
            .iter()
            .find(|a| a.question_id == f.mcq)
            .unwrap()
            .mark;
        assert_eq!(mcq_mark, Some(Decimal::new(15, 1)));
    }

    #[test]
    fn answers_to_non_counting_questions_are_not_marked() {
        let mut survey = Question::slider("How was it?", 1, 5, 3, false);
        survey.counts_towards_marking = false;
        survey.order = 4;
        let survey_id = survey.id;

        let f = three_question_exam();
        let mut exam = (*f.exam).clone();
        exam.pages[0].questions.push(survey);
        let mut attempt = ExamAttempt::start(Arc::new(exam)).unwrap();

        attempt
            .submit_answer(Answer::selection(f.mcq, vec!["2".into(), "4".into()]))
            .unwrap();
        attempt.submit_answer(Answer::number(survey_id, 1)).unwrap();

        let result = attempt.submit().unwrap();
        assert_eq!(result.mark, Some(Decimal::ONE));

        let survey_answer = result
            .answers
            .iter()
            .find(|a| a.question_id == survey_id)
            .unwrap();
        assert!(survey_answer.mark.is_none());
    }
}
