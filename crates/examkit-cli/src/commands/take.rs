//! The `examkit take` command: run an attempt from an answers file.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use comfy_table::{Cell, Table};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use examkit_core::attempt::{Answer, AnswerValue, ExamAttempt};
use examkit_core::model::Exam;
use examkit_core::views::ExamResult;

use crate::exam_file;

pub fn execute(
    exam_path: PathBuf,
    answers_path: PathBuf,
    seed: Option<u64>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let exam = exam_file::parse_exam(&exam_path)?;
    let loaded = exam_file::parse_answers(&answers_path)?;
    let index = exam_file::prompt_index(&exam)?;

    let mut by_question: HashMap<Uuid, AnswerValue> = HashMap::new();
    for answer in loaded {
        let Some(&question_id) = index.get(&answer.prompt) else {
            bail!(
                "no question with prompt '{}' in {}",
                answer.prompt,
                exam_path.display()
            );
        };
        if by_question.insert(question_id, answer.given).is_some() {
            bail!("duplicate answer for '{}'", answer.prompt);
        }
    }

    let exam = Arc::new(exam);
    let mut attempt = match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            ExamAttempt::start_with_rng(Arc::clone(&exam), &mut rng)?
        }
        None => ExamAttempt::start(Arc::clone(&exam))?,
    };

    // Walk the presentation order once, answering what the file provides.
    loop {
        for view in attempt.questions_on_current_page() {
            if let Some(given) = by_question.remove(&view.question_id) {
                let answer = Answer {
                    question_id: view.question_id,
                    mark: None,
                    given,
                };
                attempt
                    .submit_answer(answer)
                    .with_context(|| format!("answer for '{}' was rejected", view.prompt))?;
            }
        }
        let page = attempt.current_page();
        if page.position == page.page_count {
            break;
        }
        attempt.next_page()?;
    }

    let result = attempt.submit()?;

    if let Some(path) = &output {
        result.save_json(path)?;
        eprintln!("Result saved to: {}", path.display());
    }

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => print_summary(&exam, &result),
    }

    Ok(())
}

fn print_summary(exam: &Exam, result: &ExamResult) {
    let mut table = Table::new();
    table.set_header(vec!["Question", "Given", "Mark"]);

    for answer in &result.answers {
        let prompt = exam
            .question(answer.question_id)
            .map(|q| q.prompt.as_str())
            .unwrap_or("?");
        table.add_row(vec![
            Cell::new(prompt),
            Cell::new(format_value(&answer.given)),
            Cell::new(
                answer
                    .mark
                    .map(|m| m.normalize().to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    println!("{table}");

    match (result.mark, result.maximum_possible_mark, result.passing_mark) {
        (Some(mark), Some(max), Some(passing)) => println!(
            "\nStatus: {} (mark {} of {}, passing mark {})",
            result.status,
            mark.normalize(),
            max.normalize(),
            passing.normalize(),
        ),
        _ => println!("\nStatus: {}", result.status),
    }
}

fn format_value(value: &AnswerValue) -> String {
    match value {
        AnswerValue::Selection(items) => items.join(", "),
        AnswerValue::Text(text) => text.clone(),
        AnswerValue::Number(n) => n.to_string(),
    }
}
