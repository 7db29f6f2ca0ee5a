//! The `examkit inspect` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use crate::exam_file;

pub fn execute(exam_path: PathBuf) -> Result<()> {
    let exam = exam_file::parse_exam(&exam_path)?;

    println!("Exam: {}", exam.title);
    if !exam.description.is_empty() {
        println!("  {}", exam.description);
    }
    println!(
        "  marked: {}, difficulty: {}, passing mark: {} of {}",
        exam.is_marked(),
        exam.difficulty,
        exam.passing_mark_total().normalize(),
        exam.maximum_possible_mark().normalize(),
    );

    let mut table = Table::new();
    table.set_header(vec![
        "Page",
        "Order",
        "Kind",
        "Prompt",
        "Strategy",
        "Counts",
        "Max Mark",
    ]);

    for page in &exam.pages {
        for question in &page.questions {
            table.add_row(vec![
                Cell::new(&page.title),
                Cell::new(format!("{}.{}", page.order, question.order)),
                Cell::new(question.kind.name()),
                Cell::new(&question.prompt),
                Cell::new(question.strategy.name()),
                Cell::new(if question.counts_towards_marking {
                    "yes"
                } else {
                    "no"
                }),
                Cell::new(question.maximum_possible_mark()),
            ]);
        }
    }

    println!("\n{table}");
    Ok(())
}
