//! The `examkit validate` command.

use std::path::PathBuf;

use anyhow::Result;

use crate::exam_file;

pub fn execute(exam_path: PathBuf) -> Result<()> {
    let exams = if exam_path.is_dir() {
        exam_file::load_exam_directory(&exam_path)?
    } else {
        vec![exam_file::parse_exam(&exam_path)?]
    };

    let mut total_errors = 0;

    for exam in &exams {
        println!(
            "Exam: {} ({} pages, {} questions)",
            exam.title,
            exam.pages.len(),
            exam.questions().count()
        );

        let result = exam.validate();
        for error in &result.errors {
            println!("  ERROR: {error}");
        }
        total_errors += result.errors.len();
    }

    if total_errors == 0 {
        println!("All exams valid.");
    } else {
        println!("\n{total_errors} error(s) found.");
    }

    Ok(())
}
