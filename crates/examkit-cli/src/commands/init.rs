//! The `examkit init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("exam.toml").exists() {
        println!("exam.toml already exists, skipping.");
    } else {
        std::fs::write("exam.toml", SAMPLE_EXAM)?;
        println!("Created exam.toml");
    }

    if std::path::Path::new("answers.toml").exists() {
        println!("answers.toml already exists, skipping.");
    } else {
        std::fs::write("answers.toml", SAMPLE_ANSWERS)?;
        println!("Created answers.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit exam.toml with your pages and questions");
    println!("  2. Run: examkit validate --exam exam.toml");
    println!("  3. Run: examkit take --exam exam.toml --answers answers.toml");

    Ok(())
}

const SAMPLE_EXAM: &str = r#"[exam]
title = "Example Exam"
description = "A starter exam with one question of each kind"
is_marked = true
passing_mark_percentage = 0.5

[[pages]]
title = "Page 1"

[[pages.questions]]
kind = "multiple_choice"
prompt = "Select all even numbers"
options = ["1", "2", "3", "4"]
correct_answers = ["2", "4"]

[[pages.questions]]
kind = "free_text"
prompt = "The answer to life, the universe and everything?"
expected_answer = "42"

[[pages.questions]]
kind = "slider"
prompt = "Rate your confidence from 1 to 5"
min_value = 1
max_value = 5
passing_threshold = 3
"#;

const SAMPLE_ANSWERS: &str = r#"[[answers]]
prompt = "Select all even numbers"
selected = ["2", "4"]

[[answers]]
prompt = "The answer to life, the universe and everything?"
text = "42"

[[answers]]
prompt = "Rate your confidence from 1 to 5"
value = 3
"#;
