//! examkit-core — exam authoring model, attempt lifecycle, and marking.
//!
//! This crate defines the exam/page/question data model, the marking
//! strategies bound to questions, and the state machine that drives a
//! candidate's attempt from start to a marked result.

pub mod attempt;
pub mod error;
pub mod marking;
pub mod model;
pub mod views;
