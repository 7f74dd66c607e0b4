//! Quiz and exam grading.
//!
//! An [`Assessment`] is the gradable view of a quiz or exam. An [`Attempt`]
//! walks one learner through it and moves `InProgress -> Completed` exactly
//! once. [`AttemptSession`] adds the per-second countdown that auto-submits
//! when time runs out. Over HTTP, a [`SubmissionLedger`] keyed by attempt
//! plays the same at-most-once role.

pub mod attempt;
pub mod ledger;
pub mod timer;

pub use attempt::{Attempt, Outcome, ReviewItem, Step, Submission, Urgency};
pub use ledger::{Recorded, SubmissionLedger};
pub use timer::AttemptSession;

use crate::{
    config::DEFAULT_TIME_LIMIT_SECS,
    models::{exam::Exam, question::Question, quiz::Quiz},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentKind {
    Quiz,
    Exam,
}

/// Normalized quiz or exam definition.
#[derive(Debug, Clone)]
pub struct Assessment {
    pub id: String,
    pub course_id: String,
    pub kind: AssessmentKind,
    pub title: String,
    pub questions: Vec<Question>,
    pub passing_score: u32,
    pub time_limit_secs: u64,
}

impl Assessment {
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }
}

impl From<&Quiz> for Assessment {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id.clone(),
            course_id: quiz.course_id.clone(),
            kind: AssessmentKind::Quiz,
            title: quiz.title.clone(),
            questions: quiz.questions.clone(),
            passing_score: quiz.passing_score,
            time_limit_secs: time_limit_secs(quiz.time_limit),
        }
    }
}

impl From<&Exam> for Assessment {
    fn from(exam: &Exam) -> Self {
        Self {
            id: exam.id.clone(),
            course_id: exam.course_id.clone(),
            kind: AssessmentKind::Exam,
            title: exam.title.clone(),
            questions: exam.questions.clone(),
            passing_score: exam.passing_score,
            time_limit_secs: time_limit_secs(Some(exam.time_limit)),
        }
    }
}

/// Converts a limit in minutes to seconds. Unset or zero means the default.
pub fn time_limit_secs(minutes: Option<u32>) -> u64 {
    match minutes {
        Some(m) if m > 0 => u64::from(m) * 60,
        _ => DEFAULT_TIME_LIMIT_SECS,
    }
}

/// `round(100 * correct / total)`, halves rounding up. An empty set scores 0.
pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * correct + total) / (2 * total)) as u32
}

/// Errors raised synchronously by the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("option {option} is out of range for question {question} ({available} options)")]
    InvalidInput {
        question: usize,
        option: usize,
        available: usize,
    },

    #[error("question index {index} is out of range (0..{total})")]
    IndexOutOfRange { index: usize, total: usize },

    #[error("{unanswered} question(s) still unanswered")]
    Incomplete { unanswered: usize },

    /// Benign; callers treat it as a no-op.
    #[error("attempt already completed")]
    AlreadyCompleted,
}
