// src/assessment/attempt.rs

use std::{collections::BTreeMap, sync::Arc};

use serde::Serialize;

use super::{Assessment, AssessmentError, percentage};

/// Label used on the review screen for a skipped question.
pub const NOT_ANSWERED: &str = "Not answered";

/// Graded result of a completed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub score: u32,
    pub passed: bool,
    pub correct_count: usize,
    pub total_questions: usize,
}

/// What a call to `submit` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// This call completed the attempt. Completion side effects belong here.
    Completed(Outcome),
    /// The attempt was already completed; the stored outcome is returned unchanged.
    AlreadyCompleted(Outcome),
}

impl Submission {
    pub fn outcome(&self) -> Outcome {
        match self {
            Submission::Completed(o) | Submission::AlreadyCompleted(o) => *o,
        }
    }

    pub fn is_first(&self) -> bool {
        matches!(self, Submission::Completed(_))
    }
}

/// Result of pressing "Next".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved(usize),
    /// Already on the last question: the action becomes "Submit".
    ReadyToSubmit,
}

/// How much of the time limit is left, for colouring the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Plenty,
    Low,
    Critical,
}

/// Per-question line of the post-completion review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub question_index: usize,
    pub question: String,
    pub selected_answer: Option<usize>,
    pub selected_label: String,
    pub correct: bool,
    /// Only present when the selected answer was wrong or missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// One learner's pass through an assessment.
#[derive(Debug, Clone)]
pub struct Attempt {
    assessment: Arc<Assessment>,
    current: usize,
    answers: BTreeMap<usize, usize>,
    remaining_secs: u64,
    outcome: Option<Outcome>,
}

impl Attempt {
    pub fn start(assessment: Arc<Assessment>) -> Self {
        let remaining_secs = assessment.time_limit_secs;
        Self {
            assessment,
            current: 0,
            answers: BTreeMap::new(),
            remaining_secs,
            outcome: None,
        }
    }

    /// Rebuilds a finished attempt from a submitted answer sheet and grades it.
    ///
    /// Unless `timed_out` is set, every question must be answered.
    pub fn replay(
        assessment: Arc<Assessment>,
        answers: &BTreeMap<usize, usize>,
        timed_out: bool,
    ) -> Result<(Self, Outcome), AssessmentError> {
        let mut attempt = Self::start(assessment);
        for (&question, &option) in answers {
            attempt.go_to_question(question)?;
            attempt.select_answer(option)?;
        }

        let submission = if timed_out {
            attempt.remaining_secs = 0;
            attempt.submit()
        } else {
            attempt.try_submit()?
        };
        Ok((attempt, submission.outcome()))
    }

    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    pub fn current_question_index(&self) -> usize {
        self.current
    }

    pub fn total_questions(&self) -> usize {
        self.assessment.total_questions()
    }

    pub fn selected_answer(&self, question: usize) -> Option<usize> {
        self.answers.get(&question).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn all_answered(&self) -> bool {
        self.answers.len() == self.total_questions()
    }

    pub fn time_remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_completed(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Records `option` for the current question, replacing any earlier choice.
    pub fn select_answer(&mut self, option: usize) -> Result<(), AssessmentError> {
        self.ensure_in_progress()?;
        let Some(question) = self.assessment.questions.get(self.current) else {
            return Err(AssessmentError::IndexOutOfRange {
                index: self.current,
                total: self.total_questions(),
            });
        };
        let available = question.options.len();
        if option >= available {
            return Err(AssessmentError::InvalidInput {
                question: self.current,
                option,
                available,
            });
        }
        self.answers.insert(self.current, option);
        Ok(())
    }

    /// Jumps to any question, answered or not.
    pub fn go_to_question(&mut self, index: usize) -> Result<(), AssessmentError> {
        self.ensure_in_progress()?;
        let total = self.total_questions();
        if index >= total {
            return Err(AssessmentError::IndexOutOfRange { index, total });
        }
        self.current = index;
        Ok(())
    }

    pub fn next(&mut self) -> Result<Step, AssessmentError> {
        self.ensure_in_progress()?;
        if self.current + 1 >= self.total_questions() {
            return Ok(Step::ReadyToSubmit);
        }
        self.current += 1;
        Ok(Step::Moved(self.current))
    }

    /// Steps back one question; stays put on the first.
    pub fn previous(&mut self) -> Result<usize, AssessmentError> {
        self.ensure_in_progress()?;
        self.current = self.current.saturating_sub(1);
        Ok(self.current)
    }

    /// Advances the countdown by one second.
    ///
    /// Returns the outcome when this tick ran the clock out and submitted the
    /// attempt. Ticks after completion do nothing.
    pub fn tick(&mut self) -> Option<Outcome> {
        if self.is_completed() {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }

        tracing::info!(
            assessment_id = %self.assessment.id,
            answered = self.answers.len(),
            "Time limit reached, auto-submitting attempt"
        );
        match self.submit() {
            Submission::Completed(outcome) => Some(outcome),
            Submission::AlreadyCompleted(_) => None,
        }
    }

    /// Grades whatever answers exist and completes the attempt.
    ///
    /// Idempotent: once completed, returns the stored outcome without touching state.
    pub fn submit(&mut self) -> Submission {
        if let Some(outcome) = self.outcome {
            return Submission::AlreadyCompleted(outcome);
        }
        let outcome = self.grade();
        self.outcome = Some(outcome);
        Submission::Completed(outcome)
    }

    /// User-initiated submit: refuses while any question is unanswered.
    pub fn try_submit(&mut self) -> Result<Submission, AssessmentError> {
        if let Some(outcome) = self.outcome {
            return Ok(Submission::AlreadyCompleted(outcome));
        }
        let unanswered = self.total_questions() - self.answers.len();
        if unanswered > 0 {
            return Err(AssessmentError::Incomplete { unanswered });
        }
        Ok(self.submit())
    }

    /// Per-question breakdown, available once the attempt is completed.
    pub fn review(&self) -> Option<Vec<ReviewItem>> {
        self.outcome?;
        let items = self
            .assessment
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let selected = self.selected_answer(index);
                let correct = selected == Some(question.correct_answer);
                ReviewItem {
                    question_index: index,
                    question: question.question.clone(),
                    selected_answer: selected,
                    selected_label: selected
                        .and_then(|s| question.option(s))
                        .unwrap_or(NOT_ANSWERED)
                        .to_string(),
                    correct,
                    correct_label: if correct {
                        None
                    } else {
                        question.option(question.correct_answer).map(str::to_string)
                    },
                    explanation: question.explanation.clone(),
                }
            })
            .collect();
        Some(items)
    }

    /// Remaining time as `M:SS`, or `H:MM:SS` from one hour up.
    pub fn format_remaining(&self) -> String {
        let hours = self.remaining_secs / 3600;
        let minutes = (self.remaining_secs % 3600) / 60;
        let seconds = self.remaining_secs % 60;
        if hours > 0 {
            format!("{hours}:{minutes:02}:{seconds:02}")
        } else {
            format!("{minutes}:{seconds:02}")
        }
    }

    pub fn urgency(&self) -> Urgency {
        let limit = self.assessment.time_limit_secs.max(1);
        // Compare remaining/limit against 50% and 20% without floats.
        let scaled = self.remaining_secs * 100;
        if scaled > limit * 50 {
            Urgency::Plenty
        } else if scaled > limit * 20 {
            Urgency::Low
        } else {
            Urgency::Critical
        }
    }

    fn grade(&self) -> Outcome {
        let total_questions = self.total_questions();
        let correct_count = self
            .assessment
            .questions
            .iter()
            .enumerate()
            .filter(|(i, q)| self.answers.get(i) == Some(&q.correct_answer))
            .count();
        let score = percentage(correct_count, total_questions);
        Outcome {
            score,
            passed: score >= self.assessment.passing_score,
            correct_count,
            total_questions,
        }
    }

    fn ensure_in_progress(&self) -> Result<(), AssessmentError> {
        if self.is_completed() {
            return Err(AssessmentError::AlreadyCompleted);
        }
        Ok(())
    }
}
