// src/assessment/timer.rs

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::Mutex,
    task::AbortHandle,
    time::{Instant, MissedTickBehavior},
};

use super::{Assessment, AssessmentError, Attempt, Outcome, Submission};

/// Runs once, with the outcome, when the attempt completes by either path.
pub type CompletionHook = Box<dyn FnOnce(Outcome) + Send + 'static>;

struct Shared {
    attempt: Attempt,
    on_complete: Option<CompletionHook>,
}

impl Shared {
    fn settle(&mut self, submission: Submission) -> Submission {
        if submission.is_first() {
            if let Some(hook) = self.on_complete.take() {
                hook(submission.outcome());
            }
        }
        submission
    }
}

/// A live attempt with a countdown that auto-submits at zero.
///
/// The timer task and explicit submits both go through one mutex, so only one
/// of them completes the attempt and the hook fires at most once. The hook
/// runs while the lock is held and must not call back into the session.
pub struct AttemptSession {
    shared: Arc<Mutex<Shared>>,
    ticker: AbortHandle,
}

impl AttemptSession {
    /// Starts the attempt and its one-second countdown. Requires a tokio runtime.
    pub fn start<F>(assessment: Arc<Assessment>, on_complete: F) -> Self
    where
        F: FnOnce(Outcome) + Send + 'static,
    {
        Self::with_tick_period(assessment, Duration::from_secs(1), on_complete)
    }

    pub fn with_tick_period<F>(assessment: Arc<Assessment>, period: Duration, on_complete: F) -> Self
    where
        F: FnOnce(Outcome) + Send + 'static,
    {
        let shared = Arc::new(Mutex::new(Shared {
            attempt: Attempt::start(assessment),
            on_complete: Some(Box::new(on_complete)),
        }));
        let ticker = tokio::spawn(run_countdown(Arc::clone(&shared), period)).abort_handle();
        Self { shared, ticker }
    }

    pub async fn select_answer(&self, option: usize) -> Result<(), AssessmentError> {
        self.shared.lock().await.attempt.select_answer(option)
    }

    pub async fn go_to_question(&self, index: usize) -> Result<(), AssessmentError> {
        self.shared.lock().await.attempt.go_to_question(index)
    }

    /// Submits regardless of unanswered questions and stops the countdown.
    pub async fn submit(&self) -> Submission {
        let mut shared = self.shared.lock().await;
        self.ticker.abort();
        let submission = shared.attempt.submit();
        shared.settle(submission)
    }

    /// The user's "Submit" button: gated on every question being answered.
    pub async fn try_submit(&self) -> Result<Submission, AssessmentError> {
        let mut shared = self.shared.lock().await;
        let submission = shared.attempt.try_submit()?;
        self.ticker.abort();
        Ok(shared.settle(submission))
    }

    /// A copy of the attempt as it stands now.
    pub async fn snapshot(&self) -> Attempt {
        self.shared.lock().await.attempt.clone()
    }

    pub async fn outcome(&self) -> Option<Outcome> {
        self.shared.lock().await.attempt.outcome()
    }
}

impl Drop for AttemptSession {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

async fn run_countdown(shared: Arc<Mutex<Shared>>, period: Duration) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        interval.tick().await;
        let mut guard = shared.lock().await;
        if guard.attempt.is_completed() {
            break;
        }
        if let Some(outcome) = guard.attempt.tick() {
            guard.settle(Submission::Completed(outcome));
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{assessment::AssessmentKind, models::question::Question};

    fn one_minute_exam() -> Arc<Assessment> {
        let questions = (0..4)
            .map(|i| Question {
                id: format!("q{i}"),
                question: format!("Question {i}"),
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                correct_answer: i,
                explanation: None,
            })
            .collect();
        Arc::new(Assessment {
            id: "exam-1".into(),
            course_id: "cloud".into(),
            kind: AssessmentKind::Exam,
            title: "Cloud Practitioner".into(),
            questions,
            passing_score: 50,
            time_limit_secs: 60,
        })
    }

    fn counting_hook() -> (Arc<AtomicUsize>, impl FnOnce(Outcome) + Send + 'static) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        (calls, move |_outcome: Outcome| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_auto_submits_partial_answers() {
        let (calls, hook) = counting_hook();
        let session = AttemptSession::start(one_minute_exam(), hook);

        session.select_answer(0).await.unwrap();
        session.go_to_question(1).await.unwrap();
        session.select_answer(1).await.unwrap();

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert!(session.outcome().await.is_none());

        tokio::time::sleep(Duration::from_secs(2)).await;
        let outcome = session.outcome().await.expect("auto-submitted at zero");
        assert_eq!(outcome.correct_count, 2);
        assert_eq!(outcome.score, 50);
        assert!(outcome.passed);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Manual submit afterwards is a no-op with the same result.
        let late = session.submit().await;
        assert_eq!(late, Submission::AlreadyCompleted(outcome));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_submit_cancels_countdown() {
        let (calls, hook) = counting_hook();
        let session = AttemptSession::start(one_minute_exam(), hook);

        for i in 0..4 {
            session.go_to_question(i).await.unwrap();
            session.select_answer(i).await.unwrap();
        }
        let submission = session.try_submit().await.unwrap();
        assert!(submission.is_first());
        assert_eq!(submission.outcome().score, 100);

        let remaining = session.snapshot().await.time_remaining_secs();
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(session.snapshot().await.time_remaining_secs(), remaining);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gated_submit_leaves_countdown_running() {
        let (calls, hook) = counting_hook();
        let session = AttemptSession::start(one_minute_exam(), hook);

        session.select_answer(0).await.unwrap();
        assert_eq!(
            session.try_submit().await,
            Err(AssessmentError::Incomplete { unanswered: 3 })
        );

        tokio::time::sleep(Duration::from_secs(61)).await;
        let outcome = session.outcome().await.expect("timer still fires");
        assert_eq!(outcome.correct_count, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
