// src/models/question.rs

use serde::{Deserialize, Deserializer, Serialize};

/// A single multiple-choice question inside a quiz or exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,

    /// The prompt shown to the learner.
    pub question: String,

    /// Answer labels, in display order.
    pub options: Vec<String>,

    /// Index into `options`.
    pub correct_answer: usize,

    /// Shown on the review screen after completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    /// Label of the option at `index`, if it exists.
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }
}

/// Wire forms accepted for a question list: a JSON array, or a string holding
/// the JSON-encoded array (how the `jsonb` column round-trips in some clients).
#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionList {
    Parsed(Vec<Question>),
    Encoded(String),
}

/// Deserializes either wire form into the canonical `Vec<Question>`.
pub fn deserialize_questions<'de, D>(deserializer: D) -> Result<Vec<Question>, D::Error>
where
    D: Deserializer<'de>,
{
    match QuestionList::deserialize(deserializer)? {
        QuestionList::Parsed(questions) => Ok(questions),
        QuestionList::Encoded(raw) => serde_json::from_str(&raw).map_err(serde::de::Error::custom),
    }
}

/// Checks that a question list is gradable: at least one question, every
/// question has two or more options and a correct answer that points at one.
pub fn validate_questions(questions: &[Question]) -> Result<(), validator::ValidationError> {
    if questions.is_empty() {
        return Err(validator::ValidationError::new("questions_cannot_be_empty"));
    }
    if questions.len() > 500 {
        return Err(validator::ValidationError::new("too_many_questions"));
    }
    for q in questions {
        if q.question.trim().is_empty() || q.question.len() > 2000 {
            return Err(validator::ValidationError::new("invalid_question_text"));
        }
        if q.options.len() < 2 {
            return Err(validator::ValidationError::new("not_enough_options"));
        }
        if q.options.iter().any(|opt| opt.len() > 500) {
            return Err(validator::ValidationError::new("option_too_long"));
        }
        if q.correct_answer >= q.options.len() {
            return Err(validator::ValidationError::new("correct_answer_out_of_range"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "deserialize_questions")]
        questions: Vec<Question>,
    }

    fn sample() -> serde_json::Value {
        serde_json::json!([
            { "id": "q1", "question": "2 + 2?", "options": ["3", "4"], "correctAnswer": 1 },
            { "id": "q2", "question": "Capital of France?", "options": ["Paris", "Rome", "Oslo"],
              "correctAnswer": 0, "explanation": "Paris is the capital." }
        ])
    }

    #[test]
    fn accepts_parsed_array() {
        let holder: Holder = serde_json::from_value(serde_json::json!({ "questions": sample() })).unwrap();
        assert_eq!(holder.questions.len(), 2);
        assert_eq!(holder.questions[1].explanation.as_deref(), Some("Paris is the capital."));
    }

    #[test]
    fn accepts_encoded_string() {
        let encoded = sample().to_string();
        let holder: Holder =
            serde_json::from_value(serde_json::json!({ "questions": encoded })).unwrap();
        assert_eq!(holder.questions.len(), 2);
        assert_eq!(holder.questions[0].correct_answer, 1);
    }

    #[test]
    fn rejects_garbage_string() {
        let result: Result<Holder, _> =
            serde_json::from_value(serde_json::json!({ "questions": "not json" }));
        assert!(result.is_err());
    }

    #[test]
    fn validation_rejects_out_of_range_answer() {
        let mut questions: Vec<Question> = serde_json::from_value(sample()).unwrap();
        assert!(validate_questions(&questions).is_ok());

        questions[0].correct_answer = 2;
        let err = validate_questions(&questions).unwrap_err();
        assert_eq!(err.code, "correct_answer_out_of_range");
    }

    #[test]
    fn validation_rejects_single_option() {
        let mut questions: Vec<Question> = serde_json::from_value(sample()).unwrap();
        questions[1].options.truncate(1);
        questions[1].correct_answer = 0;
        assert_eq!(validate_questions(&questions).unwrap_err().code, "not_enough_options");
        assert_eq!(validate_questions(&[]).unwrap_err().code, "questions_cannot_be_empty");
    }
}
