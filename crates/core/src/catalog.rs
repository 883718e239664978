//! Quiz catalog input rules.
//!
//! Validation happens before any write, so a rejected payload leaves no
//! partial quiz behind.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Minimum number of questions a quiz must be created with. Combined with
/// [`MIN_ANSWER_OPTIONS`] and the last-question removal rule this keeps
/// every quiz's question count strictly positive.
pub const MIN_QUESTIONS_PER_QUIZ: usize = 2;

/// Minimum number of answer options per question.
pub const MIN_ANSWER_OPTIONS: usize = 2;

/// A question as submitted when creating a quiz or extending one.
///
/// `correct_index` designates exactly one of `options` as the correct
/// answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// Validate a single question payload: enough options, correct index in
/// range.
pub fn validate_question(question: &NewQuestion) -> Result<(), CoreError> {
    if question.options.len() < MIN_ANSWER_OPTIONS {
        return Err(CoreError::Validation(format!(
            "A question needs at least {MIN_ANSWER_OPTIONS} answer options"
        )));
    }
    if question.correct_index >= question.options.len() {
        return Err(CoreError::Validation(format!(
            "Correct answer index {} is out of range for {} options",
            question.correct_index,
            question.options.len()
        )));
    }
    Ok(())
}

/// Validate the question list of a brand-new quiz.
pub fn validate_new_quiz(questions: &[NewQuestion]) -> Result<(), CoreError> {
    if questions.len() < MIN_QUESTIONS_PER_QUIZ {
        return Err(CoreError::Validation(format!(
            "A quiz needs at least {MIN_QUESTIONS_PER_QUIZ} questions"
        )));
    }
    validate_added_questions(questions)
}

/// Validate questions appended to an existing quiz. The per-quiz minimum
/// does not apply here; each question still needs valid options.
pub fn validate_added_questions(questions: &[NewQuestion]) -> Result<(), CoreError> {
    if questions.is_empty() {
        return Err(CoreError::Validation("No questions supplied".into()));
    }
    for question in questions {
        validate_question(question)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: usize, correct_index: usize) -> NewQuestion {
        NewQuestion {
            text: "What is the capital of France?".into(),
            options: (0..options).map(|i| format!("option {i}")).collect(),
            correct_index,
        }
    }

    #[test]
    fn accepts_valid_quiz() {
        let questions = vec![question(2, 0), question(4, 3)];
        assert!(validate_new_quiz(&questions).is_ok());
    }

    #[test]
    fn rejects_too_few_questions() {
        let questions = vec![question(3, 1)];
        assert!(matches!(
            validate_new_quiz(&questions),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn rejects_too_few_options() {
        let questions = vec![question(2, 0), question(1, 0)];
        assert!(validate_new_quiz(&questions).is_err());
    }

    #[test]
    fn rejects_correct_index_out_of_range() {
        assert!(validate_question(&question(3, 3)).is_err());
        assert!(validate_question(&question(3, 2)).is_ok());
    }

    #[test]
    fn added_questions_skip_quiz_minimum() {
        let questions = vec![question(2, 1)];
        assert!(validate_added_questions(&questions).is_ok());
    }

    #[test]
    fn added_questions_must_not_be_empty() {
        assert!(validate_added_questions(&[]).is_err());
    }
}
