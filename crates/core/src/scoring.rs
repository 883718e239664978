//! Quiz scoring: correctness counting and grade-point averages.
//!
//! Scoring is a pure function of the submitted answers and the quiz's
//! answer key; persistence and aggregation over attempt history live in
//! `quizhub-db`.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DbId;

/// One (question, chosen answer) pair as submitted by a user.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: DbId,
    pub answer_id: DbId,
}

/// One entry of a quiz's authoritative answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerKeyEntry {
    pub question_id: DbId,
    pub answer_id: DbId,
}

/// Count how many submitted answers are correct.
///
/// This is a multiset intersection by question id with
/// at-most-one-match-per-question semantics: a key entry is consumed the
/// moment it is matched, so submitting the same correct answer twice still
/// counts once. A wrong answer does not consume the entry, which keeps the
/// result independent of submission order.
pub fn count_correct_answers(submitted: &[SubmittedAnswer], key: &[AnswerKeyEntry]) -> u32 {
    let mut remaining: Vec<AnswerKeyEntry> = key.to_vec();
    let mut correct = 0;

    for answer in submitted {
        if let Some(pos) = remaining
            .iter()
            .position(|entry| entry.question_id == answer.question_id)
        {
            if remaining[pos].answer_id == answer.answer_id {
                remaining.swap_remove(pos);
                correct += 1;
            }
        }
    }

    correct
}

/// Grade-point average for a single attempt: `correct / total`, in [0, 1].
///
/// The catalog never lets a quiz's question count reach zero, but a quiz
/// mutated out from under a concurrent submission must fail loudly rather
/// than divide by zero.
pub fn attempt_gpa(correct_count: u32, number_of_questions: i32) -> Result<f64, CoreError> {
    if number_of_questions <= 0 {
        return Err(CoreError::Validation(
            "Quiz has no questions to grade against".into(),
        ));
    }
    Ok(f64::from(correct_count) / f64::from(number_of_questions))
}
