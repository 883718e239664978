//! Repository for the quiz content hierarchy (quizzes, questions, answers).
//!
//! Every mutation that touches question rows also updates the quiz's
//! denormalized `number_of_questions` inside the same transaction, so the
//! cached count always equals the live count.

use sqlx::{PgPool, Postgres, Transaction};

use quizhub_core::catalog::NewQuestion;
use quizhub_core::scoring::AnswerKeyEntry;
use quizhub_core::types::DbId;

use crate::models::quiz::{Answer, CreateQuiz, Question, QuestionWithAnswers, Quiz, QuizDetail};
use crate::repositories::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, company_id, title, description, passing_frequency, number_of_questions, created_at";

/// Provides catalog operations for quizzes.
pub struct QuizRepo;

impl QuizRepo {
    /// Insert a new quiz with its full question/answer tree in one
    /// transaction, parent before child: quiz, then questions, then
    /// answers. Input validation happens in `quizhub_core::catalog` before
    /// this is called.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        input: &CreateQuiz,
    ) -> Result<QuizDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO quizzes
                (company_id, title, description, passing_frequency, number_of_questions)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let quiz = sqlx::query_as::<_, Quiz>(&insert_query)
            .bind(company_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.passing_frequency)
            .bind(input.questions.len() as i32)
            .fetch_one(&mut *tx)
            .await?;

        let questions = Self::insert_questions_inner(&mut tx, quiz.id, &input.questions).await?;

        tx.commit().await?;
        Ok(QuizDetail { quiz, questions })
    }

    /// Find a quiz by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Quiz>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quizzes WHERE id = $1");
        sqlx::query_as::<_, Quiz>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a company's quizzes ordered by ID ascending.
    pub async fn list_by_company(
        pool: &PgPool,
        company_id: DbId,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Quiz>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quizzes
             WHERE company_id = $1
             ORDER BY id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(company_id)
            .bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Fetch a quiz with its questions and answer options. Returns `None`
    /// if the quiz does not exist.
    pub async fn detail(pool: &PgPool, id: DbId) -> Result<Option<QuizDetail>, sqlx::Error> {
        let Some(quiz) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let questions: Vec<Question> = sqlx::query_as(
            "SELECT id, quiz_id, question FROM questions WHERE quiz_id = $1 ORDER BY id ASC",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let answers: Vec<Answer> = sqlx::query_as(
            "SELECT a.id, a.question_id, a.answer, a.is_correct
             FROM answers a
             JOIN questions q ON q.id = a.question_id
             WHERE q.quiz_id = $1
             ORDER BY a.id ASC",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let questions = questions
            .into_iter()
            .map(|question| {
                let answers = answers
                    .iter()
                    .filter(|answer| answer.question_id == question.id)
                    .cloned()
                    .collect();
                QuestionWithAnswers {
                    id: question.id,
                    question: question.question,
                    answers,
                }
            })
            .collect();

        Ok(Some(QuizDetail { quiz, questions }))
    }

    /// Append questions to an existing quiz and bump the cached count by the
    /// number added, in one transaction. Returns the updated quiz row plus
    /// the created questions, or `None` if the quiz does not exist.
    pub async fn add_questions(
        pool: &PgPool,
        quiz_id: DbId,
        questions: &[NewQuestion],
    ) -> Result<Option<(Quiz, Vec<QuestionWithAnswers>)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Bump the count first: it verifies the quiz exists and locks its
        // row, so concurrent structural edits serialize on the quiz.
        let update_query = format!(
            "UPDATE quizzes SET number_of_questions = number_of_questions + $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let quiz = sqlx::query_as::<_, Quiz>(&update_query)
            .bind(quiz_id)
            .bind(questions.len() as i32)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(quiz) = quiz else {
            tx.rollback().await?;
            return Ok(None);
        };

        let created = Self::insert_questions_inner(&mut tx, quiz_id, questions).await?;

        tx.commit().await?;
        Ok(Some((quiz, created)))
    }

    /// Remove one question from a quiz (answers cascade) and decrement the
    /// cached count, in one transaction. Returns the updated quiz row, or
    /// `None` if the question does not belong to the quiz.
    pub async fn remove_question(
        pool: &PgPool,
        quiz_id: DbId,
        question_id: DbId,
    ) -> Result<Option<Quiz>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM questions WHERE id = $1 AND quiz_id = $2")
            .bind(question_id)
            .bind(quiz_id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let update_query = format!(
            "UPDATE quizzes SET number_of_questions = number_of_questions - 1
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let quiz = sqlx::query_as::<_, Quiz>(&update_query)
            .bind(quiz_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(quiz))
    }

    /// Delete a quiz by ID. Questions, answers, and attempt history cascade
    /// at the schema level. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch the quiz's answer key: the (question, correct answer) pairs the
    /// scoring engine grades against.
    pub async fn answer_key(
        pool: &PgPool,
        quiz_id: DbId,
    ) -> Result<Vec<AnswerKeyEntry>, sqlx::Error> {
        let rows: Vec<(DbId, DbId)> = sqlx::query_as(
            "SELECT a.question_id, a.id
             FROM answers a
             JOIN questions q ON q.id = a.question_id
             WHERE q.quiz_id = $1 AND a.is_correct = TRUE",
        )
        .bind(quiz_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(question_id, answer_id)| AnswerKeyEntry {
                question_id,
                answer_id,
            })
            .collect())
    }

    /// Live question count for a quiz, for verifying the cached
    /// `number_of_questions` in tests.
    pub async fn question_count(pool: &PgPool, quiz_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM questions WHERE quiz_id = $1")
                .bind(quiz_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Insert questions and their answers under a quiz, parent before
    /// child. Exactly the answer at each question's `correct_index` is
    /// marked correct.
    async fn insert_questions_inner(
        tx: &mut Transaction<'_, Postgres>,
        quiz_id: DbId,
        questions: &[NewQuestion],
    ) -> Result<Vec<QuestionWithAnswers>, sqlx::Error> {
        let mut created = Vec::with_capacity(questions.len());

        for question in questions {
            let row: Question = sqlx::query_as(
                "INSERT INTO questions (quiz_id, question)
                 VALUES ($1, $2)
                 RETURNING id, quiz_id, question",
            )
            .bind(quiz_id)
            .bind(&question.text)
            .fetch_one(&mut **tx)
            .await?;

            let mut answers = Vec::with_capacity(question.options.len());
            for (index, option) in question.options.iter().enumerate() {
                let answer: Answer = sqlx::query_as(
                    "INSERT INTO answers (question_id, answer, is_correct)
                     VALUES ($1, $2, $3)
                     RETURNING id, question_id, answer, is_correct",
                )
                .bind(row.id)
                .bind(option)
                .bind(index == question.correct_index)
                .fetch_one(&mut **tx)
                .await?;
                answers.push(answer);
            }

            created.push(QuestionWithAnswers {
                id: row.id,
                question: row.question,
                answers,
            });
        }

        Ok(created)
    }
}
