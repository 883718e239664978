//! Write-only Redis log of raw submitted answers.
//!
//! Every graded submission mirrors its (user, question) -> answer pairs
//! into Redis under `"{user_id}_{question_id}"` keys. Nothing in the API
//! reads these back; the log exists for downstream export tooling.

use fred::prelude::*;

use quizhub_core::scoring::SubmittedAnswer;
use quizhub_core::types::DbId;

/// Number of clients in the Redis connection pool.
const POOL_SIZE: usize = 6;

/// Handle to the Redis answer log. Cheap to clone; the inner pool is
/// shared.
#[derive(Clone)]
pub struct AnswerLog {
    pool: Pool,
}

impl AnswerLog {
    /// Connect to Redis at the given URL and wait for the pool to be ready.
    pub async fn connect(url: &str) -> Result<Self, Error> {
        let config = Config::from_url(url)?;
        let pool = Pool::new(config, None, None, None, POOL_SIZE)?;

        pool.connect();
        pool.wait_for_connect().await?;

        Ok(Self { pool })
    }

    /// Record a user's submitted answers, one key per question.
    pub async fn record(
        &self,
        user_id: DbId,
        answers: &[SubmittedAnswer],
    ) -> Result<(), Error> {
        for answer in answers {
            let key = format!("{user_id}_{}", answer.question_id);
            let _: () = self
                .pool
                .set(key, answer.answer_id.to_string(), None, None, false)
                .await?;
        }
        Ok(())
    }
}
