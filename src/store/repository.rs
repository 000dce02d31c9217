//! # Trivia Repository
//!
//! The seam between HTTP handlers and the backing store.

use super::errors::StoreResult;
use super::models::{Category, NewQuestion, Question};

/// Reads and writes against the question bank.
///
/// Each method maps to a single statement; callers rely on the store's
/// auto-commit for atomicity.
pub trait TriviaRepository: Send + Sync {
    /// All categories, ordered by id
    fn categories(&self) -> StoreResult<Vec<Category>>;

    /// Insert a category and return its id
    fn insert_category(&self, kind: &str) -> StoreResult<i64>;

    /// Total number of questions
    fn count_questions(&self) -> StoreResult<usize>;

    /// A window of questions ordered by id
    fn questions_page(&self, offset: usize, limit: usize) -> StoreResult<Vec<Question>>;

    /// Every question, ordered by id
    fn all_questions(&self) -> StoreResult<Vec<Question>>;

    /// Questions whose category equals `category`
    fn questions_in_category(&self, category: i64) -> StoreResult<Vec<Question>>;

    /// Case-insensitive substring match on the question text
    fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>>;

    /// Look up a single question
    fn question(&self, id: i64) -> StoreResult<Option<Question>>;

    /// Persist a question and return the assigned id
    fn insert_question(&self, question: &NewQuestion) -> StoreResult<i64>;

    /// Remove a question. Returns false when no such id exists.
    fn delete_question(&self, id: i64) -> StoreResult<bool>;
}
