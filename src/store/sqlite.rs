//! # SQLite Repository
//!
//! [`TriviaRepository`] backed by a single `rusqlite` connection guarded by
//! a mutex. Handlers share it through an `Arc`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::errors::{StoreError, StoreResult};
use super::models::{Category, NewQuestion, Question};
use super::repository::TriviaRepository;

/// Categories seeded into an empty store by `trivia init`
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    type TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    category INTEGER NOT NULL,
    difficulty INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category);
";

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

/// SQLite-backed question bank
pub struct SqliteRepository {
    conn: Mutex<Connection>,
}

impl SqliteRepository {
    /// Open (or create) a database file and make sure the tables exist
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Private in-memory database, used by tests and `:memory:` configs
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert the default categories if the table is empty.
    ///
    /// Returns the number of categories inserted.
    pub fn seed_default_categories(&self) -> StoreResult<usize> {
        if !self.categories()?.is_empty() {
            return Ok(0);
        }
        for kind in DEFAULT_CATEGORIES {
            self.insert_category(kind)?;
        }
        Ok(DEFAULT_CATEGORIES.len())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn row_to_question(row: &Row<'_>) -> rusqlite::Result<Question> {
        Ok(Question {
            id: row.get(0)?,
            question: row.get(1)?,
            answer: row.get(2)?,
            category: row.get(3)?,
            difficulty: row.get(4)?,
        })
    }

    fn query_questions(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> StoreResult<Vec<Question>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let questions = stmt
            .query_map(params, Self::row_to_question)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(questions)
    }
}

/// Build a LIKE pattern matching `term` anywhere, with wildcards escaped
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn to_sql_int(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl TriviaRepository for SqliteRepository {
    fn categories(&self) -> StoreResult<Vec<Category>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, type FROM categories ORDER BY id")?;
        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    kind: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    fn insert_category(&self, kind: &str) -> StoreResult<i64> {
        let conn = self.lock()?;
        conn.execute("INSERT INTO categories (type) VALUES (?1)", params![kind])?;
        Ok(conn.last_insert_rowid())
    }

    fn count_questions(&self) -> StoreResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
        usize::try_from(count).map_err(|_| StoreError::CorruptRow(format!("count {}", count)))
    }

    fn questions_page(&self, offset: usize, limit: usize) -> StoreResult<Vec<Question>> {
        debug!(offset, limit, "loading question page");
        let sql = format!(
            "SELECT {} FROM questions ORDER BY id LIMIT ?1 OFFSET ?2",
            QUESTION_COLUMNS
        );
        self.query_questions(&sql, params![to_sql_int(limit), to_sql_int(offset)])
    }

    fn all_questions(&self) -> StoreResult<Vec<Question>> {
        let sql = format!("SELECT {} FROM questions ORDER BY id", QUESTION_COLUMNS);
        self.query_questions(&sql, params![])
    }

    fn questions_in_category(&self, category: i64) -> StoreResult<Vec<Question>> {
        let sql = format!(
            "SELECT {} FROM questions WHERE category = ?1 ORDER BY id",
            QUESTION_COLUMNS
        );
        self.query_questions(&sql, params![category])
    }

    fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        debug!(term, "searching questions");
        // LIKE folds ASCII case only
        let sql = format!(
            "SELECT {} FROM questions WHERE question LIKE ?1 ESCAPE '\\' ORDER BY id",
            QUESTION_COLUMNS
        );
        self.query_questions(&sql, params![like_pattern(term)])
    }

    fn question(&self, id: i64) -> StoreResult<Option<Question>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM questions WHERE id = ?1", QUESTION_COLUMNS);
        let question = conn
            .query_row(&sql, params![id], Self::row_to_question)
            .optional()?;
        Ok(question)
    }

    fn insert_question(&self, question: &NewQuestion) -> StoreResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO questions (question, answer, category, difficulty)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                question.question,
                question.answer,
                question.category,
                question.difficulty
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn delete_question(&self, id: i64) -> StoreResult<bool> {
        let conn = self.lock()?;
        let affected = conn.execute("DELETE FROM questions WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn new_question(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: text.to_string(),
            answer: "answer".to_string(),
            category,
            difficulty: 1,
        }
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("title"), "%title%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_seed_default_categories_once() {
        let repo = SqliteRepository::open_in_memory().unwrap();

        assert_eq!(repo.seed_default_categories().unwrap(), 6);
        assert_eq!(repo.seed_default_categories().unwrap(), 0);

        let categories = repo.categories().unwrap();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0].kind, "Science");
        assert_eq!(categories[5].kind, "Sports");
    }

    #[test]
    fn test_insert_and_fetch_question() {
        let repo = SqliteRepository::open_in_memory().unwrap();

        let id = repo.insert_question(&new_question("What is H2O?", 1)).unwrap();
        let stored = repo.question(id).unwrap().unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.question, "What is H2O?");
        assert_eq!(stored.category, 1);
    }

    #[test]
    fn test_delete_reports_absence() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let id = repo.insert_question(&new_question("q", 1)).unwrap();

        assert!(repo.delete_question(id).unwrap());
        assert!(!repo.delete_question(id).unwrap());
        assert!(repo.question(id).unwrap().is_none());
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        let first = repo.insert_question(&new_question("q1", 1)).unwrap();
        repo.delete_question(first).unwrap();

        let second = repo.insert_question(&new_question("q2", 1)).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_questions_page_window() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        for i in 0..15 {
            repo.insert_question(&new_question(&format!("q{}", i), 1)).unwrap();
        }

        assert_eq!(repo.count_questions().unwrap(), 15);
        assert_eq!(repo.questions_page(0, 10).unwrap().len(), 10);

        let second = repo.questions_page(10, 10).unwrap();
        assert_eq!(second.len(), 5);
        assert_eq!(second[0].question, "q10");

        assert!(repo.questions_page(20, 10).unwrap().is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.insert_question(&new_question("Whose autobiography is entitled X?", 4)).unwrap();
        repo.insert_question(&new_question("What movie earned Tom Hanks a TITLE?", 5)).unwrap();
        repo.insert_question(&new_question("What is the heaviest organ?", 1)).unwrap();

        let found = repo.search_questions("title").unwrap();
        assert_eq!(found.len(), 2);

        assert!(repo.search_questions("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.insert_question(&new_question("100% correct?", 1)).unwrap();
        repo.insert_question(&new_question("100 percent", 1)).unwrap();

        assert_eq!(repo.search_questions("100%").unwrap().len(), 1);
        assert!(repo.search_questions("_").unwrap().is_empty());
    }

    #[test]
    fn test_questions_in_category() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        repo.insert_question(&new_question("a", 1)).unwrap();
        repo.insert_question(&new_question("b", 2)).unwrap();
        repo.insert_question(&new_question("c", 1)).unwrap();

        let science = repo.questions_in_category(1).unwrap();
        assert_eq!(science.len(), 2);
        assert!(science.iter().all(|q| q.category == 1));
        assert!(repo.questions_in_category(9).unwrap().is_empty());
        assert_eq!(repo.all_questions().unwrap().len(), 3);
    }

    #[test]
    fn test_file_database_persists() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("trivia.db");

        let id = {
            let repo = SqliteRepository::open(&path).unwrap();
            repo.seed_default_categories().unwrap();
            repo.insert_question(&new_question("persisted?", 2)).unwrap()
        };

        let reopened = SqliteRepository::open(&path).unwrap();
        assert_eq!(reopened.categories().unwrap().len(), 6);
        assert_eq!(reopened.question(id).unwrap().unwrap().question, "persisted?");
    }
}
