//! # Request Validation
//!
//! Request bodies arrive as untyped JSON. Each endpoint validates the body
//! into a typed struct, collecting every missing field (400) and every
//! field of the wrong shape (422) before failing.

use serde_json::{Map, Value};

use super::errors::{ApiError, ApiResult};
use crate::store::NewQuestion;

/// Parse a request body into a JSON object.
///
/// An empty body is treated as an empty object so that the missing-field
/// checks report what was expected.
pub fn parse_object(body: &[u8]) -> ApiResult<Map<String, Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ApiError::bad_request()),
    }
}

/// Integer that may arrive as a JSON number or a numeric string
fn lenient_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accumulates validation failures across fields
#[derive(Debug, Default)]
struct FieldCheck {
    missing: Vec<String>,
    invalid: Vec<String>,
}

impl FieldCheck {
    /// JSON null counts as absent
    fn present<'a>(&mut self, body: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
        match body.get(key) {
            None | Some(Value::Null) => {
                self.missing.push(key.to_string());
                None
            }
            Some(value) => Some(value),
        }
    }

    fn string(&mut self, body: &Map<String, Value>, key: &str) -> Option<String> {
        let value = self.present(body, key)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.invalid.push(key.to_string());
                None
            }
        }
    }

    fn integer(&mut self, body: &Map<String, Value>, key: &str) -> Option<i64> {
        let value = self.present(body, key)?;
        let parsed = lenient_int(value);
        if parsed.is_none() {
            self.invalid.push(key.to_string());
        }
        parsed
    }

    fn finish(self) -> ApiResult<()> {
        if !self.missing.is_empty() {
            return Err(ApiError::BadRequest {
                fields: self.missing,
            });
        }
        if !self.invalid.is_empty() {
            return Err(ApiError::Unprocessable {
                fields: self.invalid,
            });
        }
        Ok(())
    }
}

/// Body of `POST /questions`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateQuestionRequest {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

impl CreateQuestionRequest {
    pub fn from_body(body: &[u8]) -> ApiResult<Self> {
        let body = parse_object(body)?;
        let mut check = FieldCheck::default();

        let question = check.string(&body, "question");
        let answer = check.string(&body, "answer");
        let category = check.integer(&body, "category");
        let difficulty = check.integer(&body, "difficulty");
        check.finish()?;

        match (question, answer, category, difficulty) {
            (Some(question), Some(answer), Some(category), Some(difficulty)) => Ok(Self {
                question,
                answer,
                category,
                difficulty,
            }),
            _ => Err(ApiError::bad_request()),
        }
    }

    pub fn into_new_question(self) -> NewQuestion {
        NewQuestion {
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// Body of `POST /search`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub search_term: String,
}

impl SearchRequest {
    pub fn from_body(body: &[u8]) -> ApiResult<Self> {
        let body = parse_object(body)?;
        let mut check = FieldCheck::default();

        let search_term = check.string(&body, "searchTerm");
        check.finish()?;

        search_term
            .map(|search_term| Self { search_term })
            .ok_or_else(ApiError::bad_request)
    }
}

/// Body of `POST /quizzes`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    /// 0 selects from every category
    pub category_id: i64,
    pub previous_questions: Vec<i64>,
}

impl QuizRequest {
    pub fn from_body(body: &[u8]) -> ApiResult<Self> {
        let body = parse_object(body)?;
        let mut check = FieldCheck::default();

        let category_id = check.present(&body, "quiz_category").and_then(|category| {
            let id = category.get("id").and_then(lenient_int);
            if id.is_none() {
                check.invalid.push("quiz_category".to_string());
            }
            id
        });

        let previous_questions = match body.get("previous_questions") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => {
                let ids: Option<Vec<i64>> = items.iter().map(lenient_int).collect();
                ids.unwrap_or_else(|| {
                    check.invalid.push("previous_questions".to_string());
                    Vec::new()
                })
            }
            Some(_) => {
                check.invalid.push("previous_questions".to_string());
                Vec::new()
            }
        };

        check.finish()?;

        category_id
            .map(|category_id| Self {
                category_id,
                previous_questions,
            })
            .ok_or_else(ApiError::bad_request)
    }
}
