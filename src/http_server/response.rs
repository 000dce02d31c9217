//! # Response Payloads
//!
//! Success bodies for the trivia endpoints. Every payload carries
//! `success: true`; failures use [`super::errors::ErrorResponse`].

use serde::Serialize;

use crate::store::{CategoryMap, Question};

/// `GET /categories`
#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub total_categories: usize,
    pub categories: CategoryMap,
}

impl CategoriesResponse {
    pub fn new(categories: CategoryMap) -> Self {
        Self {
            success: true,
            total_categories: categories.len(),
            categories,
        }
    }
}

/// `GET /questions`
#[derive(Debug, Clone, Serialize)]
pub struct QuestionPageResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    /// Always null on the unfiltered listing
    pub current_category: Option<i64>,
    pub categories: CategoryMap,
    pub total_pages: usize,
}

/// `GET /categories/{id}/questions`
#[derive(Debug, Clone, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub total_questions: usize,
    pub questions: Vec<Question>,
    pub current_category: i64,
    pub categories: CategoryMap,
}

/// `POST /search`
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub total_questions: usize,
    pub questions: Vec<Question>,
}

impl SearchResponse {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            success: true,
            total_questions: questions.len(),
            questions,
        }
    }
}

/// `POST /questions`
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: i64,
}

/// `DELETE /questions/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: i64,
}

/// `POST /quizzes`
#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Question,
}
