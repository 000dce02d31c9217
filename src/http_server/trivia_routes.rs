//! Trivia HTTP Routes
//!
//! Endpoints for categories, questions, search and quiz play.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::{debug, info};

use super::errors::{ApiError, ApiResult};
use super::pagination::{page_offset, parse_page, total_pages, QUESTIONS_PER_PAGE};
use super::quiz::{pick_question, ALL_CATEGORIES};
use super::request::{CreateQuestionRequest, QuizRequest, SearchRequest};
use super::response::{
    CategoriesResponse, CategoryQuestionsResponse, CreatedResponse, DeletedResponse,
    QuestionPageResponse, QuizResponse, SearchResponse,
};
use crate::store::{category_map, CategoryMap, TriviaRepository};

// ==================
// Shared State
// ==================

/// Trivia state shared across handlers
pub struct TriviaState {
    pub repo: Arc<dyn TriviaRepository>,
}

impl TriviaState {
    pub fn new(repo: Arc<dyn TriviaRepository>) -> Self {
        Self { repo }
    }

    /// Run store work on the blocking pool.
    ///
    /// rusqlite holds the connection mutex for the whole call, so it must not
    /// run on an async worker thread.
    async fn with_repo<T, F>(&self, work: F) -> ApiResult<T>
    where
        F: FnOnce(&dyn TriviaRepository) -> ApiResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let repo = Arc::clone(&self.repo);
        tokio::task::spawn_blocking(move || work(repo.as_ref())).await?
    }
}

fn categories_of(repo: &dyn TriviaRepository) -> ApiResult<CategoryMap> {
    Ok(category_map(&repo.categories()?))
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<String>,
}

// ==================
// Trivia Routes
// ==================

/// Create trivia routes.
///
/// Every path answers unsupported methods with the 405 envelope.
pub fn trivia_routes(state: Arc<TriviaState>) -> Router {
    Router::new()
        // Categories
        .route(
            "/categories",
            get(list_categories_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/categories/:id/questions",
            get(category_questions_handler).fallback(method_not_allowed_handler),
        )
        // Questions
        .route(
            "/questions",
            get(list_questions_handler)
                .post(create_question_handler)
                .fallback(method_not_allowed_handler),
        )
        .route(
            "/questions/:id",
            delete(delete_question_handler).fallback(method_not_allowed_handler),
        )
        // Search and play
        .route(
            "/search",
            post(search_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/quizzes",
            post(quiz_handler).fallback(method_not_allowed_handler),
        )
        .with_state(state)
}

/// Unknown paths
pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}

/// Known paths, unsupported methods
pub(super) async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Non-integer ids cannot match a record
fn path_id(path: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    path.map(|Path(id)| id).map_err(|_| ApiError::NotFound)
}

/// Bodies that cannot be buffered (over the size limit, broken stream) are bad requests
fn body_bytes(body: Result<Bytes, BytesRejection>) -> ApiResult<Bytes> {
    body.map_err(|rejection| {
        debug!(status = %rejection.status(), "request body rejected");
        ApiError::bad_request()
    })
}

// ==================
// Category Handlers
// ==================

async fn list_categories_handler(
    State(state): State<Arc<TriviaState>>,
) -> ApiResult<Json<CategoriesResponse>> {
    let categories = state.with_repo(categories_of).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesResponse::new(categories)))
}

async fn category_questions_handler(
    State(state): State<Arc<TriviaState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<CategoryQuestionsResponse>> {
    let category_id = path_id(path)?;
    state
        .with_repo(move |repo| {
            let questions = repo.questions_in_category(category_id)?;
            if questions.is_empty() {
                return Err(ApiError::NotFound);
            }

            Ok(Json(CategoryQuestionsResponse {
                success: true,
                total_questions: questions.len(),
                questions,
                current_category: category_id,
                categories: categories_of(repo)?,
            }))
        })
        .await
}

// ==================
// Question Handlers
// ==================

async fn list_questions_handler(
    State(state): State<Arc<TriviaState>>,
    params: Option<Query<PageParams>>,
) -> ApiResult<Json<QuestionPageResponse>> {
    let page = parse_page(params.as_ref().and_then(|Query(p)| p.page.as_deref()));
    let offset = page_offset(page).ok_or(ApiError::NotFound)?;
    debug!(page, offset, "listing questions");

    state
        .with_repo(move |repo| {
            let questions = repo.questions_page(offset, QUESTIONS_PER_PAGE)?;
            if questions.is_empty() {
                return Err(ApiError::NotFound);
            }
            let total_questions = repo.count_questions()?;

            Ok(Json(QuestionPageResponse {
                success: true,
                questions,
                total_questions,
                current_category: None,
                categories: categories_of(repo)?,
                total_pages: total_pages(total_questions),
            }))
        })
        .await
}

async fn create_question_handler(
    State(state): State<Arc<TriviaState>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<CreatedResponse>> {
    let request = CreateQuestionRequest::from_body(&body_bytes(body)?)?;
    let question = request.into_new_question();
    let created = state
        .with_repo(move |repo| Ok(repo.insert_question(&question)?))
        .await?;
    info!(id = created, "question created");

    Ok(Json(CreatedResponse {
        success: true,
        created,
    }))
}

async fn delete_question_handler(
    State(state): State<Arc<TriviaState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DeletedResponse>> {
    let id = path_id(path)?;
    state
        .with_repo(move |repo| {
            repo.question(id)?.ok_or(ApiError::NotFound)?;
            // A concurrent delete can win between the lookup and here
            if !repo.delete_question(id)? {
                return Err(ApiError::NotFound);
            }
            Ok(())
        })
        .await?;
    info!(id, "question deleted");

    Ok(Json(DeletedResponse {
        success: true,
        deleted: id,
    }))
}

// ==================
// Search and Quiz Handlers
// ==================

async fn search_handler(
    State(state): State<Arc<TriviaState>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<SearchResponse>> {
    let request = SearchRequest::from_body(&body_bytes(body)?)?;
    let questions = state
        .with_repo(move |repo| Ok(repo.search_questions(&request.search_term)?))
        .await?;
    Ok(Json(SearchResponse::new(questions)))
}

async fn quiz_handler(
    State(state): State<Arc<TriviaState>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<QuizResponse>> {
    let request = QuizRequest::from_body(&body_bytes(body)?)?;
    let category_id = request.category_id;
    let candidates = state
        .with_repo(move |repo| {
            let candidates = if category_id == ALL_CATEGORIES {
                repo.all_questions()?
            } else {
                repo.questions_in_category(category_id)?
            };
            Ok(candidates)
        })
        .await?;
    debug!(
        category = category_id,
        candidates = candidates.len(),
        asked = request.previous_questions.len(),
        "drawing quiz question"
    );

    let question = pick_question(
        candidates,
        &request.previous_questions,
        &mut rand::thread_rng(),
    )
    .ok_or(ApiError::NotFound)?;

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}
