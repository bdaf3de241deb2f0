use crate::analysis::Analysis;
use crate::citations::{extract_citations, Citations};
use crate::engine::{Comparison, HistoryEngine, NewAnalysis};
use crate::error::EngineError;
use crate::keywords::extract_keywords;
use crate::language::Language;
use crate::patterns::PatternReport;
use crate::similarity::similarity_matrix;
use crate::statistics::{compute_statistics, ContentStatistics};
use crate::threads::{build_threads, Comment, CommentThreads};
use crate::timeline::{extract_timeline, Timeline};
use crate::tokenizer::Tokenizer;
use crate::tone::{emotional_tone, EmotionalTone};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// ========== Request/Response Types ==========

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Deserialize)]
pub struct SimilarityRequest {
    pub texts: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThreadsRequest {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// JSON body extractor whose rejections use the `ApiResponse` envelope
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
struct AppJson<T>(T);

// ========== Error Handling ==========

struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        if let Some(rejection) = self.0.downcast_ref::<JsonRejection>() {
            return rejection.status();
        }
        match self.0.downcast_ref::<EngineError>() {
            Some(EngineError::NotFound(_)) => StatusCode::NOT_FOUND,
            Some(EngineError::InsufficientHistory { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            Some(EngineError::InvalidScore(_)) => StatusCode::BAD_REQUEST,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self.0.downcast_ref::<JsonRejection>() {
            Some(rejection) => rejection.body_text(),
            None => format!("{:#}", self.0),
        };
        if status.is_server_error() {
            tracing::error!("API error: {}", message);
        } else {
            tracing::warn!(status = %status, "API request rejected: {}", message);
        }

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// ========== Handlers ==========

fn language_or_default(engine: &HistoryEngine, language: Option<Language>) -> Language {
    language.unwrap_or(engine.default_language())
}

async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK"))
}

async fn statistics(
    State(engine): State<Arc<HistoryEngine>>,
    AppJson(req): AppJson<TextRequest>,
) -> Json<ApiResponse<ContentStatistics>> {
    let language = language_or_default(&engine, req.language);
    Json(ApiResponse::success(compute_statistics(&req.text, language)))
}

async fn keywords(
    State(engine): State<Arc<HistoryEngine>>,
    AppJson(req): AppJson<TextRequest>,
) -> Json<ApiResponse<Vec<String>>> {
    let language = language_or_default(&engine, req.language);
    Json(ApiResponse::success(extract_keywords(&req.text, language)))
}

async fn tone(
    State(engine): State<Arc<HistoryEngine>>,
    AppJson(req): AppJson<TextRequest>,
) -> Json<ApiResponse<EmotionalTone>> {
    let language = language_or_default(&engine, req.language);
    let tokens = Tokenizer::new(language).analyze(&req.text);
    Json(ApiResponse::success(emotional_tone(&tokens, language)))
}

async fn similarity(
    AppJson(req): AppJson<SimilarityRequest>,
) -> Json<ApiResponse<Vec<Vec<f64>>>> {
    Json(ApiResponse::success(similarity_matrix(&req.texts)))
}

async fn timeline(AppJson(req): AppJson<TextRequest>) -> Json<ApiResponse<Timeline>> {
    Json(ApiResponse::success(extract_timeline(&req.text)))
}

async fn citations(AppJson(req): AppJson<TextRequest>) -> Json<ApiResponse<Citations>> {
    Json(ApiResponse::success(extract_citations(&req.text)))
}

async fn threads(AppJson(req): AppJson<ThreadsRequest>) -> Json<ApiResponse<CommentThreads>> {
    Json(ApiResponse::success(build_threads(&req.comments)))
}

async fn record_analysis(
    State(engine): State<Arc<HistoryEngine>>,
    AppJson(req): AppJson<NewAnalysis>,
) -> ApiResult<Analysis> {
    let analysis = engine.record(req)?;
    Ok(Json(ApiResponse::success(analysis)))
}

async fn list_analyses(State(engine): State<Arc<HistoryEngine>>) -> ApiResult<Vec<Analysis>> {
    Ok(Json(ApiResponse::success(engine.history()?)))
}

async fn get_analysis(
    State(engine): State<Arc<HistoryEngine>>,
    Path(id): Path<String>,
) -> ApiResult<Analysis> {
    let analysis = engine.get(&id)?.ok_or(EngineError::NotFound(id))?;
    Ok(Json(ApiResponse::success(analysis)))
}

async fn delete_analysis(
    State(engine): State<Arc<HistoryEngine>>,
    Path(id): Path<String>,
) -> ApiResult<&'static str> {
    engine.delete(&id)?;
    Ok(Json(ApiResponse::success("Analysis deleted successfully")))
}

async fn compare_analyses(
    State(engine): State<Arc<HistoryEngine>>,
    AppJson(req): AppJson<CompareRequest>,
) -> ApiResult<Comparison> {
    Ok(Json(ApiResponse::success(engine.compare(&req.ids)?)))
}

async fn analysis_patterns(State(engine): State<Arc<HistoryEngine>>) -> ApiResult<PatternReport> {
    Ok(Json(ApiResponse::success(engine.patterns()?)))
}

// ========== Router ==========

pub fn create_router(engine: Arc<HistoryEngine>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/statistics", post(statistics))
        .route("/keywords", post(keywords))
        .route("/tone", post(tone))
        .route("/similarity", post(similarity))
        .route("/timeline", post(timeline))
        .route("/citations", post(citations))
        .route("/threads", post(threads))
        .route("/analyses", post(record_analysis).get(list_analyses))
        .route("/analyses/compare", post(compare_analyses))
        .route("/analyses/patterns", get(analysis_patterns))
        .route("/analyses/:id", get(get_analysis).delete(delete_analysis))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router() -> Router {
        create_router(Arc::new(HistoryEngine::in_memory().unwrap()))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&router(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "OK");
    }

    #[tokio::test]
    async fn test_statistics_endpoint() {
        let app = router();
        let (status, body) = send(
            &app,
            Method::POST,
            "/statistics",
            Some(json!({"text": "the the the data data pipeline pipeline pipeline"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["wordCount"], 8);
        assert_eq!(body["data"]["topKeywords"][0], "pipeline");
        assert_eq!(body["data"]["topKeywords"][1], "data");
    }

    #[tokio::test]
    async fn test_similarity_endpoint() {
        let (status, body) = send(
            &router(),
            Method::POST,
            "/similarity",
            Some(json!({"texts": ["the cat sat", "the cat ran"]})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([[100.0, 50.0], [50.0, 100.0]]));
    }

    #[tokio::test]
    async fn test_text_extractors() {
        let app = router();
        let (_, body) = send(
            &app,
            Method::POST,
            "/timeline",
            Some(json!({"text": "On 1/2/2020 and again 1/2/2020"})),
        )
        .await;
        assert_eq!(body["data"]["hasInconsistencies"], true);
        assert_eq!(body["data"]["timespan"]["earliest"]["date"], "2020-02-01");

        let (_, body) = send(
            &app,
            Method::POST,
            "/citations",
            Some(json!({"text": "see https://example.com"})),
        )
        .await;
        assert_eq!(body["data"]["citationCount"], 1);

        let (_, body) = send(
            &app,
            Method::POST,
            "/tone",
            Some(json!({"text": "संकट गहरा", "language": "hi"})),
        )
        .await;
        assert_eq!(body["data"]["negative"], 1);

        let (_, body) = send(
            &app,
            Method::POST,
            "/keywords",
            Some(json!({"text": "the the the data data pipeline pipeline pipeline"})),
        )
        .await;
        assert_eq!(body["data"][0], "pipeline");
        assert!(body["data"].as_array().unwrap().len() <= 5);
    }

    #[tokio::test]
    async fn test_threads_endpoint() {
        let (status, body) = send(
            &router(),
            Method::POST,
            "/threads",
            Some(json!({"comments": [
                {"id": "1", "author": "a", "body": "root", "createdAt": "2024-01-01T00:00:00Z"},
                {"id": "2", "parentId": "1", "author": "b", "body": "reply", "createdAt": "2024-01-01T00:05:00Z"}
            ]})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 2);
        assert_eq!(body["data"]["roots"][0]["replyCount"], 1);
        assert_eq!(body["data"]["roots"][0]["replies"][0]["id"], "2");
    }

    #[tokio::test]
    async fn test_analysis_lifecycle() {
        let app = router();

        let (status, _) = send(&app, Method::GET, "/analyses/patterns", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, first) = send(
            &app,
            Method::POST,
            "/analyses",
            Some(json!({"text": "the cat sat", "credibilityScore": 50, "warnings": ["X"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let first_id = first["data"]["id"].as_str().unwrap().to_string();

        let (_, second) = send(
            &app,
            Method::POST,
            "/analyses",
            Some(json!({
                "text": "the cat ran",
                "credibilityScore": 90,
                "warnings": ["X"],
                "factCheckExplanation": "confirmed"
            })),
        )
        .await;
        let second_id = second["data"]["id"].as_str().unwrap().to_string();

        let (_, list) = send(&app, Method::GET, "/analyses", None).await;
        assert_eq!(list["data"].as_array().unwrap().len(), 2);

        let (status, comparison) = send(
            &app,
            Method::POST,
            "/analyses/compare",
            Some(json!({"ids": [first_id, second_id]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(comparison["data"]["matrix"][0][1], 50.0);

        let (status, patterns) = send(&app, Method::GET, "/analyses/patterns", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patterns["data"]["recurringWarnings"][0]["occurrences"], 2);

        let uri = format!("/analyses/{}", first_id);
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    async fn send_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_incomplete_body_uses_error_envelope() {
        let app = router();
        let (status, body) = send(&app, Method::POST, "/analyses", Some(json!({"text": "x"}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().contains("credibilityScore"));

        let (status, body) = send(&app, Method::POST, "/similarity", Some(json!({}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_envelope() {
        let (status, body) = send_raw(&router(), "/statistics", "{\"text\": ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_invalid_score_is_bad_request() {
        let (status, body) = send(
            &router(),
            Method::POST,
            "/analyses",
            Some(json!({"text": "x", "credibilityScore": 140})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }
}
