//! pharmachat REST API server
//!
//! Exposes the two chat pipelines to the web frontend: a text endpoint
//! for drug-cessation queries and an image endpoint for pharmacist-style
//! description of uploads. Each request is independent; nothing is
//! persisted between calls.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose, Engine as _};
use chat_core::api::{AnswerResponse, ErrorResponse, ImageQueryRequest, TextQueryRequest};
use chat_core::{AppConfig, ChatError, ImagePayload};
use llm_bridge::{GeminiClient, GeminiConfig, TextModel, VisionModel};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

struct AppState {
    text: TextModel,
    vision: VisionModel,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    if config.api_key.is_none() {
        tracing::warn!("GOOGLE_API_KEY is not set; queries will fail until it is provided");
    }
    let state = build_state(&config, GeminiConfig::default())?;

    let app = router(state);

    let addr = "127.0.0.1:3000";
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &AppConfig, gemini: GeminiConfig) -> Result<Arc<AppState>, ChatError> {
    let client = GeminiClient::new(gemini, config.api_key.clone())?;
    Ok(Arc::new(AppState {
        text: TextModel::with_default_model(client.clone()),
        vision: VisionModel::with_default_model(client),
    }))
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat/text", post(chat_text))
        .route("/api/chat/image", post(chat_image))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn chat_text(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextQueryRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, drug = %request.drug_name, "text query received");

    let answer = state.text.drug_guidance(&request.drug_name).await?;

    tracing::info!(%request_id, "text query answered");
    Ok(Json(AnswerResponse { answer }))
}

async fn chat_image(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ImageQueryRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let request_id = Uuid::new_v4();

    let bytes = general_purpose::STANDARD
        .decode(request.data_b64.as_bytes())
        .map_err(|_| ChatError::Validation("image data is not valid base64".to_string()))?;
    let payload = ImagePayload::from_bytes(bytes)?;
    tracing::info!(
        %request_id,
        file = %request.file_name,
        mime = %payload.mime_type,
        "image query received"
    );

    let answer = state.vision.describe_image(&payload).await?;

    tracing::info!(%request_id, "image query answered");
    Ok(Json(AnswerResponse { answer }))
}

/// Maps pipeline errors onto HTTP responses: validation problems are the
/// caller's to fix, everything else is reported as an upstream failure.
struct ApiError(ChatError);

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ChatError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ChatError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ChatError::Transport { .. } => StatusCode::BAD_GATEWAY,
        };
        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_router(base_url: &str, api_key: Option<&str>) -> Router {
        let gemini = GeminiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            max_retries: 0,
        };
        let config = AppConfig {
            api_key: api_key.map(str::to_string),
        };
        router(build_state(&config, gemini).unwrap())
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn answer_body(text: &str) -> Value {
        json!({
            "candidates": [
                {"content": {"parts": [{"text": text}], "role": "model"}}
            ]
        })
    }

    fn blank_png_b64() -> String {
        let img = image::RgbImage::from_pixel(10, 10, image::Rgb([255, 255, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        general_purpose::STANDARD.encode(bytes)
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = test_router("http://127.0.0.1:9", Some("test-key"));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_text_query_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer_body("Symptom info...")))
            .expect(1)
            .mount(&server)
            .await;

        let app = test_router(&server.uri(), Some("test-key"));
        let response = app
            .oneshot(json_request(
                "/api/chat/text",
                json!({"drug_name": "Nicotine"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["answer"], "Symptom info...");
    }

    #[tokio::test]
    async fn test_empty_drug_name_is_rejected_without_upstream_call() {
        let server = MockServer::start().await;
        let app = test_router(&server.uri(), Some("test-key"));

        let response = app
            .oneshot(json_request("/api/chat/text", json!({"drug_name": "  "})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("drug name"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_image_query_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(answer_body("A blank image.")))
            .expect(1)
            .mount(&server)
            .await;

        let app = test_router(&server.uri(), Some("test-key"));
        let response = app
            .oneshot(json_request(
                "/api/chat/image",
                json!({"file_name": "blank.png", "data_b64": blank_png_b64()}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["answer"], "A blank image.");
    }

    #[tokio::test]
    async fn test_invalid_base64_is_rejected() {
        let app = test_router("http://127.0.0.1:9", Some("test-key"));
        let response = app
            .oneshot(json_request(
                "/api/chat/image",
                json!({"file_name": "x.png", "data_b64": "%%% not base64 %%%"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_non_image_payload_is_rejected() {
        let app = test_router("http://127.0.0.1:9", Some("test-key"));
        let data_b64 = general_purpose::STANDARD.encode(b"not an image");
        let response = app
            .oneshot(json_request(
                "/api/chat/image",
                json!({"file_name": "x.png", "data_b64": data_b64}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_upstream_failure_maps_to_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let app = test_router(&server.uri(), Some("test-key"));
        let response = app
            .oneshot(json_request(
                "/api/chat/text",
                json!({"drug_name": "Nicotine"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_missing_key_maps_to_internal_error() {
        let app = test_router("http://127.0.0.1:9", None);
        let response = app
            .oneshot(json_request(
                "/api/chat/text",
                json!({"drug_name": "Nicotine"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
