use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info};
use serde::Serialize;
use std::sync::Arc;

use crate::telegram::{Update, UpdateDispatcher};

#[derive(Clone)]
pub struct AppState {
    /// `None` until a Telegram token is configured; the webhook answers
    /// 500 in that state.
    pub dispatcher: Option<Arc<UpdateDispatcher>>,
    pub telegram_token_set: bool,
    pub groq_api_key_set: bool,
}

#[derive(Serialize)]
struct StatusResponse {
    message: String,
    telegram_token_set: bool,
    groq_api_key_set: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct WebhookResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl WebhookResponse {
    fn ok() -> (StatusCode, Json<Self>) {
        (
            StatusCode::OK,
            Json(Self {
                status: "ok",
                message: None,
            }),
        )
    }

    fn error(message: String) -> (StatusCode, Json<Self>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Self {
                status: "error",
                message: Some(message),
            }),
        )
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(status_handler))
        .route("/webhook", post(webhook_handler))
        .with_state(state)
}

async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut error = None;
    if !state.telegram_token_set {
        error = Some("متغير البيئة TELEGRAM_TOKEN غير متاح.".to_string());
    }
    if !state.groq_api_key_set {
        error = Some("متغير البيئة GROQ_API_KEY غير متاح.".to_string());
    }

    Json(StatusResponse {
        message: "البوت يعمل بنجاح.".to_string(),
        telegram_token_set: state.telegram_token_set,
        groq_api_key_set: state.groq_api_key_set,
        error,
    })
}

async fn webhook_handler(State(state): State<AppState>, body: String) -> Response {
    let Some(dispatcher) = &state.dispatcher else {
        error!("webhook received but the bot is not initialized (TELEGRAM_TOKEN missing)");
        return WebhookResponse::error("Bot not initialized".to_string()).into_response();
    };

    info!("received webhook update from Telegram");
    let update = match serde_json::from_str::<Update>(&body) {
        Ok(update) => update,
        Err(e) => {
            error!("failed to parse webhook payload: {e}");
            return WebhookResponse::error(e.to_string()).into_response();
        }
    };

    match dispatcher.process_update(update).await {
        Ok(()) => {
            info!("webhook update processed");
            WebhookResponse::ok().into_response()
        }
        Err(e) => {
            error!("failed to process webhook update: {e}");
            WebhookResponse::error(e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Responder;
    use crate::config::KnowledgeBase;
    use crate::telegram::TelegramBot;
    use axum::body::Body;
    use http::{Method, Request};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn uninitialized_state() -> AppState {
        AppState {
            dispatcher: None,
            telegram_token_set: false,
            groq_api_key_set: false,
        }
    }

    fn initialized_state(telegram_base_url: &str) -> AppState {
        let bot = TelegramBot::new(
            "test-token".to_string(),
            Some(telegram_base_url.to_string()),
        );
        let responder = Responder::new(KnowledgeBase::default(), None);
        AppState {
            dispatcher: Some(Arc::new(UpdateDispatcher::new(bot, responder))),
            telegram_token_set: true,
            groq_api_key_set: true,
        }
    }

    async fn response_json(response: axum::response::Response) -> (StatusCode, Value) {
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn webhook_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/webhook")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn status_reports_missing_credentials() {
        let app = build_app(uninitialized_state());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let (status, body) = response_json(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["telegram_token_set"], json!(false));
        assert_eq!(body["groq_api_key_set"], json!(false));
        assert_eq!(body["error"], json!("متغير البيئة GROQ_API_KEY غير متاح."));
    }

    #[tokio::test]
    async fn status_reports_configured_credentials() {
        let server = MockServer::start().await;
        let app = build_app(initialized_state(&server.uri()));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let (status, body) = response_json(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["telegram_token_set"], json!(true));
        assert_eq!(body["groq_api_key_set"], json!(true));
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn webhook_without_bot_returns_500() {
        let app = build_app(uninitialized_state());
        let response = app.oneshot(webhook_request("{}")).await.unwrap();

        let (status, body) = response_json(response).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], json!("error"));
        assert_eq!(body["message"], json!("Bot not initialized"));
    }

    #[tokio::test]
    async fn webhook_accepts_a_semantically_empty_update() {
        let server = MockServer::start().await;
        let app = build_app(initialized_state(&server.uri()));
        let response = app.oneshot(webhook_request("{}")).await.unwrap();

        let (status, body) = response_json(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn webhook_rejects_a_non_json_body() {
        let server = MockServer::start().await;
        let app = build_app(initialized_state(&server.uri()));
        let response = app.oneshot(webhook_request("not json")).await.unwrap();

        let (status, body) = response_json(response).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], json!("error"));
        assert!(!body["message"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn webhook_text_message_is_answered_through_telegram() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bottest-token/sendMessage"))
            .and(body_partial_json(json!({
                "chat_id": 42,
                "text": "كل الحصص فردية وخاصة بين الطالب والمعلم."
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let app = build_app(initialized_state(&server.uri()));
        let update = json!({
            "update_id": 5,
            "message": {
                "message_id": 6,
                "chat": {"id": 42},
                "text": "هل الحصص فردية أم جماعية؟"
            }
        });
        let response = app
            .oneshot(webhook_request(&update.to_string()))
            .await
            .unwrap();

        let (status, body) = response_json(response).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = build_app(uninitialized_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
