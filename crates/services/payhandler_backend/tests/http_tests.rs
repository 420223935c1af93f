use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use payhandler_backend::routes::routes;
use payhandler_backend::AppState;
use payhandler_common::ResponseEnvelope;
use payhandler_config::{AppConfig, MailConfig, PaypalConfig, ServerConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{basic_auth, bearer_token, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(paypal: &MockServer, mail: &MockServer) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        use_mail: true,
        paypal: PaypalConfig {
            base_url: paypal.uri(),
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            currency: Some("USD".to_string()),
            amount: Some("9.99".to_string()),
            description: Some("Subscription upgrade".to_string()),
        },
        mail: Some(MailConfig {
            base_url: mail.uri(),
            domain: "mg.example.com".to_string(),
            api_key: "key-123".to_string(),
            sender: "payments@example.com".to_string(),
            recipient: "billing@example.com".to_string(),
        }),
        log_level: None,
    })
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/oauth2/token"))
        .and(basic_auth("client-id", "client-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A21AA-token",
            "token_type": "Bearer",
            "expires_in": 32400
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_execute_payment_over_http_sends_success_mail() {
    let paypal = MockServer::start().await;
    let mail = MockServer::start().await;
    mount_token(&paypal).await;
    Mock::given(method("POST"))
        .and(path("/v1/payments/payment/PAY-9/execute"))
        .and(bearer_token("A21AA-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "PAY-9",
            "state": "approved"
        })))
        .expect(1)
        .mount(&paypal)
        .await;
    Mock::given(method("POST"))
        .and(path("/v3/mg.example.com/messages"))
        .and(basic_auth("api", "key-123"))
        .and(body_string_contains("subject=Payment+approved"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "<1@mg.example.com>",
            "message": "Queued. Thank you."
        })))
        .expect(1)
        .mount(&mail)
        .await;

    let app = routes(AppState::new(config_for(&paypal, &mail)));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/execute-payment")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"paymentId":"PAY-9","payerId":"PAYER-1","username":"ada"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    assert_eq!(body_json(response).await, json!({}));
}

#[tokio::test]
async fn test_invoke_create_payment_returns_envelope() {
    let paypal = MockServer::start().await;
    let mail = MockServer::start().await;
    mount_token(&paypal).await;
    Mock::given(method("POST"))
        .and(path("/v1/payments/payment"))
        .and(bearer_token("A21AA-token"))
        .and(body_string_contains("https://app.test/upgrade?status=success"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "PAY-1",
            "state": "created",
            "links": [{"href": "https://paypal.test/approve", "rel": "approval_url", "method": "REDIRECT"}]
        })))
        .expect(1)
        .mount(&paypal)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mail)
        .await;

    let event = json!({
        "resource": "/create-payment",
        "httpMethod": "POST",
        "body": "{\"callbackUrl\":\"https://app.test/upgrade\"}"
    });
    let app = routes(AppState::new(config_for(&paypal, &mail)));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/invoke")
                .header("content-type", "application/json")
                .body(Body::from(event.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    let envelope: ResponseEnvelope = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(envelope.status_code, 200);
    assert_eq!(
        envelope.body_json(),
        json!({"paymentId": "PAY-1", "approvalUrl": "https://paypal.test/approve"})
    );
}

#[tokio::test]
async fn test_unknown_path_returns_500_with_cors() {
    let paypal = MockServer::start().await;
    let mail = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&paypal)
        .await;

    let app = routes(AppState::new(config_for(&paypal, &mail)));
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/refund")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    assert_eq!(body_json(response).await, json!({}));
}

async fn assert_rejected_invoke(request: Request<Body>) {
    let paypal = MockServer::start().await;
    let mail = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&paypal)
        .await;

    let app = routes(AppState::new(config_for(&paypal, &mail)));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    assert_eq!(body_json(response).await, json!({}));
}

#[tokio::test]
async fn test_invoke_with_malformed_event_returns_envelope() {
    assert_rejected_invoke(
        Request::builder()
            .method("POST")
            .uri("/invoke")
            .header("content-type", "application/json")
            .body(Body::from("{\"resource\": "))
            .unwrap(),
    )
    .await;
}

#[tokio::test]
async fn test_invoke_with_wrong_content_type_returns_envelope() {
    assert_rejected_invoke(
        Request::builder()
            .method("POST")
            .uri("/invoke")
            .header("content-type", "text/plain")
            .body(Body::from(r#"{"resource":"/create-payment"}"#))
            .unwrap(),
    )
    .await;
}

#[tokio::test]
async fn test_invoke_with_get_returns_envelope() {
    assert_rejected_invoke(
        Request::builder()
            .method("GET")
            .uri("/invoke")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
}

#[tokio::test]
async fn test_preflight_is_answered_with_cors() {
    let paypal = MockServer::start().await;
    let mail = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&paypal)
        .await;

    let app = routes(AppState::new(config_for(&paypal, &mail)));
    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/create-payment")
                .header("origin", "https://app.test")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[cfg(feature = "openapi")]
#[tokio::test]
async fn test_openapi_document_is_served() {
    let paypal = MockServer::start().await;
    let mail = MockServer::start().await;

    let app = routes(AppState::new(config_for(&paypal, &mail)));
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"]["/invoke"]["post"].is_object());
}
