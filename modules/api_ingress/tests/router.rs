use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    routing::{get, post},
    Router,
};
use tower::util::ServiceExt;

use api_ingress::{ApiIngress, ApiIngressConfig};

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = ApiIngress::default().build_router(Router::new());

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["status"], "healthy");

    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn cors_preflight_allows_patch_from_any_origin() {
    let app = ApiIngress::default().build_router(Router::new());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/tickets/abc")
                .header(header::ORIGIN, "http://localhost:8080")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
    let methods = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(methods.contains("PATCH"));
    assert!(methods.contains("DELETE"));
}

#[tokio::test]
async fn cors_can_be_disabled() {
    let app = ApiIngress::new(ApiIngressConfig {
        cors_enabled: false,
        ..Default::default()
    })
    .build_router(Router::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://localhost:8080")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn static_dir_serves_unmatched_paths() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("index.html"), "<h1>helpdesk</h1>").unwrap();

    let app = ApiIngress::new(ApiIngressConfig {
        static_dir: Some(tmp.path().to_string_lossy().to_string()),
        ..Default::default()
    })
    .build_router(Router::new());

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "<h1>helpdesk</h1>");

    let response = app
        .oneshot(Request::builder().uri("/missing.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let routes = Router::new().route("/echo", post(|body: String| async move { body }));
    let app = ApiIngress::new(ApiIngressConfig {
        body_limit_bytes: 16,
        ..Default::default()
    })
    .build_router(routes);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/echo")
                .header(header::CONTENT_LENGTH, "64")
                .body(Body::from(vec![b'x'; 64]))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn slow_handlers_time_out_with_408() {
    let routes = Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(std::time::Duration::from_secs(10)).await;
            "done"
        }),
    );
    let app = ApiIngress::new(ApiIngressConfig {
        request_timeout_secs: 1,
        ..Default::default()
    })
    .build_router(routes);

    let response = app
        .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert!(response.headers().get("x-request-id").is_some());
}
