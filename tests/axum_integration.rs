use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::routing::get;
use bunner_cors_middleware::constants::header;
use bunner_cors_middleware::{CorsLayer, CorsOptions, Origin};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower::ServiceExt;

fn app(calls: Arc<AtomicUsize>) -> Router {
    let layer = CorsLayer::from_options(
        CorsOptions {
            origin: Origin::list(["https://a.test"]),
            methods: vec!["GET".into(), "POST".into()],
            allowed_headers: vec!["Content-Type".into()],
            exposed_headers: vec!["X-Trace".into()],
            credentials: true,
            max_age: Some(Duration::from_secs(600)),
            skip: None,
        }
        .with_skip(|request| request.path == "/health"),
    )
    .expect("valid CORS configuration");

    let handler = move || {
        let calls = Arc::clone(&calls);
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            ([("x-trace", "abc"), ("vary", "Accept-Encoding")], "hello")
        }
    };

    Router::new()
        .route("/greet", get(handler.clone()).post(handler))
        .route("/health", get(|| async { "ok" }))
        .layer(layer)
}

fn request(method: &str, uri: &str, origin: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(origin) = origin {
        builder = builder.header("origin", origin);
    }
    builder.body(Body::empty()).expect("valid request")
}

async fn body_text(body: Body) -> String {
    let bytes = to_bytes(body, usize::MAX).await.expect("readable body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

#[tokio::test]
async fn request_without_origin_reaches_handler_untouched() {
    let calls = Arc::new(AtomicUsize::new(0));

    let response = app(Arc::clone(&calls))
        .oneshot(request("GET", "/greet", None))
        .await
        .expect("infallible");

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
    assert_eq!(body_text(response.into_body()).await, "hello");
}

#[tokio::test]
async fn unlisted_origin_gets_empty_403() {
    let calls = Arc::new(AtomicUsize::new(0));

    let response = app(Arc::clone(&calls))
        .oneshot(request("GET", "/greet", Some("https://evil.test")))
        .await
        .expect("infallible");

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    for name in header::CORS_RESPONSE_HEADERS {
        assert!(response.headers().get(name).is_none(), "{name} present");
    }
    assert!(body_text(response.into_body()).await.is_empty());
}

#[tokio::test]
async fn preflight_is_answered_by_the_layer() {
    let calls = Arc::new(AtomicUsize::new(0));

    let response = app(Arc::clone(&calls))
        .oneshot(request("OPTIONS", "/greet", Some("https://a.test")))
        .await
        .expect("infallible");

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://a.test");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET,POST");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "600");
    let vary: Vec<_> = headers
        .get_all(header::VARY)
        .iter()
        .map(|value| value.to_str().expect("ascii"))
        .collect();
    assert_eq!(
        vary,
        vec![
            "Origin",
            "Access-Control-Request-Method",
            "Access-Control-Request-Headers"
        ]
    );
    assert!(body_text(response.into_body()).await.is_empty());
}

#[tokio::test]
async fn simple_request_merges_headers_into_handler_response() {
    let calls = Arc::new(AtomicUsize::new(0));

    let response = app(Arc::clone(&calls))
        .oneshot(request("POST", "/greet", Some("https://a.test")))
        .await
        .expect("infallible");

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://a.test");
    assert_eq!(headers[header::ACCESS_CONTROL_EXPOSE_HEADERS], "X-Trace");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers["x-trace"], "abc");
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).is_none());
    let vary: Vec<_> = headers
        .get_all(header::VARY)
        .iter()
        .map(|value| value.to_str().expect("ascii"))
        .collect();
    assert_eq!(vary, vec!["Accept-Encoding", "Origin"]);
    assert_eq!(body_text(response.into_body()).await, "hello");
}

#[tokio::test]
async fn skipped_path_ignores_policy() {
    let calls = Arc::new(AtomicUsize::new(0));

    let response = app(Arc::clone(&calls))
        .oneshot(request("GET", "/health", Some("https://evil.test")))
        .await
        .expect("infallible");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
    assert_eq!(body_text(response.into_body()).await, "ok");
}
