use axum::response::{Html, IntoResponse};

pub async fn greet() -> impl IntoResponse {
    Html(
        "<h1>Welcome to the Axum CORS example!</h1><p>Try calling this endpoint from an allowed origin.</p>",
    )
}

pub async fn echo(body: String) -> impl IntoResponse {
    ([("x-example-trace", "echo")], body)
}

pub async fn health() -> &'static str {
    "ok"
}
