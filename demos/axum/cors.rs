use std::time::Duration;

use bunner_cors_middleware::{CorsLayer, CorsOptions, Origin, ValidationError};

pub fn build_layer() -> Result<CorsLayer, ValidationError> {
    let options = CorsOptions {
        origin: Origin::list(["http://app.example.com", "http://localhost:3000"]),
        methods: vec!["GET".into(), "POST".into(), "OPTIONS".into()],
        allowed_headers: vec![
            "Content-Type".into(),
            "X-Requested-With".into(),
            "X-Example-Trace".into(),
        ],
        exposed_headers: vec!["X-Example-Trace".into()],
        credentials: true,
        max_age: Some(Duration::from_secs(600)),
        skip: None,
    }
    .with_skip(|request| request.path.starts_with("/internal/"));

    CorsLayer::from_options(options)
}
