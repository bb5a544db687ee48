use bunner_cors_middleware::CorsHeaders;
use bunner_cors_middleware::constants::header;

pub fn has_header(headers: &CorsHeaders<'_>, name: &str) -> bool {
    headers.get(name).is_some()
}

pub fn has_any_cors_header(headers: &CorsHeaders<'_>) -> bool {
    header::CORS_RESPONSE_HEADERS
        .iter()
        .any(|name| has_header(headers, name))
}

/// Renders headers the way they would be written, one line per value.
pub fn render(headers: &CorsHeaders<'_>) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
