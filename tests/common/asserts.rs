use bunner_cors_middleware::{CorsDecision, CorsHeaders};

pub fn assert_simple(decision: CorsDecision<'_>) -> CorsHeaders<'_> {
    match decision {
        CorsDecision::Simple(headers) => headers,
        other => panic!("expected simple decision, got {:?}", other),
    }
}

pub fn assert_preflight(decision: CorsDecision<'_>) -> CorsHeaders<'_> {
    match decision {
        CorsDecision::Preflight(headers) => headers,
        other => panic!("expected preflight decision, got {:?}", other),
    }
}

pub fn assert_forbidden(decision: CorsDecision<'_>) {
    assert!(
        matches!(decision, CorsDecision::Forbidden),
        "expected forbidden decision, got {:?}",
        decision
    );
}

pub fn assert_header_eq(headers: &CorsHeaders<'_>, name: &str, expected: &str) {
    assert_eq!(
        headers.get(name),
        Some(expected),
        "unexpected value for {name}"
    );
}

pub fn assert_vary_eq<const N: usize>(headers: &CorsHeaders<'_>, expected: [&str; N]) {
    assert_eq!(headers.get_all("Vary"), expected.to_vec());
}

pub fn assert_vary_is_empty(headers: &CorsHeaders<'_>) {
    assert!(headers.get_all("Vary").is_empty(), "vary should be absent");
}
