//! [`tower`] adapter for [`Cors`].
//!
//! ```
//! use bunner_cors_middleware::{CorsLayer, CorsOptions, Origin};
//! use tower::Layer;
//!
//! let layer = CorsLayer::from_options(CorsOptions {
//!     origin: Origin::list(["https://app.example"]),
//!     methods: vec!["GET".into(), "POST".into()],
//!     ..CorsOptions::default()
//! })
//! .expect("valid CORS configuration");
//!
//! let service = layer.layer(tower::service_fn(|_req: http::Request<()>| async {
//!     Ok::<_, std::convert::Infallible>(http::Response::new(String::from("ok")))
//! }));
//! # drop(service);
//! ```

use crate::context::RequestContext;
use crate::cors::Cors;
use crate::headers::Headers;
use crate::options::{CorsOptions, ValidationError};
use crate::result::CorsDecision;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Request, Response, StatusCode};
use pin_project::pin_project;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, ready};
use tower::{Layer, Service};

/// Wraps a service so every request passes through the CORS policy first.
#[derive(Clone, Debug)]
pub struct CorsLayer {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    cors: Cors,
    preflight: HeaderMap,
    simple: HeaderMap,
}

impl CorsLayer {
    pub fn new(cors: Cors) -> Self {
        let preflight = to_header_map(cors.preflight_headers());
        let simple = to_header_map(cors.simple_headers());
        Self {
            shared: Arc::new(Shared {
                cors,
                preflight,
                simple,
            }),
        }
    }

    pub fn from_options(options: CorsOptions) -> Result<Self, ValidationError> {
        Cors::new(options).map(Self::new)
    }

    pub fn cors(&self) -> &Cors {
        &self.shared.cors
    }
}

impl<S> Layer<S> for CorsLayer {
    type Service = CorsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsService {
            inner,
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Service produced by [`CorsLayer`].
#[derive(Clone, Debug)]
pub struct CorsService<S> {
    inner: S,
    shared: Arc<Shared>,
}

impl<S> CorsService<S> {
    pub fn new(cors: Cors, inner: S) -> Self {
        CorsLayer::new(cors).layer(inner)
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

enum Route {
    Forward,
    Forbidden,
    Preflight { echo: bool },
    Simple { echo: bool },
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CorsService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ResBody: Default,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = ResponseFuture<S::Future, ResBody>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let origin = req.headers().get(http::header::ORIGIN).cloned();
        let route = {
            let origin_text = origin
                .as_ref()
                .map(|value| String::from_utf8_lossy(value.as_bytes()));
            let ctx = RequestContext::new(
                req.method().as_str(),
                req.uri().path(),
                origin_text.as_deref(),
            );
            route_for(self.shared.cors.check(&ctx))
        };

        match route {
            Route::Forward => ResponseFuture::forward(self.inner.call(req)),
            Route::Forbidden => ResponseFuture::ready(empty_response(StatusCode::FORBIDDEN)),
            Route::Preflight { echo } => {
                let mut response = empty_response(StatusCode::OK);
                *response.headers_mut() = self.shared.preflight.clone();
                if let Some(origin) = origin.filter(|_| echo) {
                    response
                        .headers_mut()
                        .insert(http::header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
                }
                ResponseFuture::ready(response)
            }
            Route::Simple { echo } => ResponseFuture {
                kind: Kind::CorsCall {
                    future: self.inner.call(req),
                    allow_origin: origin.filter(|_| echo),
                    shared: Arc::clone(&self.shared),
                },
            },
        }
    }
}

fn route_for(decision: CorsDecision<'_>) -> Route {
    match decision {
        CorsDecision::Skipped | CorsDecision::NotApplicable => Route::Forward,
        CorsDecision::Forbidden => Route::Forbidden,
        CorsDecision::Preflight(headers) => Route::Preflight {
            echo: headers.echoed_origin().is_some(),
        },
        CorsDecision::Simple(headers) => Route::Simple {
            echo: headers.echoed_origin().is_some(),
        },
    }
}

/// Response future for [`CorsService`].
#[pin_project]
pub struct ResponseFuture<F, B> {
    #[pin]
    kind: Kind<F, B>,
}

#[pin_project(project = KindProj)]
enum Kind<F, B> {
    Forward {
        #[pin]
        future: F,
    },
    CorsCall {
        #[pin]
        future: F,
        allow_origin: Option<HeaderValue>,
        shared: Arc<Shared>,
    },
    Ready {
        response: Option<Response<B>>,
    },
}

impl<F, B> ResponseFuture<F, B> {
    fn forward(future: F) -> Self {
        Self {
            kind: Kind::Forward { future },
        }
    }

    fn ready(response: Response<B>) -> Self {
        Self {
            kind: Kind::Ready {
                response: Some(response),
            },
        }
    }
}

impl<F, B, E> Future for ResponseFuture<F, B>
where
    F: Future<Output = Result<Response<B>, E>>,
{
    type Output = Result<Response<B>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project().kind.project() {
            KindProj::Forward { future } => future.poll(cx),
            KindProj::CorsCall {
                future,
                allow_origin,
                shared,
            } => {
                let mut response = ready!(future.poll(cx))?;
                let headers = response.headers_mut();
                merge_headers(headers, &shared.simple);
                if let Some(origin) = allow_origin.take() {
                    headers.insert(http::header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
                }
                Poll::Ready(Ok(response))
            }
            KindProj::Ready { response } => Poll::Ready(Ok(response
                .take()
                .expect("ResponseFuture polled after completion"))),
        }
    }
}

fn empty_response<B: Default>(status: StatusCode) -> Response<B> {
    let mut response = Response::new(B::default());
    *response.status_mut() = status;
    response
}

fn to_header_map(headers: &Headers) -> HeaderMap {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        if let (Ok(header_name), Ok(header_value)) =
            (HeaderName::try_from(name), HeaderValue::from_str(value))
        {
            map.append(header_name, header_value);
        }
    }
    map
}

/// Writes `bundle` over `target`. `Vary` values are appended unless already listed.
fn merge_headers(target: &mut HeaderMap, bundle: &HeaderMap) {
    for name in bundle.keys() {
        if *name == http::header::VARY {
            for value in bundle.get_all(name) {
                if !lists_vary(target, value) {
                    target.append(name.clone(), value.clone());
                }
            }
        } else if let Some(value) = bundle.get(name) {
            target.insert(name.clone(), value.clone());
        }
    }
}

fn lists_vary(target: &HeaderMap, value: &HeaderValue) -> bool {
    let Ok(wanted) = value.to_str() else {
        return false;
    };
    target
        .get_all(http::header::VARY)
        .iter()
        .filter_map(|existing| existing.to_str().ok())
        .flat_map(|existing| existing.split(','))
        .any(|entry| {
            let entry = entry.trim();
            entry == "*" || entry.eq_ignore_ascii_case(wanted)
        })
}

#[cfg(test)]
#[path = "middleware_test.rs"]
mod middleware_test;
