pub mod constants;
mod config;
mod context;
mod cors;
mod header_builder;
mod headers;
pub mod middleware;
mod options;
mod origin;
mod result;
mod util;

pub use config::CorsConfig;
pub use context::RequestContext;
pub use cors::Cors;
pub use headers::Headers;
pub use middleware::{CorsLayer, CorsService};
pub use options::{CorsOptions, SkipFn, ValidationError};
pub use origin::Origin;
pub use result::{CorsDecision, CorsHeaders};
