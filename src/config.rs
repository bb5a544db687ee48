use crate::options::{CorsOptions, ValidationError};
use crate::origin::Origin;
use serde::Deserialize;
use std::time::Duration;

/// Declarative policy, loadable from any serde format.
///
/// ```
/// use bunner_cors_middleware::{CorsConfig, CorsOptions};
///
/// let config: CorsConfig = serde_json::from_str(
///     r#"{ "allow_origins": ["https://a.test"], "allow_methods": ["GET"], "max_age_secs": 600 }"#,
/// )
/// .unwrap();
/// let options = CorsOptions::try_from(config).unwrap();
/// assert_eq!(options.methods, vec!["GET".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    pub allow_all_origins: bool,
    pub allow_origins: Vec<String>,
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
    pub expose_headers: Vec<String>,
    pub allow_credentials: bool,
    pub max_age_secs: Option<i64>,
}

impl TryFrom<CorsConfig> for CorsOptions {
    type Error = ValidationError;

    fn try_from(config: CorsConfig) -> Result<Self, Self::Error> {
        let max_age = match config.max_age_secs {
            Some(secs) if secs < 0 => return Err(ValidationError::NegativeMaxAge(secs)),
            Some(secs) => Some(Duration::from_secs(secs.unsigned_abs())),
            None => None,
        };

        let origin = if config.allow_all_origins {
            Origin::Any
        } else {
            Origin::List(config.allow_origins)
        };

        let options = CorsOptions {
            origin,
            methods: config.allow_methods,
            allowed_headers: config.allow_headers,
            exposed_headers: config.expose_headers,
            credentials: config.allow_credentials,
            max_age,
            skip: None,
        };
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
