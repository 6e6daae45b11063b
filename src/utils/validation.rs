use crate::utils::error::{LocatorError, Result};
use std::path::Path;
use url::Url;

pub const MAX_TIMEOUT_SECONDS: u64 = 300;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> LocatorError {
    LocatorError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Requests are sent to `<endpoint>?<query>`, so the endpoint must be a plain http(s) URL.
pub fn validate_endpoint(service: &str, endpoint: &str) -> Result<()> {
    let field = format!("{}.endpoint", service);
    let url = Url::parse(endpoint)
        .map_err(|e| invalid(&field, endpoint, format!("{} endpoint is not a URL: {}", service, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            &field,
            endpoint,
            format!("{} endpoint must use http or https", service),
        ));
    }
    if url.query().is_some() {
        return Err(invalid(
            &field,
            endpoint,
            "query parameters are added per request; put only the path here",
        ));
    }
    Ok(())
}

pub fn validate_timeout(seconds: u64) -> Result<()> {
    if seconds == 0 || seconds > MAX_TIMEOUT_SECONDS {
        return Err(invalid(
            "http.timeout_seconds",
            seconds,
            format!("request timeout must be 1 to {} seconds", MAX_TIMEOUT_SECONDS),
        ));
    }
    Ok(())
}

/// Search text, language and viewer are passed on verbatim; blank ones are never meaningful.
pub fn validate_required_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "must not be blank"));
    }
    Ok(())
}

/// Marker styles end up inside the `pt` mini-syntax, so they cannot carry its separators.
pub fn validate_marker_style(field: &str, style: &str) -> Result<()> {
    validate_required_text(field, style)?;
    if style.contains([',', '~']) {
        return Err(invalid(field, style, "marker style cannot contain ',' or '~'"));
    }
    Ok(())
}

pub fn validate_output_path(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid("output", path, "map file path must not be blank"));
    }
    if path.ends_with(std::path::is_separator) || Path::new(path).file_name().is_none() {
        return Err(invalid("output", path, "map file path must name a file"));
    }
    Ok(())
}
