use reqwest::Url;

use crate::error::CoreError;

use super::client::DEFAULT_ENDPOINT;

/// Resolve the configured endpoint, falling back to [`DEFAULT_ENDPOINT`]
/// when none (or an empty string) is given.
pub(super) fn resolve_endpoint(endpoint: Option<&str>) -> Result<String, CoreError> {
    match endpoint.map(str::trim).filter(|e| !e.is_empty()) {
        Some(endpoint) => parse_connection(endpoint),
        None => Ok(DEFAULT_ENDPOINT.to_owned()),
    }
}

pub(super) fn parse_connection(connection: &str) -> Result<String, CoreError> {
    let parsed = Url::parse(connection).map_err(|e| {
        CoreError::InvalidConfig(format!(
            "invalid endpoint `{connection}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(connection.to_owned()),
        other => Err(CoreError::InvalidConfig(format!(
            "unsupported endpoint scheme `{other}`; expected http or https"
        ))),
    }
}
