use serde::{Deserialize, Deserializer};

use crate::error::{CoreError, RpcError};

#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) jsonrpc: &'static str,
    pub(super) id: u64,
    pub(super) method: &'a str,
    pub(super) params: Vec<serde_json::Value>,
}

#[derive(serde::Deserialize)]
pub(super) struct JsonRpcResponse {
    #[serde(default)]
    id: serde_json::Value,
    // `"result": null` is a valid result (e.g. unknown block), so presence
    // must be tracked separately from the value.
    #[serde(default, deserialize_with = "present")]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl JsonRpcResponse {
    /// Enforce the envelope invariants and extract the `result` value.
    ///
    /// Exactly one of `result` / `error` must be present. Successful
    /// responses must echo `expected_id`; error responses may carry a null
    /// id, as JSON-RPC allows for requests the node could not parse.
    pub(super) fn into_result(
        self,
        method: &str,
        expected_id: u64,
    ) -> Result<serde_json::Value, CoreError> {
        let Self { id, result, error } = self;
        match (result, error) {
            (Some(_), Some(_)) => Err(invalid_response(
                method,
                "response carries both result and error".to_owned(),
            )),
            (None, None) => Err(invalid_response(
                method,
                "response carries neither result nor error".to_owned(),
            )),
            (None, Some(err)) => {
                if !id.is_null() {
                    check_response_id(method, &id, expected_id)?;
                }
                Err(parse_jsonrpc_error(method, err))
            }
            (Some(result), None) => {
                check_response_id(method, &id, expected_id)?;
                Ok(result)
            }
        }
    }
}

pub(super) fn invalid_response(method: &str, message: String) -> CoreError {
    RpcError::InvalidResponse {
        method: method.to_owned(),
        message,
    }
    .into()
}

/// Parse a JSON-RPC error value into a structured `CoreError`.
///
/// The JSON-RPC spec defines errors as `{"code": <int>, "message": <string>}`.
/// If the error value matches that shape, we produce a `ServerError`;
/// otherwise we fall back to `InvalidResponse` with the raw JSON.
pub(super) fn parse_jsonrpc_error(method: &str, err: serde_json::Value) -> CoreError {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    match serde_json::from_value::<JsonRpcError>(err.clone()) {
        Ok(parsed) => RpcError::ServerError {
            method: method.to_owned(),
            code: parsed.code,
            message: parsed.message,
        }
        .into(),
        Err(_) => invalid_response(method, format!("non-standard JSON-RPC error: {err}")),
    }
}

fn check_response_id(
    method: &str,
    id: &serde_json::Value,
    expected: u64,
) -> Result<(), CoreError> {
    let actual = parse_response_id(method, id)?;
    if actual != expected {
        return Err(invalid_response(
            method,
            format!("response id {actual} does not match request id {expected}"),
        ));
    }
    Ok(())
}

pub(super) fn parse_response_id(method: &str, id: &serde_json::Value) -> Result<u64, CoreError> {
    if let Some(n) = id.as_u64() {
        return Ok(n);
    }

    if let Some(s) = id.as_str() {
        return s
            .parse::<u64>()
            .map_err(|e| invalid_response(method, format!("invalid response id string: {e}")));
    }

    Err(invalid_response(method, format!("invalid response id: {id}")))
}
