use reqwest::StatusCode;

use crate::error::RpcError;

#[derive(serde::Serialize)]
pub(super) struct JsonRpcRequest<'a> {
    pub(super) jsonrpc: &'static str,
    pub(super) id: u64,
    pub(super) method: &'a str,
    pub(super) params: Vec<serde_json::Value>,
}

#[derive(serde::Deserialize)]
pub(super) struct JsonRpcResponse {
    pub(super) result: Option<serde_json::Value>,
    pub(super) error: Option<serde_json::Value>,
}

/// Turn an HTTP status and body into the `result` value or a typed error.
///
/// Non-2xx statuses fail before the body is parsed; a JSON-RPC `error`
/// member takes precedence over `result`. A missing `result` is `null`.
pub(super) fn interpret_response(
    status: StatusCode,
    body: &str,
) -> Result<serde_json::Value, RpcError> {
    if !status.is_success() {
        return Err(RpcError::HttpStatus {
            status: status.as_u16(),
            text: status
                .canonical_reason()
                .map(str::to_owned)
                .unwrap_or_else(|| status.as_str().to_owned()),
        });
    }

    let decoded: JsonRpcResponse = serde_json::from_str(body).map_err(|e| {
        RpcError::InvalidResponse(format!("decode JSON-RPC response: {e}; body={body}"))
    })?;

    if let Some(err) = decoded.error {
        return Err(parse_jsonrpc_error(err));
    }

    Ok(decoded.result.unwrap_or(serde_json::Value::Null))
}

/// Parse a JSON-RPC error value into a structured `RpcError`.
///
/// JSON-RPC 2.0 defines errors as `{"code": <int>, "message": <string>}`.
/// If the error value matches that shape, we produce a `ServerError`;
/// otherwise we fall back to `InvalidResponse` with the raw JSON.
pub(super) fn parse_jsonrpc_error(err: serde_json::Value) -> RpcError {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    match serde_json::from_value::<JsonRpcError>(err.clone()) {
        Ok(parsed) => RpcError::ServerError {
            code: parsed.code,
            message: parsed.message,
        },
        Err(_) => RpcError::InvalidResponse(format!("non-standard JSON-RPC error: {err}")),
    }
}
