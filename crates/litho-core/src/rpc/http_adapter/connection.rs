use std::num::NonZeroU32;

use reqwest::Url;

use crate::error::LithoError;

pub(super) fn parse_connection(connection: &str) -> Result<Url, LithoError> {
    let parsed = Url::parse(connection).map_err(|e| {
        LithoError::invalid_parameter(format!(
            "invalid RPC URL `{connection}`: expected HTTP(S) URL ({e})"
        ))
        .with_source(e)
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(LithoError::invalid_parameter(format!(
            "unsupported RPC URL scheme `{other}`; expected http or https"
        ))),
    }
}

pub(super) fn parse_rate_limit(requests_per_second: Option<u32>) -> Result<Option<NonZeroU32>, LithoError> {
    match requests_per_second {
        None => Ok(None),
        Some(limit) => NonZeroU32::new(limit).map(Some).ok_or_else(|| {
            LithoError::invalid_parameter("requests_per_second must be at least 1")
        }),
    }
}
