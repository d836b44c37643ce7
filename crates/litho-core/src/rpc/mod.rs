//! JSON-RPC abstraction layer.
//!
//! Defines the [`Transport`] trait and provides an HTTP implementation
//! ([`HttpTransport`]), the [`RetryPolicy`] wrapped around it, the typed
//! method table ([`methods`]), and a test mock (`mock::MockTransport`).

mod http_adapter;
pub mod methods;
#[cfg(test)]
pub mod mock;
pub mod retry;

pub use http_adapter::HttpTransport;
pub use methods::RpcMethod;
pub use retry::RetryPolicy;

use async_trait::async_trait;

use crate::error::RpcError;

/// A single JSON-RPC exchange: one request out, one `result` value back.
///
/// Implementations enforce their own per-call deadline and must not retry;
/// retries are layered on top by [`RetryPolicy`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, RpcError>;
}
