use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::RpcError;

use super::Transport;

/// A scripted JSON-RPC transport for testing.
///
/// Per method, queued one-shot results are returned first (in order); once a
/// method's queue is empty its sticky response, if any, is returned on every
/// call. Unscripted methods fail with a JSON-RPC "method not found" error.
/// Every call is recorded.
pub struct MockTransport {
    queued: Mutex<HashMap<String, VecDeque<Result<serde_json::Value, RpcError>>>>,
    sticky: HashMap<String, serde_json::Value>,
    calls: Mutex<Vec<(String, Vec<serde_json::Value>)>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            queued: HashMap::new(),
            sticky: HashMap::new(),
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<serde_json::Value>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == method)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

pub struct MockTransportBuilder {
    queued: HashMap<String, VecDeque<Result<serde_json::Value, RpcError>>>,
    sticky: HashMap<String, serde_json::Value>,
}

impl MockTransportBuilder {
    /// Return `result` for every call to `method` once its queue is drained.
    pub fn respond(mut self, method: &str, result: serde_json::Value) -> Self {
        self.sticky.insert(method.to_owned(), result);
        self
    }

    /// Queue a one-shot result for the next unanswered call to `method`.
    pub fn enqueue(mut self, method: &str, result: Result<serde_json::Value, RpcError>) -> Self {
        self.queued
            .entry(method.to_owned())
            .or_default()
            .push_back(result);
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            queued: Mutex::new(self.queued),
            sticky: self.sticky,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, RpcError> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_owned(), params));

        let next = self
            .queued
            .lock()
            .unwrap()
            .get_mut(method)
            .and_then(VecDeque::pop_front);
        if let Some(result) = next {
            return result;
        }

        self.sticky
            .get(method)
            .cloned()
            .ok_or_else(|| RpcError::ServerError {
                code: -32601,
                message: format!("the method {method} does not exist/is not available"),
            })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn queued_results_precede_sticky_response() {
        let rpc = MockTransport::builder()
            .respond("eth_blockNumber", json!("0x2"))
            .enqueue("eth_blockNumber", Ok(json!("0x1")))
            .build();

        assert_eq!(rpc.call("eth_blockNumber", vec![]).await.unwrap(), json!("0x1"));
        assert_eq!(rpc.call("eth_blockNumber", vec![]).await.unwrap(), json!("0x2"));
        assert_eq!(rpc.call("eth_blockNumber", vec![]).await.unwrap(), json!("0x2"));
        assert_eq!(rpc.call_count("eth_blockNumber"), 3);
    }

    #[tokio::test]
    async fn unscripted_method_fails_and_is_recorded() {
        let rpc = MockTransport::builder().build();
        let err = rpc
            .call("eth_chainId", vec![json!(1)])
            .await
            .expect_err("unscripted");
        assert!(matches!(err, RpcError::ServerError { code: -32601, .. }));
        assert_eq!(rpc.calls(), vec![("eth_chainId".to_owned(), vec![json!(1)])]);
    }
}
