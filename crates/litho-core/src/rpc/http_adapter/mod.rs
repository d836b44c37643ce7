//! JSON-RPC 2.0 client over HTTP(S).
//!
//! Implements [`Transport`](super::Transport) using `reqwest`, with a hard
//! per-call deadline and optional request rate limiting.

mod client;
mod connection;
mod protocol;

pub use client::HttpTransport;
