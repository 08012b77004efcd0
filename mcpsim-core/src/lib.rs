//! Simulated MCP endpoint engine.
//!
//! Reads newline-delimited JSON-RPC 2.0 requests from an input stream,
//! synthesizes protocol-shaped responses for a fixed method surface, and
//! injects randomized latency and randomized failures so a downstream monitor
//! can exercise its rendering of slow, large, and failing calls. Processing is
//! strictly sequential: responses are always emitted in arrival order.

pub mod catalog;
pub mod envelope;
pub mod fault;
pub mod handlers;
pub mod server;

pub use envelope::{
    decode_request, encode_response, DecodeError, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    INTERNAL_ERROR, METHOD_NOT_FOUND, PARSE_ERROR, SIMULATED_ERROR_CODES,
};
pub use fault::{FaultConfig, FaultDecision};
pub use handlers::Method;
pub use server::{ServeError, Simulator};
