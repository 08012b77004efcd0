use std::fmt;
use std::io;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value as JsonValue;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::envelope::{
    decode_request, encode_response, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    SIMULATED_ERROR_CODES,
};
use crate::fault::FaultConfig;
use crate::handlers::{dispatch, Method};

/// Failure outside the per-request scope; nothing is retried at this level.
#[derive(Debug)]
pub enum ServeError {
    Read(io::Error),
    Write(io::Error),
    Encode(serde_json::Error),
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(error) => write!(f, "failed to read request stream: {error}"),
            Self::Write(error) => write!(f, "failed to write response stream: {error}"),
            Self::Encode(error) => write!(f, "failed to encode response: {error}"),
        }
    }
}

/// Sequential request/response engine over line-oriented streams.
///
/// One request is fully received, delayed, dispatched, and emitted before the
/// next line is read, so response order always equals arrival order.
pub struct Simulator<R> {
    config: FaultConfig,
    rng: R,
    request_count: u64,
}

impl Simulator<StdRng> {
    /// Creates a simulator drawing from an entropy-seeded generator.
    pub fn new(config: FaultConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> Simulator<R> {
    /// Creates a simulator with an explicit randomness source.
    pub fn with_rng(config: FaultConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            request_count: 0,
        }
    }

    /// Number of non-blank lines consumed so far, decodable or not.
    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    /// Runs the dispatch loop until end-of-stream.
    ///
    /// Every non-blank input line produces exactly one flushed output line;
    /// only stream-level failures terminate the loop early.
    pub async fn serve<I, O>(&mut self, mut input: I, mut output: O) -> Result<(), ServeError>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin,
    {
        log::info!(
            "simulator ready: delay {:.2}-{:.2}s, error rate {:.0}%",
            self.config.delay_min.as_secs_f64(),
            self.config.delay_max.as_secs_f64(),
            self.config.error_rate * 100.0
        );
        let mut line = String::new();
        loop {
            line.clear();
            let read = input.read_line(&mut line).await.map_err(ServeError::Read)?;
            if read == 0 {
                log::info!("end of input, shutting down");
                return Ok(());
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.request_count += 1;
            let response = self.process_line(trimmed).await;
            let payload = encode_response(&response).map_err(ServeError::Encode)?;
            output
                .write_all(payload.as_bytes())
                .await
                .map_err(ServeError::Write)?;
            output.write_all(b"\n").await.map_err(ServeError::Write)?;
            output.flush().await.map_err(ServeError::Write)?;
            log::info!("sent response #{}", self.request_count);
        }
    }

    /// Turns one non-blank line into a response, never panicking outward.
    async fn process_line(&mut self, line: &str) -> JsonRpcResponse {
        let request = match decode_request(line) {
            Ok(request) => request,
            Err(error) => {
                log::warn!(
                    "request #{}: undecodable line: {}",
                    self.request_count,
                    error.message
                );
                return JsonRpcResponse::failure(error.id, JsonRpcError::parse_error(&error.message));
            }
        };
        log::info!(
            "request #{}: {} (id: {})",
            self.request_count,
            request.method,
            request.id
        );
        run_guarded(&request, self.respond(&request)).await
    }

    /// Fault check, routing, and handling for a decoded request.
    async fn respond(&mut self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let decision = self.config.sample(&mut self.rng);
        log::info!(
            "processing {} for {:.2}s",
            request.method,
            decision.delay.as_secs_f64()
        );
        tokio::time::sleep(decision.delay).await;
        if decision.inject_error {
            let code = SIMULATED_ERROR_CODES[self.rng.gen_range(0..SIMULATED_ERROR_CODES.len())];
            return JsonRpcResponse::failure(
                request.id.clone(),
                JsonRpcError::simulated(code, &request.method),
            );
        }
        match Method::from_name(&request.method) {
            Some(method) => {
                let params = request.params.clone().unwrap_or(JsonValue::Null);
                JsonRpcResponse::success(
                    request.id.clone(),
                    dispatch(method, &params, &mut self.rng),
                )
            }
            None => JsonRpcResponse::failure(
                request.id.clone(),
                JsonRpcError::method_not_found(&request.method),
            ),
        }
    }
}

/// Converts a handler panic into an internal-error response so the loop can
/// continue to the next line.
async fn run_guarded<F>(request: &JsonRpcRequest, handler: F) -> JsonRpcResponse
where
    F: std::future::Future<Output = JsonRpcResponse>,
{
    match AssertUnwindSafe(handler).catch_unwind().await {
        Ok(response) => response,
        Err(_) => {
            log::error!("handler panicked for {}", request.method);
            JsonRpcResponse::failure(
                request.id.clone(),
                JsonRpcError::internal(&request.method, "handler panicked"),
            )
        }
    }
}
