/*!
 * Subprocess-backed oracle.
 *
 * Each call spawns the configured command, writes one JSON object to its
 * stdin and reads one JSON object from its stdout:
 *
 * ```text
 * -> {"task": "translate", "source_text": ..., "domain": ..., "term_mapping": {...}, ...}
 * -> {"task": "review", "source_text": ..., "translation": ..., ...}
 * <- {"success": true, "translation": "..."}
 * <- {"success": false, "error": "..."}
 * ```
 */

use async_trait::async_trait;
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::{OracleRequest, OracleResponse, ReviewRequest, TranslationOracle};
use crate::errors::OracleError;

/// Payload written to the oracle process
#[derive(Debug, Serialize)]
#[serde(tag = "task", rename_all = "snake_case")]
enum OracleCall<'a> {
    Translate(&'a OracleRequest),
    Review(&'a ReviewRequest),
}

/// Answer read back from the oracle process
#[derive(Debug, Deserialize)]
struct OracleReply {
    success: bool,
    #[serde(default)]
    translation: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Oracle that runs an external command per request
#[derive(Debug, Clone)]
pub struct CommandOracle {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandOracle {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    /// Build from a whitespace-separated command line such as `python3 oracle.py`
    pub fn from_command_line(command_line: &str) -> Result<Self, OracleError> {
        let mut parts = command_line.split_whitespace().map(String::from);
        let program = parts
            .next()
            .ok_or_else(|| OracleError::Unavailable("empty oracle command".to_string()))?;
        Ok(Self::new(program, parts.collect()))
    }

    /// Kill the process if it has not answered within `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn call(&self, call: OracleCall<'_>) -> Result<OracleResponse, OracleError> {
        let payload = serde_json::to_vec(&call)
            .map_err(|e| OracleError::RequestFailed(format!("cannot encode request: {}", e)))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                OracleError::Unavailable(format!("failed to start '{}': {}", self.program, e))
            })?;

        // Request and reply move concurrently so neither pipe can stall the other
        let stdin = child.stdin.take();
        let exchange = async move {
            let write = async move {
                match stdin {
                    Some(mut stdin) => stdin.write_all(&payload).await,
                    None => Ok(()),
                }
            };
            tokio::join!(write, child.wait_with_output())
        };

        let (written, output) = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, exchange).await.map_err(|_| {
                OracleError::Unavailable(format!(
                    "'{}' timed out after {}s",
                    self.program,
                    timeout.as_secs()
                ))
            })?,
            None => exchange.await,
        };

        let output = output
            .map_err(|e| OracleError::RequestFailed(format!("failed to read oracle output: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("Oracle process exited with {}: {}", output.status, stderr.trim());
            return Err(OracleError::RequestFailed(format!(
                "oracle exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        // A process may answer without consuming the whole request
        if let Err(e) = written {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(OracleError::RequestFailed(format!("failed to write request: {}", e)));
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("Oracle replied with {} bytes", stdout.len());
        parse_reply(&stdout)
    }
}

/// Decode one reply object into a response or a structured failure
fn parse_reply(raw: &str) -> Result<OracleResponse, OracleError> {
    let reply: OracleReply = serde_json::from_str(raw.trim())
        .map_err(|e| OracleError::ParseError(format!("{}: {}", e, raw.trim())))?;

    if !reply.success {
        return Err(OracleError::RequestFailed(
            reply.error.unwrap_or_else(|| "unspecified oracle error".to_string()),
        ));
    }

    OracleResponse::from_text(reply.translation.as_deref().unwrap_or_default())
}

#[async_trait]
impl TranslationOracle for CommandOracle {
    async fn translate(&self, request: &OracleRequest) -> Result<OracleResponse, OracleError> {
        self.call(OracleCall::Translate(request)).await
    }

    async fn review(&self, request: &ReviewRequest) -> Result<OracleResponse, OracleError> {
        self.call(OracleCall::Review(request)).await
    }
}
