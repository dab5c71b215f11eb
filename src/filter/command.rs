//! Subprocess filter - runs an external program as a filter

use crate::filter::{Filter, FilterError};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Filter implemented by an executable file
///
/// The program is spawned without arguments. The composed params are written
/// to its stdin as a JSON array, and its stdout becomes the filter's result:
/// parsed as JSON when possible, otherwise taken as a trimmed string. Empty
/// output is `null`.
#[derive(Debug, Clone)]
pub struct CommandFilter {
    /// Path to the filter program
    program: PathBuf,
}

impl CommandFilter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Turn raw program output into a result value
    fn decode_output(stdout: &str) -> Value {
        let trimmed = stdout.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }
        serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string()))
    }
}

#[async_trait]
impl Filter for CommandFilter {
    async fn apply(&self, params: Vec<Value>) -> Result<Value, FilterError> {
        let input = serde_json::to_vec(&params)?;
        debug!(
            "Spawning filter {} with {} params",
            self.program.display(),
            params.len()
        );

        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| FilterError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        // Feed stdin while stdout and stderr drain, or a streaming program
        // blocks on a full pipe
        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                // A filter may exit without reading its input
                if let Err(e) = stdin.write_all(&input).await {
                    if e.kind() != std::io::ErrorKind::BrokenPipe {
                        return Err(e);
                    }
                }
            }
            Ok::<(), std::io::Error>(())
        };

        let (written, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;
        written?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            warn!(
                "Filter {} exited with code {}: {}",
                self.program.display(),
                code,
                stderr
            );
            return Err(FilterError::Exited { code, stderr });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(
            "Filter {} returned {} bytes of output",
            self.program.display(),
            stdout.len()
        );

        Ok(Self::decode_output(&stdout))
    }
}
