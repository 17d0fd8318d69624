// ABOUTME: CommandTarget - runs a subprocess with the inputs as JSON on stdin.
// ABOUTME: Parses stdout as JSON; the child is killed if the invocation is dropped.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::TargetError;
use crate::tool::ExecutionTarget;

/// Execution target that runs an external program.
///
/// The invocation inputs are written to the child's stdin as a JSON
/// object. A zero exit status with JSON on stdout is success; empty stdout
/// counts as "no response".
#[derive(Debug, Clone)]
pub struct CommandTarget {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    env: HashMap<String, String>,
}

impl CommandTarget {
    /// Create a target for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            env: HashMap::new(),
        }
    }

    /// Run `script` through the platform shell.
    /// Uses `bash -c` on Unix and `cmd.exe /C` on Windows.
    pub fn shell(script: impl Into<String>) -> Self {
        if cfg!(target_os = "windows") {
            Self::new("cmd.exe").arg("/C").arg(script)
        } else {
            Self::new("bash").arg("-c").arg(script)
        }
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set the working directory.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Set an environment variable for the child.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

#[async_trait]
impl ExecutionTarget for CommandTarget {
    async fn run(&self, inputs: serde_json::Value) -> Result<serde_json::Value, TargetError> {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args)
            .envs(&self.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        // Own process group, so pipelines and subshells can be killed together.
        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = cmd.spawn().map_err(|e| {
            let context = format!("failed to spawn '{}'", self.program);
            TargetError::Failed(anyhow::Error::new(e).context(context))
        })?;
        let mut group = GroupGuard::new(child.id());

        let payload = serde_json::to_vec(&inputs)?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| TargetError::failed("child stdin unavailable"))?;
        let write = async move {
            stdin.write_all(&payload).await?;
            stdin.shutdown().await?;
            Ok::<_, std::io::Error>(())
        };

        let (written, output) = tokio::join!(write, child.wait_with_output());
        group.disarm();
        let output = output.map_err(|e| TargetError::Failed(e.into()))?;
        if let Err(e) = written {
            // The child may exit without reading its input.
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(TargetError::Failed(e.into()));
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(TargetError::failed(format!(
                "command exited with code {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        let stdout = stdout.trim();
        if stdout.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(stdout)
            .map_err(|e| TargetError::Malformed(format!("stdout is not valid JSON: {}", e)))
    }
}

/// Kills the child's process group when dropped before the child is reaped.
///
/// An unreaped child keeps its pid, so the group id cannot have been reused.
struct GroupGuard {
    pgid: Option<u32>,
}

impl GroupGuard {
    fn new(pgid: Option<u32>) -> Self {
        Self { pgid }
    }

    fn disarm(&mut self) {
        self.pgid = None;
    }
}

impl Drop for GroupGuard {
    fn drop(&mut self) {
        #[cfg(unix)]
        if let Some(pgid) = self.pgid.and_then(|id| libc::pid_t::try_from(id).ok()) {
            tracing::debug!(pgid, "killing abandoned command process group");
            // SAFETY: killpg has no memory-safety preconditions.
            unsafe {
                libc::killpg(pgid, libc::SIGKILL);
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cat_echoes_inputs() {
        let target = CommandTarget::new("cat");
        let output = target.run(serde_json::json!({"x": 1})).await.unwrap();
        assert_eq!(output, serde_json::json!({"x": 1}));
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let target = CommandTarget::shell("echo nope >&2; exit 3");
        let err = target.run(serde_json::json!({})).await.unwrap_err();
        match err {
            TargetError::Failed(e) => {
                let msg = e.to_string();
                assert!(msg.contains("code 3"));
                assert!(msg.contains("nope"));
            }
            other => panic!("Expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_stdout_is_malformed() {
        let target = CommandTarget::shell("echo 'not json'");
        let err = target.run(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, TargetError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_empty_stdout_is_null() {
        let target = CommandTarget::shell("true");
        let output = target.run(serde_json::json!({})).await.unwrap();
        assert!(output.is_null());
    }

    #[tokio::test]
    async fn test_missing_program_is_failure() {
        let target = CommandTarget::new("definitely-not-a-real-program-xyz");
        let err = target.run(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, TargetError::Failed(_)));
    }

    #[tokio::test]
    async fn test_dropped_run_kills_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("marker");
        let target = CommandTarget::shell("sh -c 'sleep 0.5; touch marker' | cat")
            .working_dir(dir.path());

        let run = target.run(serde_json::json!({}));
        let outcome = tokio::time::timeout(std::time::Duration::from_millis(100), run).await;
        assert!(outcome.is_err());

        tokio::time::sleep(std::time::Duration::from_millis(1000)).await;
        assert!(!marker.exists(), "pipeline kept running after the run was dropped");
    }

    #[tokio::test]
    async fn test_completed_run_is_not_killed() {
        let target = CommandTarget::shell("sleep 0.1; echo '{\"done\": true}'");
        let output = target.run(serde_json::json!({})).await.unwrap();
        assert_eq!(output, serde_json::json!({"done": true}));
    }

    #[tokio::test]
    async fn test_working_dir_and_env() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.json"), r#"{"from": "file"}"#).unwrap();

        let target = CommandTarget::shell(r#"cat data.json | sed "s/file/$SOURCE/""#)
            .working_dir(dir.path())
            .env("SOURCE", "env");
        let output = target.run(serde_json::json!({})).await.unwrap();
        assert_eq!(output, serde_json::json!({"from": "env"}));
    }
}
