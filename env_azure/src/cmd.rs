use anyhow::{anyhow, Result};
use std::collections::VecDeque;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug)]
pub struct CommandResult {
    pub stdout: String,
}

/// Runs a provider CLI command to completion.
///
/// stdout is kept whole since it carries the JSON payload; only the last
/// `max_error_lines` lines of stderr are kept. A non-zero exit returns the
/// captured stderr as the error message.
pub async fn run_az_command(
    exec: &mut tokio::process::Command,
    max_error_lines: usize,
) -> Result<CommandResult, anyhow::Error> {
    exec.stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped());

    let mut child = exec
        .spawn()
        .map_err(|e| anyhow!("Failed to start {:?}: {}", exec.as_std().get_program(), e))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("Failed to capture stdout"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("Failed to capture stderr"))?;

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    let mut stdout_lines = Vec::new();
    let mut last_stderr_lines = VecDeque::new();

    let mut stdout_done = false;
    let mut stderr_done = false;
    let mut stdout_error = None;

    while !stdout_done || !stderr_done {
        tokio::select! {
            stdout_line = stdout_reader.next_line(), if !stdout_done => {
                match stdout_line {
                    Ok(Some(line)) => stdout_lines.push(line),
                    Ok(None) => stdout_done = true,
                    Err(e) => {
                        stdout_error = Some(e);
                        stdout_done = true;
                    },
                }
            },
            stderr_line = stderr_reader.next_line(), if !stderr_done => {
                match stderr_line {
                    Ok(Some(line)) => {
                        log::debug!("az: {}", line);
                        last_stderr_lines.push_back(line);
                        if last_stderr_lines.len() > max_error_lines {
                            last_stderr_lines.pop_front();
                        }
                    },
                    Ok(None) => stderr_done = true,
                    Err(e) => {
                        log::error!("Error reading stderr: {}", e);
                        stderr_done = true;
                    },
                }
            },
        }
    }

    let exit_status = child.wait().await?;

    let stderr_text = last_stderr_lines
        .iter()
        .fold(String::new(), |acc, line| acc + line.as_str() + "\n");
    let stdout_text = stdout_lines.join("\n");

    // A partial payload would only surface later as a parse failure
    if let Some(e) = stdout_error {
        return Err(anyhow!("Failed to read command output: {}", e));
    }

    if !exit_status.success() {
        log::debug!("Command exited with {}", exit_status);
        let message = stderr_text.trim();
        if message.is_empty() {
            return Err(anyhow!("Command exited with {}", exit_status));
        }
        return Err(anyhow!("{}", message));
    }

    Ok(CommandResult {
        stdout: stdout_text,
    })
}
