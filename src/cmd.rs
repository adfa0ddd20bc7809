use std::io::Write;
use std::process::{Command, Output, Stdio};

use crate::error::{ProvisionError, ProvisionResult};

/// Run `program` and return its trimmed stdout. A non-zero exit
/// is [`ProvisionError::CommandFailed`]; its stderr is shown to
/// the operator.
pub fn run(program: &str, args: &[&str]) -> ProvisionResult<String> {
    execute(program, args, None)
}

/// Like [`run`], with `input` fed to the child's stdin.
///
/// Request bodies go to `curl` this way so they never show up
/// in the process list.
pub fn run_with_stdin(program: &str, args: &[&str], input: &[u8]) -> ProvisionResult<String> {
    execute(program, args, Some(input))
}

/// Run a shell command line through `sh -c`.
pub fn run_shell(command_line: &str) -> ProvisionResult<String> {
    run("sh", &["-c", command_line])
}

fn execute(program: &str, args: &[&str], input: Option<&[u8]>) -> ProvisionResult<String> {
    let command = format_command(program, args);
    let output = spawn(program, args, input)?;
    tracing::debug!(%command, status = %output.status, "command finished");

    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        eprintln!("{program}: {stderr}");
    }
    Err(ProvisionError::CommandFailed {
        command,
        status: output.status,
    })
}

fn spawn(program: &str, args: &[&str], input: Option<&[u8]>) -> ProvisionResult<Output> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| not_found_or_io(program, e))?;

    // Dropping the handle closes the pipe so the child sees EOF.
    if let (Some(mut stdin), Some(bytes)) = (child.stdin.take(), input) {
        stdin.write_all(bytes)?;
    }

    Ok(child.wait_with_output()?)
}

fn not_found_or_io(program: &str, e: std::io::Error) -> ProvisionError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ProvisionError::CommandNotFound(program.to_string())
    } else {
        ProvisionError::Io(e)
    }
}

fn format_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_joins_args() {
        assert_eq!(format_command("nginx", &["-s", "reload"]), "nginx -s reload");
        assert_eq!(format_command("nginx", &[]), "nginx");
    }

    #[test]
    fn missing_program_is_not_found() {
        let err = run("addsite-no-such-program", &[]).unwrap_err();
        assert!(
            matches!(err, ProvisionError::CommandNotFound(p) if p == "addsite-no-such-program")
        );
    }

    #[test]
    fn missing_program_with_stdin_is_not_found() {
        let err = run_with_stdin("addsite-no-such-program", &[], b"{}").unwrap_err();
        assert!(matches!(err, ProvisionError::CommandNotFound(_)));
    }

    #[test]
    fn shell_captures_stdout() {
        let out = run_shell("echo reloaded").expect("sh available");
        assert_eq!(out, "reloaded");
    }

    #[test]
    fn shell_failure_is_command_failed() {
        let err = run_shell("echo broken >&2; exit 3").unwrap_err();
        match err {
            ProvisionError::CommandFailed { command, status } => {
                assert_eq!(command, "sh -c echo broken >&2; exit 3");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn stdin_is_forwarded() {
        let out = run_with_stdin("cat", &[], b"{\"id\":1}").expect("cat available");
        assert_eq!(out, "{\"id\":1}");
    }

    #[test]
    fn no_stdin_means_eof() {
        let out = run("cat", &[]).expect("cat available");
        assert_eq!(out, "");
    }
}
