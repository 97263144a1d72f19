use std::io;
use std::process::Command;

use crate::error::{CaptureError, Result};

#[derive(Clone, Debug, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub status: String,
    pub stdout: String,
    pub stderr: String,
}

/// Seam between the tools and the OS utilities they drive.
pub trait CommandRunner {
    fn run(&mut self, program: &str, args: &[&str]) -> io::Result<CommandOutput>;
}

#[derive(Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        log::debug!("run {program} {}", args.join(" "));
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            status: output.status.to_string(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Runs `program` and turns a spawn error or non-zero exit into a
/// [`CaptureError`].
pub fn checked(
    runner: &mut dyn CommandRunner,
    program: &str,
    args: &[&str],
) -> Result<CommandOutput> {
    let output = runner.run(program, args).map_err(|source| CaptureError::Spawn {
        program: program.to_string(),
        source,
    })?;
    if !output.success {
        return Err(CaptureError::CommandFailed {
            program: program.to_string(),
            status: output.status,
            stderr: output.stderr.trim().to_string(),
        });
    }
    Ok(output)
}
