use std::process::ExitCode;

use bossterm_devtools::{capture, logger, shell::SystemRunner, types::CaptureTarget};

fn main() -> ExitCode {
    if let Err(err) = logger::init() {
        eprintln!("capture-bossterm: logger: {err}");
    }
    ExitCode::from(capture::run(&mut SystemRunner, &CaptureTarget::bossterm()))
}
