use std::fs;

use crate::error::Result;
use crate::finder::find_window_id;
use crate::shell::{CommandRunner, checked};
use crate::types::{CaptureTarget, ResizeOptions};

pub fn capture_window(
    runner: &mut dyn CommandRunner,
    window_id: u64,
    target: &CaptureTarget,
) -> Result<()> {
    let id = window_id.to_string();
    let output = target.output.to_string_lossy();
    // -o drops the window shadow
    checked(runner, "screencapture", &["-l", &id, "-o", &output])?;
    println!("✓ Screenshot captured");

    if let Some(resize) = target.resize {
        shrink(runner, &output, resize)?;
        println!(
            "✓ Resized to low resolution (max {}px) and compressed as JPEG",
            resize.max_dimension
        );
    }

    println!("✓ Screenshot saved: {output}");
    match fs::metadata(&target.output) {
        Ok(meta) => println!("  {output}: {}", human_size(meta.len())),
        Err(err) => log::debug!("stat {output}: {err}"),
    }
    Ok(())
}

/// Size rendered the way `ls -lh` shows it.
pub fn human_size(len: u64) -> String {
    const KIB: f64 = 1024.0;
    let bytes = len as f64;
    if bytes < KIB {
        format!("{len}B")
    } else if bytes < KIB * KIB {
        format!("{:.1}K", bytes / KIB)
    } else {
        format!("{:.1}M", bytes / (KIB * KIB))
    }
}

fn shrink(runner: &mut dyn CommandRunner, path: &str, resize: ResizeOptions) -> Result<()> {
    let max = resize.max_dimension.to_string();
    let quality = resize.jpeg_quality.to_string();
    checked(
        runner,
        "sips",
        &[
            "-Z", &max, "-s", "format", "jpeg", "-s", "formatOptions", &quality, path, "--out",
            path,
        ],
    )?;
    Ok(())
}

/// Finds and captures the target window, returning the process exit code.
pub fn run(runner: &mut dyn CommandRunner, target: &CaptureTarget) -> u8 {
    println!("Capturing {} window only (no background apps)...", target.name);
    println!();

    let window_id = match find_window_id(runner, target) {
        Ok(id) => id,
        Err(err) => {
            println!("❌ {err}");
            return 1;
        }
    };
    println!();

    match capture_window(runner, window_id, target) {
        Ok(()) => 0,
        Err(err) => {
            println!("❌ Failed to capture window: {err}");
            1
        }
    }
}
