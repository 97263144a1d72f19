use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::{
    DEB_ICON_PATH, DEB_ICON_SIZE, ICNS_NAME, ICON_SIZES, ICONSET_DIR, RETINA_MIN_SIZE,
    SNAP_GUI_DIR, SNAP_ICON_NAME, SNAP_ICON_SIZE,
};
use crate::icon::{FontFace, render_icon, save_png};
use crate::shell::CommandRunner;
use crate::types::Platform;

#[derive(Debug, Default)]
pub struct IconReport {
    pub written: Vec<PathBuf>,
    pub icns: Option<PathBuf>,
    pub iconset_removed: bool,
}

pub fn iconset_names(size: u32) -> Vec<String> {
    let mut names = vec![format!("icon_{size}x{size}.png")];
    if size >= RETINA_MIN_SIZE {
        let half = size / 2;
        names.push(format!("icon_{half}x{half}@2x.png"));
    }
    names
}

pub fn iconset_location_notice() -> String {
    format!("PNG icons available in {ICONSET_DIR}/")
}

/// Writes the iconset, the Linux package icons and, on macOS, the `.icns`
/// bundle under `out_dir`.
pub fn generate(
    out_dir: &Path,
    face: &FontFace,
    platform: Platform,
    runner: &mut dyn CommandRunner,
) -> Result<IconReport> {
    let mut report = IconReport::default();
    let iconset = out_dir.join(ICONSET_DIR);
    fs::create_dir_all(&iconset).with_context(|| format!("create {}", iconset.display()))?;

    for size in ICON_SIZES {
        let pixmap = render_icon(size, face)?;
        for name in iconset_names(size) {
            let path = iconset.join(&name);
            save_png(&pixmap, &path)?;
            println!("Created {name}");
            report.written.push(path);
        }
    }

    println!("\n--- Linux Icons ---");
    let deb = out_dir.join(DEB_ICON_PATH);
    save_png(&render_icon(DEB_ICON_SIZE, face)?, &deb)?;
    println!("Created {DEB_ICON_PATH} ({DEB_ICON_SIZE}x{DEB_ICON_SIZE}) for Deb/RPM");
    report.written.push(deb);

    let snap_dir = out_dir.join(SNAP_GUI_DIR);
    fs::create_dir_all(&snap_dir).with_context(|| format!("create {}", snap_dir.display()))?;
    let snap = snap_dir.join(SNAP_ICON_NAME);
    save_png(&render_icon(SNAP_ICON_SIZE, face)?, &snap)?;
    println!(
        "Created {SNAP_GUI_DIR}/{SNAP_ICON_NAME} ({SNAP_ICON_SIZE}x{SNAP_ICON_SIZE}) for Snap"
    );
    report.written.push(snap);

    if platform != Platform::MacOs {
        println!("\nSkipping .icns generation (not on macOS)");
        println!("{}", iconset_location_notice());
        return Ok(report);
    }

    println!("\n--- macOS Icon ---");
    println!("Converting to .icns...");
    let icns = out_dir.join(ICNS_NAME);
    let iconset_arg = iconset.to_string_lossy();
    let icns_arg = icns.to_string_lossy();
    let converted = match runner.run("iconutil", &["-c", "icns", "-o", &icns_arg, &iconset_arg]) {
        Ok(output) if output.success => true,
        Ok(output) => {
            println!("Error creating .icns: {}", output.stderr.trim());
            false
        }
        Err(err) => {
            println!("Error creating .icns: spawn iconutil: {err}");
            false
        }
    };
    if !converted {
        return Ok(report);
    }

    println!("Successfully created {ICNS_NAME}");
    fs::remove_dir_all(&iconset).with_context(|| format!("remove {}", iconset.display()))?;
    println!("Cleaned up {ICONSET_DIR}");
    report.icns = Some(icns);
    report.iconset_removed = true;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::fake::ScriptedRunner;

    #[test]
    fn retina_names_use_half_size() {
        assert_eq!(iconset_names(16), vec!["icon_16x16.png"]);
        assert_eq!(
            iconset_names(1024),
            vec!["icon_1024x1024.png", "icon_512x512@2x.png"]
        );
    }

    #[test]
    fn notice_names_iconset_without_out_dir() {
        assert_eq!(iconset_location_notice(), "PNG icons available in BossTerm.iconset/");
    }

    #[test]
    fn writes_iconset_and_linux_icons_off_macos() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = ScriptedRunner::default();
        let report = generate(dir.path(), &FontFace::Bitmap, Platform::Other, &mut runner).unwrap();

        assert_eq!(report.written.len(), ICON_SIZES.len() * 2 - 1 + 2);
        assert!(report.written.iter().all(|path| path.exists()));
        assert!(dir.path().join("BossTerm.iconset/icon_32x32@2x.png").exists());
        let snap = image::open(dir.path().join("snap/gui/bossterm.png")).unwrap();
        assert_eq!(snap.width(), 512);
        let deb = image::open(dir.path().join("BossTerm.png")).unwrap();
        assert_eq!(deb.width(), 256);
        assert!(runner.calls.is_empty());
        assert!(report.icns.is_none());
    }

    #[test]
    fn converts_and_cleans_up_on_macos() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = ScriptedRunner::default().reply("iconutil", "");
        let report = generate(dir.path(), &FontFace::Bitmap, Platform::MacOs, &mut runner).unwrap();

        assert_eq!(runner.programs(), vec!["iconutil"]);
        let args = &runner.calls[0].1;
        assert_eq!(&args[..2], &["-c", "icns"]);
        assert!(args.last().unwrap().ends_with("BossTerm.iconset"));
        assert!(report.iconset_removed);
        assert!(!dir.path().join("BossTerm.iconset").exists());
        assert!(dir.path().join("BossTerm.png").exists());
    }

    #[test]
    fn keeps_iconset_when_conversion_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = ScriptedRunner::default().fail("iconutil", "Invalid Iconset.");
        let report = generate(dir.path(), &FontFace::Bitmap, Platform::MacOs, &mut runner).unwrap();

        assert!(!report.iconset_removed);
        assert!(report.icns.is_none());
        assert!(dir.path().join("BossTerm.iconset/icon_16x16.png").exists());
    }
}
