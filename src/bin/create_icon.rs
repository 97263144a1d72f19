use anyhow::Result;
use std::path::Path;

use bossterm_devtools::{
    bundle::generate, icon::FontFace, logger, shell::SystemRunner, types::Platform,
};

fn main() -> Result<()> {
    if let Err(err) = logger::init() {
        eprintln!("create-icon: logger: {err}");
    }
    let face = FontFace::load();
    if let Some(source) = face.source() {
        log::info!("font: {}", source.display());
    }
    generate(Path::new("."), &face, Platform::current(), &mut SystemRunner)?;
    Ok(())
}
