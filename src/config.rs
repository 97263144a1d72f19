pub const BOSSTERM_NAME: &str = "BossTerm";
pub const JEDITERM_NAME: &str = "JediTerm";

/// Every marker must appear on the same `ps aux` line for the process to match.
pub const PROCESS_MARKERS: &[&str] = &["MainKt", "java"];

pub const BOSSTERM_CAPTURE_PATH: &str = "/tmp/bossterm_window.png";
pub const JEDITERM_CAPTURE_PATH: &str = "/tmp/jediterm_window.png";

pub const RESIZE_MAX_DIMENSION: u32 = 600;
pub const RESIZE_JPEG_QUALITY: u8 = 40;

pub const ICON_SIZES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];
/// Sizes at or above this also get an `@2x` entry named after half the size.
pub const RETINA_MIN_SIZE: u32 = 32;

pub const BACKGROUND_RGB: [u8; 3] = [0, 0, 0];
pub const GLYPH_RGB: [u8; 3] = [0, 255, 0];
pub const CURSOR_RGB: [u8; 3] = [180, 180, 180];
pub const CURSOR_GLYPH_RGB: [u8; 3] = [0, 0, 0];

pub const FONT_SIZE_RATIO: f32 = 0.35;
pub const INSET_RATIO: f32 = 0.04;
pub const CURSOR_PADDING_RATIO: f32 = 0.05;
pub const CURSOR_WIDTH_RATIO: f32 = 0.20;

pub const ICONSET_DIR: &str = "BossTerm.iconset";
pub const DEB_ICON_PATH: &str = "BossTerm.png";
pub const DEB_ICON_SIZE: u32 = 256;
pub const SNAP_GUI_DIR: &str = "snap/gui";
pub const SNAP_ICON_NAME: &str = "bossterm.png";
pub const SNAP_ICON_SIZE: u32 = 512;
pub const ICNS_NAME: &str = "BossTerm.icns";

/// Project-local fonts, resolved against the crate root.
pub const LOCAL_FONT_CANDIDATES: &[&str] = &["fonts/Roboto-Regular.ttf", "Roboto-Regular.ttf"];

pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/Library/Fonts/Roboto-Regular.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/SFNSText.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/ubuntu/Ubuntu-R.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/google-noto/NotoSans-Regular.ttf",
    "C:/Windows/Fonts/arial.ttf",
];

pub const LOG_ENV_VAR: &str = "BOSSTERM_DEVTOOLS_LOG";

pub const fn scaled(size: u32, ratio: f32) -> u32 {
    (size as f32 * ratio) as u32
}
