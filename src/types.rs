use serde::Deserialize;
use std::path::PathBuf;

use crate::config::{
    BOSSTERM_CAPTURE_PATH, BOSSTERM_NAME, JEDITERM_CAPTURE_PATH, JEDITERM_NAME, PROCESS_MARKERS,
    RESIZE_JPEG_QUALITY, RESIZE_MAX_DIMENSION,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub line: String,
}

/// One entry of the window server's window list.
#[derive(Clone, Debug, Deserialize)]
pub struct WindowRecord {
    #[serde(rename = "kCGWindowOwnerPID")]
    pub owner_pid: u32,
    #[serde(rename = "kCGWindowName", default)]
    pub name: Option<String>,
    #[serde(rename = "kCGWindowNumber")]
    pub id: u64,
}

impl WindowRecord {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeOptions {
    pub max_dimension: u32,
    pub jpeg_quality: u8,
}

#[derive(Clone, Debug)]
pub struct CaptureTarget {
    pub name: &'static str,
    pub process_markers: &'static [&'static str],
    pub title: &'static str,
    pub output: PathBuf,
    pub resize: Option<ResizeOptions>,
}

impl CaptureTarget {
    pub fn bossterm() -> Self {
        Self {
            name: BOSSTERM_NAME,
            process_markers: PROCESS_MARKERS,
            title: BOSSTERM_NAME,
            output: PathBuf::from(BOSSTERM_CAPTURE_PATH),
            resize: Some(ResizeOptions {
                max_dimension: RESIZE_MAX_DIMENSION,
                jpeg_quality: RESIZE_JPEG_QUALITY,
            }),
        }
    }

    pub fn jediterm() -> Self {
        Self {
            name: JEDITERM_NAME,
            process_markers: PROCESS_MARKERS,
            title: JEDITERM_NAME,
            output: PathBuf::from(JEDITERM_CAPTURE_PATH),
            resize: None,
        }
    }
}
