use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("{name} Java process not found")]
    ProcessNotFound { name: String },
    #[error("Failed to get window list")]
    WindowListUnavailable,
    #[error("No window found for PID {pid}")]
    WindowNotFound { pid: u32 },
    #[error("could not parse window list: {0}")]
    WindowListParse(#[from] serde_json::Error),
    #[error("{program} failed ({status}): {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl CaptureError {
    /// Lookup failures mean the target is not running or has no matching
    /// window; everything else is an external command failing.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            CaptureError::ProcessNotFound { .. }
                | CaptureError::WindowListUnavailable
                | CaptureError::WindowNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CaptureError>;
