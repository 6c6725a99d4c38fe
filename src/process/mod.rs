use std::fmt;

pub mod executor;
pub mod runner;
pub mod signal;

pub use executor::{ExitOutcome, ProcessExecutor};
pub use runner::{SourceKind, SourceRunner};

#[derive(Debug)]
pub enum ProcessError {
    CommandNotFound(String),
    SpawnFailed(String),
    BuildFailed(String),
    SignalError(String),
    Io(std::io::Error),
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Io(e)
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::CommandNotFound(cmd) => write!(f, "command not found: {}", cmd),
            ProcessError::SpawnFailed(msg) => write!(f, "failed to spawn: {}", msg),
            ProcessError::BuildFailed(msg) => write!(f, "run: {}", msg),
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
            ProcessError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ProcessError {}
