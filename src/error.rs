use crate::core::commands::CommandError;
use crate::core::env::EnvError;
use crate::process::ProcessError;

#[derive(Debug)]
pub enum ShellError {
    Io(std::io::Error),
    HomeDirNotFound,
    FlagError(String),
    Process(ProcessError),
    Env(EnvError),
    Command(CommandError),
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<ProcessError> for ShellError {
    fn from(err: ProcessError) -> Self {
        ShellError::Process(err)
    }
}

impl From<EnvError> for ShellError {
    fn from(err: EnvError) -> Self {
        ShellError::Env(err)
    }
}

impl From<CommandError> for ShellError {
    fn from(err: CommandError) -> Self {
        ShellError::Command(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Io(e) => write!(f, "IO error: {}", e),
            ShellError::HomeDirNotFound => write!(f, "Home directory not found"),
            ShellError::FlagError(msg) => write!(f, "Flag error: {}", msg),
            ShellError::Process(e) => write!(f, "Process error: {}", e),
            ShellError::Env(e) => write!(f, "Environment error: {}", e),
            ShellError::Command(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ShellError {}
