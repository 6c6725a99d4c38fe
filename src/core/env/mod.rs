mod vars;

pub use vars::EnvSnapshot;

#[derive(Debug)]
pub enum EnvError {
    VarNotFound(String),
    InvalidValue(&'static str),
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::VarNotFound(var) => write!(f, "Variable {} not found in environment", var),
            EnvError::InvalidValue(val) => write!(f, "Invalid value: {}", val),
        }
    }
}

impl std::error::Error for EnvError {}
