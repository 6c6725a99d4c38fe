use super::{BuiltinOutcome, Command, CommandError};
use crate::core::env::EnvSnapshot;
use std::env;

#[derive(Clone)]
pub struct PwdCommand;

impl Default for PwdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PwdCommand {
    fn execute(
        &self,
        _args: &[String],
        _env: &EnvSnapshot,
    ) -> Result<BuiltinOutcome, CommandError> {
        let cwd = env::current_dir()?;
        println!("{}", cwd.display());
        Ok(BuiltinOutcome::Handled)
    }
}
