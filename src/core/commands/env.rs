use super::{BuiltinOutcome, Command, CommandError};
use crate::core::env::EnvSnapshot;

#[derive(Clone)]
pub struct EnvCommand;

impl Default for EnvCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for EnvCommand {
    fn execute(&self, _args: &[String], env: &EnvSnapshot) -> Result<BuiltinOutcome, CommandError> {
        for line in env.enumerate() {
            println!("{}", line);
        }
        Ok(BuiltinOutcome::Handled)
    }
}
