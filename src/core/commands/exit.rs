use super::{BuiltinOutcome, Command, CommandError};
use crate::core::env::EnvSnapshot;

#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(
        &self,
        _args: &[String],
        _env: &EnvSnapshot,
    ) -> Result<BuiltinOutcome, CommandError> {
        Ok(BuiltinOutcome::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_requests_shutdown() {
        let cmd = ExitCommand::new();
        let outcome = cmd.execute(&[], &EnvSnapshot::empty());
        assert!(matches!(outcome, Ok(BuiltinOutcome::Exit)));
    }
}
