use super::{BuiltinOutcome, Command, CommandError};
use crate::core::env::EnvSnapshot;
use crate::process::{ProcessExecutor, SourceRunner};

#[derive(Clone)]
pub struct RunCommand {
    executor: ProcessExecutor,
}

impl RunCommand {
    pub fn new(executor: ProcessExecutor) -> Self {
        Self { executor }
    }
}

impl Command for RunCommand {
    fn execute(&self, args: &[String], env: &EnvSnapshot) -> Result<BuiltinOutcome, CommandError> {
        let Some(file) = args.first() else {
            return Err(CommandError::Usage("run <file> [args...]".to_string()));
        };

        SourceRunner::new(&self.executor).run(file, &args[1..], env)?;
        Ok(BuiltinOutcome::Handled)
    }
}
