use super::{BuiltinOutcome, Command, CommandError, BUILTIN_NAMES};
use crate::core::env::EnvSnapshot;
use crate::process::ProcessExecutor;

#[derive(Clone)]
pub struct WhichCommand {
    executor: ProcessExecutor,
}

impl WhichCommand {
    pub fn new(executor: ProcessExecutor) -> Self {
        Self { executor }
    }
}

impl Command for WhichCommand {
    fn execute(&self, args: &[String], env: &EnvSnapshot) -> Result<BuiltinOutcome, CommandError> {
        let Some(name) = args.first() else {
            return Err(CommandError::Usage("which <command>".to_string()));
        };

        if BUILTIN_NAMES.contains(&name.as_str()) {
            println!("{}: shell built-in command", name);
            return Ok(BuiltinOutcome::Handled);
        }

        // same search as the executor, but nothing is spawned
        match self.executor.resolve(name, env) {
            Ok(path) => println!("{}", path.display()),
            Err(_) => println!("which: {} command not found", name),
        }
        Ok(BuiltinOutcome::Handled)
    }
}
