use super::{BuiltinOutcome, Command, CommandError};
use crate::core::env::EnvSnapshot;
use crate::path;
use std::env;

#[derive(Clone)]
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    /// Bare `cd` climbs ancestor directories until the working directory
    /// stops changing (the root, or the highest level we may enter).
    fn climb(&self) -> Result<(), CommandError> {
        let mut prev = env::current_dir()?;
        loop {
            if env::set_current_dir("..").is_err() {
                break;
            }
            let cwd = env::current_dir()?;
            if cwd == prev {
                break;
            }
            prev = cwd;
        }
        Ok(())
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], _env: &EnvSnapshot) -> Result<BuiltinOutcome, CommandError> {
        match args.first() {
            None => self.climb()?,
            Some(target) => {
                let expanded = path::expand(target)
                    .map_err(|e| CommandError::ExecutionError(e.to_string()))?;
                env::set_current_dir(&expanded).map_err(|e| {
                    CommandError::ExecutionError(format!("cd: {}: {}", target, e))
                })?;
            }
        }
        Ok(BuiltinOutcome::Handled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    // one test so the process-wide working directory is mutated from a
    // single thread only
    #[test]
    fn test_cd_paths_and_climb() {
        let cmd = CdCommand::new();
        let env = EnvSnapshot::empty();
        let original = env::current_dir().unwrap();

        let temp = env::temp_dir();
        assert!(cmd
            .execute(&[temp.to_string_lossy().to_string()], &env)
            .is_ok());
        assert_eq!(
            env::current_dir().unwrap().canonicalize().unwrap(),
            temp.canonicalize().unwrap()
        );

        let result = cmd.execute(&["/path/that/does/not/exist".to_string()], &env);
        assert!(matches!(result, Err(CommandError::ExecutionError(_))));

        assert!(cmd.execute(&[], &env).is_ok());
        let after_climb = env::current_dir().unwrap();
        // climbing again is a no-op once the top is reached
        assert!(cmd.execute(&[], &env).is_ok());
        assert_eq!(env::current_dir().unwrap(), after_climb);

        env::set_current_dir(original).unwrap();
    }
}
