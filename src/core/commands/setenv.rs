use super::{BuiltinOutcome, Command, CommandError};
use crate::core::env::EnvSnapshot;

#[derive(Clone)]
pub struct SetenvCommand;

impl Default for SetenvCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl SetenvCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for SetenvCommand {
    fn execute(&self, args: &[String], env: &EnvSnapshot) -> Result<BuiltinOutcome, CommandError> {
        let (name, value) = match args {
            [assignment] => match assignment.split_once('=') {
                Some(pair) => pair,
                None => return Err(usage()),
            },
            [name, value] => (name.as_str(), value.as_str()),
            _ => return Err(usage()),
        };

        if name.is_empty() {
            return Err(usage());
        }

        Ok(BuiltinOutcome::Env(env.set(name, value)))
    }
}

fn usage() -> CommandError {
    CommandError::Usage("setenv NAME=value | setenv NAME value".to_string())
}

#[derive(Clone)]
pub struct UnsetenvCommand;

impl Default for UnsetenvCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl UnsetenvCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for UnsetenvCommand {
    fn execute(&self, args: &[String], env: &EnvSnapshot) -> Result<BuiltinOutcome, CommandError> {
        let [name] = args else {
            return Err(CommandError::Usage("unsetenv <variable>".to_string()));
        };

        let next = env.unset(name)?;
        Ok(BuiltinOutcome::Env(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::EnvError;

    #[test]
    fn test_setenv_assignment_form() {
        let cmd = SetenvCommand::new();
        let env = EnvSnapshot::empty();
        let outcome = cmd.execute(&["X=1".to_string()], &env);
        match outcome {
            Ok(BuiltinOutcome::Env(next)) => assert_eq!(next.lookup("X"), Some("1")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_setenv_pair_form() {
        let cmd = SetenvCommand::new();
        let env = EnvSnapshot::empty();
        let outcome = cmd.execute(&["X".to_string(), "a b".to_string()], &env);
        match outcome {
            Ok(BuiltinOutcome::Env(next)) => assert_eq!(next.lookup("X"), Some("a b")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_setenv_value_may_contain_equals() {
        let cmd = SetenvCommand::new();
        let env = EnvSnapshot::empty();
        let outcome = cmd.execute(&["X=a=b".to_string()], &env);
        match outcome {
            Ok(BuiltinOutcome::Env(next)) => assert_eq!(next.lookup("X"), Some("a=b")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_setenv_usage_errors() {
        let cmd = SetenvCommand::new();
        let env = EnvSnapshot::empty();
        for args in [
            vec![],
            vec!["NOEQUALS".to_string()],
            vec!["=value".to_string()],
            vec!["A".to_string(), "b".to_string(), "c".to_string()],
        ] {
            assert!(matches!(
                cmd.execute(&args, &env),
                Err(CommandError::Usage(_))
            ));
        }
    }

    #[test]
    fn test_unsetenv_removes_entry() {
        let cmd = UnsetenvCommand::new();
        let env = EnvSnapshot::empty().set("X", "1");
        let outcome = cmd.execute(&["X".to_string()], &env);
        match outcome {
            Ok(BuiltinOutcome::Env(next)) => assert_eq!(next.lookup("X"), None),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_unsetenv_absent_variable_reported() {
        let cmd = UnsetenvCommand::new();
        let env = EnvSnapshot::empty();
        let result = cmd.execute(&["MISSING".to_string()], &env);
        assert!(matches!(
            result,
            Err(CommandError::EnvError(EnvError::VarNotFound(_)))
        ));
    }
}
