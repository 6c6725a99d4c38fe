use super::{BuiltinOutcome, Command, CommandError};
use crate::core::env::EnvSnapshot;
use std::io::{self, Write};

#[derive(Clone)]
pub struct EchoCommand;

impl Default for EchoCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl EchoCommand {
    pub fn new() -> Self {
        Self
    }

    /// Joins the arguments with single spaces. A leading `-n` suppresses
    /// the newline; an argument starting with `$` is replaced by the
    /// snapshot value of the rest, or nothing when unset.
    fn render(args: &[String], env: &EnvSnapshot) -> (String, bool) {
        let mut newline = true;
        let mut rest = args;
        if rest.first().map(String::as_str) == Some("-n") {
            newline = false;
            rest = &rest[1..];
        }

        let pieces: Vec<String> = rest
            .iter()
            .map(|arg| match arg.strip_prefix('$') {
                Some(name) => env.lookup(name).unwrap_or_default().to_string(),
                None => arg.clone(),
            })
            .collect();

        (pieces.join(" "), newline)
    }
}

impl Command for EchoCommand {
    fn execute(&self, args: &[String], env: &EnvSnapshot) -> Result<BuiltinOutcome, CommandError> {
        let (text, newline) = Self::render(args, env);
        if newline {
            println!("{}", text);
        } else {
            print!("{}", text);
            io::stdout().flush()?;
        }
        Ok(BuiltinOutcome::Handled)
    }
}
