use std::collections::BTreeMap;

mod cd;
mod echo;
mod env;
mod exit;
mod help;
mod pwd;
mod run;
mod setenv;
mod which;

pub use cd::CdCommand;
pub use echo::EchoCommand;
pub use env::EnvCommand;
pub use exit::ExitCommand;
pub use help::{HelpCommand, HelpIndexCommand};
pub use pwd::PwdCommand;
pub use run::RunCommand;
pub use setenv::{SetenvCommand, UnsetenvCommand};
pub use which::WhichCommand;

use crate::core::env::{EnvError, EnvSnapshot};
use crate::flags::Flags;
use crate::process::{ProcessError, ProcessExecutor};

/// Names `which` reports as built in; kept in step with the registry in
/// `CommandExecutor::new` (pinned by a test).
pub const BUILTIN_NAMES: [&str; 12] = [
    "cd", "pwd", "echo", "env", "setenv", "unsetenv", "which", "run", "help", ".help", "exit",
    "quit",
];

#[derive(Debug)]
pub enum CommandError {
    Usage(String),
    ExecutionError(String),
    IoError(std::io::Error),
    ProcessError(ProcessError),
    EnvError(EnvError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Usage(text) => write!(f, "Usage: {}", text),
            CommandError::ExecutionError(msg) => write!(f, "execution error: {}", msg),
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
            CommandError::ProcessError(err) => write!(f, "{}", err),
            CommandError::EnvError(err) => write!(f, "{}", err),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::ProcessError(err)
    }
}

impl From<EnvError> for CommandError {
    fn from(err: EnvError) -> Self {
        CommandError::EnvError(err)
    }
}

/// What a builtin asked the dispatch cycle to do next.
#[derive(Debug)]
pub enum BuiltinOutcome {
    /// Output, if any, was produced; nothing else changes.
    Handled,
    /// The environment snapshot was replaced for the next cycle.
    Env(EnvSnapshot),
    /// The shell should leave its read loop.
    Exit,
}

pub trait Command {
    fn execute(&self, args: &[String], env: &EnvSnapshot) -> Result<BuiltinOutcome, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Pwd(PwdCommand),
    Echo(EchoCommand),
    Env(EnvCommand),
    Setenv(SetenvCommand),
    Unsetenv(UnsetenvCommand),
    Which(WhichCommand),
    Run(RunCommand),
    Help(HelpCommand),
    HelpIndex(HelpIndexCommand),
    Exit(ExitCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String], env: &EnvSnapshot) -> Result<BuiltinOutcome, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, env),
            CommandType::Pwd(cmd) => cmd.execute(args, env),
            CommandType::Echo(cmd) => cmd.execute(args, env),
            CommandType::Env(cmd) => cmd.execute(args, env),
            CommandType::Setenv(cmd) => cmd.execute(args, env),
            CommandType::Unsetenv(cmd) => cmd.execute(args, env),
            CommandType::Which(cmd) => cmd.execute(args, env),
            CommandType::Run(cmd) => cmd.execute(args, env),
            CommandType::Help(cmd) => cmd.execute(args, env),
            CommandType::HelpIndex(cmd) => cmd.execute(args, env),
            CommandType::Exit(cmd) => cmd.execute(args, env),
        }
    }
}

#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<String, CommandType>,
    process_executor: ProcessExecutor,
}

impl CommandExecutor {
    pub fn new(flags: &Flags) -> Self {
        let process_executor = ProcessExecutor::new(flags);
        let mut commands = BTreeMap::new();

        commands.insert("cd".to_string(), CommandType::Cd(CdCommand::new()));
        commands.insert("pwd".to_string(), CommandType::Pwd(PwdCommand::new()));
        commands.insert("echo".to_string(), CommandType::Echo(EchoCommand::new()));
        commands.insert("env".to_string(), CommandType::Env(EnvCommand::new()));
        commands.insert(
            "setenv".to_string(),
            CommandType::Setenv(SetenvCommand::new()),
        );
        commands.insert(
            "unsetenv".to_string(),
            CommandType::Unsetenv(UnsetenvCommand::new()),
        );
        commands.insert(
            "which".to_string(),
            CommandType::Which(WhichCommand::new(process_executor.clone())),
        );
        commands.insert(
            "run".to_string(),
            CommandType::Run(RunCommand::new(process_executor.clone())),
        );
        commands.insert("help".to_string(), CommandType::Help(HelpCommand::new()));
        commands.insert(
            ".help".to_string(),
            CommandType::HelpIndex(HelpIndexCommand::new()),
        );
        commands.insert("exit".to_string(), CommandType::Exit(ExitCommand::new()));
        commands.insert("quit".to_string(), CommandType::Exit(ExitCommand::new()));

        CommandExecutor {
            commands,
            process_executor,
        }
    }

    /// Routes one argument vector: registry hit goes to the builtin,
    /// anything else to the process executor. External failures are
    /// reported by the caller and the loop carries on.
    pub fn execute(
        &self,
        argv: &[String],
        env: &EnvSnapshot,
    ) -> Result<BuiltinOutcome, CommandError> {
        let Some(name) = argv.first() else {
            return Ok(BuiltinOutcome::Handled);
        };

        if let Some(cmd) = self.commands.get(name.as_str()) {
            return cmd.execute(&argv[1..], env);
        }

        let argv = rewrite_ls(argv);
        self.process_executor.run(&argv, env)?;
        Ok(BuiltinOutcome::Handled)
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }
}

/// Bare `ls` gets `-F` so directories come back marked, unless the user
/// already picked a classify flag.
fn rewrite_ls(argv: &[String]) -> Vec<String> {
    if argv[0] != "ls"
        || argv[1..]
            .iter()
            .any(|arg| arg == "-F" || arg == "-p" || arg == "--classify")
    {
        return argv.to_vec();
    }

    let mut rewritten = Vec::with_capacity(argv.len() + 1);
    rewritten.push(argv[0].clone());
    rewritten.push("-F".to_string());
    rewritten.extend(argv[1..].iter().cloned());
    rewritten
}
