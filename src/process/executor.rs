use std::env;
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::{Path, PathBuf};
use std::process::Command;

use super::signal::InterruptGuard;
use super::ProcessError;
use crate::core::env::EnvSnapshot;
use crate::flags::Flags;

/// What became of a foreground child: a normal exit with its code, or
/// death by signal with the signal number. The two are never conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Exited(i32),
    Signaled(i32),
}

impl ExitOutcome {
    pub fn success(&self) -> bool {
        matches!(self, ExitOutcome::Exited(0))
    }
}

#[derive(Clone)]
pub struct ProcessExecutor {
    quiet_mode: bool,
}

impl ProcessExecutor {
    pub fn new(flags: &Flags) -> Self {
        ProcessExecutor {
            quiet_mode: flags.is_set("quiet"),
        }
    }

    /// Walks the snapshot's PATH in order, then falls back to the working
    /// directory. Names containing a path separator get no special
    /// treatment; PATH entries are always tried first.
    pub fn resolve(&self, name: &str, env: &EnvSnapshot) -> Result<PathBuf, ProcessError> {
        if let Some(path_var) = env.lookup("PATH") {
            for dir in path_var.split(':').filter(|d| !d.is_empty()) {
                let candidate = Path::new(dir).join(name);
                if is_executable(&candidate) {
                    return Ok(candidate);
                }
            }
        }

        let fallback = env::current_dir()?.join(name);
        if is_executable(&fallback) {
            return Ok(fallback);
        }

        Err(ProcessError::CommandNotFound(name.to_string()))
    }

    /// Resolves argv[0] and supervises the child to completion.
    pub fn run(&self, argv: &[String], env: &EnvSnapshot) -> Result<ExitOutcome, ProcessError> {
        let program = self.resolve(&argv[0], env)?;
        self.supervise(&program, argv, env)
    }

    /// Spawns `program` with the full argument vector and exactly the
    /// snapshot's variables, then blocks until the child is reaped.
    ///
    /// SIGINT is ignored in the parent for the duration so an interactive
    /// interrupt cannot kill the shell; the child resets the disposition to
    /// default before exec so the launched program stays interruptible.
    pub fn supervise(
        &self,
        program: &Path,
        argv: &[String],
        env: &EnvSnapshot,
    ) -> Result<ExitOutcome, ProcessError> {
        let mut command = Command::new(program);
        command
            .arg0(&argv[0])
            .args(&argv[1..])
            .env_clear()
            .envs(env.iter());

        unsafe {
            command.pre_exec(reset_interrupt_disposition);
        }

        let _guard = InterruptGuard::ignore()?;

        let mut child = command.spawn().map_err(|e| {
            ProcessError::SpawnFailed(format!("{}: {}", program.display(), e))
        })?;

        let status = child.wait()?;
        let outcome = match status.code() {
            Some(code) => ExitOutcome::Exited(code),
            None => ExitOutcome::Signaled(status.signal().unwrap_or(0)),
        };

        self.report(&outcome);
        Ok(outcome)
    }

    fn report(&self, outcome: &ExitOutcome) {
        if self.quiet_mode {
            return;
        }
        match outcome {
            ExitOutcome::Exited(0) => {}
            ExitOutcome::Exited(code) => println!("Process exited with status: {}", code),
            ExitOutcome::Signaled(signo) => println!("Process terminated by signal: {}", signo),
        }
    }
}

/// Runs in the child between fork and exec: SIGINT back to default so the
/// launched program is interruptible even though the parent ignores it.
fn reset_interrupt_disposition() -> std::io::Result<()> {
    unsafe {
        libc::signal(libc::SIGINT, libc::SIG_DFL);
    }
    Ok(())
}

pub(crate) fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::os::unix::fs::OpenOptionsExt;

    fn quiet_executor() -> ProcessExecutor {
        let mut flags = Flags::new();
        flags
            .parse(&["-q".to_string()])
            .unwrap_or_else(|_| unreachable!());
        ProcessExecutor::new(&flags)
    }

    fn place_executable(dir: &Path, name: &str) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(name);
        fs::OpenOptions::new()
            .create(true)
            .write(true)
            .mode(0o755)
            .open(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_resolve_walks_path_in_order() {
        let base = env::temp_dir().join(format!("carina_resolve_{}", std::process::id()));
        let first = base.join("first");
        let second = base.join("second");
        fs::create_dir_all(&first).unwrap();
        let hit = place_executable(&second, "foo");

        let env = EnvSnapshot::empty().set(
            "PATH",
            &format!("{}:{}", first.display(), second.display()),
        );

        let resolved = quiet_executor().resolve("foo", &env).unwrap();
        assert_eq!(resolved, hit);

        fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn test_resolve_ignores_non_executable_files() {
        let base = env::temp_dir().join(format!("carina_noexec_{}", std::process::id()));
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("bar"), b"").unwrap();

        let env = EnvSnapshot::empty().set("PATH", &base.display().to_string());
        let result = quiet_executor().resolve("bar", &env);
        assert!(matches!(result, Err(ProcessError::CommandNotFound(_))));

        fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn test_resolve_failure_is_not_fatal() {
        let env = EnvSnapshot::empty().set("PATH", "/nonexistent/a:/nonexistent/b");
        let result = quiet_executor().resolve("no_such_command_here", &env);
        assert!(matches!(result, Err(ProcessError::CommandNotFound(_))));
    }

    #[test]
    fn test_resolve_does_not_special_case_separators() {
        // a name embedding a separator still goes through PATH first
        let base = env::temp_dir().join(format!("carina_sep_{}", std::process::id()));
        let pathdir = base.join("pathdir");
        let hit = place_executable(&pathdir.join("sub"), "prog");

        let env = EnvSnapshot::empty().set("PATH", &pathdir.display().to_string());
        let resolved = quiet_executor().resolve("sub/prog", &env).unwrap();
        assert_eq!(resolved, hit);

        fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn test_exit_code_surfaced() {
        let env = EnvSnapshot::from_process();
        let argv = vec!["sh".to_string(), "-c".to_string(), "exit 3".to_string()];
        let outcome = quiet_executor().run(&argv, &env).unwrap();
        assert_eq!(outcome, ExitOutcome::Exited(3));
        assert!(!outcome.success());
    }

    #[test]
    fn test_signal_death_distinct_from_exit_code() {
        let env = EnvSnapshot::from_process();
        let argv = vec![
            "sh".to_string(),
            "-c".to_string(),
            "kill -TERM $$".to_string(),
        ];
        let outcome = quiet_executor().run(&argv, &env).unwrap();
        assert_eq!(outcome, ExitOutcome::Signaled(libc::SIGTERM));
    }

    #[test]
    fn test_child_sees_snapshot_environment() {
        let env = EnvSnapshot::from_process().set("CARINA_PROBE", "42");
        let argv = vec![
            "sh".to_string(),
            "-c".to_string(),
            "test \"$CARINA_PROBE\" = 42".to_string(),
        ];
        let outcome = quiet_executor().run(&argv, &env).unwrap();
        assert_eq!(outcome, ExitOutcome::Exited(0));
    }
}
