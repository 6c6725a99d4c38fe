use std::env;
use std::path::{Path, PathBuf};

use super::executor::{is_executable, ExitOutcome, ProcessExecutor};
use super::ProcessError;
use crate::core::env::EnvSnapshot;

/// Toolchain family for a recognized source-file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    C,
    Cpp,
    Python,
    Java,
}

impl SourceKind {
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension()?.to_str()?;
        match ext {
            "c" => Some(SourceKind::C),
            "cpp" | "cc" | "cxx" => Some(SourceKind::Cpp),
            "py" => Some(SourceKind::Python),
            "java" => Some(SourceKind::Java),
            _ => None,
        }
    }

    fn compiler(&self) -> &'static str {
        match self {
            SourceKind::C => "gcc",
            SourceKind::Cpp => "g++",
            SourceKind::Python => "python3",
            SourceKind::Java => "javac",
        }
    }
}

/// Removes the compiled artifact when the run is over, however it ended.
struct TempArtifact {
    path: PathBuf,
}

impl TempArtifact {
    /// The artifact name is keyed by this shell's pid so two instances
    /// never clobber each other.
    fn for_this_instance() -> Self {
        Self {
            path: env::temp_dir().join(format!("carina_run_{}", std::process::id())),
        }
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Drives the compile-then-run sequence for source files.
pub struct SourceRunner<'a> {
    executor: &'a ProcessExecutor,
}

impl<'a> SourceRunner<'a> {
    pub fn new(executor: &'a ProcessExecutor) -> Self {
        Self { executor }
    }

    /// Builds `file` when its family needs it and runs the result,
    /// forwarding `extra` to the program.
    pub fn run(
        &self,
        file: &str,
        extra: &[String],
        env: &EnvSnapshot,
    ) -> Result<ExitOutcome, ProcessError> {
        let kind = SourceKind::from_path(file)
            .ok_or_else(|| ProcessError::BuildFailed(format!("unknown file type for '{}'", file)))?;

        match kind {
            SourceKind::C | SourceKind::Cpp => self.compile_and_run(kind, file, extra, env),
            SourceKind::Python => {
                let mut argv = vec![kind.compiler().to_string(), file.to_string()];
                argv.extend(extra.iter().cloned());
                self.executor.run(&argv, env)
            }
            SourceKind::Java => self.run_java(file, extra, env),
        }
    }

    fn compile_and_run(
        &self,
        kind: SourceKind,
        file: &str,
        extra: &[String],
        env: &EnvSnapshot,
    ) -> Result<ExitOutcome, ProcessError> {
        let artifact = TempArtifact::for_this_instance();

        let compile = vec![
            kind.compiler().to_string(),
            file.to_string(),
            "-o".to_string(),
            artifact.path.to_string_lossy().into_owned(),
        ];
        let built = match self.executor.run(&compile, env) {
            Ok(outcome) => outcome,
            Err(e) => return Err(ProcessError::BuildFailed(e.to_string())),
        };

        if !built.success() || !is_executable(&artifact.path) {
            return Err(ProcessError::BuildFailed(format!(
                "compilation failed for '{}'",
                file
            )));
        }

        let mut argv = vec![artifact.path.to_string_lossy().into_owned()];
        argv.extend(extra.iter().cloned());
        self.executor.supervise(&artifact.path, &argv, env)
        // artifact dropped here, removing the binary whatever the outcome
    }

    fn run_java(
        &self,
        file: &str,
        extra: &[String],
        env: &EnvSnapshot,
    ) -> Result<ExitOutcome, ProcessError> {
        let compile = vec![SourceKind::Java.compiler().to_string(), file.to_string()];
        match self.executor.run(&compile, env) {
            Ok(outcome) if outcome.success() => {}
            Ok(_) => {
                return Err(ProcessError::BuildFailed(format!(
                    "compilation failed for '{}'",
                    file
                )))
            }
            Err(e) => return Err(ProcessError::BuildFailed(e.to_string())),
        }

        let path = Path::new(file);
        let class = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| {
                ProcessError::BuildFailed(format!("unexpected java filename '{}'", file))
            })?;
        let class_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                parent.to_string_lossy().into_owned()
            }
            _ => ".".to_string(),
        };

        let mut argv = vec![
            "java".to_string(),
            "-cp".to_string(),
            class_dir,
            class.to_string(),
        ];
        argv.extend(extra.iter().cloned());
        self.executor.run(&argv, env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Flags;
    use std::fs;

    #[test]
    fn test_extension_classification() {
        assert_eq!(SourceKind::from_path("hello.c"), Some(SourceKind::C));
        assert_eq!(SourceKind::from_path("a/b/hello.cpp"), Some(SourceKind::Cpp));
        assert_eq!(SourceKind::from_path("x.cc"), Some(SourceKind::Cpp));
        assert_eq!(SourceKind::from_path("x.cxx"), Some(SourceKind::Cpp));
        assert_eq!(SourceKind::from_path("script.py"), Some(SourceKind::Python));
        assert_eq!(SourceKind::from_path("Main.java"), Some(SourceKind::Java));
        assert_eq!(SourceKind::from_path("notes.txt"), None);
        assert_eq!(SourceKind::from_path("no_extension"), None);
        assert_eq!(SourceKind::from_path("trailing."), None);
    }

    #[test]
    fn test_unknown_extension_reports_build_failure() {
        let flags = Flags::default();
        let executor = ProcessExecutor::new(&flags);
        let runner = SourceRunner::new(&executor);
        let result = runner.run("notes.txt", &[], &EnvSnapshot::empty());
        assert!(matches!(result, Err(ProcessError::BuildFailed(_))));
    }

    #[test]
    fn test_temp_artifact_removed_on_drop() {
        let path;
        {
            let artifact = TempArtifact::for_this_instance();
            fs::write(&artifact.path, b"payload").unwrap();
            path = artifact.path.clone();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }
}
