use crate::error::ShellError;
use std::path::PathBuf;

/// Expands a leading tilde to the user's home directory. Anything else
/// passes through untouched.
pub fn expand(path: &str) -> Result<PathBuf, ShellError> {
    let Some(rest) = path.strip_prefix('~') else {
        return Ok(PathBuf::from(path));
    };

    if rest.is_empty() {
        return home_dir();
    }

    match rest.strip_prefix('/') {
        Some(tail) => Ok(home_dir()?.join(tail)),
        // "~user" forms are not resolved
        None => Ok(PathBuf::from(path)),
    }
}

pub fn home_dir() -> Result<PathBuf, ShellError> {
    dirs::home_dir().ok_or(ShellError::HomeDirNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_untouched() -> Result<(), ShellError> {
        assert_eq!(expand("/tmp/file")?, PathBuf::from("/tmp/file"));
        assert_eq!(expand("relative/path")?, PathBuf::from("relative/path"));
        Ok(())
    }

    #[test]
    fn test_bare_tilde() -> Result<(), ShellError> {
        assert_eq!(expand("~")?, home_dir()?);
        Ok(())
    }

    #[test]
    fn test_tilde_with_tail() -> Result<(), ShellError> {
        assert_eq!(expand("~/bin")?, home_dir()?.join("bin"));
        Ok(())
    }

    #[test]
    fn test_tilde_user_passthrough() -> Result<(), ShellError> {
        assert_eq!(expand("~other/x")?, PathBuf::from("~other/x"));
        Ok(())
    }
}
