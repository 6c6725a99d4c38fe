use super::EnvError;
use std::env;

/// Point-in-time environment used as a command's execution context.
///
/// Entries keep insertion order, matching the layout of the inherited
/// environ block. Mutations never happen in place: `set` and `unset` build
/// a new snapshot and the shell swaps its single live reference between
/// command cycles.
#[derive(Clone, Debug)]
pub struct EnvSnapshot {
    vars: Vec<(String, String)>,
}

impl EnvSnapshot {
    /// Captures the environment inherited from the parent process.
    pub fn from_process() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    pub fn empty() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns a snapshot with `name` bound to `value`. An existing entry
    /// keeps its position; a new one is appended.
    pub fn set(&self, name: &str, value: &str) -> EnvSnapshot {
        let mut next = self.clone();
        match next.vars.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => *slot = value.to_string(),
            None => next.vars.push((name.to_string(), value.to_string())),
        }
        next
    }

    /// Returns a snapshot with the first entry named `name` removed.
    pub fn unset(&self, name: &str) -> Result<EnvSnapshot, EnvError> {
        let mut next = self.clone();
        match next.vars.iter().position(|(key, _)| key == name) {
            Some(index) => {
                next.vars.remove(index);
                Ok(next)
            }
            None => Err(EnvError::VarNotFound(name.to_string())),
        }
    }

    /// `"NAME=value"` lines in current order.
    pub fn enumerate(&self) -> impl Iterator<Item = String> + '_ {
        self.vars
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
