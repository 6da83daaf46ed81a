//! Point-in-time view of environment variables

use std::collections::BTreeMap;
use std::env;

/// How variable names are matched against the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseMode {
    #[default]
    Sensitive,
    /// Exact match first, then the first key equal under lowercase folding.
    Insensitive,
}

/// Immutable key/value view of an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    vars: BTreeMap<String, String>,
}

impl Snapshot {
    /// Capture the current process environment.
    ///
    /// Entries whose key or value is not valid UTF-8 are skipped.
    pub fn from_env() -> Self {
        let vars: BTreeMap<String, String> = env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        tracing::debug!(count = vars.len(), "captured environment snapshot");
        Self { vars }
    }

    /// Look up `name` using the given case mode.
    pub fn get(&self, name: &str, case: CaseMode) -> Option<&str> {
        if let Some(value) = self.vars.get(name) {
            return Some(value);
        }

        match case {
            CaseMode::Sensitive => None,
            CaseMode::Insensitive => {
                let wanted = name.to_lowercase();
                self.vars
                    .iter()
                    .find(|(key, _)| key.to_lowercase() == wanted)
                    .map(|(_, value)| value.as_str())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Snapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
