use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// Snapshot of environmental variables, taken once and then queried without touching the
/// process environment again.
///
/// Lookups are case-insensitive on Windows, where environmental variables are too.
#[derive(Debug, Clone)]
pub struct Env {
    keys: HashMap<OsString, OsString>,

    normalised_keys: HashMap<OsString, OsString>,
}

impl Env {
    /// Snapshot the current process environment.
    pub fn new() -> Self {
        Self::new_from(std::env::vars_os().collect())
    }

    /// Create new [`Env`] using `env` as existing environmental variables.
    pub fn new_from(env: HashMap<OsString, OsString>) -> Self {
        let normalised_keys = env
            .iter()
            .map(|(key, value)| (Env::normalize_key(key), value.clone()))
            .collect();
        Self {
            keys: env,
            normalised_keys,
        }
    }

    /// Create an empty [`Env`], as if no variable was set.
    pub fn empty() -> Self {
        Self::new_from(HashMap::new())
    }

    fn normalize_key(key: impl AsRef<OsStr>) -> OsString {
        key.as_ref().to_ascii_uppercase()
    }

    /// Get environmental variable pointed by `key`.
    ///
    /// # Returns
    /// `Option<&OsStr>`. `None` variant indicates missing key, `Some`: existing key.
    ///
    /// # Examples
    /// ```rust
    /// use std::ffi::OsStr;
    /// use xdgconf::os::env::Env;
    ///
    /// let env = Env::from_iter([("FOO", "bar")]);
    /// assert_eq!(env.get_os("FOO"), Some(OsStr::new("bar")));
    /// assert_eq!(env.get_os("BAZ"), None);
    /// ```
    pub fn get_os(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        let key = key.as_ref();
        match self.keys.get(key) {
            Some(x) => Some(x),
            None => {
                if cfg!(target_os = "windows") {
                    self.normalised_keys
                        .get(&Env::normalize_key(key))
                        .map(|x| x.as_ref())
                } else {
                    None
                }
            }
        }
    }

    /// Get environmental variable pointed by `key` as a path.
    ///
    /// Unset and empty variables both yield `None`. The path is not required to be absolute, see
    /// [`Env::get_absolute_path`] for that.
    pub fn get_path(&self, key: impl AsRef<OsStr>) -> Option<PathBuf> {
        self.get_os(key)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    /// Like [`Env::get_path`], but relative paths are treated as unset.
    ///
    /// This is how XDG base directory variables must be read: "If an implementation encounters a
    /// relative path in any of these variables it should consider the path invalid and ignore it."
    pub fn get_absolute_path(&self, key: impl AsRef<OsStr>) -> Option<PathBuf> {
        let key = key.as_ref();
        let path = self.get_path(key)?;
        if path.is_absolute() {
            Some(path)
        } else {
            tracing::warn!(
                "ignoring relative path {} in ${}",
                path.display(),
                key.to_string_lossy()
            );
            None
        }
    }

    /// Split a `PATH`-like variable into its absolute entries, preserving order.
    ///
    /// Returns `None` if the variable is unset or empty, so that callers can fall back to a
    /// default. Relative and empty entries are skipped.
    pub fn get_paths(&self, key: impl AsRef<OsStr>) -> Option<Vec<PathBuf>> {
        let value = self.get_os(key).filter(|value| !value.is_empty())?;
        Some(
            std::env::split_paths(value)
                .filter(|path| path.is_absolute())
                .collect(),
        )
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for Env
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new_from(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
