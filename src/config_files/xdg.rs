//! XDG Base Directory Specification support.
//!
//! Implements path resolution following the XDG Base Directory Specification, with platform-specific
//! fallbacks for Windows. Every lookup goes through an [`Env`] snapshot.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config_files::error::PathResolutionError;
use crate::config_files::home;
use crate::os::env::Env;

/// What the files stored under a base directory are for.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Purpose {
    /// `$XDG_CONFIG_HOME`.
    Config,
    /// `$XDG_DATA_HOME`.
    Data,
    /// `$XDG_STATE_HOME`.
    State,
    /// `$XDG_CACHE_HOME`.
    Cache,
}

impl Purpose {
    /// Every purpose, in declaration order.
    pub const ALL: [Purpose; 4] = [Purpose::Config, Purpose::Data, Purpose::State, Purpose::Cache];

    /// Lowercase name, as accepted by [`Purpose::from_str`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Purpose::Config => "config",
            Purpose::Data => "data",
            Purpose::State => "state",
            Purpose::Cache => "cache",
        }
    }

    /// Name of the user-specific base directory variable, e.g. `XDG_CONFIG_HOME`.
    pub const fn home_var(self) -> &'static str {
        match self {
            Purpose::Config => "XDG_CONFIG_HOME",
            Purpose::Data => "XDG_DATA_HOME",
            Purpose::State => "XDG_STATE_HOME",
            Purpose::Cache => "XDG_CACHE_HOME",
        }
    }

    /// Name of the system-wide search path variable, if XDG defines one.
    pub const fn dirs_var(self) -> Option<&'static str> {
        match self {
            Purpose::Config => Some("XDG_CONFIG_DIRS"),
            Purpose::Data => Some("XDG_DATA_DIRS"),
            Purpose::State | Purpose::Cache => None,
        }
    }

    /// Default of [`Purpose::home_var`], relative to the home directory.
    const fn default_home_suffix(self) -> &'static [&'static str] {
        match self {
            Purpose::Config => &[".config"],
            Purpose::Data => &[".local", "share"],
            Purpose::State => &[".local", "state"],
            Purpose::Cache => &[".cache"],
        }
    }

    /// Default of [`Purpose::dirs_var`].
    const fn default_dirs(self) -> &'static [&'static str] {
        match self {
            Purpose::Config => &["/etc/xdg"],
            Purpose::Data => &["/usr/local/share", "/usr/share"],
            Purpose::State | Purpose::Cache => &[],
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = PathResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Purpose::ALL
            .into_iter()
            .find(|purpose| purpose.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PathResolutionError::UnknownPurpose(s.to_owned()))
    }
}

/// Get the user-set `$XDG_<PURPOSE>_HOME`, if it is set to an absolute path.
pub fn user_base(env: &Env, purpose: Purpose) -> Option<PathBuf> {
    env.get_absolute_path(purpose.home_var())
}

/// Get the XDG default for `$XDG_<PURPOSE>_HOME`, ignoring whether the variable is set.
///
/// On Windows `%APPDATA%` (config) and `%LOCALAPPDATA%` (everything else) take that role.
///
/// # Errors
/// [`PathResolutionError::NoHome`] or [`PathResolutionError::RelativeHome`] if the home
/// directory is needed and unusable.
pub fn default_base(env: &Env, purpose: Purpose) -> Result<PathBuf, PathResolutionError> {
    if cfg!(windows) {
        let (var, fallback): (&str, &[&str]) = match purpose {
            Purpose::Config => ("APPDATA", &["AppData", "Roaming"]),
            Purpose::Data | Purpose::State | Purpose::Cache => {
                ("LOCALAPPDATA", &["AppData", "Local"])
            }
        };
        let mut base = match env.get_absolute_path(var) {
            Some(base) => base,
            None => {
                let mut home = home(env)?;
                home.extend(fallback);
                home
            }
        };
        if purpose == Purpose::Cache {
            base.push("caches");
        }
        Ok(base)
    } else {
        let mut home = home(env)?;
        home.extend(purpose.default_home_suffix());
        Ok(home)
    }
}

/// Get the system-wide search path for `purpose`, most dominant first.
///
/// `$XDG_CONFIG_DIRS` and `$XDG_DATA_DIRS` are honoured when set, otherwise the XDG defaults
/// (`/etc/xdg`, `/usr/local/share:/usr/share`) are used. State and cache have no system
/// counterpart; neither does Windows.
pub fn system_bases(env: &Env, purpose: Purpose) -> Vec<PathBuf> {
    if cfg!(windows) {
        return Vec::new();
    }
    purpose
        .dirs_var()
        .and_then(|var| env.get_paths(var))
        .unwrap_or_else(|| purpose.default_dirs().iter().map(PathBuf::from).collect())
}
