//! Configuration file discovery and persistence.
//!
//! Locates configuration directories following the XDG Base Directory Specification, falls
//! back to legacy `~/.<app>` directories, and reads/writes plain-data YAML files there.
//!
//! ```rust,no_run
//! # use xdgconf::config_files::{ConfigMapping, PathResolver, Purpose, ResolverContext, Value};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = PathResolver::new();
//! let ctx = ResolverContext::new("demo");
//!
//! let mut settings = ConfigMapping::new();
//! settings.insert("key".to_owned(), Value::from("value"));
//! let written = resolver.write_config(&settings, Purpose::Config, &ctx)?;
//!
//! let read = resolver.read_config(Purpose::Config, &ctx)?;
//! assert_eq!(read, Some(settings));
//! # drop(written);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use crate::os::env::Env;

pub mod error;
pub mod resolver;
pub mod value;
pub mod xdg;
pub mod yaml;

pub use error::{DecodeError, EncodeError, Error, PathResolutionError, WriteError};
pub use resolver::{CandidateList, PathResolver, ResolverContext, WriteMode};
pub use value::{ConfigMapping, Scalar, Value, from_config_mapping, to_config_mapping};
pub use xdg::Purpose;

const HOME_VAR: &str = if cfg!(windows) { "USERPROFILE" } else { "HOME" };

/// Home directory as recorded in `env`.
///
/// # Errors
/// [`PathResolutionError::NoHome`] if the variable is unset or empty,
/// [`PathResolutionError::RelativeHome`] if it is not absolute.
pub fn home(env: &Env) -> Result<PathBuf, PathResolutionError> {
    let home = env
        .get_path(HOME_VAR)
        .ok_or(PathResolutionError::NoHome(HOME_VAR))?;
    if home.is_absolute() {
        Ok(home)
    } else {
        Err(PathResolutionError::RelativeHome(home))
    }
}
