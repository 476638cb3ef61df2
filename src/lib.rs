//! Xdgconf - XDG base directory discovery and plain-data YAML configuration files.
//!
//! Resolves config/data/state/cache directories following the XDG Base Directory Specification, with
//! legacy `~/.<app>` fallback, and reads/writes configuration files at those locations. See
//! [`config_files`] for the entry points.

pub mod config_files;
pub mod fs;
pub mod os;

pub use config_files::{
    CandidateList, ConfigMapping, Error, PathResolver, Purpose, ResolverContext, Value, WriteMode,
};
