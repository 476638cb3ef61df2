//! Errors reported by path resolution and configuration file I/O.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Candidate directories could not be computed.
#[derive(Debug, Error)]
pub enum PathResolutionError {
    /// Purpose name is not one of `config`, `data`, `state` or `cache`.
    #[error("unknown purpose `{0}`, expected one of `config`, `data`, `state`, `cache`")]
    UnknownPurpose(String),

    /// Application name is empty (or only whitespace).
    #[error("application name must not be empty")]
    EmptyApplication,

    /// Application name would not stay a single directory below its base.
    #[error("application name `{0}` must be a single path component")]
    InvalidApplication(String),

    /// Configuration file stem would not stay a single file inside the candidate directory.
    #[error("configuration file name `{0}` must be a single path component")]
    InvalidFileStem(String),

    /// Caller supplied an empty custom override.
    #[error("custom override path must not be empty")]
    EmptyOverride,

    /// Neither `$HOME` nor its platform counterpart is set.
    #[error("home directory is unknown: `${0}` is not set")]
    NoHome(&'static str),

    /// Home directory is set, but is not an absolute path.
    #[error("home directory `{}` is not absolute", .0.display())]
    RelativeHome(PathBuf),

    /// Custom override could not be turned into an absolute path.
    #[error("failed to resolve custom override `{}`", .path.display())]
    Override {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// File contents are not a safe, plain-data YAML mapping.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Malformed YAML.
    #[error("malformed YAML")]
    Syntax(#[from] serde_yaml_ng::Error),

    /// Document uses a custom tag, which would ask for arbitrary object construction.
    #[error("tagged value `{0}` is not plain data")]
    Tagged(String),

    /// A mapping is keyed by something other than a string.
    #[error("mapping keys must be strings, found {0}")]
    NonStringKey(&'static str),

    /// Integer does not fit in an `i64`.
    #[error("integer `{0}` is out of range")]
    IntegerOutOfRange(String),

    /// Top-level document is not a mapping.
    #[error("expected a mapping at the top level, found {0}")]
    NotAMapping(&'static str),
}

/// Value cannot be represented as plain data, or could not be emitted.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Value serializes to a tagged node, e.g. an enum variant carrying data.
    #[error("tagged value `{0}` is not plain data")]
    Tagged(String),

    /// A mapping is keyed by something other than a string.
    #[error("mapping keys must be strings, found {0}")]
    NonStringKey(&'static str),

    /// Integer does not fit in an `i64`.
    #[error("integer `{0}` is out of range")]
    IntegerOutOfRange(String),

    /// Value does not serialize to a mapping.
    #[error("expected a mapping at the top level, found {0}")]
    NotAMapping(&'static str),

    /// Serializer or emitter failed.
    #[error("failed to emit YAML")]
    Emit(#[from] serde_yaml_ng::Error),
}

/// Configuration file could not be written.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Parent directories could not be created.
    #[error("failed to create directory `{}`", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File itself could not be written.
    #[error("failed to write `{}`", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// [`WriteMode::Fail`](crate::config_files::WriteMode::Fail) was requested and the file exists.
    #[error("refusing to overwrite existing `{}`", .0.display())]
    AlreadyExists(PathBuf),
}

/// Any failure of a configuration file operation.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Resolution(#[from] PathResolutionError),

    #[error("failed to read `{}`", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode `{}`", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
