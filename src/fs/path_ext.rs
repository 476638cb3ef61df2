use std::{
    fs::{create_dir, create_dir_all},
    io,
    path::{Path, PathBuf},
};

/// Options for controlling [`PathExt::mkdir`]
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum MkdirOptions {
    /// Equivalent of `mkdir $path`.
    WithoutParents,
    /// Equivalent of `mkdir -p $path`.
    WithParents,
}

mod sealed {
    use std::path::Path;

    pub trait Sealed {}
    impl Sealed for Path {}
}

/// Extension trait for [`Path`] with the filesystem operations needed to discover and persist
/// configuration files.
///
/// ```rust,no_run
/// # use xdgconf::fs::*;
/// # use std::path::Path;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = Path::new("a/b");
/// dir.mkdir(MkdirOptions::WithParents)?;
/// dir.mkdir(MkdirOptions::WithParents)?; // Already there, still fine.
/// assert!(!dir.is_readable_file());
/// # Ok(())
/// # }
/// ```
pub trait PathExt: sealed::Sealed {
    /// Create directories at given [`Path`].
    ///
    /// # Returns
    /// [`Ok(())`](Ok) if created successfully, otherwise error, as reported by
    /// [`create_dir`], or [`create_dir_all`].
    ///
    /// Note that this function will return `Ok(())`, if [`create_dir`] returns `Err` with kind
    /// [`ErrorKind::AlreadyExists`](io::ErrorKind::AlreadyExists) and `self` is a directory.
    fn mkdir(&self, opts: MkdirOptions) -> io::Result<()>;

    /// Returns `true` if `self` is a regular file the current user may read.
    ///
    /// On `unix` this asks `access(2)` with `R_OK`; elsewhere any existing regular file counts.
    fn is_readable_file(&self) -> bool;

    /// Make `self` absolute against the current working directory, without touching the disk.
    fn absolutize(&self) -> io::Result<PathBuf>;

    /// Expand a leading `~` into `home`.
    ///
    /// Paths which are not UTF-8 are returned unchanged.
    ///
    /// This function requires __expand-user__ feature.
    #[cfg(feature = "expand-user")]
    #[cfg_attr(docsrs, doc(cfg(feature = "expand-user")))]
    fn expand_user(&self, home: &Path) -> PathBuf;

    /// Resolve symlinks and `..` components of `self`.
    ///
    /// Unlike [`std::fs::canonicalize`], this function __doesn't__ fail, if `self` points to
    /// non-existing file.
    ///
    /// This function requires __full-resolve__ feature.
    #[cfg(feature = "full-resolve")]
    #[cfg_attr(docsrs, doc(cfg(feature = "full-resolve")))]
    fn full_canonicalize(&self) -> io::Result<PathBuf>;
}

impl PathExt for Path {
    fn mkdir(&self, opts: MkdirOptions) -> io::Result<()> {
        let result = match opts {
            MkdirOptions::WithoutParents => create_dir(self),
            MkdirOptions::WithParents => create_dir_all(self),
        };
        match result {
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && self.is_dir() => Ok(()),
            _ => result,
        }
    }

    #[cfg(unix)]
    fn is_readable_file(&self) -> bool {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        if !self.is_file() {
            return false;
        }
        let Ok(raw) = CString::new(self.as_os_str().as_bytes()) else {
            return false;
        };
        // SAFETY: `raw` is a valid NUL-terminated string which outlives the call.
        unsafe { libc::access(raw.as_ptr(), libc::R_OK) == 0 }
    }

    #[cfg(not(unix))]
    fn is_readable_file(&self) -> bool {
        self.is_file()
    }

    fn absolutize(&self) -> io::Result<PathBuf> {
        std::path::absolute(self)
    }

    #[cfg(feature = "expand-user")]
    fn expand_user(&self, home: &Path) -> PathBuf {
        let Some(as_str) = self.to_str() else {
            return self.to_path_buf();
        };
        let expanded = shellexpand::tilde_with_context(as_str, || home.to_str());
        PathBuf::from(expanded.into_owned())
    }

    #[cfg(feature = "full-resolve")]
    fn full_canonicalize(&self) -> io::Result<PathBuf> {
        soft_canonicalize::soft_canonicalize(self)
    }
}
