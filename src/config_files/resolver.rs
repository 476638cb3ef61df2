//! Candidate directory resolution and configuration file I/O.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;

use crate::config_files::error::{Error, PathResolutionError, Result, WriteError};
use crate::config_files::value::ConfigMapping;
use crate::config_files::xdg::{self, Purpose};
use crate::config_files::{home, yaml};
use crate::fs::{MkdirOptions, PathExt};
use crate::os::env::Env;

const DEFAULT_FILE_STEM: &str = "config";
const DEFAULT_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Who is asking and where they would like to look first.
///
/// # Examples
/// ```rust
/// use xdgconf::config_files::ResolverContext;
///
/// let ctx = ResolverContext::new("demo")
///     .with_override("/srv/demo")
///     .with_file_stem("settings");
/// assert_eq!(ctx.application(), "demo");
/// assert_eq!(ctx.file_names().next().as_deref(), Some("settings.yml"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverContext {
    application: String,
    custom: Option<PathBuf>,
    file_stem: String,
    extensions: Vec<String>,
}

impl ResolverContext {
    /// Context for `application` with the default file name (`config.yml`, then `config.yaml`)
    /// and no override.
    pub fn new(application: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            custom: None,
            file_stem: DEFAULT_FILE_STEM.to_owned(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_owned()).collect(),
        }
    }

    /// Directory that dominates every XDG and legacy location.
    pub fn with_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.custom = Some(path.into());
        self
    }

    /// Name of the configuration file without extension, `config` by default.
    pub fn with_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = stem.into();
        self
    }

    /// Accepted extensions, in lookup order. The first one is used for writing.
    ///
    /// An empty list leaves the current extensions (`yml`, `yaml` by default) in place.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extensions: Vec<String> = extensions.into_iter().map(Into::into).collect();
        if !extensions.is_empty() {
            self.extensions = extensions;
        }
        self
    }

    /// Application name, used as the directory name below every base directory.
    pub fn application(&self) -> &str {
        &self.application
    }

    /// Override set with [`ResolverContext::with_override`], as given.
    pub fn custom_override(&self) -> Option<&Path> {
        self.custom.as_deref()
    }

    /// Configuration file names looked up in every candidate directory, in order.
    pub fn file_names(&self) -> impl Iterator<Item = String> + '_ {
        self.extensions.iter().map(move |ext| {
            let ext = ext.trim_start_matches('.');
            format!("{}.{ext}", self.file_stem)
        })
    }

    fn write_file_name(&self) -> String {
        self.file_names()
            .next()
            .unwrap_or_else(|| format!("{}.{}", self.file_stem, DEFAULT_EXTENSIONS[0]))
    }

    fn validate(&self) -> Result<(), PathResolutionError> {
        if self.application.trim().is_empty() {
            return Err(PathResolutionError::EmptyApplication);
        }
        if !is_single_component(&self.application) {
            return Err(PathResolutionError::InvalidApplication(
                self.application.clone(),
            ));
        }
        if !is_single_component(&self.file_stem) {
            return Err(PathResolutionError::InvalidFileStem(self.file_stem.clone()));
        }
        match &self.custom {
            Some(custom) if custom.as_os_str().is_empty() => {
                Err(PathResolutionError::EmptyOverride)
            }
            _ => Ok(()),
        }
    }
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(only)), None) if only == OsStr::new(name)
    )
}

/// Candidate directories, most dominant first.
///
/// Never empty, every entry is absolute and appears once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList(Vec<PathBuf>);

impl CandidateList {
    fn from_ordered(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut list = Self(Vec::with_capacity(4));
        for path in paths {
            list.push(path);
        }
        list
    }

    fn push(&mut self, path: PathBuf) {
        if !self.0.contains(&path) {
            self.0.push(path);
        }
    }

    /// Where writes go.
    ///
    /// [`PathResolver::resolve`] always lists the XDG default and legacy directories, so the list
    /// is never empty.
    pub fn most_dominant(&self) -> &Path {
        &self.0[0]
    }

    /// Most dominant first.
    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.0.iter()
    }

    /// Reverse order, so that later entries override earlier ones when superimposed.
    pub fn least_dominant_first(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().rev().map(PathBuf::as_path)
    }

    /// Number of distinct candidates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.0
    }

    /// Unwrap into the ordered directories.
    pub fn into_vec(self) -> Vec<PathBuf> {
        self.0
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for CandidateList {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// What to do when the configuration file being written already exists.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace the file.
    #[default]
    Overwrite,
    /// Merge into the file; top-level keys being written win.
    Update,
    /// Leave the file alone and report [`WriteError::AlreadyExists`].
    Fail,
}

/// Resolves base directories against an [`Env`] snapshot and reads/writes configuration there.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    env: Env,
}

impl PathResolver {
    /// Resolver over a snapshot of the current process environment.
    pub fn new() -> Self {
        Self::with_env(Env::new())
    }

    /// Resolver over an explicit environment, e.g. one built with `Env::from_iter`.
    pub fn with_env(env: Env) -> Self {
        Self { env }
    }

    /// Environment every lookup goes through.
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Candidate directories for `purpose`, most dominant first:
    ///
    /// 1. the custom override, if any;
    /// 2. `$XDG_<PURPOSE>_HOME/<app>`, if set to an absolute path;
    /// 3. the XDG default, e.g. `~/.config/<app>`;
    /// 4. the legacy `~/.<app>`.
    ///
    /// Nothing is checked for existence.
    pub fn resolve(
        &self,
        purpose: Purpose,
        ctx: &ResolverContext,
    ) -> Result<CandidateList, PathResolutionError> {
        ctx.validate()?;
        let home = home(&self.env)?;
        let app = ctx.application();

        let custom = match ctx.custom_override() {
            Some(custom) => Some(resolve_override(custom, &home)?),
            None => None,
        };
        let user = xdg::user_base(&self.env, purpose).map(|base| base.join(app));
        let xdg_default = xdg::default_base(&self.env, purpose)?.join(app);
        let legacy = home.join(format!(".{app}"));

        let candidates = CandidateList::from_ordered(
            custom
                .into_iter()
                .chain(user)
                .chain([xdg_default, legacy]),
        );

        tracing::debug!(
            %purpose,
            application = app,
            candidates = ?candidates.as_slice(),
            "resolved candidate directories"
        );
        Ok(candidates)
    }

    /// System-wide directories for `purpose` (`$XDG_CONFIG_DIRS`, `$XDG_DATA_DIRS`), most
    /// dominant first. Usually not writable; only read by [`PathResolver::read_all`].
    pub fn system_candidates(
        &self,
        purpose: Purpose,
        ctx: &ResolverContext,
    ) -> Result<Vec<PathBuf>, PathResolutionError> {
        ctx.validate()?;
        let mut dirs: Vec<PathBuf> = Vec::new();
        for base in xdg::system_bases(&self.env, purpose) {
            let dir = base.join(ctx.application());
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
        Ok(dirs)
    }

    /// Parse the first readable configuration file found in [`PathResolver::resolve`] order.
    ///
    /// Returns `Ok(None)` if there is none.
    pub fn read_config(
        &self,
        purpose: Purpose,
        ctx: &ResolverContext,
    ) -> Result<Option<ConfigMapping>> {
        let candidates = self.resolve(purpose, ctx)?;
        for dir in &candidates {
            if let Some(file) = readable_files(dir, ctx).next() {
                let map = load(&file)?;
                tracing::info!("Loaded {} configuration from {}", purpose, file.display());
                return Ok(Some(map));
            }
        }
        tracing::debug!(%purpose, application = ctx.application(), "no configuration file found");
        Ok(None)
    }

    /// Parse every readable configuration file, user locations first, then system ones.
    ///
    /// Keys of the returned map are file paths, most dominant first.
    pub fn read_all(
        &self,
        purpose: Purpose,
        ctx: &ResolverContext,
    ) -> Result<IndexMap<PathBuf, ConfigMapping>> {
        let mut dirs = self.resolve(purpose, ctx)?;
        for dir in self.system_candidates(purpose, ctx)? {
            dirs.push(dir);
        }

        let mut found = IndexMap::new();
        for dir in &dirs {
            for file in readable_files(dir, ctx) {
                let map = load(&file)?;
                tracing::debug!("Loaded {} configuration from {}", purpose, file.display());
                found.insert(file, map);
            }
        }
        Ok(found)
    }

    /// Superimpose everything [`PathResolver::read_all`] finds; top-level keys of more dominant
    /// files replace those of less dominant ones.
    pub fn read_merged(&self, purpose: Purpose, ctx: &ResolverContext) -> Result<ConfigMapping> {
        let mut merged = ConfigMapping::new();
        for (_, map) in self.read_all(purpose, ctx)?.into_iter().rev() {
            merged.extend(map);
        }
        Ok(merged)
    }

    /// Write `map` into the most dominant candidate directory, creating it if needed.
    ///
    /// Same as [`PathResolver::write_config_with`] with [`WriteMode::Overwrite`].
    pub fn write_config(
        &self,
        map: &ConfigMapping,
        purpose: Purpose,
        ctx: &ResolverContext,
    ) -> Result<PathBuf> {
        self.write_config_with(map, purpose, ctx, WriteMode::Overwrite)
    }

    /// Write `map` into the most dominant candidate directory, creating it if needed.
    ///
    /// No other candidate is touched.
    ///
    /// # Returns
    /// Path of the written file.
    pub fn write_config_with(
        &self,
        map: &ConfigMapping,
        purpose: Purpose,
        ctx: &ResolverContext,
        mode: WriteMode,
    ) -> Result<PathBuf> {
        let candidates = self.resolve(purpose, ctx)?;
        let dir = candidates.most_dominant();
        let target = dir.join(ctx.write_file_name());

        let contents = match mode {
            WriteMode::Overwrite => yaml::encode(map)?,
            WriteMode::Fail if target.exists() => {
                return Err(WriteError::AlreadyExists(target).into());
            }
            WriteMode::Fail => yaml::encode(map)?,
            WriteMode::Update => {
                let mut merged = if target.is_file() {
                    load(&target)?
                } else {
                    ConfigMapping::new()
                };
                merged.extend(map.iter().map(|(key, value)| (key.clone(), value.clone())));
                yaml::encode(&merged)?
            }
        };

        dir.mkdir(MkdirOptions::WithParents)
            .map_err(|source| WriteError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        std::fs::write(&target, contents).map_err(|source| WriteError::Write {
            path: target.clone(),
            source,
        })?;

        tracing::info!("Saved {} configuration to {}", purpose, target.display());
        Ok(target)
    }
}

fn resolve_override(custom: &Path, home: &Path) -> Result<PathBuf, PathResolutionError> {
    #[cfg(feature = "expand-user")]
    let custom = &custom.expand_user(home);
    #[cfg(not(feature = "expand-user"))]
    let _ = home;

    let to_error = |source| PathResolutionError::Override {
        path: custom.to_path_buf(),
        source,
    };
    let path = custom.absolutize().map_err(to_error)?;
    #[cfg(feature = "full-resolve")]
    let path = path.full_canonicalize().map_err(to_error)?;
    Ok(path)
}

fn readable_files<'a>(
    dir: &'a Path,
    ctx: &'a ResolverContext,
) -> impl Iterator<Item = PathBuf> + 'a {
    ctx.file_names().map(move |name| dir.join(name)).filter(|file| {
        let readable = file.is_readable_file();
        if !readable && file.exists() {
            tracing::debug!("Skipping unreadable {}", file.display());
        }
        readable
    })
}

fn load(path: &Path) -> Result<ConfigMapping> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    yaml::decode(&text).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_files::error::DecodeError;
    use crate::config_files::value::Value;
    use crate::config_files::HOME_VAR;
    use claim::{assert_err, assert_none, assert_ok, assert_some};
    use std::ffi::OsString;
    use tempfile::{TempDir, tempdir};

    fn env(vars: &[(&str, &Path)]) -> Env {
        Env::from_iter(
            vars.iter()
                .map(|(key, value)| (OsString::from(key), value.as_os_str().to_os_string())),
        )
    }

    /// Resolver whose home is a fresh temporary directory.
    fn sandbox() -> (PathResolver, TempDir) {
        let home = tempdir().expect("needed for tests");
        let resolver = PathResolver::with_env(env(&[(HOME_VAR, home.path())]));
        (resolver, home)
    }

    fn mapping(pairs: &[(&str, &str)]) -> ConfigMapping {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), Value::from(*value)))
            .collect()
    }

    #[cfg(unix)]
    #[test]
    fn xdg_default_then_legacy() {
        let resolver = PathResolver::with_env(env(&[("HOME", Path::new("/home/user"))]));
        let candidates = assert_ok!(resolver.resolve(Purpose::Config, &ResolverContext::new("demo")));
        assert_eq!(
            candidates.as_slice(),
            [
                PathBuf::from("/home/user/.config/demo"),
                PathBuf::from("/home/user/.demo")
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn xdg_variable_dominates_default() {
        let resolver = PathResolver::with_env(env(&[
            ("HOME", Path::new("/home/user")),
            ("XDG_STATE_HOME", Path::new("/var/lib/user-state")),
        ]));
        let candidates = assert_ok!(resolver.resolve(Purpose::State, &ResolverContext::new("demo")));
        assert_eq!(
            candidates.into_vec(),
            vec![
                PathBuf::from("/var/lib/user-state/demo"),
                PathBuf::from("/home/user/.local/state/demo"),
                PathBuf::from("/home/user/.demo"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn override_comes_first() {
        let resolver = PathResolver::with_env(env(&[
            ("HOME", Path::new("/home/user")),
            ("XDG_CACHE_HOME", Path::new("/tmp/cache")),
        ]));
        let ctx = ResolverContext::new("demo").with_override("/srv/demo");
        let candidates = assert_ok!(resolver.resolve(Purpose::Cache, &ctx));
        assert_eq!(candidates.most_dominant(), Path::new("/srv/demo"));
        assert_eq!(candidates.len(), 4);
        assert_eq!(
            candidates.least_dominant_first().next(),
            Some(Path::new("/home/user/.demo"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn duplicates_are_dropped() {
        let resolver = PathResolver::with_env(env(&[
            ("HOME", Path::new("/home/user")),
            ("XDG_CONFIG_HOME", Path::new("/home/user/.config/")),
        ]));
        let ctx = ResolverContext::new("demo").with_override("/home/user/.demo");
        let candidates = assert_ok!(resolver.resolve(Purpose::Config, &ctx));
        assert_eq!(
            candidates.as_slice(),
            [
                PathBuf::from("/home/user/.demo"),
                PathBuf::from("/home/user/.config/demo")
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn relative_xdg_variable_is_ignored() {
        let resolver = PathResolver::with_env(env(&[
            ("HOME", Path::new("/home/user")),
            ("XDG_DATA_HOME", Path::new("share")),
        ]));
        let candidates = assert_ok!(resolver.resolve(Purpose::Data, &ResolverContext::new("demo")));
        assert_eq!(candidates.most_dominant(), Path::new("/home/user/.local/share/demo"));
    }

    #[test]
    fn resolution_is_stable_and_absolute() {
        let (resolver, _home) = sandbox();
        let ctx = ResolverContext::new("demo").with_override("relative/override");
        for purpose in Purpose::ALL {
            let first = assert_ok!(resolver.resolve(purpose, &ctx));
            let second = assert_ok!(resolver.resolve(purpose, &ctx));
            assert_eq!(first, second);
            assert!(!first.is_empty());
            assert!(first.iter().all(|path| path.is_absolute()));
            assert!(first.most_dominant().ends_with("relative/override"));
        }
    }

    #[test]
    fn bad_contexts_are_rejected() {
        let (resolver, _home) = sandbox();
        let resolve = |ctx: ResolverContext| resolver.resolve(Purpose::Config, &ctx);

        let err = assert_err!(resolve(ResolverContext::new("")));
        assert!(matches!(err, PathResolutionError::EmptyApplication));
        let err = assert_err!(resolve(ResolverContext::new("   ")));
        assert!(matches!(err, PathResolutionError::EmptyApplication));
        let err = assert_err!(resolve(ResolverContext::new("a/b")));
        assert!(matches!(err, PathResolutionError::InvalidApplication(_)));
        let err = assert_err!(resolve(ResolverContext::new("..")));
        assert!(matches!(err, PathResolutionError::InvalidApplication(_)));
        let err = assert_err!(resolve(
            ResolverContext::new("demo").with_file_stem("../escape")
        ));
        assert!(matches!(err, PathResolutionError::InvalidFileStem(_)));
        let err = assert_err!(resolve(ResolverContext::new("demo").with_override("")));
        assert!(matches!(err, PathResolutionError::EmptyOverride));
    }

    #[test]
    fn missing_home_is_an_error() {
        let resolver = PathResolver::with_env(Env::empty());
        let err = assert_err!(resolver.resolve(Purpose::Data, &ResolverContext::new("demo")));
        assert!(matches!(err, PathResolutionError::NoHome(_)));
    }

    #[test]
    fn nothing_on_disk_reads_as_none() {
        let (resolver, _home) = sandbox();
        let ctx = ResolverContext::new("demo");
        assert_none!(assert_ok!(resolver.read_config(Purpose::Config, &ctx)));
        assert!(assert_ok!(resolver.read_all(Purpose::Config, &ctx)).is_empty());
    }

    #[test]
    fn write_then_read() {
        let (resolver, home) = sandbox();
        let ctx = ResolverContext::new("demo");
        let mut map = mapping(&[("key", "value")]);
        map.insert("ratio".to_owned(), Value::from(0.25));
        map.insert("scale".to_owned(), Value::from(1e20));
        map.insert(
            "server".to_owned(),
            Value::from(ConfigMapping::from_iter([
                ("port".to_owned(), Value::from(8080)),
                ("weights".to_owned(), Value::from(vec![Value::from(1.5), Value::from(())])),
            ])),
        );

        let written = assert_ok!(resolver.write_config(&map, Purpose::Config, &ctx));
        let candidates = assert_ok!(resolver.resolve(Purpose::Config, &ctx));
        assert_eq!(written, candidates.most_dominant().join("config.yml"));
        assert!(written.starts_with(home.path()));

        let read = assert_some!(assert_ok!(resolver.read_config(Purpose::Config, &ctx)));
        assert_eq!(read, map);
    }

    #[test]
    fn write_creates_missing_parents_and_nothing_else() {
        let (resolver, home) = sandbox();
        let custom = home.path().join("deeply").join("nested").join("dir");
        let ctx = ResolverContext::new("demo").with_override(&custom);

        let written = assert_ok!(resolver.write_config(
            &mapping(&[("a", "b")]),
            Purpose::Data,
            &ctx
        ));
        assert_eq!(written, custom.join("config.yml"));
        assert!(written.is_file());

        let candidates = assert_ok!(resolver.resolve(Purpose::Data, &ctx));
        for other in candidates.iter().skip(1) {
            assert!(!other.exists(), "{} should not exist", other.display());
        }
    }

    #[test]
    fn dominant_file_wins() {
        let (resolver, home) = sandbox();
        let ctx = ResolverContext::new("demo");
        let legacy = home.path().join(".demo");
        assert_ok!(legacy.mkdir(MkdirOptions::WithParents));
        assert_ok!(std::fs::write(legacy.join("config.yml"), "origin: legacy\n"));

        let read = assert_some!(assert_ok!(resolver.read_config(Purpose::Config, &ctx)));
        assert_eq!(read, mapping(&[("origin", "legacy")]));

        assert_ok!(resolver.write_config(&mapping(&[("origin", "xdg")]), Purpose::Config, &ctx));
        let read = assert_some!(assert_ok!(resolver.read_config(Purpose::Config, &ctx)));
        assert_eq!(read, mapping(&[("origin", "xdg")]));
    }

    #[test]
    fn alternative_extension_is_found() {
        let (resolver, home) = sandbox();
        let ctx = ResolverContext::new("demo");
        let legacy = home.path().join(".demo");
        assert_ok!(legacy.mkdir(MkdirOptions::WithParents));
        assert_ok!(std::fs::write(legacy.join("config.yaml"), "ext: yaml\n"));

        let read = assert_some!(assert_ok!(resolver.read_config(Purpose::Config, &ctx)));
        assert_eq!(read, mapping(&[("ext", "yaml")]));
    }

    #[test]
    fn fail_mode_keeps_existing_file() {
        let (resolver, _home) = sandbox();
        let ctx = ResolverContext::new("demo");
        let first = mapping(&[("v", "1")]);
        assert_ok!(resolver.write_config_with(&first, Purpose::State, &ctx, WriteMode::Fail));

        let err = assert_err!(resolver.write_config_with(
            &mapping(&[("v", "2")]),
            Purpose::State,
            &ctx,
            WriteMode::Fail
        ));
        assert!(matches!(err, Error::Write(WriteError::AlreadyExists(_))));
        let read = assert_some!(assert_ok!(resolver.read_config(Purpose::State, &ctx)));
        assert_eq!(read, first);
    }

    #[test]
    fn update_mode_merges_top_level_keys() {
        let (resolver, _home) = sandbox();
        let ctx = ResolverContext::new("demo");
        assert_ok!(resolver.write_config(
            &mapping(&[("kept", "old"), ("changed", "old")]),
            Purpose::Config,
            &ctx
        ));
        assert_ok!(resolver.write_config_with(
            &mapping(&[("changed", "new"), ("added", "new")]),
            Purpose::Config,
            &ctx,
            WriteMode::Update
        ));

        let read = assert_some!(assert_ok!(resolver.read_config(Purpose::Config, &ctx)));
        assert_eq!(
            read,
            mapping(&[("kept", "old"), ("changed", "new"), ("added", "new")])
        );
    }

    #[test]
    fn write_into_a_file_is_reported() {
        let (resolver, home) = sandbox();
        let blocker = home.path().join("blocker");
        assert_ok!(std::fs::write(&blocker, "not a directory"));
        let ctx = ResolverContext::new("demo").with_override(&blocker);

        let err = assert_err!(resolver.write_config(&mapping(&[]), Purpose::Cache, &ctx));
        assert!(matches!(err, Error::Write(WriteError::CreateDir { .. })));
    }

    #[test]
    fn undecodable_file_names_its_path() {
        let (resolver, home) = sandbox();
        let ctx = ResolverContext::new("demo");
        let legacy = home.path().join(".demo");
        assert_ok!(legacy.mkdir(MkdirOptions::WithParents));
        assert_ok!(std::fs::write(legacy.join("config.yml"), "- not\n- a mapping\n"));

        let err = assert_err!(resolver.read_config(Purpose::Config, &ctx));
        match err {
            Error::Decode { path, source } => {
                assert_eq!(path, legacy.join("config.yml"));
                assert!(matches!(source, DecodeError::NotAMapping(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn merged_view_includes_system_directories() {
        let home = tempdir().expect("needed for tests");
        let system = tempdir().expect("needed for tests");
        let resolver = PathResolver::with_env(env(&[
            ("HOME", home.path()),
            ("XDG_CONFIG_DIRS", system.path()),
        ]));
        let ctx = ResolverContext::new("demo");

        let system_dir = system.path().join("demo");
        assert_ok!(system_dir.mkdir(MkdirOptions::WithParents));
        assert_ok!(std::fs::write(
            system_dir.join("config.yml"),
            "shared: system\nsystem_only: here\n"
        ));
        let user = assert_ok!(resolver.write_config(
            &mapping(&[("shared", "user")]),
            Purpose::Config,
            &ctx
        ));

        assert_eq!(
            assert_ok!(resolver.system_candidates(Purpose::Config, &ctx)),
            vec![system_dir.clone()]
        );

        let all = assert_ok!(resolver.read_all(Purpose::Config, &ctx));
        let files: Vec<_> = all.keys().cloned().collect();
        assert_eq!(files, vec![user, system_dir.join("config.yml")]);

        let merged = assert_ok!(resolver.read_merged(Purpose::Config, &ctx));
        assert_eq!(merged["shared"], Value::from("user"));
        assert_eq!(merged["system_only"], Value::from("here"));

        // Plain reads never look at system directories.
        let read = assert_some!(assert_ok!(resolver.read_config(Purpose::Config, &ctx)));
        assert_eq!(read, mapping(&[("shared", "user")]));
    }

    #[cfg(all(unix, feature = "expand-user"))]
    #[test]
    fn override_tilde_uses_snapshot_home() {
        let resolver = PathResolver::with_env(env(&[("HOME", Path::new("/home/user"))]));
        let ctx = ResolverContext::new("demo").with_override("~/custom");
        let candidates = assert_ok!(resolver.resolve(Purpose::Config, &ctx));
        assert!(candidates.most_dominant().ends_with("home/user/custom"));
    }
}
