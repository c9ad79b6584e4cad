//! Run configuration and file pattern matching.
//!
//! The whole run is driven by a single immutable [`Config`] snapshot built
//! once at startup. No component mutates it afterwards; everything downstream
//! takes it by shared reference.
//!
//! Pattern matching works on pre-compiled glob patterns: the comma-separated
//! `--ext` list is split and every chunk is compiled and validated up front,
//! so that matching never reparses patterns and malformed input fails before
//! any file is touched.

use glob::Pattern;
use std::path::PathBuf;

/// Errors that can occur while building the run configuration.
///
/// All of these are fatal: the run must not start with a broken pattern set.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// The `--ext` list contained no usable pattern.
    NoPattern,
    /// A glob pattern could not be compiled.
    MalformedPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The reason reported by the glob compiler.
        reason: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoPattern => write!(f, "no pattern for --ext found"),
            ConfigError::MalformedPattern { pattern, reason } => {
                write!(f, "pattern {} may be malformed: {}", pattern, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Immutable snapshot of every recognized option.
///
/// Constructed once (from the CLI surface or directly in tests), read by
/// every component, dropped at process exit.
#[derive(Debug, Clone)]
pub struct Config {
    /// Source root to search for files.
    pub dir: PathBuf,
    /// Destination root; created on demand during a wet run.
    pub output: PathBuf,
    /// Raw comma-separated glob list, e.g. `*.jpg,*.jpeg,*.mov`.
    pub ext: String,
    /// Walk the whole subtree instead of only the immediate children.
    pub recursive: bool,
    /// Path of the CSV manifest written during a wet run.
    pub actions: PathBuf,
    /// Log verbosity, 1 (errors) to 4 (debug).
    pub verbose: u8,
    /// Plan everything but move nothing and write no manifest.
    pub dry: bool,
    /// Continue past non-fatal errors instead of aborting.
    pub noerrstop: bool,
    /// Append the source folder basename to the destination subpath.
    pub keepfolder: bool,
    /// Add a year segment to the destination subpath.
    pub year: bool,
    /// Add a month-name segment to the destination subpath.
    pub month: bool,
    /// Per-axis pixel minimum for raster images.
    pub dimension_min: u32,
    /// Minimum file size in MB (base 1000).
    pub size_mb: u64,
    /// Minimum total pixel count for raster images.
    pub size_pixel_min: u64,
}

impl Config {
    /// Compiles the `--ext` list into a [`PatternSet`].
    pub fn compile_patterns(&self) -> Result<PatternSet, ConfigError> {
        PatternSet::compile(&self.ext)
    }
}

/// A compiled set of shell-glob patterns acting as an acceptance predicate.
///
/// `*`, `?` and `[...]` follow conventional shell globbing. The default glob
/// match options are used, so `*` may also cross `/`; recursive enumeration
/// relies on that to match `*.jpg` against a full path like `in/a.jpg`.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Splits a raw comma-separated pattern string and compiles every chunk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPattern`] if no non-empty chunk remains and
    /// [`ConfigError::MalformedPattern`] on the first chunk that fails to
    /// compile.
    pub fn compile(raw: &str) -> Result<Self, ConfigError> {
        let patterns = raw
            .split(',')
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| {
                Pattern::new(chunk).map_err(|e| ConfigError::MalformedPattern {
                    pattern: chunk.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if patterns.is_empty() {
            return Err(ConfigError::NoPattern);
        }

        Ok(Self { patterns })
    }

    /// Checks a path (or bare filename) against the set.
    ///
    /// Backslashes are replaced with forward slashes before matching, so
    /// paths read the same on every platform.
    pub fn matches(&self, path: &str) -> bool {
        let normalized = path.replace('\\', "/");
        self.patterns.iter().any(|p| p.matches(&normalized))
    }

    /// The source text of every compiled pattern, for log messages.
    pub fn describe(&self) -> Vec<String> {
        self.patterns.iter().map(|p| p.to_string()).collect()
    }
}
