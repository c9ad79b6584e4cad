//! Destination path planning.
//!
//! Composes the relative destination directory for a file as
//! `<category>[/<year>][/<month>][/<source basename>]`. The plan is a pure
//! function of the file's category, modification time, source directory and
//! the configuration; it never looks at other files in the batch.

use crate::config::Config;
use crate::file_category::Category;
use chrono::{DateTime, Datelike, Local};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

/// Computes the destination directory, relative to the output root.
///
/// `source_dir` is the directory the file currently lives in. The year is
/// the Gregorian year of `mtime` in local time; the month is the full
/// English month name.
///
/// With `keepfolder` set, the source directory's basename is appended unless
/// it already equals the last plan segment or the source directory is the
/// configured root itself. That suppresses paths like `photos/2011/2011/`
/// when the source tree was already filed by year.
pub fn plan_destination(
    category: Category,
    source_dir: &Path,
    mtime: SystemTime,
    cfg: &Config,
) -> PathBuf {
    let mut plan = PathBuf::from(category.dir_name());
    let mut last_segment = category.dir_name().to_string();

    if cfg.year || cfg.month {
        let stamp: DateTime<Local> = mtime.into();
        if cfg.year {
            let year = stamp.year().to_string();
            plan.push(&year);
            last_segment = year;
        }
        if cfg.month {
            let month = stamp.format("%B").to_string();
            plan.push(&month);
            last_segment = month;
        }
    }

    if cfg.keepfolder {
        let folder_name = source_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if !folder_name.is_empty()
            && folder_name != last_segment
            && !same_cleaned_path(source_dir, &cfg.dir)
        {
            plan.push(&folder_name);
        }
    }

    plan
}

/// Compares two paths after component normalization, so `./in/` and `in`
/// are the same root.
fn same_cleaned_path(a: &Path, b: &Path) -> bool {
    fn clean<'p>(p: &'p Path) -> Vec<Component<'p>> {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }
    clean(a) == clean(b)
}
