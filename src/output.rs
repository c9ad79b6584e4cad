//! Output formatting and leveled logging.
//!
//! All user-visible output goes through the [`Logger`]: lines are tagged
//! `[debu]`, `[prin]`, `[info]`, `[erro]` or `[fata]` and filtered by the
//! configured verbosity (1 errors, 2 info, 3 print, 4 debug). Tags are
//! colored; everything is written to standard output.
//!
//! While a progress bar is attached, log lines are routed through it so they
//! do not tear the bar.

use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Leveled, tagged logger for the whole run.
pub struct Logger {
    level: u8,
    progress: Option<ProgressBar>,
}

impl Logger {
    /// Creates a logger for the given verbosity level (1..=4).
    pub fn new(level: u8) -> Self {
        Self {
            level,
            progress: None,
        }
    }

    /// Routes subsequent log lines through a progress bar.
    pub fn attach_progress(&mut self, progress: ProgressBar) {
        self.progress = Some(progress);
    }

    /// Detaches and finishes the progress bar, if any.
    pub fn finish_progress(&mut self) {
        if let Some(progress) = self.progress.take() {
            progress.finish_and_clear();
        }
    }

    /// Advances the attached progress bar by one tick.
    pub fn tick_progress(&self) {
        if let Some(progress) = &self.progress {
            progress.inc(1);
        }
    }

    /// Debug line, level 4 and up.
    pub fn debug(&self, message: &str) {
        if self.level >= 4 {
            self.emit("debu".dimmed(), message);
        }
    }

    /// Print line, level 3 and up.
    pub fn print(&self, message: &str) {
        if self.level >= 3 {
            self.emit("prin".normal(), message);
        }
    }

    /// Info line, level 2 and up.
    pub fn info(&self, message: &str) {
        if self.level >= 2 {
            self.emit("info".cyan(), message);
        }
    }

    /// Error line, level 1 and up.
    pub fn error(&self, message: &str) {
        if self.level >= 1 {
            self.emit("erro".red(), message);
        }
    }

    /// Fatal line, never filtered. The caller decides to exit.
    pub fn fatal(&self, message: &str) {
        self.emit("fata".red().bold(), message);
    }

    fn emit(&self, tag: ColoredString, message: &str) {
        let line = format!("[{}] {}", tag, message);
        match &self.progress {
            Some(progress) => progress.println(line),
            None => println!("{}", line),
        }
    }
}

/// Creates the progress bar used while working through a candidate batch.
///
/// Drawn on standard output so it shares a stream with the log lines.
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stdout());
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("█▓░"),
    );
    pb
}

/// Formats a byte count in base-1000 units.
///
/// Below 1000 bytes the count is exact; above, one decimal place with the
/// suffixes `kB, MB, GB, TB, PB, EB`.
///
/// # Examples
///
/// ```
/// use reco::output::format_bytes;
///
/// assert_eq!(format_bytes(999), "999 B");
/// assert_eq!(format_bytes(1_500_000), "1.5 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNIT: u64 = 1000;
    if bytes < UNIT {
        return format!("{} B", bytes);
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    const SUFFIXES: [&str; 6] = ["kB", "MB", "GB", "TB", "PB", "EB"];
    format!("{:.1} {}", bytes as f64 / div as f64, SUFFIXES[exp])
}
