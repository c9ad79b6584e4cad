//! Command-line interface for reco.
//!
//! Defines the flag surface, handles the interactive fallback when `--dir`
//! is missing, and converts the parsed arguments into the immutable
//! [`Config`] snapshot the rest of the crate runs on.

use crate::config::Config;
use clap::{ArgAction, Parser};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Organize recovered files super easy.
///
/// reco only moves files to a directory. It does not copy nor modify files.
/// reco can decode jpeg/png/bmp files to apply size filters.
#[derive(Debug, Parser)]
#[command(name = "reco")]
#[command(after_help = "Example:\n    reco -r=false -d ./unorganizedPhotos --month")]
pub struct Cli {
    /// Directory in which to search for files
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Directory in which to organize files to
    #[arg(short, long, default_value = "./recovered")]
    pub output: PathBuf,

    /// Matching shell file patterns. Separate patterns with commas
    #[arg(short = 't', long, default_value = "*.jpg,*.jpeg,*.mov")]
    pub ext: String,

    /// Search for files in subdirectories
    #[arg(
        short,
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub recursive: bool,

    /// Filename to write actions performed for a wet run.
    /// CSV format: "Previous location","New location"
    #[arg(long, default_value = "reco.csv")]
    pub actions: PathBuf,

    /// Log level. The higher, the more verbose. Errors:1, Info:2, Print:3, Debug:4
    #[arg(short = 'V', long, default_value_t = 2)]
    pub verbose: u8,

    /// Dry run moves nothing but still errors and shows verbose output
    #[arg(long)]
    pub dry: bool,

    /// Do not interrupt file moving due to non-fatal errors
    #[arg(long)]
    pub noerrstop: bool,

    /// Keep base folder name of file when moving. Automatically avoids
    /// duplicate names such as '/2011/2011/a.jpg'
    #[arg(short, long)]
    pub keepfolder: bool,

    /// Organize files by year (year directory)
    #[arg(
        short,
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub year: bool,

    /// Organize files by month (month directory)
    #[arg(
        short,
        long,
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub month: bool,

    /// Dimension minimum for images, applied to width and height
    #[arg(long = "dimensionMin", default_value_t = 300)]
    pub dimension_min: u32,

    /// Minimum filesize in MB
    #[arg(long = "size", default_value_t = 0)]
    pub size_mb: u64,

    /// Minimum number of pixels in an image to be processed (jpeg/png/bmp).
    /// Divide by a million to get megapixels
    #[arg(long = "sizeMin", default_value_t = 100_000)]
    pub size_pixel_min: u64,
}

impl Cli {
    /// Turns the parsed arguments into the run configuration.
    ///
    /// When `--dir` is absent, the user is prompted for a directory on
    /// standard input and the run is forced into dry mode, so a hesitant
    /// interactive session can never move anything.
    pub fn into_config(self) -> io::Result<Config> {
        let (dir, dry) = match self.dir {
            Some(dir) => (dir, self.dry),
            None => (prompt_for_dir()?, true),
        };

        Ok(Config {
            dir,
            output: self.output,
            ext: self.ext,
            recursive: self.recursive,
            actions: self.actions,
            verbose: self.verbose,
            dry,
            noerrstop: self.noerrstop,
            keepfolder: self.keepfolder,
            year: self.year,
            month: self.month,
            dimension_min: self.dimension_min,
            size_mb: self.size_mb,
            size_pixel_min: self.size_pixel_min,
        })
    }
}

/// Asks for a source directory on stdin.
fn prompt_for_dir() -> io::Result<PathBuf> {
    print!(
        "-d or --dir flag is required, reco will now run in dry mode! \
         Run `reco -h` for help.\nType in desired directory: "
    );
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(PathBuf::from(line.trim()))
}
