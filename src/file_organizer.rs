/// Moving files into their planned destinations, journaled to a manifest.
///
/// Every placement is a rename: contents are never copied or rewritten. Each
/// successful move is verified by a stat and then appended as one CSV line to
/// the manifest, so a manifest entry exists if and only if a rename was
/// observed to succeed. Manifest lines appear in rename order.
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// One completed move.
#[derive(Debug, Clone)]
pub struct Operation {
    /// Where the file was before the move.
    pub original_path: PathBuf,
    /// Where the file is now.
    pub new_path: PathBuf,
}

/// Errors that can occur while moving files or writing the journal.
#[derive(Debug)]
pub enum OrganizeError {
    /// Failed to create the destination directory chain.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A file already sits at the computed destination.
    DestinationOccupied { path: PathBuf },
    /// The rename itself failed (includes cross-device failures).
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// The post-move stat could not see the file at its destination.
    MoveNotVerified {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The manifest file could not be created.
    ManifestCreateFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Appending to or flushing the manifest failed.
    ManifestWriteFailed { source: std::io::Error },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::DestinationOccupied { path } => {
                write!(f, "destination {} already exists", path.display())
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::MoveNotVerified { path, source } => {
                write!(
                    f,
                    "moved file not found at {}: {}",
                    path.display(),
                    source
                )
            }
            Self::ManifestCreateFailed { path, source } => {
                write!(
                    f,
                    "could not create actions file {}: {}",
                    path.display(),
                    source
                )
            }
            Self::ManifestWriteFailed { source } => {
                write!(f, "failed to write actions file: {}", source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for move and journal operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// The CSV journal of successful moves.
///
/// Owned exclusively by the mover for the duration of a wet run; nothing
/// else writes to it. Created with truncation, flushed on [`Manifest::finish`].
/// Format: `"<previous>","<new>"` per line, no header. Double quotes inside
/// paths are not escaped.
pub struct Manifest {
    out: BufWriter<File>,
    path: PathBuf,
}

impl Manifest {
    /// Creates (or truncates) the manifest file.
    pub fn create(path: &Path) -> OrganizeResult<Self> {
        let file = File::create(path).map_err(|e| OrganizeError::ManifestCreateFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            out: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    /// Appends one journal line for a completed move.
    pub fn record(&mut self, src: &Path, dest: &Path) -> OrganizeResult<()> {
        writeln!(self.out, "\"{}\",\"{}\"", src.display(), dest.display())
            .map_err(|e| OrganizeError::ManifestWriteFailed { source: e })
    }

    /// Flushes buffered lines out to disk.
    pub fn finish(mut self) -> OrganizeResult<()> {
        self.out
            .flush()
            .map_err(|e| OrganizeError::ManifestWriteFailed { source: e })
    }

    /// The path this manifest writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Executes journaled moves into planned destination directories.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Moves `file` into `dest_dir`, creating the directory chain on demand,
    /// and records the move in the manifest.
    ///
    /// The destination keeps the file's basename. An already-occupied
    /// destination is refused rather than clobbered. After the rename the
    /// destination is stat-verified before the journal line is written; a
    /// crash between rename and journal write leaves an untracked move,
    /// which is tolerated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use reco::file_organizer::{FileOrganizer, Manifest};
    /// use std::path::Path;
    ///
    /// let mut manifest = Manifest::create(Path::new("reco.csv"))?;
    /// let op = FileOrganizer::move_file(
    ///     Path::new("/in/a.jpg"),
    ///     Path::new("/out/photos/2011"),
    ///     &mut manifest,
    /// )?;
    /// println!("moved {} -> {}", op.original_path.display(), op.new_path.display());
    /// # Ok::<(), reco::file_organizer::OrganizeError>(())
    /// ```
    pub fn move_file(
        file: &Path,
        dest_dir: &Path,
        manifest: &mut Manifest,
    ) -> OrganizeResult<Operation> {
        fs::create_dir_all(dest_dir).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: dest_dir.to_path_buf(),
            source: e,
        })?;

        let file_name = file.file_name().ok_or_else(|| OrganizeError::FileMoveFailure {
            source: file.to_path_buf(),
            destination: dest_dir.to_path_buf(),
            source_error: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "file has no name component",
            ),
        })?;
        let destination = dest_dir.join(file_name);

        if destination.exists() {
            return Err(OrganizeError::DestinationOccupied { path: destination });
        }

        fs::rename(file, &destination).map_err(|e| OrganizeError::FileMoveFailure {
            source: file.to_path_buf(),
            destination: destination.clone(),
            source_error: e,
        })?;

        fs::metadata(&destination).map_err(|e| OrganizeError::MoveNotVerified {
            path: destination.clone(),
            source: e,
        })?;

        manifest.record(file, &destination)?;

        Ok(Operation {
            original_path: file.to_path_buf(),
            new_path: destination,
        })
    }
}
