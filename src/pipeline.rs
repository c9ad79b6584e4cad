//! The per-candidate processing pipeline.
//!
//! Sequences enumeration, classification, the gates, planning and the move
//! for every candidate, and centralizes the fatal vs. non-fatal decision:
//! components surface typed failures, and only this driver consults
//! `noerrstop` to demote a move failure to a logged skip.

use crate::config::{Config, ConfigError};
use crate::file_category::Category;
use crate::file_organizer::{FileOrganizer, Manifest, OrganizeError};
use crate::filters::{GateDecision, ImageGate, meets_size_floor};
use crate::output::{Logger, create_progress_bar, format_bytes};
use crate::planner::plan_destination;
use crate::scanner::{ScanError, collect_candidates};
use std::path::Path;

/// Counters reported at the end of a run.
///
/// Dry runs count planned placements the same way wet runs count moves.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    /// Files moved (or, dry, files that would have been moved).
    pub moved: u64,
    /// Cumulative byte size of those files.
    pub bytes_moved: u64,
    /// Candidates skipped by a gate or a non-fatal error.
    pub skipped: u64,
}

/// A condition that aborts the run. Mapped to exit code 1 by the binary.
#[derive(Debug)]
pub enum PipelineError {
    /// Broken or empty pattern list.
    Config(ConfigError),
    /// Missing or unreadable source root.
    Scan(ScanError),
    /// Enumeration produced nothing.
    NoCandidates { patterns: Vec<String> },
    /// A move or manifest failure not demoted by `noerrstop`.
    Organize(OrganizeError),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Config(e) => write!(f, "{}", e),
            PipelineError::Scan(e) => write!(f, "{}", e),
            PipelineError::NoCandidates { patterns } => {
                write!(f, "no files found with patterns {:?}", patterns)
            }
            PipelineError::Organize(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<ConfigError> for PipelineError {
    fn from(e: ConfigError) -> Self {
        PipelineError::Config(e)
    }
}

impl From<ScanError> for PipelineError {
    fn from(e: ScanError) -> Self {
        PipelineError::Scan(e)
    }
}

impl From<OrganizeError> for PipelineError {
    fn from(e: OrganizeError) -> Self {
        PipelineError::Organize(e)
    }
}

/// Runs the whole pipeline for one configuration.
///
/// Single-threaded: candidates are processed in enumeration order, and the
/// manifest receives lines in the order the renames succeed.
pub fn run(cfg: &Config, logger: &mut Logger) -> Result<RunSummary, PipelineError> {
    logger.info("starting reco");
    logger.print(&format!("logLevel: {}, dry: {}", cfg.verbose, cfg.dry));

    let patterns = cfg.compile_patterns()?;
    logger.debug(&format!(
        "looking for {:?} in dir: {}",
        patterns.describe(),
        cfg.dir.display()
    ));

    let candidates = collect_candidates(&cfg.dir, cfg.recursive, &patterns)?;
    logger.info(&format!("finished getting {} files", candidates.len()));
    logger.debug(&format!("files: {:?}", candidates));

    if candidates.is_empty() {
        return Err(PipelineError::NoCandidates {
            patterns: patterns.describe(),
        });
    }

    // The manifest only exists for wet runs, and only once candidates are
    // known; the mover is its sole writer.
    let mut manifest = if cfg.dry {
        None
    } else {
        Some(Manifest::create(&cfg.actions)?)
    };

    let gate = ImageGate::new(cfg.dimension_min, cfg.size_pixel_min, cfg.noerrstop);
    let mut summary = RunSummary::default();

    logger.attach_progress(create_progress_bar(candidates.len() as u64));

    for file in &candidates {
        logger.tick_progress();
        match process_candidate(file, cfg, &gate, manifest.as_mut(), logger)? {
            Some(bytes) => {
                summary.moved += 1;
                summary.bytes_moved += bytes;
            }
            None => summary.skipped += 1,
        }
    }

    logger.finish_progress();

    if let Some(manifest) = manifest {
        manifest.finish()?;
    }

    logger.info(&format!(
        "processed {} files ({})",
        summary.moved,
        format_bytes(summary.bytes_moved)
    ));

    Ok(summary)
}

/// Processes one candidate end to end.
///
/// Returns `Ok(Some(bytes))` when the file was moved (or dry-planned),
/// `Ok(None)` when a gate or a non-fatal error skipped it, and `Err` for
/// fatal conditions.
fn process_candidate(
    file: &Path,
    cfg: &Config,
    gate: &ImageGate,
    manifest: Option<&mut Manifest>,
    logger: &Logger,
) -> Result<Option<u64>, PipelineError> {
    let ext = file
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let category = Category::from_extension(&ext);

    // Raster images must clear the pixel-geometry gate; raw photo formats
    // and everything else bypass it.
    if ImageGate::applies_to(&ext) {
        match gate.evaluate(file) {
            GateDecision::Accept => {}
            GateDecision::TooSmall { .. } => {
                logger.debug(&format!("pixel size of {} too small", file.display()));
                return Ok(None);
            }
            GateDecision::DecodeFailed { reason } => {
                logger.error(&format!("decoding {}: {}", file.display(), reason));
                return Ok(None);
            }
        }
    }

    let meta = match std::fs::metadata(file) {
        Ok(meta) => meta,
        Err(e) => {
            logger.error(&format!("getting stats for {}: {}", file.display(), e));
            return Ok(None);
        }
    };

    let size = meta.len();
    if !meets_size_floor(size, cfg.size_mb) {
        logger.debug(&format!(
            "skipping file {}: {} too small",
            file.display(),
            format_bytes(size)
        ));
        return Ok(None);
    }

    let mtime = meta.modified().unwrap_or(std::time::SystemTime::UNIX_EPOCH);
    let source_dir = file.parent().unwrap_or_else(|| Path::new(""));
    let plan = plan_destination(category, source_dir, mtime, cfg);
    let dest_dir = cfg.output.join(&plan);

    // No manifest means a dry run: the placement is only reported.
    let Some(manifest) = manifest else {
        logger.info(&format!(
            "{{dry}} not moving {} -> {}",
            file.display(),
            dest_dir.display()
        ));
        return Ok(Some(size));
    };

    logger.debug(&format!(
        "moving {} -> {}",
        file.display(),
        dest_dir.display()
    ));
    match FileOrganizer::move_file(file, &dest_dir, manifest) {
        Ok(_) => Ok(Some(size)),
        Err(e) => {
            if cfg.noerrstop {
                logger.error(&format!(
                    "error moving {} -> {}: {}",
                    file.display(),
                    dest_dir.display(),
                    e
                ));
                Ok(None)
            } else {
                Err(e.into())
            }
        }
    }
}
