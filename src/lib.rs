//! reco - organize recovered files into a tidy destination tree
//!
//! This library classifies files by extension, filters raster images by
//! pixel geometry, plans destination paths by category and modification
//! date, and moves files into place while journaling every move to a CSV
//! manifest. Files are only ever renamed, never copied or rewritten.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod filters;
pub mod output;
pub mod pipeline;
pub mod planner;
pub mod scanner;

pub use config::{Config, ConfigError, PatternSet};
pub use file_category::Category;
pub use file_organizer::{FileOrganizer, Manifest, OrganizeError};
pub use filters::ImageGate;
pub use pipeline::{PipelineError, RunSummary, run};

pub use cli::Cli;
