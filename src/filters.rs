//! Acceptance filters applied before a file is moved.
//!
//! Two gates exist: a pixel-geometry gate for raster images, which decodes
//! only the image header to obtain `(width, height)`, and a byte-size floor
//! derived from the `--size` MB setting. Both gates reject silently at the
//! policy level; the pipeline decides how to log each outcome.

use std::path::Path;

/// Extensions the image gate knows how to decode. Raw photo formats are
/// deliberately absent: they bypass the gate.
const RASTER_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// Dimensions assumed for an undecodable image in lenient mode.
const LENIENT_FALLBACK: (u32, u32) = (3000, 3000);

/// One MB, base 1000. The whole tool counts bytes in powers of 1000.
pub const MB_TO_BYTES: u64 = 1_000_000;

/// Outcome of running a file through the image gate.
#[derive(Debug)]
pub enum GateDecision {
    /// The image meets the dimension and pixel-count thresholds.
    Accept,
    /// The image decoded but is below a threshold.
    TooSmall { width: u32, height: u32 },
    /// The header could not be decoded and lenient mode is off.
    DecodeFailed { reason: String },
}

/// The pixel-geometry acceptance check for raster images.
///
/// Accepts a file iff `width >= min_dimension`, `height >= min_dimension`
/// and `width * height >= min_pixels`. In lenient mode an undecodable file
/// is treated as 3000x3000 and therefore passes: recovered images often have
/// damaged headers, and lenient runs preserve them instead of discarding
/// data.
#[derive(Debug, Clone)]
pub struct ImageGate {
    min_dimension: u32,
    min_pixels: u64,
    lenient: bool,
}

impl ImageGate {
    /// Builds a gate from the configured thresholds.
    ///
    /// `lenient` corresponds to the `--noerrstop` flag.
    pub fn new(min_dimension: u32, min_pixels: u64, lenient: bool) -> Self {
        Self {
            min_dimension,
            min_pixels,
            lenient,
        }
    }

    /// Whether the gate applies to a file with the given extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use reco::filters::ImageGate;
    ///
    /// assert!(ImageGate::applies_to("jpg"));
    /// assert!(ImageGate::applies_to("PNG"));
    /// assert!(!ImageGate::applies_to("nef"));
    /// ```
    pub fn applies_to(ext: &str) -> bool {
        let lower = ext.to_lowercase();
        RASTER_EXTENSIONS.contains(&lower.as_str())
    }

    /// Decodes the file's header and decides acceptance.
    ///
    /// Only the header is read; pixel data is never materialized, and the
    /// file is closed again before this returns, so the subsequent rename is
    /// not blocked by an open handle.
    pub fn evaluate(&self, path: &Path) -> GateDecision {
        let (width, height) = match image::image_dimensions(path) {
            Ok(dims) => dims,
            Err(e) => {
                if self.lenient {
                    LENIENT_FALLBACK
                } else {
                    return GateDecision::DecodeFailed {
                        reason: e.to_string(),
                    };
                }
            }
        };

        let pixels = u64::from(width) * u64::from(height);
        if width < self.min_dimension || height < self.min_dimension || pixels < self.min_pixels {
            GateDecision::TooSmall { width, height }
        } else {
            GateDecision::Accept
        }
    }
}

/// The byte-size floor: a file smaller than `min_mb` megabytes is rejected.
pub fn meets_size_floor(bytes: u64, min_mb: u64) -> bool {
    bytes >= min_mb * MB_TO_BYTES
}
