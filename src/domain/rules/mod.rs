// Domain rules - Crop geometry, trim validation and output naming

use std::path::{Path, PathBuf};

use crate::domain::errors::*;
use crate::domain::model::*;

/// Rules for mapping a selected rectangle onto real frame pixels
pub struct CropFitter;

impl CropFitter {
    /// Intersect the region with the frame rectangle
    pub fn fit(region: CropRegion, frame: FrameSize) -> Result<CropRegion, DomainError> {
        let right = region.right().min(frame.width as u64);
        let bottom = region.bottom().min(frame.height as u64);

        if region.x as u64 >= right || region.y as u64 >= bottom {
            return Err(DomainError::CropOutsideFrame {
                region: region.to_string(),
                frame: frame.to_string(),
            });
        }

        Ok(CropRegion {
            x: region.x,
            y: region.y,
            width: (right - region.x as u64) as u32,
            height: (bottom - region.y as u64) as u32,
        })
    }

    /// Scale a region selected on a `display`-sized surface into `source` pixels
    pub fn scale(region: CropRegion, display: FrameSize, source: FrameSize) -> CropRegion {
        if display == source {
            return region;
        }

        let sx = source.width as f64 / display.width as f64;
        let sy = source.height as f64 / display.height as f64;
        let scale = |value: u32, factor: f64| (value as f64 * factor).round() as u32;

        CropRegion {
            x: scale(region.x, sx),
            y: scale(region.y, sy),
            width: scale(region.width, sx),
            height: scale(region.height, sy),
        }
    }

    /// Round every edge down to an even pixel; 4:2:0 encoders reject odd sizes
    pub fn align_even(region: CropRegion) -> Result<CropRegion, DomainError> {
        let aligned = CropRegion {
            x: region.x & !1,
            y: region.y & !1,
            width: region.width & !1,
            height: region.height & !1,
        };

        if aligned.width == 0 || aligned.height == 0 {
            return Err(DomainError::CropTooSmall(region.to_string()));
        }
        Ok(aligned)
    }

    /// The default selection, fitted to the frame
    pub fn default_for(frame: FrameSize) -> Result<CropRegion, DomainError> {
        Self::fit(CropRegion::DEFAULT, frame)
    }

    /// Full pipeline: pick the region, scale it from display space, fit it, align it
    pub fn resolve(
        requested: Option<CropRegion>,
        display: Option<FrameSize>,
        frame: FrameSize,
    ) -> Result<CropRegion, DomainError> {
        let region = match (requested, display) {
            (Some(region), Some(display)) => Self::fit(Self::scale(region, display, frame), frame)?,
            (Some(region), None) => Self::fit(region, frame)?,
            (None, _) => Self::default_for(frame)?,
        };
        Self::align_even(region)
    }
}

/// Rules for checking a trim range against the media it cuts
pub struct TrimValidator;

impl TrimValidator {
    /// Validate `range` against `media_duration` seconds.
    ///
    /// A range whose end runs past the media is clamped; the warning explains
    /// the adjustment. An unknown (zero) duration skips validation.
    pub fn validate(
        range: TrimRange,
        media_duration: f64,
    ) -> Result<(TrimRange, Vec<String>), DomainError> {
        let mut warnings = Vec::new();

        if media_duration <= 0.0 {
            return Ok((range, warnings));
        }

        // compare at the millisecond precision ClockTime carries
        let duration = ClockTime::from_seconds(media_duration);
        let limit = duration.as_seconds();
        if range.start.as_seconds() >= limit {
            return Err(DomainError::StartBeyondEnd {
                start: range.start.to_string(),
                duration: duration.to_string(),
            });
        }

        if range.end.as_seconds() > limit {
            warnings.push(format!(
                "End time {} is past the end of the video; clamped to {}",
                range.end, duration
            ));
            let clamped = TrimRange::new(range.start, duration)?;
            return Ok((clamped, warnings));
        }

        Ok((range, warnings))
    }
}

/// Default output file names, placed next to the input
pub struct OutputNamer;

impl OutputNamer {
    const FALLBACK_EXTENSION: &'static str = "mp4";

    pub fn for_crop(input: &Path, region: &CropRegion) -> PathBuf {
        Self::sibling(
            input,
            &format!("crop_{}x{}", region.width, region.height),
            None,
        )
    }

    pub fn for_trim(input: &Path, range: &TrimRange) -> PathBuf {
        Self::sibling(
            input,
            &format!(
                "trim_{}-{}",
                range.start.to_file_stamp(),
                range.end.to_file_stamp()
            ),
            None,
        )
    }

    pub fn for_preview(input: &Path, at: &ClockTime) -> PathBuf {
        Self::sibling(
            input,
            &format!("preview_{}", at.to_file_stamp()),
            Some("png"),
        )
    }

    fn sibling(input: &Path, suffix: &str, extension: Option<&str>) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        let extension = extension.map(str::to_string).unwrap_or_else(|| {
            input
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_else(|| Self::FALLBACK_EXTENSION.to_string())
        });

        input.with_file_name(format!("{}_{}.{}", stem, suffix, extension))
    }
}

#[cfg(test)]
mod tests;
