// Application layer - Use case interactors

pub mod container;
pub mod crop_interactor;
pub mod inspect_interactor;
mod output;
pub mod preview_interactor;
pub mod trim_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use crop_interactor::{CropInteractor, CropRequest, CropResponse};
pub use inspect_interactor::{InspectFormat, InspectInteractor, InspectRequest, InspectResponse};
pub use preview_interactor::{PreviewAt, PreviewInteractor, PreviewRequest, PreviewResponse};
pub use trim_interactor::{TrimInteractor, TrimRequest, TrimResponse};

use crate::domain::errors::DomainError;
use crate::domain::model::{ClockTime, TrimRange};
use crate::domain::rules::TrimValidator;

/// Parse a user timestamp, strictly or with form-field leniency
pub(crate) fn parse_clock(text: &str, lenient: bool) -> Result<ClockTime, DomainError> {
    if lenient {
        Ok(ClockTime::parse_lenient(text))
    } else {
        ClockTime::parse(text)
    }
}

/// Optional start/end pair into a validated range.
///
/// A missing start means the beginning of the video, a missing end its
/// duration. Neither given means no range.
pub(crate) fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    media_duration: f64,
    lenient: bool,
) -> Result<(Option<TrimRange>, Vec<String>), DomainError> {
    if start.is_none() && end.is_none() {
        return Ok((None, Vec::new()));
    }

    let start = start
        .map(|s| parse_clock(s, lenient))
        .transpose()?
        .unwrap_or_default();
    let end = match end {
        Some(e) => parse_clock(e, lenient)?,
        None => ClockTime::from_seconds(media_duration),
    };

    let (range, warnings) = TrimValidator::validate(TrimRange::new(start, end)?, media_duration)?;
    Ok((Some(range), warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_range_none() {
        let (range, warnings) = resolve_range(None, None, 60.0, false).unwrap();
        assert!(range.is_none());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_resolve_range_open_end() {
        let (range, _) = resolve_range(Some("00:00:30"), None, 60.0, false).unwrap();
        let range = range.unwrap();
        assert_eq!(range.start.as_seconds(), 30.0);
        assert_eq!(range.end.as_seconds(), 60.0);
    }

    #[test]
    fn test_resolve_range_open_end_without_false_clamp() {
        let (range, warnings) = resolve_range(Some("5"), None, 10.0006, false).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(range.unwrap().end, ClockTime::from_seconds(10.0006));
    }

    #[test]
    fn test_resolve_range_open_start() {
        let (range, _) = resolve_range(None, Some("10"), 60.0, false).unwrap();
        assert_eq!(range.unwrap().duration_seconds(), 10.0);
    }

    #[test]
    fn test_resolve_range_lenient_fields() {
        assert!(resolve_range(Some("00:75:00"), Some("00:00:20"), 60.0, false).is_err());
        let (range, _) = resolve_range(Some("00:75:00"), Some("00:00:20"), 60.0, true).unwrap();
        assert_eq!(range.unwrap().start.as_seconds(), 0.0);
    }
}
