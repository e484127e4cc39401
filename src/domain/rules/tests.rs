// Unit tests for business rules

use super::*;

fn hd() -> FrameSize {
    FrameSize::new(1920, 1080)
}

#[test]
fn test_fit_inside_frame_is_unchanged() {
    let region = CropRegion::new(100, 100, 640, 480);
    assert_eq!(CropFitter::fit(region, hd()).unwrap(), region);
}

#[test]
fn test_fit_clips_to_frame_edges() {
    let region = CropRegion::new(1800, 1000, 640, 480);
    assert_eq!(
        CropFitter::fit(region, hd()).unwrap(),
        CropRegion::new(1800, 1000, 120, 80)
    );
}

#[test]
fn test_fit_outside_frame_fails() {
    let region = CropRegion::new(1920, 0, 10, 10);
    assert!(matches!(
        CropFitter::fit(region, hd()),
        Err(DomainError::CropOutsideFrame { .. })
    ));
}

#[test]
fn test_default_for_small_frame() {
    let frame = FrameSize::new(480, 360);
    assert_eq!(
        CropFitter::default_for(frame).unwrap(),
        CropRegion::new(0, 0, 480, 360)
    );
    assert_eq!(CropFitter::default_for(hd()).unwrap(), CropRegion::DEFAULT);
}

#[test]
fn test_scale_from_display_space() {
    let display = FrameSize::new(1280, 720);
    let region = CropRegion::new(100, 50, 640, 360);
    assert_eq!(
        CropFitter::scale(region, display, hd()),
        CropRegion::new(150, 75, 960, 540)
    );
}

#[test]
fn test_scale_same_size_is_identity() {
    let region = CropRegion::new(3, 5, 7, 9);
    assert_eq!(CropFitter::scale(region, hd(), hd()), region);
}

#[test]
fn test_align_even() {
    let region = CropRegion::new(101, 51, 641, 361);
    assert_eq!(
        CropFitter::align_even(region).unwrap(),
        CropRegion::new(100, 50, 640, 360)
    );
    assert!(matches!(
        CropFitter::align_even(CropRegion::new(0, 0, 1, 100)),
        Err(DomainError::CropTooSmall(_))
    ));
}

#[test]
fn test_resolve_pipeline() {
    let display = FrameSize::new(960, 540);
    let region = CropRegion::new(901, 0, 200, 101);
    // scaled to 1802,0 400x202, clipped to 118 wide, then aligned
    assert_eq!(
        CropFitter::resolve(Some(region), Some(display), hd()).unwrap(),
        CropRegion::new(1802, 0, 118, 202)
    );
    assert_eq!(
        CropFitter::resolve(None, None, hd()).unwrap(),
        CropRegion::DEFAULT
    );
}

fn range(start: &str, end: &str) -> TrimRange {
    TrimRange::new(ClockTime::parse(start).unwrap(), ClockTime::parse(end).unwrap()).unwrap()
}

#[test]
fn test_trim_validator_accepts_range_inside_media() {
    let (validated, warnings) = TrimValidator::validate(range("00:00:10", "00:00:20"), 60.0).unwrap();
    assert_eq!(validated, range("00:00:10", "00:00:20"));
    assert!(warnings.is_empty());
}

#[test]
fn test_trim_validator_clamps_end() {
    let (validated, warnings) = TrimValidator::validate(range("00:00:10", "00:02:00"), 60.0).unwrap();
    assert_eq!(validated.end.as_seconds(), 60.0);
    assert_eq!(warnings.len(), 1);
}

#[test]
fn test_trim_validator_sub_millisecond_duration() {
    let end = ClockTime::from_seconds(10.0006);
    let requested = TrimRange::new(ClockTime::from_seconds(5.0), end).unwrap();

    let (validated, warnings) = TrimValidator::validate(requested, 10.0006).unwrap();
    assert_eq!(validated, requested);
    assert!(warnings.is_empty());

    let past = TrimRange::new(ClockTime::from_seconds(5.0), ClockTime::from_seconds(10.5)).unwrap();
    let (validated, warnings) = TrimValidator::validate(past, 10.0006).unwrap();
    assert_eq!(validated.end, end);
    assert_eq!(warnings.len(), 1);
}

#[test]
fn test_trim_validator_rejects_start_past_end() {
    assert!(matches!(
        TrimValidator::validate(range("00:01:00", "00:02:00"), 60.0),
        Err(DomainError::StartBeyondEnd { .. })
    ));
}

#[test]
fn test_trim_validator_unknown_duration() {
    let (validated, warnings) = TrimValidator::validate(range("00:01:00", "00:02:00"), 0.0).unwrap();
    assert_eq!(validated, range("00:01:00", "00:02:00"));
    assert!(warnings.is_empty());
}

#[test]
fn test_output_names() {
    let input = Path::new("/videos/holiday.mov");
    assert_eq!(
        OutputNamer::for_crop(input, &CropRegion::new(0, 0, 540, 720)),
        PathBuf::from("/videos/holiday_crop_540x720.mov")
    );
    assert_eq!(
        OutputNamer::for_trim(input, &range("00:00:10", "00:01:05")),
        PathBuf::from("/videos/holiday_trim_00h00m10s-00h01m05s.mov")
    );
    assert_eq!(
        OutputNamer::for_preview(input, &ClockTime::from_seconds(5.0)),
        PathBuf::from("/videos/holiday_preview_00h00m05s.png")
    );
}

#[test]
fn test_output_name_without_extension() {
    assert_eq!(
        OutputNamer::for_crop(Path::new("clip"), &CropRegion::DEFAULT),
        PathBuf::from("clip_crop_540x720.mp4")
    );
}
