// Unit tests for domain models

use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_clock_time_parse_hh_mm_ss() {
    let time = ClockTime::parse("01:02:03").unwrap();
    assert_eq!(time.hours, 1);
    assert_eq!(time.minutes, 2);
    assert!(approx(time.seconds, 3.0));
    assert!(approx(time.as_seconds(), 3723.0));
}

#[test]
fn test_clock_time_parse_fractional() {
    let time = ClockTime::parse("00:01:30.5").unwrap();
    assert!(approx(time.as_seconds(), 90.5));

    let time = ClockTime::parse("01:30.250").unwrap();
    assert!(approx(time.as_seconds(), 90.25));
}

#[test]
fn test_clock_time_parse_plain_seconds_normalizes() {
    let time = ClockTime::parse("3725").unwrap();
    assert_eq!(time.hours, 1);
    assert_eq!(time.minutes, 2);
    assert!(approx(time.seconds, 5.0));
}

#[test]
fn test_clock_time_parse_invalid() {
    assert!(ClockTime::parse("").is_err());
    assert!(ClockTime::parse("abc").is_err());
    assert!(ClockTime::parse("-10").is_err());
    assert!(ClockTime::parse("00:60:00").is_err());
    assert!(ClockTime::parse("00:00:60").is_err());
    assert!(ClockTime::parse("1:2:3:4").is_err());
    assert!(ClockTime::parse("1:.5").is_err());
    assert!(ClockTime::parse("+1:00").is_err());
}

#[test]
fn test_clock_time_display() {
    assert_eq!(ClockTime::parse("1:2:3").unwrap().to_string(), "01:02:03");
    assert_eq!(ClockTime::from_seconds(3723.456).to_string(), "01:02:03.456");
    assert_eq!(ClockTime::from_seconds(0.0).to_string(), "00:00:00");
}

#[test]
fn test_clock_time_ffmpeg_and_file_stamp() {
    let time = ClockTime::from_seconds(90.5);
    assert_eq!(time.to_ffmpeg(), "00:01:30.500");
    assert_eq!(time.to_file_stamp(), "00h01m30s");
}

#[test]
fn test_clock_time_from_fields_blank_is_zero() {
    let time = ClockTime::from_fields("", "", "");
    assert_eq!(time, ClockTime::default());

    let time = ClockTime::from_fields("", "1", "");
    assert!(approx(time.as_seconds(), 60.0));
}

#[test]
fn test_clock_time_from_fields_out_of_range_becomes_zero() {
    let time = ClockTime::from_fields("2", "75", "59");
    assert_eq!(time.hours, 2);
    assert_eq!(time.minutes, 0);
    assert!(approx(time.seconds, 59.0));

    let time = ClockTime::from_fields("0", "5", "x");
    assert_eq!(time.minutes, 5);
    assert!(approx(time.seconds, 0.0));

    // hours are free-form
    let time = ClockTime::from_fields("120", "0", "0");
    assert_eq!(time.hours, 120);
}

#[test]
fn test_clock_time_parse_lenient() {
    let time = ClockTime::parse_lenient("1:99:30");
    assert_eq!(time.hours, 1);
    assert_eq!(time.minutes, 0);
    assert!(approx(time.seconds, 30.0));

    let time = ClockTime::parse_lenient("45");
    assert!(approx(time.as_seconds(), 45.0));
}

#[test]
fn test_sanitize_clock_field() {
    assert_eq!(sanitize_clock_field("0"), 0);
    assert_eq!(sanitize_clock_field("07"), 7);
    assert_eq!(sanitize_clock_field("59"), 59);
    assert_eq!(sanitize_clock_field("60"), 0);
    assert_eq!(sanitize_clock_field("123"), 0);
    assert_eq!(sanitize_clock_field("-1"), 0);
}

#[test]
fn test_format_clock() {
    assert_eq!(format_clock(0.0), "00:00:00");
    assert_eq!(format_clock(59.99), "00:00:59");
    assert_eq!(format_clock(3725.9), "01:02:05");
    assert_eq!(format_clock(-4.0), "00:00:00");
    assert_eq!(format_clock(f64::NAN), "00:00:00");
}

#[test]
fn test_trim_range_duration() {
    let range = TrimRange::new(
        ClockTime::parse("00:00:10").unwrap(),
        ClockTime::parse("00:01:00").unwrap(),
    )
    .unwrap();
    assert!(approx(range.duration_seconds(), 50.0));
}

#[test]
fn test_trim_range_end_before_start() {
    let err = TrimRange::new(
        ClockTime::parse("00:01:00").unwrap(),
        ClockTime::parse("00:00:10").unwrap(),
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::EndBeforeStart { .. }));
}

#[test]
fn test_trim_range_empty() {
    let t = ClockTime::parse("00:00:10").unwrap();
    assert!(matches!(TrimRange::new(t, t), Err(DomainError::EmptyRange(_))));
}

#[test]
fn test_crop_region_parse_forms() {
    assert_eq!(CropRegion::parse("640x480").unwrap(), CropRegion::new(0, 0, 640, 480));
    assert_eq!(
        CropRegion::parse("640x480+10+20").unwrap(),
        CropRegion::new(10, 20, 640, 480)
    );
    assert_eq!(
        CropRegion::parse("640:480:10:20").unwrap(),
        CropRegion::new(10, 20, 640, 480)
    );
}

#[test]
fn test_crop_region_parse_invalid() {
    for input in ["", "0x480", "640x0", "640x480+10", "640:480", "-640x480", "axb"] {
        assert!(CropRegion::parse(input).is_err(), "{input} should be rejected");
    }
}

#[test]
fn test_crop_region_default_and_edges() {
    let region = CropRegion::DEFAULT;
    assert_eq!(region.width, 540);
    assert_eq!(region.height, 720);
    assert_eq!(region.right(), 540);
    assert_eq!(region.bottom(), 720);
    assert_eq!(region.to_string(), "540x720+0+0");
}

#[test]
fn test_frame_size_parse() {
    assert_eq!(FrameSize::parse("1920x1080").unwrap(), FrameSize::new(1920, 1080));
    assert!(FrameSize::parse("1920").is_err());
    assert!(FrameSize::parse("0x1080").is_err());
}

#[test]
fn test_playback_position_seek_and_display() {
    let mut position = PlaybackPosition::new(120.0);
    assert_eq!(position.seek_fraction(0.25), 30.0);
    assert_eq!(position.to_string(), "00:00:30 / 00:02:00");

    position.update_time(500.0);
    assert_eq!(position.current(), 120.0);
    assert_eq!(position.fraction(), 1.0);

    assert_eq!(position.seek_fraction(-1.0), 0.0);
}

#[test]
fn test_playback_position_unknown_duration() {
    let mut position = PlaybackPosition::new(f64::NAN);
    assert_eq!(position.duration(), 0.0);
    assert_eq!(position.seek_fraction(0.5), 0.0);
    assert_eq!(position.fraction(), 0.0);
}

#[test]
fn test_overwrite_policy_parse() {
    assert_eq!("never".parse::<OverwritePolicy>().unwrap(), OverwritePolicy::Never);
    assert_eq!("ALWAYS".parse::<OverwritePolicy>().unwrap(), OverwritePolicy::Always);
    assert!("prompt".parse::<OverwritePolicy>().is_err());
}

#[test]
fn test_media_info_helpers() {
    let mut media = MediaInfo {
        path: "audio_only.m4a".to_string(),
        container: "mov".to_string(),
        duration: 12.0,
        file_size: 0,
        bit_rate: None,
        video_streams: Vec::new(),
        audio_streams: vec![AudioStreamInfo {
            index: 0,
            codec: "aac".to_string(),
            sample_rate: 48000,
            channels: 2,
        }],
        subtitle_streams: Vec::new(),
    };

    assert!(media.has_audio());
    assert!(matches!(media.frame_size(), Err(DomainError::NoVideoStream(_))));

    media.video_streams.push(VideoStreamInfo {
        index: 1,
        codec: "h264".to_string(),
        width: 1920,
        height: 1080,
        frame_rate: 29.97,
        pixel_format: None,
    });
    assert_eq!(media.frame_size().unwrap(), FrameSize::new(1920, 1080));
    assert_eq!(media.total_streams(), 2);
}
