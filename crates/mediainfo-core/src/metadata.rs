//! Stub media metadata builder
//!
//! Synthesizes the `sourceMediaInfo` document for a guessed resolution. Pure:
//! the same (filename, width, height) always yields the same document.

use crate::models::{AudioTrack, ContainerInfo, MediaMetadata, ProfileTier, VideoTrack};

/// Every synthesized video lasts five minutes.
pub const STUB_DURATION_MS: u64 = 300_000;
pub const STUB_FRAMERATE_FPS: f64 = 30.0;
pub const STUB_VIDEO_CODEC: &str = "H.264";
pub const STUB_VIDEO_PROFILE: &str = "High";
pub const STUB_AUDIO_CODEC: &str = "AAC";
pub const STUB_AUDIO_CHANNELS: u32 = 2;
pub const STUB_AUDIO_SAMPLING_RATE_HZ: u32 = 48_000;
pub const STUB_AUDIO_BITRATE_BPS: u64 = 128_000;
pub const STUB_AUDIO_CHANNEL_LAYOUT: &str = "L R";

const DEFAULT_CONTAINER_FORMAT: &str = "MPEG-4";

/// Common display aspect ratios, snapped to within 1%.
const COMMON_ASPECT_RATIOS: &[(u32, u32)] = &[(16, 9), (4, 3), (21, 9), (1, 1), (9, 16)];
const ASPECT_RATIO_TOLERANCE: f64 = 0.01;

/// Build the synthesized metadata for a video of the given size.
pub fn build_metadata(filename: &str, width: u32, height: u32) -> MediaMetadata {
    let profile = ProfileTier::for_height(height);
    let bitrate_bps = profile.video_bitrate_bps();

    MediaMetadata {
        filename: filename.to_string(),
        profile,
        container: ContainerInfo {
            format: container_format(filename).to_string(),
            duration_ms: STUB_DURATION_MS,
            file_size_bytes: file_size_bytes(bitrate_bps, STUB_DURATION_MS),
        },
        video: vec![VideoTrack {
            codec: STUB_VIDEO_CODEC.to_string(),
            width,
            height,
            aspect_ratio: aspect_ratio(width, height),
            framerate_fps: STUB_FRAMERATE_FPS,
            bitrate_bps,
            profile: STUB_VIDEO_PROFILE.to_string(),
            level: profile.h264_level().to_string(),
        }],
        audio: vec![AudioTrack {
            codec: STUB_AUDIO_CODEC.to_string(),
            channels: STUB_AUDIO_CHANNELS,
            sampling_rate_hz: STUB_AUDIO_SAMPLING_RATE_HZ,
            bitrate_bps: STUB_AUDIO_BITRATE_BPS,
            channel_layout: STUB_AUDIO_CHANNEL_LAYOUT.to_string(),
        }],
    }
}

/// Size of a stream at `bitrate_bps` lasting `duration_ms`.
pub fn file_size_bytes(bitrate_bps: u64, duration_ms: u64) -> u64 {
    bitrate_bps * (duration_ms / 1000) / 8
}

/// Container format name implied by the file extension.
pub fn container_format(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("mp4") | Some("m4v") => "MPEG-4",
        Some("mov") => "QuickTime",
        Some("mkv") => "Matroska",
        Some("webm") => "WebM",
        Some("avi") => "AVI",
        Some("mxf") => "MXF",
        Some("ts") | Some("m2ts") | Some("mts") => "MPEG-TS",
        _ => DEFAULT_CONTAINER_FORMAT,
    }
}

/// Display aspect ratio as "W:H".
pub fn aspect_ratio(width: u32, height: u32) -> String {
    if width == 0 || height == 0 {
        return "0:0".to_string();
    }

    let ratio = f64::from(width) / f64::from(height);
    for &(w, h) in COMMON_ASPECT_RATIOS {
        let common = f64::from(w) / f64::from(h);
        if ((ratio - common) / common).abs() <= ASPECT_RATIO_TOLERANCE {
            return format!("{}:{}", w, h);
        }
    }

    let divisor = gcd(width, height);
    format!("{}:{}", width / divisor, height / divisor)
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
