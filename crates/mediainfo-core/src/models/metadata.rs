//! Synthesized media metadata types
//!
//! Shape of the `sourceMediaInfo` document. Values are placeholders chosen from
//! the guessed resolution; no field is read from real media.

use serde::{Deserialize, Serialize};

use super::resolution::ProfileTier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    pub filename: String,
    pub profile: ProfileTier,
    pub container: ContainerInfo,
    pub video: Vec<VideoTrack>,
    pub audio: Vec<AudioTrack>,
}

/// Format-level attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerInfo {
    pub format: String,
    pub duration_ms: u64,
    pub file_size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoTrack {
    pub codec: String,
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: String,
    pub framerate_fps: f64,
    pub bitrate_bps: u64,
    pub profile: String,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrack {
    pub codec: String,
    pub channels: u32,
    pub sampling_rate_hz: u32,
    pub bitrate_bps: u64,
    pub channel_layout: String,
}

impl MediaMetadata {
    /// First video track, which carries the frame size.
    pub fn primary_video(&self) -> Option<&VideoTrack> {
        self.video.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_metadata_camel_case_keys() {
        let metadata = MediaMetadata {
            filename: "clip.mp4".to_string(),
            profile: ProfileTier::Hd,
            container: ContainerInfo {
                format: "MPEG-4".to_string(),
                duration_ms: 300_000,
                file_size_bytes: 187_500_000,
            },
            video: vec![VideoTrack {
                codec: "H.264".to_string(),
                width: 1280,
                height: 720,
                aspect_ratio: "16:9".to_string(),
                framerate_fps: 30.0,
                bitrate_bps: 5_000_000,
                profile: "High".to_string(),
                level: "3.1".to_string(),
            }],
            audio: vec![AudioTrack {
                codec: "AAC".to_string(),
                channels: 2,
                sampling_rate_hz: 48_000,
                bitrate_bps: 128_000,
                channel_layout: "L R".to_string(),
            }],
        };

        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["profile"], "HD");
        assert_eq!(value["container"]["durationMs"], 300_000);
        assert_eq!(value["container"]["fileSizeBytes"], 187_500_000);
        assert_eq!(value["video"][0]["aspectRatio"], "16:9");
        assert_eq!(value["video"][0]["framerateFps"], 30.0);
        assert_eq!(value["audio"][0]["samplingRateHz"], 48_000);
        assert_eq!(value["audio"][0]["channelLayout"], "L R");

        assert_eq!(metadata.primary_video().map(|v| v.width), Some(1280));
    }
}
