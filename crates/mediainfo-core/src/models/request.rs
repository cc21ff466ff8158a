use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::metadata::MediaMetadata;
use crate::error::MediaInfoError;

/// Input field naming the source video.
pub const SOURCE_VIDEO_FIELD: &str = "sourceVideoPath";
/// Older pipeline revisions name the source video `srcVideo`.
pub const LEGACY_SOURCE_VIDEO_FIELD: &str = "srcVideo";

pub const SOURCE_WIDTH_FIELD: &str = "sourceWidth";
pub const SOURCE_HEIGHT_FIELD: &str = "sourceHeight";
pub const SOURCE_MEDIA_INFO_FIELD: &str = "sourceMediaInfo";

/// Event received by the mediainfo step.
///
/// Only `sourceVideoPath` is interpreted. Every other field belongs to the
/// surrounding orchestration and is carried through in `passthrough`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_video_path: Option<String>,
    #[serde(flatten)]
    pub passthrough: Map<String, Value>,
}

impl VideoRequest {
    pub fn new(source_video_path: impl Into<String>) -> Self {
        Self {
            source_video_path: Some(source_video_path.into()),
            passthrough: Map::new(),
        }
    }

    /// Source video path, falling back to the legacy `srcVideo` field.
    ///
    /// Blank values count as missing.
    pub fn video_path(&self) -> Result<&str, MediaInfoError> {
        self.source_video_path
            .as_deref()
            .or_else(|| {
                self.passthrough
                    .get(LEGACY_SOURCE_VIDEO_FIELD)
                    .and_then(Value::as_str)
            })
            .filter(|path| !path.trim().is_empty())
            .ok_or(MediaInfoError::MissingField(SOURCE_VIDEO_FIELD))
    }

    /// Drop stale output fields so a re-processed event never carries them twice.
    pub(crate) fn strip_output_fields(&mut self) {
        for field in [
            SOURCE_WIDTH_FIELD,
            SOURCE_HEIGHT_FIELD,
            SOURCE_MEDIA_INFO_FIELD,
        ] {
            self.passthrough.remove(field);
        }
    }
}

/// The request after the mediainfo step ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRequest {
    #[serde(flatten)]
    pub request: VideoRequest,
    pub source_width: u32,
    pub source_height: u32,
    /// Pretty-printed JSON of [`MediaMetadata`]
    pub source_media_info: String,
}

impl EnrichedRequest {
    /// Parse `sourceMediaInfo` back into structured metadata.
    pub fn media_info(&self) -> Result<MediaMetadata, MediaInfoError> {
        Ok(serde_json::from_str(&self.source_media_info)?)
    }

    /// Pass-through field lookup.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.request.passthrough.get(key)
    }

    /// Set a pass-through field, replacing any previous value.
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.request.passthrough.insert(key.into(), value.into());
    }

    pub fn into_value(self) -> Result<Value, MediaInfoError> {
        Ok(serde_json::to_value(self)?)
    }
}
