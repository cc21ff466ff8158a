//! Mediainfo step handler
//!
//! Takes an event naming a source video, guesses its resolution from the
//! filename and attaches `sourceWidth`, `sourceHeight` and `sourceMediaInfo`.
//!
//! Failures never leave the output fields unset: the handler logs the reason,
//! fills in 1280x720 fallback metadata, and then either returns the error with
//! the fallback record attached ([`ErrorPolicy::Propagate`]) or returns the
//! fallback record as a success ([`ErrorPolicy::Fallback`]).

use serde::Deserialize;
use serde_json::Value;

use crate::config::{ErrorPolicy, MediaInfoConfig};
use crate::error::{log_error, HandlerError, MediaInfoError};
use crate::filename_heuristic::{self, file_name};
use crate::metadata::build_metadata;
use crate::models::{EnrichedRequest, MediaMetadata, ResolutionGuess, VideoRequest};

#[derive(Debug, Clone, Default)]
pub struct MediaInfoHandler {
    error_policy: ErrorPolicy,
}

impl MediaInfoHandler {
    pub fn new(config: &MediaInfoConfig) -> Self {
        Self::with_policy(config.error_policy)
    }

    pub fn with_policy(error_policy: ErrorPolicy) -> Self {
        Self { error_policy }
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    /// Handle a raw JSON event.
    pub fn handle(&self, event: Value) -> Result<EnrichedRequest, HandlerError> {
        tracing::info!(request = %event, "Mediainfo request received");

        match VideoRequest::deserialize(&event) {
            Ok(request) => self.handle_request(request),
            Err(err) => self.fail(
                undecoded_request(event),
                MediaInfoError::InvalidEvent(err.to_string()),
            ),
        }
    }

    /// Handle an already-decoded request.
    pub fn handle_request(
        &self,
        mut request: VideoRequest,
    ) -> Result<EnrichedRequest, HandlerError> {
        request.strip_output_fields();

        match describe(&request) {
            Ok((guess, metadata, media_info)) => {
                tracing::info!(
                    source_video_path = %metadata.filename,
                    width = guess.width,
                    height = guess.height,
                    profile = %metadata.profile,
                    guess = ?guess.source,
                    media_info = %media_info,
                    "Mediainfo response"
                );

                Ok(EnrichedRequest {
                    request,
                    source_width: guess.width,
                    source_height: guess.height,
                    source_media_info: media_info,
                })
            }
            Err(err) => self.fail(request, err),
        }
    }

    fn fail(
        &self,
        request: VideoRequest,
        error: MediaInfoError,
    ) -> Result<EnrichedRequest, HandlerError> {
        log_error(&error);
        tracing::info!(
            policy = %self.error_policy,
            "Falling back to {}",
            ResolutionGuess::fallback()
        );

        let fallback = fallback_record(request);
        match self.error_policy {
            ErrorPolicy::Propagate => Err(HandlerError::new(error, fallback)),
            ErrorPolicy::Fallback => Ok(fallback),
        }
    }
}

fn describe(
    request: &VideoRequest,
) -> Result<(ResolutionGuess, MediaMetadata, String), MediaInfoError> {
    let path = request.video_path()?;
    let name = file_name(path);
    let guess = if name.is_empty() {
        // Only separators, e.g. "/": present but names nothing.
        ResolutionGuess::fallback()
    } else {
        filename_heuristic::infer(name)?
    };
    let metadata = build_metadata(path, guess.width, guess.height);
    let media_info = serde_json::to_string_pretty(&metadata)?;
    Ok((guess, metadata, media_info))
}

/// Keep whatever an object event carried when its path field could not be decoded.
///
/// The malformed `sourceVideoPath` value stays in the pass-through map so the
/// output is still the input record plus the three output fields.
fn undecoded_request(event: Value) -> VideoRequest {
    match event {
        Value::Object(passthrough) => {
            let mut request = VideoRequest {
                source_video_path: None,
                passthrough,
            };
            request.strip_output_fields();
            request
        }
        _ => VideoRequest::default(),
    }
}

fn fallback_record(request: VideoRequest) -> EnrichedRequest {
    let guess = ResolutionGuess::fallback();
    let filename = request.video_path().unwrap_or_default().to_string();
    let metadata = build_metadata(&filename, guess.width, guess.height);
    let media_info = serde_json::to_string_pretty(&metadata).unwrap_or_else(|err| {
        tracing::error!(error = %err, "Failed to serialize fallback metadata");
        String::from("{}")
    });

    EnrichedRequest {
        request,
        source_width: guess.width,
        source_height: guess.height,
        source_media_info: media_info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::tests::captured_levels;
    use crate::error::ErrorMetadata;
    use crate::models::ProfileTier;
    use serde_json::json;

    #[test]
    fn test_handle_enriches_event() {
        let handler = MediaInfoHandler::default();
        let enriched = handler
            .handle(json!({ "sourceVideoPath": "movie_1080p_final.mp4" }))
            .unwrap();

        assert_eq!(enriched.source_width, 1920);
        assert_eq!(enriched.source_height, 1080);

        let metadata = enriched.media_info().unwrap();
        assert_eq!(metadata.profile, ProfileTier::FullHd);
        assert_eq!(metadata.video[0].bitrate_bps, 8_000_000);
        assert_eq!(metadata.filename, "movie_1080p_final.mp4");
    }

    #[test]
    fn test_handle_uses_file_name_only() {
        let handler = MediaInfoHandler::default();
        let enriched = handler
            .handle(json!({ "sourceVideoPath": "hd-uploads/2024/raw_footage.mov" }))
            .unwrap();

        // The "hd" in the directory name does not count.
        assert_eq!((enriched.source_width, enriched.source_height), (1280, 720));
        let metadata = enriched.media_info().unwrap();
        assert_eq!(metadata.filename, "hd-uploads/2024/raw_footage.mov");
        assert_eq!(metadata.container.format, "QuickTime");
    }

    #[test]
    fn test_missing_path_propagates_with_fallback() {
        let handler = MediaInfoHandler::with_policy(ErrorPolicy::Propagate);
        let err = handler.handle(json!({ "guid": "g-1" })).unwrap_err();

        assert!(err.error().is_validation());
        let fallback = err.fallback();
        assert_eq!((fallback.source_width, fallback.source_height), (1280, 720));
        assert_eq!(fallback.field("guid"), Some(&json!("g-1")));
        assert_eq!(fallback.media_info().unwrap().profile, ProfileTier::Hd);
    }

    #[test]
    fn test_missing_path_fallback_policy_succeeds() {
        let handler = MediaInfoHandler::with_policy(ErrorPolicy::Fallback);
        let enriched = handler.handle(json!({})).unwrap();
        assert_eq!((enriched.source_width, enriched.source_height), (1280, 720));
    }

    #[test]
    fn test_non_object_event_is_invalid() {
        let handler = MediaInfoHandler::default();
        let err = handler.handle(json!("movie_1080p.mp4")).unwrap_err();

        assert!(matches!(err.error(), MediaInfoError::InvalidEvent(_)));
        assert_eq!(err.error_code(), "INVALID_EVENT");
        assert_eq!(err.fallback().source_height, 720);
    }

    #[test]
    fn test_reprocessed_event_replaces_output_fields() {
        let handler = MediaInfoHandler::default();
        let first = handler
            .handle(json!({ "sourceVideoPath": "clip_4k.mp4" }))
            .unwrap()
            .into_value()
            .unwrap();

        let mut second_input = first.clone();
        second_input["sourceVideoPath"] = json!("clip_480p.mp4");
        let second = handler.handle(second_input).unwrap();

        assert_eq!(second.source_height, 480);
        assert!(second.field("sourceHeight").is_none());
        let serialized = serde_json::to_string(&second).unwrap();
        assert_eq!(serialized.matches("\"sourceHeight\"").count(), 1);
    }

    #[test]
    fn test_wrong_typed_path_keeps_record() {
        let handler = MediaInfoHandler::with_policy(ErrorPolicy::Fallback);
        let output = handler
            .handle(json!({
                "guid": "g-1",
                "srcBucket": "ingest",
                "sourceVideoPath": 42,
                "sourceHeight": 2160
            }))
            .unwrap()
            .into_value()
            .unwrap();

        assert_eq!(output["guid"], "g-1");
        assert_eq!(output["srcBucket"], "ingest");
        assert_eq!(output["sourceVideoPath"], 42);
        assert_eq!(output["sourceWidth"], 1280);
        assert_eq!(output["sourceHeight"], 720);

        let err = MediaInfoHandler::default()
            .handle(json!({ "guid": "g-1", "sourceVideoPath": 42 }))
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_EVENT");
        assert_eq!(err.fallback().field("guid"), Some(&json!("g-1")));
    }

    #[test]
    fn test_trailing_separator_is_not_missing() {
        let handler = MediaInfoHandler::default();
        let enriched = handler
            .handle(json!({ "sourceVideoPath": "uploads/1080p/" }))
            .unwrap();
        assert_eq!((enriched.source_width, enriched.source_height), (1920, 1080));
        assert_eq!(enriched.media_info().unwrap().filename, "uploads/1080p/");

        let enriched = handler.handle(json!({ "sourceVideoPath": "/" })).unwrap();
        assert_eq!((enriched.source_width, enriched.source_height), (1280, 720));
    }

    #[test]
    fn test_missing_path_logs_at_warn() {
        let handler = MediaInfoHandler::with_policy(ErrorPolicy::Fallback);
        let levels = captured_levels(|| {
            handler.handle(json!({ "guid": "g-1" })).unwrap();
        });

        assert!(levels.contains(&tracing::Level::WARN));
        assert!(!levels.contains(&tracing::Level::ERROR));
    }
}
