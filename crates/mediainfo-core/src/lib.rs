//! Mediainfo Core Library
//!
//! This crate provides the mediainfo pipeline step: a best-effort filename
//! heuristic that guesses the source resolution, a builder for synthesized
//! media metadata, the step handler that enriches incoming events, and the
//! encode-profile selection that consumes the enriched record.
//!
//! Nothing here opens or decodes the referenced video. All values are derived
//! from the filename text.

pub mod config;
pub mod error;
pub mod filename_heuristic;
pub mod handler;
pub mod metadata;
pub mod models;
pub mod profiler;
pub mod telemetry;

// Re-export commonly used types
pub use config::{ErrorPolicy, LogFormat, MediaInfoConfig};
pub use error::{log_error, ErrorMetadata, HandlerError, LogLevel, MediaInfoError};
pub use filename_heuristic::infer;
pub use handler::MediaInfoHandler;
pub use metadata::build_metadata;
pub use models::{
    EncodeTier, EnrichedRequest, GuessSource, MediaMetadata, ProfileTier, ResolutionGuess,
    VideoRequest,
};
pub use profiler::{apply_encode_profile, select_encode_tier};
