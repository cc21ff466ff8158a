pub mod metadata;
pub mod request;
pub mod resolution;

pub use metadata::{AudioTrack, ContainerInfo, MediaMetadata, VideoTrack};
pub use request::{
    EnrichedRequest, VideoRequest, LEGACY_SOURCE_VIDEO_FIELD, SOURCE_HEIGHT_FIELD,
    SOURCE_MEDIA_INFO_FIELD, SOURCE_VIDEO_FIELD, SOURCE_WIDTH_FIELD,
};
pub use resolution::{EncodeTier, GuessSource, ProfileTier, ResolutionGuess};
